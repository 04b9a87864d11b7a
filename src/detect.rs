//! Input format detection.

use crate::error::{Error, Result};
use serde_json::Value;
use std::path::Path;

/// Kind of outline input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// JSON array of `{page, size, text}` fragments
    Fragments,
    /// JSON array of `{text, toc_items}` markdown page chunks
    MarkdownPages,
    /// Raw markdown, pages separated by form feeds
    Markdown,
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            InputKind::Fragments => "fragments",
            InputKind::MarkdownPages => "markdown pages",
            InputKind::Markdown => "markdown",
        };
        f.write_str(name)
    }
}

/// UTF-8 byte order mark.
const UTF8_BOM: &str = "\u{feff}";

/// Detect the input kind of a file.
///
/// # Example
/// ```no_run
/// use unoutline::detect::detect_input_from_path;
///
/// let kind = detect_input_from_path("fragments.json").unwrap();
/// println!("Input: {}", kind);
/// ```
pub fn detect_input_from_path<P: AsRef<Path>>(path: P) -> Result<InputKind> {
    let data = std::fs::read(path)?;
    detect_input_from_bytes(&data)
}

/// Detect the input kind of raw bytes.
///
/// # Returns
/// * `Ok(InputKind::Fragments)` for an empty JSON array or one whose first
///   object carries a `size`
/// * `Ok(InputKind::MarkdownPages)` for a JSON array of objects with `text`
/// * `Ok(InputKind::Markdown)` for any other UTF-8 text that is not JSON
/// * `Err(Error::UnknownInput)` for non-UTF-8 data or JSON of another shape
pub fn detect_input_from_bytes(data: &[u8]) -> Result<InputKind> {
    let text = std::str::from_utf8(data)
        .map_err(|e| Error::UnknownInput(format!("not UTF-8 text ({})", e)))?;
    detect_input_from_str(text)
}

/// Detect the input kind of a string.
pub fn detect_input_from_str(text: &str) -> Result<InputKind> {
    let trimmed = text.trim_start_matches(UTF8_BOM).trim_start();
    if !trimmed.starts_with('[') && !trimmed.starts_with('{') {
        return Ok(InputKind::Markdown);
    }

    let Ok(value) = serde_json::from_str::<Value>(trimmed) else {
        return Ok(InputKind::Markdown);
    };

    let Value::Array(items) = value else {
        return Err(Error::UnknownInput("JSON input must be an array".to_string()));
    };

    match items.first() {
        None => Ok(InputKind::Fragments),
        Some(first) if first.get("size").is_some() => Ok(InputKind::Fragments),
        Some(_) if items.iter().all(|item| item.get("text").is_some()) => {
            Ok(InputKind::MarkdownPages)
        }
        Some(_) => Err(Error::UnknownInput(
            "JSON array of neither fragments nor markdown pages".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_fragments() {
        let data = br#"[{"page": 1, "size": 24.0, "text": "Title"}]"#;
        assert_eq!(detect_input_from_bytes(data).unwrap(), InputKind::Fragments);
        assert_eq!(detect_input_from_bytes(b" []").unwrap(), InputKind::Fragments);
    }

    #[test]
    fn test_detect_markdown_pages() {
        let data = br##"[{"text": "# A"}, {"text": "b", "toc_items": [[1, "B"]]}]"##;
        assert_eq!(
            detect_input_from_bytes(data).unwrap(),
            InputKind::MarkdownPages
        );
    }

    #[test]
    fn test_detect_markdown() {
        assert_eq!(
            detect_input_from_bytes(b"# Heading\n\nBody").unwrap(),
            InputKind::Markdown
        );
        assert_eq!(
            detect_input_from_bytes(b"[link](https://example.com) text").unwrap(),
            InputKind::Markdown
        );
        assert_eq!(
            detect_input_from_str("\u{feff}# Title").unwrap(),
            InputKind::Markdown
        );
    }

    #[test]
    fn test_detect_unknown() {
        assert!(matches!(
            detect_input_from_bytes(b"\xff\xfe\x00"),
            Err(Error::UnknownInput(_))
        ));
        assert!(matches!(
            detect_input_from_bytes(b"[1, 2, 3]"),
            Err(Error::UnknownInput(_))
        ));
        assert!(matches!(
            detect_input_from_bytes(br#"{"title": "x"}"#),
            Err(Error::UnknownInput(_))
        ));
    }
}
