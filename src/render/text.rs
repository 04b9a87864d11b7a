//! Plain text rendering for outlines.

use std::fmt::Write;

use crate::model::Outline;

/// Indentation per level below H1.
const INDENT: &str = "  ";

/// Convert an outline to an indented plain text listing.
///
/// The title comes first (omitted when empty), then one line per heading:
///
/// ```text
/// Annual Report
/// Introduction (p. 1)
///   Background (p. 2)
/// ```
pub fn to_text(outline: &Outline) -> String {
    let mut output = String::new();

    if !outline.title.is_empty() {
        output.push_str(&outline.title);
        output.push('\n');
    }

    for entry in &outline.outline {
        let indent = INDENT.repeat(entry.level.rank());
        // Writing to a String cannot fail
        let _ = writeln!(output, "{}{} (p. {})", indent, entry.text, entry.page);
    }

    output
}
