//! Markdown page chunks and table-of-contents hints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An externally supplied table-of-contents hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocItem {
    /// Level number as reported by the extractor (1 = top level)
    pub level: i64,

    /// Entry text
    pub text: String,
}

impl TocItem {
    /// Create a new TOC item.
    pub fn new(level: i64, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    /// Read a TOC item from its raw JSON form.
    ///
    /// Accepts `[level, text, ...]` tuples (extra elements are ignored) and
    /// `{"level": .., "text"|"title": ..}` objects. Anything else, including
    /// tuples with fewer than two elements or with the wrong element types,
    /// yields `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Array(fields) if fields.len() >= 2 => {
                let level = level_number(&fields[0])?;
                let text = fields[1].as_str()?;
                Some(Self::new(level, text))
            }
            Value::Object(map) => {
                let level = map.get("level").or_else(|| map.get("lvl"))?;
                let text = map.get("text").or_else(|| map.get("title"))?;
                Some(Self::new(level_number(level)?, text.as_str()?))
            }
            _ => None,
        }
    }
}

/// Integer level numbers; floats are accepted only when integral.
fn level_number(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    (f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
}

/// One page of markdown-rendered content with its TOC hints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkdownPage {
    /// Markdown text of the page
    pub text: String,

    /// Raw TOC entries attributed to this page
    #[serde(default)]
    pub toc_items: Vec<Value>,
}

impl MarkdownPage {
    /// Create a page without TOC hints.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            toc_items: Vec::new(),
        }
    }

    /// Attach a TOC hint to the page.
    pub fn with_toc_item(mut self, level: i64, text: impl Into<String>) -> Self {
        self.toc_items
            .push(Value::Array(vec![level.into(), Value::String(text.into())]));
        self
    }

    /// Well-formed TOC items, in their original order.
    ///
    /// Malformed entries are skipped one by one.
    pub fn toc_items(&self) -> Vec<TocItem> {
        self.toc_items
            .iter()
            .filter_map(|raw| {
                let item = TocItem::from_value(raw);
                if item.is_none() {
                    log::debug!("Skipping malformed TOC item: {}", raw);
                }
                item
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_toc_item_from_tuple() {
        let item = TocItem::from_value(&json!([2, "Methods", 7, {"kind": 1}])).unwrap();
        assert_eq!(item, TocItem::new(2, "Methods"));
    }

    #[test]
    fn test_toc_item_from_object() {
        let item = TocItem::from_value(&json!({"lvl": 1, "title": "Appendix"})).unwrap();
        assert_eq!(item, TocItem::new(1, "Appendix"));
    }

    #[test]
    fn test_toc_item_malformed() {
        assert!(TocItem::from_value(&json!([1])).is_none());
        assert!(TocItem::from_value(&json!(["one", "Intro"])).is_none());
        assert!(TocItem::from_value(&json!([1, 2])).is_none());
        assert!(TocItem::from_value(&json!([1.5, "Intro"])).is_none());
        assert!(TocItem::from_value(&json!("Intro")).is_none());
    }

    #[test]
    fn test_page_skips_malformed_items() {
        let page: MarkdownPage = serde_json::from_value(json!({
            "text": "# Title",
            "toc_items": [[1, "Intro", 1], [2], [3.0, "Scope"]]
        }))
        .unwrap();

        let items = page.toc_items();
        assert_eq!(items, vec![TocItem::new(1, "Intro"), TocItem::new(3, "Scope")]);
    }

    #[test]
    fn test_page_without_toc_field() {
        let page: MarkdownPage = serde_json::from_str(r#"{"text": "body"}"#).unwrap();
        assert!(page.toc_items().is_empty());
    }
}
