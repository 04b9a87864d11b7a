//! Fragment-level types.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A run of text with its font size, as produced by content extraction.
///
/// Fragments are the input of the font-metrics pipeline. Lists of
/// fragments from different page ranges can be concatenated in any
/// order; only the order within one range is significant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// Page number (1-indexed)
    pub page: u32,

    /// Font size in points
    pub size: f32,

    /// Text content, trimmed
    pub text: String,
}

impl Fragment {
    /// Create a new fragment.
    pub fn new(page: u32, size: f32, text: impl Into<String>) -> Self {
        Self {
            page,
            size,
            text: text.into(),
        }
    }

    /// Check the fragment against the extraction contract.
    ///
    /// Pages are 1-indexed, sizes are finite and non-negative, and the
    /// text is non-empty after trimming.
    pub fn validate(&self) -> Result<()> {
        if self.page == 0 {
            return Err(Error::InvalidFragment(format!(
                "page must be 1-indexed (text: {:?})",
                self.text
            )));
        }
        if !self.size.is_finite() || self.size < 0.0 {
            return Err(Error::InvalidFragment(format!(
                "font size {} on page {} is not a non-negative number",
                self.size, self.page
            )));
        }
        if self.text.trim().is_empty() {
            return Err(Error::InvalidFragment(format!(
                "empty text on page {}",
                self.page
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_json_shape() {
        let fragment: Fragment =
            serde_json::from_str(r#"{"page": 2, "size": 14.5, "text": "Methods"}"#).unwrap();
        assert_eq!(fragment, Fragment::new(2, 14.5, "Methods"));
    }

    #[test]
    fn test_validate() {
        assert!(Fragment::new(1, 12.0, "Body").validate().is_ok());
        assert!(Fragment::new(0, 12.0, "Body").validate().is_err());
        assert!(Fragment::new(1, -1.0, "Body").validate().is_err());
        assert!(Fragment::new(1, f32::NAN, "Body").validate().is_err());
        assert!(Fragment::new(1, 12.0, "   ").validate().is_err());
    }
}
