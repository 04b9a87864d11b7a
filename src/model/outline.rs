//! Heading and outline types.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Highest heading level that can be represented.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// A heading level (H1 is the outermost).
///
/// Serialized as the uppercase tag `"H1"`, `"H2"`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    /// Level H1.
    pub const H1: HeadingLevel = HeadingLevel(1);
    /// Level H2.
    pub const H2: HeadingLevel = HeadingLevel(2);
    /// Level H3.
    pub const H3: HeadingLevel = HeadingLevel(3);

    /// Create a level from its 1-based number, clamped to `1..=6`.
    pub fn new(number: u8) -> Self {
        Self(number.clamp(1, MAX_HEADING_LEVEL))
    }

    /// Create a level from a 0-based rank.
    pub fn from_rank(rank: usize) -> Self {
        Self::new(rank.saturating_add(1).min(MAX_HEADING_LEVEL as usize) as u8)
    }

    /// The 1-based level number.
    pub fn number(self) -> u8 {
        self.0
    }

    /// The 0-based rank used for ordering (H1 = 0).
    pub fn rank(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.0)
    }
}

impl FromStr for HeadingLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('H')
            .or_else(|| s.strip_prefix('h'))
            .ok_or_else(|| Error::Other(format!("Invalid heading level: {}", s)))?;
        match digits.parse::<u8>() {
            Ok(n) if (1..=MAX_HEADING_LEVEL).contains(&n) => Ok(Self(n)),
            _ => Err(Error::Other(format!("Invalid heading level: {}", s))),
        }
    }
}

impl From<HeadingLevel> for String {
    fn from(level: HeadingLevel) -> Self {
        level.to_string()
    }
}

impl TryFrom<String> for HeadingLevel {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A text unit that has been assigned a heading level.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingCandidate {
    /// Page number (1-indexed)
    pub page: u32,

    /// Assigned level
    pub level: HeadingLevel,

    /// Normalized heading text
    pub text: String,

    /// Font size, when the level was derived from font metrics
    pub size: Option<f32>,
}

impl HeadingCandidate {
    /// Create a candidate without font metrics (markdown pipeline).
    pub fn new(page: u32, level: HeadingLevel, text: impl Into<String>) -> Self {
        Self {
            page,
            level,
            text: text.into(),
            size: None,
        }
    }

    /// Create a candidate from a sized fragment (font pipeline).
    pub fn sized(page: u32, level: HeadingLevel, text: impl Into<String>, size: f32) -> Self {
        Self {
            page,
            level,
            text: text.into(),
            size: Some(size),
        }
    }
}

/// A single outline entry as emitted to consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Heading level tag
    pub level: HeadingLevel,

    /// Heading text
    pub text: String,

    /// Page number (1-indexed)
    pub page: u32,
}

impl From<HeadingCandidate> for OutlineEntry {
    fn from(candidate: HeadingCandidate) -> Self {
        Self {
            level: candidate.level,
            text: candidate.text,
            page: candidate.page,
        }
    }
}

/// Document title plus the ordered heading list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    /// Document title (the configured sentinel when none was found)
    pub title: String,

    /// Ordered headings
    pub outline: Vec<OutlineEntry>,
}

impl Outline {
    /// Create an outline.
    pub fn new(title: impl Into<String>, outline: Vec<OutlineEntry>) -> Self {
        Self {
            title: title.into(),
            outline,
        }
    }

    /// Number of headings.
    pub fn len(&self) -> usize {
        self.outline.len()
    }

    /// Check if the outline has no headings.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }

    /// Distinct levels present in the outline.
    pub fn levels(&self) -> BTreeSet<HeadingLevel> {
        self.outline.iter().map(|e| e.level).collect()
    }
}
