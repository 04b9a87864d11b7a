//! Outline inference options.

use std::collections::BTreeMap;

use crate::model::{HeadingLevel, MAX_HEADING_LEVEL};

/// Default number of heading levels.
pub const DEFAULT_MAX_LEVELS: usize = 3;

/// Options for both inference pipelines.
#[derive(Debug, Clone)]
pub struct OutlineOptions {
    /// Number of heading levels recognized by the font pipeline (1-6).
    /// Also the upper clamp for TOC level numbers.
    pub max_levels: usize,

    /// Markdown heading depth to outline level mapping
    pub marker_map: MarkerMap,

    /// Drop markdown candidates (and title lines) starting with a lowercase letter
    pub skip_lowercase: bool,

    /// Title used when no title line is found
    pub untitled: String,

    /// Decimal places kept when comparing font sizes
    pub size_precision: u8,

    /// Renumber the levels present in the outline to H1..Hk
    pub compact_levels: bool,
}

impl OutlineOptions {
    /// Create new outline options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of heading levels.
    pub fn with_max_levels(mut self, levels: usize) -> Self {
        self.max_levels = levels.clamp(1, MAX_HEADING_LEVEL as usize);
        self
    }

    /// Set the markdown marker mapping.
    pub fn with_marker_map(mut self, map: MarkerMap) -> Self {
        self.marker_map = map;
        self
    }

    /// Drop lowercase-initial markdown headings.
    pub fn skip_lowercase(mut self) -> Self {
        self.skip_lowercase = true;
        self
    }

    /// Set the title used when none is found.
    pub fn with_untitled(mut self, sentinel: impl Into<String>) -> Self {
        self.untitled = sentinel.into();
        self
    }

    /// Set font size comparison precision in decimal places (0-3).
    pub fn with_size_precision(mut self, places: u8) -> Self {
        self.size_precision = places.min(3);
        self
    }

    /// Enable or disable level compaction.
    pub fn with_compact_levels(mut self, compact: bool) -> Self {
        self.compact_levels = compact;
        self
    }

    /// Highest level a TOC item may be assigned.
    pub fn max_level(&self) -> HeadingLevel {
        HeadingLevel::from_rank(self.max_levels.saturating_sub(1))
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            max_levels: DEFAULT_MAX_LEVELS,
            marker_map: MarkerMap::default(),
            skip_lowercase: false,
            untitled: String::new(),
            size_precision: 1,
            compact_levels: false,
        }
    }
}

/// Mapping from markdown heading depth (`#` count) to outline level.
///
/// The default collapses `#` and `##` into H1 and shifts deeper markers up
/// by one: `###` is H2 and `####` is H3. Depths without an entry are not
/// headings. A line that is one bold run with no marker gets the emphasis
/// level (H3 by default).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerMap {
    levels: BTreeMap<usize, HeadingLevel>,
    emphasis: Option<HeadingLevel>,
}

impl MarkerMap {
    /// An empty mapping (no marker is a heading).
    pub fn empty() -> Self {
        Self {
            levels: BTreeMap::new(),
            emphasis: None,
        }
    }

    /// Map depth N to level HN for depths `1..=depth`.
    pub fn one_to_one(depth: usize) -> Self {
        let levels = (1..=depth.min(MAX_HEADING_LEVEL as usize))
            .map(|d| (d, HeadingLevel::new(d as u8)))
            .collect();
        Self {
            levels,
            emphasis: None,
        }
    }

    /// Map a depth to a level.
    pub fn with(mut self, depth: usize, level: HeadingLevel) -> Self {
        if depth > 0 {
            self.levels.insert(depth, level);
        }
        self
    }

    /// Stop treating a depth as a heading.
    pub fn without(mut self, depth: usize) -> Self {
        self.levels.remove(&depth);
        self
    }

    /// Set the level of bold-only lines (`None` disables them).
    pub fn with_emphasis_level(mut self, level: Option<HeadingLevel>) -> Self {
        self.emphasis = level;
        self
    }

    /// Level of bold-only lines.
    pub fn emphasis_level(&self) -> Option<HeadingLevel> {
        self.emphasis
    }

    /// Level for a marker depth, if that depth is a heading.
    pub fn level_for(&self, depth: usize) -> Option<HeadingLevel> {
        self.levels.get(&depth).copied()
    }
}

impl Default for MarkerMap {
    fn default() -> Self {
        Self::empty()
            .with(1, HeadingLevel::H1)
            .with(2, HeadingLevel::H1)
            .with(3, HeadingLevel::H2)
            .with(4, HeadingLevel::H3)
            .with_emphasis_level(Some(HeadingLevel::H3))
    }
}
