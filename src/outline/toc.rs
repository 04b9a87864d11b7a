//! Merging table-of-contents hints into a page's headings.

use std::collections::HashSet;

use crate::cleanup::normalize;
use crate::model::{HeadingCandidate, HeadingLevel, TocItem};

/// Adds TOC entries that the page body did not already produce.
///
/// The merge is additive: existing candidates are never removed or
/// reordered, and new entries are appended after them in TOC order.
#[derive(Debug, Clone, Copy)]
pub struct TocMerger {
    max_level: HeadingLevel,
}

impl TocMerger {
    /// Create a merger that clamps TOC levels to `1..=max_level`.
    pub fn new(max_level: HeadingLevel) -> Self {
        Self { max_level }
    }

    /// Outline level for a TOC level number.
    ///
    /// Numbers below 1 become H1, numbers above the maximum collapse to it.
    pub fn level_for(&self, level_number: i64) -> HeadingLevel {
        let clamped = level_number.clamp(1, self.max_level.number() as i64);
        HeadingLevel::new(clamped as u8)
    }

    /// Merge `items` into the candidates of page `page`.
    ///
    /// `also_present` lists texts that count as already represented on the
    /// page without being candidates (the title line). Matching is exact on
    /// normalized text and also covers TOC entries merged earlier in the
    /// same call.
    pub fn merge(
        &self,
        page: u32,
        mut candidates: Vec<HeadingCandidate>,
        items: &[TocItem],
        also_present: &[&str],
    ) -> Vec<HeadingCandidate> {
        let mut present: HashSet<String> = candidates.iter().map(|c| c.text.clone()).collect();
        present.extend(also_present.iter().map(|t| t.to_string()));

        for item in items {
            let text = normalize(&item.text);
            if text.is_empty() || present.contains(&text) {
                continue;
            }
            present.insert(text.clone());
            candidates.push(HeadingCandidate::new(page, self.level_for(item.level), text));
        }

        candidates
    }
}

impl Default for TocMerger {
    fn default() -> Self {
        Self::new(HeadingLevel::H3)
    }
}
