//! Outline assembly shared by both pipelines.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::{HeadingCandidate, HeadingLevel, Outline, OutlineEntry};

/// Build the final outline from leveled candidates.
///
/// Candidates are grouped by page in ascending page order. The sort is
/// stable, so the order a pipeline produced within each page is kept.
/// With `compact_levels`, the levels present are renumbered to H1..Hk in
/// their original order.
pub fn assemble(
    title: impl Into<String>,
    mut candidates: Vec<HeadingCandidate>,
    compact_levels: bool,
) -> Outline {
    candidates.sort_by_key(|c| c.page);

    if compact_levels {
        compact(&mut candidates);
    }

    Outline::new(
        title,
        candidates.into_iter().map(OutlineEntry::from).collect(),
    )
}

fn compact(candidates: &mut [HeadingCandidate]) {
    let present: BTreeSet<HeadingLevel> = candidates.iter().map(|c| c.level).collect();
    let remap: BTreeMap<HeadingLevel, HeadingLevel> = present
        .into_iter()
        .enumerate()
        .map(|(rank, level)| (level, HeadingLevel::from_rank(rank)))
        .collect();

    for candidate in candidates.iter_mut() {
        if let Some(level) = remap.get(&candidate.level) {
            candidate.level = *level;
        }
    }
}
