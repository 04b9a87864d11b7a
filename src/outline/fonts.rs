//! Font-metrics pipeline.
//!
//! Headings are the fragments set in the largest font sizes of the
//! document. The distinct sizes are ranked largest first and the top
//! `max_levels` of them become H1, H2, ... Everything smaller is body text.
//! This is a hard cutoff on the number of distinct sizes, not a threshold
//! on the sizes themselves, so a document using only two sizes has no body
//! text at all.

use std::collections::BTreeSet;

use crate::cleanup::normalize;
use crate::model::{Fragment, HeadingCandidate, HeadingLevel, Outline};

use super::assemble::assemble;
use super::options::OutlineOptions;

/// Ranking of the distinct font sizes of a document.
#[derive(Debug, Clone, Default)]
pub struct SizeRanking {
    /// Quantized heading sizes, largest first
    keys: Vec<i64>,
    /// Quantization factor (10^precision)
    scale: f64,
}

impl SizeRanking {
    /// Rank the distinct sizes of the given fragments.
    ///
    /// Sizes are quantized to `size_precision` decimal places first, so
    /// 11.999 and 12.0 land in the same tier at the default precision.
    pub fn from_fragments(fragments: &[Fragment], options: &OutlineOptions) -> Self {
        let scale = 10f64.powi(options.size_precision as i32);
        let distinct: BTreeSet<i64> = fragments
            .iter()
            .map(|f| quantize(f.size, scale))
            .collect();

        let keys: Vec<i64> = distinct.into_iter().rev().take(options.max_levels).collect();
        Self { keys, scale }
    }

    /// Heading level for a font size, or `None` for body text.
    pub fn level_for(&self, size: f32) -> Option<HeadingLevel> {
        let key = quantize(size, self.scale);
        self.keys
            .iter()
            .position(|k| *k == key)
            .map(HeadingLevel::from_rank)
    }

    /// Heading sizes, largest first (H1 size at index 0).
    pub fn heading_sizes(&self) -> Vec<f32> {
        self.keys.iter().map(|k| self.unquantize(*k)).collect()
    }

    /// Number of heading tiers found.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if no heading tier was found.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn quantized(&self, size: f32) -> f32 {
        self.unquantize(quantize(size, self.scale))
    }

    fn unquantize(&self, key: i64) -> f32 {
        (key as f64 / self.scale) as f32
    }
}

fn quantize(size: f32, scale: f64) -> i64 {
    (size as f64 * scale).round() as i64
}

/// Assign heading levels to fragments.
///
/// Fragment text is normalized first; fragments that normalize to nothing
/// take no part in the ranking, so every selected size tier has at least
/// one candidate. Candidates keep the input order and carry their
/// quantized size.
pub fn level_fragments(fragments: &[Fragment], options: &OutlineOptions) -> Vec<HeadingCandidate> {
    let cleaned: Vec<Fragment> = fragments
        .iter()
        .filter_map(|f| {
            if let Err(e) = f.validate() {
                log::debug!("Skipping fragment: {}", e);
                return None;
            }
            let text = normalize(&f.text);
            (!text.is_empty()).then(|| Fragment::new(f.page, f.size, text))
        })
        .collect();

    let ranking = SizeRanking::from_fragments(&cleaned, options);
    log::debug!(
        "Heading sizes (largest first): {:?}",
        ranking.heading_sizes()
    );

    cleaned
        .into_iter()
        .filter_map(|f| {
            let level = ranking.level_for(f.size)?;
            Some(HeadingCandidate::sized(
                f.page,
                level,
                f.text,
                ranking.quantized(f.size),
            ))
        })
        .collect()
}

/// Pick the title: the largest page-1 candidate.
///
/// On equal sizes the candidate that came first wins. Returns `None` when
/// page 1 has no candidate.
pub fn resolve_title(candidates: &[HeadingCandidate]) -> Option<&HeadingCandidate> {
    candidates
        .iter()
        .filter(|c| c.page == 1)
        .fold(None, |best: Option<&HeadingCandidate>, c| match best {
            Some(b) if size_of(c) <= size_of(b) => Some(b),
            _ => Some(c),
        })
}

/// Order candidates by page, then level, then size (largest first).
///
/// The sort is stable, so equal keys keep their extraction order.
pub fn sort_candidates(candidates: &mut [HeadingCandidate]) {
    candidates.sort_by(|a, b| {
        a.page
            .cmp(&b.page)
            .then(a.level.rank().cmp(&b.level.rank()))
            .then_with(|| size_of(b).total_cmp(&size_of(a)))
    });
}

fn size_of(candidate: &HeadingCandidate) -> f32 {
    candidate.size.unwrap_or(0.0)
}

/// Infer an outline from sized text fragments.
///
/// # Example
///
/// ```
/// use unoutline::model::Fragment;
/// use unoutline::outline::{outline_from_fragments, OutlineOptions};
///
/// let fragments = vec![
///     Fragment::new(1, 24.0, "Report Title"),
///     Fragment::new(1, 12.0, "Body text"),
/// ];
/// let options = OutlineOptions::new().with_max_levels(1);
/// let outline = outline_from_fragments(&fragments, &options);
/// assert_eq!(outline.title, "Report Title");
/// assert_eq!(outline.len(), 1);
/// ```
pub fn outline_from_fragments(fragments: &[Fragment], options: &OutlineOptions) -> Outline {
    let mut candidates = level_fragments(fragments, options);

    let title = resolve_title(&candidates)
        .map(|c| c.text.clone())
        .unwrap_or_else(|| options.untitled.clone());

    sort_candidates(&mut candidates);
    log::debug!(
        "Font pipeline: {} fragments, {} headings",
        fragments.len(),
        candidates.len()
    );

    assemble(title, candidates, options.compact_levels)
}
