//! Structural-markdown pipeline.
//!
//! Each page of a markdown rendering is classified line by line: `#`
//! markers give a level through the [`MarkerMap`](super::MarkerMap), a line
//! that is one bold run is a low-level heading, separator lines are
//! skipped. The page's table-of-contents hints are merged afterwards.
//! Pages are independent of each other; only the title scan looks across
//! pages.

use std::sync::LazyLock;

use regex::Regex;

use crate::cleanup::{emphasis_run, normalize, normalize_punctuation};
use crate::model::{HeadingCandidate, HeadingLevel, MarkdownPage, Outline};

use super::assemble::assemble;
use super::options::OutlineOptions;
use super::toc::TocMerger;

static SEPARATOR_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^[.\-*,="']{2,}$"#).expect("valid regex"));

/// Depth of the markdown title marker (`# `).
const TITLE_DEPTH: usize = 1;

/// Check if a line is only a run of separator characters (`----`, `....`).
pub fn is_separator_line(line: &str) -> bool {
    SEPARATOR_LINE.is_match(line.trim())
}

/// Split a leading `#` marker from a line.
///
/// Returns the marker depth and the remainder. The marker must be followed
/// by a space.
pub fn heading_marker(line: &str) -> Option<(usize, &str)> {
    let depth = line.bytes().take_while(|b| *b == b'#').count();
    if depth == 0 {
        return None;
    }
    line[depth..].strip_prefix(' ').map(|rest| (depth, rest))
}

fn starts_lowercase(text: &str) -> bool {
    text.chars().next().is_some_and(|c| c.is_lowercase())
}

/// Classify a single physical line.
///
/// Returns the level and normalized text when the line is a heading.
pub fn classify_line(line: &str, options: &OutlineOptions) -> Option<(HeadingLevel, String)> {
    let stripped = normalize_punctuation(line.trim());
    if stripped.is_empty() || is_separator_line(&stripped) {
        return None;
    }

    let (level, text) = match heading_marker(&stripped) {
        Some((depth, rest)) => (options.marker_map.level_for(depth)?, normalize(rest)),
        None => {
            let inner = emphasis_run(&stripped)?;
            (options.marker_map.emphasis_level()?, normalize(inner))
        }
    };

    if text.is_empty() || (options.skip_lowercase && starts_lowercase(&text)) {
        return None;
    }
    Some((level, text))
}

/// Classify every line of one page.
///
/// `skip_line` is the index of a line already consumed as the document
/// title.
pub fn classify_page(
    text: &str,
    page: u32,
    options: &OutlineOptions,
    skip_line: Option<usize>,
) -> Vec<HeadingCandidate> {
    text.lines()
        .enumerate()
        .filter(|(index, _)| Some(*index) != skip_line)
        .filter_map(|(_, line)| classify_line(line, options))
        .map(|(level, text)| HeadingCandidate::new(page, level, text))
        .collect()
}

/// Page break character between pages of a raw markdown document.
pub const PAGE_BREAK: char = '\x0c';

/// Split a raw markdown document into pages on form feeds.
///
/// Pages carry no TOC hints.
pub fn split_pages(markdown: &str) -> Vec<MarkdownPage> {
    markdown.split(PAGE_BREAK).map(MarkdownPage::new).collect()
}

/// Location and text of the markdown title line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleLine {
    /// Page index (0-based)
    pub page_index: usize,
    /// Line index within the page (0-based)
    pub line_index: usize,
    /// Normalized title text
    pub text: String,
}

/// Find the first `# ` line with usable text, scanning pages in order.
pub fn find_title(pages: &[MarkdownPage], options: &OutlineOptions) -> Option<TitleLine> {
    for (page_index, page) in pages.iter().enumerate() {
        for (line_index, line) in page.text.lines().enumerate() {
            let stripped = normalize_punctuation(line.trim());
            let Some((TITLE_DEPTH, rest)) = heading_marker(&stripped) else {
                continue;
            };
            let text = normalize(rest);
            if text.is_empty() || (options.skip_lowercase && starts_lowercase(&text)) {
                continue;
            }
            return Some(TitleLine {
                page_index,
                line_index,
                text,
            });
        }
    }
    None
}

/// Infer an outline from markdown page chunks.
///
/// The title line is not repeated in the outline, and its text counts as
/// present on its page when TOC hints are merged.
///
/// # Example
///
/// ```
/// use unoutline::model::MarkdownPage;
/// use unoutline::outline::{outline_from_pages, OutlineOptions};
///
/// let pages = vec![MarkdownPage::new("# My Report\n## Overview\n### Background\n")];
/// let outline = outline_from_pages(&pages, &OutlineOptions::default());
/// assert_eq!(outline.title, "My Report");
/// assert_eq!(outline.len(), 2);
/// ```
pub fn outline_from_pages(pages: &[MarkdownPage], options: &OutlineOptions) -> Outline {
    let title = find_title(pages, options);
    let merger = TocMerger::new(options.max_level());

    let mut candidates = Vec::new();
    for (index, page) in pages.iter().enumerate() {
        let number = index as u32 + 1;
        let title_here = title.as_ref().filter(|t| t.page_index == index);

        let body = classify_page(
            &page.text,
            number,
            options,
            title_here.map(|t| t.line_index),
        );
        let body_count = body.len();

        let present: Vec<&str> = title_here.map(|t| t.text.as_str()).into_iter().collect();
        let merged = merger.merge(number, body, &page.toc_items(), &present);

        log::debug!(
            "Page {}: {} headings, {} from TOC",
            number,
            body_count,
            merged.len() - body_count
        );
        candidates.extend(merged);
    }

    let title = title
        .map(|t| t.text)
        .unwrap_or_else(|| options.untitled.clone());
    assemble(title, candidates, options.compact_levels)
}
