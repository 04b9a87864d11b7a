//! # unoutline
//!
//! Heading outline inference for extracted documents.
//!
//! This library turns the output of a document extractor into a title plus
//! an ordered list of leveled headings (`H1`, `H2`, ...) with page numbers.
//! Two inputs are supported:
//!
//! - **Font-sized fragments**: `{page, size, text}` runs; the largest sizes
//!   become headings and the largest run on page 1 becomes the title.
//! - **Markdown page chunks**: `#` markers and bold-only lines, plus
//!   table-of-contents hints attached to each page.
//!
//! ## Quick Start
//!
//! ```
//! use unoutline::{outline_from_fragments, render, Fragment, OutlineOptions};
//!
//! let fragments = vec![
//!     Fragment::new(1, 24.0, "Annual Report"),
//!     Fragment::new(1, 18.0, "Introduction"),
//!     Fragment::new(1, 11.0, "Body text."),
//!     Fragment::new(2, 14.0, "Background"),
//! ];
//!
//! let outline = outline_from_fragments(&fragments, &OutlineOptions::default());
//! assert_eq!(outline.title, "Annual Report");
//! println!("{}", render::to_text(&outline));
//! ```
//!
//! ## Features
//!
//! - **Deterministic**: the same input always yields the same outline
//! - **Text cleanup**: markdown emphasis, dot leaders and page numbers are
//!   stripped from heading text
//! - **Parallel extraction**: page ranges are collected with Rayon
//! - **Lenient by default**: unreadable pages are skipped and reported

pub mod cleanup;
pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod outline;
pub mod render;

// Re-export commonly used types
pub use detect::{detect_input_from_bytes, detect_input_from_path, InputKind};
pub use error::{Error, Result};
pub use extract::{
    ErrorMode, ExtractOptions, Extraction, FragmentCollector, FragmentDocument, FragmentSource,
    PageFailure, SourceOpener,
};
pub use model::{
    Fragment, HeadingCandidate, HeadingLevel, MarkdownPage, Outline, OutlineEntry, TocItem,
};
pub use outline::{outline_from_fragments, outline_from_pages, MarkerMap, OutlineOptions};
pub use render::JsonFormat;

use std::path::Path;

/// Collect fragments from a source and infer its outline.
///
/// # Example
///
/// ```
/// use unoutline::{outline_from_source, ExtractOptions, Fragment, FragmentDocument, OutlineOptions};
///
/// let doc = FragmentDocument::from_fragments(vec![
///     Fragment::new(1, 20.0, "Guide"),
///     Fragment::new(2, 16.0, "Setup"),
/// ])?;
/// let report = outline_from_source(&doc, &ExtractOptions::default(), &OutlineOptions::default())?;
/// assert_eq!(report.outline.title, "Guide");
/// assert!(!report.is_degraded());
/// # Ok::<(), unoutline::Error>(())
/// ```
pub fn outline_from_source<O: SourceOpener>(
    opener: &O,
    extract_options: &ExtractOptions,
    outline_options: &OutlineOptions,
) -> Result<OutlineReport> {
    let extraction = FragmentCollector::new(extract_options.clone()).collect(opener)?;
    let outline = outline_from_fragments(&extraction.fragments, outline_options);
    Ok(OutlineReport {
        outline,
        kind: InputKind::Fragments,
        page_count: extraction.page_count,
        failed_pages: extraction.failed_pages,
    })
}

/// Infer the outline of raw markdown, pages separated by form feeds.
///
/// # Example
///
/// ```
/// use unoutline::{outline_from_markdown, OutlineOptions};
///
/// let outline = outline_from_markdown("# Manual\n## Install\x0c### Linux", &OutlineOptions::default());
/// assert_eq!(outline.title, "Manual");
/// assert_eq!(outline.outline[1].page, 2);
/// ```
pub fn outline_from_markdown(markdown: &str, options: &OutlineOptions) -> Outline {
    outline_from_pages(&outline::split_pages(markdown), options)
}

/// Infer the outline of a file (fragments JSON, page chunks JSON or markdown).
///
/// # Example
///
/// ```no_run
/// use unoutline::{outline_file, OutlineOptions};
///
/// let outline = outline_file("report.json", &OutlineOptions::default()).unwrap();
/// println!("{}", outline.title);
/// ```
pub fn outline_file<P: AsRef<Path>>(path: P, options: &OutlineOptions) -> Result<Outline> {
    Unoutline::new()
        .with_outline_options(options.clone())
        .process(path)
        .map(|report| report.outline)
}

/// Convert a file to outline JSON.
///
/// # Example
///
/// ```no_run
/// use unoutline::{to_json, JsonFormat};
///
/// let json = to_json("report.json", JsonFormat::Pretty).unwrap();
/// std::fs::write("outline.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let outline = outline_file(path, &OutlineOptions::default())?;
    render::to_json(&outline, format)
}

/// Builder for inferring outlines from files and sources.
///
/// # Example
///
/// ```no_run
/// use unoutline::Unoutline;
///
/// let text = Unoutline::new()
///     .with_max_levels(4)
///     .skip_lowercase()
///     .strict()
///     .process("fragments.json")?
///     .to_text();
/// # Ok::<(), unoutline::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Unoutline {
    extract_options: ExtractOptions,
    outline_options: OutlineOptions,
}

impl Unoutline {
    /// Create a new Unoutline builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the outline options.
    pub fn with_outline_options(mut self, options: OutlineOptions) -> Self {
        self.outline_options = options;
        self
    }

    /// Set the extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract_options = options;
        self
    }

    /// Set the number of font-size heading levels.
    pub fn with_max_levels(mut self, levels: usize) -> Self {
        self.outline_options = self.outline_options.with_max_levels(levels);
        self
    }

    /// Drop lowercase-initial markdown headings.
    pub fn skip_lowercase(mut self) -> Self {
        self.outline_options = self.outline_options.skip_lowercase();
        self
    }

    /// Renumber the levels present to H1..Hk.
    pub fn compact_levels(mut self) -> Self {
        self.outline_options = self.outline_options.with_compact_levels(true);
        self
    }

    /// Fail on the first unreadable page.
    pub fn strict(mut self) -> Self {
        self.extract_options = self.extract_options.strict();
        self
    }

    /// Disable parallel extraction.
    pub fn sequential(mut self) -> Self {
        self.extract_options = self.extract_options.sequential();
        self
    }

    /// Set the number of extraction workers.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.extract_options = self.extract_options.with_workers(workers);
        self
    }

    /// Process a file, detecting its input kind.
    pub fn process<P: AsRef<Path>>(&self, path: P) -> Result<OutlineReport> {
        let data = std::fs::read(path.as_ref())?;
        log::debug!("Processing {}", path.as_ref().display());
        self.process_bytes(&data)
    }

    /// Process in-memory input, detecting its input kind.
    pub fn process_bytes(&self, data: &[u8]) -> Result<OutlineReport> {
        let kind = detect_input_from_bytes(data)?;
        log::debug!("Detected input: {}", kind);

        match kind {
            InputKind::Fragments => {
                let fragments: Vec<Fragment> = serde_json::from_slice(data)?;
                let doc = FragmentDocument::from_fragments(fragments)?;
                self.process_source(&doc)
            }
            InputKind::MarkdownPages => {
                let pages: Vec<MarkdownPage> = serde_json::from_slice(data)?;
                Ok(self.report_pages(&pages, kind))
            }
            InputKind::Markdown => {
                // Detection already checked UTF-8
                let text = String::from_utf8_lossy(data);
                let pages = outline::split_pages(text.trim_start_matches('\u{feff}'));
                Ok(self.report_pages(&pages, kind))
            }
        }
    }

    /// Collect fragments from a source and infer its outline.
    pub fn process_source<O: SourceOpener>(&self, opener: &O) -> Result<OutlineReport> {
        outline_from_source(opener, &self.extract_options, &self.outline_options)
    }

    /// Infer the outline of markdown page chunks.
    pub fn process_pages(&self, pages: &[MarkdownPage]) -> OutlineReport {
        self.report_pages(pages, InputKind::MarkdownPages)
    }

    fn report_pages(&self, pages: &[MarkdownPage], kind: InputKind) -> OutlineReport {
        OutlineReport {
            outline: outline_from_pages(pages, &self.outline_options),
            kind,
            page_count: pages.len() as u32,
            failed_pages: Vec::new(),
        }
    }
}

/// Result of outline inference.
#[derive(Debug, Clone)]
pub struct OutlineReport {
    /// The inferred outline
    pub outline: Outline,
    /// What the input was
    pub kind: InputKind,
    /// Pages in the input
    pub page_count: u32,
    /// Pages skipped during extraction
    pub failed_pages: Vec<PageFailure>,
}

impl OutlineReport {
    /// Whether any page was skipped, making the outline possibly incomplete.
    pub fn is_degraded(&self) -> bool {
        !self.failed_pages.is_empty()
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.outline, format)
    }

    /// Convert to an indented text listing.
    pub fn to_text(&self) -> String {
        render::to_text(&self.outline)
    }

    /// Get the outline.
    pub fn outline(&self) -> &Outline {
        &self.outline
    }
}
