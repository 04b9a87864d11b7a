//! Parallel fragment collection.
//!
//! Pages are split into contiguous ranges, one per worker. Each worker opens
//! its own source handle, extracts its range in page order, and the results
//! are concatenated in range order, so the output matches a sequential run.

use std::ops::RangeInclusive;

use rayon::prelude::*;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::Fragment;

use super::options::{ErrorMode, ExtractOptions};
use super::source::{FragmentSource, SourceOpener};

/// A page that could not be extracted in lenient mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageFailure {
    /// Page number (1-indexed)
    pub page: u32,
    /// Failure description
    pub reason: String,
}

/// Collected fragments plus what went wrong on the way.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Fragments of every extracted page, in page order
    pub fragments: Vec<Fragment>,
    /// Pages skipped because extraction failed
    pub failed_pages: Vec<PageFailure>,
    /// Pages in the document
    pub page_count: u32,
}

impl Extraction {
    /// Whether any page was skipped.
    pub fn is_degraded(&self) -> bool {
        !self.failed_pages.is_empty()
    }

    /// Numbers of the skipped pages.
    pub fn failed_page_numbers(&self) -> Vec<u32> {
        self.failed_pages.iter().map(|f| f.page).collect()
    }
}

/// Split `1..=page_count` into at most `workers` contiguous ranges of
/// `ceil(page_count / workers)` pages.
pub fn page_ranges(page_count: u32, workers: usize) -> Vec<RangeInclusive<u32>> {
    if page_count == 0 {
        return Vec::new();
    }
    let workers = workers.clamp(1, page_count as usize) as u32;
    let chunk = page_count.div_ceil(workers);

    (0..workers)
        .map(|i| i * chunk + 1)
        .take_while(|start| *start <= page_count)
        .map(|start| start..=(start + chunk - 1).min(page_count))
        .collect()
}

#[derive(Default)]
struct RangeOutput {
    fragments: Vec<Fragment>,
    failures: Vec<PageFailure>,
}

/// Collects fragments from a document source.
///
/// # Example
///
/// ```
/// use unoutline::extract::{ExtractOptions, FragmentCollector, FragmentDocument};
/// use unoutline::model::Fragment;
///
/// let doc = FragmentDocument::from_fragments(vec![
///     Fragment::new(1, 18.0, "Intro"),
///     Fragment::new(2, 11.0, "Body"),
/// ])
/// .unwrap();
///
/// let extraction = FragmentCollector::new(ExtractOptions::default().with_workers(2))
///     .collect(&doc)
///     .unwrap();
/// assert_eq!(extraction.fragments.len(), 2);
/// assert!(!extraction.is_degraded());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FragmentCollector {
    options: ExtractOptions,
}

impl FragmentCollector {
    /// Create a collector with the given options.
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Collect the fragments of every page.
    ///
    /// Opening the source is fatal on failure, including a worker's own
    /// open. A failing page aborts in strict mode and is recorded in
    /// lenient mode.
    pub fn collect<O: SourceOpener>(&self, opener: &O) -> Result<Extraction> {
        let page_count = opener.open()?.page_count();
        let workers = self.worker_count();
        let ranges = page_ranges(page_count, workers);

        log::debug!(
            "Collecting {} pages in {} ranges ({} workers)",
            page_count,
            ranges.len(),
            workers
        );

        let outputs: Vec<Result<RangeOutput>> = if self.options.parallel && ranges.len() > 1 {
            let run = || -> Vec<Result<RangeOutput>> {
                ranges
                    .par_iter()
                    .map(|range| self.extract_range(opener, range.clone()))
                    .collect()
            };
            match self.options.workers {
                Some(threads) => rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| Error::Other(format!("Failed to start workers: {}", e)))?
                    .install(run),
                None => run(),
            }
        } else {
            ranges
                .iter()
                .map(|range| self.extract_range(opener, range.clone()))
                .collect()
        };

        let mut extraction = Extraction {
            page_count,
            ..Default::default()
        };
        for output in outputs {
            let output = output?;
            extraction.fragments.extend(output.fragments);
            extraction.failed_pages.extend(output.failures);
        }

        if extraction.is_degraded() {
            log::warn!(
                "{} of {} pages could not be extracted",
                extraction.failed_pages.len(),
                page_count
            );
        }
        log::info!(
            "Collected {} fragments from {} pages",
            extraction.fragments.len(),
            page_count
        );
        Ok(extraction)
    }

    fn worker_count(&self) -> usize {
        if !self.options.parallel {
            return 1;
        }
        self.options
            .workers
            .unwrap_or_else(rayon::current_num_threads)
            .max(1)
    }

    fn extract_range<O: SourceOpener>(
        &self,
        opener: &O,
        range: RangeInclusive<u32>,
    ) -> Result<RangeOutput> {
        let mut source = opener.open()?;
        let mut output = RangeOutput::default();

        for page in range {
            match source.extract_page(page) {
                Ok(fragments) => output.fragments.extend(fragments),
                Err(e) => {
                    if self.options.error_mode == ErrorMode::Strict {
                        return Err(match e {
                            Error::PageExtract { .. } => e,
                            other => Error::PageExtract {
                                page,
                                reason: other.to_string(),
                            },
                        });
                    }
                    log::warn!("Failed to extract page {}: {}", page, e);
                    output.failures.push(PageFailure {
                        page,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(output)
    }
}
