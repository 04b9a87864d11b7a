//! Integration tests for parallel fragment collection.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use unoutline::error::{Error, Result};
use unoutline::extract::{
    page_ranges, ExtractOptions, FragmentCollector, FragmentDocument, FragmentSource, OpenWith,
    SourceOpener,
};
use unoutline::{outline_from_source, Fragment, OutlineOptions};

/// Source that fails on a fixed set of pages.
struct FlakySource {
    pages: u32,
    broken: BTreeSet<u32>,
}

impl FragmentSource for FlakySource {
    fn page_count(&self) -> u32 {
        self.pages
    }

    fn extract_page(&mut self, page: u32) -> Result<Vec<Fragment>> {
        if self.broken.contains(&page) {
            return Err(Error::PageExtract {
                page,
                reason: "corrupt content stream".to_string(),
            });
        }
        Ok(vec![
            Fragment::new(page, 18.0, format!("Heading {}", page_letter(page))),
            Fragment::new(page, 10.0, format!("Body {}", page)),
        ])
    }
}

fn page_letter(page: u32) -> char {
    char::from(b'A' + (page - 1) as u8)
}

/// Opener counting how many handles were opened.
struct FlakyOpener {
    pages: u32,
    broken: BTreeSet<u32>,
    opened: AtomicUsize,
}

impl FlakyOpener {
    fn new(pages: u32, broken: &[u32]) -> Self {
        Self {
            pages,
            broken: broken.iter().copied().collect(),
            opened: AtomicUsize::new(0),
        }
    }
}

impl SourceOpener for FlakyOpener {
    type Source = FlakySource;

    fn open(&self) -> Result<FlakySource> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(FlakySource {
            pages: self.pages,
            broken: self.broken.clone(),
        })
    }
}

fn large_document(pages: u32) -> FragmentDocument {
    let fragments = (1..=pages)
        .flat_map(|page| {
            vec![
                Fragment::new(page, 20.0, format!("Chapter {}", page)),
                Fragment::new(page, 14.0, format!("Section {}.1", page)),
                Fragment::new(page, 10.0, "Body paragraph"),
            ]
        })
        .collect();
    FragmentDocument::from_fragments(fragments).unwrap()
}

#[test]
fn test_parallel_matches_sequential() {
    let doc = large_document(37);

    let sequential = FragmentCollector::new(ExtractOptions::new().sequential())
        .collect(&doc)
        .unwrap();
    for workers in [1, 2, 3, 8, 64] {
        let parallel = FragmentCollector::new(ExtractOptions::new().with_workers(workers))
            .collect(&doc)
            .unwrap();
        assert_eq!(parallel.fragments, sequential.fragments);
        assert_eq!(parallel.page_count, 37);
    }
}

#[test]
fn test_fragments_in_page_order() {
    let extraction = FragmentCollector::new(ExtractOptions::new().with_workers(4))
        .collect(&large_document(10))
        .unwrap();

    let pages: Vec<u32> = extraction.fragments.iter().map(|f| f.page).collect();
    let mut sorted = pages.clone();
    sorted.sort();
    assert_eq!(pages, sorted);
    assert_eq!(extraction.fragments.len(), 30);
}

#[test]
fn test_one_handle_per_range() {
    let opener = FlakyOpener::new(10, &[]);
    FragmentCollector::new(ExtractOptions::new().with_workers(3))
        .collect(&opener)
        .unwrap();

    // One probe plus one per page range
    assert_eq!(
        opener.opened.load(Ordering::SeqCst),
        1 + page_ranges(10, 3).len()
    );
}

#[test]
fn test_lenient_records_failed_pages() {
    let opener = FlakyOpener::new(6, &[2, 5]);
    let extraction = FragmentCollector::new(ExtractOptions::new().with_workers(2))
        .collect(&opener)
        .unwrap();

    assert!(extraction.is_degraded());
    assert_eq!(extraction.failed_page_numbers(), vec![2, 5]);
    assert_eq!(extraction.fragments.len(), 8);
    assert!(extraction.failed_pages[0].reason.contains("corrupt"));
}

#[test]
fn test_strict_aborts_on_page_failure() {
    let opener = FlakyOpener::new(6, &[4]);
    let result = FragmentCollector::new(ExtractOptions::new().strict().with_workers(3))
        .collect(&opener);

    assert!(matches!(result, Err(Error::PageExtract { page: 4, .. })));
}

#[test]
fn test_declared_empty_page_is_not_a_failure() {
    let doc = large_document(2);
    let opener = OpenWith(|| Ok(doc.clone().with_page_count(3)));

    // Page 3 is declared but empty, which is not an error
    let extraction = FragmentCollector::new(ExtractOptions::new().strict())
        .collect(&opener)
        .unwrap();
    assert_eq!(extraction.page_count, 3);
    assert_eq!(extraction.fragments.len(), 6);
}

#[test]
fn test_open_failure_is_fatal() {
    let opener = OpenWith(|| -> Result<FragmentDocument> {
        Err(Error::SourceOpen("locked".to_string()))
    });
    let result = FragmentCollector::default().collect(&opener);
    assert!(matches!(result, Err(Error::SourceOpen(_))));
}

#[test]
fn test_worker_open_failure_is_fatal() {
    let calls = AtomicUsize::new(0);
    let doc = large_document(4);
    let opener = OpenWith(|| {
        // The probe succeeds, every worker handle fails
        if calls.fetch_add(1, Ordering::SeqCst) == 0 {
            Ok(doc.clone())
        } else {
            Err(Error::SourceOpen("worker handle".to_string()))
        }
    });

    let result = FragmentCollector::new(ExtractOptions::new().lenient().with_workers(2))
        .collect(&opener);
    assert!(matches!(result, Err(Error::SourceOpen(_))));
}

#[test]
fn test_empty_document() {
    let doc = FragmentDocument::default();
    let extraction = FragmentCollector::default().collect(&doc).unwrap();

    assert_eq!(extraction.page_count, 0);
    assert!(extraction.fragments.is_empty());
    assert!(!extraction.is_degraded());
}

#[test]
fn test_degraded_outline_from_source() {
    let opener = FlakyOpener::new(4, &[1]);
    let report = outline_from_source(
        &opener,
        &ExtractOptions::new().with_workers(2),
        &OutlineOptions::new().with_max_levels(1),
    )
    .unwrap();

    assert!(report.is_degraded());
    // Page 1 was lost, so no title can be resolved
    assert_eq!(report.outline.title, "");
    let texts: Vec<&str> = report.outline.outline.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["Heading B", "Heading C", "Heading D"]);
}
