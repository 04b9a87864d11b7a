//! Fragment sources.
//!
//! A [`FragmentSource`] is one open handle on a document. Extraction workers
//! never share a handle: each one asks the [`SourceOpener`] for its own and
//! drops it when its page range is done.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::model::Fragment;

/// An open document that yields fragments page by page.
pub trait FragmentSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Extract the fragments of one page (1-indexed), in reading order.
    fn extract_page(&mut self, page: u32) -> Result<Vec<Fragment>>;
}

/// Opens independent handles on the same document.
///
/// Failing to open is fatal for the whole extraction.
pub trait SourceOpener: Sync {
    /// The handle type.
    type Source: FragmentSource;

    /// Open a new handle.
    fn open(&self) -> Result<Self::Source>;
}

/// A [`SourceOpener`] backed by a closure.
///
/// ```
/// use unoutline::extract::{FragmentDocument, OpenWith, SourceOpener};
/// use unoutline::model::Fragment;
///
/// let opener = OpenWith(|| FragmentDocument::from_fragments(vec![Fragment::new(1, 12.0, "A")]));
/// assert!(opener.open().is_ok());
/// ```
pub struct OpenWith<F>(pub F);

impl<F, S> SourceOpener for OpenWith<F>
where
    F: Fn() -> Result<S> + Sync,
    S: FragmentSource,
{
    type Source = S;

    fn open(&self) -> Result<S> {
        (self.0)()
    }
}

/// An in-memory document made of already extracted fragments.
///
/// Cloning is cheap; clones share the fragment storage. The document is its
/// own opener, handing every worker a clone.
#[derive(Debug, Clone, Default)]
pub struct FragmentDocument {
    pages: Arc<BTreeMap<u32, Vec<Fragment>>>,
    page_count: u32,
}

impl FragmentDocument {
    /// Build a document from fragments.
    ///
    /// The page count is the highest page referenced. Every fragment is
    /// validated against the extraction contract.
    pub fn from_fragments(fragments: Vec<Fragment>) -> Result<Self> {
        let mut pages: BTreeMap<u32, Vec<Fragment>> = BTreeMap::new();
        for fragment in fragments {
            fragment.validate()?;
            pages.entry(fragment.page).or_default().push(fragment);
        }
        let page_count = pages.keys().next_back().copied().unwrap_or(0);
        Ok(Self {
            pages: Arc::new(pages),
            page_count,
        })
    }

    /// Declare the total page count (pages without text still count).
    pub fn with_page_count(mut self, page_count: u32) -> Self {
        self.page_count = self.page_count.max(page_count);
        self
    }

    /// Load a document from a JSON array of `{page, size, text}` objects.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let fragments: Vec<Fragment> = serde_json::from_str(json)?;
        Self::from_fragments(fragments)
    }

    /// Load a document from a JSON reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let fragments: Vec<Fragment> = serde_json::from_reader(reader)?;
        Self::from_fragments(fragments)
    }

    /// Load a document from a JSON file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref()).map_err(|e| {
            Error::SourceOpen(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Total number of fragments.
    pub fn fragment_count(&self) -> usize {
        self.pages.values().map(Vec::len).sum()
    }
}

impl FragmentSource for FragmentDocument {
    fn page_count(&self) -> u32 {
        self.page_count
    }

    fn extract_page(&mut self, page: u32) -> Result<Vec<Fragment>> {
        if page == 0 || page > self.page_count {
            return Err(Error::PageOutOfRange(page, self.page_count));
        }
        Ok(self.pages.get(&page).cloned().unwrap_or_default())
    }
}

impl SourceOpener for FragmentDocument {
    type Source = FragmentDocument;

    fn open(&self) -> Result<FragmentDocument> {
        Ok(self.clone())
    }
}
