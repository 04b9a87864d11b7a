//! Fragment extraction fan-out.
//!
//! A document is read through a [`SourceOpener`], split into page ranges and
//! extracted by parallel workers. Page failures are either fatal or recorded,
//! depending on the [`ErrorMode`].

mod collector;
mod options;
mod source;

pub use collector::{page_ranges, Extraction, FragmentCollector, PageFailure};
pub use options::{ErrorMode, ExtractOptions};
pub use source::{FragmentDocument, FragmentSource, OpenWith, SourceOpener};
