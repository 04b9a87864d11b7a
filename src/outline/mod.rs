//! Heading inference.
//!
//! Two pipelines produce leveled [`HeadingCandidate`](crate::model::HeadingCandidate)s
//! and share one assembly step:
//!
//! - [`fonts`]: font-size ranking over extracted text fragments
//! - [`markdown`]: heading markers and bold lines in markdown page chunks,
//!   plus table-of-contents hints merged by [`TocMerger`]

mod assemble;
pub mod fonts;
pub mod markdown;
mod options;
mod toc;

pub use assemble::assemble;
pub use fonts::{outline_from_fragments, SizeRanking};
pub use markdown::{outline_from_pages, split_pages, TitleLine};
pub use options::{MarkerMap, OutlineOptions, DEFAULT_MAX_LEVELS};
pub use toc::TocMerger;
