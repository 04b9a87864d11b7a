//! Data model for outline inference.
//!
//! Fragments and markdown pages are what extraction hands over; heading
//! candidates are the intermediate, leveled form; an [`Outline`] is what
//! consumers receive. All types are plain values.

mod fragment;
mod outline;
mod toc;

pub use fragment::Fragment;
pub use outline::{HeadingCandidate, HeadingLevel, Outline, OutlineEntry, MAX_HEADING_LEVEL};
pub use toc::{MarkdownPage, TocItem};
