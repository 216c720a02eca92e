//! Structured-Markdown front end.
//!
//! Every input file shares one outer shape: a license declaration, a `#`
//! name heading, and a sequence of `##` sections. [`SpecFile`] recovers
//! that shape; the section types in [`section`] parse the three body
//! shapes a section can take (free content, flat key/value list, two-level
//! nested list).

mod section;
mod spec_file;

pub use section::{ContentSection, NestedListSection, SingleListSection};
pub use spec_file::SpecFile;
