//! Manifest differ pipeline
//!
//! Compares two revisions of a group manifest and reports package-level
//! additions and removals grouped by module name:
//!
//! - **normalize**: strip trailing comments and blank lines
//! - **model**: parse normalized text into ordered sections
//! - **diff**: section-aligned entry diff and `+`/`-` report rendering

pub mod diff;
pub mod model;
pub mod normalize;

pub use diff::diff_report;
pub use model::{Manifest, Section};
pub use normalize::normalize;
