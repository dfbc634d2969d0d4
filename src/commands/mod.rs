//! CLI commands for relmgr
//!
//! One module per user-facing tool:
//!
//! - **diff_manifests**: compare the group manifests of two product revisions
//! - **build_report**: derive the package/reference report for a build pair
//!
//! Commands take the loaded `ToolsConfig` and already-parsed arguments; all
//! remote access goes through `core::fetch`.

pub mod build_report;
pub mod diff_manifests;

pub use build_report::run_build_report;
pub use diff_manifests::run_diff_manifests;
