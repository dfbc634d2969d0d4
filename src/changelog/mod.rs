//! Changelog extractor pipeline
//!
//! Derives the build-report sections from a changelog and the four package
//! list artifacts of a build pair:
//!
//! - **extract**: marker scan and the per-section package parsers
//! - **refs**: typed bug/epic reference extraction
//!
//! Every section is a pure function of the fetched artifacts; lines that
//! match no recognized pattern are silently excluded.

pub mod extract;
pub mod refs;

use crate::core::config::ChangelogConfig;
use crate::core::error::ToolResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The five text artifacts fetched for a build pair
#[derive(Debug, Clone, Default)]
pub struct RawArtifacts {
  pub changelog: String,
  pub updated: String,
  pub new: String,
  pub missing: String,
  pub downgraded: String,
}

/// An old/new version pair for one package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionChange {
  pub old_version: String,
  pub new_version: String,
}

/// The derived report for one build pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildReport {
  /// Updated packages with their version transition
  pub updated: BTreeMap<String, VersionChange>,
  /// Added packages with their version-release
  pub added: BTreeMap<String, String>,
  /// Removed packages, architecture-filtered and noise-free
  pub removed: Vec<String>,
  /// Downgraded packages with their version transition
  pub downgraded: BTreeMap<String, VersionChange>,
  /// Unique bug ids referenced in the changelog, sorted ascending
  pub bugs: Vec<String>,
  /// Unique epic keys referenced in the changelog, sorted
  pub epics: Vec<String>,
}

impl BuildReport {
  /// Derive all report sections from the raw artifacts
  pub fn from_artifacts(artifacts: &RawArtifacts, config: &ChangelogConfig) -> ToolResult<Self> {
    let entries = extract::entry_names(&artifacts.changelog);
    let references = refs::extract_references(&artifacts.changelog);
    let deny = config.deny_regexes()?;

    Ok(BuildReport {
      updated: extract::updated_packages(&entries, &artifacts.updated),
      added: extract::added_packages(&entries, &artifacts.new),
      removed: extract::removed_packages(&artifacts.missing, &config.removed_arch_allow, &deny),
      downgraded: extract::downgraded_packages(&artifacts.downgraded),
      bugs: refs::bug_ids(&references),
      epics: refs::epic_keys(&references),
    })
  }
}
