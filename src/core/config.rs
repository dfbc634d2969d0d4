//! Tool configuration (relmgr.toml) parsing and validation
//!
//! Every endpoint, default label, and filter list the pipelines use lives in
//! one immutable record that is loaded once and passed down. No environment
//! variables are consulted.
//!
//! Searched in order: relmgr.toml, .relmgr.toml, .config/relmgr.toml. When no
//! file is found the built-in defaults are used, so the tool works out of the
//! box on a release manager's workstation.

use crate::core::error::{ConfigError, ResultExt, ToolError, ToolResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for relmgr
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ToolsConfig {
  #[serde(default)]
  pub source: SourceConfig,
  #[serde(default)]
  pub manifest: ManifestConfig,
  #[serde(default)]
  pub changelog: ChangelogConfig,
  #[serde(default)]
  pub tracker: TrackerConfig,
}

/// Remote endpoints and fetch behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
  /// Build-service API base used to retrieve manifests
  #[serde(default = "default_api_url")]
  pub api_url: String,

  /// Build-comparison feed base used to retrieve changelogs and package lists
  #[serde(default = "default_feed_url")]
  pub feed_url: String,

  /// Timeout for a single fetch, in seconds
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,

  /// Directory where fetched artifacts and reports are written
  #[serde(default = "default_cache_dir")]
  pub cache_dir: PathBuf,
}

fn default_api_url() -> String {
  "https://api.suse.de".to_string()
}

fn default_feed_url() -> String {
  "http://xcdchk.suse.de".to_string()
}

fn default_timeout_secs() -> u64 {
  60
}

fn default_cache_dir() -> PathBuf {
  PathBuf::from(".")
}

impl Default for SourceConfig {
  fn default() -> Self {
    Self {
      api_url: default_api_url(),
      feed_url: default_feed_url(),
      timeout_secs: default_timeout_secs(),
      cache_dir: default_cache_dir(),
    }
  }
}

/// Manifest retrieval and diff-report scoping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestConfig {
  /// Template expanded with the product label to form the source project,
  /// e.g. "SUSE:SLE-{label}:GA"
  #[serde(default = "default_project_template")]
  pub project_template: String,

  /// Package that carries the group manifest
  #[serde(default = "default_manifest_package")]
  pub package: String,

  /// Manifest filename inside the package
  #[serde(default = "default_manifest_filename")]
  pub filename: String,

  /// If set, the diff report starts at this section and everything before it
  /// is dropped
  #[serde(default)]
  pub report_start_section: Option<String>,
}

fn default_project_template() -> String {
  "SUSE:SLE-{label}:GA".to_string()
}

fn default_manifest_package() -> String {
  "000package-groups".to_string()
}

fn default_manifest_filename() -> String {
  "groups.yml".to_string()
}

impl Default for ManifestConfig {
  fn default() -> Self {
    Self {
      project_template: default_project_template(),
      package: default_manifest_package(),
      filename: default_manifest_filename(),
      report_start_section: None,
    }
  }
}

impl ManifestConfig {
  /// Expand the project template with a product label
  pub fn project(&self, label: &str) -> String {
    self.project_template.replace("{label}", label)
  }
}

/// Changelog-extractor defaults and removed-package filtering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangelogConfig {
  /// Version label paired to the newer build
  #[serde(default = "default_version_label")]
  pub version_label: String,

  /// Version label paired to the older build
  #[serde(default = "default_version_label")]
  pub origin_label: String,

  /// Architecture tags a missing-RPM entry must carry to be reported
  #[serde(default = "default_arch_allow")]
  pub removed_arch_allow: Vec<String>,

  /// Name patterns (regexes) that exclude a removed package from the report
  #[serde(default = "default_name_deny")]
  pub removed_name_deny: Vec<String>,
}

fn default_version_label() -> String {
  "SLE-15-SP5".to_string()
}

fn default_arch_allow() -> Vec<String> {
  vec!["x86_64".to_string(), "noarch".to_string()]
}

fn default_name_deny() -> Vec<String> {
  vec!["^kernel".to_string(), "debugsource".to_string(), "debuginfo".to_string()]
}

impl Default for ChangelogConfig {
  fn default() -> Self {
    Self {
      version_label: default_version_label(),
      origin_label: default_version_label(),
      removed_arch_allow: default_arch_allow(),
      removed_name_deny: default_name_deny(),
    }
  }
}

impl ChangelogConfig {
  /// Compile the deny list into regexes
  pub fn deny_regexes(&self) -> ToolResult<Vec<Regex>> {
    self
      .removed_name_deny
      .iter()
      .map(|p| {
        Regex::new(p).map_err(|e| {
          ToolError::Config(ConfigError::InvalidPattern {
            pattern: p.clone(),
            reason: e.to_string(),
          })
        })
      })
      .collect()
  }
}

/// Issue-tracker query boilerplate inputs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
  /// Bug-tracker list endpoint the canned bug query is built on
  #[serde(default = "default_bug_list_url")]
  pub bug_list_url: String,

  /// Product names the bug query is scoped to
  #[serde(default = "default_products")]
  pub products: Vec<String>,
}

fn default_bug_list_url() -> String {
  "https://bugzilla.suse.com/buglist.cgi".to_string()
}

fn default_products() -> Vec<String> {
  vec![
    "SUSE Linux Enterprise Server 15 SP5".to_string(),
    "SUSE Linux Enterprise Desktop 15 SP5".to_string(),
  ]
}

impl Default for TrackerConfig {
  fn default() -> Self {
    Self {
      bug_list_url: default_bug_list_url(),
      products: default_products(),
    }
  }
}

impl ToolsConfig {
  /// Find config file in search order: relmgr.toml, .relmgr.toml, .config/relmgr.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("relmgr.toml"),
      path.join(".relmgr.toml"),
      path.join(".config").join("relmgr.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from the search locations, falling back to built-in defaults
  pub fn load(path: &Path) -> ToolResult<Self> {
    match Self::find_config_path(path) {
      Some(config_path) => Self::load_from(&config_path),
      None => {
        log::debug!("no relmgr.toml found under {}, using built-in configuration", path.display());
        Ok(Self::default())
      }
    }
  }

  /// Load config from an explicit path
  pub fn load_from(config_path: &Path) -> ToolResult<Self> {
    if !config_path.exists() {
      return Err(ToolError::Config(ConfigError::NotFound {
        path: config_path.to_path_buf(),
      }));
    }

    let content = fs::read_to_string(config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: ToolsConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    config
      .validate()
      .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;

    log::debug!("configuration loaded from {}", config_path.display());
    Ok(config)
  }

  /// Validate the configuration
  pub fn validate(&self) -> ToolResult<()> {
    // Deny patterns must compile; report the first broken one
    self.changelog.deny_regexes()?;
    Ok(())
  }
}
