//! Artifact retrieval with a local idempotency cache
//!
//! Every remote artifact is written to a deterministically named file in the
//! cache directory. A file that already exists is reused instead of
//! re-fetched, so repeat runs against the same labels/builds are offline.
//! A fetch failure is fatal for the whole run; there are no retries and no
//! partial reports.
//!
//! Sources whose base is a local filesystem path are copied instead of
//! fetched, which is what the integration tests drive.

use crate::core::config::{SourceConfig, ToolsConfig};
use crate::core::error::{FetchError, ResultExt, ToolError, ToolResult};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The two build identifiers whose artifacts are compared
#[derive(Debug, Clone)]
pub struct BuildPair {
  /// The older build
  pub old: String,
  /// The newer build
  pub new: String,
}

impl BuildPair {
  /// Shared artifact-name stem, e.g. "SLE-15-SP5-Full-Test-Build36.1-Build37.2"
  pub fn common_part(&self, origin_label: &str) -> String {
    format!("{}-Full-Test-Build{}-Build{}", origin_label, self.old, self.new)
  }
}

/// A single artifact to retrieve: where from, and what to call it locally
#[derive(Debug, Clone)]
pub struct ArtifactRequest {
  pub url: String,
  pub cache_name: String,
}

/// Build the request for a group manifest at (label, revision)
pub fn manifest_request(config: &ToolsConfig, label: &str, revision: Option<&str>) -> ArtifactRequest {
  let manifest = &config.manifest;
  let project = manifest.project(label);
  let mut url = format!(
    "{}/source/{}/{}/{}",
    config.source.api_url.trim_end_matches('/'),
    project,
    manifest.package,
    manifest.filename
  );

  let cache_name = match revision {
    Some(rev) => {
      // Revision pinning only makes sense against the remote API
      if !is_local_path(&config.source.api_url) {
        url.push_str(&format!("?rev={}", rev));
      }
      format!("{}_r{}_{}", sanitize_label(label), rev, manifest.filename)
    }
    None => format!("{}_{}", sanitize_label(label), manifest.filename),
  };

  ArtifactRequest { url, cache_name }
}

/// Build the five feed requests for a build pair, in report order:
/// changelog, updated, new, missing, downgraded
pub fn feed_requests(config: &ToolsConfig, pair: &BuildPair) -> [ArtifactRequest; 5] {
  let common = pair.common_part(&config.changelog.origin_label);
  let base = format!(
    "{}/raw/{}-Full-Test/{}/all",
    config.source.feed_url.trim_end_matches('/'),
    config.changelog.version_label,
    pair.new
  );

  let names = [
    format!("ChangeLog-{}", common),
    format!("{}-updated-RPMs", common),
    format!("{}-new-RPMs", common),
    format!("{}-missing-RPMs", common),
    format!("{}-downgraded-RPMs", common),
  ];

  names.map(|name| ArtifactRequest {
    url: format!("{}/{}", base, name),
    cache_name: name,
  })
}

/// Labels can carry project separators; keep cache names flat
pub fn sanitize_label(label: &str) -> String {
  label.replace(['/', ':'], "-")
}

/// Check if a source base is a local filesystem path (not a remote URL)
///
/// Returns true for absolute Unix paths and ./ or ../ relative paths;
/// false for anything with a URL scheme or an SSH-style user@host.
pub fn is_local_path(path: &str) -> bool {
  if path.starts_with("./") || path.starts_with("../") {
    return true;
  }

  if path.starts_with('/') {
    return !path.contains("://") && !path.contains('@');
  }

  false
}

/// Blocking artifact fetcher with the cache-or-fetch policy
pub struct Fetcher {
  client: reqwest::blocking::Client,
  cache_dir: PathBuf,
}

impl Fetcher {
  /// Create a fetcher from the source configuration
  pub fn new(source: &SourceConfig) -> ToolResult<Self> {
    let client = reqwest::blocking::Client::builder()
      .timeout(Duration::from_secs(source.timeout_secs))
      .user_agent(concat!("relmgr/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| ToolError::message(format!("Failed to create HTTP client: {}", e)))?;

    Ok(Self {
      client,
      cache_dir: source.cache_dir.clone(),
    })
  }

  /// Retrieve one artifact, honoring the local cache
  ///
  /// Returns the path of the local file holding the artifact.
  pub fn fetch(&self, request: &ArtifactRequest) -> ToolResult<PathBuf> {
    let target = self.cache_dir.join(&request.cache_name);

    if target.exists() {
      log::debug!("reusing cached artifact {}", target.display());
      return Ok(target);
    }

    if let Some(parent) = target.parent()
      && !parent.as_os_str().is_empty()
    {
      fs::create_dir_all(parent).with_context(|| format!("Failed to create cache directory {}", parent.display()))?;
    }

    if is_local_path(&request.url) {
      self.copy_local(Path::new(&request.url), &target)?;
    } else {
      self.download(&request.url, &target)?;
    }

    Ok(target)
  }

  /// Retrieve one artifact and read it as UTF-8 text
  pub fn fetch_string(&self, request: &ArtifactRequest) -> ToolResult<String> {
    let path = self.fetch(request)?;
    fs::read_to_string(&path).with_context(|| format!("Failed to read artifact {}", path.display()))
  }

  fn copy_local(&self, source: &Path, target: &Path) -> ToolResult<()> {
    if !source.exists() {
      return Err(ToolError::Fetch(FetchError::SourceMissing {
        path: source.to_path_buf(),
      }));
    }

    fs::copy(source, target).with_context(|| format!("Failed to copy {} into the cache", source.display()))?;
    log::debug!("copied local artifact {} -> {}", source.display(), target.display());
    Ok(())
  }

  fn download(&self, url: &str, target: &Path) -> ToolResult<()> {
    log::debug!("fetching {}", url);
    let response = self.client.get(url).send()?;

    let status = response.status();
    if !status.is_success() {
      return Err(ToolError::Fetch(FetchError::Status {
        url: url.to_string(),
        status: status.as_u16(),
      }));
    }

    let body = response.bytes()?;
    fs::write(target, &body).with_context(|| format!("Failed to write artifact to {}", target.display()))?;
    Ok(())
  }
}
