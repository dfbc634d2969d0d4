//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A test workspace with local artifact sources and a relmgr.toml
pub struct TestWorkspace {
  _root: TempDir,
  pub path: PathBuf,
}

/// Version label the test workspaces are configured with
pub const VERSION_LABEL: &str = "TEST-1";

impl TestWorkspace {
  /// Create a workspace whose config points both sources at local directories
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    std::fs::create_dir_all(path.join("api"))?;
    std::fs::create_dir_all(path.join("feed"))?;

    let config = format!(
      r#"[source]
api_url = "{api}"
feed_url = "{feed}"
cache_dir = "cache"

[manifest]
project_template = "{{label}}"

[changelog]
version_label = "{label}"
origin_label = "{label}"
"#,
      api = path.join("api").display(),
      feed = path.join("feed").display(),
      label = VERSION_LABEL,
    );
    std::fs::write(path.join("relmgr.toml"), config)?;

    Ok(Self { _root: root, path })
  }

  /// Place a group manifest for a product label in the manifest source
  pub fn write_manifest(&self, label: &str, content: &str) -> Result<()> {
    let dir = self.path.join("api/source").join(label).join("000package-groups");
    std::fs::create_dir_all(&dir)?;
    std::fs::write(dir.join("groups.yml"), content)?;
    Ok(())
  }

  /// Place the five feed artifacts for a build pair in the feed source
  pub fn write_build_artifacts(&self, old: &str, new: &str, artifacts: &FeedFixture) -> Result<()> {
    let common = format!("{}-Full-Test-Build{}-Build{}", VERSION_LABEL, old, new);
    let dir = self
      .path
      .join("feed/raw")
      .join(format!("{}-Full-Test", VERSION_LABEL))
      .join(new)
      .join("all");
    std::fs::create_dir_all(&dir)?;

    std::fs::write(dir.join(format!("ChangeLog-{}", common)), &artifacts.changelog)?;
    std::fs::write(dir.join(format!("{}-updated-RPMs", common)), &artifacts.updated)?;
    std::fs::write(dir.join(format!("{}-new-RPMs", common)), &artifacts.new)?;
    std::fs::write(dir.join(format!("{}-missing-RPMs", common)), &artifacts.missing)?;
    std::fs::write(dir.join(format!("{}-downgraded-RPMs", common)), &artifacts.downgraded)?;
    Ok(())
  }

  /// Read a file relative to the workspace
  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }
}

/// The five feed artifact bodies for one build pair
#[derive(Default)]
pub struct FeedFixture {
  pub changelog: String,
  pub updated: String,
  pub new: String,
  pub missing: String,
  pub downgraded: String,
}

/// Run the relmgr CLI, failing the test on a non-zero exit
pub fn run_relmgr(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_relmgr_raw(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "relmgr command failed: relmgr {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Run the relmgr CLI and hand back the raw output, whatever the exit status
pub fn run_relmgr_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  let relmgr_bin = env!("CARGO_BIN_EXE_relmgr");

  Command::new(relmgr_bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run relmgr")
}
