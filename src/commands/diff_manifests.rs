//! The diff-manifests command
//!
//! Fetches the group manifest of both product revisions into the local
//! cache, runs the differ, writes the report file, and prints the report
//! (or writes it to `--output-file` instead).

use crate::core::config::ToolsConfig;
use crate::core::error::{ResultExt, ToolResult};
use crate::core::fetch::{Fetcher, manifest_request, sanitize_label};
use crate::manifest::diff_report;
use std::fs;
use std::path::Path;

/// Run the diff-manifests command
pub fn run_diff_manifests(
  config: &ToolsConfig,
  from: &str,
  from_rev: Option<&str>,
  to: &str,
  to_rev: Option<&str>,
  output_file: Option<&Path>,
) -> ToolResult<()> {
  let fetcher = Fetcher::new(&config.source)?;

  let from_text = fetcher.fetch_string(&manifest_request(config, from, from_rev))?;
  let to_text = fetcher.fetch_string(&manifest_request(config, to, to_rev))?;

  let report = diff_report(&from_text, &to_text, config.manifest.report_start_section.as_deref());

  let report_path = config
    .source
    .cache_dir
    .join(format!("changes_{}_to_{}.diff", sanitize_label(from), sanitize_label(to)));
  fs::write(&report_path, &report).with_context(|| format!("Failed to write report to {}", report_path.display()))?;
  log::debug!("diff report written to {}", report_path.display());

  match output_file {
    Some(path) => {
      fs::write(path, &report).with_context(|| format!("Failed to write report to {}", path.display()))?;
    }
    None => print!("{}", report),
  }

  Ok(())
}
