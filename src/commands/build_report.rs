//! The build-report command
//!
//! Fetches the changelog and the four package-list artifacts for a build
//! pair, derives the report sections, and prints them together with the
//! tracker query boilerplate. Print-only: the cached artifacts are the only
//! files this command leaves behind.

use crate::changelog::{BuildReport, RawArtifacts};
use crate::core::config::ToolsConfig;
use crate::core::error::ToolResult;
use crate::core::fetch::{BuildPair, Fetcher, feed_requests};
use crate::tracker;

/// Run the build-report command
pub fn run_build_report(config: &ToolsConfig, pair: &BuildPair, json: bool) -> ToolResult<()> {
  let fetcher = Fetcher::new(&config.source)?;
  let requests = feed_requests(config, pair);

  let mut texts = Vec::with_capacity(requests.len());
  for request in &requests {
    texts.push(fetcher.fetch_string(request)?);
  }
  let mut texts = texts.into_iter();
  let artifacts = RawArtifacts {
    changelog: texts.next().unwrap_or_default(),
    updated: texts.next().unwrap_or_default(),
    new: texts.next().unwrap_or_default(),
    missing: texts.next().unwrap_or_default(),
    downgraded: texts.next().unwrap_or_default(),
  };

  let report = BuildReport::from_artifacts(&artifacts, &config.changelog)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&report)?);
    return Ok(());
  }

  print_report(&report, config, &pair.new);
  Ok(())
}

fn print_report(report: &BuildReport, config: &ToolsConfig, newer_build: &str) {
  println!("Updated packages:");
  for (name, change) in &report.updated {
    println!("* {}: {} => {}", name, change.old_version, change.new_version);
  }
  println!();

  println!("Added packages:");
  for (name, version) in &report.added {
    println!("* {} {}", name, version);
  }
  println!();

  println!("Removed packages:");
  for name in &report.removed {
    println!("* {}", name);
  }
  println!();

  println!("Downgraded packages:");
  for (name, change) in &report.downgraded {
    println!("* {}: {} => {}", name, change.old_version, change.new_version);
  }
  println!();

  println!("Mentioned bug references:");
  println!("{}", report.bugs.join(","));
  println!();

  println!(
    "Filter for resolved P1/P2 bugs with this build in {}",
    config.changelog.version_label
  );
  println!("{}", tracker::bug_list_query(&report.bugs, &config.tracker));
  println!();

  println!("Mentioned tracker references:");
  println!("{}", report.epics.join(","));

  for query in tracker::all_queries(&report.epics, newer_build) {
    println!();
    println!("{}", query);
  }
}
