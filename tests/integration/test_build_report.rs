//! Integration tests for `relmgr build-report`

use crate::helpers::{FeedFixture, TestWorkspace, run_relmgr, run_relmgr_raw};
use anyhow::Result;

fn fixture() -> FeedFixture {
  FeedFixture {
    changelog: "\
o Updated vim (request 4711)
o Added htop (request 4712)
Fixes bsc#1209875 and bnc#1200001, see bsc#1209875.
Feature work: jsc#PED-2064, jsc#SLE-23456 and jsc#PED-2064 again.
"
    .to_string(),
    updated: "vim.x86_64: 9.0.1 => 9.0.2\n".to_string(),
    new: "htop-3.2.2-1.x86_64.rpm\n".to_string(),
    missing: "\
libfoo-1.2-3.x86_64.rpm
kernel-default-5.14-1.x86_64.rpm
libbar-debuginfo-1.0-1.x86_64.rpm
other-1.0-1.s390x.rpm
"
    .to_string(),
    downgraded: "libzypp.x86_64: 17.31.2 => 17.30.1\n".to_string(),
  }
}

#[test]
fn test_full_report_sections() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_build_artifacts("36.1", "37.2", &fixture())?;

  let output = run_relmgr(&ws.path, &["build-report", "--build", "36.1", "37.2"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("Updated packages:\n* vim: 9.0.1 => 9.0.2\n"));
  assert!(stdout.contains("Added packages:\n* htop 3.2.2-1\n"));
  assert!(stdout.contains("Removed packages:\n* libfoo\n"));
  assert!(stdout.contains("Downgraded packages:\n* libzypp: 17.31.2 => 17.30.1\n"));
  assert!(stdout.contains("Mentioned bug references:\n1200001,1209875\n"));
  assert!(stdout.contains("Mentioned tracker references:\nPED-2064,SLE-23456\n"));
  Ok(())
}

#[test]
fn test_removed_section_filters_kernel_and_debug_noise() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_build_artifacts("36.1", "37.2", &fixture())?;

  let output = run_relmgr(&ws.path, &["build-report", "--build", "36.1", "37.2"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(!stdout.contains("kernel-default"));
  assert!(!stdout.contains("libbar-debuginfo"));
  // s390x is not in the architecture allow list
  assert!(!stdout.contains("* other"));
  Ok(())
}

#[test]
fn test_tracker_queries_are_parameterized() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_build_artifacts("36.1", "37.2", &fixture())?;

  let output = run_relmgr(&ws.path, &["build-report", "--build", "36.1", "37.2"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("Tracker query for incorrect state"));
  assert!(stdout.contains("Tracker query for still under development"));
  assert!(stdout.contains("Tracker query for already completed features"));
  assert!(stdout.contains("Tracker query for features ready to transition"));
  assert!(stdout.contains("issue in (PED-2064,SLE-23456)"));
  assert!(stdout.contains("merged into build37.2"));
  assert!(stdout.contains("bug_id=1200001%2C1209875"));
  Ok(())
}

#[test]
fn test_json_output_round_trips() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_build_artifacts("36.1", "37.2", &fixture())?;

  let output = run_relmgr(&ws.path, &["build-report", "--build", "36.1", "37.2", "--json"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  let report: serde_json::Value = serde_json::from_str(&stdout)?;
  assert_eq!(report["updated"]["vim"]["new_version"], "9.0.2");
  assert_eq!(report["added"]["htop"], "3.2.2-1");
  assert_eq!(report["removed"], serde_json::json!(["libfoo"]));
  assert_eq!(report["bugs"], serde_json::json!(["1200001", "1209875"]));
  assert_eq!(report["epics"], serde_json::json!(["PED-2064", "SLE-23456"]));
  Ok(())
}

#[test]
fn test_missing_artifact_is_fatal() -> Result<()> {
  let ws = TestWorkspace::new()?;
  // No artifacts written at all

  let output = run_relmgr_raw(&ws.path, &["build-report", "--build", "36.1", "37.2"])?;

  assert!(!output.status.success());
  assert_eq!(output.status.code(), Some(2));
  Ok(())
}

#[test]
fn test_build_pair_is_required() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_relmgr_raw(&ws.path, &["build-report"])?;

  assert!(!output.status.success());
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Usage"), "stderr was: {}", stderr);
  Ok(())
}
