//! Integration tests for `relmgr diff-manifests`

use crate::helpers::{TestWorkspace, run_relmgr, run_relmgr_raw};
use anyhow::Result;

#[test]
fn test_added_package_is_reported() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_manifest("15-SP4", "base:\n  pkgA\n")?;
  ws.write_manifest("15-SP5", "base:\n  pkgA\n  pkgB\n")?;

  let output = run_relmgr(&ws.path, &["diff-manifests", "--from", "15-SP4", "--to", "15-SP5"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert_eq!(stdout, "base:\n+  pkgB\n");
  Ok(())
}

#[test]
fn test_identical_manifests_produce_empty_report() -> Result<()> {
  let ws = TestWorkspace::new()?;
  // Comments and blank lines differ, content does not
  ws.write_manifest("15-SP4", "base:\n  pkgA   # oldest member\n")?;
  ws.write_manifest("15-SP5", "base:\n\n  pkgA\n")?;

  let output = run_relmgr(&ws.path, &["diff-manifests", "--from", "15-SP4", "--to", "15-SP5"])?;

  assert!(output.stdout.is_empty());
  Ok(())
}

#[test]
fn test_report_file_is_written() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_manifest("15-SP4", "base:\n  pkgA\n  pkgOld\n")?;
  ws.write_manifest("15-SP5", "base:\n  pkgA\n")?;

  run_relmgr(&ws.path, &["diff-manifests", "--from", "15-SP4", "--to", "15-SP5"])?;

  let report = ws.read_file("cache/changes_15-SP4_to_15-SP5.diff")?;
  assert_eq!(report, "base:\n-  pkgOld\n");
  Ok(())
}

#[test]
fn test_output_file_flag() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_manifest("15-SP4", "base:\n  pkgA\n")?;
  ws.write_manifest("15-SP5", "base:\n  pkgA\n  pkgB\n")?;

  let output = run_relmgr(
    &ws.path,
    &[
      "diff-manifests",
      "--from",
      "15-SP4",
      "--to",
      "15-SP5",
      "--output-file",
      "report.txt",
    ],
  )?;

  assert!(output.stdout.is_empty());
  assert_eq!(ws.read_file("report.txt")?, "base:\n+  pkgB\n");
  Ok(())
}

#[test]
fn test_cached_manifest_wins_over_changed_source() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_manifest("15-SP4", "base:\n  pkgA\n")?;
  ws.write_manifest("15-SP5", "base:\n  pkgA\n  pkgB\n")?;

  run_relmgr(&ws.path, &["diff-manifests", "--from", "15-SP4", "--to", "15-SP5"])?;

  // The source changes afterwards; the cached copies are reused
  ws.write_manifest("15-SP5", "base:\n  pkgA\n")?;
  let output = run_relmgr(&ws.path, &["diff-manifests", "--from", "15-SP4", "--to", "15-SP5"])?;

  assert_eq!(String::from_utf8_lossy(&output.stdout), "base:\n+  pkgB\n");
  Ok(())
}

#[test]
fn test_missing_manifest_is_fatal() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_manifest("15-SP4", "base:\n  pkgA\n")?;

  let output = run_relmgr_raw(&ws.path, &["diff-manifests", "--from", "15-SP4", "--to", "15-SP5"])?;

  assert!(!output.status.success());
  assert_eq!(output.status.code(), Some(2));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("not found"), "stderr was: {}", stderr);
  Ok(())
}

#[test]
fn test_missing_required_argument_is_usage_error() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_relmgr_raw(&ws.path, &["diff-manifests", "--from", "15-SP4"])?;

  assert!(!output.status.success());
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Usage"), "stderr was: {}", stderr);
  Ok(())
}

#[test]
fn test_start_section_scopes_the_report() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_manifest("15-SP4", "alpha:\n  a1\nserver:\n  s1\n")?;
  ws.write_manifest("15-SP5", "alpha:\n  a1\n  a2\nserver:\n  s1\n  s2\n")?;

  let config = ws.read_file("relmgr.toml")?;
  std::fs::write(
    ws.path.join("relmgr.toml"),
    config.replace("[manifest]\n", "[manifest]\nreport_start_section = \"server\"\n"),
  )?;

  let output = run_relmgr(&ws.path, &["diff-manifests", "--from", "15-SP4", "--to", "15-SP5"])?;

  assert_eq!(String::from_utf8_lossy(&output.stdout), "server:\n+  s2\n");
  Ok(())
}
