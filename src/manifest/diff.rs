//! Section-aligned manifest diff and report rendering
//!
//! Sections are paired by name so the entry diff can never bleed across a
//! module boundary, then each paired entry list goes through a line-level
//! diff with unchanged entries suppressed. A section with no entry changes
//! produces no output at all.

use crate::manifest::model::{Manifest, Section};
use crate::manifest::normalize::normalize;
use similar::{ChangeTag, TextDiff};

/// A classified entry from the comparison; unchanged entries are not recorded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffRecord {
  /// Present only in the TO manifest
  Added(String),
  /// Present only in the FROM manifest
  Removed(String),
}

/// All entry changes of one section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionDiff {
  pub name: String,
  pub records: Vec<DiffRecord>,
}

/// Diff two parsed manifests
///
/// Sections present in TO render in TO order; sections only in FROM follow
/// in FROM order with all entries removed. Sections whose entry lists are
/// identical are suppressed.
pub fn diff(from: &Manifest, to: &Manifest) -> Vec<SectionDiff> {
  let mut out = Vec::new();

  for section in &to.sections {
    let records = match from.section(&section.name) {
      Some(old) => diff_entries(old, section),
      None => section.entries.iter().cloned().map(DiffRecord::Added).collect(),
    };
    if !records.is_empty() {
      out.push(SectionDiff {
        name: section.name.clone(),
        records,
      });
    }
  }

  for section in &from.sections {
    if to.section(&section.name).is_none() && !section.entries.is_empty() {
      out.push(SectionDiff {
        name: section.name.clone(),
        records: section.entries.iter().cloned().map(DiffRecord::Removed).collect(),
      });
    }
  }

  out
}

/// Line-level diff of two entry lists, common lines suppressed
fn diff_entries(from: &Section, to: &Section) -> Vec<DiffRecord> {
  let old = joined(&from.entries);
  let new = joined(&to.entries);
  let text_diff = TextDiff::from_lines(old.as_str(), new.as_str());

  let mut records = Vec::new();
  for change in text_diff.iter_all_changes() {
    let entry = change.value().trim_end_matches('\n').to_string();
    match change.tag() {
      ChangeTag::Delete => records.push(DiffRecord::Removed(entry)),
      ChangeTag::Insert => records.push(DiffRecord::Added(entry)),
      ChangeTag::Equal => {}
    }
  }
  records
}

fn joined(entries: &[String]) -> String {
  let mut text = String::new();
  for entry in entries {
    text.push_str(entry);
    text.push('\n');
  }
  text
}

/// Render section diffs as the `+`/`-` report
///
/// When a start section is configured, everything before its header line is
/// dropped; a configured marker that never appears leaves nothing in scope.
pub fn render(diffs: &[SectionDiff], start_section: Option<&str>) -> String {
  let mut lines = Vec::new();

  for section_diff in diffs {
    if !section_diff.name.is_empty() {
      lines.push(format!("{}:", section_diff.name));
    }
    for record in &section_diff.records {
      match record {
        DiffRecord::Added(entry) => lines.push(format!("+  {}", entry)),
        DiffRecord::Removed(entry) => lines.push(format!("-  {}", entry)),
      }
    }
  }

  if let Some(marker) = start_section {
    let header = format!("{}:", marker);
    match lines.iter().position(|l| *l == header) {
      Some(pos) => {
        lines.drain(..pos);
      }
      None => lines.clear(),
    }
  }

  if lines.is_empty() {
    String::new()
  } else {
    let mut report = lines.join("\n");
    report.push('\n');
    report
  }
}

/// Full pipeline: normalize, parse, diff, render
pub fn diff_report(from_text: &str, to_text: &str, start_section: Option<&str>) -> String {
  let from = Manifest::parse(&normalize(from_text));
  let to = Manifest::parse(&normalize(to_text));
  render(&diff(&from, &to), start_section)
}
