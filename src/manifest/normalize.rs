//! Manifest normalization
//!
//! Strips trailing `#` comments and surrounding whitespace, and drops blank
//! lines. Comparison always runs on normalized text, so formatting-only
//! changes between two manifest revisions never show up in a report.

/// Normalize manifest text for comparison. Idempotent.
pub fn normalize(text: &str) -> String {
  let mut out = String::new();
  for line in text.lines() {
    let line = match line.find('#') {
      Some(pos) => &line[..pos],
      None => line,
    };
    let line = line.trim();
    if line.is_empty() {
      continue;
    }
    out.push_str(line);
    out.push('\n');
  }
  out
}
