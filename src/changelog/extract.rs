//! Marker scan and per-section package parsers
//!
//! The changelog feed annotates per-build changes with `o Updated <pkg>` /
//! `o Added <pkg>` marker lines; the package-list artifacts carry one entry
//! per line in `name.arch: old => new` or `name-version-release.arch.rpm`
//! shape. Lines that match no recognized pattern are filtered, not errors.

use crate::changelog::VersionChange;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Package names pulled from the changelog marker lines
#[derive(Debug, Clone, Default)]
pub struct ChangelogEntries {
  pub updated: Vec<String>,
  pub added: Vec<String>,
}

impl ChangelogEntries {
  /// Marker names in report precedence: updated first, then added
  pub fn all(&self) -> impl Iterator<Item = &String> {
    self.updated.iter().chain(self.added.iter())
  }
}

static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
  // The trailing parenthetical (maintainer, version hints) is optional
  Regex::new(r"(?m)^o (?P<change>Updated|Added)\s+(?P<package>.*?)(?:\s+\([^)]*\))?\s*$").unwrap()
});

static VERSION_CHANGE_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^(?P<name>.*)\.(?P<arch>[^.\s]+):\s+(?P<old>\S+)\s+=>\s+(?P<new>\S+)").unwrap());

static NAME_VERSION_RELEASE_RE: LazyLock<Regex> = LazyLock::new(|| {
  // Release may carry dots; the architecture is the last dotted segment
  Regex::new(r"^(?P<name>.*)-(?P<version>[^-]*)-(?P<release>[^-]*)\.(?P<arch>[^.]*)\.rpm$").unwrap()
});

static VERSION_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-[^-]*\..*").unwrap());

/// Scan the changelog for update/add marker lines
pub fn entry_names(changelog: &str) -> ChangelogEntries {
  let mut entries = ChangelogEntries::default();
  for captures in MARKER_RE.captures_iter(changelog) {
    let package = captures["package"].to_string();
    if package.is_empty() {
      continue;
    }
    match &captures["change"] {
      "Updated" => entries.updated.push(package),
      "Added" => entries.added.push(package),
      _ => {}
    }
  }
  entries
}

/// Parse one `name.arch: old => new` line
fn version_change(line: &str) -> Option<(String, VersionChange)> {
  let captures = VERSION_CHANGE_RE.captures(line)?;
  Some((
    captures["name"].to_string(),
    VersionChange {
      old_version: captures["old"].to_string(),
      new_version: captures["new"].to_string(),
    },
  ))
}

/// Look up mentioned packages in the updated-RPMs artifact
///
/// Keyed by the changelog package name; the version transition comes from
/// the first artifact line the name prefixes.
pub fn updated_packages(entries: &ChangelogEntries, updated: &str) -> BTreeMap<String, VersionChange> {
  let mut result = BTreeMap::new();
  for package in entries.all() {
    for line in updated.lines() {
      if line.starts_with(package.as_str())
        && let Some((_, change)) = version_change(line)
      {
        result.insert(package.clone(), change);
      }
    }
  }
  result
}

/// Look up mentioned packages in the new-RPMs artifact, as `version-release`
pub fn added_packages(entries: &ChangelogEntries, new: &str) -> BTreeMap<String, String> {
  let mut result = BTreeMap::new();
  for package in entries.added.iter().chain(entries.updated.iter()) {
    for line in new.lines() {
      if line.starts_with(package.as_str())
        && let Some(captures) = NAME_VERSION_RELEASE_RE.captures(line)
      {
        result.insert(package.clone(), format!("{}-{}", &captures["version"], &captures["release"]));
      }
    }
  }
  result
}

/// Filter the missing-RPMs artifact down to reportable removals
///
/// Keeps entries tagged with an allowed architecture, strips the
/// version-release suffix, and drops names the deny patterns match.
pub fn removed_packages(missing: &str, arch_allow: &[String], name_deny: &[Regex]) -> Vec<String> {
  let mut result = Vec::new();
  for line in missing.lines() {
    if !arch_allow.iter().any(|arch| line.contains(arch.as_str())) {
      continue;
    }
    let Some(suffix) = VERSION_SUFFIX_RE.find(line) else {
      continue;
    };
    let name = &line[..suffix.start()];
    if name.is_empty() {
      continue;
    }
    if name_deny.iter().any(|deny| deny.is_match(name)) {
      continue;
    }
    result.push(name.to_string());
  }
  result
}

/// Parse the downgraded-RPMs artifact into version transitions
pub fn downgraded_packages(downgraded: &str) -> BTreeMap<String, VersionChange> {
  downgraded.lines().filter_map(version_change).collect()
}
