//! Parsed manifest model
//!
//! A manifest is an ordered sequence of sections. A section starts at a
//! `name:` header line and holds the package entries that follow it. Entries
//! may carry a leading `- ` list marker, which is stripped on parse.

/// One module/group section of a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
  /// Section name without the trailing colon; empty for entries that appear
  /// before the first header
  pub name: String,
  /// Package entries in manifest order
  pub entries: Vec<String>,
}

/// An ordered sequence of sections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
  pub sections: Vec<Section>,
}

impl Manifest {
  /// Parse normalized manifest text into sections
  pub fn parse(normalized: &str) -> Self {
    let mut sections: Vec<Section> = Vec::new();
    let mut current = Section {
      name: String::new(),
      entries: Vec::new(),
    };

    for line in normalized.lines() {
      if let Some(name) = section_header(line) {
        if !current.name.is_empty() || !current.entries.is_empty() {
          sections.push(current);
        }
        current = Section {
          name: name.to_string(),
          entries: Vec::new(),
        };
      } else {
        let entry = line.strip_prefix("- ").unwrap_or(line);
        current.entries.push(entry.to_string());
      }
    }

    if !current.name.is_empty() || !current.entries.is_empty() {
      sections.push(current);
    }

    Manifest { sections }
  }

  /// Look up a section by name
  pub fn section(&self, name: &str) -> Option<&Section> {
    self.sections.iter().find(|s| s.name == name)
  }
}

/// A header line is `name:` where the name is a plain module identifier
pub fn section_header(line: &str) -> Option<&str> {
  let name = line.strip_suffix(':')?;
  if name.is_empty() {
    return None;
  }
  if name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
    Some(name)
  } else {
    None
  }
}
