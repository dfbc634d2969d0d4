//! Issue-tracker query boilerplate
//!
//! Pure templating: nothing here talks to a tracker. The generated query,
//! comment, and label text is printed for the release manager to paste into
//! the tracker's advanced search.

use crate::core::config::TrackerConfig;
use std::fmt;

/// A canned tracker query with the comment and label handling to apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpicQuery {
  pub header: String,
  pub query: String,
  pub comment: String,
  pub labels: String,
}

impl fmt::Display for EpicQuery {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{}\n=========================================\nQuery:\n------\n{}\nComment:\n--------\n{}\nLabels:\n-------\n{}",
      self.header, self.query, self.comment, self.labels
    )
  }
}

const EXPECTED_STATES: [&str; 6] = [
  "QE Open",
  "QE In Progress",
  "QE Blocked",
  "Engineering Done",
  "Dev In Progress",
  "IBS Integration",
];

fn merged_comment(build: &str) -> String {
  format!("A submit request referencing this feature has been merged into build{}.", build)
}

/// Epics in a state that does not reflect merged code; needs manual handling
pub fn incorrect_state_query(epics: &str, build: &str) -> EpicQuery {
  let states = EXPECTED_STATES.join("\",\"");
  EpicQuery {
    header: "Tracker query for incorrect state".to_string(),
    query: format!(
      "issue in ({}) AND status NOT IN (\"{}\") AND type = Implementation",
      epics, states
    ),
    comment: format!(
      "{}\nPlease update the state of this ticket, as it doesn't reflect the correct state of development.",
      merged_comment(build)
    ),
    labels: "Add status:wait_for_status\nAdd status:code_merged".to_string(),
  }
}

/// Epics still marked as under development
pub fn development_query(epics: &str, build: &str) -> EpicQuery {
  EpicQuery {
    header: "Tracker query for still under development".to_string(),
    query: format!(
      "issue in ({}) AND status = \"Dev In Progress\" AND type = Implementation",
      epics
    ),
    comment: merged_comment(build),
    labels: "Remove status:wait_for_status\nAdd status:code_merged".to_string(),
  }
}

/// Epics already in a completed state
pub fn completed_query(epics: &str, build: &str) -> EpicQuery {
  EpicQuery {
    header: "Tracker query for already completed features".to_string(),
    query: format!(
      "issue in ({}) AND status IN (\"QE Open\",\"QE In Progress\",\"QE Blocked\",\"Engineering Done\") AND type = Implementation",
      epics
    ),
    comment: merged_comment(build),
    labels: "no handling required, only remove stale \"status:\" labels".to_string(),
  }
}

/// Epics ready to transition to their next state
pub fn ready_query(epics: &str, build: &str) -> EpicQuery {
  EpicQuery {
    header: "Tracker query for features ready to transition".to_string(),
    query: format!(
      "issue in ({}) AND status = \"IBS Integration\" AND type = Implementation",
      epics
    ),
    comment: merged_comment(build),
    labels: "Remove status:code_merged\nRemove status:wait_for_status".to_string(),
  }
}

/// The four fixed-state queries, in print order
pub fn all_queries(epic_keys: &[String], build: &str) -> Vec<EpicQuery> {
  let epics = epic_keys.join(",");
  vec![
    incorrect_state_query(&epics, build),
    development_query(&epics, build),
    completed_query(&epics, build),
    ready_query(&epics, build),
  ]
}

/// Canned bug-tracker list URL for resolved P1/P2 bugs in this build
pub fn bug_list_query(bug_ids: &[String], config: &TrackerConfig) -> String {
  let bugs = bug_ids.join("%2C");
  let mut url = format!(
    "{}?bug_id={}&bug_id_type=anyexact&bug_status=RESOLVED&bug_status=VERIFIED&columnlist=short_desc&priority=P1%20-%20Urgent&priority=P2%20-%20High",
    config.bug_list_url, bugs
  );
  for product in &config.products {
    url.push_str("&product=");
    url.push_str(&encode_query_value(product));
  }
  url.push_str("&query_format=advanced&resolution=FIXED");
  url
}

/// Percent-encode the characters that occur in product names
fn encode_query_value(value: &str) -> String {
  value.replace(' ', "%20")
}
