use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Timestamp layout used by the API for `created_at`
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Minimal commit info with only the fields we need.
///
/// `committer` is the linked GitHub account, which is `null` for commits whose committer
/// email does not map to an account (imports, some merge commits).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Commit {
    #[serde(default)]
    pub committer: Option<Committer>,
}

/// A linked account; an empty object carries no login and is treated like `null`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Committer {
    #[serde(default)]
    pub login: Option<String>,
}

/// A pull request or issue, reduced to its state and creation time
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TrackedItem {
    pub state: ItemState,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Issue/PR state: open or closed
///
/// Any other value decodes as `Other`, which counts toward neither state but still toward
/// staleness.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemState {
    Open,
    Closed,
    #[serde(other)]
    Other,
}

fn deserialize_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let s = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{s}': {e}")))
}

/// Project commits onto their committer logins, dropping commits without a linked account
pub fn committer_logins(commits: impl IntoIterator<Item = Commit>) -> impl Iterator<Item = String> {
    commits.into_iter().filter_map(|commit| commit.committer.and_then(|c| c.login))
}
