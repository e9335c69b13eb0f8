use super::records::{ItemState, TrackedItem};
use super::{CommitterActivity, StateSummary};
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;

/// Maximum number of committers reported
pub const TOP_COMMITTERS: usize = 30;

/// Pull requests created longer ago than this count as stale
pub const PULL_REQUEST_LOOKBACK_DAYS: i64 = 30;

/// Issues created longer ago than this count as stale
pub const ISSUE_LOOKBACK_DAYS: i64 = 14;

/// Count commits per login and keep the `limit` most active.
///
/// Sorted by descending count; logins with equal counts stay in the order they were first seen.
pub fn top_committers(logins: impl IntoIterator<Item = String>, limit: usize) -> Vec<CommitterActivity> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut activity: Vec<CommitterActivity> = Vec::new();

    for login in logins {
        if let Some(&slot) = index.get(&login) {
            activity[slot].commits += 1;
        } else {
            let _ = index.insert(login.clone(), activity.len());
            activity.push(CommitterActivity { login, commits: 1 });
        }
    }

    // stable sort keeps first-seen order among ties
    activity.sort_by(|a, b| b.commits.cmp(&a.commits));
    activity.truncate(limit);
    activity
}

/// Count open, closed, and stale items as of `now`
pub fn summarize_states<'a>(items: impl IntoIterator<Item = &'a TrackedItem>, now: DateTime<Utc>, lookback_days: i64) -> StateSummary {
    let cutoff = now - TimeDelta::days(lookback_days);

    items.into_iter().fold(StateSummary::default(), |mut summary, item| {
        match item.state {
            ItemState::Open => summary.open += 1,
            ItemState::Closed => summary.closed += 1,
            ItemState::Other => {}
        }

        if item.created_at < cutoff {
            summary.stale += 1;
        }

        summary
    })
}
