use serde::{Deserialize, Serialize};

/// Open, closed, and stale counts for a set of pull requests or issues.
///
/// The counts overlap: an item older than the lookback window is stale whatever its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StateSummary {
    pub open: u64,
    pub closed: u64,
    #[serde(rename = "old")]
    pub stale: u64,
}
