use super::{CommitterActivity, StateSummary};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityReport {
    pub repository: String,
    pub top_committers: Vec<CommitterActivity>,
    pub pull_requests: StateSummary,
    pub issues: StateSummary,
}
