mod activity_report;
mod aggregate;
mod client;
mod committer_activity;
mod fetcher;
mod pagination;
mod provider;
mod query;
mod records;
mod resource;
mod state_summary;

pub use activity_report::ActivityReport;
pub use aggregate::{ISSUE_LOOKBACK_DAYS, PULL_REQUEST_LOOKBACK_DAYS, TOP_COMMITTERS, summarize_states, top_committers};
pub use client::{Client, DEFAULT_API_URL};
pub use committer_activity::CommitterActivity;
pub use fetcher::PagedResource;
pub use pagination::page_count;
pub use provider::Provider;
pub use query::{Credentials, Filters, PAGE_SIZE, QueryParams};
pub use records::{Commit, Committer, ItemState, TrackedItem, committer_logins};
pub use resource::Resource;
pub use state_summary::StateSummary;
