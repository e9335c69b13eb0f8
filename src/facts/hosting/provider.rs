use super::aggregate::{ISSUE_LOOKBACK_DAYS, PULL_REQUEST_LOOKBACK_DAYS, TOP_COMMITTERS, summarize_states, top_committers};
use super::client::Client;
use super::fetcher::PagedResource;
use super::query::{Credentials, Filters, QueryParams};
use super::records::{Commit, TrackedItem, committer_logins};
use super::resource::Resource;
use super::{ActivityReport, CommitterActivity, StateSummary};
use crate::Result;
use crate::facts::RepoSpec;
use chrono::{DateTime, Utc};

const LOG_TARGET: &str = "   hosting";

/// Fetches and aggregates activity for repositories on one hosting API.
///
/// Each summary performs its own independent walk of the resource it needs.
#[derive(Debug, Clone)]
pub struct Provider {
    client: Client,
    credentials: Option<Credentials>,
}

impl Provider {
    pub fn new(base_url: &str, credentials: Option<Credentials>) -> Result<Self> {
        Ok(Self {
            client: Client::new(base_url)?,
            credentials,
        })
    }

    /// Collect all three summaries for a repository, one resource after the other
    pub async fn get_activity(&self, repo_spec: &RepoSpec, filters: &Filters, now: DateTime<Utc>) -> Result<ActivityReport> {
        log::info!(target: LOG_TARGET, "Querying {} for activity in repository '{repo_spec}'", self.client.base_url());

        let top_committers = self.get_top_committers(repo_spec, filters).await?;
        let pull_requests = self.get_pull_requests(repo_spec, now).await?;
        let issues = self.get_issues(repo_spec, now).await?;

        Ok(ActivityReport {
            repository: repo_spec.to_string(),
            top_committers,
            pull_requests,
            issues,
        })
    }

    pub async fn get_top_committers(&self, repo_spec: &RepoSpec, filters: &Filters) -> Result<Vec<CommitterActivity>> {
        let commits: Vec<Commit> = self.fetch(repo_spec, Resource::Commits, filters).await?;
        let total = commits.len();

        let logins: Vec<String> = committer_logins(commits).collect();
        if logins.len() < total {
            log::debug!(target: LOG_TARGET, "Ignoring {} commit(s) without a linked committer account in '{repo_spec}'", total - logins.len());
        }

        Ok(top_committers(logins, TOP_COMMITTERS))
    }

    pub async fn get_pull_requests(&self, repo_spec: &RepoSpec, now: DateTime<Utc>) -> Result<StateSummary> {
        let pulls: Vec<TrackedItem> = self.fetch(repo_spec, Resource::Pulls, &Filters::default()).await?;
        Ok(summarize_states(&pulls, now, PULL_REQUEST_LOOKBACK_DAYS))
    }

    pub async fn get_issues(&self, repo_spec: &RepoSpec, now: DateTime<Utc>) -> Result<StateSummary> {
        let issues: Vec<TrackedItem> = self.fetch(repo_spec, Resource::Issues, &Filters::default()).await?;
        Ok(summarize_states(&issues, now, ISSUE_LOOKBACK_DAYS))
    }

    async fn fetch<T: serde::de::DeserializeOwned + 'static>(&self, repo_spec: &RepoSpec, resource: Resource, filters: &Filters) -> Result<Vec<T>> {
        let params = QueryParams::build(resource, filters, self.credentials.as_ref());
        PagedResource::new(&self.client, repo_spec, resource, params)?.fetch_all().await
    }
}
