//! GitHub API client
//!
//! Minimal GitHub API client for issuing paged GET requests against repository resources.

use crate::Result;
use chrono::{DateTime, Local, Utc};
use ohno::{IntoAppError, app_err};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Deserialize;
use url::Url;

use super::query::QueryParams;
use super::resource::Resource;
use crate::facts::RepoSpec;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const LOG_TARGET: &str = "    client";
const ACCEPT_MEDIA_TYPE: &str = "application/vnd.github.v3.star+json";
const USER_AGENT: &str = "repo-activity";

/// Rate limit information from response headers
#[derive(Debug, Clone, Copy)]
pub struct RateLimitInfo {
    pub remaining: usize,
    pub reset_at: DateTime<Utc>,
}

/// Error payload GitHub attaches to non-2xx responses
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// Hosting API client
#[derive(Debug, Clone)]
#[expect(clippy::struct_field_names, reason = "client field stores the underlying HTTP client")]
pub struct Client {
    client: reqwest::Client,
    base_url: Url,
}

impl Client {
    /// Create a new hosting API client against the given base URL
    pub fn new(base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_MEDIA_TYPE));

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        // Url::join drops the last path segment unless the base ends with a slash
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized).into_app_err_with(|| format!("invalid API URL '{base_url}'"))?;

        Ok(Self { client, base_url })
    }

    /// Get the base URL for this client
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Construct the URL of a repository resource, without query parameters
    pub fn resource_url(&self, repo_spec: &RepoSpec, resource: Resource) -> Result<Url> {
        let suffix = format!("repos/{}/{}/{resource}", repo_spec.owner(), repo_spec.repo());
        self.base_url
            .join(&suffix)
            .into_app_err_with(|| format!("constructing API URL for '{repo_spec}'"))
    }

    /// Issue a GET request and fail on any non-2xx status
    pub async fn get(&self, url: &Url, params: &QueryParams) -> Result<reqwest::Response> {
        log::debug!(target: LOG_TARGET, "GET {url}?{}", params.redacted());

        let resp = self
            .client
            .get(url.clone())
            .query(params.as_pairs())
            .send()
            .await
            .into_app_err_with(|| format!("sending request to {url}"))?;

        let rate_limit = extract_rate_limit_from_headers(resp.headers());
        if let Some(rl) = &rate_limit {
            log::trace!(target: LOG_TARGET, "{} request(s) remaining, quota resets at {}", rl.remaining, rl.reset_at);
        }

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        Err(classify_failure(status, rate_limit, &body))
    }
}

/// Turn a non-2xx response into a descriptive error
fn classify_failure(status: StatusCode, rate_limit: Option<RateLimitInfo>, body: &str) -> ohno::AppError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_default();

    match status {
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS if rate_limit.is_some_and(|rl| rl.remaining == 0) => {
            let reset_at = rate_limit.map_or_else(String::new, |rl| {
                rl.reset_at.with_timezone(&Local).format("%T").to_string()
            });
            app_err!("GitHub API rate limit exceeded, resets at {reset_at}")
        }
        StatusCode::UNAUTHORIZED => app_err!("GitHub rejected the client credentials ({status}): {message}"),
        StatusCode::NOT_FOUND => app_err!("repository or resource not found ({status})"),
        _ if message.is_empty() => app_err!("GitHub API request failed with status {status}"),
        _ => app_err!("GitHub API request failed with status {status}: {message}"),
    }
}

/// Extract rate limit information from API response headers
fn extract_rate_limit_from_headers(headers: &HeaderMap) -> Option<RateLimitInfo> {
    let remaining = headers.get("x-ratelimit-remaining")?.to_str().ok()?.parse::<usize>().ok()?;

    let reset_timestamp = headers.get("x-ratelimit-reset")?.to_str().ok()?.parse::<i64>().ok()?;

    let reset_at = DateTime::from_timestamp(reset_timestamp, 0)?;

    Some(RateLimitInfo { remaining, reset_at })
}
