//! Request parameter construction for paged resource requests.
//!
//! Every request carries the page cursor, the page size, and the optional OAuth application
//! credentials. Commits are further narrowed by branch and date range, while pull requests and
//! issues are always requested in every state so that open and closed counts can be derived
//! from a single fetch.

use super::resource::Resource;
use chrono::{NaiveDate, NaiveTime, SecondsFormat};
use core::fmt::{Debug, Formatter};

/// Number of records requested per page (the API maximum)
pub const PAGE_SIZE: u8 = 100;

/// OAuth application credentials sent as query parameters
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

/// Commit filters taken from the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub branch: Option<String>,
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
}

/// Ordered query parameters for one resource request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Build the parameters for the first page of `resource`
    #[must_use]
    pub fn build(resource: Resource, filters: &Filters, credentials: Option<&Credentials>) -> Self {
        let mut pairs = vec![("page", "1".to_string()), ("per_page", PAGE_SIZE.to_string())];

        if let Some(creds) = credentials {
            pairs.push(("client_id", creds.client_id.clone()));
            pairs.push(("client_secret", creds.client_secret.clone()));
        }

        match resource {
            Resource::Commits => {
                if let Some(branch) = &filters.branch {
                    pairs.push(("sha", branch.clone()));
                }
                if let Some(since) = filters.since {
                    pairs.push(("since", to_timestamp(since)));
                }
                if let Some(until) = filters.until {
                    pairs.push(("until", to_timestamp(until)));
                }
            }
            Resource::Pulls | Resource::Issues => pairs.push(("state", "all".to_string())),
        }

        Self { pairs }
    }

    /// Return a copy positioned at `page`, leaving every other parameter untouched
    #[must_use]
    pub fn with_page(&self, page: u32) -> Self {
        let mut params = self.clone();
        params.set("page", page.to_string());
        params
    }

    #[cfg(test)]
    fn get(&self, name: &str) -> Option<&str> {
        self.pairs.iter().find(|(k, _)| *k == name).map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn as_pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    /// Render as a query string with the client secret masked, for logging
    #[must_use]
    pub fn redacted(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (name, value) in &self.pairs {
            let value = if *name == "client_secret" { "***" } else { value.as_str() };
            let _ = serializer.append_pair(name, value);
        }
        serializer.finish()
    }

    fn set(&mut self, name: &'static str, value: String) {
        if let Some(slot) = self.pairs.iter_mut().find(|(k, _)| *k == name) {
            slot.1 = value;
        } else {
            self.pairs.push((name, value));
        }
    }
}

/// Midnight UTC of `date`, in the `YYYY-MM-DDTHH:MM:SSZ` form the API uses for timestamps
fn to_timestamp(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}
