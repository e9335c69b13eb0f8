//! Page counting and sequential page walking for a single repository resource.

use super::client::Client;
use super::pagination;
use super::query::QueryParams;
use super::resource::Resource;
use crate::Result;
use crate::facts::RepoSpec;
use core::pin::pin;
use futures_util::stream::{self, Stream, StreamExt, TryStreamExt};
use ohno::{EnrichableExt, IntoAppError};
use reqwest::header::LINK;
use serde::de::DeserializeOwned;
use url::Url;

const LOG_TARGET: &str = "   fetcher";

/// One paged resource of one repository, with the query parameters of its first page
#[derive(Debug, Clone)]
pub struct PagedResource<'a> {
    client: &'a Client,
    repo_spec: &'a RepoSpec,
    resource: Resource,
    url: Url,
    params: QueryParams,
}

impl<'a> PagedResource<'a> {
    pub fn new(client: &'a Client, repo_spec: &'a RepoSpec, resource: Resource, params: QueryParams) -> Result<Self> {
        let url = client.resource_url(repo_spec, resource)?;

        Ok(Self {
            client,
            repo_spec,
            resource,
            url,
            params,
        })
    }

    /// Request the first page and read the page count from its `Link` header
    pub async fn page_count(&self) -> Result<u32> {
        let resp = self
            .client
            .get(&self.url, &self.params.with_page(1))
            .await
            .map_err(|e| e.enrich_with(|| format!("counting pages of {} for '{}'", self.resource, self.repo_spec)))?;

        pagination::page_count(resp.headers().get(LINK))
            .map_err(|e| e.enrich_with(|| format!("reading pagination of {} for '{}'", self.resource, self.repo_spec)))
    }

    /// Lazily fetch pages `1..=page_count` in order, one request at a time.
    ///
    /// Each call starts a fresh walk from the first page.
    pub fn pages<T: DeserializeOwned + 'static>(&self, page_count: u32) -> impl Stream<Item = Result<Vec<T>>> + '_ {
        stream::iter(1..=page_count).then(move |page| self.fetch_page(page))
    }

    /// Count the pages, then fetch and concatenate all of them in server order
    pub async fn fetch_all<T: DeserializeOwned + 'static>(&self) -> Result<Vec<T>> {
        let page_count = self.page_count().await?;
        log::info!(target: LOG_TARGET, "Fetching {page_count} page(s) of {} for '{}'", self.resource, self.repo_spec);

        let mut records = Vec::new();
        let mut pages = pin!(self.pages::<T>(page_count));
        while let Some(page) = pages.try_next().await? {
            records.extend(page);
        }

        log::debug!(target: LOG_TARGET, "Fetched {} {} record(s) for '{}'", records.len(), self.resource, self.repo_spec);
        Ok(records)
    }

    async fn fetch_page<T: DeserializeOwned>(&self, page: u32) -> Result<Vec<T>> {
        log::debug!(target: LOG_TARGET, "Fetching page {page} of {} for '{}'", self.resource, self.repo_spec);

        let resp = self
            .client
            .get(&self.url, &self.params.with_page(page))
            .await
            .map_err(|e| e.enrich_with(|| format!("fetching page {page} of {} for '{}'", self.resource, self.repo_spec)))?;

        resp.json()
            .await
            .into_app_err_with(|| format!("decoding page {page} of {} for '{}'", self.resource, self.repo_spec))
    }
}
