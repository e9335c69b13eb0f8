//! Repository activity collection
//!
//! This module talks to the hosting API and reduces what it returns to the summaries the
//! reports print.
//!
//! # Implementation Model
//!
//! A [`hosting::Provider`] owns one HTTP client. For each summary it builds the query
//! parameters of the resource involved, counts the resource's pages from the `Link` header
//! of page 1, then walks pages `1..=N` sequentially and concatenates the decoded records.
//! Records are decoded into narrow types at this boundary, so the aggregators only ever see
//! validated committer logins, states, and creation times.

pub mod hosting;
mod repo_spec;

pub use repo_spec::RepoSpec;
