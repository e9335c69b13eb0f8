//! repo-activity crate
//!
//! This crate is an implementation detail of the `repo-activity` tool. This crate's API is fluid and may change without warning
//! and in a semver-incompatible way.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`facts`]: Fetching and aggregating repository activity from the hosting API
//! - [`reports`]: Report generation in text and JSON

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[doc(hidden)]
pub mod commands;

#[doc(hidden)]
pub mod facts;

#[doc(hidden)]
pub mod reports;

pub use crate::commands::{Host, run};
