//! Command-line interface and orchestration for repo-activity
//!
//! This module parses the command line, drives the collection of repository activity, and
//! writes the resulting report.
//!
//! # Execution Flow
//!
//! The `run` function parses command-line arguments using clap and hands them to
//! `process_activity`, which:
//!
//! 1. Sets up logging and validates the commit filters and credentials
//! 2. Collects committer, pull request, and issue activity through the hosting provider
//! 3. Renders the report as text or JSON and writes it to the host's output
//!
//! All output goes through the [`Host`] trait so the whole flow can be exercised in tests
//! without touching the real process streams.

mod activity;
mod common;
mod host;
mod run;

pub use activity::{ActivityArgs, process_activity};
pub use common::{LogLevel, OutputFormat};
pub use host::Host;
pub use run::run;
