//! A tool to summarize contribution activity in a GitHub repository.
//!
//! # Overview
//!
//! `repo-activity` walks the commits, pull requests, and issues of a repository through the
//! GitHub REST API and prints three summaries:
//!
//! - the 30 most active committers, with their commit counts
//! - pull request counts: open, closed, and older than 30 days
//! - issue counts: open, closed, and older than 14 days
//!
//! # Basic Usage
//!
//! ```bash
//! repo-activity --repository tokio-rs/tokio
//! ```
//!
//! **Restrict commits to a branch and date range:**
//! ```bash
//! repo-activity -r tokio-rs/tokio -b master -s 2024-01-01 -f 2024-06-30
//! ```
//!
//! The date range and branch only apply to commits. Pull requests and issues are always
//! counted across their whole history, in every state.
//!
//! **Machine-readable output:**
//! ```bash
//! repo-activity -r tokio-rs/tokio --format json
//! ```
//!
//! # GitHub Access
//!
//! Unauthenticated requests are limited to 60 per hour. Register an OAuth application and
//! pass its credentials to raise the limit:
//!
//! ```bash
//! export GITHUB_CLIENT_ID=...
//! export GITHUB_CLIENT_SECRET=...
//! repo-activity -r tokio-rs/tokio
//! ```
//!
//! Use `--api-url` (or `GITHUB_API_URL`) to target a GitHub Enterprise installation.
//!
//! # Exit codes
//!
//! - `0`: All statistics were fetched and printed
//! - `1`: A request failed, the API returned an error, or a response could not be decoded
//! - `2`: The command line was invalid

use repo_activity::{Host, run};
use std::io::Write;
use std::io::{stderr, stdout};

/// Default host that writes to the real process streams.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), ohno::AppError> {
    run(&mut RealHost, std::env::args()).await
}
