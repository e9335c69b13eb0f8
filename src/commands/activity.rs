use super::Host;
use super::common::{LogLevel, OutputFormat, init_logging};
use crate::Result;
use crate::facts::RepoSpec;
use crate::facts::hosting::{Credentials, DEFAULT_API_URL, Filters, Provider};
use crate::reports::{generate_console, generate_json};
use chrono::{NaiveDate, Utc};
use clap::Args;
use ohno::{IntoAppError, bail};
use std::io::Write;

const LOG_TARGET: &str = "  activity";

#[derive(Args, Debug)]
pub struct ActivityArgs {
    /// Repository to summarize, as `owner/name`
    #[arg(long, short = 'r', value_name = "OWNER/NAME")]
    pub repository: RepoSpec,

    /// Branch whose commits are counted (an empty value selects the repository's default branch)
    #[arg(long, short = 'b', value_name = "BRANCH", default_value = "master")]
    pub branch: String,

    /// Only count commits made on or after this date
    #[arg(long, short = 's', value_name = "YYYY-MM-DD", value_parser = parse_date)]
    pub start: Option<NaiveDate>,

    /// Only count commits made on or before this date
    #[arg(long, short = 'f', value_name = "YYYY-MM-DD", value_parser = parse_date)]
    pub finish: Option<NaiveDate>,

    /// OAuth application client ID used to raise the API rate limit
    #[arg(long, value_name = "ID", env = "GITHUB_CLIENT_ID")]
    pub client_id: Option<String>,

    /// OAuth application client secret used to raise the API rate limit
    #[arg(long, value_name = "SECRET", env = "GITHUB_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, value_name = "URL", env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Report format
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub format: OutputFormat,

    /// Log level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

impl ActivityArgs {
    fn credentials(&self) -> Result<Option<Credentials>> {
        match (&self.client_id, &self.client_secret) {
            (Some(id), Some(secret)) => Ok(Some(Credentials::new(id.as_str(), secret.as_str()))),
            (None, None) => Ok(None),
            _ => bail!("--client-id and --client-secret must be supplied together"),
        }
    }

    fn filters(&self) -> Result<Filters> {
        if let (Some(start), Some(finish)) = (self.start, self.finish)
            && start > finish
        {
            bail!("start date {start} is after finish date {finish}");
        }

        Ok(Filters {
            branch: Some(self.branch.clone()).filter(|branch| !branch.is_empty()),
            since: self.start,
            until: self.finish,
        })
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected a date formatted as YYYY-MM-DD: {e}"))
}

pub async fn process_activity<H: Host>(host: &mut H, args: &ActivityArgs) -> Result<()> {
    init_logging(args.log_level);

    let credentials = args.credentials()?;
    let filters = args.filters()?;

    log::info!(target: LOG_TARGET, "Summarizing activity for repository '{}'", args.repository);

    let provider = Provider::new(&args.api_url, credentials)?;
    let report = provider.get_activity(&args.repository, &filters, Utc::now()).await?;

    let mut output = String::new();
    match args.format {
        OutputFormat::Text => generate_console(&report, &mut output)?,
        OutputFormat::Json => generate_json(&report, &mut output)?,
    }

    host.output()
        .write_all(output.as_bytes())
        .into_app_err("unable to write the activity report")?;

    Ok(())
}
