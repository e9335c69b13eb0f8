//! Command dispatch logic for repo-activity

use super::{ActivityArgs, process_activity};
use crate::{Host, Result};
use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use ohno::app_err;
use std::io::Write;

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "repo-activity", version, long_about = None)]
#[command(about = "Summarize committer, pull request, and issue activity in a GitHub repository")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(flatten)]
    activity: ActivityArgs,
}

/// Parse command-line arguments and run the activity summary
///
/// This function is designed to be called from main.rs with the program arguments.
/// Help and version requests are written to the host's output; usage errors are written to
/// the host's error stream and terminate with clap's exit code.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if any request, decode, or write fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            let rendered = e.render().to_string();
            if !e.use_stderr() {
                let _ = write!(host.output(), "{rendered}");
                host.exit(0);
                return Ok(());
            }

            let _ = write!(host.error(), "{rendered}");
            host.exit(e.exit_code());
            return Err(app_err!("invalid command-line arguments"));
        }
    };

    process_activity(host, &cli.activity).await
}
