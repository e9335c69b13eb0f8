use crate::Result;
use crate::facts::hosting::ActivityReport;
use core::fmt::Write;

pub fn generate<W: Write>(report: &ActivityReport, writer: &mut W) -> Result<()> {
    for committer in &report.top_committers {
        writeln!(writer, "{} {}", committer.login, committer.commits)?;
    }

    let prs = &report.pull_requests;
    writeln!(writer, "PullRequests: {} open, {} closed, {} old", prs.open, prs.closed, prs.stale)?;

    let issues = &report.issues;
    writeln!(writer, "Issues: {} open, {} closed, {} old", issues.open, issues.closed, issues.stale)?;

    Ok(())
}
