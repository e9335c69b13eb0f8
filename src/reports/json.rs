use crate::Result;
use crate::facts::hosting::ActivityReport;
use core::fmt::Write;

pub fn generate<W: Write>(report: &ActivityReport, writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", serde_json::to_string_pretty(report)?)?;
    Ok(())
}
