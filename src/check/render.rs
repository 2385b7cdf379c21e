use std::fmt;
use anyhow::Result;
use super::{Report, Section};

/// Human readable rendering of a report.
pub struct Summary<'a>(pub &'a Report);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Summary(report) = self;

        writeln!(f, "----> Host Checks")?;
        section(f, &report.host)?;

        if !report.pod.is_empty() {
            writeln!(f)?;
            writeln!(f, "----> Pod Checks (from within source pod)")?;
            section(f, &report.pod)?;
        }

        writeln!(f)?;
        writeln!(f, "  Host Checks: {}/{}", report.host.passed(), report.host.len())?;
        writeln!(f, "   Pod Checks: {}/{}", report.pod.passed(),  report.pod.len())?;
        writeln!(f, " Total Checks: {}/{}", report.passed(),      report.len())
    }
}

fn section(f: &mut fmt::Formatter<'_>, section: &Section) -> fmt::Result {
    for check in section.checks() {
        let symbol = match check.success {
            true  => " ok ",
            false => "fail",
        };

        match &check.error_msg {
            Some(e) => writeln!(f, " {}  {} ({})", symbol, check.name, e)?,
            None    => writeln!(f, " {}  {}", symbol, check.name)?,
        }
    }
    Ok(())
}

pub fn json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string(report)?)
}
