//! Terminal summary output for completed runs.

use crate::archive::DeleteReport;
use crate::documenter::RunReport;
use anyhow::Result;
use console::{Term, style};
use std::io::Write;
use std::time::Duration;

/// Display the summary for a documentation run.
///
/// Lists counts and every failed path with its reason. Silent partial failure
/// is a correctness violation, so the failed list is never elided.
pub fn display_run_summary(report: &RunReport, elapsed: Duration, quiet: bool) -> Result<()> {
    if quiet {
        return Ok(());
    }

    let mut term = Term::stdout();

    writeln!(term)?;
    if report.failed.is_empty() {
        writeln!(
            term,
            "{} {}",
            style("\u{2713}").green().bold(),
            style("Documentation run complete").bold()
        )?;
    } else {
        writeln!(
            term,
            "{} {}",
            style("\u{26a0}").yellow().bold(),
            style("Documentation run finished with failures").bold()
        )?;
    }

    writeln!(term)?;
    writeln!(
        term,
        "{} Documented: {}",
        style("\u{251c}\u{2500}").dim(),
        report.documented
    )?;
    writeln!(
        term,
        "{} Skipped:    {}",
        style("\u{251c}\u{2500}").dim(),
        report.skipped
    )?;
    writeln!(
        term,
        "{} Failed:     {}",
        style("\u{251c}\u{2500}").dim(),
        report.failed.len()
    )?;
    writeln!(
        term,
        "{} Time:       {}",
        style("\u{2514}\u{2500}").dim(),
        format_duration(elapsed)
    )?;

    if !report.failed.is_empty() {
        writeln!(term)?;
        writeln!(term, "{}:", style("Failures").bold())?;
        for (path, reason) in &report.failed {
            writeln!(
                term,
                "{} {}: {}",
                style("\u{2022}").red(),
                path.display(),
                reason
            )?;
        }
    }

    writeln!(term)?;
    Ok(())
}

/// Display the summary for an archive clean run.
pub fn display_clean_summary(report: &DeleteReport, quiet: bool) -> Result<()> {
    if quiet {
        return Ok(());
    }

    let mut term = Term::stdout();

    writeln!(term)?;
    writeln!(
        term,
        "{} Deleted {} archive file(s)",
        style("\u{2713}").green().bold(),
        report.deleted
    )?;

    if !report.failed.is_empty() {
        writeln!(term, "{}:", style("Failed to delete").bold())?;
        for (path, reason) in &report.failed {
            writeln!(
                term,
                "{} {}: {}",
                style("\u{2022}").red(),
                path.display(),
                reason
            )?;
        }
    }

    writeln!(term)?;
    Ok(())
}

/// Format a duration for display (e.g., "12.3s" or "1m 23s").
fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs >= 60.0 {
        let mins = (secs / 60.0).floor() as u64;
        let remaining_secs = secs - (mins as f64 * 60.0);
        format!("{}m {:.1}s", mins, remaining_secs)
    } else {
        format!("{:.1}s", secs)
    }
}
