use console::Term;
use indicatif::{ProgressBar, ProgressStyle};

/// Creates a progress bar for a documentation run.
///
/// When stdout is not a TTY (piped output, CI environments) a hidden bar is
/// returned so non-interactive output stays clean.
#[must_use]
pub fn create_progress_bar(len: u64) -> ProgressBar {
    if !Term::stdout().is_term() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|e| {
            tracing::warn!("Failed to parse progress bar template: {e}");
            ProgressStyle::default_bar()
        })
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}
