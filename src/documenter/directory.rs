//! Directory-level documentation runs.
//!
//! Files are processed strictly sequentially in the walker's deterministic
//! order; one file's failure never halts the rest of the run. The only state
//! shared across files is the aggregate report.

use crate::archive::{ArchiveManager, DeleteReport};
use crate::documenter::file::{DocumentOutcome, FileDocumenter, RedocumentPolicy};
use crate::llm::CompletionClient;
use crate::utils::error::DocsmithError;
use crate::utils::progress::create_progress_bar;
use crate::walker::SourceWalker;
use std::path::{Path, PathBuf};

/// Aggregate outcome of a directory run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Files successfully archived and overwritten.
    pub documented: usize,
    /// Files not eligible for documentation.
    pub skipped: usize,
    /// Files that failed, with the failure reason.
    pub failed: Vec<(PathBuf, String)>,
}

impl RunReport {
    /// Total number of files visited.
    pub fn total(&self) -> usize {
        self.documented + self.skipped + self.failed.len()
    }
}

/// Options controlling a directory run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub policy: RedocumentPolicy,
    pub show_progress: bool,
}

/// Documents every eligible file under a root directory.
pub struct DirectoryDocumenter<'a> {
    client: &'a CompletionClient,
    archives: ArchiveManager,
    options: RunOptions,
}

impl<'a> DirectoryDocumenter<'a> {
    pub fn new(client: &'a CompletionClient, options: RunOptions) -> Self {
        Self {
            client,
            archives: ArchiveManager::new(),
            options,
        }
    }

    /// Recursively document all eligible files under `root`.
    ///
    /// Per-file outcomes are aggregated into the report; nothing short of a
    /// walker setup error aborts the run.
    pub async fn generate(&self, root: &Path) -> Result<RunReport, DocsmithError> {
        let walker = SourceWalker::new(root, &self.options.include, &self.options.exclude)?;

        // Materialize the file list up front so the progress bar has a total.
        let files: Vec<PathBuf> = walker.files().collect();
        tracing::info!("Found {} files under {}", files.len(), root.display());

        let documenter =
            FileDocumenter::new(self.client).with_policy(self.options.policy);

        let progress = if self.options.show_progress {
            create_progress_bar(files.len() as u64)
        } else {
            indicatif::ProgressBar::hidden()
        };

        let mut report = RunReport::default();

        for path in files {
            progress.set_message(
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            );

            match documenter.document(&path).await {
                DocumentOutcome::Documented { .. } => report.documented += 1,
                DocumentOutcome::Skipped(reason) => {
                    tracing::debug!("Skipped {}: {}", path.display(), reason);
                    report.skipped += 1;
                }
                DocumentOutcome::Failed(e) => {
                    tracing::warn!("Failed to document {}: {}", path.display(), e);
                    report.failed.push((path, e.to_string()));
                }
            }

            progress.inc(1);
        }

        progress.finish_and_clear();

        Ok(report)
    }

    /// Delete every archive file under `root`. Pass-through to the archive
    /// manager.
    pub fn delete_archives(&self, root: &Path) -> Result<DeleteReport, DocsmithError> {
        self.archives.delete_archives(root)
    }
}
