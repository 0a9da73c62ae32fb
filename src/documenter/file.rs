//! Single-file documentation workflow.
//!
//! The ordering here is the crash-safety contract: the completion call happens
//! before any filesystem mutation, the archive is written before the source is
//! overwritten, and a failure at any step leaves the original file intact.

use crate::archive::ArchiveManager;
use crate::llm::CompletionClient;
use crate::utils::error::DocsmithError;
use crate::walker::detect_language;
use std::path::{Path, PathBuf};

/// Why a file was skipped rather than documented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Extension is not a recognized source language.
    NotSource,
    /// File exists but has no content.
    Empty,
    /// File is itself an archive.
    Archive,
    /// An archive already exists and the policy is to skip documented files.
    AlreadyDocumented,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NotSource => write!(f, "not a recognized source file"),
            SkipReason::Empty => write!(f, "file is empty"),
            SkipReason::Archive => write!(f, "file is an archive"),
            SkipReason::AlreadyDocumented => write!(f, "archive already exists"),
        }
    }
}

/// Outcome of documenting one file.
#[derive(Debug)]
pub enum DocumentOutcome {
    /// File was archived and overwritten with documented content.
    Documented { archive_path: PathBuf },
    /// File was not eligible; nothing on disk changed.
    Skipped(SkipReason),
    /// Something failed; the original file survives untouched except in the
    /// write step, where the archive already preserves its content.
    Failed(DocsmithError),
}

/// What to do when a file's archive already exists from a previous run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RedocumentPolicy {
    /// Re-document the file and overwrite its archive.
    #[default]
    Overwrite,
    /// Treat the file as already documented and skip it.
    Skip,
}

impl std::str::FromStr for RedocumentPolicy {
    type Err = DocsmithError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overwrite" => Ok(RedocumentPolicy::Overwrite),
            "skip" => Ok(RedocumentPolicy::Skip),
            other => Err(DocsmithError::ValidationError {
                message: format!("Invalid redocument policy: '{}'", other),
                suggestion: "Valid policies are: overwrite, skip".to_string(),
            }),
        }
    }
}

/// Documents one file at a time against an injected completion client.
pub struct FileDocumenter<'a> {
    client: &'a CompletionClient,
    archives: ArchiveManager,
    policy: RedocumentPolicy,
}

impl<'a> FileDocumenter<'a> {
    pub fn new(client: &'a CompletionClient) -> Self {
        Self {
            client,
            archives: ArchiveManager::new(),
            policy: RedocumentPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RedocumentPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Document the file at `path`.
    ///
    /// Errors never propagate past this boundary; they come back as
    /// [`DocumentOutcome::Failed`] so a directory run can aggregate them.
    pub async fn document(&self, path: &Path) -> DocumentOutcome {
        match self.try_document(path).await {
            Ok(outcome) => outcome,
            Err(e) => DocumentOutcome::Failed(e),
        }
    }

    async fn try_document(&self, path: &Path) -> Result<DocumentOutcome, DocsmithError> {
        if ArchiveManager::is_archive(path) {
            return Ok(DocumentOutcome::Skipped(SkipReason::Archive));
        }

        let Some(language) = detect_language(path) else {
            return Ok(DocumentOutcome::Skipped(SkipReason::NotSource));
        };

        if self.policy == RedocumentPolicy::Skip
            && ArchiveManager::archive_path_for(path).exists()
        {
            return Ok(DocumentOutcome::Skipped(SkipReason::AlreadyDocumented));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            DocsmithError::FileSystem(std::io::Error::new(
                e.kind(),
                format!("Failed to read {}: {}", path.display(), e),
            ))
        })?;

        if content.trim().is_empty() {
            return Ok(DocumentOutcome::Skipped(SkipReason::Empty));
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        // Completion first: a failed call must not archive or touch the file.
        let documented = self
            .client
            .document_source(&content, &file_name, Some(language))
            .await?;

        // Archive before overwrite. If archiving fails the original survives.
        let archive_path = self.archives.archive(path)?;

        std::fs::write(path, &documented).map_err(|e| {
            DocsmithError::FileSystem(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to write {} (original preserved at {}): {}",
                    path.display(),
                    archive_path.display(),
                    e
                ),
            ))
        })?;

        tracing::info!(
            "Documented {} (original archived at {})",
            path.display(),
            archive_path.display()
        );

        Ok(DocumentOutcome::Documented { archive_path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redocument_policy_parsing() {
        assert_eq!(
            "overwrite".parse::<RedocumentPolicy>().unwrap(),
            RedocumentPolicy::Overwrite
        );
        assert_eq!(
            "skip".parse::<RedocumentPolicy>().unwrap(),
            RedocumentPolicy::Skip
        );
        assert!("retry".parse::<RedocumentPolicy>().is_err());
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::Empty.to_string(), "file is empty");
        assert_eq!(SkipReason::Archive.to_string(), "file is an archive");
    }
}
