//! Archive management for pre-documentation file content.
//!
//! Before a source file is overwritten with documented content, a byte-for-byte
//! copy is written next to it with a `_doc_archive` marker in the file stem
//! (`main.py` -> `main_doc_archive.py`). Archives are only ever removed by the
//! explicit bulk delete operation.

use crate::utils::error::DocsmithError;
use crate::walker::SourceWalker;
use std::path::{Path, PathBuf};

/// Marker appended to the file stem of archived files.
pub const ARCHIVE_SUFFIX: &str = "_doc_archive";

/// Result of a bulk archive deletion.
#[derive(Debug, Default)]
pub struct DeleteReport {
    /// Number of archive files actually deleted.
    pub deleted: usize,
    /// Archives that could not be deleted, with the failure reason.
    pub failed: Vec<(PathBuf, String)>,
}

/// Creates, enumerates, and deletes archive files.
#[derive(Debug, Default, Clone)]
pub struct ArchiveManager;

impl ArchiveManager {
    pub fn new() -> Self {
        Self
    }

    /// Derive the archive path for a source file.
    ///
    /// The derivation is deterministic: the marker goes between the stem and
    /// the extension, in the same directory as the source.
    pub fn archive_path_for(path: &Path) -> PathBuf {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let archive_name = match path.extension() {
            Some(ext) => format!("{}{}.{}", stem, ARCHIVE_SUFFIX, ext.to_string_lossy()),
            None => format!("{}{}", stem, ARCHIVE_SUFFIX),
        };

        path.with_file_name(archive_name)
    }

    /// Whether a path names an archive file.
    pub fn is_archive(path: &Path) -> bool {
        path.file_stem()
            .map(|s| s.to_string_lossy().ends_with(ARCHIVE_SUFFIX))
            .unwrap_or(false)
    }

    /// Copy `path` to its derived archive path and return that path.
    ///
    /// An existing archive for the same source is overwritten, which makes
    /// repeated runs idempotent with respect to archiving.
    pub fn archive(&self, path: &Path) -> Result<PathBuf, DocsmithError> {
        let archive_path = Self::archive_path_for(path);

        std::fs::copy(path, &archive_path).map_err(|e| {
            DocsmithError::FileSystem(std::io::Error::new(
                e.kind(),
                format!("Failed to archive {}: {}", path.display(), e),
            ))
        })?;

        tracing::debug!(
            "Archived {} -> {}",
            path.display(),
            archive_path.display()
        );

        Ok(archive_path)
    }

    /// Enumerate all archive files under `root`, recursively.
    ///
    /// The sequence is lazy and restartable; order follows the walker's
    /// lexicographic traversal.
    pub fn list_archives(
        &self,
        root: &Path,
    ) -> Result<impl Iterator<Item = PathBuf>, DocsmithError> {
        let walker = SourceWalker::new(root, &[], &[])?;
        Ok(walker.into_files().filter(|p| Self::is_archive(p)))
    }

    /// Delete every archive under `root`, best effort.
    ///
    /// Per-file deletion failures are recorded in the report and logged, but
    /// do not abort the remaining deletions.
    pub fn delete_archives(&self, root: &Path) -> Result<DeleteReport, DocsmithError> {
        let mut report = DeleteReport::default();

        for path in self.list_archives(root)? {
            match std::fs::remove_file(&path) {
                Ok(()) => {
                    tracing::debug!("Deleted archive {}", path.display());
                    report.deleted += 1;
                }
                Err(e) => {
                    tracing::warn!("Failed to delete archive {}: {}", path.display(), e);
                    report.failed.push((path, e.to_string()));
                }
            }
        }

        Ok(report)
    }
}
