//! Deterministic source file discovery.
//!
//! The walker is decoupled from the documentation logic so traversal can be
//! tested in isolation against a synthetic directory tree. Each call to
//! [`SourceWalker::files`] restarts the traversal from the root, yielding a
//! lazy, finite sequence in lexicographic order.

use crate::utils::error::DocsmithError;
use globset::{GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Languages the documenter recognizes as source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    TypeScript,
    JavaScript,
    Python,
    Rust,
    Go,
    Java,
    C,
    Cpp,
    Ruby,
    Php,
}

impl Language {
    /// Human-readable name, used when prompting the model.
    pub fn name(self) -> &'static str {
        match self {
            Language::TypeScript => "TypeScript",
            Language::JavaScript => "JavaScript",
            Language::Python => "Python",
            Language::Rust => "Rust",
            Language::Go => "Go",
            Language::Java => "Java",
            Language::C => "C",
            Language::Cpp => "C++",
            Language::Ruby => "Ruby",
            Language::Php => "PHP",
        }
    }
}

/// Detect programming language from file extension.
pub fn detect_language(path: &Path) -> Option<Language> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext_str| match ext_str {
            "ts" | "tsx" => Some(Language::TypeScript),
            "js" | "jsx" => Some(Language::JavaScript),
            "py" => Some(Language::Python),
            "rs" => Some(Language::Rust),
            "go" => Some(Language::Go),
            "java" => Some(Language::Java),
            "c" | "h" => Some(Language::C),
            "cpp" | "hpp" | "cc" | "cxx" => Some(Language::Cpp),
            "rb" => Some(Language::Ruby),
            "php" => Some(Language::Php),
            _ => None,
        })
}

/// Build a GlobSet from a list of patterns.
fn build_globset(patterns: &[String]) -> Result<GlobSet, DocsmithError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = globset::Glob::new(pattern).map_err(|e| {
            DocsmithError::Config(format!("Invalid glob pattern '{}': {}", pattern, e))
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| DocsmithError::Config(format!("Failed to build glob set: {}", e)))
}

/// Normalize path to a forward-slash separated string for glob matching.
fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Restartable recursive file walker with include/exclude pattern matching.
#[derive(Clone)]
pub struct SourceWalker {
    root: PathBuf,
    include: Vec<String>,
    include_set: GlobSet,
    exclude_set: GlobSet,
}

impl SourceWalker {
    pub fn new(
        root: impl AsRef<Path>,
        include: &[String],
        exclude: &[String],
    ) -> Result<Self, DocsmithError> {
        Ok(Self {
            root: root.as_ref().to_path_buf(),
            include: include.to_vec(),
            include_set: build_globset(include)?,
            exclude_set: build_globset(exclude)?,
        })
    }

    /// Walk the tree, yielding file paths lazily in lexicographic order.
    ///
    /// Honors `.gitignore`, skips directories and symlinks, and applies the
    /// include/exclude patterns. Unreadable entries are logged and skipped so
    /// one bad entry never aborts the traversal. Each call restarts the walk.
    pub fn files(&self) -> impl Iterator<Item = PathBuf> + 'static {
        self.clone().into_files()
    }

    /// Owning variant of [`SourceWalker::files`], for callers that need to
    /// hand the sequence off without borrowing the walker.
    pub fn into_files(self) -> impl Iterator<Item = PathBuf> {
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        walker.filter_map(move |result| {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Error walking directory: {}", e);
                    return None;
                }
            };

            if !entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
                return None;
            }

            let path = entry.path();
            if entry.path_is_symlink() {
                tracing::debug!("Skipping symlink: {}", path.display());
                return None;
            }

            let normalized = normalize_path(path);

            // Include patterns: if set is non-empty, require a match
            if !self.include.is_empty() && !self.include_set.is_match(&normalized) {
                return None;
            }
            if self.exclude_set.is_match(&normalized) {
                return None;
            }

            Some(path.to_path_buf())
        })
    }
}
