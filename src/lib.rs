//! # docsmith
//!
//! docsmith walks a directory tree of source files, sends each file's content
//! to an external language-model completion endpoint, and rewrites the file
//! with generated documentation comments, after archiving the original
//! content next to it.
//!
//! ## Workflow
//!
//! 1. **Discovery** - Deterministic recursive walk of the target directory
//! 2. **Eligibility** - Source-file check (recognized language, non-empty,
//!    not an archive)
//! 3. **Completion** - One LLM call per file, no retries
//! 4. **Archive** - Byte-for-byte copy of the original next to the source
//! 5. **Write** - Overwrite the source with the documented content
//!
//! The ordering of steps 3-5 is the crash-safety contract: a failed completion
//! touches nothing, and a source file is never overwritten before its archive
//! exists. Per-file failures are aggregated into a [`documenter::RunReport`];
//! one file's failure never halts the run.
//!
//! Configuration follows hierarchical precedence:
//! 1. User config (~/.config/docsmith/config.toml)
//! 2. Git root (docsmith.toml)
//! 3. Current directory (docsmith.toml)
//! 4. Explicit --config path
//! 5. Environment variables (DOCSMITH_*)
//! 6. CLI flags (highest precedence)

pub mod archive;
pub mod cli;
pub mod documenter;
pub mod llm;
pub mod utils;
pub mod walker;

use anyhow::{Context, Result};
use archive::ArchiveManager;
use cli::config::Config;
use documenter::{
    DirectoryDocumenter, DocumentOutcome, FileDocumenter, RedocumentPolicy, RunOptions,
    RunReport,
};
use llm::CompletionClient;
use std::path::PathBuf;
use std::time::Instant;
use walker::{SourceWalker, detect_language};

/// Final resolved configuration for a generate run after merging CLI flags,
/// environment variables, and config files.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    /// LLM provider (e.g., "openai", "anthropic")
    pub provider: String,
    /// Model name (optional, provider has a default)
    pub model: Option<String>,
    /// File or directory to document
    pub path: PathBuf,
    /// File include patterns
    pub include: Vec<String>,
    /// File exclude patterns
    pub exclude: Vec<String>,
    /// Policy for files whose archive already exists
    pub policy: RedocumentPolicy,
    /// Dry run mode (list files, no LLM calls)
    pub dry_run: bool,
    /// Verbosity level (0-3)
    pub verbose: u8,
    /// Quiet mode (suppress summary output)
    pub quiet: bool,
}

/// Merge CLI flags over file/env configuration for a generate run.
/// CLI values win whenever they are present.
#[allow(clippy::too_many_arguments)]
pub fn merge_generate_config(
    config: &Config,
    path: PathBuf,
    provider: Option<String>,
    model: Option<String>,
    include: Vec<String>,
    exclude: Vec<String>,
    skip_documented: bool,
    dry_run: bool,
    verbose: u8,
    quiet: bool,
) -> Result<MergedConfig> {
    let provider = provider.unwrap_or_else(|| config.general.provider.clone());

    let model = model
        .or_else(|| config.model_for_provider(&provider))
        .or_else(|| config.general.model.clone());

    let policy = if skip_documented {
        RedocumentPolicy::Skip
    } else {
        config
            .general
            .redocument
            .parse::<RedocumentPolicy>()
            .context("Invalid redocument policy in configuration")?
    };

    let include = if include.is_empty() {
        config.include.patterns.clone()
    } else {
        include
    };
    let exclude = if exclude.is_empty() {
        config.exclude.patterns.clone()
    } else {
        exclude
    };

    Ok(MergedConfig {
        provider,
        model,
        path,
        include,
        exclude,
        policy,
        dry_run,
        verbose,
        quiet,
    })
}

/// Initialize logging based on verbosity level.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .init();
}

/// Run a documentation generate pass over the configured path.
pub async fn run(config: MergedConfig) -> Result<()> {
    tracing::info!("docsmith v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!(
        "Configuration: provider={}, model={:?}, path={}, policy={:?}",
        config.provider,
        config.model,
        config.path.display(),
        config.policy
    );

    if !config.path.exists() {
        return Err(anyhow::anyhow!(
            "Path does not exist: {}",
            config.path.display()
        ))
        .context("Failed to validate target path");
    }

    if config.dry_run {
        return display_dry_run(&config);
    }

    let client = CompletionClient::for_provider(&config.provider, config.model.clone())
        .context("Failed to construct completion client")?;
    tracing::info!(
        "Using provider {} with model {}",
        client.provider_name(),
        client.model()
    );

    let started = Instant::now();

    let report = if config.path.is_file() {
        document_single_file(&client, &config).await
    } else {
        let options = RunOptions {
            include: config.include.clone(),
            exclude: config.exclude.clone(),
            policy: config.policy,
            show_progress: !config.quiet,
        };
        DirectoryDocumenter::new(&client, options)
            .generate(&config.path)
            .await?
    };

    utils::summary::display_run_summary(&report, started.elapsed(), config.quiet)?;

    Ok(())
}

/// Document one explicitly named file.
async fn document_single_file(client: &CompletionClient, config: &MergedConfig) -> RunReport {
    let documenter = FileDocumenter::new(client).with_policy(config.policy);

    let mut report = RunReport::default();
    match documenter.document(&config.path).await {
        DocumentOutcome::Documented { .. } => report.documented += 1,
        DocumentOutcome::Skipped(reason) => {
            tracing::info!("Skipped {}: {}", config.path.display(), reason);
            report.skipped += 1;
        }
        DocumentOutcome::Failed(e) => {
            tracing::warn!("Failed to document {}: {}", config.path.display(), e);
            report.failed.push((config.path.clone(), e.to_string()));
        }
    }
    report
}

/// Delete archive files under `path` and display the result.
pub fn run_clean(path: &PathBuf, quiet: bool) -> Result<()> {
    if !path.exists() {
        return Err(anyhow::anyhow!("Path does not exist: {}", path.display()))
            .context("Failed to validate target path");
    }

    let report = ArchiveManager::new()
        .delete_archives(path)
        .context("Failed to delete archives")?;

    utils::summary::display_clean_summary(&report, quiet)?;
    Ok(())
}

/// List the files a generate run would document, without calling the LLM.
fn display_dry_run(config: &MergedConfig) -> Result<()> {
    println!("Dry Run Mode - no LLM calls will be made");
    println!("========================================");
    println!("Provider:   {}", config.provider);
    println!(
        "Model:      {}",
        config.model.as_deref().unwrap_or("default")
    );
    println!("Path:       {}", config.path.display());
    println!();

    let mut eligible = 0usize;
    if config.path.is_file() {
        if would_document(&config.path) {
            println!("{}", config.path.display());
            eligible += 1;
        }
    } else {
        let walker = SourceWalker::new(&config.path, &config.include, &config.exclude)?;
        for path in walker.files() {
            if would_document(&path) {
                println!("{}", path.display());
                eligible += 1;
            }
        }
    }

    println!();
    println!("{} file(s) would be documented.", eligible);
    Ok(())
}

/// Cheap eligibility check for dry-run listings. Skips the emptiness check,
/// which would require reading every file.
fn would_document(path: &std::path::Path) -> bool {
    !ArchiveManager::is_archive(path) && detect_language(path).is_some()
}
