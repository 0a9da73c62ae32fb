use anyhow::Result;
use docsmith::cli::args::{self, Command};
use docsmith::cli::config;
use docsmith::utils::error::{DocsmithError, format_error};

#[tokio::main]
async fn main() {
    // Try to determine verbose mode early for better error formatting
    // Default to false for early errors (before config is parsed)
    let verbose = std::env::args().any(|arg| arg == "-v" || arg == "--verbose");

    if let Err(e) = run_main().await {
        display_error(&e, verbose);
        std::process::exit(1);
    }
}

/// Display an error with contextual formatting.
///
/// Tries to downcast to `DocsmithError` for rich formatting, falls back to
/// anyhow's error chain display for other errors.
fn display_error(error: &anyhow::Error, verbose: bool) {
    if let Some(docsmith_error) = error.downcast_ref::<DocsmithError>() {
        eprintln!("{}", format_error(docsmith_error, verbose));
    } else {
        eprintln!("\n\u{26a0} Error: {}", error);

        let causes: Vec<_> = error.chain().skip(1).collect();
        if !causes.is_empty() {
            eprintln!("\nCaused by:");
            for (i, cause) in causes.iter().enumerate() {
                let prefix = if i == causes.len() - 1 {
                    "\u{2514}\u{2500}"
                } else {
                    "\u{251c}\u{2500}"
                };
                eprintln!("{} {}", prefix, cause);
            }
        }
    }
}

async fn run_main() -> Result<()> {
    // Parse CLI arguments (includes env vars)
    let args = args::parse();

    docsmith::init_logging(args.verbose);
    let verbose = args.verbose;
    let quiet = args.quiet;

    // Load config from files + env vars (already merged)
    let config = config::load(&args)?;

    match args.command {
        Command::Generate {
            path,
            provider,
            model,
            include,
            exclude,
            skip_documented,
            dry_run,
        } => {
            let merged = docsmith::merge_generate_config(
                &config,
                path,
                provider,
                model,
                include,
                exclude,
                skip_documented,
                dry_run,
                verbose,
                quiet,
            )?;

            docsmith::run(merged).await
        }
        Command::Clean { path } => docsmith::run_clean(&path, quiet),
    }
}
