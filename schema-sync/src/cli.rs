///
/// This module implements the CLI interface for schema-sync: argument parsing,
/// config layering and printing the run summary.
///
/// All pipeline logic (subprocesses, filesystem bookkeeping, index synthesis)
/// lives in the [`schema-sync-core`] crate. This module is strictly CLI glue.
///
/// ## How To Use
/// - From a shell: run `schema-sync` in the repository root. With no
///   arguments it performs a full `sync` using the built-in defaults.
/// - Programmatically or from tests: call [`run`] with a constructed [`Cli`].
///
/// ## Config layering
/// Built-in defaults, then the YAML file given with `--config`, then
/// command-line flags.
///
/// ## Output
/// Tracing goes to stderr. Stdout carries the banner and summary, or with
/// `--json` nothing but the report; child stdout is moved to stderr then.
///
/// [`schema-sync-core`]: ../../schema-sync-core/
use crate::load_config::load_config;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use schema_sync_core::command::{ChildStdout, SystemRunner};
use schema_sync_core::config::SyncConfig;
use schema_sync_core::synchronise::{synchronise, SyncReport};
use std::path::PathBuf;

/// CLI for schema-sync: refresh schemas, regenerate bindings, write the index.
#[derive(Parser)]
#[clap(
    name = "schema-sync",
    version,
    about = "Refresh the schema checkout, run the schema compiler and index the generated bindings"
)]
pub struct Cli {
    /// Path to a YAML config file
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    /// Repository root; defaults to the current directory
    #[clap(long, global = true)]
    pub root: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the whole pipeline (the default when no subcommand is given)
    Sync {
        /// Do not probe for or install the schema compiler
        #[clap(long)]
        skip_bootstrap: bool,
        /// Do not touch git
        #[clap(long)]
        skip_refresh: bool,
        /// Print the run report as JSON
        #[clap(long)]
        json: bool,
    },
    /// Rewrite the index from the files already in the output directory
    Index,
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SyncConfig::default(),
    };
    if let Some(root) = cli.root {
        config.root = root;
    }

    match cli.command.unwrap_or(Commands::Sync {
        skip_bootstrap: false,
        skip_refresh: false,
        json: false,
    }) {
        Commands::Sync {
            skip_bootstrap,
            skip_refresh,
            json,
        } => {
            config.skip_bootstrap |= skip_bootstrap;
            config.skip_refresh |= skip_refresh;
            config.trace_loaded();
            tracing::info!(command = "sync", "Starting synchronisation");
            let runner = if json {
                SystemRunner::new(ChildStdout::Stderr)
            } else {
                println!("Synchronise starting...");
                SystemRunner::default()
            };
            match synchronise(&config, &runner).await {
                Ok(report) => {
                    tracing::info!(command = "sync", ?report, "Synchronisation complete");
                    if json {
                        let out = serde_json::to_string_pretty(&report)
                            .context("Failed to serialise report")?;
                        println!("{out}");
                    } else {
                        print_summary(&report);
                    }
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(command = "sync", error = %e, "Synchronisation failed");
                    eprintln!("[ERROR] Synchronisation failed: {e}");
                    Err(anyhow::Error::new(e))
                }
            }
        }
        Commands::Index => {
            config.trace_loaded();
            let written = schema_sync_core::index::synthesise(&config)
                .context("Failed to write index")?;
            println!(
                "Wrote {} ({} exports)",
                written.path.display(),
                written.exports.len()
            );
            Ok(())
        }
    }
}

fn print_summary(report: &SyncReport) {
    println!("Synchronise complete.");
    for phase in &report.phases {
        println!("  {:<10} {:?}", phase.phase.to_string(), phase.status);
    }
    println!(
        "Wrote {} ({} exports)",
        report.index_path.display(),
        report.exports.len()
    );
    let failed = report.failed_phases();
    if !failed.is_empty() {
        let names: Vec<String> = failed.iter().map(ToString::to_string).collect();
        println!("Failed phases: {}", names.join(", "));
    }
}
