//! CLI for the benchmark dashboard.
//!
//! This crate provides the `bench-dashboard` command: aggregation of run
//! files, static chart rendering for a single result directory, and
//! markdown summaries.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use anyhow::Context;
use bench_dashboard_charts::{build_charts, html, ChartOptions, TickPolicy};
use bench_dashboard_results::{aggregate, cache_path, list_result_directories, load, markdown};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Default name of the rendered page inside the result directory.
pub const DEFAULT_PAGE_FILE: &str = "benchmark_charts.html";

/// Benchmark dashboard CLI.
#[derive(Parser, Debug)]
#[command(name = "bench-dashboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Aggregate every `*.bench.json` file of a result directory into
    /// `benchmark_results.csv`, replacing any existing aggregate.
    Aggregate {
        /// Result directory.
        directory: PathBuf,
    },

    /// Render the time and residual charts of one result directory.
    ///
    /// Fails if the result set cannot be loaded.
    Render {
        /// Result directory.
        directory: PathBuf,

        /// Output file (default: <DIRECTORY>/benchmark_charts.html, or stdout with --json).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit the chart specifications as JSON instead of an HTML page.
        #[arg(long)]
        json: bool,

        /// Do not generate the aggregate from run files when it is missing.
        #[arg(long)]
        no_generate: bool,

        /// Fixed x-axis tick positions (comma separated). Defaults to the batch sizes present.
        #[arg(long, value_delimiter = ',')]
        ticks: Vec<u64>,
    },

    /// Print a markdown summary of one result directory.
    Summary {
        /// Result directory.
        directory: PathBuf,

        /// Show one section per solver instead of a single table.
        #[arg(short, long)]
        detailed: bool,

        /// Do not generate the aggregate from run files when it is missing.
        #[arg(long)]
        no_generate: bool,
    },

    /// List the result directories under a base directory.
    List {
        /// Base benchmark directory.
        #[arg(default_value = "benchmark")]
        base: PathBuf,
    },
}

/// Install the tracing subscriber. `RUST_LOG` takes precedence.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the CLI with the process arguments.
///
/// # Returns
///
/// Returns `Ok(())` on success, or an error if the command fails.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    execute(cli)
}

/// Execute a parsed command line.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Aggregate { directory } => {
            let results = aggregate(&directory)
                .with_context(|| format!("failed to aggregate {}", directory.display()))?;
            println!(
                "{} {} runs into {}",
                "Aggregated".green().bold(),
                results.len(),
                cache_path(&directory).display()
            );
            Ok(())
        }
        Commands::Render {
            directory,
            output,
            json,
            no_generate,
            ticks,
        } => {
            let options = ChartOptions {
                tick_policy: TickPolicy::from_config(Some(ticks)),
            };
            let rendered = render(&directory, &options, json, !no_generate)?;

            match output {
                None if json => {
                    println!("{}", rendered);
                }
                output => {
                    let path = output.unwrap_or_else(|| directory.join(DEFAULT_PAGE_FILE));
                    fs::write(&path, rendered)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("{} {}", "Rendered".green().bold(), path.display());
                }
            }
            Ok(())
        }
        Commands::Summary {
            directory,
            detailed,
            no_generate,
        } => {
            let results = load(&directory, !no_generate)
                .with_context(|| format!("failed to load {}", directory.display()))?;
            let name = directory_label(&directory);
            let report = if detailed {
                markdown::generate_solver_report(&name, &results)
            } else {
                markdown::generate_summary(&name, &results)
            };
            print!("{}", report);
            Ok(())
        }
        Commands::List { base } => {
            let names = list_result_directories(&base)
                .with_context(|| format!("failed to list {}", base.display()))?;
            if cli.verbose {
                println!("{} result directories in {}", names.len(), base.display());
            }
            for name in names {
                let cached = cache_path(base.join(&name)).exists();
                let marker = if cached {
                    "cached".green()
                } else {
                    "raw".yellow()
                };
                println!("  - {} [{}]", name, marker);
            }
            Ok(())
        }
    }
}

/// Load one result directory and render its charts as HTML or JSON.
///
/// The result set is loaded once here and handed to the chart builder;
/// any load failure is returned to the caller.
pub fn render(
    directory: &Path,
    options: &ChartOptions,
    json: bool,
    generate_if_missing: bool,
) -> anyhow::Result<String> {
    let results = load(directory, generate_if_missing)
        .with_context(|| format!("failed to load {}", directory.display()))?;
    info!(
        directory = %directory.display(),
        records = results.len(),
        "Result set loaded"
    );

    let charts = build_charts(&results, options);
    let rendered = if json {
        serde_json::to_string_pretty(&charts)?
    } else {
        let title = format!("Benchmark Results: {}", directory_label(directory));
        html::static_page(&title, &charts)?
    };
    Ok(rendered)
}

fn directory_label(directory: &Path) -> String {
    directory
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| directory.display().to_string())
}
