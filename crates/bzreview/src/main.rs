mod config;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::{Serialize, Serializer};
use tracing::debug;

use bzreview_bzr::{Bzr, DEFAULT_BINARY};
use bzreview_core::{DiffOrchestrator, RepositoryInfo, ReviewRequestOptions};
use bzreview_logging::{init_tracing, LogFormat};
use bzreview_process::SystemRunner;

use crate::config::ProjectConfig;

/// Environment variable consulted when no review server is configured
const SERVER_URL_ENV: &str = "REVIEWBOARD_URL";

#[derive(Parser, Debug)]
#[command(
    name = "bzreview",
    about = "Review-ready diffs and changelogs from Bazaar branches",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Working directory (default: current directory)
    #[arg(short = 'd', long, global = true)]
    working_dir: Option<PathBuf>,

    /// Path to the bzr executable
    #[arg(long, global = true)]
    bzr: Option<String>,

    /// Repository location to use instead of the submit branch or parent
    #[arg(long, global = true)]
    repository_url: Option<String>,

    /// Branch to diff against instead of the submit branch
    #[arg(long = "parent", global = true)]
    parent_branch: Option<String>,

    /// Guess the summary from the latest commit message
    #[arg(long, global = true)]
    guess_summary: bool,

    /// Guess the description from the changelog
    #[arg(long, global = true)]
    guess_description: bool,

    /// Shorthand for --guess-summary --guess-description
    #[arg(short = 'g', long, global = true)]
    guess_fields: bool,

    /// Summary to use instead of guessing
    #[arg(long, global = true)]
    summary: Option<String>,

    /// Description to use instead of guessing
    #[arg(long, global = true)]
    description: Option<String>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value = "compact", global = true)]
    log_format: LogFormatChoice,

    /// Output the result as JSON
    #[arg(long, global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the repository this branch will be reviewed against
    Info,
    /// Show the review server URL
    Server,
    /// Diff the branch against its parent or submit branch
    Diff {
        /// Limit the diff to these files
        files: Vec<String>,
    },
    /// Diff an explicit revision range such as 10..12
    DiffRange {
        /// Two revisions separated by '..'
        range: String,
        /// Limit the diff to these files
        files: Vec<String>,
    },
    /// Show the changelog of outgoing revisions
    Changelog,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatChoice {
    Pretty,
    Json,
    Compact,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Pretty => LogFormat::Pretty,
            LogFormatChoice::Json => LogFormat::Json,
            LogFormatChoice::Compact => LogFormat::Compact,
        }
    }
}

/// What a diff command hands back to the caller
#[derive(Debug, Serialize)]
struct DiffReport {
    repository: RepositoryInfo,
    /// Raw patch bytes; only the JSON rendering decodes them
    #[serde(serialize_with = "serialize_lossy")]
    diff: Option<Vec<u8>>,
    #[serde(serialize_with = "serialize_lossy")]
    parent_diff: Option<Vec<u8>>,
    summary: Option<String>,
    description: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_format.into());

    let working_dir = match cli.working_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    let config = ProjectConfig::load(&working_dir)?;
    debug!(
        working_dir = %working_dir.display(),
        project_config = config.is_some(),
        "Resolved working directory"
    );
    let config = config.unwrap_or_default();

    let mut options = build_options(&cli, &config);
    let binary = cli
        .bzr
        .clone()
        .or_else(|| config.bzr.clone())
        .unwrap_or_else(|| DEFAULT_BINARY.to_string());
    let runner = SystemRunner::new().with_working_dir(working_dir);
    let orchestrator = DiffOrchestrator::new(Bzr::new(runner).with_binary(binary));

    match cli.command {
        Command::Info => {
            let info = require_repository(&orchestrator, &options)?;
            if cli.json_output {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                print_repository(&info);
            }
        }
        Command::Server => {
            let info = require_repository(&orchestrator, &options)?;
            let url = orchestrator
                .scan_for_server(&info, |_| {
                    config
                        .reviewboard_url
                        .clone()
                        .or_else(|| std::env::var(SERVER_URL_ENV).ok())
                })?
                .context("No review server configured. Set reviewboard_url with `bzr config`")?;
            println!("{}", url);
        }
        Command::Diff { ref files } => {
            let info = require_repository(&orchestrator, &options)?;
            let result = orchestrator.diff(files, &mut options)?;
            emit_diff(
                &cli,
                DiffReport {
                    repository: info,
                    diff: result.unified_diff,
                    parent_diff: result.parent_diff,
                    summary: options.summary,
                    description: options.description,
                },
            )?;
        }
        Command::DiffRange {
            ref range,
            ref files,
        } => {
            let info = require_repository(&orchestrator, &options)?;
            let diff = orchestrator.diff_between_revisions(range, files, &info, &mut options)?;
            emit_diff(
                &cli,
                DiffReport {
                    repository: info,
                    diff,
                    parent_diff: None,
                    summary: options.summary,
                    description: options.description,
                },
            )?;
        }
        Command::Changelog => {
            let changelog = orchestrator.outgoing_changelog(&options)?;
            if cli.json_output {
                println!("{}", serde_json::json!({ "changelog": changelog }));
            } else {
                println!("{}", changelog);
            }
        }
    }

    Ok(())
}

/// Merge CLI flags over the project config
fn build_options(cli: &Cli, config: &ProjectConfig) -> ReviewRequestOptions {
    ReviewRequestOptions {
        parent_branch: cli
            .parent_branch
            .clone()
            .or_else(|| config.parent_branch.clone()),
        guess_summary: cli.guess_summary
            || cli.guess_fields
            || config.guess_summary.unwrap_or(false),
        guess_description: cli.guess_description
            || cli.guess_fields
            || config.guess_description.unwrap_or(false),
        summary: cli.summary.clone(),
        description: cli.description.clone(),
        repository_url: cli.repository_url.clone(),
    }
}

fn require_repository(
    orchestrator: &DiffOrchestrator<SystemRunner>,
    options: &ReviewRequestOptions,
) -> Result<RepositoryInfo> {
    orchestrator.repository_info(options)?.context(
        "No Bazaar branch found. Is bzr installed and does the branch have a submit branch or parent?",
    )
}

fn serialize_lossy<S>(bytes: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    bytes
        .as_deref()
        .map(String::from_utf8_lossy)
        .serialize(serializer)
}

fn print_repository(info: &RepositoryInfo) {
    println!("{} {}", "Repository:".bold(), info.path);
    println!("{} {}", "Base path:".bold(), info.base_path);
    println!(
        "{} {}",
        "Parent diffs:".bold(),
        if info.supports_parent_diffs { "yes" } else { "no" }
    );
}

fn emit_diff(cli: &Cli, report: DiffReport) -> Result<()> {
    if !cli.json_output {
        if let Some(ref summary) = report.summary {
            eprintln!("{} {}", "Summary:".bold(), summary);
        }
        if let Some(ref description) = report.description {
            eprintln!("{}\n{}", "Description:".bold(), description);
        }
        if report.diff.is_none() {
            eprintln!("{}", "No changes to review.".yellow());
        }
    }

    let mut stdout = std::io::stdout().lock();
    write_diff(&mut stdout, &report, cli.json_output)
}

/// Write the report to `out`: pretty JSON, or the diff bytes untouched
fn write_diff<W: Write>(out: &mut W, report: &DiffReport, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, report)?;
        writeln!(out)?;
    } else if let Some(ref diff) = report.diff {
        out.write_all(diff).context("Failed to write diff")?;
    }
    Ok(())
}
