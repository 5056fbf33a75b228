//! nfscope CLI entry point

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "nfscope")]
#[command(
    about = "List the nf-test files affected by the changes between two git revisions",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Repository root
    #[arg(short, long, default_value = ".")]
    pub path: PathBuf,

    /// Head revision to compare
    #[arg(short = 'r', long)]
    pub head_ref: String,

    /// Base revision to compare against
    #[arg(short = 'b', long)]
    pub base_ref: String,

    /// Globs of changed files to ignore
    #[arg(
        short = 'x',
        long,
        num_args = 1..,
        default_values = nfscope_core::DEFAULT_IGNORED.iter().copied()
    )]
    pub ignored_files: Vec<String>,

    /// YAML file mapping a target path to the globs that imply it
    #[arg(short, long)]
    pub include: Option<PathBuf>,

    /// Log verbosity, case-insensitive
    #[arg(short, long, value_enum, ignore_case = true, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Comma separated test types to report
    #[arg(short, long, default_value = "function,process,workflow,pipeline")]
    pub types: String,

    /// Fold reported paths to their n-th parent directory
    #[arg(short, long, default_value_t = 0)]
    pub n_parents: usize,

    /// Search every directory below a changed file's parent for tests
    #[arg(long)]
    pub recursive_siblings: bool,

    /// File to append `components=<json>` to
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub github_output: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = cli.log_level.directive();
    let filter = ["nfscope", "nfscope_core", "nfscope_indexer", "nfscope_changes"]
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",");
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("nfscope v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Repository root: {}", cli.path.display());

    commands::resolve(&cli)
}
