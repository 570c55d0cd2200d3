#![forbid(unsafe_code)]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use crossval_compare::{CorrespondenceTable, cross_validate};
use thiserror::Error;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod report;
pub mod runner;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// This environment variable is used to control logs.
const LOG_ENV_VAR: &str = "LOG";

/// crossvaltool – cross-validate tree-sitter-kotlin against JetBrains PSI
#[derive(Parser)]
#[command(version, about, arg_required_else_help(true))]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate every .kt fixture in a directory against its PSI dump
    Run(Run),
    /// Compare one pre-recorded pair of parser dumps
    Compare(Compare),
}

#[derive(Args)]
#[command(arg_required_else_help(true))]
pub struct Run {
    /// Directory of .kt fixtures, each with a .txt PSI dump alongside
    pub fixtures: PathBuf,

    /// tree-sitter-kotlin checkout; `tree-sitter parse` runs from here
    #[arg(short('g'), long, default_value = ".")]
    pub grammar_dir: PathBuf,

    /// Markdown report output file
    #[arg(short, long, default_value = "report.md")]
    pub output: PathBuf,

    /// Also write the raw per-file results as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,
}

#[derive(Args)]
#[command(arg_required_else_help(true))]
pub struct Compare {
    /// File holding a tree-sitter S-expression dump
    pub ts_dump: PathBuf,

    /// File holding a JetBrains PSI dump
    pub psi_dump: PathBuf,
}

#[derive(Debug, Error)]
pub enum CrossvalError {
    #[error("no .kt fixture files in {0}")]
    NoFixtures(PathBuf),
    #[error("{0:?}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("{0}")]
    IO(#[from] std::io::Error),
}

pub async fn run() -> Result<(), CrossvalError> {
    let cli = Cli::parse();

    init_tracing();

    if let Some(command) = cli.command {
        run_command(command).await
    } else {
        Ok(())
    }
}

pub async fn run_command(command: Command) -> Result<(), CrossvalError> {
    match command {
        Command::Run(args) => {
            let table = CorrespondenceTable::kotlin();
            let results = runner::run_corpus(&table, &args).await?;

            let report = report::generate(&results);
            tokio::fs::write(&args.output, report).await?;
            info!("report written to {}", args.output.display());

            if let Some(json_path) = &args.json {
                let json = serde_json::to_string_pretty(&results)?;
                tokio::fs::write(json_path, json).await?;
                info!("results written to {}", json_path.display());
            }

            Ok(())
        }
        Command::Compare(args) => {
            let ts_dump = tokio::fs::read_to_string(&args.ts_dump).await?;
            let psi_dump = tokio::fs::read_to_string(&args.psi_dump).await?;

            let result = cross_validate(&CorrespondenceTable::kotlin(), &ts_dump, &psi_dump);
            println!("{}", result.status);
            for difference in &result.differences {
                println!("  {difference}");
            }

            Ok(())
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var(LOG_ENV_VAR)
                .from_env_lossy(),
        )
        .init();
}
