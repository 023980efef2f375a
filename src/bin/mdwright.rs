//! mdwright CLI
//!
//! Executes natural-language Markdown scenarios through an MCP browser server.

use clap::Parser;
use mdwright::{RunnerConfig, RunnerError, ServerCommand, config, runner};
use std::{path::PathBuf, process::ExitCode};

/// Exit status when no input documents were found
const EXIT_NO_DOCUMENTS: u8 = 2;

#[derive(Parser)]
#[command(name = "mdwright")]
#[command(version)]
#[command(about = "Run natural-language Markdown E2E scenarios via MCP", long_about = None)]
struct Cli {
    /// Document to run (default: every *.md in --dir)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Base URL for root-relative navigation
    #[arg(long, env = "APP_BASE", default_value = config::DEFAULT_BASE_URL)]
    base: String,

    /// Directory scanned for documents
    #[arg(long, env = "NL_DIR", default_value = config::DEFAULT_DOCS_DIR)]
    dir: PathBuf,

    /// Artifacts directory
    #[arg(long, env = "MDW_ARTIFACTS", default_value = config::DEFAULT_ARTIFACTS_DIR)]
    artifacts: PathBuf,

    /// Save page markup after each navigation (SAVE_HTML=1)
    #[arg(
        long,
        env = "SAVE_HTML",
        action = clap::ArgAction::Set,
        value_parser = parse_flag,
        num_args = 0..=1,
        default_value = "0",
        default_missing_value = "1"
    )]
    save_html: bool,

    /// Command line of the MCP browser server
    #[arg(long, env = "MDW_SERVER", value_name = "COMMAND")]
    server: Option<String>,

    /// Debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn parse_flag(value: &str) -> Result<bool, String> {
    Ok(config::flag_enabled(value))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    match execute(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[E-EXEC] {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = RunnerConfig::new()
        .base_url(&cli.base)?
        .docs_dir(cli.dir)
        .artifacts_dir(cli.artifacts)
        .save_html(cli.save_html);

    if let Some(line) = cli.server.as_deref() {
        match ServerCommand::parse(line) {
            Some(server) => config = config.server(server),
            None => anyhow::bail!("--server must not be empty"),
        }
    }

    match runner::run(config, cli.file.as_deref()).await {
        Ok(summary) => {
            log::info!("{} passed, {} failed", summary.passed_steps(), summary.failed_steps());
            Ok(ExitCode::from(summary.exit_code() as u8))
        }
        Err(RunnerError::NoDocuments(reason)) => {
            eprintln!("No .md found ({}). Usage: mdwright [FILE.md]", reason);
            Ok(ExitCode::from(EXIT_NO_DOCUMENTS))
        }
        Err(e) => Err(e.into()),
    }
}
