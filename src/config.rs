use crate::error::{Result, RunnerError};
use std::{path::PathBuf, time::Duration};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_DOCS_DIR: &str = "tests/md";
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Command line used to spawn the MCP browser-automation server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ServerCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), args: Vec::new() }
    }

    /// Builder method: append an argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Split a whitespace-separated command line. Returns `None` for an empty line.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self { program, args: parts.collect() })
    }
}

impl Default for ServerCommand {
    fn default() -> Self {
        Self::new("npx").arg("-y").arg("@playwright/mcp@0.0.37")
    }
}

/// Timeout budgets for the individual wait calls. Every wait is non-fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitBudgets {
    pub navigate_load: Duration,
    pub navigate_idle: Duration,
    pub fill_settle: Duration,
    pub click_load: Duration,
    pub click_idle: Duration,
    /// Load wait when a document has no navigate step and the base page is opened
    pub bootstrap_load: Duration,
}

impl Default for WaitBudgets {
    fn default() -> Self {
        Self {
            navigate_load: Duration::from_millis(8000),
            navigate_idle: Duration::from_millis(8000),
            fill_settle: Duration::from_millis(500),
            click_load: Duration::from_millis(6000),
            click_idle: Duration::from_millis(6000),
            bootstrap_load: Duration::from_millis(4000),
        }
    }
}

/// Options for a run over one or more documents
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Base URL that root-relative navigate targets are resolved against
    pub base_url: Url,

    /// Directory scanned for `*.md` documents when no file is given
    pub docs_dir: PathBuf,

    /// Root directory for run metadata and debug artifacts
    pub artifacts_dir: PathBuf,

    /// Save page markup after each navigate step
    pub save_html: bool,

    pub server: ServerCommand,

    pub waits: WaitBudgets,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            docs_dir: PathBuf::from(DEFAULT_DOCS_DIR),
            artifacts_dir: PathBuf::from(DEFAULT_ARTIFACTS_DIR),
            save_html: false,
            server: ServerCommand::default(),
            waits: WaitBudgets::default(),
        }
    }
}

impl RunnerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the base URL from a string
    pub fn base_url(mut self, base: &str) -> Result<Self> {
        self.base_url = Url::parse(base)
            .map_err(|e| RunnerError::InvalidUrl { url: base.to_string(), reason: e.to_string() })?;
        Ok(self)
    }

    pub fn docs_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.docs_dir = dir.into();
        self
    }

    pub fn artifacts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifacts_dir = dir.into();
        self
    }

    pub fn save_html(mut self, save: bool) -> Self {
        self.save_html = save;
        self
    }

    pub fn server(mut self, server: ServerCommand) -> Self {
        self.server = server;
        self
    }

    pub fn waits(mut self, waits: WaitBudgets) -> Self {
        self.waits = waits;
        self
    }
}

/// Interpret an environment-style flag value (`SAVE_HTML=1`)
pub fn flag_enabled(value: &str) -> bool {
    let v = value.trim().to_ascii_lowercase();
    !(v.is_empty() || v == "0" || v == "false" || v == "no")
}
