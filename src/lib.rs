//! # mdwright
//!
//! Run browser end-to-end scenarios written as loose natural-language Markdown
//! against a live page, without writing automation code.
//!
//! ## Features
//!
//! - **Document Parser**: `suite:` / `case:` blocks of `-` bullet steps
//! - **Step Classifier**: whole-line shape rules (navigate, fill, click, assert visible)
//! - **Element Resolver**: tiered fallback search for labels, captions and visible text, run inside the page
//! - **MCP Transport**: every browser action is a tool call to an MCP server (Playwright MCP by default)
//! - **Reporter**: per-step pass/fail, run metadata and debug artifacts
//!
//! ## Document format
//!
//! ```text
//! suite: Login
//!
//! case: 正常ログイン
//! - /login に移動
//! - メールアドレス に user@example.com を入力
//! - パスワード に pass を入力
//! - ログイン をクリック
//! - ダッシュボード が見える
//! ```
//!
//! ## Running
//!
//! ```bash
//! # Every tests/md/*.md against the default base URL
//! cargo run --bin mdwright
//!
//! # One file against another server
//! APP_BASE=http://localhost:3000 cargo run --bin mdwright -- tests/nl/login.md
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use mdwright::{RunnerConfig, runner};
//!
//! # async fn example() -> mdwright::Result<()> {
//! let config = RunnerConfig::new().base_url("http://127.0.0.1:8080")?;
//! let summary = runner::run(config, None).await?;
//! std::process::exit(summary.exit_code());
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`document`]: parsing documents into suites and cases
//! - [`steps`]: step classification and the per-shape handlers
//! - [`resolver`]: page-side element resolution script
//! - [`browser`]: the live session and best-effort calls
//! - [`mcp`]: tool-call transport over an MCP child process
//! - [`report`]: pass/fail accounting and artifacts
//! - [`runner`]: document discovery and the run loop
//! - [`config`], [`error`]

pub mod browser;
pub mod config;
pub mod document;
pub mod error;
pub mod mcp;
pub mod report;
pub mod resolver;
pub mod runner;
pub mod steps;

pub use browser::{Session, WaitState};
pub use config::{RunnerConfig, ServerCommand, WaitBudgets};
pub use document::{Case, Suite};
pub use error::{Result, RunnerError, StepError};
pub use mcp::{McpTransport, ToolTransport};
pub use report::{RunSummary, StepStatus, SuiteReport};
pub use runner::Runner;
pub use steps::{Step, StepClassifier, StepExecutor};
