use crate::{browser::{Session, WaitState, best_effort},
            config::RunnerConfig,
            document::{self, Suite},
            error::{Result, RunnerError},
            mcp::{McpTransport, ToolTransport},
            report::{Artifacts, RunSummary, SuiteReport},
            steps::{Step, StepContext, StepExecutor, utils::resolve_url}};
use console::style;
use std::{fs,
          path::{Path, PathBuf}};

/// Documents to run: the explicit file if given, else every `*.md` in `docs_dir` sorted by name
pub fn discover_documents(file: Option<&Path>, docs_dir: &Path) -> Result<Vec<PathBuf>> {
    if let Some(file) = file {
        return Ok(vec![file.to_path_buf()]);
    }

    let mut documents = Vec::new();
    if docs_dir.is_dir() {
        for entry in fs::read_dir(docs_dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
                documents.push(path);
            }
        }
    }
    documents.sort();

    if documents.is_empty() {
        return Err(RunnerError::NoDocuments(format!("no .md files in {}", docs_dir.display())));
    }
    Ok(documents)
}

/// Runs documents one after another over a single session
pub struct Runner<T: ToolTransport = McpTransport> {
    session: Session<T>,
    config: RunnerConfig,
    artifacts: Artifacts,
    executor: StepExecutor,
}

impl Runner<McpTransport> {
    /// Spawn the configured tool server and connect to it
    pub async fn connect(config: RunnerConfig) -> Result<Self> {
        let transport = McpTransport::spawn(&config.server).await?;
        Ok(Self::new(Session::new(transport), config))
    }
}

impl<T: ToolTransport> Runner<T> {
    pub fn new(session: Session<T>, config: RunnerConfig) -> Self {
        let artifacts = Artifacts::new(&config.artifacts_dir);
        Self { session, config, artifacts, executor: StepExecutor::new() }
    }

    pub fn session(&self) -> &Session<T> {
        &self.session
    }

    /// Run every document. A failing document never stops the ones after it.
    pub async fn run_all(&mut self, documents: &[PathBuf]) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        for path in documents {
            summary.push(self.run_document(path).await?);
        }
        Ok(summary)
    }

    pub async fn run_document(&mut self, path: &Path) -> Result<SuiteReport> {
        let text = fs::read_to_string(path)?;
        let suite = document::parse(&text);
        self.run_suite(path, &suite).await
    }

    /// Execute all steps of a parsed document in order
    pub async fn run_suite(&mut self, path: &Path, suite: &Suite) -> Result<SuiteReport> {
        println!("[exec] suite={} file={} steps={}", suite.name, path.display(), suite.step_count());
        log::info!("Running {} ({} cases)", path.display(), suite.cases.len());

        // Record the plan before anything can go wrong in the page
        self.artifacts.write_meta(path, suite)?;

        if !self.has_navigate_step(suite) {
            self.open_base().await;
        }

        let mut report = SuiteReport::new(&suite.name, path.display().to_string());
        let mut ctx = StepContext::new(&mut self.session, &self.config, &self.artifacts, path);

        for case in &suite.cases {
            log::debug!("case: {}", case.title);
            println!(" {}", style(&case.title).dim());
            for step in &case.steps {
                let outcome = self.executor.execute(&mut ctx, step).await;
                report.record(&case.title, step, &outcome);
            }
        }

        report.print_summary();
        if let Err(e) = self.artifacts.write_result(path, &report) {
            log::warn!("Failed to write result for {}: {}", path.display(), e);
        }

        Ok(report)
    }

    fn has_navigate_step(&self, suite: &Suite) -> bool {
        let classifier = self.executor.classifier();
        suite
            .cases
            .iter()
            .flat_map(|c| c.steps.iter())
            .any(|s| matches!(classifier.classify(s), Step::Navigate(_)))
    }

    async fn open_base(&mut self) {
        let url = match resolve_url(&self.config.base_url, "/") {
            Ok(url) => url,
            Err(e) => {
                log::warn!("Cannot open base page: {}", e);
                return;
            }
        };
        best_effort("navigate", self.session.navigate(&url)).await;
        best_effort("load wait", self.session.wait_for(WaitState::Load, self.config.waits.bootstrap_load)).await;
    }

    /// Close the connection
    pub async fn close(self) -> Result<()> {
        self.session.close().await
    }
}

/// Discover documents, run them all over one connection, and close it.
///
/// The connection is closed whether or not the run loop failed.
pub async fn run(config: RunnerConfig, file: Option<&Path>) -> Result<RunSummary> {
    let documents = discover_documents(file, &config.docs_dir)?;
    let mut runner = Runner::connect(config).await?;

    let outcome = runner.run_all(&documents).await;

    if let Err(e) = runner.close().await {
        log::warn!("{}", e);
    }
    outcome
}
