//! Step classification and execution
//!
//! Each raw step is classified by [`StepClassifier`] into a [`Step`], then run by
//! the handler for its shape. Only the primary resolver call of a shape decides
//! pass/fail; waits and screenshots around it go through
//! [`best_effort`](crate::browser::best_effort).

pub mod assert_visible;
pub mod classify;
pub mod click;
pub mod fill;
pub mod navigate;
pub mod utils;

pub use classify::{Step, StepClassifier, StepRule};

use crate::browser::{Session, best_effort};
use crate::config::RunnerConfig;
use crate::error::StepError;
use crate::mcp::{McpTransport, ToolTransport, as_bool, pick_image};
use crate::report::Artifacts;
use std::path::Path;

/// Everything a step handler can touch while running one document
pub struct StepContext<'a, T: ToolTransport = McpTransport> {
    pub session: &'a mut Session<T>,
    pub config: &'a RunnerConfig,
    pub artifacts: &'a Artifacts,
    /// Document the steps come from
    pub document: &'a Path,
    pages_saved: usize,
}

impl<'a, T: ToolTransport> StepContext<'a, T> {
    pub fn new(
        session: &'a mut Session<T>,
        config: &'a RunnerConfig,
        artifacts: &'a Artifacts,
        document: &'a Path,
    ) -> Self {
        Self { session, config, artifacts, document, pages_saved: 0 }
    }

    /// Run a resolver expression after making sure the helpers are installed.
    ///
    /// This is the primary call of a step: its boolean decides the outcome. A
    /// failed call is retried once with freshly installed helpers; a second
    /// failure counts as `false`.
    pub async fn resolve(&mut self, expression: &str) -> bool {
        if let Err(e) = self.session.ensure_helpers().await {
            log::warn!("Failed to install resolver helpers: {}", e);
        }

        match self.session.evaluate(expression).await {
            Ok(value) => return as_bool(value.as_ref()),
            Err(e) => log::debug!("Resolver call failed, reinstalling helpers: {}", e),
        }

        self.session.invalidate_helpers();
        if let Err(e) = self.session.ensure_helpers().await {
            log::warn!("Failed to install resolver helpers: {}", e);
        }

        match self.session.evaluate(expression).await {
            Ok(value) => as_bool(value.as_ref()),
            Err(e) => {
                log::warn!("Resolver call failed: {}", e);
                false
            }
        }
    }

    /// Screenshot and markup of the current page into the debug directory
    pub async fn capture_debug(&mut self) {
        if let Some(shot) = best_effort("debug screenshot", self.session.screenshot()).await {
            if let Some((data, mime_type)) = pick_image(&shot) {
                match self.artifacts.write_debug_screenshot(data, mime_type) {
                    Ok(path) => log::info!("Saved screenshot to {}", path.display()),
                    Err(e) => log::warn!("Failed to save debug screenshot: {}", e),
                }
            }
        }

        if let Some(Some(html)) = best_effort("page markup", self.session.page_html()).await {
            match self.artifacts.write_debug_html(&html) {
                Ok(path) => log::info!("Saved page markup to {}", path.display()),
                Err(e) => log::warn!("Failed to save page markup: {}", e),
            }
        }
    }

    /// Save the current page markup next to the document's run metadata
    pub async fn save_page(&mut self) {
        let Some(Some(html)) = best_effort("page markup", self.session.page_html()).await else {
            return;
        };
        self.pages_saved += 1;
        if let Err(e) = self.artifacts.write_page(self.document, self.pages_saved, &html) {
            log::warn!("Failed to save page markup: {}", e);
        }
    }
}

/// Classifies raw steps and dispatches them to their handlers
pub struct StepExecutor {
    classifier: StepClassifier,
}

impl StepExecutor {
    pub fn new() -> Self {
        Self::with_classifier(StepClassifier::with_defaults())
    }

    pub fn with_classifier(classifier: StepClassifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &StepClassifier {
        &self.classifier
    }

    /// Run one raw step. Returns the classified step on success.
    pub async fn execute<T: ToolTransport>(&self, ctx: &mut StepContext<'_, T>, raw: &str) -> Result<Step, StepError> {
        let step = self.classifier.classify(raw);
        log::debug!("{} => {:?}", raw, step);

        match &step {
            Step::Navigate(target) => navigate::execute(ctx, target).await?,
            Step::Fill { label, value } => fill::execute(ctx, label, value).await?,
            Step::Click(caption) => click::execute(ctx, caption).await?,
            Step::AssertVisible(text) => assert_visible::execute(ctx, text).await?,
            Step::Unrecognized(line) => {
                best_effort("screenshot", ctx.session.screenshot()).await;
                log::warn!("Unrecognized step: {}", line);
            }
        }

        Ok(step)
    }
}

impl Default for StepExecutor {
    fn default() -> Self {
        Self::new()
    }
}
