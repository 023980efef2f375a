//! Pass/fail accounting and run output

pub mod artifacts;

pub use artifacts::{Artifacts, slug};

use crate::{error::StepError, steps::Step};
use console::style;
use serde::{Deserialize, Serialize};

/// Outcome of one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StepStatus {
    Ok,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRecord {
    pub case_title: String,
    pub step: String,
    #[serde(flatten)]
    pub status: StepStatus,
    /// The step matched no known shape
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub unrecognized: bool,
}

/// Results of running one document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuiteReport {
    pub suite: String,
    pub file: String,
    pub passed: usize,
    pub failed: usize,
    pub steps: Vec<StepRecord>,
}

impl SuiteReport {
    pub fn new(suite: impl Into<String>, file: impl Into<String>) -> Self {
        Self { suite: suite.into(), file: file.into(), ..Default::default() }
    }

    /// Record a step outcome and print its marker line
    pub fn record(&mut self, case_title: &str, step: &str, outcome: &Result<Step, StepError>) {
        let record = match outcome {
            Ok(kind) => {
                self.passed += 1;
                let unrecognized = matches!(kind, Step::Unrecognized(_));
                if unrecognized {
                    println!(" {} {}  {}", style("✓").green(), step, style("(unrecognized, screenshot only)").yellow());
                } else {
                    println!(" {} {}", style("✓").green(), step);
                }
                StepRecord { case_title: case_title.to_string(), step: step.to_string(), status: StepStatus::Ok, unrecognized }
            }
            Err(e) => {
                self.failed += 1;
                println!(" {} {}  {}", style("✕").red(), step, style(format!("({})", e.reason())).dim());
                StepRecord {
                    case_title: case_title.to_string(),
                    step: step.to_string(),
                    status: StepStatus::Failed { reason: e.reason() },
                    unrecognized: false,
                }
            }
        };
        self.steps.push(record);
    }

    pub fn total(&self) -> usize {
        self.steps.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Titles of cases with at least one failed step, in order
    pub fn failed_cases(&self) -> Vec<&str> {
        let mut titles: Vec<&str> = Vec::new();
        for record in &self.steps {
            if matches!(record.status, StepStatus::Failed { .. }) && !titles.contains(&record.case_title.as_str()) {
                titles.push(&record.case_title);
            }
        }
        titles
    }

    /// Print the PASS/FAIL line for the document
    pub fn print_summary(&self) {
        if self.is_success() {
            println!("\n{} {} ({}/{})", style(" PASS ").bold().green(), self.file, self.passed, self.total());
        } else {
            println!(
                "\n{} {} ({} passed, {} failed)",
                style(" FAIL ").bold().red(),
                self.file,
                self.passed,
                self.failed
            );
            for title in self.failed_cases() {
                println!("   {} {}", style("✕").red(), title);
            }
        }
    }
}

/// Outcome of a whole invocation across documents
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub reports: Vec<SuiteReport>,
}

impl RunSummary {
    pub fn push(&mut self, report: SuiteReport) {
        self.reports.push(report);
    }

    pub fn failed_steps(&self) -> usize {
        self.reports.iter().map(|r| r.failed).sum()
    }

    pub fn passed_steps(&self) -> usize {
        self.reports.iter().map(|r| r.passed).sum()
    }

    pub fn is_success(&self) -> bool {
        self.failed_steps() == 0
    }

    /// Process exit status: 0 when every step passed, 1 otherwise
    pub fn exit_code(&self) -> i32 {
        if self.is_success() { 0 } else { 1 }
    }
}
