pub mod console;
pub mod json;
pub mod junit;

use crate::assertion::AssertionFailure;
use crate::errors::Diagnostic;
use serde::Serialize;

#[derive(Debug, Serialize, Clone)]
pub struct HarnessReport {
    pub suite: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub summary: HarnessSummary,
    pub results: Vec<CheckResult>,
}

#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct HarnessSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

#[derive(Debug, Serialize, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    /// Assertions that passed before the check finished or failed.
    pub assertions: usize,
    pub label: Option<String>,
    pub diagnostic: Option<Diagnostic>,
    pub duration_ms: u64,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Passed,
    Failed,
}

impl HarnessReport {
    pub fn new(suite: &str) -> Self {
        Self {
            suite: suite.to_string(),
            generated_at: chrono::Utc::now(),
            summary: HarnessSummary::default(),
            results: Vec::new(),
        }
    }

    pub fn add_check(
        &mut self,
        name: &str,
        result: Result<(), AssertionFailure>,
        assertions: usize,
        duration_ms: u64,
    ) {
        self.summary.total += 1;
        let res = match result {
            Ok(()) => {
                self.summary.passed += 1;
                CheckResult {
                    name: name.to_string(),
                    status: CheckStatus::Passed,
                    assertions,
                    label: None,
                    diagnostic: None,
                    duration_ms,
                }
            }
            Err(e) => {
                self.summary.failed += 1;
                CheckResult {
                    name: name.to_string(),
                    status: CheckStatus::Failed,
                    assertions,
                    label: Some(e.label.clone()),
                    diagnostic: Some(e.to_diagnostic()),
                    duration_ms,
                }
            }
        };
        self.results.push(res);
    }

    pub fn passed(&self) -> bool {
        self.summary.failed == 0
    }

    pub fn result(&self, name: &str) -> Option<&CheckResult> {
        self.results.iter().find(|r| r.name == name)
    }
}
