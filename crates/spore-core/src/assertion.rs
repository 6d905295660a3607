//! Named-assertion primitive injected into verifiers.
//!
//! A verifier never decides how a failed assertion is reported. It hands the
//! condition, a static label and a structured context to an
//! [`AssertionSink`]. The sink either lets the check continue (`Ok`) or stops
//! it (`Err`), which verifiers propagate with `?`.

use crate::errors::{codes, Diagnostic};
use serde::Serialize;

/// What was being compared when an assertion ran.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssertionContext {
    None,
    TraceCount {
        expected: usize,
        actual: usize,
    },
    TraceContent {
        time_index: usize,
        trace_id: usize,
        expected: f64,
        actual: Option<f64>,
    },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("assertion failed: {label}")]
pub struct AssertionFailure {
    pub label: String,
    pub context: AssertionContext,
}

impl AssertionFailure {
    pub fn new(label: impl Into<String>, context: AssertionContext) -> Self {
        Self {
            label: label.into(),
            context,
        }
    }

    pub fn code(&self) -> &'static str {
        match self.context {
            AssertionContext::None => codes::E_ASSERT,
            AssertionContext::TraceCount { .. } => codes::E_TRACE_COUNT,
            AssertionContext::TraceContent { actual: None, .. } => codes::E_TRACE_MISSING,
            AssertionContext::TraceContent { .. } => codes::E_TRACE_CONTENT,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut d = Diagnostic::new(self.code(), self.label.clone()).with_source("verify");
        match self.context {
            AssertionContext::None => {}
            AssertionContext::TraceCount { expected, .. } => {
                d = d
                    .with_context(serde_json::json!(self.context))
                    .with_fix_step(format!("configure the node with {} trace buffers", expected));
            }
            AssertionContext::TraceContent {
                time_index,
                trace_id,
                actual,
                ..
            } => {
                d = d.with_context(serde_json::json!(self.context));
                if actual.is_none() {
                    d = d.with_fix_step(format!(
                        "the node stores no value at t={}; check the recorded window length",
                        time_index
                    ));
                } else {
                    d = d.with_fix_step(format!(
                        "inspect trace {} at time step {}",
                        trace_id, time_index
                    ));
                }
            }
        }
        d
    }
}

/// Receives every assertion a verifier makes.
pub trait AssertionSink {
    fn test_assert(
        &mut self,
        condition: bool,
        label: &str,
        context: AssertionContext,
    ) -> Result<(), AssertionFailure>;
}

impl<F> AssertionSink for F
where
    F: FnMut(bool, &str, AssertionContext) -> Result<(), AssertionFailure>,
{
    fn test_assert(
        &mut self,
        condition: bool,
        label: &str,
        context: AssertionContext,
    ) -> Result<(), AssertionFailure> {
        self(condition, label, context)
    }
}

/// Counts passes and turns the first failure into an error.
#[derive(Debug, Default)]
pub struct StrictSink {
    passed: usize,
}

impl StrictSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn passed(&self) -> usize {
        self.passed
    }
}

impl AssertionSink for StrictSink {
    fn test_assert(
        &mut self,
        condition: bool,
        label: &str,
        context: AssertionContext,
    ) -> Result<(), AssertionFailure> {
        if !condition {
            return Err(AssertionFailure::new(label, context));
        }
        self.passed += 1;
        Ok(())
    }
}

/// Panics on failure, for use directly inside `#[test]` functions.
#[derive(Debug, Default)]
pub struct PanicSink;

impl AssertionSink for PanicSink {
    fn test_assert(
        &mut self,
        condition: bool,
        label: &str,
        context: AssertionContext,
    ) -> Result<(), AssertionFailure> {
        if !condition {
            panic!("assertion failed: {} ({:?})", label, context);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssertionRecord {
    pub label: String,
    pub passed: bool,
    pub context: AssertionContext,
}

/// Keeps an ordered log of every assertion, then fails like [`StrictSink`].
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Vec<AssertionRecord>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[AssertionRecord] {
        &self.records
    }

    pub fn failures(&self) -> impl Iterator<Item = &AssertionRecord> {
        self.records.iter().filter(|r| !r.passed)
    }
}

impl AssertionSink for RecordingSink {
    fn test_assert(
        &mut self,
        condition: bool,
        label: &str,
        context: AssertionContext,
    ) -> Result<(), AssertionFailure> {
        self.records.push(AssertionRecord {
            label: label.to_string(),
            passed: condition,
            context,
        });
        if condition {
            Ok(())
        } else {
            Err(AssertionFailure::new(label, context))
        }
    }
}
