//! Named checks run in order, each against its own assertion sink.

use crate::assertion::{AssertionFailure, AssertionSink, StrictSink};
use crate::node::TraceSource;
use crate::report::HarnessReport;
use crate::verify::{CheckSummary, TraceVerifier};
use std::time::Instant;

type CheckFn<'a> = Box<dyn FnMut(&mut dyn AssertionSink) -> Result<(), AssertionFailure> + 'a>;

/// An ordered set of named checks.
///
/// Checks may borrow nodes owned by the caller; the harness only holds them
/// until [`Harness::run`] returns.
pub struct Harness<'a> {
    suite: String,
    checks: Vec<(String, CheckFn<'a>)>,
}

impl<'a> Harness<'a> {
    pub fn new(suite: impl Into<String>) -> Self {
        Self {
            suite: suite.into(),
            checks: Vec::new(),
        }
    }

    pub fn register<F>(&mut self, name: impl Into<String>, check: F) -> &mut Self
    where
        F: FnMut(&mut dyn AssertionSink) -> Result<(), AssertionFailure> + 'a,
    {
        self.checks.push((name.into(), Box::new(check)));
        self
    }

    /// Registers a [`TracingNodeTest`] against `node`.
    pub fn register_tracing_node<N>(&mut self, test: TracingNodeTest, node: &'a N) -> &mut Self
    where
        N: TraceSource + ?Sized,
    {
        let name = test.name.clone();
        self.register(name, move |sink| test.check(node, sink).map(|_| ()))
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Runs every check. A failing check is recorded and the next one still runs.
    pub fn run(self) -> HarnessReport {
        let mut report = HarnessReport::new(&self.suite);
        tracing::info!(suite = %self.suite, checks = self.checks.len(), "running checks");

        for (name, mut check) in self.checks {
            let start = Instant::now();
            let mut sink = StrictSink::new();
            let result = check(&mut sink as &mut dyn AssertionSink);
            let duration_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(()) => tracing::info!(check = %name, assertions = sink.passed(), "check passed"),
                Err(e) => tracing::warn!(check = %name, label = %e.label, "check failed"),
            }
            report.add_check(&name, result, sink.passed(), duration_ms);
        }
        report
    }
}

/// The tracing-node check: a verifier bound to a name and a time-step count.
#[derive(Debug, Clone, PartialEq)]
pub struct TracingNodeTest {
    pub name: String,
    pub time_step: usize,
    pub verifier: TraceVerifier,
}

impl TracingNodeTest {
    pub const DEFAULT_NAME: &'static str = "test_tracing_node";

    pub fn new(time_step: usize) -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            time_step,
            verifier: TraceVerifier::default(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_verifier(mut self, verifier: TraceVerifier) -> Self {
        self.verifier = verifier;
        self
    }

    pub fn check<N, S>(&self, node: &N, sink: &mut S) -> Result<CheckSummary, AssertionFailure>
    where
        N: TraceSource + ?Sized,
        S: AssertionSink + ?Sized,
    {
        self.verifier.check(self.time_step, node, sink)
    }
}
