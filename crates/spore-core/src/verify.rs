//! Trace content verification for tracing nodes.

use crate::assertion::{AssertionContext, AssertionFailure, AssertionSink};
use crate::comparison::Comparison;
use crate::node::TraceSource;
use serde::Serialize;

pub const DEFAULT_EXPECTED_TRACES: usize = 5;

pub const LABEL_TRACE_COUNT: &str = "number of traces";
pub const LABEL_TRACE_CONTENT: &str = "trace content";

/// Totals for a check that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    pub traces: usize,
    pub time_steps: usize,
    pub assertions: usize,
}

/// Verifies that trace `tid` at time `t` holds `t + tid`.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceVerifier {
    pub expected_traces: usize,
    pub comparison: Comparison,
}

impl Default for TraceVerifier {
    fn default() -> Self {
        Self {
            expected_traces: DEFAULT_EXPECTED_TRACES,
            comparison: Comparison::Exact,
        }
    }
}

impl TraceVerifier {
    pub fn new(expected_traces: usize) -> Self {
        Self {
            expected_traces,
            ..Self::default()
        }
    }

    pub fn with_comparison(mut self, comparison: Comparison) -> Self {
        self.comparison = comparison;
        self
    }

    /// Checks the first `time_step` slots of every trace on `node`.
    ///
    /// Assertions go through `sink` in a fixed order: the trace count first,
    /// then trace by trace, each over increasing time. The first failure
    /// returned by the sink ends the check.
    pub fn check<N, S>(
        &self,
        time_step: usize,
        node: &N,
        sink: &mut S,
    ) -> Result<CheckSummary, AssertionFailure>
    where
        N: TraceSource + ?Sized,
        S: AssertionSink + ?Sized,
    {
        let traces = node.num_traces();
        tracing::debug!(
            traces,
            time_step,
            expected = self.expected_traces,
            "checking trace buffers"
        );

        sink.test_assert(
            traces == self.expected_traces,
            LABEL_TRACE_COUNT,
            AssertionContext::TraceCount {
                expected: self.expected_traces,
                actual: traces,
            },
        )
        .inspect_err(|e| tracing::warn!(label = %e.label, traces, "trace count mismatch"))?;
        let mut assertions = 1;

        for tid in 0..traces {
            for t in 0..time_step {
                let expected = (t + tid) as f64;
                let actual = node.trace(t, tid).copied();
                let ok = actual.is_some_and(|v| self.comparison.matches(v, expected));
                sink.test_assert(
                    ok,
                    LABEL_TRACE_CONTENT,
                    AssertionContext::TraceContent {
                        time_index: t,
                        trace_id: tid,
                        expected,
                        actual,
                    },
                )
                .inspect_err(|_| {
                    tracing::warn!(
                        time_index = t,
                        trace_id = tid,
                        expected,
                        ?actual,
                        "trace content mismatch"
                    )
                })?;
                assertions += 1;
            }
        }

        tracing::debug!(assertions, "trace buffers verified");
        Ok(CheckSummary {
            traces,
            time_steps: time_step,
            assertions,
        })
    }
}

/// Checks `node` with the default verifier: 5 traces, exact comparison.
pub fn check<N, S>(
    time_step: usize,
    node: &N,
    sink: &mut S,
) -> Result<CheckSummary, AssertionFailure>
where
    N: TraceSource + ?Sized,
    S: AssertionSink + ?Sized,
{
    TraceVerifier::default().check(time_step, node, sink)
}
