//! Trace buffer verification for SPORE tracing nodes.
//!
//! A node exposes a fixed number of trace buffers through [`TraceSource`].
//! [`verify::check`] walks them and reports every comparison to an injected
//! [`AssertionSink`], which decides whether a failure aborts the run, panics
//! inside a unit test, or is recorded. [`Harness`] groups such checks under
//! names and produces a [`HarnessReport`].

pub mod assertion;
pub mod buffer;
pub mod comparison;
pub mod config;
pub mod dump;
pub mod errors;
pub mod harness;
pub mod node;
pub mod report;
pub mod verify;

pub use assertion::{
    AssertionContext, AssertionFailure, AssertionSink, PanicSink, RecordingSink, StrictSink,
};
pub use buffer::{BufferError, TraceBuffer};
pub use comparison::Comparison;
pub use harness::{Harness, TracingNodeTest};
pub use node::TraceSource;
pub use report::{CheckStatus, HarnessReport};
pub use verify::{check, CheckSummary, TraceVerifier};
