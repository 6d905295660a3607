//! Read-only view of a node that keeps per-timestep trace buffers.

/// A node exposing `num_traces()` trace buffers indexed by time.
///
/// Implementors are owned elsewhere (the host simulation or a test fixture);
/// verification only ever borrows them for the duration of a single call.
pub trait TraceSource {
    /// Number of trace buffers. Fixed at construction.
    fn num_traces(&self) -> usize;

    /// Value of trace `trace_id` at `time_index`, or `None` when the slot
    /// lies outside the stored window.
    fn trace(&self, time_index: usize, trace_id: usize) -> Option<&f64>;
}

impl<T: TraceSource + ?Sized> TraceSource for &T {
    fn num_traces(&self) -> usize {
        (**self).num_traces()
    }

    fn trace(&self, time_index: usize, trace_id: usize) -> Option<&f64> {
        (**self).trace(time_index, trace_id)
    }
}
