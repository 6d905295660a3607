use crate::node::TraceSource;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BufferError {
    #[error("slot out of range: t={time_index}, tid={trace_id} (horizon {horizon}, traces {num_traces})")]
    OutOfRange {
        time_index: usize,
        trace_id: usize,
        horizon: usize,
        num_traces: usize,
    },
    #[error("trace buffer of {num_traces} traces x {horizon} steps overflows usize")]
    TooLarge { num_traces: usize, horizon: usize },
}

/// In-memory trace storage: `num_traces` buffers, `horizon` slots each.
///
/// Slots are laid out row-major by time (`t * num_traces + tid`) so a full
/// time step is contiguous.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceBuffer {
    num_traces: usize,
    horizon: usize,
    slots: Vec<f64>,
}

impl TraceBuffer {
    /// # Panics
    ///
    /// If `num_traces * horizon` overflows `usize`. See [`TraceBuffer::try_from_fn`].
    pub fn new(num_traces: usize, horizon: usize) -> Self {
        Self::from_fn(num_traces, horizon, |_, _| 0.0)
    }

    /// # Panics
    ///
    /// If `num_traces * horizon` overflows `usize`. See [`TraceBuffer::try_from_fn`].
    pub fn from_fn(
        num_traces: usize,
        horizon: usize,
        f: impl FnMut(usize, usize) -> f64,
    ) -> Self {
        match Self::try_from_fn(num_traces, horizon, f) {
            Ok(buf) => buf,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_from_fn(
        num_traces: usize,
        horizon: usize,
        mut f: impl FnMut(usize, usize) -> f64,
    ) -> Result<Self, BufferError> {
        let len = num_traces
            .checked_mul(horizon)
            .ok_or(BufferError::TooLarge {
                num_traces,
                horizon,
            })?;
        let mut slots = Vec::with_capacity(len);
        for t in 0..horizon {
            for tid in 0..num_traces {
                slots.push(f(t, tid));
            }
        }
        Ok(Self {
            num_traces,
            horizon,
            slots,
        })
    }

    /// The canonical fixture: trace `tid` holds `t + tid` at time `t`.
    pub fn fixture(num_traces: usize, horizon: usize) -> Self {
        Self::from_fn(num_traces, horizon, fixture_value)
    }

    pub fn try_fixture(num_traces: usize, horizon: usize) -> Result<Self, BufferError> {
        Self::try_from_fn(num_traces, horizon, fixture_value)
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    pub fn set(
        &mut self,
        time_index: usize,
        trace_id: usize,
        value: f64,
    ) -> Result<(), BufferError> {
        let idx = self.index(time_index, trace_id).ok_or(BufferError::OutOfRange {
            time_index,
            trace_id,
            horizon: self.horizon,
            num_traces: self.num_traces,
        })?;
        self.slots[idx] = value;
        Ok(())
    }

    /// All trace values at one time step, ordered by trace id.
    pub fn step(&self, time_index: usize) -> Option<&[f64]> {
        if time_index >= self.horizon {
            return None;
        }
        let start = time_index * self.num_traces;
        Some(&self.slots[start..start + self.num_traces])
    }

    fn index(&self, time_index: usize, trace_id: usize) -> Option<usize> {
        (time_index < self.horizon && trace_id < self.num_traces)
            .then(|| time_index * self.num_traces + trace_id)
    }
}

fn fixture_value(t: usize, tid: usize) -> f64 {
    (t + tid) as f64
}

impl TraceSource for TraceBuffer {
    fn num_traces(&self) -> usize {
        self.num_traces
    }

    fn trace(&self, time_index: usize, trace_id: usize) -> Option<&f64> {
        self.index(time_index, trace_id).map(|idx| &self.slots[idx])
    }
}
