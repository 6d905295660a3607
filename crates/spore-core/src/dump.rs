//! JSON dump of a node's trace buffers, one row per time step.

use crate::buffer::{BufferError, TraceBuffer};
use crate::errors::{codes, Diagnostic};
use crate::node::TraceSource;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum DumpError {
    #[error("failed to access trace dump {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse trace dump: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("trace dump row {row} has {actual} values, expected {expected}")]
    Shape {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error(transparent)]
    Size(#[from] BufferError),
}

impl DumpError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        let code = match self {
            DumpError::Io { .. } => codes::E_PATH_NOT_FOUND,
            DumpError::Parse(_) => codes::E_DUMP_PARSE,
            DumpError::Shape { .. } | DumpError::Size(_) => codes::E_DUMP_SHAPE,
        };
        Diagnostic::new(code, self.to_string()).with_source("dump")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceDump {
    pub num_traces: usize,
    pub steps: Vec<Vec<f64>>,
}

impl TraceDump {
    pub fn from_buffer(buffer: &TraceBuffer) -> Self {
        let steps = (0..buffer.horizon())
            .filter_map(|t| buffer.step(t).map(<[f64]>::to_vec))
            .collect();
        Self {
            num_traces: buffer.num_traces(),
            steps,
        }
    }

    pub fn into_buffer(self) -> Result<TraceBuffer, DumpError> {
        for (row, values) in self.steps.iter().enumerate() {
            if values.len() != self.num_traces {
                return Err(DumpError::Shape {
                    row,
                    expected: self.num_traces,
                    actual: values.len(),
                });
            }
        }
        let steps = self.steps;
        Ok(TraceBuffer::try_from_fn(
            self.num_traces,
            steps.len(),
            |t, tid| steps[t][tid],
        )?)
    }
}

pub fn load_dump(path: &Path) -> Result<TraceBuffer, DumpError> {
    let raw = std::fs::read_to_string(path).map_err(|source| DumpError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let dump: TraceDump = serde_json::from_str(&raw)?;
    let buffer = dump.into_buffer()?;
    tracing::debug!(
        path = %path.display(),
        traces = buffer.num_traces(),
        steps = buffer.horizon(),
        "loaded trace dump"
    );
    Ok(buffer)
}

pub fn write_dump(buffer: &TraceBuffer, path: &Path) -> Result<(), DumpError> {
    let json = serde_json::to_string_pretty(&TraceDump::from_buffer(buffer))?;
    std::fs::write(path, json).map_err(|source| DumpError::Io {
        path: path.display().to_string(),
        source,
    })
}
