use serde::{Deserialize, Serialize};

/// How a stored trace value is compared against its expected value.
///
/// `Exact` is the default: fixture traces are integral sums and must match
/// bit for bit. `Absolute` accepts values within `tolerance` for traces that
/// were accumulated in floating point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Comparison {
    #[default]
    Exact,
    Absolute { tolerance: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("tolerance must be a non-negative number, got {0}")]
pub struct InvalidTolerance(pub f64);

impl Comparison {
    /// Rejects tolerances that no value could satisfy (negative or NaN).
    pub fn validate(&self) -> Result<(), InvalidTolerance> {
        match *self {
            Comparison::Absolute { tolerance } if tolerance.is_nan() || tolerance < 0.0 => {
                Err(InvalidTolerance(tolerance))
            }
            _ => Ok(()),
        }
    }

    pub fn matches(&self, actual: f64, expected: f64) -> bool {
        match *self {
            Comparison::Exact => actual == expected,
            Comparison::Absolute { tolerance } => (actual - expected).abs() <= tolerance,
        }
    }
}
