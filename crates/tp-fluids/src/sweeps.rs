//! Spacing of the swept variable along a process path.

use crate::error::FluidError;
use std::fmt;
use std::str::FromStr;
use tp_core::numeric::{linspace, logspace};
use tracing::debug;

/// How sample points are distributed between the initial and final value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SampleSpacing {
    /// Uniformly spaced points
    #[default]
    Linear,
    /// Logarithmically spaced points (falls back to linear for non-positive bounds)
    Logarithmic,
}

impl SampleSpacing {
    /// `n` points from `start` to `end`, both ends included.
    pub fn points(self, start: f64, end: f64, n: usize) -> Vec<f64> {
        match self {
            SampleSpacing::Linear => linspace(start, end, n),
            SampleSpacing::Logarithmic => logspace(start, end, n).unwrap_or_else(|e| {
                debug!(error = %e, "falling back to linear spacing");
                linspace(start, end, n)
            }),
        }
    }
}

impl fmt::Display for SampleSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::Logarithmic => write!(f, "Logarithmic"),
        }
    }
}

impl FromStr for SampleSpacing {
    type Err = FluidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" | "lin" => Ok(Self::Linear),
            "logarithmic" | "log" => Ok(Self::Logarithmic),
            other => Err(FluidError::InvalidArg {
                what: format!("unknown sample spacing '{}'", other),
            }),
        }
    }
}
