use serde::{Deserialize, Serialize};

use crate::error::{TransportError, TransportResult};

/// Point injection active for the first `duration` time steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSpec {
    /// Node index of the outfall.
    pub location: usize,
    /// Injection rate (mass / time).
    pub rate: f64,
    /// Number of leading time steps during which the source is on.
    pub duration: usize,
}

impl SourceSpec {
    pub fn new(location: usize, rate: f64, duration: usize) -> Self {
        SourceSpec {
            location,
            rate,
            duration,
        }
    }

    pub fn validate(&self, nx: usize) -> TransportResult<()> {
        if self.location >= nx {
            return Err(TransportError::SourceOutOfRange {
                location: self.location,
                nx,
            });
        }
        if !self.rate.is_finite() {
            return Err(TransportError::parameter("rate", self.rate, "must be finite"));
        }
        Ok(())
    }

    pub fn is_active(&self, step: usize) -> bool {
        step < self.duration
    }

    /// Concentration added at `location` during `step`.
    ///
    /// The injected flux `rate` is spread over one cell of width `dx` for one
    /// step of length `dt`.
    pub fn increment(&self, step: usize, dt: f64, dx: f64) -> f64 {
        if self.is_active(step) {
            self.rate * dt / dx
        } else {
            0.0
        }
    }

    /// Write the source vector for `step` into `buf`, zeroing everything else.
    pub fn fill(&self, step: usize, dt: f64, dx: f64, buf: &mut [f64]) {
        buf.fill(0.0);
        if let Some(slot) = buf.get_mut(self.location) {
            *slot = self.increment(step, dt, dx);
        }
    }
}
