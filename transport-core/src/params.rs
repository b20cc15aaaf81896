use serde::{Deserialize, Serialize};

use crate::error::{TransportError, TransportResult};

/// Physical coefficients, constant over the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportParams {
    /// Diffusion coefficient D (length^2 / time).
    pub diffusion: f64,
    /// Advection velocity v (length / time). Negative means reversed flow.
    pub velocity: f64,
    /// First-order decay rate k (1 / time).
    pub decay: f64,
}

impl TransportParams {
    pub fn new(diffusion: f64, velocity: f64, decay: f64) -> Self {
        TransportParams {
            diffusion,
            velocity,
            decay,
        }
    }

    /// No transport and no decay: only the source changes the field.
    pub fn quiescent() -> Self {
        TransportParams::new(0.0, 0.0, 0.0)
    }

    pub fn validate(&self) -> TransportResult<()> {
        if !(self.diffusion.is_finite() && self.diffusion >= 0.0) {
            return Err(TransportError::parameter(
                "diffusion",
                self.diffusion,
                "must be finite and >= 0",
            ));
        }
        if !self.velocity.is_finite() {
            return Err(TransportError::parameter(
                "velocity",
                self.velocity,
                "must be finite",
            ));
        }
        if !(self.decay.is_finite() && self.decay >= 0.0) {
            return Err(TransportError::parameter(
                "decay",
                self.decay,
                "must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

impl Default for TransportParams {
    fn default() -> Self {
        TransportParams::new(15.0, 20.0, 0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_velocity_is_allowed() {
        assert!(TransportParams::new(1.0, -5.0, 0.0).validate().is_ok());
    }

    #[test]
    fn rejects_negative_diffusion_and_decay() {
        assert!(TransportParams::new(-1.0, 0.0, 0.0).validate().is_err());
        assert!(TransportParams::new(0.0, 0.0, -0.1).validate().is_err());
        assert!(TransportParams::new(0.0, f64::INFINITY, 0.0).validate().is_err());
        assert!(TransportParams::new(f64::NAN, 0.0, 0.0).validate().is_err());
    }
}
