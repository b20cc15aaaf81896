//! Stability numbers of the explicit scheme.
//!
//! Exceeding a limit is advisory only: the solver logs a warning and keeps
//! marching, so unstable regimes can still be explored.

use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::params::TransportParams;

/// Upper limit on the diffusion number `D*dt/dx^2`.
pub const DIFFUSION_LIMIT: f64 = 0.5;
/// Upper limit on the magnitude of the Courant number `v*dt/dx`.
pub const COURANT_LIMIT: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StabilityReport {
    /// Diffusion number.
    pub alpha: f64,
    /// Courant number, signed.
    pub beta: f64,
}

impl StabilityReport {
    pub fn compute(params: &TransportParams, dx: f64, dt: f64) -> Self {
        StabilityReport {
            alpha: params.diffusion * dt / (dx * dx),
            beta: params.velocity * dt / dx,
        }
    }

    pub fn is_stable(&self) -> bool {
        !(self.alpha > DIFFUSION_LIMIT || self.beta.abs() > COURANT_LIMIT)
    }

    pub fn warning(&self) -> Option<StabilityWarning> {
        if self.is_stable() {
            None
        } else {
            Some(StabilityWarning {
                alpha: self.alpha,
                beta: self.beta,
            })
        }
    }

    /// Like [`StabilityReport::warning`], but also logs the advisory.
    pub fn check(&self) -> Option<StabilityWarning> {
        let w = self.warning()?;
        warn!(alpha = w.alpha, beta = w.beta, "{w}");
        Some(w)
    }
}

/// Non-fatal advisory: the explicit scheme may oscillate or diverge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StabilityWarning {
    pub alpha: f64,
    pub beta: f64,
}

impl fmt::Display for StabilityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "numerical instability possible: alpha={} (limit {}), beta={} (limit {}); try decreasing dt or increasing dx",
            self.alpha, DIFFUSION_LIMIT, self.beta, COURANT_LIMIT
        )
    }
}
