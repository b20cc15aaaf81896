//! Configuration errors raised before any time step is taken.
//!
//! Instability is not an error: see [`crate::stability`].

use thiserror::Error;

pub type TransportResult<T> = Result<T, TransportError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// Fewer than three nodes leaves no interior to update.
    #[error("grid too small: {axis} needs at least {min} points, got {actual}")]
    GridTooSmall {
        axis: &'static str,
        min: usize,
        actual: usize,
    },

    #[error("non-positive spacing: {name}={value}")]
    NonPositiveSpacing { name: &'static str, value: f64 },

    #[error("source location {location} outside grid 0..{nx}")]
    SourceOutOfRange { location: usize, nx: usize },

    #[error("invalid parameter {name}={value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl TransportError {
    pub fn spacing(name: &'static str, value: f64) -> Self {
        Self::NonPositiveSpacing { name, value }
    }

    pub fn parameter(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}
