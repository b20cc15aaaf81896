//! Explicit finite-difference solver for pollutant transport along a river.
//!
//! Diffusion, upwind advection, first-order decay and a time-limited point
//! source are marched forward on a fixed grid. The result is a dense
//! `(nt, nx)` concentration field plus the distance and time axes needed to
//! plot it.
//!
//! ```
//! use transport_core::{Grid, SourceSpec, TransportParams, solve};
//!
//! let grid = Grid::new(1400.0, 100, 60.0, 120)?;
//! let sol = solve(TransportParams::default(), SourceSpec::new(20, 2.0, 12), &grid)?;
//! assert!(sol.warning().is_none());
//! assert_eq!(sol.field().shape(), (120, 100));
//! # Ok::<(), transport_core::TransportError>(())
//! ```

pub mod config;
pub mod error;
pub mod field;
pub mod grid;
pub mod params;
pub mod scenario;
pub mod solver;
pub mod source;
pub mod stability;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use field::ConcentrationField;
pub use grid::Grid;
pub use params::TransportParams;
pub use scenario::{Station, TOBOL_STATIONS, monitor_locations, snapshot_indices};
pub use solver::{Snapshot, Solution, TimeSeries, TransportSolver, solve};
pub use source::SourceSpec;
pub use stability::{COURANT_LIMIT, DIFFUSION_LIMIT, StabilityReport, StabilityWarning};
