use serde::{Deserialize, Serialize};

use crate::error::TransportResult;
use crate::grid::Grid;
use crate::params::TransportParams;
use crate::solver::{Solution, TransportSolver};
use crate::source::SourceSpec;

/// Everything needed for one run. Missing fields take the Tobol defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Reach length (km).
    pub river_length: f64,
    /// Spatial nodes.
    pub nx: usize,
    /// Simulated period (days).
    pub days: f64,
    /// Time points.
    pub nt: usize,
    pub params: TransportParams,
    pub source: SourceSpec,
}

impl TransportConfig {
    pub fn grid(&self) -> TransportResult<Grid> {
        Grid::new(self.river_length, self.nx, self.days, self.nt)
    }

    /// Validate everything and return the grid with a ready solver.
    pub fn build(&self) -> TransportResult<(Grid, TransportSolver)> {
        let grid = self.grid()?;
        self.params.validate()?;
        self.source.validate(grid.nx())?;
        Ok((grid, TransportSolver::new(self.params, self.source)))
    }

    pub fn run(&self) -> TransportResult<Solution> {
        let (grid, solver) = self.build()?;
        solver.solve(&grid)
    }
}
