//! Explicit finite-difference march for 1D diffusion-advection-decay.
//!
//! Each step reads row `n` of the field and writes row `n + 1`:
//!
//! ```text
//! c[n+1,i] = c[n,i] + dt * (D*(c[i+1] - 2c[i] + c[i-1])/dx^2
//!                           - v*(c[i] - c[i-1])/dx
//!                           - k*c[i]) + s[i]
//! ```
//!
//! followed by `c[n+1,0] = 0` upstream and `c[n+1,nx-1] = c[n+1,nx-2]`
//! downstream. The advection difference always looks at `i - 1`, whatever the
//! sign of `v`.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::TransportResult;
use crate::field::ConcentrationField;
use crate::grid::Grid;
use crate::params::TransportParams;
use crate::source::SourceSpec;
use crate::stability::{StabilityReport, StabilityWarning};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransportSolver {
    params: TransportParams,
    source: SourceSpec,
}

impl TransportSolver {
    pub fn new(params: TransportParams, source: SourceSpec) -> Self {
        TransportSolver { params, source }
    }

    pub fn params(&self) -> &TransportParams {
        &self.params
    }

    pub fn source(&self) -> &SourceSpec {
        &self.source
    }

    pub fn stability(&self, grid: &Grid) -> StabilityReport {
        StabilityReport::compute(&self.params, grid.dx(), grid.dt())
    }

    /// March the clean initial state through all `nt` time points.
    ///
    /// Fails only on invalid parameters or an off-grid source. A stability
    /// violation is logged and recorded on the returned [`Solution`], and the
    /// march continues.
    pub fn solve(&self, grid: &Grid) -> TransportResult<Solution> {
        self.params.validate()?;
        self.source.validate(grid.nx())?;

        let (nt, nx) = (grid.nt(), grid.nx());
        let (dx, dt) = (grid.dx(), grid.dt());

        let stability = self.stability(grid);
        let warning = stability.check();

        info!(
            nx,
            nt,
            alpha = stability.alpha,
            beta = stability.beta,
            "solving transport"
        );

        let coeffs = Coefficients::new(&self.params, dx, dt);
        let mut field = ConcentrationField::zeros(nt, nx);
        let mut source = vec![0.0; nx];

        for n in 0..nt.saturating_sub(1) {
            self.source.fill(n, dt, dx, &mut source);
            let (prev, next) = field.step_rows_mut(n);
            coeffs.update_interior(prev, &source, next);
            apply_boundaries(next);
        }

        debug!(peak = ?field.max(), "march finished");

        Ok(Solution {
            grid: grid.clone(),
            params: self.params,
            source: self.source,
            field,
            stability,
            warning,
        })
    }
}

/// Convenience wrapper around [`TransportSolver::solve`].
pub fn solve(
    params: TransportParams,
    source: SourceSpec,
    grid: &Grid,
) -> TransportResult<Solution> {
    TransportSolver::new(params, source).solve(grid)
}

// ---- Internal numeric routines ----

#[derive(Debug, Clone, Copy)]
struct Coefficients {
    diffusion: f64,
    velocity: f64,
    decay: f64,
    dx: f64,
    dx2: f64,
    dt: f64,
}

impl Coefficients {
    fn new(params: &TransportParams, dx: f64, dt: f64) -> Self {
        Coefficients {
            diffusion: params.diffusion,
            velocity: params.velocity,
            decay: params.decay,
            dx,
            dx2: dx * dx,
            dt,
        }
    }

    #[inline]
    fn node(&self, prev: &[f64], source: &[f64], i: usize) -> f64 {
        let c = prev[i];
        let left = prev[i - 1];
        let right = prev[i + 1];

        let diffusion = self.diffusion * (right - 2.0 * c + left) / self.dx2;
        let advection = -self.velocity * (c - left) / self.dx;
        let reaction = -self.decay * c;

        c + self.dt * (diffusion + advection + reaction) + source[i]
    }

    #[cfg(not(feature = "parallel"))]
    fn update_interior(&self, prev: &[f64], source: &[f64], next: &mut [f64]) {
        let nx = prev.len();
        for i in 1..(nx - 1) {
            next[i] = self.node(prev, source, i);
        }
    }

    #[cfg(feature = "parallel")]
    fn update_interior(&self, prev: &[f64], source: &[f64], next: &mut [f64]) {
        use rayon::prelude::*;

        let nx = prev.len();
        next[1..nx - 1]
            .par_iter_mut()
            .enumerate()
            .for_each(|(j, out)| *out = self.node(prev, source, j + 1));
    }
}

fn apply_boundaries(next: &mut [f64]) {
    let nx = next.len();
    next[0] = 0.0;
    next[nx - 1] = next[nx - 2];
}

// ---- Result handed to the visualization side ----

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    grid: Grid,
    params: TransportParams,
    source: SourceSpec,
    field: ConcentrationField,
    stability: StabilityReport,
    warning: Option<StabilityWarning>,
}

/// Concentration along the whole reach at one time point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<'a> {
    pub step: usize,
    pub time: f64,
    pub distances: &'a [f64],
    pub values: &'a [f64],
}

/// Concentration at one node over the whole run.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries<'a> {
    pub node: usize,
    pub distance: f64,
    pub times: &'a [f64],
    pub values: Vec<f64>,
}

impl Solution {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn params(&self) -> &TransportParams {
        &self.params
    }

    pub fn source(&self) -> &SourceSpec {
        &self.source
    }

    pub fn field(&self) -> &ConcentrationField {
        &self.field
    }

    pub fn into_field(self) -> ConcentrationField {
        self.field
    }

    pub fn stability(&self) -> &StabilityReport {
        &self.stability
    }

    pub fn warning(&self) -> Option<&StabilityWarning> {
        self.warning.as_ref()
    }

    pub fn snapshot(&self, step: usize) -> Snapshot<'_> {
        Snapshot {
            step,
            time: self.grid.times()[step],
            distances: self.grid.distances(),
            values: self.field.row(step),
        }
    }

    pub fn time_series(&self, node: usize) -> TimeSeries<'_> {
        TimeSeries {
            node,
            distance: self.grid.distances()[node],
            times: self.grid.times(),
            values: self.field.column(node),
        }
    }

    /// Time at which the injection stops.
    pub fn input_end_time(&self) -> f64 {
        self.source.duration as f64 * self.grid.dt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use approx::assert_relative_eq;

    fn pure_source_grid() -> Grid {
        Grid::from_spacing(5, 3, 1.0, 0.1).unwrap()
    }

    #[test]
    fn pure_source_accumulates() {
        let sol = solve(
            TransportParams::quiescent(),
            SourceSpec::new(2, 1.0, 2),
            &pure_source_grid(),
        )
        .unwrap();
        let f = sol.field();

        assert_eq!(f.row(0), &[0.0; 5]);
        assert_eq!(f.row(1), &[0.0, 0.0, 0.1, 0.0, 0.0]);
        assert_relative_eq!(f.row(2)[2], 0.2);
        for i in [0, 1, 3, 4] {
            assert_eq!(f.row(2)[i], 0.0);
        }
        assert!(sol.warning().is_none());
    }

    #[test]
    fn source_next_to_outlet_is_copied_to_boundary() {
        let sol = solve(
            TransportParams::quiescent(),
            SourceSpec::new(3, 1.0, 2),
            &pure_source_grid(),
        )
        .unwrap();
        assert_eq!(sol.field().row(1), &[0.0, 0.0, 0.0, 0.1, 0.1]);
    }

    #[test]
    fn boundary_source_has_no_effect() {
        let grid = pure_source_grid();
        for loc in [0, 4] {
            let sol = solve(TransportParams::quiescent(), SourceSpec::new(loc, 1.0, 2), &grid)
                .unwrap();
            assert!(sol.field().as_slice().iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn single_step_matches_hand_calculation() {
        // seed one interior value and step it by hand
        let coeffs = Coefficients::new(&TransportParams::new(2.0, 1.0, 0.5), 1.0, 0.1);
        let prev = [0.0, 1.0, 2.0, 0.0];
        let source = [0.0, 0.0, 0.3, 0.0];
        let mut next = [9.0; 4];
        coeffs.update_interior(&prev, &source, &mut next);
        apply_boundaries(&mut next);

        // i=1: diff=2*(2-2+0)=0, adv=-1*(1-0)=-1, react=-0.5 -> 1+0.1*(-1.5)
        assert_relative_eq!(next[1], 0.85, epsilon = 1e-12);
        // i=2: diff=2*(0-4+1)=-6, adv=-1*(2-1)=-1, react=-1 -> 2+0.1*(-8)+0.3
        assert_relative_eq!(next[2], 1.5, epsilon = 1e-12);
        assert_eq!(next[0], 0.0);
        assert_eq!(next[3], next[2]);
    }

    #[test]
    fn unstable_run_still_completes() {
        let grid = Grid::from_spacing(10, 20, 1.0, 1.0).unwrap();
        let sol = solve(
            TransportParams::new(1000.0, 0.0, 0.0),
            SourceSpec::new(5, 1.0, 3),
            &grid,
        )
        .unwrap();
        let w = sol.warning().copied().expect("alpha = 1000");
        assert_eq!(w.alpha, 1000.0);
        assert_eq!(sol.field().shape(), (20, 10));
    }

    #[test]
    fn rejects_off_grid_source_before_marching() {
        let err = solve(
            TransportParams::default(),
            SourceSpec::new(5, 1.0, 1),
            &pure_source_grid(),
        )
        .unwrap_err();
        assert_eq!(err, TransportError::SourceOutOfRange { location: 5, nx: 5 });
    }

    #[test]
    fn single_time_point_is_initial_state() {
        let grid = Grid::from_spacing(4, 1, 1.0, 1.0).unwrap();
        let sol = solve(TransportParams::default(), SourceSpec::new(1, 5.0, 1), &grid).unwrap();
        assert_eq!(sol.field().shape(), (1, 4));
        assert_eq!(sol.field().row(0), &[0.0; 4]);
    }

    #[test]
    fn views_for_plotting() {
        let sol = solve(
            TransportParams::quiescent(),
            SourceSpec::new(2, 1.0, 2),
            &pure_source_grid(),
        )
        .unwrap();

        let snap = sol.snapshot(1);
        assert_eq!(snap.values, sol.field().row(1));
        assert_eq!(snap.distances.len(), 5);
        assert_relative_eq!(snap.time, 0.15, epsilon = 1e-12);

        let series = sol.time_series(2);
        assert_eq!(series.distance, 2.0);
        assert_eq!(series.values.len(), 3);
        assert_relative_eq!(series.values[2], 0.2);

        assert_relative_eq!(sol.input_end_time(), 0.2);
    }
}
