use serde::Serialize;
use tracing::debug;

use crate::error::{TransportError, TransportResult};

/// Minimum node count: two boundaries plus at least one interior node.
pub const MIN_NODES: usize = 3;

/// Space and time discretization of a river reach.
///
/// Nodes are evenly spaced over `[0, river_length]` with
/// `dx = river_length / (nx - 1)`. The time axis has `nt` points over
/// `[0, days]`, while the marching step is `dt = days / nt`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    nx: usize,
    nt: usize,
    dx: f64,
    dt: f64,
    river_length: f64,
    days: f64,
    distances: Vec<f64>,
    times: Vec<f64>,
}

impl Grid {
    pub fn new(river_length: f64, nx: usize, days: f64, nt: usize) -> TransportResult<Grid> {
        check_counts(nx, nt)?;

        let dx = river_length / ((nx - 1) as f64);
        let dt = days / (nt as f64);
        check_spacing(dx, dt)?;

        debug!(nx, nt, dx, dt, "grid constructed");

        Ok(Grid {
            nx,
            nt,
            dx,
            dt,
            river_length,
            days,
            distances: linspace(river_length, nx),
            times: linspace(days, nt),
        })
    }

    /// Build a grid from explicit step sizes.
    pub fn from_spacing(nx: usize, nt: usize, dx: f64, dt: f64) -> TransportResult<Grid> {
        check_counts(nx, nt)?;
        check_spacing(dx, dt)?;

        let river_length = dx * ((nx - 1) as f64);
        let days = dt * (nt as f64);

        Ok(Grid {
            nx,
            nt,
            dx,
            dt,
            river_length,
            days,
            distances: linspace(river_length, nx),
            times: linspace(days, nt),
        })
    }

    // ---- Accessors ----

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn nt(&self) -> usize {
        self.nt
    }

    pub fn dx(&self) -> f64 {
        self.dx
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn river_length(&self) -> f64 {
        self.river_length
    }

    pub fn days(&self) -> f64 {
        self.days
    }

    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Index of the node closest to `distance`, clamped to the reach.
    pub fn nearest_node(&self, distance: f64) -> usize {
        let idx = (distance / self.dx).round();
        if idx <= 0.0 {
            0
        } else {
            (idx as usize).min(self.nx - 1)
        }
    }
}

fn check_counts(nx: usize, nt: usize) -> TransportResult<()> {
    if nx < MIN_NODES {
        return Err(TransportError::GridTooSmall {
            axis: "space",
            min: MIN_NODES,
            actual: nx,
        });
    }
    if nt < 1 {
        return Err(TransportError::GridTooSmall {
            axis: "time",
            min: 1,
            actual: nt,
        });
    }
    Ok(())
}

fn check_spacing(dx: f64, dt: f64) -> TransportResult<()> {
    // written so NaN fails too
    if !(dx.is_finite() && dx > 0.0) {
        return Err(TransportError::spacing("dx", dx));
    }
    if !(dt.is_finite() && dt > 0.0) {
        return Err(TransportError::spacing("dt", dt));
    }
    Ok(())
}

/// `n` evenly spaced points over `[0, stop]`, endpoint included.
fn linspace(stop: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![0.0];
    }
    let step = stop / ((n - 1) as f64);
    let mut out: Vec<f64> = (0..n).map(|i| i as f64 * step).collect();
    out[n - 1] = stop;
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_reach_spacing() {
        let g = Grid::new(1400.0, 100, 60.0, 120).unwrap();
        assert_relative_eq!(g.dx(), 1400.0 / 99.0);
        assert_relative_eq!(g.dt(), 0.5);
        assert_eq!(g.distances().len(), 100);
        assert_eq!(g.times().len(), 120);
        assert_eq!(g.distances()[0], 0.0);
        assert_eq!(*g.distances().last().unwrap(), 1400.0);
        assert_eq!(*g.times().last().unwrap(), 60.0);
    }

    #[test]
    fn rejects_too_few_nodes() {
        let err = Grid::new(10.0, 2, 1.0, 10).unwrap_err();
        assert_eq!(
            err,
            TransportError::GridTooSmall {
                axis: "space",
                min: 3,
                actual: 2
            }
        );
        assert!(Grid::from_spacing(5, 0, 1.0, 0.1).is_err());
    }

    #[test]
    fn rejects_bad_spacing() {
        assert!(matches!(
            Grid::new(0.0, 10, 1.0, 10),
            Err(TransportError::NonPositiveSpacing { name: "dx", .. })
        ));
        assert!(matches!(
            Grid::new(10.0, 10, -1.0, 10),
            Err(TransportError::NonPositiveSpacing { name: "dt", .. })
        ));
        assert!(Grid::from_spacing(5, 3, f64::NAN, 0.1).is_err());
        assert!(Grid::from_spacing(5, 3, 1.0, 0.0).is_err());
    }

    #[test]
    fn from_spacing_derives_extent() {
        let g = Grid::from_spacing(5, 3, 1.0, 0.1).unwrap();
        assert_relative_eq!(g.river_length(), 4.0);
        assert_relative_eq!(g.days(), 0.3);
        assert_eq!(g.distances(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn nearest_node_clamps() {
        let g = Grid::new(1400.0, 100, 60.0, 120).unwrap();
        assert_eq!(g.nearest_node(-5.0), 0);
        assert_eq!(g.nearest_node(0.0), 0);
        assert_eq!(g.nearest_node(1400.0), 99);
        assert_eq!(g.nearest_node(9000.0), 99);
        assert_eq!(g.nearest_node(200.0), 14);
    }
}
