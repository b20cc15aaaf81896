//! Tobol River reference scenario and the plotting selections that go with it.
//!
//! None of this feeds back into the solver: stations are fixed markers for
//! whoever draws the results.

use serde::Serialize;

use crate::config::TransportConfig;
use crate::params::TransportParams;
use crate::source::SourceSpec;

pub const TOBOL_LENGTH_KM: f64 = 1400.0;
pub const TOBOL_NODES: usize = 100;
pub const TOBOL_DAYS: f64 = 60.0;
pub const TOBOL_TIME_POINTS: usize = 120;
pub const TOBOL_INPUT_RATE: f64 = 2.0;

/// Named monitoring point along the reach.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Station {
    pub name: &'static str,
    pub distance_km: f64,
}

pub const TOBOL_STATIONS: [Station; 8] = [
    Station { name: "Headwaters", distance_km: 0.0 },
    Station { name: "Station 2", distance_km: 200.0 },
    Station { name: "Station 3", distance_km: 400.0 },
    Station { name: "Station 4", distance_km: 600.0 },
    Station { name: "Station 5", distance_km: 800.0 },
    Station { name: "Station 6", distance_km: 1000.0 },
    Station { name: "Station 7", distance_km: 1200.0 },
    Station { name: "River Mouth", distance_km: 1400.0 },
];

/// Outfall a fifth of the way downstream, on for the first tenth of the run.
pub fn tobol_source(nx: usize, nt: usize) -> SourceSpec {
    SourceSpec::new(nx / 5, TOBOL_INPUT_RATE, nt / 10)
}

impl Default for SourceSpec {
    fn default() -> Self {
        tobol_source(TOBOL_NODES, TOBOL_TIME_POINTS)
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        TransportConfig {
            river_length: TOBOL_LENGTH_KM,
            nx: TOBOL_NODES,
            days: TOBOL_DAYS,
            nt: TOBOL_TIME_POINTS,
            params: TransportParams::default(),
            source: SourceSpec::default(),
        }
    }
}

/// Time steps worth a snapshot: start, 1/6, 1/3, 2/3 and the last step.
pub fn snapshot_indices(nt: usize) -> [usize; 5] {
    [0, nt / 6, nt / 3, 2 * nt / 3, nt.saturating_sub(1)]
}

/// Nodes worth a time series: inlet, outfall, quarter points and outlet.
pub fn monitor_locations(nx: usize, input_location: usize) -> [usize; 6] {
    [
        0,
        input_location,
        nx / 4,
        nx / 2,
        3 * nx / 4,
        nx.saturating_sub(1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tobol_outfall() {
        let s = SourceSpec::default();
        assert_eq!(s.location, 20);
        assert_eq!(s.duration, 12);
        assert_eq!(s.rate, 2.0);
    }

    #[test]
    fn selections_for_default_grid() {
        assert_eq!(snapshot_indices(120), [0, 20, 40, 80, 119]);
        assert_eq!(monitor_locations(100, 20), [0, 20, 25, 50, 75, 99]);
    }

    #[test]
    fn stations_span_the_reach() {
        assert_eq!(TOBOL_STATIONS.first().unwrap().distance_km, 0.0);
        assert_eq!(TOBOL_STATIONS.last().unwrap().distance_km, TOBOL_LENGTH_KM);
        assert!(
            TOBOL_STATIONS
                .windows(2)
                .all(|w| w[0].distance_km < w[1].distance_km)
        );
    }
}
