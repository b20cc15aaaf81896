use std::io::{self, Write};

use transport_core::{Solution, TOBOL_STATIONS, monitor_locations, snapshot_indices};

/// Plain-text digest of a run: stability numbers, snapshot peaks,
/// monitoring-point peaks and the station table.
pub fn write_summary<W: Write>(w: &mut W, sol: &Solution) -> io::Result<()> {
    let g = sol.grid();
    let p = sol.params();
    let s = sol.source();

    writeln!(
        w,
        "reach {} km, {} nodes (dx={:.3} km); {} days, {} points (dt={:.3} days)",
        g.river_length(),
        g.nx(),
        g.dx(),
        g.days(),
        g.nt(),
        g.dt()
    )?;
    writeln!(
        w,
        "D={} km^2/day, v={} km/day, k={} 1/day; source {} mass/day at {:.1} km until day {:.1}",
        p.diffusion,
        p.velocity,
        p.decay,
        s.rate,
        g.distances()[s.location],
        sol.input_end_time()
    )?;

    let st = sol.stability();
    let verdict = if sol.warning().is_some() {
        "UNSTABLE"
    } else {
        "stable"
    };
    writeln!(w, "alpha={:.4} beta={:.4} ({verdict})", st.alpha, st.beta)?;

    writeln!(w)?;
    writeln!(w, "snapshots:")?;
    for n in snapshot_indices(g.nt()) {
        let snap = sol.snapshot(n);
        let (i, peak) = sol.field().argmax_in_row(n);
        writeln!(
            w,
            "  day {:>6.1}  peak {:>10.5} at {:>7.1} km",
            snap.time, peak, snap.distances[i]
        )?;
    }

    writeln!(w)?;
    writeln!(w, "monitoring points:")?;
    for node in monitor_locations(g.nx(), s.location) {
        let series = sol.time_series(node);
        let (t, peak) = peak_of(series.times, &series.values);
        writeln!(
            w,
            "  {:>7.1} km  peak {:>10.5} on day {:>6.1}",
            series.distance, peak, t
        )?;
    }

    writeln!(w)?;
    writeln!(w, "stations:")?;
    for station in TOBOL_STATIONS
        .iter()
        .filter(|st| st.distance_km <= g.river_length())
    {
        let node = g.nearest_node(station.distance_km);
        let series = sol.time_series(node);
        let (t, peak) = peak_of(series.times, &series.values);
        writeln!(
            w,
            "  {:<12} {:>7.1} km  peak {:>10.5} on day {:>6.1}",
            station.name, station.distance_km, peak, t
        )?;
    }
    Ok(())
}

fn peak_of(times: &[f64], values: &[f64]) -> (f64, f64) {
    let mut best = (times[0], values[0]);
    for (&t, &v) in times.iter().zip(values).skip(1) {
        if v > best.1 {
            best = (t, v);
        }
    }
    best
}
