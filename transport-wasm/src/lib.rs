use transport_core::{Solution, TransportConfig};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct Solver {
    config: TransportConfig,
    solution: Option<Solution>,
}

#[wasm_bindgen]
impl Solver {
    #[wasm_bindgen(constructor)]
    pub fn new(river_length: f64, nx: usize, days: f64, nt: usize) -> Result<Solver, JsValue> {
        let inner = Solver::with_grid(river_length, nx, days, nt)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(inner)
    }

    // Parameters
    pub fn set_diffusion(&mut self, d: f64) { self.config.params.diffusion = d; }
    pub fn set_velocity(&mut self, v: f64) { self.config.params.velocity = v; }
    pub fn set_decay(&mut self, k: f64) { self.config.params.decay = k; }
    pub fn set_source(&mut self, location: usize, rate: f64, duration: usize) {
        self.config.source.location = location;
        self.config.source.rate = rate;
        self.config.source.duration = duration;
    }

    pub fn nx(&self) -> usize { self.config.nx }
    pub fn nt(&self) -> usize { self.config.nt }

    // Copy-based JS access; empty until run() succeeds
    pub fn get_field(&self) -> Vec<f64> {
        self.solution
            .as_ref()
            .map(|s| s.field().as_slice().to_vec())
            .unwrap_or_default()
    }
    pub fn get_distances(&self) -> Vec<f64> {
        self.solution.as_ref().map(|s| s.grid().distances().to_vec()).unwrap_or_default()
    }
    pub fn get_times(&self) -> Vec<f64> {
        self.solution.as_ref().map(|s| s.grid().times().to_vec()).unwrap_or_default()
    }

    // Solve + timing (WASM-only)
    pub fn run(&mut self) -> Result<RunInfo, JsValue> {
        let t0 = now_ms();
        let (alpha, beta, stable) =
            self.solve_inner().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let t1 = now_ms();
        Ok(RunInfo { compute_ms: t1 - t0, alpha, beta, stable })
    }
}

impl Solver {
    fn with_grid(
        river_length: f64,
        nx: usize,
        days: f64,
        nt: usize,
    ) -> transport_core::TransportResult<Solver> {
        let config = TransportConfig {
            river_length,
            nx,
            days,
            nt,
            source: transport_core::scenario::tobol_source(nx, nt),
            ..TransportConfig::default()
        };
        config.grid()?;
        Ok(Solver { config, solution: None })
    }

    fn solve_inner(&mut self) -> transport_core::TransportResult<(f64, f64, bool)> {
        let sol = self.config.run()?;
        let st = *sol.stability();
        let stable = sol.warning().is_none();
        self.solution = Some(sol);
        Ok((st.alpha, st.beta, stable))
    }
}

#[wasm_bindgen]
pub struct RunInfo {
    compute_ms: f64,
    alpha: f64,
    beta: f64,
    stable: bool,
}

#[wasm_bindgen]
impl RunInfo {
    pub fn compute_ms(&self) -> f64 { self.compute_ms }
    pub fn alpha(&self) -> f64 { self.alpha }
    pub fn beta(&self) -> f64 { self.beta }
    pub fn stable(&self) -> bool { self.stable }
}


fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
