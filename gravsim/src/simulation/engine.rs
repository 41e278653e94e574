//! High-level runtime engine settings
//!
//! Selects the integration scheme and how many equal steps a `Scenario`
//! takes to cover its simulated interval

use crate::configuration::config::IntegratorConfig;

#[derive(Debug, Clone)]
pub struct Engine {
    pub integrator: IntegratorConfig, // constant, predictor_corrector or quartic
    pub steps: usize, // number of steps over the interval
    pub t_end: f64, // simulated interval [days]
}

impl Engine {
    /// Length of one step [days]
    pub fn dt(&self) -> f64 {
        self.t_end / self.steps as f64
    }
}
