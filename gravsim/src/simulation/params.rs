//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings handed to a `Simulator` at construction:
//! - predictor-corrector tolerance and iteration cap,
//! - number of refinement passes of the quartic scheme,
//! - which body gauges convergence and which body normalizes momentum,
//! - the unit system (`Units`) used to turn kilogram masses into GM values

use std::collections::BTreeMap;

/// Physical constants that fix the unit system
/// Positions are in AU, velocities in AU/day, times in days
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Units {
    pub gravitational_constant: f64, // G [m^3 kg^-1 s^-2]
    pub au: f64, // astronomical unit [m]
    pub seconds_per_day: f64,
}

impl Default for Units {
    fn default() -> Self {
        Self {
            gravitational_constant: 6.67430e-11,
            au: 1.4959787069098932e+11,
            seconds_per_day: 86_400.0,
        }
    }
}

impl Units {
    /// Gravitational constant in AU^3 kg^-1 day^-2
    pub fn g(&self) -> f64 {
        self.gravitational_constant * (self.seconds_per_day * self.seconds_per_day)
            / (self.au * self.au * self.au)
    }
}

/// Per-body mass values keyed by body name
///
/// The variant tells the simulator how to read the numbers; it never guesses.
#[derive(Debug, Clone, PartialEq)]
pub enum MassTable {
    /// Raw masses in kilograms, multiplied by `Units::g()` at construction
    Kilograms(BTreeMap<String, f64>),
    /// Pre-multiplied gravitational parameters G*M in AU^3/day^2
    GravitationalParameters(BTreeMap<String, f64>),
}

impl MassTable {
    pub fn entries(&self) -> &BTreeMap<String, f64> {
        match self {
            MassTable::Kilograms(m) => m,
            MassTable::GravitationalParameters(m) => m,
        }
    }

    /// GM of every body in AU^3/day^2
    pub fn gravitational_parameters(&self, units: &Units) -> BTreeMap<String, f64> {
        match self {
            MassTable::Kilograms(m) => {
                let g = units.g();
                m.iter().map(|(name, kg)| (name.clone(), g * kg)).collect()
            }
            MassTable::GravitationalParameters(m) => m.clone(),
        }
    }
}

/// Body whose position change gauges convergence of the predictor-corrector
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConvergenceProbe {
    /// A named body, usually the innermost planet
    Body(String),
    /// Whichever body has the largest acceleration at construction time
    #[default]
    LargestAcceleration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub tolerance: f64, // predictor-corrector convergence threshold [AU]
    pub max_iterations: usize, // predictor-corrector iteration cap
    pub refinement_passes: usize, // quartic scheme passes
    pub probe: ConvergenceProbe,
    pub momentum_reference: Option<String>, // None = most massive body
    pub units: Units,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            tolerance: 1.0e-15,
            max_iterations: 1000,
            refinement_passes: 2,
            probe: ConvergenceProbe::default(),
            momentum_reference: None,
            units: Units::default(),
        }
    }
}
