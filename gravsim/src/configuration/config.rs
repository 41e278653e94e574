//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – integration scheme and step count
//! - [`ParametersConfig`] – total time and numerical knobs of the schemes
//! - [`UnitsConfig`]      – optional override of the physical constants
//! - [`MassConvention`]   – whether body masses are kilograms or G*M values
//! - [`BodyConfig`]       – name, mass and initial state for each body
//! - [`ReferenceConfig`]  – optional known state at a later time, for comparison
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   integrator: "quartic"   # or "constant", "predictor_corrector"
//!   steps: 10000
//!
//! parameters:
//!   t_end: 365.25           # days; ignored when a reference is given
//!   tolerance: 1.0e-15      # predictor-corrector threshold [AU]
//!   max_iterations: 1000
//!   refinement_passes: 2
//!   probe: "Mercury"        # omit to use the body with the largest acceleration
//!   momentum_reference: "Earth"
//!
//! masses: "gm"              # or "kg"
//!
//! bodies:
//!   - name: "Sun"
//!     mass: 0.2959122082855911e-03
//!     x: [ 0.0, 0.0, 0.0 ]
//!     v: [ 0.0, 0.0, 0.0 ]
//!
//! reference:
//!   t: 365.25
//!   bodies:
//!     - name: "Sun"
//!       x: [ 0.0, 0.0, 0.0 ]
//!       v: [ 0.0, 0.0, 0.0 ]
//! ```
//!
//! The scenario builder maps this configuration into a `Simulator`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// Which integration scheme the engine uses
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegratorConfig {
    #[serde(rename = "constant")] // one acceleration evaluation, held constant over the step
    Constant,

    #[serde(rename = "predictor_corrector")] // start/end accelerations averaged until converged
    PredictorCorrector,

    #[serde(rename = "quartic")] // quadratic acceleration fit, quartic position
    Quartic,
}

impl IntegratorConfig {
    pub const ALL: [IntegratorConfig; 3] = [
        IntegratorConfig::Constant,
        IntegratorConfig::PredictorCorrector,
        IntegratorConfig::Quartic,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            IntegratorConfig::Constant => "constant",
            IntegratorConfig::PredictorCorrector => "predictor_corrector",
            IntegratorConfig::Quartic => "quartic",
        }
    }
}

impl std::str::FromStr for IntegratorConfig {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        IntegratorConfig::ALL
            .into_iter()
            .find(|i| i.label() == s)
            .ok_or_else(|| format!("unknown integrator \"{s}\", expected constant, predictor_corrector or quartic"))
    }
}

/// High-level engine configuration
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    pub integrator: IntegratorConfig, // scheme used for every step
    pub steps: usize, // number of equal steps over the simulated interval
}

/// Numerical parameters for a scenario
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ParametersConfig {
    pub t_end: Option<f64>, // simulated interval [days], required without a reference
    pub tolerance: Option<f64>, // predictor-corrector threshold [AU]
    pub max_iterations: Option<usize>, // predictor-corrector iteration cap
    pub refinement_passes: Option<usize>, // quartic scheme passes
    pub probe: Option<String>, // convergence probe body
    pub momentum_reference: Option<String>, // momentum normalization body
}

/// Physical constants, each falling back to the default unit system
#[derive(Deserialize, Debug, Clone, Default)]
pub struct UnitsConfig {
    pub gravitational_constant: Option<f64>, // [m^3 kg^-1 s^-2]
    pub au: Option<f64>, // [m]
    pub seconds_per_day: Option<f64>,
}

/// How to read `BodyConfig::mass`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MassConvention {
    #[serde(rename = "kg")]
    Kilograms,

    #[serde(rename = "gm")] // G*M in AU^3/day^2
    GravitationalParameter,
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub name: String,
    pub mass: f64, // kg or G*M, per `ScenarioConfig::masses`
    pub x: [f64; 3], // position [AU]
    pub v: [f64; 3], // velocity [AU/day]
}

/// A body's state in the reference snapshot
#[derive(Deserialize, Debug, Clone)]
pub struct ReferenceBodyConfig {
    pub name: String,
    pub x: [f64; 3],
    pub v: [f64; 3],
}

/// Known state of the system `t` days after the initial state
#[derive(Deserialize, Debug, Clone)]
pub struct ReferenceConfig {
    pub t: f64,
    pub bodies: Vec<ReferenceBodyConfig>,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub units: UnitsConfig,
    pub masses: MassConvention,
    pub bodies: Vec<BodyConfig>,
    pub reference: Option<ReferenceConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}

/// Read and parse a scenario file
pub fn load_scenario(path: &Path) -> Result<ScenarioConfig> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_yaml::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_BODY: &str = r#"
engine:
  integrator: "predictor_corrector"
  steps: 100
parameters:
  t_end: 10.0
  probe: "Earth"
masses: "gm"
bodies:
  - name: "Sun"
    mass: 2.959122082855911e-4
    x: [0.0, 0.0, 0.0]
    v: [0.0, 0.0, 0.0]
  - name: "Earth"
    mass: 8.997011346712499e-10
    x: [1.0, 0.0, 0.0]
    v: [0.0, 0.0172, 0.0]
"#;

    #[test]
    fn parses_minimal_scenario() {
        let cfg = ScenarioConfig::from_yaml(TWO_BODY).unwrap();
        assert_eq!(cfg.engine.integrator, IntegratorConfig::PredictorCorrector);
        assert_eq!(cfg.engine.steps, 100);
        assert_eq!(cfg.masses, MassConvention::GravitationalParameter);
        assert_eq!(cfg.bodies.len(), 2);
        assert_eq!(cfg.bodies[1].x, [1.0, 0.0, 0.0]);
        assert_eq!(cfg.parameters.probe.as_deref(), Some("Earth"));
        assert!(cfg.parameters.tolerance.is_none());
        assert!(cfg.units.au.is_none());
        assert!(cfg.reference.is_none());
    }

    #[test]
    fn rejects_unknown_integrator() {
        let text = TWO_BODY.replace("predictor_corrector", "rk4");
        assert!(matches!(
            ScenarioConfig::from_yaml(&text),
            Err(crate::error::Error::Yaml(_))
        ));
    }

    #[test]
    fn integrator_names_round_trip_through_from_str() {
        for integrator in IntegratorConfig::ALL {
            assert_eq!(integrator.label().parse::<IntegratorConfig>(), Ok(integrator));
        }
        assert!("verlet".parse::<IntegratorConfig>().is_err());
    }
}
