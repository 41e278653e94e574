//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! containing:
//! - engine settings (`Engine`)
//! - the `Simulator` with its mass table and state at t = 0
//! - an optional reference snapshot to measure accuracy against

use std::collections::BTreeMap;

use log::info;

use crate::configuration::config::{BodyConfig, MassConvention, ScenarioConfig};
use crate::error::{Error, Result};
use crate::simulation::engine::Engine;
use crate::simulation::params::{ConvergenceProbe, MassTable, Parameters, Units};
use crate::simulation::simulator::Simulator;
use crate::simulation::states::BodyState;
use crate::simulation::vector::NVec3;

/// Known state of the system at time `t`
#[derive(Debug, Clone)]
pub struct Reference {
    pub t: f64,
    pub bodies: BTreeMap<String, BodyState>,
}

/// Simulated vs. reference mismatch for one body
#[derive(Debug, Clone)]
pub struct BodyError {
    pub name: String,
    pub position_error: f64, // [AU]
    pub velocity_error: f64, // [AU/day]
}

pub struct Scenario {
    pub engine: Engine,
    pub simulator: Simulator,
    pub reference: Option<Reference>,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        // Bodies: split `BodyConfig` into the mass table and the initial state
        let mut masses = BTreeMap::new();
        let mut initial = BTreeMap::new();
        for bc in &cfg.bodies {
            let BodyConfig { name, mass, x, v } = bc;
            if masses.insert(name.clone(), *mass).is_some() {
                return Err(Error::Configuration(format!("body \"{name}\" is listed twice")));
            }
            initial.insert(name.clone(), BodyState::new(NVec3::from(*x), NVec3::from(*v)));
        }
        let masses = match cfg.masses {
            MassConvention::Kilograms => MassTable::Kilograms(masses),
            MassConvention::GravitationalParameter => MassTable::GravitationalParameters(masses),
        };

        // Parameters (runtime) from ParametersConfig, unset fields keep their defaults
        let defaults = Parameters::default();
        let p_cfg = cfg.parameters;
        let u_cfg = cfg.units;
        let units = Units {
            gravitational_constant: u_cfg
                .gravitational_constant
                .unwrap_or(defaults.units.gravitational_constant),
            au: u_cfg.au.unwrap_or(defaults.units.au),
            seconds_per_day: u_cfg.seconds_per_day.unwrap_or(defaults.units.seconds_per_day),
        };
        let parameters = Parameters {
            tolerance: p_cfg.tolerance.unwrap_or(defaults.tolerance),
            max_iterations: p_cfg.max_iterations.unwrap_or(defaults.max_iterations),
            refinement_passes: p_cfg.refinement_passes.unwrap_or(defaults.refinement_passes),
            probe: p_cfg.probe.map(ConvergenceProbe::Body).unwrap_or_default(),
            momentum_reference: p_cfg.momentum_reference,
            units,
        };

        let simulator = Simulator::create(masses, initial, parameters)?;

        // Reference snapshot, if any, must only name simulated bodies
        let reference = match cfg.reference {
            Some(r_cfg) => {
                let mut bodies = BTreeMap::new();
                for rb in r_cfg.bodies {
                    if simulator.index_of(&rb.name).is_none() {
                        return Err(Error::Configuration(format!(
                            "reference body \"{}\" is not simulated",
                            rb.name
                        )));
                    }
                    bodies.insert(rb.name, BodyState::new(NVec3::from(rb.x), NVec3::from(rb.v)));
                }
                Some(Reference { t: r_cfg.t, bodies })
            }
            None => None,
        };

        // Engine (runtime) from EngineConfig; the reference time wins over t_end
        let t_end = match (&reference, p_cfg.t_end) {
            (Some(r), _) => r.t,
            (None, Some(t)) => t,
            (None, None) => {
                return Err(Error::Configuration(
                    "scenario needs either parameters.t_end or a reference".into(),
                ))
            }
        };
        if cfg.engine.steps == 0 {
            return Err(Error::Configuration("engine.steps must be at least 1".into()));
        }
        let engine = Engine {
            integrator: cfg.engine.integrator,
            steps: cfg.engine.steps,
            t_end,
        };

        info!(
            "scenario: {} bodies, {} x {} steps of {} days",
            simulator.names().len(),
            engine.integrator.label(),
            engine.steps,
            engine.dt()
        );

        Ok(Self {
            engine,
            simulator,
            reference,
        })
    }

    /// Advance the simulator over the whole interval with the configured scheme
    pub fn run(&mut self) -> Result<()> {
        let dt = self.engine.dt();
        for _ in 0..self.engine.steps {
            self.simulator.step(self.engine.integrator, dt)?;
        }
        info!("reached t = {} days", self.simulator.state().t);
        Ok(())
    }

    /// Per-body distance between the simulated state and the reference snapshot
    pub fn compare(&self) -> Result<Vec<BodyError>> {
        let reference = self
            .reference
            .as_ref()
            .ok_or_else(|| Error::Configuration("scenario has no reference state".into()))?;

        reference
            .bodies
            .iter()
            .map(|(name, expected)| {
                let actual = self
                    .simulator
                    .body(name)
                    .ok_or_else(|| Error::Configuration(format!("unknown body \"{name}\"")))?;
                Ok(BodyError {
                    name: name.clone(),
                    position_error: Simulator::distance(&actual.x, &expected.x),
                    velocity_error: Simulator::distance(&actual.v, &expected.v),
                })
            })
            .collect()
    }
}
