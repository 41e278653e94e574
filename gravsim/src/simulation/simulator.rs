//! The simulator: a fixed set of bodies, their GM values, and the current state
//!
//! Body names are resolved once at construction into indices (sorted by name);
//! the GM table and every `SystemState` the simulator produces use that order.
//! Only the current state changes over the simulator's lifetime, and it is replaced
//! as a whole after a scheme succeeds.

use std::collections::BTreeMap;

use log::debug;

use super::forces::{AccelSet, NewtonianGravity};
use super::integrator::{constant_step, movement, predictor_corrector_step, quartic_step};
use super::params::{ConvergenceProbe, MassTable, Parameters};
use super::states::{BodyState, SystemState};
use super::vector::{self, NVec3};
use crate::configuration::config::IntegratorConfig;
use crate::error::{Error, Result};

pub struct Simulator {
    names: Vec<String>,
    index: BTreeMap<String, usize>,
    masses: Vec<f64>, // as given: kg or GM, only ratios are used
    forces: AccelSet,
    params: Parameters,
    probe: usize,
    momentum_reference: usize,
    state: SystemState,
}

impl Simulator {
    /// Build a simulator from a mass table and an initial state covering the same bodies.
    ///
    /// Fails with [`Error::Configuration`] when the tables are empty or their key sets
    /// differ, when a mass or state component is not finite, when a unit constant is not
    /// finite and positive or a derived G*M overflows, or when a body named in
    /// `params` does not exist. Precondition not checked here: no two bodies share a position.
    pub fn create(
        masses: MassTable,
        initial: BTreeMap<String, BodyState>,
        params: Parameters,
    ) -> Result<Self> {
        let entries = masses.entries();
        if entries.is_empty() || initial.is_empty() {
            return Err(Error::Configuration(
                "mass table and initial state must both name at least one body".into(),
            ));
        }
        if let Some(name) = entries.keys().find(|name| !initial.contains_key(*name)) {
            return Err(Error::Configuration(format!("body \"{name}\" has a mass but no initial state")));
        }
        if let Some(name) = initial.keys().find(|name| !entries.contains_key(*name)) {
            return Err(Error::Configuration(format!("body \"{name}\" has an initial state but no mass")));
        }
        for (name, m) in entries {
            if !m.is_finite() || *m < 0.0 {
                return Err(Error::Configuration(format!(
                    "mass of \"{name}\" must be finite and >= 0, got {m}"
                )));
            }
        }
        for (name, b) in &initial {
            if !b.x.iter().chain(b.v.iter()).all(|c| c.is_finite()) {
                return Err(Error::Configuration(format!("state of \"{name}\" is not finite")));
            }
        }
        if !params.tolerance.is_finite() || params.tolerance < 0.0 {
            return Err(Error::Configuration("tolerance must be finite and >= 0".into()));
        }
        if params.max_iterations == 0 {
            return Err(Error::Configuration("max_iterations must be at least 1".into()));
        }
        let u = &params.units;
        for (field, value) in [
            ("gravitational_constant", u.gravitational_constant),
            ("au", u.au),
            ("seconds_per_day", u.seconds_per_day),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Configuration(format!(
                    "units.{field} must be finite and > 0, got {value}"
                )));
            }
        }

        // BTreeMap iteration is sorted, so both tables line up index for index
        let names: Vec<String> = initial.keys().cloned().collect();
        let index: BTreeMap<String, usize> = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        // derived G*M can still overflow for extreme unit systems
        let gm_table = masses.gravitational_parameters(&params.units);
        if let Some((name, gm)) = gm_table.iter().find(|(_, gm)| !gm.is_finite()) {
            return Err(Error::Configuration(format!("G*M of \"{name}\" is not finite ({gm})")));
        }
        let gm: Vec<f64> = names.iter().map(|name| gm_table[name]).collect();
        let raw: Vec<f64> = names.iter().map(|name| entries[name]).collect();

        let state = SystemState {
            bodies: initial.into_values().collect(),
            t: 0.0,
        };
        let forces = AccelSet::new().with(NewtonianGravity { gm });

        let lookup = |name: &str| {
            index
                .get(name)
                .copied()
                .ok_or_else(|| Error::Configuration(format!("unknown body \"{name}\"")))
        };

        let probe = match &params.probe {
            ConvergenceProbe::Body(name) => lookup(name)?,
            ConvergenceProbe::LargestAcceleration => {
                let acc = forces.accels(&state)?;
                largest_norm(&acc)
            }
        };

        let momentum_reference = match &params.momentum_reference {
            Some(name) => lookup(name)?,
            None => largest_value(&raw),
        };
        if raw[momentum_reference] <= 0.0 {
            return Err(Error::Configuration(format!(
                "momentum reference \"{}\" must have a positive mass",
                names[momentum_reference]
            )));
        }

        debug!(
            "simulator created with {} bodies, probe \"{}\", momentum reference \"{}\"",
            names.len(),
            names[probe],
            names[momentum_reference]
        );

        Ok(Self {
            names,
            index,
            masses: raw,
            forces,
            params,
            probe,
            momentum_reference,
            state,
        })
    }

    /// Body names in index order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Index of a body in every `SystemState` this simulator produces
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    /// Name of the body used to gauge predictor-corrector convergence
    pub fn probe(&self) -> &str {
        &self.names[self.probe]
    }

    pub fn state(&self) -> &SystemState {
        &self.state
    }

    pub fn body(&self, name: &str) -> Option<&BodyState> {
        self.index_of(name).map(|i| &self.state.bodies[i])
    }

    /// Current state keyed by body name
    pub fn snapshot(&self) -> BTreeMap<String, BodyState> {
        self.names
            .iter()
            .cloned()
            .zip(self.state.bodies.iter().copied())
            .collect()
    }

    /// Net gravitational acceleration on every body of `state` [AU/day^2]
    pub fn accelerations(&self, state: &SystemState) -> Result<Vec<NVec3>> {
        self.forces.accels(state)
    }

    /// Propagate `state` by `dt` holding `acc` constant; `state` is not modified
    pub fn movement(&self, state: &SystemState, acc: &[NVec3], dt: f64) -> Result<SystemState> {
        if state.len() != self.names.len() || acc.len() != self.names.len() {
            return Err(Error::Configuration(format!(
                "expected {} bodies, got a state of {} and {} accelerations",
                self.names.len(),
                state.len(),
                acc.len()
            )));
        }
        Ok(movement(state, acc, dt))
    }

    /// Scheme 1: explicit single-evaluation update
    pub fn update1(&mut self, dt: f64) -> Result<SystemState> {
        let next = constant_step(&self.state, &self.forces, dt)?;
        Ok(self.install(next))
    }

    /// Scheme 2: averaged predictor-corrector
    pub fn update2(&mut self, dt: f64) -> Result<SystemState> {
        let next = predictor_corrector_step(&self.state, &self.forces, &self.params, self.probe, dt)?;
        Ok(self.install(next))
    }

    /// Scheme 3: quadratic-acceleration / quartic-position fit
    pub fn update3(&mut self, dt: f64) -> Result<SystemState> {
        let next = quartic_step(&self.state, &self.forces, self.params.refinement_passes, dt)?;
        Ok(self.install(next))
    }

    /// Advance by `dt` with the selected scheme
    pub fn step(&mut self, integrator: IntegratorConfig, dt: f64) -> Result<SystemState> {
        match integrator {
            IntegratorConfig::Constant => self.update1(dt),
            IntegratorConfig::PredictorCorrector => self.update2(dt),
            IntegratorConfig::Quartic => self.update3(dt),
        }
    }

    /// Total linear momentum in units of the reference body's mass times AU/day.
    /// With the barycenter as origin this should stay close to zero.
    pub fn momentum(&self) -> NVec3 {
        let m_ref = self.masses[self.momentum_reference];
        self.state
            .bodies
            .iter()
            .zip(self.masses.iter())
            .fold(NVec3::zeros(), |p, (b, m)| vector::add(&p, &vector::scale(m / m_ref, &b.v)))
    }

    pub fn distance(a: &NVec3, b: &NVec3) -> f64 {
        vector::distance(a, b)
    }

    fn install(&mut self, next: SystemState) -> SystemState {
        self.state = next;
        self.state.clone()
    }
}

fn largest_norm(values: &[NVec3]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if v.norm() > values[best].norm() {
            best = i;
        }
    }
    best
}

fn largest_value(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if *v > values[best] {
            best = i;
        }
    }
    best
}
