//! Fixed-step time integrators for the N-body system
//!
//! Every scheme is built from two primitives: an acceleration snapshot from
//! `AccelSet` and `movement`, which propagates a state under constant
//! accelerations. Schemes never touch their input; they return the state at `t + dt`.
//!
//! - `constant_step`            one evaluation, acceleration held constant over the step
//! - `predictor_corrector_step` start/end accelerations averaged until the probe body settles
//! - `quartic_step`             quadratic fit of acceleration over the step, integrated twice

use log::{debug, trace};

use super::forces::AccelSet;
use super::params::Parameters;
use super::states::{BodyState, SystemState};
use super::vector::{add, average, distance, scale, NVec3};
use crate::error::{Error, Result};

/// Propagate every body in `state` by `dt` under the constant accelerations `acc`.
///
/// pos' = pos + vel*dt + (1/2)acc*dt^2
/// vel' = vel + acc*dt
pub fn movement(state: &SystemState, acc: &[NVec3], dt: f64) -> SystemState {
    let bodies = state
        .bodies
        .iter()
        .zip(acc.iter())
        .map(|(b, a)| {
            let dv = scale(dt, a);
            let dr = add(&scale(dt, &b.v), &scale(dt / 2.0, &dv));
            BodyState {
                x: add(&b.x, &dr),
                v: add(&b.v, &dv),
            }
        })
        .collect();

    SystemState {
        bodies,
        t: state.t + dt,
    }
}

/// Scheme 1: accelerations at the start of the step, held constant over the whole step
pub fn constant_step(sys: &SystemState, forces: &AccelSet, dt: f64) -> Result<SystemState> {
    let acc = forces.accels(sys)?;
    Ok(movement(sys, &acc, dt))
}

/// Scheme 2: averaged predictor-corrector
///
/// Predicts with the start accelerations, then repeatedly re-propagates the starting
/// state with the mean of the start accelerations and the accelerations at the current
/// guess. Stops once the `probe` body moves by no more than `params.tolerance` between
/// guesses, or fails with [`Error::Convergence`] after `params.max_iterations` tries.
pub fn predictor_corrector_step(
    sys: &SystemState,
    forces: &AccelSet,
    params: &Parameters,
    probe: usize,
    dt: f64,
) -> Result<SystemState> {
    // Predict: accelerations at t, held constant over the whole step
    let acc1 = forces.accels(sys)?;
    let mut guess = movement(sys, &acc1, dt);

    let mut diff = f64::INFINITY;
    for iteration in 1..=params.max_iterations {
        // Accelerations at the end of the step, from the current guess
        let acc2 = forces.accels(&guess)?;

        // Mean of start and end accelerations for each body
        let acc: Vec<NVec3> = acc1
            .iter()
            .zip(acc2.iter())
            .map(|(a, b)| average(a, b))
            .collect();

        // Correct: re-propagate the starting state, never the previous guess
        let refined = movement(sys, &acc, dt);

        // How far the probe body moved between guesses
        diff = distance(&refined.bodies[probe].x, &guess.bodies[probe].x);
        guess = refined;

        if diff <= params.tolerance {
            debug!("predictor-corrector converged in {iteration} iterations (diff {diff:e})");
            return Ok(guess);
        }
    }

    Err(Error::Convergence {
        iterations: params.max_iterations,
        difference: diff,
    })
}

/// Quadratic model of one body's acceleration across a step.
///
/// Fitted through samples at t = 0, dt/2 and dt and expressed in the half-step
/// variable s = t / (dt/2), so s = 0, 1, 2 at the samples:
///
/// a(s) = e s^2 + f s + g
/// e = (a0 - 2 a1 + a2) / 2,  f = (4 a1 - 3 a0 - a2) / 2,  g = a0
///
/// Working in s keeps the fit free of divisions by dt.
struct QuadraticFit {
    e: NVec3,
    f: NVec3,
    g: NVec3,
}

impl QuadraticFit {
    fn through(a0: &NVec3, a1: &NVec3, a2: &NVec3) -> Self {
        Self {
            e: 0.5 * (a0 - 2.0 * a1 + a2),
            f: 0.5 * (4.0 * a1 - 3.0 * a0 - a2),
            g: *a0,
        }
    }

    /// Velocity gained after s half-steps of length h: h * integral of a over [0, s]
    fn delta_v(&self, h: f64, s: f64) -> NVec3 {
        h * (self.g * s + self.f * (s * s / 2.0) + self.e * (s * s * s / 3.0))
    }

    /// Position gained after s half-steps from the starting state
    fn delta_x(&self, start: &BodyState, h: f64, s: f64) -> NVec3 {
        let s2 = s * s;
        start.v * (h * s)
            + h * h * (self.g * (s2 / 2.0) + self.f * (s2 * s / 6.0) + self.e * (s2 * s2 / 12.0))
    }
}

/// Scheme 3: quadratic-acceleration / quartic-position fit
///
/// Seeds the half and full step states with two constant-acceleration half steps,
/// then runs `passes` refinement passes. Each pass fits a quadratic through the
/// accelerations at t = 0, dt/2, dt for every body, integrates it twice from the
/// starting state, and refreshes the half-step position plus the full-step position
/// and velocity. No convergence check is made between passes.
pub fn quartic_step(sys: &SystemState, forces: &AccelSet, passes: usize, dt: f64) -> Result<SystemState> {
    let h = dt / 2.0; // half step

    // Seed: accelerations at t, then a constant-acceleration half step to t + h
    let acc1 = forces.accels(sys)?;
    let mut half = movement(sys, &acc1, h);

    // Accelerations at t + h, then the second half step to t + dt
    let mut acc2 = forces.accels(&half)?;
    let mut full = movement(&half, &acc2, h);

    // Accelerations at t + dt
    let mut acc3 = forces.accels(&full)?;

    for pass in 0..passes {
        for (i, start) in sys.bodies.iter().enumerate() {
            // Fit a(s) through the three samples of body i
            let fit = QuadraticFit::through(&acc1[i], &acc2[i], &acc3[i]);

            // Half-step position (s = 1); its velocity is not needed
            half.bodies[i].x = start.x + fit.delta_x(start, h, 1.0);

            // Full-step position and velocity (s = 2)
            full.bodies[i].x = start.x + fit.delta_x(start, h, 2.0);
            full.bodies[i].v = start.v + fit.delta_v(h, 2.0);
        }
        trace!("quartic refinement pass {} of {passes}", pass + 1);

        // accelerations for the next pass; the last pass has no consumer
        if pass + 1 < passes {
            acc2 = forces.accels(&half)?;
            acc3 = forces.accels(&full)?;
        }
    }

    // `full` was seeded through `half`, so its time is already sys.t + dt
    Ok(full)
}
