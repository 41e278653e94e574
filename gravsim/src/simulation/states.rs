//! Core state types for the N-body simulation.
//!
//! - `BodyState`   one body's position and velocity at a single instant
//! - `SystemState` the snapshot of every body, indexed in the simulator's body order,
//!   together with the elapsed simulated time `t`
//!
//! Snapshots are replaced wholesale by the integrators, never edited in place mid-step.

use super::vector::NVec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub x: NVec3, // position [AU]
    pub v: NVec3, // velocity [AU/day]
}

impl BodyState {
    pub fn new(x: NVec3, v: NVec3) -> Self {
        Self { x, v }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SystemState {
    pub bodies: Vec<BodyState>, // one entry per body, same order as the mass table
    pub t: f64, // elapsed time [days]
}

impl SystemState {
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
