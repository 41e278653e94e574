//! Acceleration contributors for the n-body engine
//!
//! Defines the acceleration trait, the set that sums terms, and direct
//! Newtonian gravity over all pairs of bodies

use crate::error::{Error, Result};
use crate::simulation::states::SystemState;
use crate::simulation::vector::{dot, scale, subtract, NVec3};

/// Collection of acceleration terms
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
        }
    }

    /// Add an acceleration term
    pub fn with(mut self, term: impl Acceleration + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total accelerations for all bodies in `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_accels(&self, sys: &SystemState, out: &mut [NVec3]) -> Result<()> {
        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec3::zeros();
        }
        for term in &self.terms {
            term.acceleration(sys, out)?;
        }
        Ok(())
    }

    /// Fresh acceleration snapshot for `sys`, one vector per body
    pub fn accels(&self, sys: &SystemState) -> Result<Vec<NVec3>> {
        let mut out = vec![NVec3::zeros(); sys.bodies.len()];
        self.accumulate_accels(sys, &mut out)?;
        Ok(out)
    }
}

/// Acceleration source operating on a [`SystemState`]
/// Implementations add their contribution into `out[i]` for each body
pub trait Acceleration {
    fn acceleration(&self, sys: &SystemState, out: &mut [NVec3]) -> Result<()>;
}

/// Newtonian point-mass gravity, direct n^2 sum, no softening
/// `gm[i]` is G*M of body i in AU^3/day^2
pub struct NewtonianGravity {
    pub gm: Vec<f64>,
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, sys: &SystemState, out: &mut [NVec3]) -> Result<()> {
        let n = sys.bodies.len();
        if n != self.gm.len() || n != out.len() {
            return Err(Error::Configuration(format!(
                "state has {} bodies, gravity term has {}, output buffer has {}",
                n,
                self.gm.len(),
                out.len()
            )));
        }

        // Loop over each unordered pair (i, j) with i < j
        for i in 0..n {
            let xi = sys.bodies[i].x; // position of body i
            for j in (i + 1)..n {
                let xj = sys.bodies[j].x; // position of body j

                // r is the displacement vector from i to j
                // i is pulled along +r, j is pulled along -r
                let r = subtract(&xj, &xi);

                // Squared separation |r|^2
                let r2 = dot(&r, &r);

                // 1 / |r|^3: GM / r^2 times the unit vector r / |r|
                // Coincident or nearly coincident bodies (r^3 underflows) have no finite value
                let inv_r3 = 1.0 / (r2 * r2.sqrt());
                if !inv_r3.is_finite() {
                    return Err(Error::Domain(format!(
                        "bodies {i} and {j} are too close to separate (|r|^2 = {r2:e}) at {:?}",
                        xi.as_slice()
                    )));
                }

                // Acceleration on body i due to body j:
                // toward j, scaled by GM of j
                out[i] += scale(self.gm[j] * inv_r3, &r);

                // Acceleration on body j due to body i:
                // toward i, scaled by GM of i
                out[j] -= scale(self.gm[i] * inv_r3, &r);
            }
        }
        Ok(())
    }
}
