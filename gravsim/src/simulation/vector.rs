//! 3-component vector arithmetic used by the simulator
//!
//! Thin free functions over `nalgebra::Vector3<f64>` so the integration schemes
//! read like the formulas they implement

use nalgebra::Vector3;

pub type NVec3 = Vector3<f64>;

pub fn dot(a: &NVec3, b: &NVec3) -> f64 {
    a.dot(b)
}

pub fn add(a: &NVec3, b: &NVec3) -> NVec3 {
    a + b
}

pub fn subtract(a: &NVec3, b: &NVec3) -> NVec3 {
    a - b
}

pub fn scale(k: f64, a: &NVec3) -> NVec3 {
    k * a
}

/// Component-wise mean of two vectors
pub fn average(a: &NVec3, b: &NVec3) -> NVec3 {
    0.5 * (a + b)
}

/// Euclidean distance between two points
/// Also the convergence metric for the predictor-corrector and the error metric
/// used when comparing simulated and reference positions
pub fn distance(a: &NVec3, b: &NVec3) -> f64 {
    let d = subtract(a, b);
    dot(&d, &d).sqrt()
}
