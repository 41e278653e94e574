pub mod vector;
pub mod states;
pub mod params;
pub mod engine;
pub mod forces;
pub mod integrator;
pub mod simulator;
pub mod scenario;
