pub mod error;
pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use error::{Error, Result};

pub use simulation::vector::{dot, add, subtract, scale, average, distance, NVec3};
pub use simulation::states::{BodyState, SystemState};
pub use simulation::params::{Parameters, Units, MassTable, ConvergenceProbe};
pub use simulation::forces::{Acceleration, AccelSet, NewtonianGravity};
pub use simulation::integrator::{movement, constant_step, predictor_corrector_step, quartic_step};
pub use simulation::simulator::Simulator;
pub use simulation::scenario::{Scenario, Reference, BodyError};

pub use configuration::config::{IntegratorConfig, EngineConfig, ParametersConfig, UnitsConfig, MassConvention, BodyConfig, ReferenceConfig, ReferenceBodyConfig, ScenarioConfig, load_scenario};

pub use benchmark::benchmark::{bench_schemes, print_reports, SchemeReport};
