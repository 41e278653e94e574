use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the simulator and scenario loading.
///
/// Every failure is a deterministic function of the input state; nothing here is retryable.
#[derive(Debug, Error)]
pub enum Error {
    /// Mass table and state do not describe the same set of bodies, or a parameter is unusable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Input outside the domain of the dynamics (e.g. two bodies at the same position).
    #[error("domain error: {0}")]
    Domain(String),

    /// Predictor-corrector refinement did not reach the tolerance within the iteration cap.
    #[error("no convergence after {iterations} iterations (last difference {difference:e} AU)")]
    Convergence { iterations: usize, difference: f64 },

    /// Reading a scenario file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Scenario file is not valid YAML for [`crate::ScenarioConfig`].
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_informative() {
        let e = Error::Configuration("body \"Pluto\" has no mass".to_string());
        let msg = format!("{e}");
        assert!(msg.contains("configuration error"));
        assert!(msg.contains("Pluto"));
    }

    #[test]
    fn convergence_error_reports_iterations() {
        let e = Error::Convergence { iterations: 12, difference: 3.5e-9 };
        let msg = e.to_string();
        assert!(msg.contains("12 iterations"));
        assert!(msg.contains("3.5e-9"));
    }
}
