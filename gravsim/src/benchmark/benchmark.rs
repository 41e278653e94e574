use std::time::Instant;

use crate::configuration::config::{IntegratorConfig, ScenarioConfig};
use crate::error::Result;
use crate::simulation::scenario::Scenario;

/// Accuracy and cost of one scheme over a whole scenario
#[derive(Debug, Clone)]
pub struct SchemeReport {
    pub integrator: IntegratorConfig,
    pub seconds: f64,
    pub worst_body: Option<String>, // largest position error, if a reference exists
    pub worst_position_error: Option<f64>,
    pub momentum: f64, // |p| at the end of the run
}

/// Run every scheme on a fresh copy of `cfg` and time it
pub fn bench_schemes(cfg: &ScenarioConfig) -> Result<Vec<SchemeReport>> {
    let mut reports = Vec::with_capacity(IntegratorConfig::ALL.len());

    for integrator in IntegratorConfig::ALL {
        let mut run_cfg = cfg.clone();
        run_cfg.engine.integrator = integrator;
        let mut scenario = Scenario::build_scenario(run_cfg)?;

        let t0 = Instant::now();
        scenario.run()?;
        let seconds = t0.elapsed().as_secs_f64();

        let (worst_body, worst_position_error) = if scenario.reference.is_some() {
            let worst = scenario
                .compare()?
                .into_iter()
                .max_by(|a, b| a.position_error.total_cmp(&b.position_error));
            match worst {
                Some(e) => (Some(e.name), Some(e.position_error)),
                None => (None, None),
            }
        } else {
            (None, None)
        };

        reports.push(SchemeReport {
            integrator,
            seconds,
            worst_body,
            worst_position_error,
            momentum: scenario.simulator.momentum().norm(),
        });
    }

    Ok(reports)
}

/// Print reports as CSV, paste straight into a spreadsheet
pub fn print_reports(reports: &[SchemeReport]) {
    println!("scheme,seconds,worst_body,worst_position_error_au,momentum");
    for r in reports {
        println!(
            "{},{:.6},{},{},{:e}",
            r.integrator.label(),
            r.seconds,
            r.worst_body.as_deref().unwrap_or("-"),
            r.worst_position_error.map(|e| format!("{e:e}")).unwrap_or_else(|| "-".into()),
            r.momentum
        );
    }
}
