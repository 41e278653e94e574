use gravsim::{load_scenario, IntegratorConfig, Scenario, ScenarioConfig};
use gravsim::{bench_schemes, print_reports};

use anyhow::{Context, Result};
use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under scenarios/
    #[arg(short, default_value = "solar_system.yaml")]
    file_name: String,

    /// Override the scenario's integrator: constant, predictor_corrector or quartic
    #[arg(short)]
    scheme: Option<IntegratorConfig>,

    /// Override the scenario's step count
    #[arg(short = 'n')]
    steps: Option<usize>,

    /// Run and time every scheme instead of the configured one
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    load_scenario(&config_path).with_context(|| format!("failed to load scenario {}", config_path.display()))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    if let Some(scheme) = args.scheme {
        scenario_cfg.engine.integrator = scheme;
    }
    if let Some(steps) = args.steps {
        scenario_cfg.engine.steps = steps;
    }

    if args.bench {
        let reports = bench_schemes(&scenario_cfg)?;
        print_reports(&reports);
        return Ok(());
    }

    let mut scenario = Scenario::build_scenario(scenario_cfg)?;
    println!(
        "{}: simulating {} steps of {} days per step.",
        scenario.engine.integrator.label(),
        scenario.engine.steps,
        scenario.engine.dt()
    );
    let params = scenario.simulator.parameters();
    match scenario.engine.integrator {
        IntegratorConfig::PredictorCorrector => println!(
            "probe {}, tolerance {:e} AU, at most {} iterations",
            scenario.simulator.probe(),
            params.tolerance,
            params.max_iterations
        ),
        IntegratorConfig::Quartic => println!("{} refinement passes", params.refinement_passes),
        IntegratorConfig::Constant => {}
    }
    scenario.run()?;

    if scenario.reference.is_some() {
        for e in scenario.compare()? {
            println!(
                "{:<8} position error = {:e} AU, velocity error = {:e} AU/day",
                e.name, e.position_error, e.velocity_error
            );
        }
    }
    let p = scenario.simulator.momentum();
    println!("momentum = [{:e}, {:e}, {:e}]", p.x, p.y, p.z);

    Ok(())
}
