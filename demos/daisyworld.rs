//! Daisyworld run from a JSON parameter file.
//!
//! The configuration mirrors the lab input files: a `timevars` block, an
//! `adaptvars` block with the controller settings, and the model constants.
//! Anything left out takes its default.
//!
//! Run with:
//!   cargo run --example daisyworld

use anyhow::{Context, Result};
use rkck45::problems::Daisyworld;
use rkck45::{run_adaptive, IntegratorConfig};
use serde::Deserialize;
use tracing::{info, Level};

const PARAMS: &str = r#"{
    "config": {
        "timevars": { "tstart": 0.0, "tend": 200.0, "dt": 0.1 },
        "adaptvars": { "rtol": 1e-6, "atol": 1e-6, "maxsteps": 5000 }
    },
    "model": { "l": 1.0, "chi": 0.3, "r": 0.2 },
    "initvars": { "whiteconc": 0.2, "blackconc": 0.7 }
}"#;

#[derive(Debug, Deserialize)]
struct InitVars {
    whiteconc: f64,
    blackconc: f64,
}

#[derive(Debug, Deserialize)]
struct Params {
    config: IntegratorConfig,
    #[serde(default)]
    model: Daisyworld,
    initvars: InitVars,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let params: Params = serde_json::from_str(PARAMS).context("parsing parameters")?;
    params.config.validate().context("checking configuration")?;
    info!(timevars = ?params.config.timevars, luminosity = params.model.l, "loaded parameters");

    let sys = params.model;
    let y0 = [params.initvars.whiteconc, params.initvars.blackconc];
    let traj = run_adaptive(&y0, &params.config, &sys)?;

    println!("{:>8}  {:>8}  {:>8}  {:>8}", "t", "white", "black", "Te [K]");
    for sample in traj.iter().step_by(traj.len().div_ceil(25).max(1)) {
        let (_, _, te) = sys.temperatures(&sample.y);
        println!(
            "{:>8.2}  {:>8.4}  {:>8.4}  {:>8.2}",
            sample.t, sample.y[0], sample.y[1], te
        );
    }

    let yf = traj.final_state();
    let (tw, tb, te) = sys.temperatures(&yf);
    println!();
    println!("Final state at t = {}", traj.final_time());
    println!("  White coverage: {:.4}   ({tw:.2} K)", yf[0]);
    println!("  Black coverage: {:.4}   ({tb:.2} K)", yf[1]);
    println!("  Emission temperature: {te:.2} K");
    println!("  {:?}", traj.stats());

    Ok(())
}
