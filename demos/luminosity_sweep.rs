//! Daisyworld steady states across a range of solar luminosities.
//!
//! Each luminosity is an independent integration; the sweep runs them in
//! parallel and reports the coverage and emission temperature each one
//! settles to.
//!
//! Run with:
//!   cargo run --example luminosity_sweep

use anyhow::Result;
use rkck45::problems::Daisyworld;
use rkck45::{sweep_adaptive, AdaptVars, IntegratorConfig, TimeVars};
use tracing::{warn, Level};

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = IntegratorConfig::new(TimeVars::new(0.0, 200.0, 0.1)).with_adaptvars(AdaptVars {
        maxsteps: 5000,
        ..AdaptVars::with_tolerances(1e-6, 1e-6)
    });
    config.validate()?;

    let luminosities: Vec<f64> = (0..=40).map(|i| 0.5 + 0.025 * i as f64).collect();
    let y0 = [0.01, 0.01];

    let results = sweep_adaptive(&luminosities, &y0, &config, |&l| Daisyworld {
        l,
        ..Daisyworld::default()
    });

    println!("{:>6}  {:>8}  {:>8}  {:>8}  {:>6}", "L", "white", "black", "Te [K]", "steps");
    for (&l, result) in luminosities.iter().zip(&results) {
        match result {
            Ok(traj) => {
                let sys = Daisyworld {
                    l,
                    ..Daisyworld::default()
                };
                let yf = traj.final_state();
                let (_, _, te) = sys.temperatures(&yf);
                println!(
                    "{:>6.3}  {:>8.4}  {:>8.4}  {:>8.2}  {:>6}",
                    l,
                    yf[0],
                    yf[1],
                    te,
                    traj.stats().accepted_steps
                );
            }
            Err(aborted) => warn!(luminosity = l, "{aborted}"),
        }
    }

    Ok(())
}
