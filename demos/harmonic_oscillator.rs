//! Adaptive integration of the undamped oscillator over one period, at a
//! range of tolerances. Rejections and run summaries are logged at debug level.
//!
//! Run with:
//!   cargo run --example harmonic_oscillator

use std::f64::consts::PI;

use anyhow::Result;
use rkck45::problems::HarmonicOscillator;
use rkck45::{AdaptVars, IntegratorConfig, Rkck45, TimeVars};
use tracing::Level;

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    let sys = HarmonicOscillator::default();
    let omega = (sys.gamma / sys.m).sqrt();
    let period = 2.0 * PI / omega;

    for tol in [1e-4, 1e-6, 1e-8, 1e-10] {
        let config = IntegratorConfig::new(TimeVars::new(0.0, period, 0.1))
            .with_adaptvars(AdaptVars::with_tolerances(tol, tol));
        config.validate()?;

        let mut solver = Rkck45::new(config);
        let traj = solver.run_adaptive(&sys, &[1.0, 0.0])?;
        let yf = traj.final_state();

        println!("rtol = atol = {tol:.0e}");
        println!("  y(T)  = {:.12}   (exact: 1)", yf[0]);
        println!("  y'(T) = {:.12}   (exact: 0)", yf[1]);
        println!("  Samples:        {}", traj.len());
        println!("  Accepted steps: {}", solver.stats.accepted_steps);
        println!("  Rejected steps: {}", solver.stats.rejected_steps);
        println!("  Function evals: {}", solver.stats.fn_evals);
        println!();
    }

    Ok(())
}
