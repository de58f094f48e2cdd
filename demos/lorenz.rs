//! Lorenz attractor: adaptive versus fixed steps.
//!
//! The chaotic regime makes the two runs diverge after a while, so the
//! comparison is of cost and step behavior rather than of end states.
//!
//! Run with:
//!   cargo run --example lorenz

use anyhow::Result;
use rkck45::problems::Lorenz;
use rkck45::{error_norm, IntegratorConfig, Rkck45, TimeVars};
use tracing::Level;

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let sys = Lorenz::default();
    let y0 = [5.0, 5.0, 5.0];
    let config = IntegratorConfig::new(TimeVars::new(0.0, 20.0, 0.01));
    config.validate()?;

    let mut adaptive = Rkck45::new(config);
    let traj = adaptive.run_adaptive(&sys, &y0)?;

    let mut fixed = Rkck45::new(config);
    let reference = fixed.run_fixed(&sys, &y0);

    let steps: Vec<f64> = traj.times().windows(2).map(|w| w[1] - w[0]).collect();
    let smallest = steps.iter().copied().fold(f64::INFINITY, f64::min);
    let largest = steps.iter().copied().fold(0.0, f64::max);

    let adapt = config.adaptvars;
    let worst = traj
        .samples()
        .iter()
        .map(|s| error_norm(&s.error, &s.y, adapt.atol, adapt.rtol))
        .fold(0.0, f64::max);

    println!("Lorenz (sigma = {}, r = {}, b = {:.4})", sys.sigma, sys.r, sys.b);
    println!();
    println!("Adaptive (rtol = {:.0e}, atol = {:.0e})", adapt.rtol, adapt.atol);
    println!("  Samples:        {}", traj.len());
    println!("  Step range:     {smallest:.2e} .. {largest:.2e}");
    println!("  Worst errtest:  {worst:.3}");
    println!("  Accepted steps: {}", adaptive.stats.accepted_steps);
    println!("  Rejected steps: {}", adaptive.stats.rejected_steps);
    println!("  Function evals: {}", adaptive.stats.fn_evals);
    println!();
    println!("Fixed (dt = {})", config.timevars.dt);
    println!("  Samples:        {}", reference.len());
    println!("  Function evals: {}", fixed.stats.fn_evals);
    println!();
    println!("Final states");
    println!("  adaptive: {:?}", traj.final_state());
    println!("  fixed:    {:?}", reference.final_state());

    Ok(())
}
