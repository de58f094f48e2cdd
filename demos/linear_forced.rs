//! Fixed-step integration of dy/dt = -y + t + 1.
//!
//! Compares the numerical solution and the per-step error estimate against
//! the exact solution y(t) = t + e^(-t), then halves the step a few times to
//! show fifth-order convergence.
//!
//! Run with:
//!   cargo run --example linear_forced

use rkck45::problems::LinearForced;
use rkck45::{run_fixed, IntegratorConfig, TimeVars};

fn main() {
    let sys = LinearForced::relaxation();
    let config = IntegratorConfig::new(TimeVars::new(0.0, 1.0, 0.05));
    let traj = run_fixed(&[1.0], &config, &sys);

    println!("Linear forced equation, dt = 0.05");
    println!("  {:>6}  {:>14}  {:>10}  {:>10}", "t", "y", "true err", "estimate");
    for sample in traj.iter().step_by(4) {
        let exact = LinearForced::relaxation_exact(sample.t);
        println!(
            "  {:>6.3}  {:>14.10}  {:>10.2e}  {:>10.2e}",
            sample.t,
            sample.y[0],
            (sample.y[0] - exact).abs(),
            sample.error[0].abs()
        );
    }
    println!();

    println!("Convergence at t = 2");
    let exact = LinearForced::relaxation_exact(2.0);
    let mut previous: Option<f64> = None;
    for dt in [0.4, 0.2, 0.1, 0.05, 0.025] {
        let config = IntegratorConfig::new(TimeVars::new(0.0, 2.0, dt));
        let yf = run_fixed(&[1.0], &config, &sys).final_state()[0];
        let err = (yf - exact).abs();
        match previous {
            Some(prev) => println!("  dt = {dt:<6} error = {err:.3e}   ratio = {:.1}", prev / err),
            None => println!("  dt = {dt:<6} error = {err:.3e}"),
        }
        previous = Some(err);
    }
}
