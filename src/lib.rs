//! # RKCK45: Runge-Kutta-Cash-Karp 4(5) Integrator
//!
//! An adaptive embedded Runge-Kutta ODE integrator with error-controlled
//! step-size adaptation, plus a fixed-step driver for reference runs.
//!
//! ## Features
//!
//! - 6-stage embedded Cash-Karp pair: 5th-order solution, 4th-order
//!   embedded solution for the truncation-error estimate
//! - Step acceptance against an RMS error norm scaled by `atol + rtol * |y|`
//! - Step resizing with a safety factor, growth/shrink bounds and a
//!   deadband that leaves marginal changes alone
//! - Hard bounds on rejections per step and total steps, and detection of
//!   steps too small to advance time
//! - Full `(time, state, error)` trajectories for analysis and plotting
//! - Parallel parameter sweeps over independent integrations
//!
//! ## Basic Usage
//!
//! ```rust
//! use rkck45::{run_adaptive, AdaptVars, Derivative, IntegratorConfig, TimeVars};
//!
//! // Define your ODE system
//! struct HarmonicOscillator { omega: f64 }
//!
//! impl Derivative<2> for HarmonicOscillator {
//!     fn derivs(&self, y: &[f64; 2], _t: f64) -> [f64; 2] {
//!         [y[1], -self.omega * self.omega * y[0]]
//!     }
//! }
//!
//! let sys = HarmonicOscillator { omega: 1.0 };
//! let config = IntegratorConfig::new(TimeVars::new(0.0, 10.0, 0.1))
//!     .with_adaptvars(AdaptVars::with_tolerances(1e-8, 1e-8));
//!
//! let traj = run_adaptive(&[1.0, 0.0], &config, &sys).unwrap();
//! assert_eq!(traj.final_time(), 10.0);
//! ```
//!
//! ## Fixed Steps
//!
//! [`run_fixed`] takes constant steps of `dt` with the same formula and
//! never rejects, but still records each step's error estimate, so the
//! estimate can be compared against the true error:
//!
//! ```rust
//! use rkck45::{run_fixed, problems::LinearForced, IntegratorConfig, TimeVars};
//!
//! let config = IntegratorConfig::new(TimeVars::new(0.0, 1.0, 0.05));
//! let traj = run_fixed(&[1.0], &config, &LinearForced::relaxation());
//!
//! let exact = LinearForced::relaxation_exact(1.0);
//! assert!((traj.final_state()[0] - exact).abs() < 1e-4);
//! ```
//!
//! ## Failure
//!
//! An adaptive run that cannot meet its tolerances within its bounds stops
//! with an [`Aborted`] error, which carries the [`IntegrationError`] and the
//! partial trajectory:
//!
//! - [`IntegrationError::TooManyRejections`]: more than `maxfail` rejected
//!   attempts on one step
//! - [`IntegrationError::StepUnderflow`]: the step shrank until `t + h == t`
//! - [`IntegrationError::StepBudgetExceeded`]: more than `maxsteps` steps
//! - [`IntegrationError::NonFiniteState`]: the derivative kept producing NaN
//!   or infinite values however far the step was shrunk
//!
//! ## Logging
//!
//! The drivers emit [`tracing`] events: `trace` per step attempt, `debug` per
//! rejection and per completed run, `warn` for landing steps accepted above
//! tolerance, `error` for aborted runs. Install any subscriber to see them.
//!
//! ## References
//!
//! 1. Cash, J.R. & Karp, A.H. (1990). "A Variable Order Runge-Kutta Method
//!    for Initial Value Problems with Rapidly Varying Right-Hand Sides".
//!    ACM Transactions on Mathematical Software 16(3).
//!
//! 2. Press, W.H. et al. (1992). "Numerical Recipes", section 16.2,
//!    "Adaptive Stepsize Control for Runge-Kutta".

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod coefficients;
pub mod config;
pub mod problems;
pub mod solver;
pub mod step;
pub mod sweep;
pub mod system;
pub mod trajectory;

pub use config::{AdaptVars, ConfigError, FinalStepPolicy, IntegratorConfig, TimeVars};
pub use solver::{
    accept_factor, error_norm, reject_factor, run_adaptive, run_fixed, Aborted, IntegrationError,
    Rkck45, Stats, StepResult,
};
pub use step::{rkck_step, Step};
pub use sweep::{sweep_adaptive, sweep_fixed};
pub use system::Derivative;
pub use trajectory::{Sample, Trajectory};
