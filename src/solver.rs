//! Runge-Kutta-Cash-Karp 4(5) Integrator
//!
//! Drivers built on the embedded Cash-Karp step:
//!
//! - an adaptive driver that accepts, rejects and resizes steps against an
//!   RMS error norm scaled by `atol + rtol * |y|`;
//! - a fixed-step driver that takes constant steps and only reports the
//!   error estimates, for comparison against the adaptive path.
//!
//! Reference: Cash & Karp (1990), ACM TOMS 16(3)

use thiserror::Error;
use tracing::{debug, error, trace, warn};

use crate::coefficients::STAGES;
use crate::config::{AdaptVars, FinalStepPolicy, IntegratorConfig, TimeVars};
use crate::step::rkck_step;
use crate::system::Derivative;
use crate::trajectory::Trajectory;

/// Integration result from a single step attempt
#[derive(Debug, Clone)]
pub struct StepResult<const N: usize> {
    /// Candidate state after the step (5th order solution)
    pub y: [f64; N],
    /// Candidate time, `t + h`
    pub t: f64,
    /// Per-component truncation-error estimate
    pub error: [f64; N],
    /// Normalized RMS error (should be ≤ 1.0 for acceptance)
    pub errtest: f64,
    /// Whether the error test passed
    pub accepted: bool,
}

/// Integration statistics for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Total number of derivative evaluations
    pub fn_evals: u64,
    /// Number of committed steps
    pub accepted_steps: u64,
    /// Number of rejected attempts
    pub rejected_steps: u64,
}

impl Stats {
    fn merge(&mut self, other: &Stats) {
        self.fn_evals += other.fn_evals;
        self.accepted_steps += other.accepted_steps;
        self.rejected_steps += other.rejected_steps;
    }
}

/// Normalized root-mean-square error of a step.
///
/// errtest = sqrt( (1/N) * sum_i ( err[i] / (atol + rtol * |y[i]|) )^2 )
///
/// where `y` is the candidate state. A step passes when the result is ≤ 1.
pub fn error_norm<const N: usize>(error: &[f64; N], y: &[f64; N], atol: f64, rtol: f64) -> f64 {
    if N == 0 {
        return 0.0;
    }
    let sum: f64 = error
        .iter()
        .zip(y.iter())
        .map(|(e, y)| {
            let scaled = e / (atol + rtol * y.abs());
            scaled * scaled
        })
        .sum();
    (sum / N as f64).sqrt()
}

/// `s * errtest^(-1/5)`, the controller's ideal step-size ratio
fn dtchange(errtest: f64, s: f64) -> f64 {
    s * (1.0 / errtest).powf(0.2)
}

/// Step-size factor applied after an accepted step.
///
/// Changes smaller than the `dtpassmin` deadband leave the step alone;
/// larger ones are capped at `dtpassmax`. An error estimate of exactly zero
/// therefore grows the step by `dtpassmax`.
pub fn accept_factor(errtest: f64, adapt: &AdaptVars) -> f64 {
    let change = dtchange(errtest, adapt.s);
    if (1.0 - change).abs() > adapt.dtpassmin {
        change.min(adapt.dtpassmax)
    } else {
        1.0
    }
}

/// Step-size factor applied after a rejected step, clamped to
/// `[dtfailmin, dtfailmax]`
pub fn reject_factor(errtest: f64, adapt: &AdaptVars) -> f64 {
    dtchange(errtest, adapt.s).clamp(adapt.dtfailmin, adapt.dtfailmax)
}

/// Runge-Kutta-Cash-Karp 4(5) integrator
///
/// Holds an immutable [`IntegratorConfig`] and cumulative [`Stats`] over
/// every run made with it.
///
/// # Example
/// ```rust
/// use rkck45::{IntegratorConfig, AdaptVars, Rkck45, TimeVars};
///
/// let config = IntegratorConfig::new(TimeVars::new(0.0, 1.0, 0.05))
///     .with_adaptvars(AdaptVars::with_tolerances(1e-8, 1e-8));
/// let mut solver = Rkck45::new(config);
///
/// let decay = |y: &[f64; 1], _t: f64| [-y[0]];
/// let traj = solver.run_adaptive(&decay, &[1.0]).unwrap();
///
/// assert_eq!(traj.final_time(), 1.0);
/// assert!((traj.final_state()[0] - (-1.0f64).exp()).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct Rkck45 {
    config: IntegratorConfig,
    /// Integration statistics, accumulated across runs
    pub stats: Stats,
}

impl Rkck45 {
    /// Create an integrator for the given configuration
    pub fn new(config: IntegratorConfig) -> Self {
        Self {
            config,
            stats: Stats::default(),
        }
    }

    /// The configuration this integrator runs with
    pub fn config(&self) -> &IntegratorConfig {
        &self.config
    }

    /// Reset statistics
    pub fn reset_stats(&mut self) {
        self.stats = Stats::default();
    }

    /// Perform a single step attempt of size `h` and evaluate its error.
    ///
    /// The caller's state is not modified; the result carries the candidate.
    pub fn step<S, const N: usize>(&mut self, sys: &S, t: f64, y: &[f64; N], h: f64) -> StepResult<N>
    where
        S: Derivative<N> + ?Sized,
    {
        let result = self.attempt(sys, t, y, h);
        self.stats.fn_evals += STAGES as u64;
        if result.accepted {
            self.stats.accepted_steps += 1;
        } else {
            self.stats.rejected_steps += 1;
        }
        result
    }

    fn attempt<S, const N: usize>(&self, sys: &S, t: f64, y: &[f64; N], h: f64) -> StepResult<N>
    where
        S: Derivative<N> + ?Sized,
    {
        let AdaptVars { atol, rtol, .. } = self.config.adaptvars;
        let step = rkck_step(sys, y, t, h);
        let errtest = error_norm(&step.error, &step.y, atol, rtol);
        StepResult {
            y: step.y,
            t: step.t,
            error: step.error,
            errtest,
            accepted: errtest <= 1.0,
        }
    }

    /// Integrate from `tstart` to `tend` with error-controlled step sizes.
    ///
    /// # Returns
    /// * `Ok(trajectory)` ending exactly at `tend`
    /// * `Err(Aborted)` holding the [`IntegrationError`] and the samples
    ///   committed before the failure
    pub fn run_adaptive<S, const N: usize>(
        &mut self,
        sys: &S,
        y0: &[f64; N],
    ) -> Result<Trajectory<N>, Aborted<N>>
    where
        S: Derivative<N> + ?Sized,
    {
        let TimeVars { tstart, tend, dt } = self.config.timevars;
        debug!(tstart, tend, dt, dim = N, "starting adaptive integration");

        let mut traj = Trajectory::new(tstart, *y0);
        let outcome = self.adaptive_loop(sys, &mut traj);
        self.stats.merge(traj.stats());

        match outcome {
            Ok(()) => {
                let stats = traj.stats();
                debug!(
                    samples = traj.len(),
                    accepted = stats.accepted_steps,
                    rejected = stats.rejected_steps,
                    fn_evals = stats.fn_evals,
                    "adaptive integration complete"
                );
                Ok(traj)
            }
            Err(error) => {
                error!(%error, samples = traj.len(), "adaptive integration aborted");
                Err(Aborted {
                    error,
                    partial: traj,
                })
            }
        }
    }

    fn adaptive_loop<S, const N: usize>(
        &self,
        sys: &S,
        traj: &mut Trajectory<N>,
    ) -> Result<(), IntegrationError>
    where
        S: Derivative<N> + ?Sized,
    {
        let TimeVars { tend, dt, .. } = self.config.timevars;
        let adapt = &self.config.adaptvars;

        let mut t = traj.final_time();
        let mut y = traj.final_state();
        let mut h_new = dt;
        let mut steps = 0u64;
        // Set after an accepted half of a split remainder that left the
        // step size alone: the other half lands.
        let mut land_next = false;

        while t < tend {
            steps += 1;
            if steps > adapt.maxsteps {
                return Err(IntegrationError::StepBudgetExceeded {
                    t,
                    h: h_new,
                    steps: adapt.maxsteps,
                });
            }

            // Land exactly on tend, or split the remainder in two rather
            // than leave a sliver of a last step.
            let mut split = false;
            let (mut h, mut landing) = if land_next || t + h_new >= tend {
                (tend - t, true)
            } else if t + 2.0 * h_new > tend {
                split = true;
                ((tend - t) / 2.0, false)
            } else {
                (h_new, false)
            };

            let mut fail_count = 0u64;
            loop {
                let result = self.attempt(sys, t, &y, h);
                traj.stats_mut().fn_evals += STAGES as u64;
                trace!(t, h, errtest = result.errtest, "step attempt");

                let finite = !result.errtest.is_nan() && result.y.iter().all(|v| v.is_finite());
                let forced = landing && self.config.final_step == FinalStepPolicy::Unconditional;
                if finite && (result.accepted || forced) {
                    if !result.accepted {
                        warn!(
                            t,
                            h,
                            errtest = result.errtest,
                            "landing step accepted above tolerance"
                        );
                    }
                    let factor = accept_factor(result.errtest, adapt);
                    h_new = factor * h;
                    land_next = split && factor >= 1.0;
                    t = if landing { tend } else { result.t };
                    y = result.y;
                    traj.push(t, y, result.error);
                    traj.stats_mut().accepted_steps += 1;
                    break;
                }

                let failed_h = h;
                h *= if finite {
                    reject_factor(result.errtest, adapt)
                } else {
                    adapt.dtfailmin
                };
                fail_count += 1;
                landing = false;
                split = false;
                traj.stats_mut().rejected_steps += 1;
                debug!(t, h, errtest = result.errtest, fail_count, finite, "step rejected");

                let exhausted = t + h == t || fail_count > adapt.maxfail;
                if exhausted && !finite {
                    return Err(IntegrationError::NonFiniteState { t, h: failed_h });
                }
                if t + h == t {
                    return Err(IntegrationError::StepUnderflow { t, h, fail_count });
                }
                if fail_count > adapt.maxfail {
                    return Err(IntegrationError::TooManyRejections { t, h, fail_count });
                }
            }
        }

        Ok(())
    }

    /// Integrate from `tstart` to `tend` in constant steps of `dt`.
    ///
    /// The interval is divided into `ceil((tend - tstart) / dt)` steps (at
    /// least one, ignoring rounding noise in the division); only the last
    /// step may be shorter than `dt`, so that it ends exactly on `tend`.
    /// Error estimates are recorded but never acted on.
    pub fn run_fixed<S, const N: usize>(&mut self, sys: &S, y0: &[f64; N]) -> Trajectory<N>
    where
        S: Derivative<N> + ?Sized,
    {
        let TimeVars { tstart, tend, dt } = self.config.timevars;
        let n_steps = ((tend - tstart) / dt * (1.0 - 4.0 * f64::EPSILON))
            .ceil()
            .max(1.0) as u64;
        debug!(tstart, tend, dt, n_steps, "starting fixed-step integration");

        let mut traj = Trajectory::new(tstart, *y0);
        let mut y = *y0;
        for i in 1..=n_steps {
            let t = tstart + (i - 1) as f64 * dt;
            let (h, t_next) = if i == n_steps {
                (tend - t, tend)
            } else {
                (dt, tstart + i as f64 * dt)
            };
            let step = rkck_step(sys, &y, t, h);
            y = step.y;
            traj.push(t_next, y, step.error);
        }

        let stats = traj.stats_mut();
        stats.fn_evals = n_steps * STAGES as u64;
        stats.accepted_steps = n_steps;
        self.stats.merge(traj.stats());
        traj
    }
}

/// Integrate `sys` adaptively from `y0` over the configured interval
pub fn run_adaptive<S, const N: usize>(
    y0: &[f64; N],
    config: &IntegratorConfig,
    sys: &S,
) -> Result<Trajectory<N>, Aborted<N>>
where
    S: Derivative<N> + ?Sized,
{
    Rkck45::new(*config).run_adaptive(sys, y0)
}

/// Integrate `sys` in constant steps of `config.timevars.dt`
pub fn run_fixed<S, const N: usize>(y0: &[f64; N], config: &IntegratorConfig, sys: &S) -> Trajectory<N>
where
    S: Derivative<N> + ?Sized,
{
    Rkck45::new(*config).run_fixed(sys, y0)
}

/// Errors that abort an adaptive integration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrationError {
    /// A rejected step shrank below the time resolution at `t`
    #[error("step size {h:e} no longer advances t = {t} after {fail_count} rejections")]
    StepUnderflow {
        /// Time of the step being retried
        t: f64,
        /// Step size that no longer changes `t`
        h: f64,
        /// Rejections on this step
        fail_count: u64,
    },
    /// A single step was rejected more than `maxfail` times
    #[error("step at t = {t} rejected {fail_count} times (last h = {h:e})")]
    TooManyRejections {
        /// Time of the step being retried
        t: f64,
        /// Step size after the last rejection
        h: f64,
        /// Rejections on this step
        fail_count: u64,
    },
    /// `maxsteps` outer steps were taken without reaching `tend`
    #[error("step budget of {steps} exhausted at t = {t} (next h = {h:e})")]
    StepBudgetExceeded {
        /// Time reached
        t: f64,
        /// Step size proposed for the next step
        h: f64,
        /// The exhausted budget
        steps: u64,
    },
    /// The derivative kept producing NaN or infinite values as the step
    /// shrank, until `maxfail` or the time resolution ran out
    #[error("non-finite state or error estimate in step from t = {t} (h = {h:e})")]
    NonFiniteState {
        /// Time of the failing step
        t: f64,
        /// Size of the last failing attempt
        h: f64,
    },
}

/// An aborted adaptive integration: the cause plus everything committed
/// before it
#[derive(Debug, Clone, Error)]
#[error("integration aborted after {} samples: {error}", .partial.len())]
pub struct Aborted<const N: usize> {
    /// Why the integration stopped
    pub error: IntegrationError,
    /// Samples committed before the failure
    pub partial: Trajectory<N>,
}
