//! Parameter sweeps.
//!
//! Each parameter value gets its own derivative and its own [`Rkck45`]
//! instance, so the integrations share nothing and run in parallel on the
//! rayon thread pool. Results come back in the order of `params`.

use rayon::prelude::*;

use crate::config::IntegratorConfig;
use crate::solver::{Aborted, Rkck45};
use crate::system::Derivative;
use crate::trajectory::Trajectory;

/// Run one adaptive integration per parameter value.
///
/// `make_system` builds the derivative for a parameter value; it is called
/// once per value, on whichever worker thread picks that value up.
///
/// # Example
/// ```rust
/// use rkck45::{sweep_adaptive, IntegratorConfig, TimeVars};
///
/// let config = IntegratorConfig::new(TimeVars::new(0.0, 1.0, 0.1));
/// let rates = [0.5, 1.0, 2.0];
/// let results = sweep_adaptive(&rates, &[1.0], &config, |&k| {
///     move |y: &[f64; 1], _t: f64| [-k * y[0]]
/// });
///
/// for (k, result) in rates.iter().zip(&results) {
///     let yf = result.as_ref().unwrap().final_state()[0];
///     assert!((yf - (-k).exp()).abs() < 1e-4);
/// }
/// ```
pub fn sweep_adaptive<P, S, F, const N: usize>(
    params: &[P],
    y0: &[f64; N],
    config: &IntegratorConfig,
    make_system: F,
) -> Vec<Result<Trajectory<N>, Aborted<N>>>
where
    P: Sync,
    S: Derivative<N>,
    F: Fn(&P) -> S + Sync,
{
    params
        .par_iter()
        .map(|p| {
            let sys = make_system(p);
            Rkck45::new(*config).run_adaptive(&sys, y0)
        })
        .collect()
}

/// Run one fixed-step integration per parameter value
pub fn sweep_fixed<P, S, F, const N: usize>(
    params: &[P],
    y0: &[f64; N],
    config: &IntegratorConfig,
    make_system: F,
) -> Vec<Trajectory<N>>
where
    P: Sync,
    S: Derivative<N>,
    F: Fn(&P) -> S + Sync,
{
    params
        .par_iter()
        .map(|p| {
            let sys = make_system(p);
            Rkck45::new(*config).run_fixed(&sys, y0)
        })
        .collect()
}
