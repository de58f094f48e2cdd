//! A single embedded Cash-Karp step.
//!
//! The step is a pure function of `(y, t, h)`: it allocates its stage
//! workspace on the stack, never touches the caller's state, and performs
//! exactly [`STAGES`] derivative evaluations.

use crate::coefficients::{A, B, C1, C2, STAGES};
use crate::system::Derivative;

/// Outcome of one embedded Cash-Karp step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step<const N: usize> {
    /// Fifth-order estimate of the state at `t + h`
    pub y: [f64; N],
    /// Estimated local truncation error (fifth minus fourth order), per component
    pub error: [f64; N],
    /// Time at the end of the step, `t + h`
    pub t: f64,
}

/// Take one Cash-Karp 4(5) step of size `h` from `(t, y)`.
///
/// Stage derivatives are
/// `k[0] = f(y, t)` and `k[i] = f(y + h * sum_{j<i} B[i-1][j] * k[j], t + A[i-1] * h)`,
/// which are combined into the fifth-order solution with [`C1`] and into
/// the error estimate with [`C2`].
#[allow(clippy::needless_range_loop)]
pub fn rkck_step<S, const N: usize>(sys: &S, y: &[f64; N], t: f64, h: f64) -> Step<N>
where
    S: Derivative<N> + ?Sized,
{
    let mut k = [[0.0; N]; STAGES];
    k[0] = sys.derivs(y, t);

    for i in 1..STAGES {
        let mut y_stage = [0.0; N];
        for n in 0..N {
            let mut sum = 0.0;
            for j in 0..i {
                sum += B[i - 1][j] * k[j][n];
            }
            y_stage[n] = y[n] + h * sum;
        }
        k[i] = sys.derivs(&y_stage, t + A[i - 1] * h);
    }

    let mut y_next = [0.0; N];
    let mut error = [0.0; N];
    for n in 0..N {
        let mut sum = 0.0;
        let mut err = 0.0;
        for i in 0..STAGES {
            sum += C1[i] * k[i][n];
            err += C2[i] * k[i][n];
        }
        y_next[n] = y[n] + h * sum;
        error[n] = h * err;
    }

    Step {
        y: y_next,
        error,
        t: t + h,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_polynomial_rhs_is_exact() {
        // y' = 4 t^3, y(0) = 0 -> y = t^4; both embedded solutions are exact
        // for quartic solutions, so the error estimate vanishes too.
        let f = |_y: &[f64; 1], t: f64| [4.0 * t * t * t];
        let step = rkck_step(&f, &[0.0], 0.0, 0.5);

        assert_eq!(step.t, 0.5);
        assert!((step.y[0] - 0.0625).abs() < 1e-15, "y = {}", step.y[0]);
        assert!(step.error[0].abs() < 1e-15, "err = {}", step.error[0]);
    }

    #[test]
    fn test_quintic_rhs_has_nonzero_error() {
        // y' = 5 t^4 is integrated exactly by the 5th-order weights only
        let f = |_y: &[f64; 1], t: f64| [5.0 * t.powi(4)];
        let h = 0.5;
        let step = rkck_step(&f, &[0.0], 0.0, h);

        assert!((step.y[0] - h.powi(5)).abs() < 1e-15);
        assert!(step.error[0].abs() > 1e-6);
    }

    #[test]
    fn test_exactly_six_evaluations() {
        let calls = Cell::new(0u32);
        let f = |y: &[f64; 2], _t: f64| {
            calls.set(calls.get() + 1);
            [y[1], -y[0]]
        };
        rkck_step(&f, &[1.0, 0.0], 0.0, 0.1);
        assert_eq!(calls.get(), STAGES as u32);
    }

    #[test]
    fn test_stage_times() {
        let times = std::cell::RefCell::new(Vec::new());
        let f = |_y: &[f64; 1], t: f64| {
            times.borrow_mut().push(t);
            [1.0]
        };
        rkck_step(&f, &[0.0], 2.0, 0.4);

        let times = times.into_inner();
        assert_eq!(times[0], 2.0);
        for i in 1..STAGES {
            assert_eq!(times[i], 2.0 + A[i - 1] * 0.4);
        }
    }

    #[test]
    fn test_input_state_untouched() {
        let f = |y: &[f64; 2], _t: f64| [y[1], -y[0]];
        let y = [1.0, 0.0];
        let step = rkck_step(&f, &y, 0.0, 0.1);
        assert_eq!(y, [1.0, 0.0]);
        assert!(step.y != y);
    }

    #[test]
    fn test_single_step_accuracy() {
        // y' = -y over one step of 0.1, local error ~ h^6
        let f = |y: &[f64; 1], _t: f64| [-y[0]];
        let step = rkck_step(&f, &[1.0], 0.0, 0.1);
        let exact = (-0.1f64).exp();
        assert!((step.y[0] - exact).abs() < 1e-9);
    }
}
