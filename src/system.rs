//! Right-hand side of the ODE system: dy/dt = f(y, t)

/// Derivative function of an ODE system.
///
/// Implementations must be deterministic and free of side effects: a rejected
/// step is retried with the same inputs and expects the same outputs.
///
/// Any closure `Fn(&[f64; N], f64) -> [f64; N]` is a `Derivative<N>`, so
/// one-off problems do not need a named type:
///
/// ```rust
/// use rkck45::Derivative;
///
/// let decay = |y: &[f64; 1], _t: f64| [-y[0]];
/// assert_eq!(decay.derivs(&[2.0], 0.0), [-2.0]);
/// ```
pub trait Derivative<const N: usize> {
    /// Evaluate dy/dt at state `y` and time `t`.
    fn derivs(&self, y: &[f64; N], t: f64) -> [f64; N];
}

impl<F, const N: usize> Derivative<N> for F
where
    F: Fn(&[f64; N], f64) -> [f64; N],
{
    fn derivs(&self, y: &[f64; N], t: f64) -> [f64; N] {
        self(y, t)
    }
}
