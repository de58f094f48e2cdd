//! Cash-Karp 4(5) Coefficients
//!
//! Coefficients for the 6-stage embedded Runge-Kutta pair from:
//! Cash, J.R. & Karp, A.H. (1990). "A Variable Order Runge-Kutta Method
//! for Initial Value Problems with Rapidly Varying Right-Hand Sides"
//! ACM Transactions on Mathematical Software 16(3), 201-222.
//!
//! The fifth-order solution advances the state; the difference between the
//! fifth- and fourth-order weights gives the truncation-error estimate.

/// Number of stages in the Cash-Karp method
pub const STAGES: usize = 6;

/// Order of the higher-order method (used for advancing the solution)
pub const ORDER: u8 = 5;

/// Order of the embedded method (used for error estimation)
pub const EMBEDDED_ORDER: u8 = 4;

/// Stage-time fractions for stages 1-5.
///
/// Stage `i` (for `i >= 1`) is evaluated at `t + A[i-1] * h`; stage 0 has
/// no offset, so it has no entry here.
pub const A: [f64; STAGES - 1] = [
    1.0 / 5.0,  // stage 1
    3.0 / 10.0, // stage 2
    3.0 / 5.0,  // stage 3
    1.0,        // stage 4
    7.0 / 8.0,  // stage 5
];

/// Stage-combination weights.
///
/// Row `i-1` builds the argument of stage `i`:
/// y_i = y + h * sum_{j<i} B[i-1][j] * k_j
///
/// Lower-triangular, zero-padded.
pub const B: [[f64; STAGES - 1]; STAGES - 1] = [
    // Row 0 -> k_1
    [1.0 / 5.0, 0.0, 0.0, 0.0, 0.0],
    // Row 1 -> k_2
    [3.0 / 40.0, 9.0 / 40.0, 0.0, 0.0, 0.0],
    // Row 2 -> k_3
    [3.0 / 10.0, -9.0 / 10.0, 6.0 / 5.0, 0.0, 0.0],
    // Row 3 -> k_4
    [-11.0 / 54.0, 5.0 / 2.0, -70.0 / 27.0, 35.0 / 27.0, 0.0],
    // Row 4 -> k_5
    [
        1631.0 / 55296.0,
        175.0 / 512.0,
        575.0 / 13824.0,
        44275.0 / 110592.0,
        253.0 / 4096.0,
    ],
];

/// Weights for the 5th-order solution
///
/// y_{n+1} = y_n + h * sum_{i=0}^{5} C1[i] * k_i
pub const C1: [f64; STAGES] = [
    37.0 / 378.0,
    0.0,
    250.0 / 621.0,
    125.0 / 594.0,
    0.0,
    512.0 / 1771.0,
];

/// Weights for the embedded 4th-order solution
pub const C_STAR: [f64; STAGES] = [
    2825.0 / 27648.0,
    0.0,
    18575.0 / 48384.0,
    13525.0 / 55296.0,
    277.0 / 14336.0,
    1.0 / 4.0,
];

/// Error weights: C1[i] - C_STAR[i]
///
/// err = h * sum_{i=0}^{5} C2[i] * k_i
pub const C2: [f64; STAGES] = [
    C1[0] - C_STAR[0],
    C1[1] - C_STAR[1],
    C1[2] - C_STAR[2],
    C1[3] - C_STAR[3],
    C1[4] - C_STAR[4],
    C1[5] - C_STAR[5],
];

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-14;

    /// Stage nodes including the zero offset of stage 0
    fn nodes() -> [f64; STAGES] {
        let mut c = [0.0; STAGES];
        c[1..].copy_from_slice(&A);
        c
    }

    #[test]
    fn test_row_sum_condition() {
        for i in 0..STAGES - 1 {
            let row_sum: f64 = B[i].iter().sum();
            assert!(
                (row_sum - A[i]).abs() < TOL,
                "Row {} sum = {}, expected a[{}] = {}",
                i,
                row_sum,
                i,
                A[i]
            );
        }
    }

    #[test]
    fn test_rows_are_lower_triangular() {
        for (i, row) in B.iter().enumerate() {
            for (j, &b) in row.iter().enumerate().skip(i + 1) {
                assert_eq!(b, 0.0, "B[{}][{}] should be zero", i, j);
            }
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        let c1_sum: f64 = C1.iter().sum();
        assert!((c1_sum - 1.0).abs() < TOL, "5th order weights sum to {}", c1_sum);

        let c_star_sum: f64 = C_STAR.iter().sum();
        assert!(
            (c_star_sum - 1.0).abs() < TOL,
            "4th order weights sum to {}",
            c_star_sum
        );
    }

    #[test]
    fn test_error_weights_sum_to_zero() {
        let err_sum: f64 = C2.iter().sum();
        assert!(err_sum.abs() < TOL, "Error weights sum to {}", err_sum);
    }

    #[test]
    fn test_quadrature_order_conditions() {
        // sum_i w_i c_i^(p-1) = 1/p for p up to the order of each solution
        let c = nodes();
        for p in 1..=ORDER as i32 {
            let s: f64 = (0..STAGES).map(|i| C1[i] * c[i].powi(p - 1)).sum();
            assert!((s - 1.0 / p as f64).abs() < TOL, "C1 fails p = {}", p);
        }
        for p in 1..=EMBEDDED_ORDER as i32 {
            let s: f64 = (0..STAGES).map(|i| C_STAR[i] * c[i].powi(p - 1)).sum();
            assert!((s - 1.0 / p as f64).abs() < TOL, "C_STAR fails p = {}", p);
        }

        // The embedded solution must not satisfy the fifth-order condition,
        // otherwise the error estimate would vanish for t^4 right-hand sides.
        let s: f64 = (0..STAGES).map(|i| C_STAR[i] * c[i].powi(4)).sum();
        assert!((s - 0.2).abs() > 1e-4);
    }

    #[test]
    fn test_specific_coefficients() {
        assert_eq!(A[4], 0.875);
        assert_eq!(B[3][1], 2.5);
        assert_eq!(C1[5], 512.0 / 1771.0);
        assert_eq!(C2[5], 512.0 / 1771.0 - 0.25);
        assert_eq!(C2[1], 0.0);
    }
}
