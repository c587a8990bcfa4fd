//! Gram-Schmidt QR decomposition.
//!
//! For a square `A`, produces orthogonal `Q` and upper-triangular `R` with
//! `A = QR`. Column `i` of `Q` is the normalized residual of column `i` of `A`
//! after the components along `Q₀..Qᵢ₋₁` have been removed:
//!
//! ```text
//! for i in 0..n:
//!     R[i,i] = ||u_i||,  Q_i = u_i / R[i,i]
//!     for j in i+1..n:
//!         R[i,j] = Q_i · u_j
//!         u_j   -= R[i,j] Q_i
//! ```
//!
//! Each residual is projected against the accepted columns once more before
//! it is normalized, and the normalized column gets a second pass after that.
//! Both corrections are folded into `R`.
//!
//! A residual that is zero, or shorter than [`DEPENDENCE_TOL`] times its
//! original column, carries no direction of its own. Such a column is
//! numerically dependent on the earlier ones: `R[i,i]` is set to zero and
//! `Qᵢ` is filled with a unit vector from the orthogonal complement of
//! `Q₀..Qᵢ₋₁`. `Q` is therefore orthogonal for every square input, including
//! singular ones such as graph Laplacians.

use super::ensure_square;
use crate::error::Result;
use ndarray::{Array1, Array2};

/// Relative residual norm below which a column counts as linearly dependent.
pub const DEPENDENCE_TOL: f64 = 1e-12;

/// Output of [`gram_schmidt`].
#[derive(Debug, Clone)]
pub struct QrDecomposition {
    /// Orthogonal factor. Columns are always orthonormal.
    pub q: Array2<f64>,
    /// Upper-triangular factor. Entries below the diagonal are exactly zero.
    pub r: Array2<f64>,
}

/// QR-decompose a square matrix by Gram-Schmidt orthogonalization.
///
/// A column whose residual is numerically zero gets `R[i,i] = 0` and a `Q`
/// column completing the orthonormal basis, so `A = QR` and `QᵀQ = I` both
/// hold.
///
/// # Errors
///
/// [`Error::NotSquare`](crate::Error::NotSquare) when `a` is not square and
/// [`Error::EmptyInput`](crate::Error::EmptyInput) for a 0×0 matrix.
pub fn gram_schmidt(a: &Array2<f64>) -> Result<QrDecomposition> {
    let n = ensure_square(a)?;

    let mut u = a.clone();
    let mut q = Array2::<f64>::zeros((n, n));
    let mut r = Array2::<f64>::zeros((n, n));

    for i in 0..n {
        // Reorthogonalize against the accepted columns.
        for l in 0..i {
            let s = q.column(l).dot(&u.column(i));
            r[[l, i]] += s;
            u.column_mut(i).scaled_add(-s, &q.column(l));
        }

        let column_norm = a.column(i).dot(&a.column(i)).sqrt();
        let norm = u.column(i).dot(&u.column(i)).sqrt();

        if norm <= DEPENDENCE_TOL * column_norm {
            log::debug!(
                "gram_schmidt: column {i} is dependent (residual {norm:e}), completing the basis"
            );
            r[[i, i]] = 0.0;
            let direction = complement_direction(&q, i);
            q.column_mut(i).assign(&direction);
        } else {
            let mut v = &u.column(i) / norm;
            let mut shifts = vec![0.0; i];
            for (l, shift) in shifts.iter_mut().enumerate() {
                *shift = q.column(l).dot(&v);
                v.scaled_add(-*shift, &q.column(l));
            }
            let v_norm = v.dot(&v).sqrt();
            // u_i = norm * (v_norm * q_i + sum_l shift_l * q_l)
            for (l, shift) in shifts.into_iter().enumerate() {
                r[[l, i]] += norm * shift;
            }
            r[[i, i]] = norm * v_norm;
            q.column_mut(i).assign(&(v / v_norm));
        }

        for j in (i + 1)..n {
            let rij = q.column(i).dot(&u.column(j));
            r[[i, j]] = rij;
            u.column_mut(j).scaled_add(-rij, &q.column(i));
        }
    }

    Ok(QrDecomposition { q, r })
}

/// Unit vector orthogonal to the first `i` columns of `q` (`i < n`).
///
/// Projects every standard basis vector twice against those columns and keeps
/// the longest residual. At least one residual has squared norm `(n - i) / n`.
fn complement_direction(q: &Array2<f64>, i: usize) -> Array1<f64> {
    let n = q.nrows();
    let mut best = Array1::<f64>::zeros(n);
    let mut best_norm = 0.0;

    for m in 0..n {
        let mut v = Array1::<f64>::zeros(n);
        v[m] = 1.0;
        for _ in 0..2 {
            for l in 0..i {
                let s = q.column(l).dot(&v);
                v.scaled_add(-s, &q.column(l));
            }
        }
        let v_norm = v.dot(&v).sqrt();
        if v_norm > best_norm {
            best_norm = v_norm;
            best = v;
        }
    }

    best / best_norm
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::Error;
    use ndarray::array;
    use proptest::prelude::*;

    fn max_abs_diff(a: &Array2<f64>, b: &Array2<f64>) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y).abs())
            .fold(0.0, f64::max)
    }

    fn assert_strictly_upper(r: &Array2<f64>) {
        for i in 0..r.nrows() {
            for j in 0..i {
                assert_eq!(r[[i, j]], 0.0, "R[{i},{j}] must be exactly zero");
            }
        }
    }

    #[test]
    fn test_integer_matrix_textbook_factors() {
        let a = array![[12.0, -51.0, 4.0], [6.0, 167.0, -68.0], [-4.0, 24.0, -41.0]];
        let expected_q = array![
            [6.0 / 7.0, -69.0 / 175.0, -58.0 / 175.0],
            [3.0 / 7.0, 158.0 / 175.0, 6.0 / 175.0],
            [-2.0 / 7.0, 6.0 / 35.0, -33.0 / 35.0],
        ];
        let expected_r = array![[14.0, 21.0, -14.0], [0.0, 175.0, -70.0], [0.0, 0.0, 35.0]];

        let qr = gram_schmidt(&a).unwrap();
        assert!(max_abs_diff(&qr.q, &expected_q) < 1e-2);
        assert!(max_abs_diff(&qr.r, &expected_r) < 1e-2);
        assert_strictly_upper(&qr.r);
    }

    #[test]
    fn test_float_matrix_factors() {
        let a = array![[2.11, 2.79, 3.72], [10.32, 8.74, 6.88], [9.97, 4.17, 8.79]];
        let expected_q = array![[0.15, 0.42, 0.90], [0.71, 0.59, -0.39], [0.69, -0.70, 0.21]];
        let expected_r = array![[14.50, 9.49, 11.48], [0.0, 3.39, -0.53], [0.0, 0.0, 2.53]];

        let qr = gram_schmidt(&a).unwrap();
        assert!(max_abs_diff(&qr.q, &expected_q) < 1e-2);
        assert!(max_abs_diff(&qr.r, &expected_r) < 1e-2);
        assert_strictly_upper(&qr.r);
    }

    #[test]
    fn test_non_square_rejected() {
        let a = array![[1.0, -1.0, 4.0], [1.0, 4.0, -2.0], [1.0, 4.0, 2.0], [1.0, -1.0, 0.0]];
        assert_eq!(
            gram_schmidt(&a).unwrap_err(),
            Error::NotSquare { rows: 4, cols: 3 }
        );
    }

    #[test]
    fn test_empty_rejected() {
        let a = Array2::<f64>::zeros((0, 0));
        assert_eq!(gram_schmidt(&a).unwrap_err(), Error::EmptyInput);
    }

    #[test]
    fn test_zero_column_completes_basis() {
        let a = array![[1.0, 0.0], [0.0, 0.0]];
        let qr = gram_schmidt(&a).unwrap();
        assert_eq!(qr.r[[1, 1]], 0.0);
        assert_eq!(qr.q.column(1).to_vec(), vec![0.0, 1.0]);
        assert!(max_abs_diff(&qr.q.dot(&qr.r), &a) < 1e-12);
    }

    #[test]
    fn test_zero_matrix_gives_identity_q() {
        let a = Array2::<f64>::zeros((3, 3));
        let qr = gram_schmidt(&a).unwrap();
        assert!(max_abs_diff(&qr.q, &Array2::eye(3)) < 1e-15);
        assert!(qr.r.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_repeated_column_keeps_q_orthogonal() {
        // The second residual is pure rounding noise.
        let a = array![[1.0, 1.0], [1.0, 1.0]];
        let qr = gram_schmidt(&a).unwrap();
        let qtq = qr.q.t().dot(&qr.q);
        assert!(max_abs_diff(&qtq, &Array2::eye(2)) < 1e-12);
        assert!(qr.r[[1, 1]].abs() < 1e-12);
        assert!(max_abs_diff(&qr.q.dot(&qr.r), &a) < 1e-12);
        assert_strictly_upper(&qr.r);
    }

    #[test]
    fn test_singular_matrix_keeps_q_orthogonal() {
        // Rows sum to zero, like a graph Laplacian.
        let a = array![[1.0, -0.5, -0.5], [-0.5, 1.0, -0.5], [-0.5, -0.5, 1.0]];
        let qr = gram_schmidt(&a).unwrap();
        let qtq = qr.q.t().dot(&qr.q);
        assert!(max_abs_diff(&qtq, &Array2::eye(3)) < 1e-12);
        assert!(max_abs_diff(&qr.q.dot(&qr.r), &a) < 1e-12);
    }

    #[test]
    fn test_rank_one_matrix_keeps_q_orthogonal() {
        let x = array![[0.3], [-1.7], [2.2], [0.9]];
        let a = x.dot(&x.t());
        let qr = gram_schmidt(&a).unwrap();
        let qtq = qr.q.t().dot(&qr.q);
        assert!(max_abs_diff(&qtq, &Array2::eye(4)) < 1e-12);
        assert!(max_abs_diff(&qr.q.dot(&qr.r), &a) < 1e-12);
    }

    fn square_matrix() -> impl Strategy<Value = Array2<f64>> {
        (2usize..8).prop_flat_map(|n| {
            proptest::collection::vec(-10.0f64..10.0, n * n)
                .prop_map(move |v| Array2::from_shape_vec((n, n), v).unwrap())
        })
    }

    proptest! {
        #[test]
        fn qr_reconstructs_input(a in square_matrix()) {
            let qr = gram_schmidt(&a).unwrap();
            let scale = a.iter().fold(1.0f64, |m, x| m.max(x.abs()));
            prop_assert!(max_abs_diff(&qr.q.dot(&qr.r), &a) <= 1e-9 * scale);
            for i in 0..a.nrows() {
                for j in 0..i {
                    prop_assert_eq!(qr.r[[i, j]], 0.0);
                }
            }
        }

        #[test]
        fn qr_q_is_orthogonal(a in square_matrix()) {
            let qr = gram_schmidt(&a).unwrap();
            let n = a.nrows();
            let qtq = qr.q.t().dot(&qr.q);
            prop_assert!(max_abs_diff(&qtq, &Array2::eye(n)) < 1e-9);
        }
    }
}
