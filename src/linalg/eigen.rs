//! QR-iteration eigensolver.
//!
//! Unshifted QR iteration on a symmetric matrix:
//!
//! ```text
//! A₀ = A,  Q̄₀ = I
//! (Qₖ, Rₖ) = QR(Aₖ)
//! Aₖ₊₁ = Rₖ Qₖ
//! Q̄ₖ₊₁ = Q̄ₖ Qₖ
//! ```
//!
//! Every `Aₖ` is similar to `A` (`Aₖ = Q̄ₖᵀ A Q̄ₖ`), and for symmetric input it
//! drifts toward a diagonal matrix whose entries are the eigenvalues, with the
//! columns of `Q̄ₖ` approaching the matching eigenvectors.
//!
//! # Stopping rule
//!
//! The loop stops as soon as no entry of `|Q̄|` moves by more than `epsilon`
//! between two iterations, or after `n` iterations. The `n` bound is a
//! heuristic: the returned pair is the best current estimate, its
//! off-diagonal entries are only approximately zero, and running out of
//! iterations is not an error. Eigenvector signs are unconstrained.

use super::{ensure_square, gram_schmidt};
use crate::error::{Error, Result};
use ndarray::{Array1, Array2, Zip};

/// Approximate eigen-decomposition produced by [`qr_iteration`].
#[derive(Debug, Clone)]
pub struct EigenDecomposition {
    /// Final `Aₖ`; eigenvalues lie on the diagonal.
    pub values: Array2<f64>,
    /// Accumulated `Q̄`; column `j` is the eigenvector for `values[[j, j]]`.
    pub vectors: Array2<f64>,
    /// Number of QR steps performed.
    pub iterations: usize,
    /// Whether the `|Q̄|` stopping rule fired before the iteration bound.
    pub converged: bool,
}

impl EigenDecomposition {
    /// The diagonal of [`values`](Self::values), in column order.
    pub fn eigenvalues(&self) -> Array1<f64> {
        self.values.diag().to_owned()
    }
}

/// Approximate the eigenvalues and eigenvectors of a symmetric matrix.
///
/// `epsilon` is the per-entry threshold on the change of `|Q̄|` (0.0001 is the
/// customary value). Symmetry is not checked; non-symmetric input still yields
/// a valid similarity transform but its diagonal need not hold eigenvalues.
pub fn qr_iteration(a: &Array2<f64>, epsilon: f64) -> Result<EigenDecomposition> {
    let n = ensure_square(a)?;
    if !(epsilon.is_finite() && epsilon > 0.0) {
        return Err(Error::invalid("epsilon", "must be positive and finite"));
    }

    let mut a_k = a.clone();
    let mut q_acc = Array2::<f64>::eye(n);

    for iter in 1..=n {
        let qr = gram_schmidt(&a_k)?;
        a_k = qr.r.dot(&qr.q);
        let next = q_acc.dot(&qr.q);

        let settled = Zip::from(&q_acc)
            .and(&next)
            .all(|&prev, &cur| (prev.abs() - cur.abs()).abs() <= epsilon);

        q_acc = next;
        if settled {
            log::debug!("qr_iteration: n={n} converged after {iter} iterations");
            return Ok(EigenDecomposition {
                values: a_k,
                vectors: q_acc,
                iterations: iter,
                converged: true,
            });
        }
    }

    log::debug!("qr_iteration: n={n} reached iteration bound without settling");
    Ok(EigenDecomposition {
        values: a_k,
        vectors: q_acc,
        iterations: n,
        converged: false,
    })
}
