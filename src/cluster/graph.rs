//! Similarity graph and normalized Laplacian.
//!
//! Weights use the *unsquared* Euclidean distance:
//!
//! ```text
//! W[i,j] = exp(-||xᵢ - xⱼ|| / 2)   (i ≠ j),   W[i,i] = 0
//! ```
//!
//! This is not the usual RBF kernel `exp(-||xᵢ - xⱼ||² / 2σ²)`. Both produce a
//! symmetric, non-negative affinity; this one decays linearly in log-space, so
//! distant points keep more weight than under the squared form.
//!
//! The symmetric normalized Laplacian is
//!
//! ```text
//! L = I - D^{-1/2} W D^{-1/2},   D = diag(Σⱼ W[i,j])
//! ```
//!
//! Its diagonal is exactly 1 (W has a zero diagonal) and its off-diagonal
//! entries lie in `(-1, 0]`.

use crate::error::{Error, Result};
use ndarray::{Array1, Array2};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Similarity between two points.
fn weight(a: ndarray::ArrayView1<'_, f64>, b: ndarray::ArrayView1<'_, f64>) -> f64 {
    let dist = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt();
    (-0.5 * dist).exp()
}

/// Build the symmetric `n × n` weight matrix of `points` (`n × d`).
///
/// Only the upper triangle is computed; it is mirrored so `W` is exactly
/// symmetric.
pub fn weight_matrix(points: &Array2<f64>) -> Array2<f64> {
    let n = points.nrows();

    let upper_row = |i: usize| -> Vec<f64> {
        ((i + 1)..n)
            .map(|j| weight(points.row(i), points.row(j)))
            .collect()
    };

    #[cfg(feature = "parallel")]
    let upper: Vec<Vec<f64>> = (0..n).into_par_iter().map(upper_row).collect();
    #[cfg(not(feature = "parallel"))]
    let upper: Vec<Vec<f64>> = (0..n).map(upper_row).collect();

    let mut w = Array2::<f64>::zeros((n, n));
    for (i, row) in upper.into_iter().enumerate() {
        for (offset, value) in row.into_iter().enumerate() {
            let j = i + 1 + offset;
            w[[i, j]] = value;
            w[[j, i]] = value;
        }
    }
    w
}

/// Row sums of a weight matrix.
pub fn degrees(w: &Array2<f64>) -> Array1<f64> {
    w.sum_axis(ndarray::Axis(1))
}

/// Build `L = I - D^{-1/2} W D^{-1/2}` from a weight matrix.
///
/// # Errors
///
/// - [`Error::NotSquare`] / [`Error::EmptyInput`] for malformed `w`.
/// - [`Error::DegenerateInput`] when a node has zero (or non-finite) degree.
///   This happens when a point is so far from all others that every weight
///   underflows to zero; `D^{-1/2}` is undefined there.
pub fn normalized_laplacian(w: &Array2<f64>) -> Result<Array2<f64>> {
    let n = crate::linalg::ensure_square(w)?;

    let d = degrees(w);
    if let Some(i) = d.iter().position(|&deg| !(deg.is_finite() && deg > 0.0)) {
        return Err(Error::DegenerateInput(format!(
            "node {i} has degree {} in the similarity graph",
            d[i]
        )));
    }
    let inv_sqrt = d.mapv(|deg| 1.0 / deg.sqrt());

    let mut l = Array2::<f64>::eye(n);
    for i in 0..n {
        l[[i, i]] -= w[[i, i]] * inv_sqrt[i] * inv_sqrt[i];
        for j in (i + 1)..n {
            let value = -w[[i, j]] * inv_sqrt[i] * inv_sqrt[j];
            l[[i, j]] = value;
            l[[j, i]] = value;
        }
    }
    Ok(l)
}
