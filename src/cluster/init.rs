//! K-means++ seeding.
//!
//! Picks `k` rows of the data to serve as initial centroids:
//!
//! 1. The first index is drawn uniformly from `[0, n)`.
//! 2. Keep `D(x)²`, the squared distance from every point to its nearest
//!    chosen centroid.
//! 3. Draw the next index with probability `D(x)² / Σ D(x)²`, then fold the
//!    distances to the new centroid into `D` by elementwise minimum.
//!
//! Points already chosen have `D = 0` and can never be drawn again, so the
//! returned indices are distinct whenever the chosen points are.
//!
//! The generator is owned by the caller. Seeding it identically reproduces the
//! exact index sequence; there is no process-wide random state involved.

use crate::error::{Error, Result};
use ndarray::{ArrayView1, ArrayView2};
use rand::Rng;

pub(crate) fn squared_distance(a: &ArrayView1<'_, f64>, b: &ArrayView1<'_, f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
}

/// Choose `k` initial centroid indices with K-means++.
///
/// Indices are returned in selection order.
///
/// # Errors
///
/// - [`Error::InvalidClusterCount`] when `k == 0` or `k > n`.
/// - [`Error::DegenerateInput`] when every remaining point coincides with a
///   chosen centroid, leaving no probability mass to sample from.
pub fn kmeans_plus_plus<R: Rng + ?Sized>(
    data: ArrayView2<'_, f64>,
    k: usize,
    rng: &mut R,
) -> Result<Vec<usize>> {
    let n = data.nrows();
    if n == 0 {
        return Err(Error::EmptyInput);
    }
    if k == 0 || k > n {
        return Err(Error::InvalidClusterCount {
            requested: k,
            n_items: n,
        });
    }

    let mut chosen = Vec::with_capacity(k);
    let mut last = rng.random_range(0..n);
    chosen.push(last);

    let mut min_dist: Vec<f64> = data
        .rows()
        .into_iter()
        .map(|row| squared_distance(&row, &data.row(last)))
        .collect();

    for _ in 1..k {
        let total: f64 = min_dist.iter().sum();
        if total.is_nan() || total <= 0.0 {
            return Err(Error::DegenerateInput(format!(
                "k-means++ found only {} distinct centroids for k={k}",
                chosen.len()
            )));
        }

        let threshold = rng.random::<f64>() * total;
        let mut cumsum = 0.0;
        let mut selected = None;
        for (j, &d) in min_dist.iter().enumerate() {
            cumsum += d;
            if cumsum > threshold {
                selected = Some(j);
                break;
            }
        }
        // Rounding can leave the threshold just above the running sum.
        last = match selected {
            Some(j) => j,
            None => min_dist
                .iter()
                .rposition(|&d| d > 0.0)
                .ok_or_else(|| Error::DegenerateInput("no sampling mass left".into()))?,
        };
        chosen.push(last);

        let pivot = data.row(last);
        for (d, row) in min_dist.iter_mut().zip(data.rows()) {
            *d = d.min(squared_distance(&row, &pivot));
        }
    }

    log::trace!("kmeans++ seeds: {chosen:?}");
    Ok(chosen)
}
