//! K-means clustering.
//!
//! Partitions data into k clusters by minimizing **within-cluster sum of squares**
//! (WCSS):
//!
//! ```text
//! WCSS = Σₖ Σᵢ∈Cₖ ||xᵢ - μₖ||²
//! ```
//!
//! # Lloyd's Algorithm
//!
//! 1. Seed k centroids with k-means++ (see [`kmeans_plus_plus`])
//! 2. **Assign**: each point → nearest centroid (ties go to the lowest index)
//! 3. **Update**: each centroid → mean of its assigned points; a centroid with
//!    no points keeps its previous position
//! 4. Stop once every centroid moved less than `tol`, or after `max_iter`
//!    rounds
//!
//! The run ends in one of two terminal states, [`Termination::Converged`] or
//! [`Termination::Exhausted`]. Hitting the iteration cap is not an error; the
//! labels from the last assignment are returned either way.
//!
//! Each round costs O(n·k·d). With the `parallel` feature the assignment step
//! is spread over rayon's pool; labels are identical to the sequential path.

use super::init::{kmeans_plus_plus, squared_distance};
use super::traits::Clustering;
use crate::config::ClusteringConfig;
use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// How a Lloyd run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Every centroid moved less than the tolerance in the last round.
    Converged,
    /// The iteration cap was reached first.
    Exhausted,
}

/// Result of a K-means run.
#[derive(Debug, Clone)]
pub struct KmeansFit {
    /// Cluster label per point, in `[0, k)`.
    pub labels: Vec<usize>,
    /// Final centroids, one row per cluster.
    pub centroids: Array2<f64>,
    /// Number of assign/update rounds performed.
    pub iterations: usize,
    /// Terminal state.
    pub termination: Termination,
}

/// K-means clustering algorithm.
#[derive(Debug, Clone)]
pub struct Kmeans {
    /// Number of clusters.
    k: usize,
    /// Maximum iterations.
    max_iter: usize,
    /// Convergence tolerance on centroid movement.
    tol: f64,
    /// Random seed for k-means++ (`None` draws from the thread RNG).
    seed: Option<u64>,
}

impl Kmeans {
    /// Create a new K-means clusterer with the default settings.
    pub fn new(k: usize) -> Self {
        let defaults = ClusteringConfig::default();
        Self {
            k,
            max_iter: defaults.max_iter,
            tol: defaults.kmeans_tol,
            seed: defaults.seed,
        }
    }

    /// Create a clusterer from a configuration.
    ///
    /// K-means always needs an explicit `k`.
    pub fn from_config(config: &ClusteringConfig) -> Result<Self> {
        config.validate()?;
        let k = config
            .k
            .ok_or_else(|| Error::invalid("k", "k-means requires an explicit cluster count"))?;
        Ok(Self {
            k,
            max_iter: config.max_iter,
            tol: config.kmeans_tol,
            seed: config.seed,
        })
    }

    /// Set maximum iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set convergence tolerance.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Draw seeds from the thread RNG on every call.
    pub fn unseeded(mut self) -> Self {
        self.seed = None;
        self
    }

    /// Seed with k-means++ and run Lloyd's algorithm.
    pub fn fit(&self, data: &Array2<f64>) -> Result<KmeansFit> {
        match self.seed {
            Some(s) => self.fit_with_rng(data, &mut StdRng::seed_from_u64(s)),
            None => self.fit_with_rng(data, &mut rand::rng()),
        }
    }

    /// Like [`fit`](Self::fit), drawing the k-means++ seeds from `rng`.
    pub fn fit_with_rng<R: Rng + ?Sized>(&self, data: &Array2<f64>, rng: &mut R) -> Result<KmeansFit> {
        validate_points(data)?;
        let initial = kmeans_plus_plus(data.view(), self.k, rng)?;
        lloyd(data.view(), &initial, self.max_iter, self.tol)
    }
}

impl Clustering for Kmeans {
    fn fit_predict(&self, data: &Array2<f64>) -> Result<Vec<usize>> {
        Ok(self.fit(data)?.labels)
    }

    fn n_clusters(&self) -> Option<usize> {
        Some(self.k)
    }
}

pub(crate) fn validate_points(data: &Array2<f64>) -> Result<()> {
    if data.nrows() == 0 || data.ncols() == 0 {
        return Err(Error::EmptyInput);
    }
    if data.iter().any(|x| !x.is_finite()) {
        return Err(Error::invalid("data", "points must be finite"));
    }
    Ok(())
}

/// Assign every point to its nearest centroid.
///
/// Ties are broken in favour of the lowest centroid index.
///
/// # Errors
///
/// [`Error::InvalidClusterCount`] when `centroids` has no rows and
/// [`Error::DimensionMismatch`] when the centroid width differs from the
/// point width or `labels` is not one slot per point.
pub fn assign(
    data: ArrayView2<'_, f64>,
    centroids: ArrayView2<'_, f64>,
    labels: &mut [usize],
) -> Result<()> {
    if centroids.nrows() == 0 {
        return Err(Error::InvalidClusterCount {
            requested: 0,
            n_items: data.nrows(),
        });
    }
    if centroids.ncols() != data.ncols() {
        return Err(Error::DimensionMismatch {
            expected: data.ncols(),
            found: centroids.ncols(),
        });
    }
    if labels.len() != data.nrows() {
        return Err(Error::DimensionMismatch {
            expected: data.nrows(),
            found: labels.len(),
        });
    }

    let nearest = |i: usize| {
        let point = data.row(i);
        let mut best_cluster = 0;
        let mut best_dist = squared_distance(&point, &centroids.row(0));
        for c in 1..centroids.nrows() {
            let dist = squared_distance(&point, &centroids.row(c));
            if dist < best_dist {
                best_dist = dist;
                best_cluster = c;
            }
        }
        best_cluster
    };

    #[cfg(feature = "parallel")]
    {
        labels
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, label)| *label = nearest(i));
    }

    #[cfg(not(feature = "parallel"))]
    for (i, label) in labels.iter_mut().enumerate() {
        *label = nearest(i);
    }

    Ok(())
}

/// Run Lloyd's algorithm from the given seed rows.
///
/// `initial` holds `k` row indices into `data` (usually from
/// [`kmeans_plus_plus`]). Runs at most `max_iter` rounds and stops early once
/// every centroid moved less than `tol` (Euclidean distance).
pub fn lloyd(
    data: ArrayView2<'_, f64>,
    initial: &[usize],
    max_iter: usize,
    tol: f64,
) -> Result<KmeansFit> {
    let (n, d) = data.dim();
    let k = initial.len();
    if n == 0 {
        return Err(Error::EmptyInput);
    }
    if k == 0 || k > n {
        return Err(Error::InvalidClusterCount {
            requested: k,
            n_items: n,
        });
    }
    if let Some(&bad) = initial.iter().find(|&&i| i >= n) {
        return Err(Error::invalid(
            "initial",
            format!("seed index {bad} out of range for {n} points"),
        ));
    }
    if max_iter == 0 {
        return Err(Error::invalid("max_iter", "must be at least 1"));
    }
    if !(tol.is_finite() && tol > 0.0) {
        return Err(Error::invalid("tol", "must be positive and finite"));
    }

    let mut centroids = Array2::<f64>::zeros((k, d));
    for (c, &idx) in initial.iter().enumerate() {
        centroids.row_mut(c).assign(&data.row(idx));
    }
    let mut labels = vec![0usize; n];

    for iter in 1..=max_iter {
        assign(data, centroids.view(), &mut labels)?;

        let mut sums = Array2::<f64>::zeros((k, d));
        let mut counts = vec![0usize; k];
        for (i, &label) in labels.iter().enumerate() {
            sums.row_mut(label).scaled_add(1.0, &data.row(i));
            counts[label] += 1;
        }

        let mut max_shift = 0.0f64;
        for c in 0..k {
            if counts[c] == 0 {
                // Empty cluster keeps its previous position.
                continue;
            }
            let mean = &sums.row(c) / counts[c] as f64;
            let shift = squared_distance(&mean.view(), &centroids.row(c)).sqrt();
            max_shift = max_shift.max(shift);
            centroids.row_mut(c).assign(&mean);
        }
        log::trace!("lloyd: iteration {iter}, max centroid shift {max_shift:.3e}");

        if max_shift < tol {
            log::debug!("lloyd: n={n} k={k} converged after {iter} iterations");
            return Ok(KmeansFit {
                labels,
                centroids,
                iterations: iter,
                termination: Termination::Converged,
            });
        }
    }

    log::debug!("lloyd: n={n} k={k} stopped at the {max_iter}-iteration cap");
    Ok(KmeansFit {
        labels,
        centroids,
        iterations: max_iter,
        termination: Termination::Exhausted,
    })
}
