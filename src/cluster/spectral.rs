//! Normalized spectral clustering (NSC).
//!
//! The pipeline runs these phases in order; each phase's output shape is the
//! next phase's input contract:
//!
//! ```text
//! points (n×d)
//!   → W       weight_matrix          n×n, symmetric, zero diagonal
//!   → L       normalized_laplacian   n×n, I - D^{-1/2} W D^{-1/2}
//!   → (A′,Q′) qr_iteration           eigenvalues on diag(A′), vectors in Q′
//!   → idx     eigengap               k column indices (or forced k)
//!   → U       embedding              n×k, Q′ columns in idx order
//!   → T       row_normalize          n×k, unit-norm rows
//!   → labels  k-means++ + Lloyd on T
//! ```
//!
//! # Example
//!
//! ```rust
//! use ndarray::array;
//! use nscluster::SpectralClustering;
//!
//! let points = array![
//!     [0.0, 0.0], [0.1, 0.0], [0.0, 0.1],
//!     [5.0, 5.0], [5.1, 5.0], [5.0, 5.1],
//! ];
//!
//! let fit = SpectralClustering::new().with_k(2).fit(&points).unwrap();
//! assert_eq!(fit.k, 2);
//! assert_eq!(fit.labels.len(), 6);
//! ```
//!
//! # References
//!
//! - Ng, Jordan, Weiss (2001). "On Spectral Clustering"
//! - von Luxburg (2007). "A Tutorial on Spectral Clustering"

use super::eigengap::eigengap;
use super::graph::{normalized_laplacian, weight_matrix};
use super::kmeans::{lloyd, validate_points};
use super::init::kmeans_plus_plus;
use super::traits::Clustering;
use crate::config::ClusteringConfig;
use crate::error::{Error, Result};
use crate::linalg::qr_iteration;
use ndarray::{Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Result of a spectral clustering run.
#[derive(Debug, Clone)]
pub struct SpectralFit {
    /// Cluster label per point, in `[0, k)`.
    pub labels: Vec<usize>,
    /// Number of clusters actually used (forced or from the eigengap).
    pub k: usize,
    /// Whether the eigensolver settled before its iteration bound.
    pub eigen_converged: bool,
}

/// Normalized spectral clustering configuration and runner.
#[derive(Debug, Clone)]
pub struct SpectralClustering {
    config: ClusteringConfig,
}

impl Default for SpectralClustering {
    fn default() -> Self {
        Self::new()
    }
}

impl SpectralClustering {
    /// Spectral clustering with k chosen by the eigengap heuristic.
    pub fn new() -> Self {
        Self {
            config: ClusteringConfig::default(),
        }
    }

    /// Build from a validated configuration.
    pub fn from_config(config: ClusteringConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Force the number of clusters, skipping the eigengap heuristic.
    pub fn with_k(mut self, k: usize) -> Self {
        self.config.k = Some(k);
        self
    }

    /// Set the eigensolver convergence threshold.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.config.epsilon = epsilon;
        self
    }

    /// Set the K-means iteration cap.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.config.max_iter = max_iter;
        self
    }

    /// Set the K-means convergence tolerance on the embedding.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.config.kmeans_tol = tol;
        self
    }

    /// Set the seed used for k-means++ on the embedding.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Draw k-means++ seeds from the thread RNG on every call.
    pub fn unseeded(mut self) -> Self {
        self.config.seed = None;
        self
    }

    /// The configuration this runner uses.
    pub fn config(&self) -> &ClusteringConfig {
        &self.config
    }

    /// Run the full pipeline on `points` (`n × d`).
    pub fn fit(&self, points: &Array2<f64>) -> Result<SpectralFit> {
        match self.config.seed {
            Some(s) => self.fit_with_rng(points, &mut StdRng::seed_from_u64(s)),
            None => self.fit_with_rng(points, &mut rand::rng()),
        }
    }

    /// Like [`fit`](Self::fit), drawing k-means++ seeds from `rng`.
    pub fn fit_with_rng<R: Rng + ?Sized>(
        &self,
        points: &Array2<f64>,
        rng: &mut R,
    ) -> Result<SpectralFit> {
        self.config.validate()?;
        validate_points(points)?;
        let n = points.nrows();
        if n < 2 {
            return Err(Error::invalid("points", "spectral clustering needs at least 2 points"));
        }
        if let Some(k) = self.config.k {
            if k > n {
                return Err(Error::InvalidClusterCount {
                    requested: k,
                    n_items: n,
                });
            }
        }

        let w = weight_matrix(points);
        let l = normalized_laplacian(&w)?;
        let eig = qr_iteration(&l, self.config.epsilon)?;
        let selected = eigengap(eig.eigenvalues().view(), self.config.k)?;
        let u = embedding(&eig.vectors, &selected)?;
        let t = row_normalize(&u)?;
        let k = t.ncols();
        log::debug!(
            "spectral: n={n} k={k} (eigensolver {} after {} iterations)",
            if eig.converged { "settled" } else { "bounded" },
            eig.iterations
        );

        let initial = kmeans_plus_plus(t.view(), k, rng)?;
        let fit = lloyd(t.view(), &initial, self.config.max_iter, self.config.kmeans_tol)?;

        Ok(SpectralFit {
            labels: fit.labels,
            k,
            eigen_converged: eig.converged,
        })
    }
}

impl Clustering for SpectralClustering {
    fn fit_predict(&self, data: &Array2<f64>) -> Result<Vec<usize>> {
        Ok(self.fit(data)?.labels)
    }

    fn n_clusters(&self) -> Option<usize> {
        self.config.k
    }
}

/// Select eigenvector columns in the given order, forming `U` (`n × k`).
pub fn embedding(vectors: &Array2<f64>, indices: &[usize]) -> Result<Array2<f64>> {
    if indices.is_empty() {
        return Err(Error::EmptyInput);
    }
    if let Some(&bad) = indices.iter().find(|&&i| i >= vectors.ncols()) {
        return Err(Error::invalid(
            "indices",
            format!("column {bad} out of range for {} eigenvectors", vectors.ncols()),
        ));
    }
    Ok(vectors.select(Axis(1), indices))
}

/// Scale each row of `u` to unit Euclidean length, forming `T`.
///
/// # Errors
///
/// [`Error::DegenerateInput`] if a row has zero norm; such a point has no
/// direction in the embedding.
pub fn row_normalize(u: &Array2<f64>) -> Result<Array2<f64>> {
    let mut t = u.clone();
    for (i, mut row) in t.axis_iter_mut(Axis(0)).enumerate() {
        let norm = row.dot(&row).sqrt();
        if !(norm.is_finite() && norm > 0.0) {
            return Err(Error::DegenerateInput(format!(
                "embedding row {i} has norm {norm}"
            )));
        }
        row /= norm;
    }
    Ok(t)
}
