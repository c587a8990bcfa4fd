//! Clustering traits.

use crate::data::upcast;
use crate::error::Result;
use ndarray::Array2;

/// Trait for hard clustering algorithms over an `n × d` point matrix.
pub trait Clustering {
    /// Fit the model to data and return cluster assignments.
    ///
    /// Returns a vector of cluster labels, one per input row, each in `[0, k)`.
    fn fit_predict(&self, data: &Array2<f64>) -> Result<Vec<usize>>;

    /// Same as [`fit_predict`](Self::fit_predict) for single-precision input.
    ///
    /// The points are widened to `f64` before any stage runs.
    fn fit_predict_f32(&self, data: &Array2<f32>) -> Result<Vec<usize>> {
        self.fit_predict(&upcast(data))
    }

    /// The number of clusters, if fixed before fitting.
    ///
    /// `None` means the count is chosen from the data.
    fn n_clusters(&self) -> Option<usize>;
}
