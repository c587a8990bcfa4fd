//! Clustering algorithms.
//!
//! ## K-means++
//!
//! The classic algorithm: assign each point to the nearest centroid, then
//! update centroids to the mean of their points. Repeat. Seeds are chosen with
//! k-means++, which favours points far from the centroids picked so far.
//!
//! **Objective**: minimize within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! **When to use**: convex, roughly spherical clusters and a known k.
//!
//! ## Normalized Spectral Clustering
//!
//! Builds a similarity graph over the points, embeds them with the
//! eigenvectors of the normalized graph Laplacian, and runs K-means++ in that
//! embedding. The number of clusters can be read off the spectrum with the
//! eigengap heuristic.
//!
//! **When to use**: clusters with complex shapes, or when k is unknown.
//! Cost is O(n³) for the eigen-decomposition, so it suits small n.
//!
//! ## Usage
//!
//! ```rust
//! use ndarray::array;
//! use nscluster::cluster::{Clustering, Kmeans, SpectralClustering};
//!
//! let data = array![
//!     [0.0, 0.0],
//!     [0.1, 0.1],
//!     [10.0, 10.0],
//!     [10.1, 10.1],
//! ];
//!
//! let labels = Kmeans::new(2).fit_predict(&data).unwrap();
//! assert_eq!(labels[0], labels[1]);
//! assert_ne!(labels[0], labels[2]);
//!
//! let fit = SpectralClustering::new().with_k(2).fit(&data).unwrap();
//! assert_eq!(fit.labels[2], fit.labels[3]);
//! ```

mod eigengap;
mod graph;
mod init;
mod kmeans;
mod traits;

pub mod spectral;

pub use eigengap::eigengap;
pub use graph::{degrees, normalized_laplacian, weight_matrix};
pub use init::kmeans_plus_plus;
pub use kmeans::{assign, lloyd, Kmeans, KmeansFit, Termination};
pub use spectral::{embedding, row_normalize, SpectralClustering, SpectralFit};
pub use traits::Clustering;
