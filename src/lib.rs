//! # nscluster
//!
//! K-means++ and normalized spectral clustering (NSC) over dense `f64` point
//! matrices.
//!
//! - [`linalg`]: Gram-Schmidt QR and the QR-iteration eigensolver.
//! - [`cluster`]: similarity graph, Laplacian, eigengap, k-means++ seeding,
//!   Lloyd iteration and the spectral pipeline.
//! - [`metrics`]: pairwise Jaccard agreement between partitions.
//! - [`data`]: run parameters, synthetic blobs, `f32 → f64` upcast.
//!
//! The pipeline is single-threaded by default. The `parallel` feature spreads
//! the pairwise weights and the K-means assignment step over rayon without
//! changing any output. Randomness always comes from a caller-owned generator.

pub mod cluster;
pub mod config;
pub mod data;
/// Error types used across `nscluster`.
pub mod error;
pub mod linalg;
pub mod metrics;

pub use cluster::{Clustering, Kmeans, KmeansFit, SpectralClustering, SpectralFit, Termination};
pub use config::ClusteringConfig;
pub use error::{Error, Result};
pub use metrics::jaccard;
