//! Run configuration.
//!
//! [`ClusteringConfig`] carries every tunable of a clustering run as a named,
//! typed field. It deserializes from TOML with missing keys taking their
//! defaults:
//!
//! ```rust
//! use nscluster::ClusteringConfig;
//!
//! let config = ClusteringConfig::from_toml_str("k = 4\nmax_iter = 50").unwrap();
//! assert_eq!(config.k, Some(4));
//! assert_eq!(config.max_iter, 50);
//! assert_eq!(config.epsilon, 1e-4);
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default eigensolver and K-means tolerance.
pub const EPSILON: f64 = 0.0001;
/// Default K-means iteration cap.
pub const MAX_ITER: usize = 300;

/// Largest `n` drawn for random 2-D runs.
pub const MAX_N_2D_CAPACITY: usize = 470;
/// Largest `k` drawn for random 2-D runs.
pub const MAX_K_2D_CAPACITY: usize = 350;
/// Largest `n` drawn for random 3-D runs.
pub const MAX_N_3D_CAPACITY: usize = 470;
/// Largest `k` drawn for random 3-D runs.
pub const MAX_K_3D_CAPACITY: usize = 350;

/// Immutable settings for a clustering run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClusteringConfig {
    /// Number of clusters. `None` lets spectral clustering pick it by eigengap.
    pub k: Option<usize>,
    /// Eigensolver threshold on the per-entry change of `|Q|`.
    pub epsilon: f64,
    /// K-means stops once every centroid moves less than this.
    pub kmeans_tol: f64,
    /// K-means iteration cap.
    pub max_iter: usize,
    /// Seed for k-means++. `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            k: None,
            epsilon: EPSILON,
            kmeans_tol: EPSILON,
            max_iter: MAX_ITER,
            seed: Some(0),
        }
    }
}

impl ClusteringConfig {
    /// Parse from TOML and validate.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.k == Some(0) {
            return Err(Error::invalid("k", "must be at least 1"));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(Error::invalid("epsilon", "must be positive and finite"));
        }
        if !(self.kmeans_tol.is_finite() && self.kmeans_tol > 0.0) {
            return Err(Error::invalid("kmeans_tol", "must be positive and finite"));
        }
        if self.max_iter == 0 {
            return Err(Error::invalid("max_iter", "must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClusteringConfig::default();
        assert_eq!(config.k, None);
        assert_eq!(config.epsilon, 0.0001);
        assert_eq!(config.max_iter, 300);
        assert_eq!(config.seed, Some(0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = ClusteringConfig::from_toml_str("").unwrap();
        assert_eq!(config, ClusteringConfig::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ClusteringConfig {
            k: Some(3),
            seed: Some(9),
            ..ClusteringConfig::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(ClusteringConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(ClusteringConfig::from_toml_str("k = 0").is_err());
        assert!(ClusteringConfig::from_toml_str("max_iter = 0").is_err());
        assert!(ClusteringConfig::from_toml_str("epsilon = -1.0").is_err());
        assert!(matches!(
            ClusteringConfig::from_toml_str("unknown = 1").unwrap_err(),
            Error::Config(_)
        ));
    }
}
