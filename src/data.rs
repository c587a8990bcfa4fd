//! Input points: run parameters, synthetic blobs and the precision boundary.
//!
//! Every clustering stage works in `f64`. Points held as `f32` cross into the
//! pipeline through [`upcast`], which widens each value exactly.

use crate::config::{MAX_K_2D_CAPACITY, MAX_K_3D_CAPACITY, MAX_N_2D_CAPACITY, MAX_N_3D_CAPACITY};
use crate::error::{Error, Result};
use ndarray::{Array2, Axis};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Half-width of the box blob centres are drawn from.
const CENTER_BOX: f64 = 10.0;
/// Standard deviation of each blob.
const CLUSTER_STD: f64 = 1.0;

/// Parameters of one run: how many points, how many generating centres, and
/// the dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunParams {
    /// Number of points.
    pub n: usize,
    /// Number of generating centres.
    pub k: usize,
    /// Dimension, 2 or 3.
    pub dim: usize,
    /// Whether `n` and `k` were drawn at random.
    pub random: bool,
}

impl RunParams {
    /// Explicit parameters; requires `0 < k < n` and `dim ∈ {2, 3}`.
    pub fn new(n: usize, k: usize, dim: usize) -> Result<Self> {
        check_dim(dim)?;
        if n == 0 || k == 0 {
            return Err(Error::invalid("n/k", "must both be positive"));
        }
        if n <= k {
            return Err(Error::InvalidClusterCount {
                requested: k,
                n_items: n,
            });
        }
        Ok(Self {
            n,
            k,
            dim,
            random: false,
        })
    }

    /// Draw `n` and `k` within the capacity limits for `dim`.
    ///
    /// `n` is uniform in `[MAX_N/2, MAX_N]` and `k` uniform in
    /// `[MAX_K/2, min(MAX_K, n - 1)]`.
    pub fn random<R: Rng + ?Sized>(dim: usize, rng: &mut R) -> Result<Self> {
        check_dim(dim)?;
        let (max_n, max_k) = if dim == 2 {
            (MAX_N_2D_CAPACITY, MAX_K_2D_CAPACITY)
        } else {
            (MAX_N_3D_CAPACITY, MAX_K_3D_CAPACITY)
        };
        let n = rng.random_range(max_n / 2..=max_n);
        let k = rng.random_range(max_k / 2..=max_k.min(n - 1));
        Ok(Self {
            n,
            k,
            dim,
            random: true,
        })
    }
}

fn check_dim(dim: usize) -> Result<()> {
    if dim == 2 || dim == 3 {
        Ok(())
    } else {
        Err(Error::invalid("dim", format!("must be 2 or 3, got {dim}")))
    }
}

/// Points sampled around known centres.
#[derive(Debug, Clone)]
pub struct Blobs {
    /// `n × dim` points.
    pub points: Array2<f64>,
    /// Index of the centre each point was drawn around.
    pub centers: Vec<usize>,
}

/// Sample `n` points in `dim` dimensions from `centers` isotropic Gaussian blobs.
///
/// Centres are uniform in `(-10, 10)` per axis and each blob has standard
/// deviation 1. Points are split as evenly as possible, with the remainder
/// going to the first centres. Rows are shuffled with `rng`, so consecutive
/// points usually come from different centres.
pub fn make_blobs<R: Rng + ?Sized>(
    n: usize,
    dim: usize,
    centers: usize,
    rng: &mut R,
) -> Result<Blobs> {
    if n == 0 || dim == 0 {
        return Err(Error::EmptyInput);
    }
    if centers == 0 || centers > n {
        return Err(Error::InvalidClusterCount {
            requested: centers,
            n_items: n,
        });
    }

    let noise = Normal::new(0.0, CLUSTER_STD).map_err(|e| Error::Other(e.to_string()))?;
    let means = Array2::from_shape_fn((centers, dim), |_| {
        rng.random_range(-CENTER_BOX..CENTER_BOX)
    });

    let mut grouped = Array2::<f64>::zeros((n, dim));
    let mut labels = Vec::with_capacity(n);
    let base = n / centers;
    let extra = n % centers;
    let mut row = 0;
    for c in 0..centers {
        let count = base + usize::from(c < extra);
        for _ in 0..count {
            for j in 0..dim {
                grouped[[row, j]] = means[[c, j]] + noise.sample(rng);
            }
            labels.push(c);
            row += 1;
        }
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);

    Ok(Blobs {
        points: grouped.select(Axis(0), &order),
        centers: order.iter().map(|&i| labels[i]).collect(),
    })
}

/// Build an `n × d` matrix from rows, rejecting ragged input.
pub fn points_from_rows(rows: &[Vec<f64>]) -> Result<Array2<f64>> {
    let n = rows.len();
    if n == 0 {
        return Err(Error::EmptyInput);
    }
    let d = rows[0].len();
    let mut flat = Vec::with_capacity(n * d);
    for row in rows {
        if row.len() != d {
            return Err(Error::DimensionMismatch {
                expected: d,
                found: row.len(),
            });
        }
        flat.extend_from_slice(row);
    }
    Array2::from_shape_vec((n, d), flat).map_err(|e| Error::Other(e.to_string()))
}

/// Widen single-precision points to `f64`. Lossless.
pub fn upcast(points: &Array2<f32>) -> Array2<f64> {
    points.mapv(f64::from)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_run_params_validation() {
        assert!(RunParams::new(10, 3, 2).is_ok());
        assert!(RunParams::new(3, 3, 2).is_err());
        assert!(RunParams::new(0, 0, 3).is_err());
        assert!(RunParams::new(10, 3, 4).is_err());
    }

    #[test]
    fn test_random_params_within_capacity() {
        let mut rng = StdRng::seed_from_u64(1);
        for dim in [2, 3] {
            for _ in 0..50 {
                let p = RunParams::random(dim, &mut rng).unwrap();
                assert!(p.random);
                assert!(p.n >= MAX_N_2D_CAPACITY / 2 && p.n <= MAX_N_2D_CAPACITY);
                assert!(p.k >= MAX_K_2D_CAPACITY / 2 && p.k < p.n);
            }
        }
    }

    #[test]
    fn test_blobs_shape_and_labels() {
        let mut rng = StdRng::seed_from_u64(0);
        let blobs = make_blobs(10, 3, 3, &mut rng).unwrap();
        assert_eq!(blobs.points.dim(), (10, 3));
        let counts: Vec<usize> = (0..3)
            .map(|c| blobs.centers.iter().filter(|&&l| l == c).count())
            .collect();
        assert_eq!(counts, vec![4, 3, 3]);
        assert!(blobs.points.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_blobs_rows_are_shuffled() {
        let mut rng = StdRng::seed_from_u64(3);
        let blobs = make_blobs(40, 2, 4, &mut rng).unwrap();
        let mut sorted = blobs.centers.clone();
        sorted.sort_unstable();
        assert_ne!(blobs.centers, sorted);
    }

    #[test]
    fn test_blobs_labels_follow_their_rows() {
        // Unit noise: every row lies near the mean of the rows sharing its label.
        let mut rng = StdRng::seed_from_u64(8);
        let blobs = make_blobs(60, 2, 2, &mut rng).unwrap();
        let mut sums = [[0.0f64; 2]; 2];
        let mut counts = [0usize; 2];
        for (row, &c) in blobs.points.rows().into_iter().zip(&blobs.centers) {
            sums[c][0] += row[0];
            sums[c][1] += row[1];
            counts[c] += 1;
        }
        assert_eq!(counts, [30, 30]);
        for (row, &c) in blobs.points.rows().into_iter().zip(&blobs.centers) {
            let mean = [sums[c][0] / 30.0, sums[c][1] / 30.0];
            let dist = ((row[0] - mean[0]).powi(2) + (row[1] - mean[1]).powi(2)).sqrt();
            assert!(dist < 6.0, "row {row:?} is far from its blob mean");
        }
    }

    #[test]
    fn test_blobs_reproducible() {
        let a = make_blobs(20, 2, 4, &mut StdRng::seed_from_u64(5)).unwrap();
        let b = make_blobs(20, 2, 4, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(a.points, b.points);
    }

    #[test]
    fn test_blobs_reject_bad_counts() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(make_blobs(3, 2, 4, &mut rng).is_err());
        assert!(make_blobs(3, 2, 0, &mut rng).is_err());
        assert!(make_blobs(0, 2, 1, &mut rng).is_err());
    }

    #[test]
    fn test_points_from_rows() {
        let m = points_from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(m, array![[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(
            points_from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err(),
            Error::DimensionMismatch {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_upcast_is_exact() {
        let narrow = array![[0.1f32, -2.5], [1e-7, 3.4e38]];
        let wide = upcast(&narrow);
        for (w, n) in wide.iter().zip(narrow.iter()) {
            assert_eq!(*w as f32, *n);
            assert_eq!(*w, f64::from(*n));
        }
    }
}
