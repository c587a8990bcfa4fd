//! Eigengap heuristic for choosing the number of clusters.
//!
//! Sort the eigenvalues ascending and look at the first `⌈n/2⌉` gaps between
//! consecutive values. The largest gap (first occurrence on ties) at position
//! `i` gives `k = i + 1`:
//!
//! ```text
//! λ (sorted):  3   4   5   10   11   12   14 ...
//! gaps:          1   1   5    1    1
//!                        ^ largest → k = 3
//! ```
//!
//! The result is the list of the first `k` *column indices* in sorted order,
//! not the eigenvalues themselves. The sort is stable, so equal eigenvalues keep
//! their original column order and the caller can pick eigenvectors directly.

use crate::error::{Error, Result};
use ndarray::ArrayView1;

/// Indices of the `k` smallest eigenvalues, smallest first.
///
/// With `forced_k = None`, `k` comes from the largest eigengap. With
/// `Some(k)`, the heuristic is skipped and `k` must lie in `[1, n]`.
pub fn eigengap(eigenvalues: ArrayView1<'_, f64>, forced_k: Option<usize>) -> Result<Vec<usize>> {
    let n = eigenvalues.len();
    if n == 0 {
        return Err(Error::EmptyInput);
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| eigenvalues[a].total_cmp(&eigenvalues[b]));

    let k = match forced_k {
        Some(k) if k == 0 || k > n => {
            return Err(Error::InvalidClusterCount {
                requested: k,
                n_items: n,
            });
        }
        Some(k) => k,
        None => {
            let considered = (n.div_ceil(2) + 1).min(n);
            let mut best_gap = f64::NEG_INFINITY;
            let mut best = 0;
            for (i, pair) in order[..considered].windows(2).enumerate() {
                let gap = (eigenvalues[pair[1]] - eigenvalues[pair[0]]).abs();
                if gap > best_gap {
                    best_gap = gap;
                    best = i;
                }
            }
            log::debug!("eigengap: largest gap {best_gap:.4e} at position {best}");
            best + 1
        }
    };

    order.truncate(k);
    Ok(order)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::collections::HashSet;

    #[test]
    fn test_picks_three_smallest() {
        let values = array![3.0, 4.0, 5.0, 10.0, 11.0, 12.0, 14.0, 16.0, 30.0, 45.0];
        let picked = eigengap(values.view(), None).unwrap();
        assert_eq!(picked, vec![0, 1, 2]);
    }

    #[test]
    fn test_permutation_invariant_selection() {
        let values = array![30.0, 11.0, 4.0, 45.0, 10.0, 3.0, 16.0, 12.0, 5.0, 14.0];
        let picked = eigengap(values.view(), None).unwrap();
        // Sorted order of the three smallest: 3 (idx 5), 4 (idx 2), 5 (idx 8).
        assert_eq!(picked, vec![5, 2, 8]);
        let chosen: HashSet<u64> = picked.iter().map(|&i| values[i] as u64).collect();
        assert_eq!(chosen, [3, 4, 5].into_iter().collect());
    }

    #[test]
    fn test_only_first_half_of_gaps_considered() {
        // The huge gap sits past the first ⌈n/2⌉ gaps and must be ignored.
        let values = array![0.0, 0.1, 0.5, 0.6, 0.7, 100.0];
        let picked = eigengap(values.view(), None).unwrap();
        assert_eq!(picked, vec![0, 1]);
    }

    #[test]
    fn test_first_maximum_wins_on_tied_gaps() {
        let values = array![0.0, 1.0, 2.0, 3.0];
        assert_eq!(eigengap(values.view(), None).unwrap(), vec![0]);
    }

    #[test]
    fn test_stable_for_equal_eigenvalues() {
        let values = array![2.0, 0.0, 0.0, 5.0, 0.0];
        let picked = eigengap(values.view(), Some(3)).unwrap();
        assert_eq!(picked, vec![1, 2, 4]);
    }

    #[test]
    fn test_forced_k() {
        let values = array![3.0, 1.0, 2.0];
        assert_eq!(eigengap(values.view(), Some(2)).unwrap(), vec![1, 2]);
        assert!(eigengap(values.view(), Some(0)).is_err());
        assert!(eigengap(values.view(), Some(4)).is_err());
    }

    #[test]
    fn test_single_value() {
        let values = array![0.7];
        assert_eq!(eigengap(values.view(), None).unwrap(), vec![0]);
    }
}
