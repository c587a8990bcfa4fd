//! Agreement between two partitions of the same points.
//!
//! # Example
//!
//! ```rust
//! use nscluster::metrics::jaccard;
//!
//! let centers = [0, 0, 1, 1, 2, 2];
//! let clusters = [0, 1, 0, 1, 2, 2];
//! assert_eq!(jaccard(&centers, &clusters), 0.2);
//! ```

/// Pairwise Jaccard agreement between a reference and a computed partition.
///
/// Over all pairs `i < j`, counts the pairs placed together by both partitions
/// and divides by the pairs placed together by at least one:
///
/// ```text
/// J = |S_ref ∩ S_pred| / |S_ref ∪ S_pred|
/// ```
///
/// Label values themselves are irrelevant, only co-membership counts.
///
/// # Returns
///
/// A value in `[0, 1]`. Mismatched lengths or empty input give 0.0. When
/// neither partition puts any pair together they agree on every pair and the
/// result is 1.0.
pub fn jaccard(reference: &[usize], computed: &[usize]) -> f64 {
    if reference.len() != computed.len() || reference.is_empty() {
        return 0.0;
    }

    let n = reference.len();
    let mut intersection = 0usize;
    let mut union = 0usize;

    for i in 0..n {
        for j in (i + 1)..n {
            let same_ref = reference[i] == reference[j];
            let same_pred = computed[i] == computed[j];
            if same_ref || same_pred {
                union += 1;
            }
            if same_ref && same_pred {
                intersection += 1;
            }
        }
    }

    if union == 0 {
        1.0
    } else {
        intersection as f64 / union as f64
    }
}
