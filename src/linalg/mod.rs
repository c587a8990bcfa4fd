//! Dense linear algebra needed by spectral clustering.
//!
//! This is deliberately not a general-purpose library: it provides exactly the
//! two kernels the clustering pipeline relies on.
//!
//! - [`gram_schmidt`]: QR decomposition of a square matrix by column-wise
//!   orthogonalization.
//! - [`qr_iteration`]: unshifted QR iteration for the eigen-decomposition of a
//!   symmetric matrix.
//!
//! ## Example
//!
//! ```rust
//! use ndarray::array;
//! use nscluster::linalg::{gram_schmidt, qr_iteration};
//!
//! let a = array![[2.0, 1.0], [1.0, 2.0]];
//!
//! let qr = gram_schmidt(&a).unwrap();
//! assert!((qr.q.dot(&qr.r) - &a).iter().all(|x| x.abs() < 1e-12));
//!
//! let eig = qr_iteration(&a, 1e-4).unwrap();
//! assert_eq!(eig.eigenvalues().len(), 2);
//! ```

mod eigen;
mod qr;

pub use eigen::{qr_iteration, EigenDecomposition};
pub use qr::{gram_schmidt, QrDecomposition};

use crate::error::{Error, Result};
use ndarray::Array2;

pub(crate) fn ensure_square(a: &Array2<f64>) -> Result<usize> {
    let (rows, cols) = a.dim();
    if rows != cols {
        return Err(Error::NotSquare { rows, cols });
    }
    if rows == 0 {
        return Err(Error::EmptyInput);
    }
    Ok(rows)
}
