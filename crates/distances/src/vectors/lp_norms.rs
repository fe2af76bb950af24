//! Provides functions for calculating Lp-norms between two vectors.

use crate::Number;

use super::utils::abs_diff_iter;

/// Euclidean distance between two vectors.
///
/// Also known as the L2-norm, the Euclidean distance is defined as the square
/// root of the sum of the squares of the absolute differences between the
/// corresponding elements of the two vectors.
///
/// See the [`crate::vectors`] module documentation for information on this
/// function's potentially unexpected behaviors
///
/// # Examples
///
/// ```
/// use emd_distances::vectors::euclidean;
///
/// let x: Vec<f64> = vec![1.0, 2.0, 3.0];
/// let y: Vec<f64> = vec![4.0, 5.0, 6.0];
///
/// let distance = euclidean(&x, &y);
///
/// assert!((distance - (27.0_f64).sqrt()).abs() <= f64::EPSILON);
/// ```
pub fn euclidean<T: Number>(x: &[T], y: &[T]) -> f64 {
    euclidean_sq(x, y).sqrt()
}

/// Squared Euclidean distance between two vectors.
///
/// See the [`crate::vectors`] module documentation for information on this
/// function's potentially unexpected behaviors
///
/// # Examples
///
/// ```
/// use emd_distances::vectors::euclidean_sq;
///
/// let x: Vec<f64> = vec![1.0, 2.0, 3.0];
/// let y: Vec<f64> = vec![4.0, 5.0, 6.0];
///
/// let distance = euclidean_sq(&x, &y);
///
/// assert!((distance - 27.0).abs() <= f64::EPSILON);
/// ```
pub fn euclidean_sq<T: Number>(x: &[T], y: &[T]) -> f64 {
    abs_diff_iter(x, y).map(|v| v * v).sum()
}

/// Manhattan distance between two vectors.
///
/// Also known as the L1-norm or the taxicab distance, the Manhattan distance is
/// defined as the sum of the absolute differences between the corresponding
/// elements of the two vectors. For images this is the sum of the absolute
/// pixel differences.
///
/// The differences are taken and summed in `f64`, so no pixel type can
/// overflow.
///
/// See the [`crate::vectors`] module documentation for information on this
/// function's potentially unexpected behaviors
///
/// # Examples
///
/// ```
/// use emd_distances::vectors::manhattan;
///
/// let x: Vec<u8> = vec![0, 200, 3];
/// let y: Vec<u8> = vec![255, 0, 3];
///
/// let distance = manhattan(&x, &y);
///
/// assert!((distance - 455.0).abs() <= f64::EPSILON);
/// ```
pub fn manhattan<T: Number>(x: &[T], y: &[T]) -> f64 {
    abs_diff_iter(x, y).sum()
}
