//! The `Metric` trait is used for all distance computations during search.

mod earth_movers;
mod manhattan;

pub use earth_movers::EarthMovers;
pub use manhattan::Manhattan;

use crate::Error;

/// The `Metric` trait is used for all distance computations during search.
///
/// Distances are always `f64`. Computing a distance may fail, e.g. when the
/// two items have different numbers of pixels, and such failures abort the
/// search that asked for the distance.
///
/// # Example
///
/// ```rust
/// use emd_search::{Error, Metric};
///
/// struct Hamming;
///
/// impl Metric<[u8]> for Hamming {
///     fn distance(&self, a: &[u8], b: &[u8]) -> Result<f64, Error> {
///         if a.len() != b.len() {
///             return Err(Error::Shape { expected: a.len(), actual: b.len() });
///         }
///         let count = a.iter().zip(b).filter(|(x, y)| x != y).count();
///         Ok(count as f64)
///     }
///
///     fn name(&self) -> &str {
///         "hamming"
///     }
///
///     fn is_expensive(&self) -> bool {
///         false
///     }
/// }
///
/// let metric = Hamming;
/// assert_eq!(metric.distance(b"hello".as_slice(), b"world".as_slice()).unwrap(), 4.0);
/// assert!(metric.distance(b"hello".as_slice(), b"hi".as_slice()).is_err());
/// ```
pub trait Metric<I: ?Sized> {
    /// Call the metric on two items.
    ///
    /// # Errors
    ///
    /// Depends on the metric. Mismatched item sizes should be reported as
    /// [`Error::Shape`].
    fn distance(&self, a: &I, b: &I) -> Result<f64, Error>;

    /// The name of the metric.
    fn name(&self) -> &str;

    /// Whether the metric is expensive to compute.
    ///
    /// We say that a metric is expensive if it costs more than linear time in
    /// the size of the items to compute the distance between two items.
    ///
    /// Searches with expensive metrics parallelize over the distance
    /// computations of a single query.
    fn is_expensive(&self) -> bool;
}

/// Parallel version of [`Metric`](crate::metric::Metric).
#[allow(clippy::module_name_repetitions)]
pub trait ParMetric<I: ?Sized + Sync>: Metric<I> + Send + Sync {
    /// Parallel version of [`Metric::distance`](crate::metric::Metric::distance).
    ///
    /// The default implementation calls the sequential version.
    ///
    /// # Errors
    ///
    /// See [`Metric::distance`].
    fn par_distance(&self, a: &I, b: &I) -> Result<f64, Error> {
        self.distance(a, b)
    }
}
