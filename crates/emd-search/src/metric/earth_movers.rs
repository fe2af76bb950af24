//! The `EarthMovers` distance metric.

use emd_distances::{
    emd::{Emd, WindowShape},
    Number,
};

use super::{Metric, ParMetric};
use crate::Error;

/// The Earth-Mover's distance between windowed brightness signatures of
/// square images.
///
/// Every image is binned into windows of a fixed shape, and the distance is
/// the minimum work needed to move the brightness of one image onto the
/// other, where moving a unit of brightness costs the distance between the
/// centroids of the two windows.
#[derive(Debug, Clone)]
pub struct EarthMovers {
    /// The distance function with its cached cost vector.
    emd: Emd,
}

impl EarthMovers {
    /// Creates the metric for the given window shape.
    #[must_use]
    pub fn new(shape: WindowShape) -> Self {
        Self { emd: Emd::new(shape) }
    }

    /// Sets the total mass that signatures are normalized to.
    #[must_use]
    pub fn with_goal_mass(self, goal_mass: f64) -> Self {
        Self {
            emd: self.emd.with_goal_mass(goal_mass),
        }
    }

    /// The shape of the windows.
    #[must_use]
    pub const fn shape(&self) -> &WindowShape {
        self.emd.shape()
    }
}

impl<T: Number> Metric<[T]> for EarthMovers {
    fn distance(&self, a: &[T], b: &[T]) -> Result<f64, Error> {
        self.emd.distance(a, b).map_err(Error::from)
    }

    fn name(&self) -> &str {
        "earth-movers"
    }

    fn is_expensive(&self) -> bool {
        true
    }
}

impl<T: Number> ParMetric<[T]> for EarthMovers {}
