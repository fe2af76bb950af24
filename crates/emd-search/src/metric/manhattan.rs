//! The `Manhattan` distance metric.

use emd_distances::Number;

use super::{Metric, ParMetric};
use crate::Error;

/// The `Manhattan` distance metric, also known as the city block distance.
///
/// For images this is the sum of the absolute pixel differences.
#[derive(Debug, Clone, Copy, Default)]
pub struct Manhattan;

impl<T: Number> Metric<[T]> for Manhattan {
    fn distance(&self, a: &[T], b: &[T]) -> Result<f64, Error> {
        if a.len() != b.len() {
            return Err(Error::Shape {
                expected: a.len(),
                actual: b.len(),
            });
        }
        Ok(emd_distances::vectors::manhattan(a, b))
    }

    fn name(&self) -> &str {
        "manhattan"
    }

    fn is_expensive(&self) -> bool {
        false
    }
}

impl<T: Number> ParMetric<[T]> for Manhattan {}

#[cfg(test)]
mod tests {
    use super::Manhattan;
    use crate::{Error, Metric};

    #[test]
    fn blank_images() {
        let x = vec![0_u8; 28 * 28];
        let d = Manhattan.distance(x.as_slice(), x.as_slice()).unwrap();
        assert!(d.abs() <= f64::EPSILON);
    }

    #[test]
    fn mismatched_images() {
        let x = vec![0_u8; 28 * 28];
        let y = vec![0_u8; 14 * 14];
        assert!(matches!(
            Manhattan.distance(x.as_slice(), y.as_slice()),
            Err(Error::Shape {
                expected: 784,
                actual: 196
            })
        ));
    }
}
