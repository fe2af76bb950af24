//! Windowed brightness signatures of images.

use crate::Number;

use super::{EmdError, WindowShape};

/// The mass added to every window on top of its brightness.
///
/// Every window mass is therefore strictly positive.
pub const BRIGHTNESS_OFFSET: f64 = 1.0;

/// The default total mass of a normalized signature.
pub const GOAL_MASS: f64 = 1.0;

/// The brightness signature of an image.
///
/// One mass per window, in row-major window-scan order. The position of a mass
/// is the window's index in the `WindowShape` that produced it, which is how
/// its centroid is recovered later.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    /// The mass of each window.
    masses: Vec<f64>,
}

impl Signature {
    /// Bins an image into windows and records the brightness of each window.
    ///
    /// The mass of a window is the sum of its pixel intensities plus
    /// [`BRIGHTNESS_OFFSET`].
    ///
    /// # Errors
    ///
    /// * If the image does not have exactly `side * side` pixels.
    pub fn extract<T: Number>(shape: &WindowShape, image: &[T]) -> Result<Self, EmdError> {
        if image.len() != shape.num_pixels() {
            return Err(EmdError::Shape {
                expected: shape.num_pixels(),
                actual: image.len(),
            });
        }

        let masses = (0..shape.num_windows())
            .map(|w| {
                shape
                    .pixel_indices(w)
                    .map(|p| image[p].as_f64())
                    .sum::<f64>()
                    + BRIGHTNESS_OFFSET
            })
            .collect();

        Ok(Self { masses })
    }

    /// Creates a signature directly from window masses.
    #[must_use]
    pub const fn from_masses(masses: Vec<f64>) -> Self {
        Self { masses }
    }

    /// The number of windows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.masses.len()
    }

    /// Whether the signature has no windows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    /// The mass of each window.
    #[must_use]
    pub fn masses(&self) -> &[f64] {
        &self.masses
    }

    /// Iterates over `(window_index, mass)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.masses.iter().copied().enumerate()
    }

    /// The total mass over all windows.
    #[must_use]
    pub fn total_mass(&self) -> f64 {
        self.masses.iter().sum()
    }

    /// Returns a copy of the signature rescaled to sum to `goal_mass`.
    ///
    /// # Errors
    ///
    /// * If the total mass is not strictly positive and finite.
    pub fn normalized(&self, goal_mass: f64) -> Result<Self, EmdError> {
        let total = self.total_mass();
        if !(total.is_finite() && total > 0.0) {
            return Err(EmdError::Configuration(format!(
                "cannot normalize a signature with total mass {total}"
            )));
        }
        let scale = goal_mass / total;
        Ok(Self {
            masses: self.masses.iter().map(|&m| m * scale).collect(),
        })
    }
}

/// Rescales both signatures so that each sums to `goal_mass`.
///
/// The two signatures are scaled independently and the inputs are left
/// untouched.
///
/// # Errors
///
/// * If the signatures have different numbers of windows.
/// * If either signature has no positive mass.
pub fn normalize_pair(x: &Signature, y: &Signature, goal_mass: f64) -> Result<(Signature, Signature), EmdError> {
    if x.len() != y.len() {
        return Err(EmdError::Shape {
            expected: x.len(),
            actual: y.len(),
        });
    }
    Ok((x.normalized(goal_mass)?, y.normalized(goal_mass)?))
}
