//! Rectangular windows that tile a square image.

use crate::vectors::euclidean;

use super::EmdError;

/// The shape of the windows used to bin a square image into a signature.
///
/// Windows tile the image exactly: both `width` and `height` divide the image
/// `side`. Windows are numbered in row-major scan order, starting at the top
/// left of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowShape {
    /// The width of each window, in pixels.
    width: usize,
    /// The height of each window, in pixels.
    height: usize,
    /// The side length of the square images being binned.
    side: usize,
}

impl WindowShape {
    /// Creates a new `WindowShape`.
    ///
    /// # Errors
    ///
    /// * If any of the dimensions is zero.
    /// * If `width` or `height` does not evenly divide `side`.
    pub fn new(width: usize, height: usize, side: usize) -> Result<Self, EmdError> {
        if width == 0 || height == 0 || side == 0 {
            return Err(EmdError::Configuration(format!(
                "window {width}x{height} and image side {side} must all be positive"
            )));
        }
        if side % width != 0 || side % height != 0 {
            return Err(EmdError::Configuration(format!(
                "window {width}x{height} does not evenly divide the image side {side}"
            )));
        }
        Ok(Self { width, height, side })
    }

    /// The width of each window.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// The height of each window.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// The side length of the images.
    #[must_use]
    pub const fn side(&self) -> usize {
        self.side
    }

    /// The number of pixels in an image of this side length.
    #[must_use]
    pub const fn num_pixels(&self) -> usize {
        self.side * self.side
    }

    /// The number of windows along a row of the image.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.side / self.width
    }

    /// The number of windows along a column of the image.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.side / self.height
    }

    /// The total number of windows.
    #[must_use]
    pub const fn num_windows(&self) -> usize {
        self.columns() * self.rows()
    }

    /// Returns the `(column, row)` grid position of the window at `index`.
    #[must_use]
    pub const fn position(&self, index: usize) -> (usize, usize) {
        (index % self.columns(), index / self.columns())
    }

    /// Returns the flat indices of the pixels inside the window at `index`.
    pub fn pixel_indices(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let (column, row) = self.position(index);
        let (x0, y0) = (column * self.width, row * self.height);
        (y0..(y0 + self.height)).flat_map(move |y| (x0..(x0 + self.width)).map(move |x| y * self.side + x))
    }

    /// Returns the centroid of the window at `index`.
    ///
    /// The vertical axis points up: windows in the first row of the image
    /// have the largest `y` coordinate.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn centroid(&self, index: usize) -> [f64; 2] {
        let (column, row) = self.position(index);
        let x = (column as f64 + 0.5) * self.width as f64;
        let y = (self.rows() as f64 - row as f64 - 0.5) * self.height as f64;
        [x, y]
    }

    /// The Euclidean distance between the centroids of two windows.
    #[must_use]
    pub fn ground_distance(&self, i: usize, j: usize) -> f64 {
        euclidean(&self.centroid(i), &self.centroid(j))
    }

    /// The centroid-to-centroid cost of moving mass between every pair of
    /// windows, flattened in row-major order so that the cost of moving mass
    /// from window `i` to window `j` is at `i * n + j`.
    #[must_use]
    pub fn cost_vector(&self) -> Vec<f64> {
        let n = self.num_windows();
        let centroids = (0..n).map(|i| self.centroid(i)).collect::<Vec<_>>();
        centroids
            .iter()
            .flat_map(|a| centroids.iter().map(move |b| euclidean(a, b)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::WindowShape;

    #[test_case(7, 7, 28, 16 ; "seven_by_seven")]
    #[test_case(14, 7, 28, 8 ; "wide")]
    #[test_case(28, 28, 28, 1 ; "whole_image")]
    #[test_case(1, 1, 4, 16 ; "single_pixels")]
    fn window_counts(width: usize, height: usize, side: usize, expected: usize) {
        let shape = WindowShape::new(width, height, side).unwrap();
        assert_eq!(shape.num_windows(), expected);
        let covered = (0..expected).map(|i| shape.pixel_indices(i).count()).sum::<usize>();
        assert_eq!(covered, side * side);
    }

    #[test_case(5, 7, 28 ; "width_does_not_divide")]
    #[test_case(7, 3, 28 ; "height_does_not_divide")]
    #[test_case(0, 7, 28 ; "zero_width")]
    fn rejects_bad_shapes(width: usize, height: usize, side: usize) {
        assert!(WindowShape::new(width, height, side).is_err());
    }

    #[test]
    fn centroids_flip_vertical_axis() {
        let shape = WindowShape::new(7, 7, 28).unwrap();
        assert_eq!(shape.centroid(0), [3.5, 24.5]);
        assert_eq!(shape.centroid(3), [24.5, 24.5]);
        assert_eq!(shape.centroid(4), [3.5, 17.5]);
        assert_eq!(shape.centroid(15), [24.5, 3.5]);

        let shape = WindowShape::new(14, 7, 28).unwrap();
        assert_eq!(shape.centroid(1), [21.0, 24.5]);
        assert_eq!(shape.centroid(2), [7.0, 17.5]);
    }

    #[test]
    fn pixel_indices_use_image_side() {
        let shape = WindowShape::new(2, 2, 4).unwrap();
        assert_eq!(shape.pixel_indices(0).collect::<Vec<_>>(), vec![0, 1, 4, 5]);
        assert_eq!(shape.pixel_indices(1).collect::<Vec<_>>(), vec![2, 3, 6, 7]);
        assert_eq!(shape.pixel_indices(3).collect::<Vec<_>>(), vec![10, 11, 14, 15]);
    }

    #[test]
    fn cost_vector_is_symmetric_with_zero_diagonal() {
        let shape = WindowShape::new(7, 14, 28).unwrap();
        let n = shape.num_windows();
        let cost = shape.cost_vector();
        assert_eq!(cost.len(), n * n);

        for i in 0..n {
            assert!(cost[i * n + i].abs() <= f64::EPSILON);
            for j in 0..n {
                assert!((cost[i * n + j] - cost[j * n + i]).abs() <= f64::EPSILON);
                assert!((cost[i * n + j] - shape.ground_distance(i, j)).abs() <= f64::EPSILON);
            }
        }

        // window 0 is at (3.5, 21.0) and window 5 is at (10.5, 7.0).
        let expected = (7.0_f64.powi(2) + 14.0_f64.powi(2)).sqrt();
        assert!((cost[5] - expected).abs() <= 1e-12);
    }
}
