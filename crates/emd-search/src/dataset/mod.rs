//! Batches of grayscale images and their labels.

pub mod idx;

use std::path::Path;

use crate::Error;

/// An ordered batch of grayscale images of the same shape, each stored
/// row-major.
///
/// MNIST digits are square. Images written back from a reduced space are
/// usually a single row of values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBatch {
    /// The number of rows of pixels in every image.
    rows: usize,
    /// The number of columns of pixels in every image.
    columns: usize,
    /// The images, each with `rows * columns` pixels.
    images: Vec<Vec<u8>>,
}

impl ImageBatch {
    /// Creates a batch of `rows x columns` images.
    ///
    /// # Errors
    ///
    /// * If `rows * columns` overflows.
    /// * If any image does not have `rows * columns` pixels.
    pub fn new(rows: usize, columns: usize, images: Vec<Vec<u8>>) -> Result<Self, Error> {
        let expected = rows
            .checked_mul(columns)
            .ok_or_else(|| Error::Configuration(format!("{rows}x{columns} images are too large")))?;
        if let Some(image) = images.iter().find(|image| image.len() != expected) {
            return Err(Error::Shape {
                expected,
                actual: image.len(),
            });
        }
        Ok(Self { rows, columns, images })
    }

    /// Creates a batch of square images with the given side length.
    ///
    /// # Errors
    ///
    /// See [`ImageBatch::new`].
    pub fn square(side: usize, images: Vec<Vec<u8>>) -> Result<Self, Error> {
        Self::new(side, side, images)
    }

    /// The number of rows of pixels in every image.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// The number of columns of pixels in every image.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// The number of pixels in every image.
    #[must_use]
    pub const fn num_pixels(&self) -> usize {
        self.rows * self.columns
    }

    /// The side length of the images, if they are square.
    #[must_use]
    pub const fn side(&self) -> Option<usize> {
        if self.rows == self.columns {
            Some(self.rows)
        } else {
            None
        }
    }

    /// The number of images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the batch holds no images.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// The images.
    #[must_use]
    pub fn images(&self) -> &[Vec<u8>] {
        &self.images
    }

    /// Iterates over the images as pixel slices.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.images.iter().map(Vec::as_slice)
    }

    /// Consumes the batch and returns the images.
    #[must_use]
    pub fn into_images(self) -> Vec<Vec<u8>> {
        self.images
    }
}

/// A batch of images with one class label per image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledImages {
    /// The images.
    images: ImageBatch,
    /// The class of each image.
    labels: Vec<u8>,
}

impl LabeledImages {
    /// Pairs images with their labels.
    ///
    /// # Errors
    ///
    /// If the number of labels differs from the number of images.
    pub fn new(images: ImageBatch, labels: Vec<u8>) -> Result<Self, Error> {
        if images.len() == labels.len() {
            Ok(Self { images, labels })
        } else {
            Err(Error::Configuration(format!(
                "{} images but {} labels",
                images.len(),
                labels.len()
            )))
        }
    }

    /// Reads images and labels from a pair of IDX files.
    ///
    /// # Errors
    ///
    /// * If either file cannot be read or decoded.
    /// * If the number of labels differs from the number of images.
    pub fn read<P: AsRef<Path>, Q: AsRef<Path>>(images_path: P, labels_path: Q) -> Result<Self, Error> {
        let images = idx::read_images(images_path)?;
        let labels = idx::read_labels(labels_path)?;
        Self::new(images, labels)
    }

    /// Writes the images and labels to a pair of IDX files.
    ///
    /// # Errors
    ///
    /// If either file cannot be written.
    pub fn write<P: AsRef<Path>, Q: AsRef<Path>>(&self, images_path: P, labels_path: Q) -> Result<(), Error> {
        idx::write_images(images_path, &self.images)?;
        idx::write_labels(labels_path, &self.labels)
    }

    /// The images.
    #[must_use]
    pub const fn images(&self) -> &ImageBatch {
        &self.images
    }

    /// The class labels.
    #[must_use]
    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    /// The number of images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether there are no images.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// The side length of the images, if they are square.
    #[must_use]
    pub const fn side(&self) -> Option<usize> {
        self.images.side()
    }

    /// The `(rows, columns)` shape of the images.
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.images.rows(), self.images.columns())
    }
}
