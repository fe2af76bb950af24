//! Hand-built image batches for the integration tests.

#![allow(dead_code)]

use emd_search::{ImageBatch, LabeledImages};
use rand::prelude::*;

/// The side of the hand-built images.
pub const SIDE: usize = 14;

/// A blank image with a 4x4 square of brightness 200 whose top-left corner
/// is at `(row, col)`.
pub fn blob(row: usize, col: usize) -> Vec<u8> {
    let mut image = vec![0; SIDE * SIDE];
    for r in row..row + 4 {
        for c in col..col + 4 {
            image[r * SIDE + c] = 200;
        }
    }
    image
}

/// Labels blobs near the top-left corner as class 0 and blobs near the
/// bottom-right corner as class 1.
pub fn labeled(corners: &[(usize, usize)]) -> LabeledImages {
    let images = corners.iter().map(|&(r, c)| blob(r, c)).collect();
    let labels = corners.iter().map(|&(r, _)| u8::from(r > SIDE / 2)).collect();
    LabeledImages::new(ImageBatch::square(SIDE, images).unwrap(), labels).unwrap()
}

/// Three images of each class, class 0 first.
pub fn corpus() -> LabeledImages {
    labeled(&[(1, 1), (2, 2), (1, 2), (9, 9), (10, 10), (9, 10)])
}

/// One query of each class.
pub fn queries() -> LabeledImages {
    labeled(&[(2, 1), (10, 9)])
}

/// Random images with random labels.
pub fn random(n: usize, side: usize, seed: u64) -> LabeledImages {
    let mut rng = StdRng::seed_from_u64(seed);
    let images = (0..n)
        .map(|_| (0..side * side).map(|_| rng.gen()).collect())
        .collect();
    let labels = (0..n).map(|_| rng.gen_range(0..10)).collect();
    LabeledImages::new(ImageBatch::square(side, images).unwrap(), labels).unwrap()
}

/// Single-row images of `columns` constant values, labeled 0 below 100 and
/// 1 otherwise.
pub fn rows_of(values: &[u8], columns: usize) -> LabeledImages {
    let images = values.iter().map(|&v| vec![v; columns]).collect();
    let labels = values.iter().map(|&v| u8::from(v >= 100)).collect();
    LabeledImages::new(ImageBatch::new(1, columns, images).unwrap(), labels).unwrap()
}
