//! Pixelwise distance functions between flattened images.
//!
//! # Potentially unexpected behaviors
//! These functions do not check that the two slices have the same length.
//! When one slice is shorter than the other, elements in the longer slice past
//! the end of the shorter slice will be ignored. Callers that need a shape
//! check should go through a metric that performs one.

mod lp_norms;
pub(crate) mod utils;

pub use lp_norms::{euclidean, euclidean_sq, manhattan};
