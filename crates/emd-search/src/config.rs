//! Parameters of an evaluation run.

use emd_distances::emd::{WindowShape, GOAL_MASS};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Parameters of an evaluation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// The width of the EMD windows, in pixels.
    pub width: usize,
    /// The height of the EMD windows, in pixels.
    pub height: usize,
    /// The number of neighbors to retrieve for each query.
    pub k: usize,
    /// The total mass that signatures are normalized to.
    pub goal_mass: f64,
    /// Whether to search for queries in parallel.
    pub parallel: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            width: 7,
            height: 7,
            k: 10,
            goal_mass: GOAL_MASS,
            parallel: false,
        }
    }
}

impl EvaluationConfig {
    /// Returns a copy with a different window shape.
    #[must_use]
    pub fn with_window(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Returns a copy with a different `k`.
    #[must_use]
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Returns a copy that searches in parallel or not.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks the configuration against a corpus of `corpus_len` images with
    /// the given `side` length and returns the window shape to use.
    ///
    /// # Errors
    ///
    /// * If `k` is zero or larger than the corpus.
    /// * If the goal mass is not positive and finite.
    /// * If the window does not evenly divide the image side.
    pub fn validate(&self, corpus_len: usize, side: usize) -> Result<WindowShape, Error> {
        self.validate_k(corpus_len)?;
        if !(self.goal_mass.is_finite() && self.goal_mass > 0.0) {
            return Err(Error::Configuration(format!(
                "goal mass {} must be positive",
                self.goal_mass
            )));
        }
        WindowShape::new(self.width, self.height, side).map_err(Error::from)
    }

    /// Checks only that `k` is between 1 and `corpus_len`.
    ///
    /// # Errors
    ///
    /// If `k` is zero or larger than the corpus.
    pub fn validate_k(&self, corpus_len: usize) -> Result<(), Error> {
        if self.k == 0 || self.k > corpus_len {
            Err(Error::Configuration(format!(
                "k = {} must be between 1 and the corpus size {corpus_len}",
                self.k
            )))
        } else {
            Ok(())
        }
    }
}
