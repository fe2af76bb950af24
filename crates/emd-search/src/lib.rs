#![doc = include_str!("../README.md")]

pub mod config;
pub mod dataset;
mod error;
pub mod evaluation;
pub mod knn;
pub mod metric;

pub use config::EvaluationConfig;
pub use dataset::{ImageBatch, LabeledImages};
pub use error::Error;
pub use evaluation::{evaluate, evaluate_manhattan, Evaluation};
pub use metric::{EarthMovers, Manhattan, Metric, ParMetric};

/// The current version of the crate.
pub const VERSION: &str = "0.1.0";
