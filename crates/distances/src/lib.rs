#![doc = include_str!("../README.md")]

pub mod emd;
pub mod number;
pub mod vectors;

pub use number::Number;

/// The version of the crate.
pub const VERSION: &str = "0.1.0";
