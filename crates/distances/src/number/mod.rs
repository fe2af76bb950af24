//! The `Number` trait is used to represent pixel intensities of different types.
//!
//! We provide implementations for the following types:
//!
//! * Unsigned integers: `u8`, `u16`, `u32`.
//! * Signed integers: `i16`, `i32`.
//! * Floating point numbers: `f32`, `f64`.

mod _number;

pub use _number::Number;
