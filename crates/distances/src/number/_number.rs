//! A `Number` is a pixel intensity.
//!
//! Distances are always accumulated as `f64`, so the trait only needs to know
//! how to widen a value to `f64`. Differences are taken after widening, so
//! they cannot overflow for any implementor.

use core::fmt::{Debug, Display};

/// Collections of `Number`s can be used to calculate distances.
pub trait Number: Copy + PartialOrd + Send + Sync + Debug + Display + Default + 'static {
    /// Returns the number as an `f64`. This is lossless for every implementor.
    fn as_f64(self) -> f64;

    /// Returns the absolute difference between two numbers as an `f64`.
    #[must_use]
    fn abs_diff(self, other: Self) -> f64 {
        (self.as_f64() - other.as_f64()).abs()
    }
}

/// A macro to implement the `Number` trait for primitive types that widen
/// losslessly to `f64`.
macro_rules! impl_number {
    ($($ty:ty),*) => {
        $(
            impl Number for $ty {
                fn as_f64(self) -> f64 {
                    f64::from(self)
                }
            }
        )*
    }
}

impl_number!(u8, u16, u32, i16, i32, f32, f64);
