//! Vector and quaternion primitives for rotating puzzle pieces in 3D.

pub use approx;

/// Floating-point type used for geometry.
pub type Float = f64;

/// Small floating-point value used for comparisons and tiny offsets.
pub const EPSILON: Float = 0.000001;

/// Asserts that both arguments are approximately equal.
#[macro_export]
macro_rules! assert_approx_eq {
    ($a:expr, $b:expr $(,)?) => {
        $crate::approx::assert_abs_diff_eq!($a, $b, epsilon = $crate::EPSILON)
    };
}

/// Panics in debug builds; logs an error in release builds.
#[macro_export]
macro_rules! debug_panic {
    ($($tok:tt)*) => {
        match cfg!(debug_assertions) {
            true => panic!($($tok)*),
            false => $crate::log::error!($($tok)*),
        }
    };
}

#[doc(hidden)]
pub use log;

pub mod approx_cmp;
mod quaternion;
mod vector;

/// Structs, traits, and constants.
pub mod prelude {
    pub use approx::AbsDiffEq;

    pub use crate::approx_cmp::*;
    pub use crate::quaternion::Quaternion;
    pub use crate::vector::Vector3;
    pub use crate::{EPSILON, Float};
}
pub use prelude::*;
