//! Lattice axes and the quarter turns around them.

use std::f64::consts::FRAC_PI_2;

use quartermath::{Quaternion, Vector3};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::Coords;

lazy_static! {
    /// +90° rotation around each axis, indexed by [`Axis::int()`].
    static ref QUARTER_TURNS: [Quaternion; 3] =
        Axis::ALL.map(|axis| Quaternion::from_axis_angle(axis.unit_vector(), FRAC_PI_2));
}

/// A 3-dimensional axis.
#[derive(
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
)]
#[strum(ascii_case_insensitive)]
pub enum Axis {
    /// X axis (right).
    #[default]
    X = 0,
    /// Y axis (up).
    Y = 1,
    /// Z axis (towards the camera).
    Z = 2,
}
impl Axis {
    /// All three axes, in order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns an integer index for this axis; X = 0, Y = 1, Z = 2.
    pub const fn int(self) -> usize {
        self as usize
    }
    /// Returns the axis with the given index, wrapping around in both
    /// directions.
    pub fn from_int_wrapping(i: isize) -> Self {
        Self::ALL[i.rem_euclid(3) as usize]
    }
    /// Returns the next axis, wrapping from Z back to X.
    #[must_use]
    pub fn next(self) -> Self {
        Self::from_int_wrapping(self.int() as isize + 1)
    }
    /// Returns the previous axis, wrapping from X back to Z.
    #[must_use]
    pub fn prev(self) -> Self {
        Self::from_int_wrapping(self.int() as isize - 1)
    }

    /// Returns the unit vector pointing along the positive end of this axis.
    pub fn unit_vector(self) -> Vector3 {
        match self {
            Axis::X => Vector3::X,
            Axis::Y => Vector3::Y,
            Axis::Z => Vector3::Z,
        }
    }
    /// Returns the rotation of +90° around this axis.
    pub fn quarter_turn(self) -> Quaternion {
        QUARTER_TURNS[self.int()]
    }

    /// Returns the two axes perpendicular to this one, ordered so that a
    /// positive quarter turn rotates the first one onto the second.
    pub fn plane(self) -> (Axis, Axis) {
        match self {
            // X+ => rotate from Y+ to Z+.
            Axis::X => (Axis::Y, Axis::Z),
            // Y+ => rotate from Z+ to X+.
            Axis::Y => (Axis::Z, Axis::X),
            // Z+ => rotate from X+ to Y+.
            Axis::Z => (Axis::X, Axis::Y),
        }
    }

    /// Returns the coordinates of a lattice cell after a positive quarter turn
    /// around this axis, in a lattice with `size` cells along each axis.
    ///
    /// The coordinate along this axis is unchanged. Every coordinate must be
    /// less than `size`.
    pub fn rotate_coords(self, coords: Coords, size: u32) -> Coords {
        debug_assert!(
            coords.iter().all(|&c| c < size),
            "coordinates {coords:?} out of range for lattice size {size}",
        );
        let (a, b) = self.plane();
        let mut ret = coords;
        ret[a.int()] = (size - 1) - coords[b.int()];
        ret[b.int()] = coords[a.int()];
        ret
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quartermath::assert_approx_eq;

    use super::*;

    #[test]
    fn test_axis_wrapping() {
        assert_eq!(Axis::Z.next(), Axis::X);
        assert_eq!(Axis::X.prev(), Axis::Z);
        assert_eq!(Axis::from_int_wrapping(-4), Axis::Z);
        assert_eq!(Axis::from_int_wrapping(7), Axis::Y);
    }

    #[test]
    fn test_axis_from_str() {
        assert_eq!("y".parse::<Axis>(), Ok(Axis::Y));
        assert_eq!("Z".parse::<Axis>(), Ok(Axis::Z));
        assert!("w".parse::<Axis>().is_err());
        assert_eq!(Axis::X.to_string(), "X");
    }

    #[test]
    fn test_rotate_coords_rules() {
        // X: (y, z) -> (2 - z, y)
        assert_eq!(Axis::X.rotate_coords([1, 0, 2], 3), [1, 0, 0]);
        // Y: (z, x) -> (2 - x, z)
        assert_eq!(Axis::Y.rotate_coords([2, 1, 0], 3), [0, 1, 0]);
        // Z: (x, y) -> (2 - y, x)
        assert_eq!(Axis::Z.rotate_coords([0, 0, 0], 3), [2, 0, 0]);
        assert_eq!(Axis::Z.rotate_coords([2, 0, 0], 3), [2, 2, 0]);
    }

    #[test]
    fn test_rotate_coords_matches_quarter_turn() {
        // The integer permutation and the quaternion must turn the same way.
        let size = 3;
        let center = (size - 1) as f64 / 2.0;
        let offset = |c: Coords| Vector3::from(c.map(|x| x as f64 - center));
        for axis in Axis::ALL {
            for coords in [[0, 0, 0], [2, 1, 0], [1, 2, 2], [0, 2, 1]] {
                let expected = offset(axis.rotate_coords(coords, size));
                assert_approx_eq!(axis.quarter_turn().rotate(offset(coords)), expected);
            }
        }
    }

    #[test]
    fn test_rotate_coords_four_cycle() {
        for size in 1..=5 {
            for axis in Axis::ALL {
                for x in 0..size {
                    for y in 0..size {
                        let start = [x, y, 0];
                        let mut c = start;
                        for _ in 0..4 {
                            c = axis.rotate_coords(c, size);
                        }
                        assert_eq!(c, start);
                    }
                }
            }
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of range")]
    fn test_rotate_coords_out_of_range() {
        Axis::Z.rotate_coords([3, 0, 0], 3);
    }
}
