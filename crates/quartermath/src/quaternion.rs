//! Unit quaternions for representing 3D orientations.

use std::fmt;
use std::ops::{Mul, Neg};

use crate::{EPSILON, Float, Vector3, is_approx_zero};

/// Quaternion `w + i𝐢 + j𝐣 + k𝐤`.
///
/// When used as an orientation, the quaternion should always have unit
/// magnitude. Composing rotations accumulates floating-point drift, so call
/// [`Quaternion::normalize()`] after every composition that is stored.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quaternion {
    /// Scalar component.
    pub w: Float,
    /// 𝐢 component.
    pub i: Float,
    /// 𝐣 component.
    pub j: Float,
    /// 𝐤 component.
    pub k: Float,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { w, i, j, k } = self;
        write!(f, "{w} + {i}i + {j}j + {k}k")
    }
}

impl Quaternion {
    /// Identity rotation.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 0.0);

    /// Axis returned by [`Quaternion::to_axis_angle()`] when the rotation
    /// angle is zero and the axis is therefore arbitrary.
    pub const FALLBACK_AXIS: Vector3 = Vector3::X;

    /// Constructs a quaternion from its components.
    pub const fn new(w: Float, i: Float, j: Float, k: Float) -> Self {
        Self { w, i, j, k }
    }

    /// Constructs a rotation of `angle` radians around `axis`, which must be a
    /// unit vector.
    pub fn from_axis_angle(axis: Vector3, angle: Float) -> Self {
        let (s, c) = (angle / 2.0).sin_cos();
        Self::new(c, axis.x * s, axis.y * s, axis.z * s)
    }

    /// Returns the vector part `(i, j, k)`.
    pub fn vector_part(self) -> Vector3 {
        Vector3::new(self.i, self.j, self.k)
    }

    /// Returns the 4D dot product of two quaternions.
    pub fn dot(self, rhs: Self) -> Float {
        self.w * rhs.w + self.i * rhs.i + self.j * rhs.j + self.k * rhs.k
    }
    /// Returns the squared magnitude of the quaternion.
    pub fn mag2(self) -> Float {
        self.dot(self)
    }
    /// Returns the magnitude of the quaternion.
    pub fn mag(self) -> Float {
        self.mag2().sqrt()
    }

    /// Divides all four components by the magnitude.
    ///
    /// Returns the identity if the magnitude is approximately zero, which
    /// cannot happen for a quaternion built out of rotations.
    #[must_use]
    pub fn normalize(self) -> Self {
        let mag = self.mag();
        if is_approx_zero(mag) {
            crate::debug_panic!("cannot normalize zero quaternion {self:?}");
            return Self::IDENTITY;
        }
        Self::new(self.w / mag, self.i / mag, self.j / mag, self.k / mag)
    }

    /// Returns the conjugate, which is the inverse rotation for a unit
    /// quaternion.
    #[must_use]
    pub fn conjugate(self) -> Self {
        Self::new(self.w, -self.i, -self.j, -self.k)
    }

    /// Returns the rotation as an axis and an angle in radians.
    ///
    /// The angle is in the range `0.0..=TAU`. If the rotation angle is zero
    /// then the axis is arbitrary and [`Quaternion::FALLBACK_AXIS`] is
    /// returned.
    pub fn to_axis_angle(self) -> (Vector3, Float) {
        // Drift can push `w` slightly outside `-1.0..=1.0`, where `acos()`
        // returns NaN.
        let angle = 2.0 * self.w.clamp(-1.0, 1.0).acos();
        let s = (angle / 2.0).sin();
        let axis = if is_approx_zero(s) {
            Self::FALLBACK_AXIS
        } else {
            self.vector_part() * (1.0 / s)
        };
        (axis, angle)
    }

    /// Rotates a vector by the quaternion, which must have unit magnitude.
    pub fn rotate(self, v: Vector3) -> Vector3 {
        // q * v * q⁻¹, expanded
        let u = self.vector_part();
        let t = 2.0 * u.cross(v);
        v + self.w * t + u.cross(t)
    }

    /// Returns whether two unit quaternions represent the same rotation.
    ///
    /// `q` and `-q` represent the same rotation.
    pub fn is_same_rotation(self, other: Self) -> bool {
        (self.dot(other).abs() - 1.0).abs() <= EPSILON
    }
}

impl Mul for Quaternion {
    type Output = Self;

    /// Hamilton product. `a * b` applies `b` and then `a`.
    fn mul(self, rhs: Self) -> Self::Output {
        let (a, b) = (self, rhs);
        Self {
            w: a.w * b.w - a.i * b.i - a.j * b.j - a.k * b.k,
            i: a.w * b.i + a.i * b.w + a.j * b.k - a.k * b.j,
            j: a.w * b.j - a.i * b.k + a.j * b.w + a.k * b.i,
            k: a.w * b.k + a.i * b.j - a.j * b.i + a.k * b.w,
        }
    }
}

impl Neg for Quaternion {
    type Output = Self;

    /// Negates the components of the quaternion. It still represents the same
    /// rotation.
    fn neg(self) -> Self::Output {
        Self::new(-self.w, -self.i, -self.j, -self.k)
    }
}

impl approx::AbsDiffEq for Quaternion {
    type Epsilon = Float;

    fn default_epsilon() -> Self::Epsilon {
        crate::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.w.abs_diff_eq(&other.w, epsilon)
            && self.i.abs_diff_eq(&other.i, epsilon)
            && self.j.abs_diff_eq(&other.j, epsilon)
            && self.k.abs_diff_eq(&other.k, epsilon)
    }
}
