//! Individual pieces of the puzzle.

use quartermath::{Float, Quaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::Axis;

/// Integer lattice coordinates `[x, y, z]`, each in the range `0..size`.
pub type Coords = [u32; 3];

/// One visible sub-cube of the puzzle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Piece {
    coords: Coords,
    home: Coords,
    orientation: Quaternion,
}
impl Piece {
    /// Constructs a piece in its home position with the identity orientation.
    pub(crate) fn new(home: Coords) -> Self {
        Self {
            coords: home,
            home,
            orientation: Quaternion::IDENTITY,
        }
    }

    /// Returns the current lattice coordinates of the piece.
    pub fn coords(&self) -> Coords {
        self.coords
    }
    /// Returns the current coordinate of the piece along `axis`.
    pub fn coord(&self, axis: Axis) -> u32 {
        self.coords[axis.int()]
    }
    /// Returns the coordinates that the piece started at.
    ///
    /// This identifies the piece, and determines which face colors it has.
    pub fn home(&self) -> Coords {
        self.home
    }
    /// Returns the orientation of the piece relative to its home orientation.
    pub fn orientation(&self) -> Quaternion {
        self.orientation
    }
    /// Returns the orientation of the piece as an axis and an angle in radians.
    pub fn axis_angle(&self) -> (Vector3, Float) {
        self.orientation.to_axis_angle()
    }

    /// Applies a positive quarter turn around `axis` to the piece, in a lattice
    /// with `size` cells along each axis.
    pub(crate) fn quarter_turn(&mut self, axis: Axis, size: u32) {
        self.coords = axis.rotate_coords(self.coords, size);
        // Left-multiply so that the turn happens in world space.
        self.orientation = (axis.quarter_turn() * self.orientation).normalize();
    }

    /// Returns the piece to its home position and orientation.
    pub(crate) fn reset(&mut self) {
        *self = Self::new(self.home);
    }
}
