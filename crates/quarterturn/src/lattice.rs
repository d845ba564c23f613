//! The fixed collection of pieces that make up the puzzle.

use itertools::iproduct;
use quartermath::{Float, Vector3};
use thiserror::Error;

use crate::{Axis, Coords, Piece};

/// Maximum number of layers along each axis.
pub const MAX_LATTICE_SIZE: u32 = 64;

/// Error produced when constructing a lattice.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum LatticeError {
    /// Lattice size out of range
    #[error("lattice size must be between 1 and {MAX_LATTICE_SIZE}; got {0}")]
    InvalidSize(u32),
}

/// All the visible pieces of an N×N×N puzzle cube.
///
/// Pieces that are strictly inside the cube are never visible and never move
/// anywhere visible, so they are not constructed at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    size: u32,
    pieces: Vec<Piece>,
}
impl Lattice {
    /// Constructs a solved lattice with `size` layers along each axis.
    pub fn new(size: u32) -> Result<Self, LatticeError> {
        if !(1..=MAX_LATTICE_SIZE).contains(&size) {
            return Err(LatticeError::InvalidSize(size));
        }
        let pieces = iproduct!(0..size, 0..size, 0..size)
            .map(|(z, y, x)| [x, y, z])
            .filter(|&coords| Self::is_boundary(size, coords))
            .map(Piece::new)
            .collect();
        Ok(Self { size, pieces })
    }

    /// Returns the number of layers along each axis.
    pub fn size(&self) -> u32 {
        self.size
    }
    /// Returns all the pieces, in a fixed order.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }
    /// Returns the number of pieces.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }
    /// Returns whether the lattice has no pieces, which is never the case.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Returns whether a cell is on the surface of a lattice with `size` layers
    /// along each axis. An empty lattice has no surface.
    pub fn is_boundary(size: u32, coords: Coords) -> bool {
        let Some(last) = size.checked_sub(1) else {
            return false;
        };
        coords.iter().any(|&c| c == 0 || c == last)
    }

    /// Returns the offset of a cell from the center of the lattice, measured
    /// in cells.
    pub fn centered_position(&self, coords: Coords) -> Vector3 {
        let center = (self.size - 1) as Float / 2.0;
        Vector3::from(coords.map(|c| c as Float - center))
    }

    /// Returns the pieces in one layer.
    pub fn layer(&self, axis: Axis, layer: u32) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(move |p| p.coord(axis) == layer)
    }

    /// Applies `quarter_turns` positive quarter turns to one layer.
    ///
    /// Each piece only depends on its own state, so pieces are updated in
    /// place.
    pub(crate) fn turn_layer(&mut self, axis: Axis, layer: u32, quarter_turns: u32) {
        if quarter_turns == 0 {
            return;
        }
        log::debug!("turning layer {layer} on axis {axis} by {quarter_turns} quarter turn(s)");
        let size = self.size;
        // Each piece is checked before it moves, and only ever reads its own
        // state.
        for piece in self.pieces.iter_mut().filter(|p| p.coord(axis) == layer) {
            for _ in 0..quarter_turns {
                piece.quarter_turn(axis, size);
            }
        }
    }

    /// Returns every piece to its home position and orientation.
    pub(crate) fn reset(&mut self) {
        for piece in &mut self.pieces {
            piece.reset();
        }
    }
}
