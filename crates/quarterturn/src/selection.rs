//! Which layer is targeted for turning.

use serde::{Deserialize, Serialize};

use crate::{Axis, Piece};

/// Axis and layer index targeted by turns.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Selection {
    /// Axis that the selected layer is perpendicular to.
    pub axis: Axis,
    /// Index of the selected layer along [`Selection::axis`].
    pub layer: u32,
}
impl Selection {
    /// Constructs a selection, wrapping `layer` into the range `0..size`.
    pub fn new(axis: Axis, layer: isize, size: u32) -> Self {
        Self {
            axis,
            layer: wrap_layer(layer, size),
        }
    }

    /// Returns whether a piece is in the selected layer.
    pub fn is_active(self, piece: &Piece) -> bool {
        piece.coord(self.axis) == self.layer
    }
}

/// Wraps a layer index into the range `0..size`, in both directions.
pub(crate) fn wrap_layer(layer: isize, size: u32) -> u32 {
    layer.rem_euclid(size as isize) as u32
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_wrap_layer() {
        assert_eq!(wrap_layer(-1, 3), 2);
        assert_eq!(wrap_layer(3, 3), 0);
        assert_eq!(wrap_layer(-7, 3), 2);
        assert_eq!(wrap_layer(5, 1), 0);
    }

    #[test]
    fn test_is_active() {
        let piece = Piece::new([0, 2, 1]);
        assert!(Selection::new(Axis::X, 0, 3).is_active(&piece));
        assert!(Selection::new(Axis::Y, -1, 3).is_active(&piece));
        assert!(!Selection::new(Axis::Z, 0, 3).is_active(&piece));
    }
}
