//! Rotation and permutation engine for N×N×N twisty puzzle cubes.
//!
//! The engine tracks the lattice position and orientation of every visible
//! piece, applies quarter turns to one selected layer at a time, and drives
//! the interpolated animation of turns in progress. Rendering and input are
//! left to the caller, which reads piece state through [`PuzzleState`] once
//! per frame.

#[macro_use]
extern crate lazy_static;

mod axis;
mod lattice;
mod piece;
pub mod prefs;
mod puzzle;
mod selection;
mod turn_engine;


pub use axis::Axis;
pub use lattice::{Lattice, LatticeError, MAX_LATTICE_SIZE};
pub use piece::{Coords, Piece};
pub use prefs::{InterpolateFn, Preferences};
pub use puzzle::{PuzzleState, SOLVED_ANGLE_TOLERANCE};
pub use quartermath;
pub use selection::Selection;
pub use turn_engine::{Tick, TurnEngine};
pub use web_time::{Duration, Instant};
