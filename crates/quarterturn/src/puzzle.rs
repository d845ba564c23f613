//! Complete state of a puzzle being manipulated.

use quartermath::{Float, Quaternion, Vector3, angle_distance};
use rand::{Rng, SeedableRng};
use web_time::Instant;

use crate::selection::wrap_layer;
use crate::{Axis, Lattice, LatticeError, Piece, Preferences, Selection, Tick, TurnEngine};

/// Maximum angle in radians between two piece orientations for them to count
/// as the same when checking whether the puzzle is solved.
pub const SOLVED_ANGLE_TOLERANCE: Float = 0.01;

/// Puzzle pieces, selected layer, and pending turns.
///
/// All mutation goes through this struct. Turns are only ever applied to the
/// selected layer, and changing the selection first applies any pending turns
/// so that the set of pieces in a turning layer never changes mid-turn.
#[derive(Debug, Clone)]
pub struct PuzzleState {
    lattice: Lattice,
    selection: Selection,
    turns: TurnEngine,
}
impl PuzzleState {
    /// Constructs a solved puzzle with `size` layers along each axis and
    /// default animation settings.
    pub fn new(size: u32) -> Result<Self, LatticeError> {
        Self::with_prefs(&Preferences {
            lattice_size: size,
            ..Default::default()
        })
    }
    /// Constructs a solved puzzle using the lattice size and animation
    /// settings from `prefs`.
    pub fn with_prefs(prefs: &Preferences) -> Result<Self, LatticeError> {
        Ok(Self {
            lattice: Lattice::new(prefs.lattice_size)?,
            selection: Selection::default(),
            turns: TurnEngine::new(prefs),
        })
    }

    /// Returns the number of layers along each axis.
    pub fn size(&self) -> u32 {
        self.lattice.size()
    }
    /// Returns the lattice of pieces.
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }
    /// Returns all the pieces, in a fixed order. Pending turns are not
    /// reflected until they are committed.
    pub fn pieces(&self) -> &[Piece] {
        self.lattice.pieces()
    }
    /// Returns the selected axis and layer.
    pub fn selection(&self) -> Selection {
        self.selection
    }
    /// Returns the number of quarter turns that have not been applied yet.
    pub fn pending_turns(&self) -> u32 {
        self.turns.pending()
    }

    /// Returns whether a piece is in the selected layer.
    pub fn is_active(&self, piece: &Piece) -> bool {
        self.selection.is_active(piece)
    }
    /// Returns the pieces in the selected layer.
    pub fn active_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.lattice.layer(self.selection.axis, self.selection.layer)
    }

    /// Applies pending turns and then selects a new axis, keeping the same
    /// layer index.
    pub fn set_axis(&mut self, axis: Axis) {
        self.flush();
        self.selection.axis = axis;
    }
    /// Applies pending turns and then selects a new layer along the current
    /// axis, wrapping around in both directions.
    pub fn set_layer(&mut self, layer: isize) {
        self.flush();
        self.selection.layer = wrap_layer(layer, self.size());
    }
    /// Selects the next axis.
    pub fn next_axis(&mut self) {
        self.set_axis(self.selection.axis.next());
    }
    /// Selects the previous axis.
    pub fn prev_axis(&mut self) {
        self.set_axis(self.selection.axis.prev());
    }
    /// Selects the next layer along the current axis.
    pub fn next_layer(&mut self) {
        self.set_layer(self.selection.layer as isize + 1);
    }
    /// Selects the previous layer along the current axis.
    pub fn prev_layer(&mut self) {
        self.set_layer(self.selection.layer as isize - 1);
    }

    /// Queues a positive quarter turn of the selected layer. Pieces are not
    /// affected until the turn is committed by [`PuzzleState::tick()`] or
    /// [`PuzzleState::flush()`].
    pub fn enqueue_turn(&mut self, now: Instant) {
        self.turns.enqueue(now);
    }

    /// Advances the animation to `now` and returns the angle in radians that
    /// the selected layer should be displayed rotated by for this frame.
    ///
    /// This must be called every frame with nondecreasing timestamps.
    pub fn tick(&mut self, now: Instant) -> Float {
        self.tick_detailed(now).angle()
    }
    /// Same as [`PuzzleState::tick()`], but also reports whether turns were
    /// committed.
    pub fn tick_detailed(&mut self, now: Instant) -> Tick {
        let tick = self.turns.tick(now);
        if let Tick::Committed { quarter_turns } = tick {
            self.commit(quarter_turns);
        }
        tick
    }

    /// Immediately applies all pending turns, skipping the rest of the
    /// animation. Returns the number of quarter turns applied.
    pub fn flush(&mut self) -> u32 {
        let quarter_turns = self.turns.take_pending();
        self.commit(quarter_turns);
        quarter_turns
    }

    fn commit(&mut self, quarter_turns: u32) {
        let Selection { axis, layer } = self.selection;
        self.lattice.turn_layer(axis, layer, quarter_turns);
    }

    /// Returns every piece to its home position and orientation. Pending turns
    /// are discarded; the selection is kept.
    pub fn reset(&mut self) {
        let discarded = self.turns.take_pending();
        if discarded > 0 {
            log::debug!("discarding {discarded} pending quarter turn(s)");
        }
        self.lattice.reset();
        log::info!("reset puzzle");
    }

    /// Returns whether all pieces have the same orientation.
    ///
    /// Pending turns are not considered. A puzzle that is solved but rotated
    /// as a whole (by turning every layer along one axis) counts as solved.
    pub fn is_solved(&self) -> bool {
        let mut orientations = self.pieces().iter().map(|p| p.orientation());
        let Some(first) = orientations.next() else {
            return true;
        };
        let inv_first = first.conjugate();
        orientations.all(|q| {
            let (_axis, angle) = (inv_first * q).to_axis_angle();
            angle_distance(angle, 0.0) < SOLVED_ANGLE_TOLERANCE
        })
    }

    /// Applies `moves` random layer turns instantly. Each one selects a random
    /// layer along a random axis and turns it by 0 to 3 quarter turns.
    ///
    /// Pending turns are applied first. Afterwards the last random layer stays
    /// selected.
    pub fn scramble<R: Rng + ?Sized>(&mut self, moves: usize, rng: &mut R) {
        self.flush();
        let size = self.size();
        for _ in 0..moves {
            let axis = Axis::ALL[rng.random_range(0..3)];
            let layer = rng.random_range(0..size);
            let quarter_turns = rng.random_range(0..=3);
            self.set_axis(axis);
            self.set_layer(layer as isize);
            self.commit(quarter_turns);
        }
        log::info!("scrambled puzzle with {moves} random turn(s)");
    }
    /// Same as [`PuzzleState::scramble()`], but uses a deterministic random
    /// number generator seeded by `seed`.
    pub fn scramble_seeded(&mut self, moves: usize, seed: u64) {
        let mut rng = rand_chacha::ChaCha12Rng::seed_from_u64(seed);
        self.scramble(moves, &mut rng);
    }

    /// Returns the orientation to display a piece at, given the animation
    /// angle returned by [`PuzzleState::tick()`].
    pub fn visual_orientation(&self, piece: &Piece, angle: Float) -> Quaternion {
        self.visual_rotation(piece, angle) * piece.orientation()
    }
    /// Returns the position to display a piece at, relative to the center of
    /// the puzzle and measured in cells, given the animation angle returned by
    /// [`PuzzleState::tick()`].
    pub fn visual_position(&self, piece: &Piece, angle: Float) -> Vector3 {
        let pos = self.lattice.centered_position(piece.coords());
        self.visual_rotation(piece, angle).rotate(pos)
    }
    fn visual_rotation(&self, piece: &Piece, angle: Float) -> Quaternion {
        if angle != 0.0 && self.is_active(piece) {
            Quaternion::from_axis_angle(self.selection.axis.unit_vector(), angle)
        } else {
            Quaternion::IDENTITY
        }
    }
}
