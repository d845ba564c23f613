//! Turn queue and animation timing.

use std::f64::consts::FRAC_PI_2;

use quartermath::Float;
use web_time::{Duration, Instant};

use crate::{InterpolateFn, Preferences};

/// Result of advancing the turn animation to a new frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Tick {
    /// No turns are pending.
    Idle,
    /// Turns are pending and the animation is still in progress.
    Animating {
        /// Angle in radians to rotate the selected layer by, for display only.
        angle: Float,
    },
    /// The animation finished and all pending turns must be committed.
    Committed {
        /// Number of quarter turns that were pending.
        quarter_turns: u32,
    },
}
impl Tick {
    /// Returns the angle in radians to display the selected layer rotated by.
    /// This is zero unless the animation is in progress.
    pub fn angle(self) -> Float {
        match self {
            Tick::Animating { angle } => angle,
            Tick::Idle | Tick::Committed { .. } => 0.0,
        }
    }
}

/// Queue of pending quarter turns on the selected layer, along with the state
/// of their animation.
///
/// The engine only counts turns; applying them to pieces is up to the caller
/// when [`TurnEngine::tick()`] returns [`Tick::Committed`] or when the caller
/// takes the pending turns with [`TurnEngine::take_pending()`].
#[derive(Debug, Clone)]
pub struct TurnEngine {
    /// Number of quarter turns that have not been applied yet.
    pending: u32,
    /// Time that the first pending turn started animating, or `None` if no
    /// turns are pending.
    start: Option<Instant>,
    /// Time for one quarter turn.
    quarter_turn_duration: Duration,
    /// Interpolation curve within each quarter turn.
    interpolation: InterpolateFn,
}
impl Default for TurnEngine {
    fn default() -> Self {
        Self::new(&Preferences::default())
    }
}
impl TurnEngine {
    /// Constructs an empty turn queue using the animation settings from
    /// `prefs`.
    pub fn new(prefs: &Preferences) -> Self {
        Self {
            pending: 0,
            start: None,
            quarter_turn_duration: prefs.quarter_turn_duration(),
            interpolation: prefs.twist_interpolation,
        }
    }

    /// Returns the number of quarter turns waiting to be applied.
    pub fn pending(&self) -> u32 {
        self.pending
    }
    /// Returns the time for one quarter turn.
    pub fn quarter_turn_duration(&self) -> Duration {
        self.quarter_turn_duration
    }

    /// Adds a quarter turn to the queue. If no turns were pending, the
    /// animation starts at `now`.
    ///
    /// Turns added while others are pending extend the same animation, which
    /// is still timed from the first turn.
    pub fn enqueue(&mut self, now: Instant) {
        if self.pending == 0 {
            self.start = Some(now);
        }
        self.pending = self.pending.saturating_add(1);
    }

    /// Removes all pending turns from the queue and returns how many there
    /// were.
    pub fn take_pending(&mut self) -> u32 {
        self.start = None;
        std::mem::take(&mut self.pending)
    }

    fn elapsed(&self, now: Instant) -> Duration {
        let Some(start) = self.start else {
            return Duration::ZERO;
        };
        now.checked_duration_since(start).unwrap_or_else(|| {
            quartermath::debug_panic!("animation timestamp {now:?} is before start {start:?}");
            Duration::ZERO
        })
    }

    /// Returns the total time that the pending turns take to animate.
    fn total_duration(&self) -> Duration {
        self.quarter_turn_duration.saturating_mul(self.pending)
    }

    /// Returns the angle in radians that the selected layer is displayed
    /// rotated by at time `now`, without committing anything.
    ///
    /// The angle reaches exactly π/2 times the number of pending turns once
    /// the whole animation has elapsed, and never goes past it.
    pub fn angle_at(&self, now: Instant) -> Float {
        if self.pending == 0 {
            return 0.0;
        }
        let total = self.pending as Float;
        let t = if self.quarter_turn_duration.is_zero() {
            total
        } else {
            self.elapsed(now).as_secs_f64() / self.quarter_turn_duration.as_secs_f64()
        };
        let t = t.clamp(0.0, total);
        let whole = t.floor();
        (whole + self.interpolation.interpolate(t - whole)) * FRAC_PI_2
    }

    /// Advances the animation to `now`.
    ///
    /// If all the pending turns have finished animating, they are removed from
    /// the queue and returned in [`Tick::Committed`].
    pub fn tick(&mut self, now: Instant) -> Tick {
        if self.pending == 0 {
            return Tick::Idle;
        }
        if self.elapsed(now) >= self.total_duration() {
            let quarter_turns = self.take_pending();
            Tick::Committed { quarter_turns }
        } else {
            let angle = self.angle_at(now);
            log::trace!("animating {} quarter turn(s) at {angle} rad", self.pending);
            Tick::Animating { angle }
        }
    }
}
