//! Ring rotation and lock state.
//!
//! Rotation is stored as whole steps (one step = `360 / ring size` degrees),
//! so every angle is on a cell boundary and already wrapped into `[0, 360)`.

use serde::{Deserialize, Serialize};

use super::{RingId, RING_COUNT};

/// Direction of a one-step ring spin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpinDirection {
    #[serde(rename = "cw")]
    Clockwise,
    #[serde(rename = "ccw")]
    CounterClockwise,
}

/// Rotation and lock flags for all five rings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Rings {
    steps: [usize; RING_COUNT],
    locked: [bool; RING_COUNT],
}

impl Rings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Degrees per step on `ring`.
    #[must_use]
    pub fn step_degrees(ring: RingId) -> f64 {
        360.0 / ring.size() as f64
    }

    /// Current angle of `ring` in `[0, 360)`.
    #[must_use]
    pub fn degrees(&self, ring: RingId) -> f64 {
        self.steps[ring.index()] as f64 * Self::step_degrees(ring)
    }

    /// Angles of all rings.
    #[must_use]
    pub fn all_degrees(&self) -> [f64; RING_COUNT] {
        let mut out = [0.0; RING_COUNT];
        for ring in RingId::all() {
            out[ring.index()] = self.degrees(ring);
        }
        out
    }

    #[must_use]
    pub fn is_rotated(&self, ring: RingId) -> bool {
        self.steps[ring.index()] != 0
    }

    #[must_use]
    pub fn is_locked(&self, ring: RingId) -> bool {
        self.locked[ring.index()]
    }

    #[must_use]
    pub fn locked_flags(&self) -> [bool; RING_COUNT] {
        self.locked
    }

    #[must_use]
    pub fn all_locked(&self) -> bool {
        self.locked.iter().all(|&l| l)
    }

    #[must_use]
    pub fn any_locked(&self) -> bool {
        self.locked.iter().any(|&l| l)
    }

    pub fn unlocked(&self) -> impl Iterator<Item = RingId> + '_ {
        RingId::all().filter(move |&r| !self.is_locked(r))
    }

    pub fn locked(&self) -> impl Iterator<Item = RingId> + '_ {
        RingId::all().filter(move |&r| self.is_locked(r))
    }

    /// Unlocked rings whose angle is not zero.
    pub fn rotated_unlocked(&self) -> impl Iterator<Item = RingId> + '_ {
        self.unlocked().filter(move |&r| self.is_rotated(r))
    }

    // === Mutators ===
    //
    // No lock checks here; the aggregate rejects spins of locked rings.

    pub(crate) fn spin(&mut self, ring: RingId, direction: SpinDirection) {
        let size = ring.size();
        let current = self.steps[ring.index()];
        self.steps[ring.index()] = match direction {
            SpinDirection::Clockwise => (current + 1) % size,
            SpinDirection::CounterClockwise => (current + size - 1) % size,
        };
    }

    pub(crate) fn reset(&mut self, ring: RingId) {
        self.steps[ring.index()] = 0;
    }

    pub(crate) fn lock(&mut self, ring: RingId) {
        self.locked[ring.index()] = true;
    }

    pub(crate) fn unlock(&mut self, ring: RingId) {
        self.locked[ring.index()] = false;
    }

    /// Rebuild from raw angles, `None` if an angle is not on a step boundary.
    pub(crate) fn from_parts(degrees: [f64; RING_COUNT], locked: [bool; RING_COUNT]) -> Option<Self> {
        let mut steps = [0; RING_COUNT];
        for ring in RingId::all() {
            let raw = degrees[ring.index()].rem_euclid(360.0) / Self::step_degrees(ring);
            let rounded = raw.round();
            if (raw - rounded).abs() > 1e-6 {
                return None;
            }
            steps[ring.index()] = rounded as usize % ring.size();
        }
        Some(Self { steps, locked })
    }
}
