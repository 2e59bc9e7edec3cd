//! Stones and the per-player stone ledger.
//!
//! Every player owns exactly three stones for the whole match. A stone is
//! unplaced, on the board, or scored; stones move between these classes but
//! are never created or destroyed. The ledger is a fixed array, so the count
//! invariant holds by construction.

use serde::{Deserialize, Serialize};

use crate::board::{CellKey, GOAL_RING};
use crate::core::PlayerId;

/// Stones per player.
pub const STONES_PER_PLAYER: usize = 3;

/// Wire sentinel for an unplaced stone's ring and cell.
pub const UNPLACED_SENTINEL: i32 = -1;

/// Wire sentinel for a scored stone's ring and cell.
pub const SCORED_SENTINEL: i32 = 99;

/// Index of a stone within its owner's ledger (0..3).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct StoneId(u8);

impl StoneId {
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < STONES_PER_PLAYER {
            Some(Self(index))
        } else {
            None
        }
    }

    pub fn all() -> impl Iterator<Item = StoneId> {
        (0..STONES_PER_PLAYER as u8).map(StoneId)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for StoneId {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        StoneId::new(value).ok_or_else(|| format!("stone index must be 0..3, got {value}"))
    }
}

impl From<StoneId> for u8 {
    fn from(id: StoneId) -> Self {
        id.0
    }
}

/// A specific stone: owner plus ledger index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoneRef {
    pub player: PlayerId,
    pub index: StoneId,
}

impl StoneRef {
    #[must_use]
    pub const fn new(player: PlayerId, index: StoneId) -> Self {
        Self { player, index }
    }
}

/// Where a stone currently is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StonePosition {
    #[default]
    Unplaced,
    OnBoard(CellKey),
    Scored,
}

impl StonePosition {
    /// Wire form `(ring, cell)` with the `-1`/`99` sentinels.
    #[must_use]
    pub fn to_raw(self) -> (i32, i32) {
        match self {
            StonePosition::Unplaced => (UNPLACED_SENTINEL, UNPLACED_SENTINEL),
            StonePosition::OnBoard(key) => (key.ring().index() as i32, key.cell() as i32),
            StonePosition::Scored => (SCORED_SENTINEL, SCORED_SENTINEL),
        }
    }

    /// Parse the wire form, `None` for anything that is not one of the three classes.
    #[must_use]
    pub fn from_raw(ring: i32, cell: i32) -> Option<Self> {
        match (ring, cell) {
            (UNPLACED_SENTINEL, UNPLACED_SENTINEL) => Some(StonePosition::Unplaced),
            (SCORED_SENTINEL, SCORED_SENTINEL) => Some(StonePosition::Scored),
            _ => CellKey::from_raw(ring, cell).map(StonePosition::OnBoard),
        }
    }

    #[must_use]
    pub fn cell(self) -> Option<CellKey> {
        match self {
            StonePosition::OnBoard(key) => Some(key),
            _ => None,
        }
    }
}

/// Target of a stone move: a board cell or the goal beyond ring 4.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Destination {
    Cell(CellKey),
    Goal,
}

impl Destination {
    /// Parse the wire form; ring `5` means the goal.
    #[must_use]
    pub fn from_raw(ring: i32, cell: i32) -> Option<Self> {
        if ring == GOAL_RING {
            Some(Destination::Goal)
        } else {
            CellKey::from_raw(ring, cell).map(Destination::Cell)
        }
    }

    /// Wire form; the goal is `(5, 0)`.
    #[must_use]
    pub fn to_raw(self) -> (i32, i32) {
        match self {
            Destination::Cell(key) => (key.ring().index() as i32, key.cell() as i32),
            Destination::Goal => (GOAL_RING, 0),
        }
    }

    /// The ledger position a stone ends in after this move.
    #[must_use]
    pub fn resulting_position(self) -> StonePosition {
        match self {
            Destination::Cell(key) => StonePosition::OnBoard(key),
            Destination::Goal => StonePosition::Scored,
        }
    }
}

/// A recorded stone move. `from` is `None` when the stone entered from unplaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StoneMove {
    pub stone: StoneId,
    pub from: Option<CellKey>,
    pub to: Destination,
}

/// One player's three stones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StoneLedger {
    positions: [StonePosition; STONES_PER_PLAYER],
}

impl StoneLedger {
    /// All three stones unplaced.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_positions(positions: [StonePosition; STONES_PER_PLAYER]) -> Self {
        Self { positions }
    }

    #[must_use]
    pub fn position(&self, stone: StoneId) -> StonePosition {
        self.positions[stone.index()]
    }

    /// Iterate `(id, position)` in ledger order.
    pub fn iter(&self) -> impl Iterator<Item = (StoneId, StonePosition)> + '_ {
        StoneId::all().map(move |id| (id, self.position(id)))
    }

    /// First unplaced stone in ledger order.
    #[must_use]
    pub fn first_unplaced(&self) -> Option<StoneId> {
        self.iter()
            .find(|(_, pos)| *pos == StonePosition::Unplaced)
            .map(|(id, _)| id)
    }

    /// Stones currently on the board, ledger order.
    pub fn on_board(&self) -> impl Iterator<Item = (StoneId, CellKey)> + '_ {
        self.iter().filter_map(|(id, pos)| pos.cell().map(|key| (id, key)))
    }

    #[must_use]
    pub fn scored_count(&self) -> usize {
        self.positions.iter().filter(|p| **p == StonePosition::Scored).count()
    }

    pub(crate) fn set_position(&mut self, stone: StoneId, position: StonePosition) {
        self.positions[stone.index()] = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::RingId;

    fn key(ring: u8, cell: usize) -> CellKey {
        CellKey::new(RingId::new(ring).unwrap(), cell).unwrap()
    }

    #[test]
    fn test_new_ledger_all_unplaced() {
        let ledger = StoneLedger::new();
        assert_eq!(ledger.iter().count(), STONES_PER_PLAYER);
        assert!(ledger.iter().all(|(_, p)| p == StonePosition::Unplaced));
        assert_eq!(ledger.first_unplaced(), StoneId::new(0));
    }

    #[test]
    fn test_position_raw_forms() {
        assert_eq!(StonePosition::Unplaced.to_raw(), (-1, -1));
        assert_eq!(StonePosition::Scored.to_raw(), (99, 99));
        assert_eq!(StonePosition::OnBoard(key(2, 9)).to_raw(), (2, 9));

        assert_eq!(StonePosition::from_raw(-1, -1), Some(StonePosition::Unplaced));
        assert_eq!(StonePosition::from_raw(99, 99), Some(StonePosition::Scored));
        assert_eq!(StonePosition::from_raw(4, 3), Some(StonePosition::OnBoard(key(4, 3))));
        assert_eq!(StonePosition::from_raw(-1, 3), None);
        assert_eq!(StonePosition::from_raw(4, 4), None);
    }

    #[test]
    fn test_destination_goal() {
        assert_eq!(Destination::from_raw(5, 0), Some(Destination::Goal));
        assert_eq!(Destination::from_raw(5, 17), Some(Destination::Goal));
        assert_eq!(Destination::Goal.resulting_position(), StonePosition::Scored);
        assert_eq!(Destination::from_raw(6, 0), None);
    }

    #[test]
    fn test_ledger_queries() {
        let mut ledger = StoneLedger::new();
        let s0 = StoneId::new(0).unwrap();
        let s1 = StoneId::new(1).unwrap();

        ledger.set_position(s0, StonePosition::OnBoard(key(0, 5)));
        ledger.set_position(s1, StonePosition::Scored);

        assert_eq!(ledger.first_unplaced(), StoneId::new(2));
        assert_eq!(ledger.on_board().collect::<Vec<_>>(), vec![(s0, key(0, 5))]);
        assert_eq!(ledger.scored_count(), 1);
    }

    #[test]
    fn test_stone_id_bounds() {
        assert!(StoneId::new(2).is_some());
        assert!(StoneId::new(3).is_none());
    }
}
