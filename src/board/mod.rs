//! The ring board: five concentric bands of cells.
//!
//! Ring 0 is the outermost band (32 cells), ring 4 the innermost (4 cells).
//! Cell counts are fixed. Each cell may carry a wall or a bridge (never both)
//! and at most one stone.
//!
//! The board does no rule checking. Only the game aggregate writes to it, so
//! the stone stored in a cell always agrees with the owner's stone ledger.

mod rings;

pub use rings::{Rings, SpinDirection};

use im::Vector;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::stones::StoneRef;

/// Number of rings on the board.
pub const RING_COUNT: usize = 5;

/// Cells per ring, outermost first.
pub const RING_SIZES: [usize; RING_COUNT] = [32, 16, 16, 8, 4];

/// Pseudo-ring number used on the wire for "move into the goal".
pub const GOAL_RING: i32 = 5;

const RING_OFFSETS: [usize; RING_COUNT] = [0, 32, 48, 64, 72];
const TOTAL_CELLS: usize = 76;

/// Ring identifier, `0` (outermost) to `4` (innermost).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RingId(u8);

impl RingId {
    /// The outermost ring, where stones enter the board.
    pub const OUTER: RingId = RingId(0);

    /// The innermost ring, one step from the goal.
    pub const INNER: RingId = RingId(4);

    /// Create a ring ID, `None` if out of range.
    #[must_use]
    pub const fn new(ring: u8) -> Option<Self> {
        if (ring as usize) < RING_COUNT {
            Some(Self(ring))
        } else {
            None
        }
    }

    /// All rings, outermost first.
    pub fn all() -> impl Iterator<Item = RingId> {
        (0..RING_COUNT as u8).map(RingId)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Number of cells on this ring.
    #[must_use]
    pub const fn size(self) -> usize {
        RING_SIZES[self.0 as usize]
    }

    /// The next ring toward the centre, `None` for the innermost.
    #[must_use]
    pub const fn inward(self) -> Option<RingId> {
        Self::new(self.0 + 1)
    }

    #[must_use]
    pub const fn is_innermost(self) -> bool {
        self.0 == Self::INNER.0
    }
}

impl TryFrom<u8> for RingId {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        RingId::new(value).ok_or_else(|| format!("ring must be 0..{RING_COUNT}, got {value}"))
    }
}

impl From<RingId> for u8 {
    fn from(ring: RingId) -> Self {
        ring.0
    }
}

impl fmt::Display for RingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Address of a cell: `(ring, index)`, written `"ring-index"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    ring: RingId,
    cell: u8,
}

impl CellKey {
    /// Create a key, `None` if the index is outside the ring.
    #[must_use]
    pub fn new(ring: RingId, cell: usize) -> Option<Self> {
        (cell < ring.size()).then(|| Self { ring, cell: cell as u8 })
    }

    /// Create a key from raw numbers.
    #[must_use]
    pub fn from_raw(ring: i32, cell: i32) -> Option<Self> {
        let ring = RingId::new(u8::try_from(ring).ok()?)?;
        Self::new(ring, usize::try_from(cell).ok()?)
    }

    #[must_use]
    pub const fn ring(self) -> RingId {
        self.ring
    }

    #[must_use]
    pub const fn cell(self) -> usize {
        self.cell as usize
    }

    /// The neighbouring cell on the same ring, wrapping around.
    #[must_use]
    pub fn next_on_ring(self) -> Self {
        Self {
            ring: self.ring,
            cell: ((self.cell() + 1) % self.ring.size()) as u8,
        }
    }

    fn offset(self) -> usize {
        RING_OFFSETS[self.ring.index()] + self.cell()
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.ring, self.cell)
    }
}

impl FromStr for CellKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (ring, cell) = s
            .split_once('-')
            .ok_or_else(|| format!("cell key {s:?} is not of the form ring-cell"))?;
        let ring: i32 = ring.parse().map_err(|_| format!("bad ring in cell key {s:?}"))?;
        let cell: i32 = cell.parse().map_err(|_| format!("bad cell in cell key {s:?}"))?;
        CellKey::from_raw(ring, cell).ok_or_else(|| format!("cell key {s:?} is off the board"))
    }
}

impl Serialize for CellKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CellKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A single board cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub has_wall: bool,
    pub has_bridge: bool,
    pub stone: Option<StoneRef>,
}

impl Cell {
    /// Whether the cell carries a wall or a bridge.
    #[must_use]
    pub fn has_barrier(&self) -> bool {
        self.has_wall || self.has_bridge
    }

    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.stone.is_some()
    }

    /// No stone, no wall, no bridge.
    #[must_use]
    pub fn is_bare(&self) -> bool {
        !self.is_occupied() && !self.has_barrier()
    }
}

/// The fixed cell map.
///
/// Backed by a persistent vector so cloning the board for a snapshot is O(1).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: Vector<Cell>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: (0..TOTAL_CELLS).map(|_| Cell::default()).collect(),
        }
    }

    /// Create from a cell list in canonical key order.
    pub(crate) fn from_cells(cells: Vector<Cell>) -> Self {
        debug_assert_eq!(cells.len(), TOTAL_CELLS);
        Self { cells }
    }

    /// Every cell key, ring by ring, index ascending.
    pub fn keys() -> impl Iterator<Item = CellKey> {
        RingId::all().flat_map(Self::ring_keys)
    }

    /// Cell keys of one ring, index ascending.
    pub fn ring_keys(ring: RingId) -> impl Iterator<Item = CellKey> {
        (0..ring.size()).map(move |cell| CellKey { ring, cell: cell as u8 })
    }

    #[must_use]
    pub fn cell(&self, key: CellKey) -> &Cell {
        &self.cells[key.offset()]
    }

    /// Iterate `(key, cell)` in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (CellKey, &Cell)> {
        Self::keys().zip(self.cells.iter())
    }

    /// Keys of cells matching `predicate`, canonical order.
    pub fn keys_where(&self, predicate: impl Fn(&Cell) -> bool) -> Vec<CellKey> {
        self.iter()
            .filter(|(_, cell)| predicate(cell))
            .map(|(key, _)| key)
            .collect()
    }

    #[must_use]
    pub fn any_wall(&self) -> bool {
        self.cells.iter().any(|c| c.has_wall)
    }

    #[must_use]
    pub fn any_bridge(&self) -> bool {
        self.cells.iter().any(|c| c.has_bridge)
    }

    #[must_use]
    pub fn any_barrier(&self) -> bool {
        self.cells.iter().any(Cell::has_barrier)
    }

    // === Writers (aggregate only) ===

    pub(crate) fn set_wall(&mut self, key: CellKey, value: bool) {
        self.cells[key.offset()].has_wall = value;
    }

    pub(crate) fn set_bridge(&mut self, key: CellKey, value: bool) {
        self.cells[key.offset()].has_bridge = value;
    }

    pub(crate) fn set_stone(&mut self, key: CellKey, stone: Option<StoneRef>) {
        self.cells[key.offset()].stone = stone;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use crate::stones::StoneId;

    fn key(ring: u8, cell: usize) -> CellKey {
        CellKey::new(RingId::new(ring).unwrap(), cell).unwrap()
    }

    #[test]
    fn test_ring_sizes() {
        let sizes: Vec<_> = RingId::all().map(RingId::size).collect();
        assert_eq!(sizes, RING_SIZES.to_vec());
        assert_eq!(Board::keys().count(), TOTAL_CELLS);
        assert!(RingId::new(5).is_none());
    }

    #[test]
    fn test_ring_inward() {
        assert_eq!(RingId::OUTER.inward(), RingId::new(1));
        assert_eq!(RingId::INNER.inward(), None);
        assert!(RingId::INNER.is_innermost());
    }

    #[test]
    fn test_cell_key_bounds() {
        assert!(CellKey::new(RingId::OUTER, 31).is_some());
        assert!(CellKey::new(RingId::OUTER, 32).is_none());
        assert!(CellKey::new(RingId::INNER, 4).is_none());
        assert!(CellKey::from_raw(-1, -1).is_none());
        assert!(CellKey::from_raw(99, 99).is_none());
    }

    #[test]
    fn test_cell_key_string_form() {
        let k = key(3, 7);
        assert_eq!(k.to_string(), "3-7");
        assert_eq!("3-7".parse::<CellKey>().unwrap(), k);
        assert!("3-8".parse::<CellKey>().is_err());
        assert!("nope".parse::<CellKey>().is_err());

        let json = serde_json::to_string(&k).unwrap();
        assert_eq!(json, "\"3-7\"");
    }

    #[test]
    fn test_next_on_ring_wraps() {
        assert_eq!(key(4, 3).next_on_ring(), key(4, 0));
        assert_eq!(key(0, 5).next_on_ring(), key(0, 6));
    }

    #[test]
    fn test_board_writes_are_local() {
        let mut board = Board::new();
        let stone = StoneRef::new(PlayerId::One, StoneId::new(0).unwrap());

        board.set_wall(key(1, 2), true);
        board.set_stone(key(0, 5), Some(stone));

        assert!(board.cell(key(1, 2)).has_wall);
        assert!(!board.cell(key(1, 3)).has_wall);
        assert_eq!(board.cell(key(0, 5)).stone, Some(stone));
        assert!(board.any_wall());
        assert!(!board.any_bridge());
        assert_eq!(board.keys_where(|c| c.has_wall), vec![key(1, 2)]);
    }

    #[test]
    fn test_board_clone_is_independent() {
        let mut board = Board::new();
        let snapshot = board.clone();
        board.set_bridge(key(2, 0), true);

        assert!(board.cell(key(2, 0)).has_bridge);
        assert!(!snapshot.cell(key(2, 0)).has_bridge);
    }
}
