//! The coin catalog.
//!
//! There is exactly one coin per action kind, so `CoinKind` doubles as the
//! coin's identity. On the wire a coin is always referred to by its title.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Number of coins in the catalog.
pub const COIN_COUNT: usize = 13;

/// Flavor grouping of a coin. Not used by any rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aspect {
    Um,
    Os,
    Umos,
}

/// The action a coin performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CoinKind {
    TransformWallBridge,
    ReturnOpponentStone,
    ResetRing,
    LockRing,
    RemoveBridge,
    RemoveWall,
    SpinRing,
    UnlockRing,
    MoveWallBridge,
    CopyOpponentCoin,
    PlaceWall,
    PlaceBridge,
    DisableCoin,
}

impl CoinKind {
    /// All coins in catalog order.
    pub const ALL: [CoinKind; COIN_COUNT] = [
        CoinKind::TransformWallBridge,
        CoinKind::ReturnOpponentStone,
        CoinKind::ResetRing,
        CoinKind::LockRing,
        CoinKind::RemoveBridge,
        CoinKind::RemoveWall,
        CoinKind::SpinRing,
        CoinKind::UnlockRing,
        CoinKind::MoveWallBridge,
        CoinKind::CopyOpponentCoin,
        CoinKind::PlaceWall,
        CoinKind::PlaceBridge,
        CoinKind::DisableCoin,
    ];

    /// Catalog entry for this coin.
    #[must_use]
    pub fn definition(self) -> &'static CoinDefinition {
        &DEFINITIONS[self as usize]
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        self.definition().title
    }

    /// camelCase action name used in effect payloads.
    #[must_use]
    pub fn action_name(self) -> &'static str {
        match self {
            CoinKind::TransformWallBridge => "transformWallBridge",
            CoinKind::ReturnOpponentStone => "returnOpponentStone",
            CoinKind::ResetRing => "resetRing",
            CoinKind::LockRing => "lockRing",
            CoinKind::RemoveBridge => "removeBridge",
            CoinKind::RemoveWall => "removeWall",
            CoinKind::SpinRing => "spinRing",
            CoinKind::UnlockRing => "unlockRing",
            CoinKind::MoveWallBridge => "moveWallBridge",
            CoinKind::CopyOpponentCoin => "copyOpponentCoin",
            CoinKind::PlaceWall => "placeWall",
            CoinKind::PlaceBridge => "placeBridge",
            CoinKind::DisableCoin => "disableCoin",
        }
    }
}

impl fmt::Display for CoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl Serialize for CoinKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.title())
    }
}

impl<'de> Deserialize<'de> for CoinKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let title = String::deserialize(deserializer)?;
        CoinKind::ALL
            .into_iter()
            .find(|kind| kind.title() == title)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown coin title {title:?}")))
    }
}

/// Static description of a coin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CoinDefinition {
    pub title: &'static str,
    pub aspect: Aspect,
    pub description: &'static str,
    pub action: CoinKindName,
}

/// Serializes a coin kind by its action name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoinKindName(pub CoinKind);

impl Serialize for CoinKindName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0.action_name())
    }
}

const fn def(
    kind: CoinKind,
    title: &'static str,
    aspect: Aspect,
    description: &'static str,
) -> CoinDefinition {
    CoinDefinition {
        title,
        aspect,
        description,
        action: CoinKindName(kind),
    }
}

// Order must match `CoinKind` discriminants.
static DEFINITIONS: [CoinDefinition; COIN_COUNT] = [
    def(CoinKind::TransformWallBridge, "Mutatio", Aspect::Umos, "Turn a wall into a bridge, or a bridge into a wall."),
    def(CoinKind::ReturnOpponentStone, "Reditus", Aspect::Os, "Send the opponent's last moved stone back where it came from."),
    def(CoinKind::ResetRing, "Restitutio", Aspect::Um, "Return a rotated ring to its starting angle."),
    def(CoinKind::LockRing, "Claustrum", Aspect::Os, "Lock a ring so it cannot be spun."),
    def(CoinKind::RemoveBridge, "Fractura", Aspect::Os, "Remove a bridge from the board."),
    def(CoinKind::RemoveWall, "Ruina", Aspect::Um, "Remove a wall from the board."),
    def(CoinKind::SpinRing, "Rota", Aspect::Um, "Spin an unlocked ring one cell in either direction."),
    def(CoinKind::UnlockRing, "Clavis", Aspect::Um, "Unlock a locked ring."),
    def(CoinKind::MoveWallBridge, "Translatio", Aspect::Umos, "Move a wall or bridge to the next cell of its ring."),
    def(CoinKind::CopyOpponentCoin, "Speculum", Aspect::Umos, "Use the coin your opponent used last."),
    def(CoinKind::PlaceWall, "Murus", Aspect::Os, "Build a wall on an empty cell."),
    def(CoinKind::PlaceBridge, "Pons", Aspect::Um, "Build a bridge on an empty cell."),
    def(CoinKind::DisableCoin, "Magna", Aspect::Umos, "Block one coin for both players for the next round."),
];

/// Title lookup over the fixed catalog.
#[derive(Clone, Debug)]
pub struct CoinCatalog {
    by_title: FxHashMap<&'static str, CoinKind>,
}

impl Default for CoinCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl CoinCatalog {
    /// The 13-coin catalog both players share.
    #[must_use]
    pub fn standard() -> Self {
        let by_title = CoinKind::ALL.into_iter().map(|kind| (kind.title(), kind)).collect();
        Self { by_title }
    }

    /// Look a coin up by title.
    #[must_use]
    pub fn find(&self, title: &str) -> Option<CoinKind> {
        self.by_title.get(title).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_title.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_title.is_empty()
    }

    /// Definitions in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &'static CoinDefinition> {
        CoinKind::ALL.into_iter().map(CoinKind::definition)
    }
}

/// A small, duplicate-free list of coins (cooldown lists).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoinList(SmallVec<[CoinKind; 4]>);

impl CoinList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, coin: CoinKind) -> bool {
        self.0.contains(&coin)
    }

    /// Add a coin unless already present.
    pub fn insert(&mut self, coin: CoinKind) {
        if !self.contains(coin) {
            self.0.push(coin);
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = CoinKind> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<CoinKind> for CoinList {
    fn from_iter<I: IntoIterator<Item = CoinKind>>(iter: I) -> Self {
        let mut list = CoinList::new();
        for coin in iter {
            list.insert(coin);
        }
        list
    }
}
