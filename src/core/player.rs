//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Vorago is strictly two-player. `PlayerId` is `One` or `Two` and
//! serializes as the number `1` or `2`.
//!
//! ## PlayerMap
//!
//! Fixed two-slot storage indexed by `PlayerId`, serialized as
//! `{"player1": .., "player2": ..}`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two seats at the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    /// Both players, in turn order.
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    /// Get the player number (1 or 2).
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            PlayerId::One => 1,
            PlayerId::Two => 2,
        }
    }

    /// Get the 0-based index.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PlayerId::One),
            2 => Ok(PlayerId::Two),
            other => Err(format!("player must be 1 or 2, got {other}")),
        }
    }
}

impl From<PlayerId> for u8 {
    fn from(player: PlayerId) -> Self {
        player.number()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use vorago::core::{PlayerId, PlayerMap};
///
/// let mut score: PlayerMap<u8> = PlayerMap::with_value(0);
/// score[PlayerId::Two] += 1;
///
/// assert_eq!(score[PlayerId::One], 0);
/// assert_eq!(score[PlayerId::Two], 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    player1: T,
    player2: T,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            player1: factory(PlayerId::One),
            player2: factory(PlayerId::Two),
        }
    }

    /// Create a new PlayerMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        match player {
            PlayerId::One => &self.player1,
            PlayerId::Two => &self.player2,
        }
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        match player {
            PlayerId::One => &mut self.player1,
            PlayerId::Two => &mut self.player2,
        }
    }

    /// Iterate over (PlayerId, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        [(PlayerId::One, &self.player1), (PlayerId::Two, &self.player2)].into_iter()
    }

    /// Apply `f` to both entries.
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> PlayerMap<U> {
        PlayerMap {
            player1: f(&self.player1),
            player2: f(&self.player2),
        }
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        assert_eq!(PlayerId::One.number(), 1);
        assert_eq!(PlayerId::Two.index(), 1);
        assert_eq!(PlayerId::One.opponent(), PlayerId::Two);
        assert_eq!(PlayerId::Two.opponent(), PlayerId::One);
        assert_eq!(format!("{}", PlayerId::Two), "Player 2");
    }

    #[test]
    fn test_player_id_serializes_as_number() {
        assert_eq!(serde_json::to_string(&PlayerId::Two).unwrap(), "2");
        let parsed: PlayerId = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, PlayerId::One);
        assert!(serde_json::from_str::<PlayerId>("3").is_err());
    }

    #[test]
    fn test_player_map_mutation() {
        let mut map: PlayerMap<i32> = PlayerMap::new(|p| p.number() as i32 * 10);
        assert_eq!(map[PlayerId::One], 10);
        assert_eq!(map[PlayerId::Two], 20);

        map[PlayerId::One] = 5;
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(PlayerId::One, &5), (PlayerId::Two, &20)]);
    }

    #[test]
    fn test_player_map_serialization() {
        let map: PlayerMap<u8> = PlayerMap::new(|p| p.number());
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json, serde_json::json!({"player1": 1, "player2": 2}));

        let back: PlayerMap<u8> = serde_json::from_value(json).unwrap();
        assert_eq!(back, map);
    }
}
