//! The game aggregate.
//!
//! `GameState` owns the board, rings, stone ledgers, coin cooldowns, and turn
//! progress for one match. Fields are private to the game module; the only
//! way to change a game is through the command methods, each of which
//! validates fully before it mutates anything.

use im::Vector;
use tracing::{debug, warn};

use super::error::{CommandError, CommandResult};
use super::record::{Command, CommandRecord};
use crate::board::{Board, Rings};
use crate::coins::{CoinCatalog, CoinKind, CoinList};
use crate::core::{GameConfig, PlayerId, PlayerMap};
use crate::stones::{StoneLedger, StoneMove, STONES_PER_PLAYER};

/// Score at which a player wins.
pub const WINNING_SCORE: u8 = STONES_PER_PLAYER as u8;

/// A coin chosen this turn but not yet completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoinSelection {
    pub coin: CoinKind,
    pub effect_applied: bool,
}

/// Complete state of one Vorago match.
#[derive(Clone, Debug)]
pub struct GameState {
    pub(super) round: u32,
    pub(super) turn: PlayerId,
    pub(super) score: PlayerMap<u8>,
    pub(super) winner: Option<PlayerId>,

    pub(super) board: Board,
    pub(super) rings: Rings,
    pub(super) stones: PlayerMap<StoneLedger>,

    pub(super) catalog: CoinCatalog,
    pub(super) disabled: PlayerMap<CoinList>,
    pub(super) used_this_round: PlayerMap<CoinList>,
    pub(super) magna_disabled: Option<CoinKind>,

    pub(super) last_move: PlayerMap<Option<StoneMove>>,
    pub(super) last_coin: PlayerMap<Option<CoinKind>>,

    pub(super) has_moved_stone: bool,
    pub(super) has_used_coin: bool,
    pub(super) selection: Option<CoinSelection>,

    pub(super) status: String,
    pub(super) history: Vector<CommandRecord>,
}

impl GameState {
    /// Start a new match: round 1, player 1 to move, empty board.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        debug!(seed = config.seed, ai = config.ai.enabled, "starting new game");
        Self {
            round: 1,
            turn: PlayerId::One,
            score: PlayerMap::with_value(0),
            winner: None,
            board: Board::new(),
            rings: Rings::new(),
            stones: PlayerMap::with_value(StoneLedger::new()),
            catalog: CoinCatalog::standard(),
            disabled: PlayerMap::default(),
            used_this_round: PlayerMap::default(),
            magna_disabled: None,
            last_move: PlayerMap::with_value(None),
            last_coin: PlayerMap::with_value(None),
            has_moved_stone: false,
            has_used_coin: false,
            selection: None,
            status: format!("{} to move", PlayerId::One),
            history: Vector::new(),
        }
    }

    // === Progression ===

    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Player whose turn it is.
    #[must_use]
    pub fn turn(&self) -> PlayerId {
        self.turn
    }

    #[must_use]
    pub fn score(&self, player: PlayerId) -> u8 {
        self.score[player]
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.winner.is_some()
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    #[must_use]
    pub fn has_moved_stone(&self) -> bool {
        self.has_moved_stone
    }

    #[must_use]
    pub fn has_used_coin(&self) -> bool {
        self.has_used_coin
    }

    #[must_use]
    pub fn selection(&self) -> Option<CoinSelection> {
        self.selection
    }

    // === Board ===

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn rings(&self) -> &Rings {
        &self.rings
    }

    #[must_use]
    pub fn stones(&self, player: PlayerId) -> &StoneLedger {
        &self.stones[player]
    }

    // === Coins ===

    #[must_use]
    pub fn catalog(&self) -> &CoinCatalog {
        &self.catalog
    }

    /// Coins on `player`'s cooldown this round.
    #[must_use]
    pub fn disabled(&self, player: PlayerId) -> &CoinList {
        &self.disabled[player]
    }

    /// Coins `player` used this round (cooldown next round).
    #[must_use]
    pub fn used_this_round(&self, player: PlayerId) -> &CoinList {
        &self.used_this_round[player]
    }

    /// Coin Magna-disabled for both players starting next round.
    #[must_use]
    pub fn magna_disabled(&self) -> Option<CoinKind> {
        self.magna_disabled
    }

    #[must_use]
    pub fn last_move(&self, player: PlayerId) -> Option<StoneMove> {
        self.last_move[player]
    }

    #[must_use]
    pub fn last_coin(&self, player: PlayerId) -> Option<CoinKind> {
        self.last_coin[player]
    }

    // === Status and history ===

    /// Short human-readable line describing the last command.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn history(&self) -> impl Iterator<Item = &CommandRecord> {
        self.history.iter()
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    // === Internal helpers ===

    pub(super) fn ensure_not_won(&self) -> Result<(), CommandError> {
        match self.winner {
            Some(winner) => Err(CommandError::GameOver { winner }),
            None => Ok(()),
        }
    }

    /// Record the outcome of a command: status line, log, and history.
    pub(super) fn finish(&mut self, player: PlayerId, command: Command, result: CommandResult) -> CommandResult {
        match &result {
            Ok(outcome) => {
                debug!(%player, round = self.round, ?command, %outcome, "command accepted");
                self.status = outcome.to_string();
                let sequence = self.history.len() as u32;
                self.history
                    .push_back(CommandRecord::new(player, command, self.round, sequence));
            }
            Err(error) => self.reject(player, Some(&command), error),
        }
        result
    }

    /// Log a rejection and show it on the status line.
    pub(super) fn reject(&mut self, player: PlayerId, command: Option<&Command>, error: &CommandError) {
        warn!(%player, round = self.round, ?command, %error, "command rejected");
        self.status = error.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::RingId;

    #[test]
    fn test_new_game() {
        let state = GameState::new(&GameConfig::default());

        assert_eq!(state.round(), 1);
        assert_eq!(state.turn(), PlayerId::One);
        assert_eq!(state.score(PlayerId::One), 0);
        assert_eq!(state.score(PlayerId::Two), 0);
        assert!(!state.is_won());
        assert!(!state.has_moved_stone());
        assert!(!state.has_used_coin());
        assert_eq!(state.catalog().len(), 13);
        assert!(state.disabled(PlayerId::One).is_empty());
        assert!(state.magna_disabled().is_none());
        assert_eq!(state.history_len(), 0);

        for ring in RingId::all() {
            assert_eq!(state.rings().degrees(ring), 0.0);
            assert!(!state.rings().is_locked(ring));
        }
        assert!(state.board().iter().all(|(_, cell)| cell.is_bare()));
    }

    #[test]
    fn test_clone_is_independent_snapshot() {
        let state = GameState::new(&GameConfig::default());
        let mut copy = state.clone();
        copy.round = 7;
        assert_eq!(state.round(), 1);
    }
}
