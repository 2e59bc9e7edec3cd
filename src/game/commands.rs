//! Stone and coin commands, and the command interface.
//!
//! Both the human path and the AI orchestrator drive a match through
//! [`GameCommands`], so every rule is enforced in one place.

use std::fmt;

use tracing::info;

use super::error::{CommandError, CommandResult};
use super::record::Command;
use super::state::{CoinSelection, GameState, WINNING_SCORE};
use crate::board::CellKey;
use crate::coins::{self, CoinEffect, CoinKind};
use crate::core::PlayerId;
use crate::stones::{Destination, StoneId, StoneMove, StonePosition, StoneRef};

/// What an accepted command did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    StoneMoved { player: PlayerId, from: Option<CellKey>, to: CellKey },
    StoneScored { player: PlayerId, score: u8 },
    GameWon { winner: PlayerId },
    CoinSelected(CoinKind),
    /// `changed` is false when the effect found nothing to act on.
    EffectApplied { coin: CoinKind, changed: bool },
    CoinCompleted(CoinKind),
    CoinCancelled(CoinKind),
    TurnEnded { next: PlayerId, round: u32, forced: bool },
}

impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandOutcome::StoneMoved { player, from: None, to } => {
                write!(f, "{player} placed a stone on {to}")
            }
            CommandOutcome::StoneMoved { player, from: Some(from), to } => {
                write!(f, "{player} moved a stone from {from} to {to}")
            }
            CommandOutcome::StoneScored { player, score } => {
                write!(f, "{player} scored ({score}/{WINNING_SCORE})")
            }
            CommandOutcome::GameWon { winner } => write!(f, "{winner} wins!"),
            CommandOutcome::CoinSelected(coin) => write!(f, "{coin} selected"),
            CommandOutcome::EffectApplied { coin, changed: true } => write!(f, "{coin} resolved"),
            CommandOutcome::EffectApplied { coin, changed: false } => {
                write!(f, "{coin} had nothing to act on")
            }
            CommandOutcome::CoinCompleted(coin) => write!(f, "{coin} used"),
            CommandOutcome::CoinCancelled(coin) => write!(f, "{coin} cancelled"),
            CommandOutcome::TurnEnded { next, round, .. } => write!(f, "Round {round}: {next} to move"),
        }
    }
}

/// The command set a caller (human UI or AI orchestrator) drives a match with.
pub trait GameCommands {
    /// Read-only view of the current state.
    fn state(&self) -> &GameState;

    /// Move one of the active player's stones.
    fn move_stone(&mut self, stone: StoneId, to: Destination) -> CommandResult;

    /// Select a coin by title. Parameters are supplied by `apply_coin_effect`.
    fn use_coin(&mut self, title: &str) -> CommandResult;

    /// Apply the selected coin's effect.
    fn apply_coin_effect(&mut self, effect: CoinEffect) -> CommandResult;

    /// Spend the selected coin. Without an applied effect this is only
    /// allowed when the coin has no valid target.
    fn complete_coin_action(&mut self) -> CommandResult;

    /// Drop the selection. Only allowed before the effect is applied.
    fn cancel_coin(&mut self) -> CommandResult;

    /// End the turn once a stone was moved and a coin used.
    fn end_turn(&mut self) -> CommandResult;

    /// End the turn regardless of progress. Deadlock escape for the AI.
    fn force_end_turn(&mut self) -> CommandResult;

    /// Replace the status line.
    fn set_status(&mut self, message: String);
}

impl GameCommands for GameState {
    fn state(&self) -> &GameState {
        self
    }

    fn move_stone(&mut self, stone: StoneId, to: Destination) -> CommandResult {
        let player = self.turn;
        let result = self.try_move_stone(stone, to);
        self.finish(player, Command::MoveStone { stone, to }, result)
    }

    fn use_coin(&mut self, title: &str) -> CommandResult {
        match self.catalog.find(title) {
            Some(coin) => self.select_coin(coin),
            None => {
                let error = CommandError::UnknownCoin(title.to_string());
                self.reject(self.turn, None, &error);
                Err(error)
            }
        }
    }

    fn apply_coin_effect(&mut self, effect: CoinEffect) -> CommandResult {
        let player = self.turn;
        let result = self.try_apply_coin_effect(&effect);
        self.finish(player, Command::ApplyCoinEffect(effect), result)
    }

    fn complete_coin_action(&mut self) -> CommandResult {
        let player = self.turn;
        let result = self.try_complete_coin_action();
        self.finish(player, Command::CompleteCoinAction, result)
    }

    fn cancel_coin(&mut self) -> CommandResult {
        let player = self.turn;
        let result = self.try_cancel_coin();
        self.finish(player, Command::CancelCoin, result)
    }

    fn end_turn(&mut self) -> CommandResult {
        let player = self.turn;
        let result = self.try_end_turn(false);
        self.finish(player, Command::EndTurn, result)
    }

    fn force_end_turn(&mut self) -> CommandResult {
        let player = self.turn;
        let result = self.try_end_turn(true);
        self.finish(player, Command::ForceEndTurn, result)
    }

    fn set_status(&mut self, message: String) {
        self.status = message;
    }
}

impl GameState {
    /// Select a coin by kind.
    pub fn select_coin(&mut self, coin: CoinKind) -> CommandResult {
        let player = self.turn;
        let result = self.try_select_coin(coin);
        self.finish(player, Command::UseCoin(coin), result)
    }

    /// Coins the active player may choose right now.
    #[must_use]
    pub fn available_coins(&self) -> Vec<CoinKind> {
        coins::available_coins(self, self.turn)
    }

    fn try_move_stone(&mut self, stone: StoneId, to: Destination) -> CommandResult {
        self.ensure_not_won()?;
        if self.has_moved_stone {
            return Err(CommandError::StoneAlreadyMoved);
        }

        let player = self.turn;
        let position = self.stones[player].position(stone);
        let from = match position {
            StonePosition::Scored => return Err(CommandError::StoneAlreadyScored),
            StonePosition::Unplaced => None,
            StonePosition::OnBoard(key) => Some(key),
        };

        match to {
            Destination::Cell(key) => {
                if self.board.cell(key).is_occupied() {
                    return Err(CommandError::CellOccupied(key));
                }
            }
            Destination::Goal => {
                if !from.is_some_and(|key| key.ring().is_innermost()) {
                    return Err(CommandError::GoalUnreachable);
                }
            }
        }

        // Validated; mutate.
        self.last_move[player] = Some(StoneMove { stone, from, to });
        if let Some(key) = from {
            self.board.set_stone(key, None);
        }
        self.stones[player].set_position(stone, to.resulting_position());
        self.has_moved_stone = true;

        match to {
            Destination::Cell(key) => {
                self.board.set_stone(key, Some(StoneRef::new(player, stone)));
                Ok(CommandOutcome::StoneMoved { player, from, to: key })
            }
            Destination::Goal => {
                self.score[player] += 1;
                let score = self.score[player];
                if score >= WINNING_SCORE {
                    self.winner = Some(player);
                    info!(%player, round = self.round, "game won");
                    Ok(CommandOutcome::GameWon { winner: player })
                } else {
                    info!(%player, score, "stone scored");
                    Ok(CommandOutcome::StoneScored { player, score })
                }
            }
        }
    }

    fn try_select_coin(&mut self, coin: CoinKind) -> CommandResult {
        self.ensure_not_won()?;
        if self.has_used_coin {
            return Err(CommandError::CoinAlreadyUsed);
        }
        if let Some(CoinSelection { coin: pending, effect_applied: true }) = self.selection {
            return Err(CommandError::EffectPending(pending));
        }
        if self.disabled[self.turn].contains(coin) {
            return Err(CommandError::CoinDisabled(coin));
        }
        if !coins::is_contextually_eligible(self, coin, self.turn) {
            return Err(CommandError::CoinIneligible(coin));
        }

        self.selection = Some(CoinSelection { coin, effect_applied: false });
        Ok(CommandOutcome::CoinSelected(coin))
    }

    fn try_apply_coin_effect(&mut self, effect: &CoinEffect) -> CommandResult {
        self.ensure_not_won()?;
        let selection = self.selection.ok_or(CommandError::NoCoinSelected)?;
        if selection.effect_applied {
            return Err(CommandError::EffectAlreadyApplied(selection.coin));
        }
        if effect.kind() != selection.coin {
            return Err(CommandError::EffectMismatch {
                selected: selection.coin,
                effect: effect.kind(),
            });
        }

        self.validate_effect(effect, self.turn)?;
        let changed = self.execute_effect(effect, self.turn);
        self.selection = Some(CoinSelection { effect_applied: true, ..selection });

        Ok(CommandOutcome::EffectApplied { coin: selection.coin, changed })
    }

    fn try_complete_coin_action(&mut self) -> CommandResult {
        self.ensure_not_won()?;
        let selection = self.selection.ok_or(CommandError::NoCoinSelected)?;
        let player = self.turn;
        if !selection.effect_applied && coins::has_candidate(self, selection.coin, player) {
            return Err(CommandError::EffectRequired(selection.coin));
        }

        self.used_this_round[player].insert(selection.coin);
        self.last_coin[player] = Some(selection.coin);
        self.has_used_coin = true;
        self.selection = None;

        Ok(CommandOutcome::CoinCompleted(selection.coin))
    }

    fn try_cancel_coin(&mut self) -> CommandResult {
        self.ensure_not_won()?;
        match self.selection {
            None => Err(CommandError::NoCoinSelected),
            Some(CoinSelection { coin, effect_applied: true }) => Err(CommandError::EffectPending(coin)),
            Some(CoinSelection { coin, .. }) => {
                self.selection = None;
                Ok(CommandOutcome::CoinCancelled(coin))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::RingId;
    use crate::core::GameConfig;

    fn key(ring: u8, cell: usize) -> CellKey {
        CellKey::new(RingId::new(ring).unwrap(), cell).unwrap()
    }

    fn stone(i: u8) -> StoneId {
        StoneId::new(i).unwrap()
    }

    fn new_game() -> GameState {
        GameState::new(&GameConfig::default())
    }

    #[test]
    fn test_place_stone() {
        let mut game = new_game();
        let outcome = game.move_stone(stone(0), Destination::Cell(key(0, 5))).unwrap();

        assert_eq!(
            outcome,
            CommandOutcome::StoneMoved { player: PlayerId::One, from: None, to: key(0, 5) }
        );
        assert_eq!(game.board().cell(key(0, 5)).stone, Some(StoneRef::new(PlayerId::One, stone(0))));
        assert_eq!(game.stones(PlayerId::One).position(stone(0)), StonePosition::OnBoard(key(0, 5)));
        assert!(game.has_moved_stone());
        assert_eq!(
            game.last_move(PlayerId::One),
            Some(StoneMove { stone: stone(0), from: None, to: Destination::Cell(key(0, 5)) })
        );
        assert_eq!(game.history_len(), 1);
    }

    #[test]
    fn test_second_stone_move_rejected() {
        let mut game = new_game();
        game.move_stone(stone(0), Destination::Cell(key(0, 5))).unwrap();

        let err = game.move_stone(stone(1), Destination::Cell(key(0, 6))).unwrap_err();
        assert_eq!(err, CommandError::StoneAlreadyMoved);
        assert!(!game.board().cell(key(0, 6)).is_occupied());
        assert_eq!(game.status(), err.to_string());
        assert_eq!(game.history_len(), 1);
    }

    #[test]
    fn test_goal_requires_innermost_ring() {
        let mut game = new_game();
        let err = game.move_stone(stone(0), Destination::Goal).unwrap_err();
        assert_eq!(err, CommandError::GoalUnreachable);
        assert!(!game.has_moved_stone());
    }

    #[test]
    fn test_unknown_coin_title() {
        let mut game = new_game();
        let err = game.use_coin("Nope").unwrap_err();
        assert_eq!(err, CommandError::UnknownCoin("Nope".to_string()));
        assert!(game.selection().is_none());
    }

    #[test]
    fn test_ineligible_coin_rejected() {
        let mut game = new_game();
        let err = game.use_coin("Ruina").unwrap_err();
        assert_eq!(err, CommandError::CoinIneligible(CoinKind::RemoveWall));
    }

    #[test]
    fn test_coin_lifecycle() {
        let mut game = new_game();
        game.use_coin("Murus").unwrap();
        assert_eq!(
            game.selection(),
            Some(CoinSelection { coin: CoinKind::PlaceWall, effect_applied: false })
        );

        let outcome = game.apply_coin_effect(CoinEffect::PlaceWall { cell: key(1, 1) }).unwrap();
        assert_eq!(outcome, CommandOutcome::EffectApplied { coin: CoinKind::PlaceWall, changed: true });
        assert!(game.board().cell(key(1, 1)).has_wall);

        // Cannot cancel once the board changed
        assert_eq!(game.cancel_coin().unwrap_err(), CommandError::EffectPending(CoinKind::PlaceWall));

        game.complete_coin_action().unwrap();
        assert!(game.has_used_coin());
        assert!(game.selection().is_none());
        assert!(game.used_this_round(PlayerId::One).contains(CoinKind::PlaceWall));
        assert_eq!(game.last_coin(PlayerId::One), Some(CoinKind::PlaceWall));

        assert_eq!(game.use_coin("Pons").unwrap_err(), CommandError::CoinAlreadyUsed);
    }

    #[test]
    fn test_cancel_clears_selection_only() {
        let mut game = new_game();
        game.use_coin("Rota").unwrap();
        game.cancel_coin().unwrap();

        assert!(game.selection().is_none());
        assert!(!game.has_used_coin());
        assert!(game.used_this_round(PlayerId::One).is_empty());
    }

    #[test]
    fn test_effect_must_match_selection() {
        let mut game = new_game();
        game.use_coin("Rota").unwrap();
        let err = game
            .apply_coin_effect(CoinEffect::LockRing { ring: RingId::OUTER })
            .unwrap_err();

        assert_eq!(
            err,
            CommandError::EffectMismatch { selected: CoinKind::SpinRing, effect: CoinKind::LockRing }
        );
        assert!(!game.rings().is_locked(RingId::OUTER));
    }

    #[test]
    fn test_complete_requires_effect_when_target_exists() {
        let mut game = new_game();
        game.use_coin("Murus").unwrap();

        let err = game.complete_coin_action().unwrap_err();
        assert_eq!(err, CommandError::EffectRequired(CoinKind::PlaceWall));
        assert!(!game.has_used_coin());
        assert!(game.used_this_round(PlayerId::One).is_empty());
        assert_eq!(game.selection(), Some(CoinSelection { coin: CoinKind::PlaceWall, effect_applied: false }));
        assert!(game.board().iter().all(|(_, cell)| !cell.has_wall));
    }

    #[test]
    fn test_complete_without_target_counts_as_used() {
        let mut game = new_game();
        game.use_coin("Rota").unwrap();
        // Every ring locked after selection leaves nothing to spin
        for ring in RingId::all() {
            game.rings.lock(ring);
        }

        let outcome = game.complete_coin_action().unwrap();
        assert_eq!(outcome, CommandOutcome::CoinCompleted(CoinKind::SpinRing));
        assert!(game.has_used_coin());
        assert_eq!(game.last_coin(PlayerId::One), Some(CoinKind::SpinRing));
    }

    #[test]
    fn test_unknown_coin_sets_status_without_history() {
        let mut game = new_game();
        let _ = game.use_coin("Nope");
        assert_eq!(game.status(), CommandError::UnknownCoin("Nope".to_string()).to_string());
        assert_eq!(game.history_len(), 0);
    }

    #[test]
    fn test_outcome_display() {
        let outcome = CommandOutcome::TurnEnded { next: PlayerId::Two, round: 1, forced: false };
        assert_eq!(outcome.to_string(), "Round 1: Player 2 to move");
        let outcome = CommandOutcome::EffectApplied { coin: CoinKind::RemoveWall, changed: false };
        assert_eq!(outcome.to_string(), "Ruina had nothing to act on");
    }
}
