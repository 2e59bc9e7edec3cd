//! Turn and round controller.
//!
//! A turn ends only after the active player has moved a stone and used a
//! coin. When play wraps back to player 1 a new round starts and cooldowns
//! rotate: what each player used last round becomes disabled for this one,
//! and a pending Magna-disabled coin is blocked for both players.

use tracing::info;

use super::commands::CommandOutcome;
use super::error::{CommandError, CommandResult};
use super::state::GameState;
use crate::core::PlayerId;

impl GameState {
    pub(super) fn try_end_turn(&mut self, forced: bool) -> CommandResult {
        self.ensure_not_won()?;
        if !forced && !(self.has_moved_stone && self.has_used_coin) {
            return Err(CommandError::TurnIncomplete {
                moved_stone: self.has_moved_stone,
                used_coin: self.has_used_coin,
            });
        }

        self.turn = self.turn.opponent();
        self.has_moved_stone = false;
        self.has_used_coin = false;
        self.selection = None;

        if self.turn == PlayerId::One {
            self.start_round();
        }

        info!(next = %self.turn, round = self.round, forced, "turn ended");
        Ok(CommandOutcome::TurnEnded {
            next: self.turn,
            round: self.round,
            forced,
        })
    }

    fn start_round(&mut self) {
        self.round += 1;
        for player in PlayerId::ALL {
            self.disabled[player] = std::mem::take(&mut self.used_this_round[player]);
        }
        if let Some(coin) = self.magna_disabled.take() {
            for player in PlayerId::ALL {
                self.disabled[player].insert(coin);
            }
        }
        info!(
            round = self.round,
            player1_disabled = ?self.disabled[PlayerId::One],
            player2_disabled = ?self.disabled[PlayerId::Two],
            "new round"
        );
    }
}
