//! Command rejection reasons.
//!
//! A rejected command leaves the game untouched apart from the status line,
//! which is set to the error's display text.

use thiserror::Error;

use crate::board::{CellKey, RingId};
use crate::coins::CoinKind;
use crate::core::PlayerId;

pub type CommandResult = std::result::Result<super::CommandOutcome, CommandError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("the game is over, {winner} has won")]
    GameOver { winner: PlayerId },

    #[error("you must move a stone and use a coin before ending your turn")]
    TurnIncomplete { moved_stone: bool, used_coin: bool },

    #[error("you already moved a stone this turn")]
    StoneAlreadyMoved,

    #[error("that stone has already scored")]
    StoneAlreadyScored,

    #[error("cell {0} is already occupied")]
    CellOccupied(CellKey),

    #[error("only stones on the innermost ring can reach the goal")]
    GoalUnreachable,

    #[error("you already used a coin this turn")]
    CoinAlreadyUsed,

    #[error("no coin titled {0:?}")]
    UnknownCoin(String),

    #[error("{0} is disabled this round")]
    CoinDisabled(CoinKind),

    #[error("{0} cannot be used right now")]
    CoinIneligible(CoinKind),

    #[error("no coin is selected")]
    NoCoinSelected,

    #[error("the effect of {0} was already applied")]
    EffectAlreadyApplied(CoinKind),

    #[error("the effect of {0} was applied and must be completed")]
    EffectPending(CoinKind),

    #[error("{0} has a valid target and must be applied first")]
    EffectRequired(CoinKind),

    #[error("{effect} does not match the selected coin {selected}")]
    EffectMismatch { selected: CoinKind, effect: CoinKind },

    #[error("ring {0} is locked")]
    RingLocked(RingId),

    #[error("cell {0} must be empty")]
    CellNotBare(CellKey),

    #[error("there is no opponent stone move to undo")]
    NothingToReturn,

    #[error("your opponent has not used a copyable coin")]
    NothingToCopy,
}
