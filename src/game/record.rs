//! Command history.
//!
//! Every accepted command is appended to the game's history for replay and
//! debugging. Rejected commands are not recorded.

use crate::coins::{CoinEffect, CoinKind};
use crate::core::PlayerId;
use crate::stones::{Destination, StoneId};

/// A command as issued by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    MoveStone { stone: StoneId, to: Destination },
    UseCoin(CoinKind),
    ApplyCoinEffect(CoinEffect),
    CompleteCoinAction,
    CancelCoin,
    EndTurn,
    ForceEndTurn,
}

/// An accepted command with metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandRecord {
    /// The player whose turn it was.
    pub player: PlayerId,

    /// The command.
    pub command: Command,

    /// Round when the command was accepted.
    pub round: u32,

    /// Position in the match history (0-based).
    pub sequence: u32,
}

impl CommandRecord {
    #[must_use]
    pub fn new(player: PlayerId, command: Command, round: u32, sequence: u32) -> Self {
        Self {
            player,
            command,
            round,
            sequence,
        }
    }
}
