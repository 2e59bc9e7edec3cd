//! The game aggregate and its command set.
//!
//! - `state`: `GameState` and its read accessors
//! - `commands`: the `GameCommands` trait, stone and coin commands
//! - `effects`: validation and execution of coin effects
//! - `turn`: turn and round transitions, cooldown rotation
//! - `snapshot`: JSON view and validated rebuild
//! - `record`: command history
//! - `error`: rejection reasons

pub mod commands;
mod effects;
pub mod error;
pub mod record;
pub mod snapshot;
pub mod state;
mod turn;

pub use commands::{CommandOutcome, GameCommands};
pub use error::{CommandError, CommandResult};
pub use record::{Command, CommandRecord};
pub use snapshot::{CellView, CoinView, GameSnapshot, RawPosition, SnapshotError, StoneMoveView, StoneView};
pub use state::{CoinSelection, GameState, WINNING_SCORE};
