//! # vorago
//!
//! Rules engine and AI opponent for Vorago, a two-player board game played
//! on five concentric rotating rings.
//!
//! ## Design Principles
//!
//! 1. **One Aggregate**: A match is one `GameState`. It changes only through
//!    the `GameCommands` set, and every command either applies fully or is
//!    rejected with a `CommandError`.
//!
//! 2. **Typed Positions**: Rings, cells, stones, and coin effects are typed;
//!    the `-1`/`99` stone sentinels and `"ring-cell"` keys exist only in the
//!    JSON snapshot.
//!
//! 3. **Injected Randomness**: Every random choice takes a `RandomSource`,
//!    so seeded games and tests are repeatable.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Board cells and command history use
//!   `im-rs`, so cloning a game for a snapshot is O(1).
//!
//! - **Async Only at the Edge**: The engine is synchronous. The AI
//!   orchestrator is the one async actor; it awaits its decision source and
//!   the pauses between steps.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, configuration
//! - `board`: Rings, cell keys, cells, rotation and locks
//! - `stones`: Stone identities, positions, and ledgers
//! - `coins`: Coin catalog, effects, eligibility, parameter resolution
//! - `game`: The game aggregate, commands, turns, snapshots
//! - `ai`: Heuristic decisions, decision endpoint, turn orchestration

pub mod ai;
pub mod board;
pub mod coins;
pub mod core;
pub mod game;
pub mod stones;

// Re-export commonly used types
pub use crate::core::{AiConfig, Difficulty, GameConfig, GameRng, PlayerId, PlayerMap, RandomSource};

pub use crate::board::{Board, Cell, CellKey, RingId, Rings, SpinDirection};

pub use crate::stones::{Destination, StoneId, StoneLedger, StoneMove, StonePosition, StoneRef};

pub use crate::coins::{CoinCatalog, CoinDefinition, CoinEffect, CoinKind, CoinList};

pub use crate::game::{
    Command, CommandError, CommandOutcome, CommandRecord, CommandResult, GameCommands, GameSnapshot,
    GameState, SnapshotError,
};

pub use crate::ai::{
    AiOrchestrator, AiTurnOutcome, CoinChoice, Decision, DecisionError, DecisionSource,
    LocalDecisionEndpoint, ProposedStoneMove,
};
