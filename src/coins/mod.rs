//! Coins: the one-shot special actions a player spends each turn.
//!
//! - `catalog`: the fixed set of 13 coins shared by both players
//! - `effect`: typed coin effects with their resolved parameters
//! - `eligibility`: which coins can legally be chosen in a given state
//! - `resolve`: random parameter selection among valid candidates

pub mod catalog;
pub mod effect;
pub mod eligibility;
pub mod resolve;

pub use catalog::{Aspect, CoinCatalog, CoinDefinition, CoinKind, CoinList, COIN_COUNT};
pub use effect::CoinEffect;
pub use eligibility::{available_coins, is_available, is_contextually_eligible};
pub use resolve::{has_candidate, resolve_effect};
