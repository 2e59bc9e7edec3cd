//! Core types shared by every other module: players, RNG, configuration.

pub mod config;
pub mod player;
pub mod rng;

pub use config::{AiConfig, Difficulty, GameConfig};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, RandomSource};
