//! Match configuration.
//!
//! Hosts build a `GameConfig` in code (builder methods) or load it from
//! JSON. Missing fields fall back to their defaults.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::PlayerId;

/// Nominal AI strength sent along with each decision request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// Whether this tier looks for scoring moves before the base heuristic.
    #[must_use]
    pub const fn seeks_goal(self) -> bool {
        matches!(self, Difficulty::Hard | Difficulty::Expert)
    }
}

/// AI opponent settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// AI mode on/off. When off the orchestrator never acts.
    pub enabled: bool,

    /// Seat the AI plays.
    pub player: PlayerId,

    /// Difficulty passed to the decision endpoint.
    pub difficulty: Difficulty,

    /// Pause after announcing "thinking", in milliseconds.
    pub think_delay_ms: u64,

    /// Pause between applied steps, in milliseconds.
    pub step_delay_ms: u64,

    /// Pause before the forced end of turn after a failure, in milliseconds.
    pub error_delay_ms: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            player: PlayerId::Two,
            difficulty: Difficulty::Medium,
            think_delay_ms: 600,
            step_delay_ms: 800,
            error_delay_ms: 1000,
        }
    }
}

impl AiConfig {
    #[must_use]
    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_delay_ms)
    }

    #[must_use]
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    #[must_use]
    pub fn error_delay(&self) -> Duration {
        Duration::from_millis(self.error_delay_ms)
    }

    /// Set all delays to zero.
    #[must_use]
    pub fn without_delays(mut self) -> Self {
        self.think_delay_ms = 0;
        self.step_delay_ms = 0;
        self.error_delay_ms = 0;
        self
    }
}

/// Complete match configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for every random choice made during the match.
    pub seed: u64,

    /// AI opponent settings.
    pub ai: AiConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            ai: AiConfig::default(),
        }
    }
}

impl GameConfig {
    /// Create a default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_ai(mut self, ai: AiConfig) -> Self {
        self.ai = ai;
        self
    }

    /// Set the AI difficulty.
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.ai.difficulty = difficulty;
        self
    }

    /// Disable the AI opponent (hot-seat play).
    #[must_use]
    pub fn without_ai(mut self) -> Self {
        self.ai.enabled = false;
        self
    }
}
