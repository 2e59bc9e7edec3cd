//! Plays one AI turn.
//!
//! The orchestrator asks its [`DecisionSource`] for a decision and applies
//! it step by step through [`GameCommands`], pausing between steps so a
//! viewer can follow along. Steps run strictly one after another. Whatever
//! goes wrong, the turn ends: a failed request or a rejected end of turn
//! falls back to `force_end_turn`.

use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::{CoinChoice, DecisionSource, ProposedStoneMove};
use crate::coins::{self, CoinKind};
use crate::core::{AiConfig, GameConfig, GameRng, PlayerId, RandomSource};
use crate::game::GameCommands;

/// Why the orchestrator did nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    Disabled,
    NotAiTurn,
    GameOver,
}

/// Result of one `take_turn` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AiTurnOutcome {
    Skipped(SkipReason),
    /// The decision was applied. `forced` is set when `end_turn` was
    /// rejected and the turn had to be forced.
    Completed { moved_stone: bool, used_coin: bool, forced: bool },
    /// The decision request failed and the turn was forced to end.
    Failed { message: String },
}

pub struct AiOrchestrator<D: DecisionSource> {
    source: D,
    config: AiConfig,
    rng: GameRng,
}

impl<D: DecisionSource> AiOrchestrator<D> {
    pub fn new(source: D, config: AiConfig, rng: GameRng) -> Self {
        Self { source, config, rng }
    }

    /// Orchestrator for a match, with its fallback RNG derived from the match seed.
    pub fn for_game(source: D, config: &GameConfig) -> Self {
        let rng = GameRng::new(config.seed).for_context("ai-fallback");
        Self::new(source, config.ai.clone(), rng)
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    pub fn source(&self) -> &D {
        &self.source
    }

    /// Play the AI's turn if it is the AI's turn to play.
    pub async fn take_turn<C: GameCommands>(&mut self, game: &mut C) -> AiTurnOutcome {
        if !self.config.enabled {
            return AiTurnOutcome::Skipped(SkipReason::Disabled);
        }
        let state = game.state();
        if state.is_won() {
            return AiTurnOutcome::Skipped(SkipReason::GameOver);
        }
        let player = self.config.player;
        if state.turn() != player {
            return AiTurnOutcome::Skipped(SkipReason::NotAiTurn);
        }

        info!(%player, round = state.round(), difficulty = ?self.config.difficulty, "AI turn started");
        game.set_status(format!("{player} (AI) is thinking..."));
        sleep(self.config.think_delay()).await;

        let snapshot = game.state().snapshot();
        let decision = match self.source.decide(&snapshot, self.config.difficulty).await {
            Ok(decision) => decision,
            Err(err) => {
                warn!(%player, %err, "AI decision failed, forcing end of turn");
                game.set_status(format!("AI error, {player} passes the turn"));
                sleep(self.config.error_delay()).await;
                if let Err(err) = game.force_end_turn() {
                    warn!(%player, %err, "could not force end of turn");
                }
                return AiTurnOutcome::Failed { message: err.to_string() };
            }
        };
        if decision.is_empty() {
            debug!(%player, "AI found no move");
        }

        let moved_stone = match decision.stone_move {
            Some(proposal) => {
                let moved = Self::apply_stone_move(game, player, proposal);
                sleep(self.config.step_delay()).await;
                moved
            }
            None => false,
        };
        if game.state().is_won() {
            return AiTurnOutcome::Completed { moved_stone, used_coin: false, forced: false };
        }

        let used_coin = match decision.coin_action {
            Some(choice) => {
                let used = self.apply_coin(game, player, choice);
                sleep(self.config.step_delay()).await;
                used
            }
            None => false,
        };

        let forced = match game.end_turn() {
            Ok(_) => false,
            Err(err) => {
                warn!(%player, %err, "AI could not end its turn normally, forcing");
                if let Err(err) = game.force_end_turn() {
                    warn!(%player, %err, "could not force end of turn");
                }
                true
            }
        };

        AiTurnOutcome::Completed { moved_stone, used_coin, forced }
    }

    fn apply_stone_move<C: GameCommands>(game: &mut C, player: PlayerId, proposal: ProposedStoneMove) -> bool {
        let Some(to) = proposal.destination() else {
            warn!(%player, ?proposal, "AI proposed a stone move off the board");
            return false;
        };
        if proposal.stone.player != player {
            warn!(%player, ?proposal, "AI proposed moving an opponent stone");
            return false;
        }
        match game.move_stone(proposal.stone.index, to) {
            Ok(_) => true,
            Err(err) => {
                warn!(%player, %err, "AI stone move rejected");
                false
            }
        }
    }

    fn apply_coin<C: GameCommands>(&mut self, game: &mut C, player: PlayerId, choice: CoinChoice) -> bool {
        let Some(coin) = self.select_coin(game, player, choice.coin_title) else {
            return false;
        };

        let proposed = choice
            .effect
            .filter(|effect| coin == choice.coin_title && effect.kind() == coin);
        let applied = match proposed {
            Some(effect) => game.apply_coin_effect(effect).is_ok(),
            None => false,
        };
        if !applied {
            // Parameters missing or stale after the stone move; resolve against the current board.
            match coins::resolve_effect(game.state(), coin, player, &mut self.rng) {
                Some(effect) => {
                    if let Err(err) = game.apply_coin_effect(effect) {
                        warn!(%player, %coin, %err, "AI coin effect rejected");
                    }
                }
                None => debug!(%player, %coin, "no valid parameters, spending without effect"),
            }
        }

        match game.complete_coin_action() {
            Ok(_) => true,
            Err(err) => {
                warn!(%player, %coin, %err, "AI could not complete coin");
                if let Err(err) = game.cancel_coin() {
                    debug!(%player, %err, "nothing to cancel");
                }
                false
            }
        }
    }

    /// Select `proposed`, or another available coin if the stone move made it
    /// ineligible.
    fn select_coin<C: GameCommands>(&mut self, game: &mut C, player: PlayerId, proposed: CoinKind) -> Option<CoinKind> {
        let Err(err) = game.use_coin(proposed.title()) else {
            return Some(proposed);
        };
        let available = coins::available_coins(game.state(), player);
        let Some(&fallback) = self.rng.choose(&available) else {
            warn!(%player, coin = %proposed, %err, "AI coin rejected and no coin is available");
            return None;
        };
        debug!(%player, coin = %proposed, %err, %fallback, "AI coin rejected, picking another");
        match game.use_coin(fallback.title()) {
            Ok(_) => Some(fallback),
            Err(err) => {
                warn!(%player, coin = %fallback, %err, "AI fallback coin rejected");
                None
            }
        }
    }
}
