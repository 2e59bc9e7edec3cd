//! AI opponent.
//!
//! - `heuristic`: the stateless decision function
//! - `endpoint`: the JSON request/response boundary and the `DecisionSource` seam
//! - `orchestrator`: plays one AI turn against a game through `GameCommands`

pub mod endpoint;
pub mod heuristic;
pub mod orchestrator;

use serde::{Deserialize, Serialize};

use crate::coins::{CoinEffect, CoinKind};
use crate::game::StoneView;
use crate::stones::Destination;

pub use endpoint::{
    handle_decision_request, DecisionError, DecisionRequest, DecisionSource, EndpointResponse,
    LocalDecisionEndpoint, STATUS_BAD_REQUEST, STATUS_INTERNAL_ERROR, STATUS_OK,
};
pub use heuristic::decide;
pub use orchestrator::{AiOrchestrator, AiTurnOutcome, SkipReason};

/// A proposed stone move. `to_ring == 5` is the goal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedStoneMove {
    pub stone: StoneView,
    pub to_ring: i32,
    pub to_cell: i32,
}

impl ProposedStoneMove {
    #[must_use]
    pub fn new(stone: StoneView, to: Destination) -> Self {
        let (to_ring, to_cell) = to.to_raw();
        Self { stone, to_ring, to_cell }
    }

    /// The destination, `None` if the raw target is off the board.
    #[must_use]
    pub fn destination(&self) -> Option<Destination> {
        Destination::from_raw(self.to_ring, self.to_cell)
    }
}

/// A proposed coin. `effect` is `None` when no parameters could be resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinChoice {
    pub coin_title: CoinKind,
    #[serde(flatten)]
    pub effect: Option<CoinEffect>,
}

/// What the AI wants to do this turn. Both parts may be absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub stone_move: Option<ProposedStoneMove>,
    pub coin_action: Option<CoinChoice>,
}

impl Decision {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stone_move.is_none() && self.coin_action.is_none()
    }
}
