//! Decision endpoint.
//!
//! The orchestrator asks a [`DecisionSource`] for each AI turn. The request
//! and response follow a small JSON contract so the heuristic can sit
//! behind any transport; [`LocalDecisionEndpoint`] runs it in-process.
//!
//! Request: `{ "gameState": <GameSnapshot>, "difficulty": "easy" | ... }`.
//! Responses: `200` with a [`Decision`], `400` for a malformed request,
//! `500` with a generic message for anything else. Internal error detail is
//! logged, never returned.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use super::{heuristic, Decision};
use crate::core::{Difficulty, GameRng, RandomSource};
use crate::game::{GameSnapshot, GameState};

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

const INTERNAL_ERROR_MESSAGE: &str = "internal error while computing a move";

/// Typed form of the request body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRequest {
    pub game_state: GameSnapshot,
    #[serde(default)]
    pub difficulty: Difficulty,
}

/// Status code plus JSON body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointResponse {
    pub status: u16,
    pub body: Value,
}

impl EndpointResponse {
    fn ok(body: Value) -> Self {
        Self { status: STATUS_OK, body }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(%message, "rejected decision request");
        Self {
            status: STATUS_BAD_REQUEST,
            body: json!({ "error": message }),
        }
    }

    fn internal(detail: &dyn std::fmt::Display) -> Self {
        error!(%detail, "decision endpoint failed");
        Self {
            status: STATUS_INTERNAL_ERROR,
            body: json!({ "error": INTERNAL_ERROR_MESSAGE }),
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    /// The `error` field of a failure body, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}

/// Handle one decision request.
pub fn handle_decision_request(request: &Value, rng: &mut impl RandomSource) -> EndpointResponse {
    let Some(game_state) = request.get("gameState").filter(|v| !v.is_null()) else {
        return EndpointResponse::bad_request("missing gameState");
    };
    if !game_state.get("stones").is_some_and(Value::is_object) {
        return EndpointResponse::bad_request("gameState.stones must be an object");
    }
    if !game_state.get("cells").is_some_and(Value::is_object) {
        return EndpointResponse::bad_request("gameState.cells must be an object");
    }
    if !game_state.get("availableCoins").is_some_and(Value::is_array) {
        return EndpointResponse::bad_request("gameState.availableCoins must be an array");
    }

    let difficulty = match request.get("difficulty") {
        None | Some(Value::Null) => Difficulty::default(),
        Some(raw) => match Difficulty::deserialize(raw) {
            Ok(difficulty) => difficulty,
            Err(_) => return EndpointResponse::bad_request(format!("unknown difficulty {raw}")),
        },
    };

    let snapshot = match GameSnapshot::deserialize(game_state) {
        Ok(snapshot) => snapshot,
        Err(err) => return EndpointResponse::internal(&err),
    };
    let state = match GameState::from_snapshot(&snapshot) {
        Ok(state) => state,
        Err(err) => return EndpointResponse::internal(&err),
    };

    let decision = heuristic::decide(&state, difficulty, rng);
    match serde_json::to_value(&decision) {
        Ok(body) => EndpointResponse::ok(body),
        Err(err) => EndpointResponse::internal(&err),
    }
}

/// Why a decision could not be obtained.
#[derive(Debug, Error)]
pub enum DecisionError {
    #[error("decision endpoint returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed decision response: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    #[error("could not build decision request: {0}")]
    Request(#[source] serde_json::Error),
}

/// Somewhere the orchestrator can get a decision from.
#[async_trait]
pub trait DecisionSource: Send + Sync {
    async fn decide(&self, snapshot: &GameSnapshot, difficulty: Difficulty) -> Result<Decision, DecisionError>;
}

/// Runs [`handle_decision_request`] in-process through the JSON contract.
#[derive(Debug)]
pub struct LocalDecisionEndpoint {
    rng: Mutex<GameRng>,
}

impl LocalDecisionEndpoint {
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng: Mutex::new(rng) }
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(GameRng::new(seed))
    }
}

#[async_trait]
impl DecisionSource for LocalDecisionEndpoint {
    async fn decide(&self, snapshot: &GameSnapshot, difficulty: Difficulty) -> Result<Decision, DecisionError> {
        let request = DecisionRequest { game_state: snapshot.clone(), difficulty };
        let request = serde_json::to_value(&request).map_err(DecisionError::Request)?;

        let response = {
            let mut rng = self.rng.lock().await;
            handle_decision_request(&request, &mut *rng)
        };
        debug!(status = response.status, "local decision endpoint responded");

        if !response.is_ok() {
            return Err(DecisionError::Status {
                status: response.status,
                message: response.error_message().unwrap_or_default().to_string(),
            });
        }
        serde_json::from_value(response.body).map_err(DecisionError::MalformedResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;

    fn request() -> Value {
        let state = GameState::new(&GameConfig::default());
        json!({ "gameState": state.snapshot(), "difficulty": "hard" })
    }

    #[test]
    fn test_ok_response_has_decision() {
        let response = handle_decision_request(&request(), &mut GameRng::new(3));
        assert_eq!(response.status, STATUS_OK);

        let decision: Decision = serde_json::from_value(response.body).unwrap();
        let mv = decision.stone_move.unwrap();
        assert_eq!((mv.to_ring, mv.to_cell), (0, 0));
        assert!(decision.coin_action.is_some());
    }

    #[test]
    fn test_missing_game_state() {
        let response = handle_decision_request(&json!({ "difficulty": "easy" }), &mut GameRng::new(3));
        assert_eq!(response.status, STATUS_BAD_REQUEST);
        assert_eq!(response.error_message(), Some("missing gameState"));
    }

    #[test]
    fn test_shape_validation() {
        let mut bad = request();
        bad["gameState"]["stones"] = json!([]);
        assert_eq!(handle_decision_request(&bad, &mut GameRng::new(3)).status, STATUS_BAD_REQUEST);

        let mut bad = request();
        bad["gameState"]["cells"] = json!("nope");
        assert_eq!(handle_decision_request(&bad, &mut GameRng::new(3)).status, STATUS_BAD_REQUEST);

        let mut bad = request();
        bad["gameState"]["availableCoins"] = json!({});
        let response = handle_decision_request(&bad, &mut GameRng::new(3));
        assert_eq!(response.status, STATUS_BAD_REQUEST);
        assert_eq!(response.error_message(), Some("gameState.availableCoins must be an array"));
    }

    #[test]
    fn test_inconsistent_state_is_generic_500() {
        let mut bad = request();
        bad["gameState"]["score"]["player1"] = json!(2);
        let response = handle_decision_request(&bad, &mut GameRng::new(3));

        assert_eq!(response.status, STATUS_INTERNAL_ERROR);
        assert_eq!(response.error_message(), Some(INTERNAL_ERROR_MESSAGE));
    }

    #[test]
    fn test_unparseable_state_is_500() {
        let mut bad = request();
        bad["gameState"]["round"] = json!("first");
        assert_eq!(handle_decision_request(&bad, &mut GameRng::new(3)).status, STATUS_INTERNAL_ERROR);
    }

    #[tokio::test]
    async fn test_local_endpoint_round_trip() {
        let endpoint = LocalDecisionEndpoint::with_seed(5);
        let state = GameState::new(&GameConfig::default());

        let decision = endpoint.decide(&state.snapshot(), Difficulty::Easy).await.unwrap();
        assert!(decision.stone_move.is_some());
    }

    #[tokio::test]
    async fn test_local_endpoint_maps_failures() {
        let endpoint = LocalDecisionEndpoint::with_seed(5);
        let mut snapshot = GameState::new(&GameConfig::default()).snapshot();
        snapshot.round = 0;

        let err = endpoint.decide(&snapshot, Difficulty::Easy).await.unwrap_err();
        assert!(matches!(err, DecisionError::Status { status: STATUS_INTERNAL_ERROR, .. }));
    }
}
