//! Coin effects with their resolved parameters.
//!
//! Each variant carries exactly the parameters its action needs, so an
//! effect cannot be executed with a missing target. Serialized with an
//! `action` tag, e.g. `{"action": "spinRing", "ring": 0, "direction": "cw"}`.

use serde::{Deserialize, Serialize};

use super::CoinKind;
use crate::board::{CellKey, RingId, SpinDirection};

/// A fully parameterized coin effect.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum CoinEffect {
    TransformWallBridge { cell: CellKey },
    ReturnOpponentStone,
    ResetRing { ring: RingId },
    LockRing { ring: RingId },
    RemoveBridge { cell: CellKey },
    RemoveWall { cell: CellKey },
    SpinRing { ring: RingId, direction: SpinDirection },
    UnlockRing { ring: RingId },
    MoveWallBridge { from: CellKey, to: CellKey },
    /// Replays the opponent's last coin with its own parameters.
    CopyOpponentCoin { copied: Box<CoinEffect> },
    PlaceWall { cell: CellKey },
    PlaceBridge { cell: CellKey },
    /// Magna-disable `coin` for both players next round.
    DisableCoin { coin: CoinKind },
}

impl CoinEffect {
    /// The coin this effect belongs to.
    #[must_use]
    pub fn kind(&self) -> CoinKind {
        match self {
            CoinEffect::TransformWallBridge { .. } => CoinKind::TransformWallBridge,
            CoinEffect::ReturnOpponentStone => CoinKind::ReturnOpponentStone,
            CoinEffect::ResetRing { .. } => CoinKind::ResetRing,
            CoinEffect::LockRing { .. } => CoinKind::LockRing,
            CoinEffect::RemoveBridge { .. } => CoinKind::RemoveBridge,
            CoinEffect::RemoveWall { .. } => CoinKind::RemoveWall,
            CoinEffect::SpinRing { .. } => CoinKind::SpinRing,
            CoinEffect::UnlockRing { .. } => CoinKind::UnlockRing,
            CoinEffect::MoveWallBridge { .. } => CoinKind::MoveWallBridge,
            CoinEffect::CopyOpponentCoin { .. } => CoinKind::CopyOpponentCoin,
            CoinEffect::PlaceWall { .. } => CoinKind::PlaceWall,
            CoinEffect::PlaceBridge { .. } => CoinKind::PlaceBridge,
            CoinEffect::DisableCoin { .. } => CoinKind::DisableCoin,
        }
    }

    /// Wrap an effect as a copy of the opponent's coin.
    #[must_use]
    pub fn copy_of(copied: CoinEffect) -> Self {
        CoinEffect::CopyOpponentCoin {
            copied: Box::new(copied),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let ring = RingId::OUTER;
        let cell = CellKey::new(ring, 3).unwrap();

        assert_eq!(CoinEffect::PlaceWall { cell }.kind(), CoinKind::PlaceWall);
        assert_eq!(CoinEffect::ReturnOpponentStone.kind(), CoinKind::ReturnOpponentStone);
        assert_eq!(
            CoinEffect::copy_of(CoinEffect::LockRing { ring }).kind(),
            CoinKind::CopyOpponentCoin
        );
    }

    #[test]
    fn test_tagged_json() {
        let effect = CoinEffect::SpinRing {
            ring: RingId::OUTER,
            direction: SpinDirection::Clockwise,
        };
        let json = serde_json::to_value(&effect).unwrap();
        assert_eq!(json, serde_json::json!({"action": "spinRing", "ring": 0, "direction": "cw"}));

        let parsed: CoinEffect =
            serde_json::from_value(serde_json::json!({"action": "moveWallBridge", "from": "1-15", "to": "1-0"}))
                .unwrap();
        assert_eq!(parsed.kind(), CoinKind::MoveWallBridge);
    }

    #[test]
    fn test_nested_copy_json() {
        let json = serde_json::json!({
            "action": "copyOpponentCoin",
            "copied": {"action": "disableCoin", "coin": "Rota"}
        });
        let parsed: CoinEffect = serde_json::from_value(json).unwrap();
        assert_eq!(
            parsed,
            CoinEffect::copy_of(CoinEffect::DisableCoin { coin: CoinKind::SpinRing })
        );
    }

    #[test]
    fn test_rejects_missing_parameter() {
        let json = serde_json::json!({"action": "placeWall"});
        assert!(serde_json::from_value::<CoinEffect>(json).is_err());
    }
}
