//! Random parameter resolution for coin effects.
//!
//! Used by the AI heuristic and by the orchestrator when a decision names a
//! coin without parameters. Candidates are gathered in canonical board/ring
//! order and one is drawn uniformly, so a seeded source gives repeatable
//! results. `None` means no valid candidate exists; callers still complete
//! the coin so the turn is not stalled.

use super::{CoinEffect, CoinKind};
use crate::board::{Cell, CellKey, SpinDirection};
use crate::core::{PlayerId, RandomSource};
use crate::game::GameState;

const DIRECTIONS: [SpinDirection; 2] = [SpinDirection::Clockwise, SpinDirection::CounterClockwise];

/// Resolve parameters for `coin` as used by `chooser`.
pub fn resolve_effect<R: RandomSource>(
    state: &GameState,
    coin: CoinKind,
    chooser: PlayerId,
    rng: &mut R,
) -> Option<CoinEffect> {
    let board = state.board();
    let rings = state.rings();

    match coin {
        CoinKind::SpinRing => {
            let ring = pick(rng, &rings.unlocked().collect::<Vec<_>>())?;
            let direction = pick(rng, &DIRECTIONS)?;
            Some(CoinEffect::SpinRing { ring, direction })
        }
        CoinKind::LockRing => {
            pick(rng, &rings.unlocked().collect::<Vec<_>>()).map(|ring| CoinEffect::LockRing { ring })
        }
        CoinKind::ResetRing => {
            pick(rng, &rings.rotated_unlocked().collect::<Vec<_>>()).map(|ring| CoinEffect::ResetRing { ring })
        }
        CoinKind::UnlockRing => {
            pick(rng, &rings.locked().collect::<Vec<_>>()).map(|ring| CoinEffect::UnlockRing { ring })
        }
        CoinKind::PlaceWall => {
            pick(rng, &board.keys_where(Cell::is_bare)).map(|cell| CoinEffect::PlaceWall { cell })
        }
        CoinKind::PlaceBridge => {
            pick(rng, &board.keys_where(Cell::is_bare)).map(|cell| CoinEffect::PlaceBridge { cell })
        }
        CoinKind::RemoveWall => {
            pick(rng, &board.keys_where(|c| c.has_wall)).map(|cell| CoinEffect::RemoveWall { cell })
        }
        CoinKind::RemoveBridge => {
            pick(rng, &board.keys_where(|c| c.has_bridge)).map(|cell| CoinEffect::RemoveBridge { cell })
        }
        CoinKind::TransformWallBridge => pick(rng, &board.keys_where(Cell::has_barrier))
            .map(|cell| CoinEffect::TransformWallBridge { cell }),
        CoinKind::MoveWallBridge => {
            pick(rng, &board.keys_where(Cell::has_barrier)).map(|from: CellKey| CoinEffect::MoveWallBridge {
                from,
                to: from.next_on_ring(),
            })
        }
        CoinKind::DisableCoin => pick(rng, &CoinKind::ALL).map(|coin| CoinEffect::DisableCoin { coin }),
        CoinKind::ReturnOpponentStone => {
            returnable(state, chooser.opponent()).then_some(CoinEffect::ReturnOpponentStone)
        }
        CoinKind::CopyOpponentCoin => {
            let copied = state.last_coin(chooser.opponent())?;
            if copied == CoinKind::CopyOpponentCoin {
                return None;
            }
            resolve_effect(state, copied, chooser, rng).map(CoinEffect::copy_of)
        }
    }
}

/// Whether `resolve_effect` would find any parameters for `coin`.
#[must_use]
pub fn has_candidate(state: &GameState, coin: CoinKind, chooser: PlayerId) -> bool {
    let board = state.board();
    let rings = state.rings();

    match coin {
        CoinKind::SpinRing | CoinKind::LockRing => rings.unlocked().next().is_some(),
        CoinKind::ResetRing => rings.rotated_unlocked().next().is_some(),
        CoinKind::UnlockRing => rings.any_locked(),
        CoinKind::PlaceWall | CoinKind::PlaceBridge => board.iter().any(|(_, cell)| cell.is_bare()),
        CoinKind::RemoveWall => board.any_wall(),
        CoinKind::RemoveBridge => board.any_bridge(),
        CoinKind::TransformWallBridge | CoinKind::MoveWallBridge => board.any_barrier(),
        CoinKind::DisableCoin => true,
        CoinKind::ReturnOpponentStone => returnable(state, chooser.opponent()),
        CoinKind::CopyOpponentCoin => match state.last_coin(chooser.opponent()) {
            None | Some(CoinKind::CopyOpponentCoin) => false,
            Some(copied) => has_candidate(state, copied, chooser),
        },
    }
}

/// The opponent's last move is still on the board and its origin is free.
fn returnable(state: &GameState, opponent: PlayerId) -> bool {
    state.last_move(opponent).is_some_and(|mv| {
        state.stones(opponent).position(mv.stone) == mv.to.resulting_position()
            && mv.from.map_or(true, |from| !state.board().cell(from).is_occupied())
    })
}

fn pick<T: Copy, R: RandomSource>(rng: &mut R, items: &[T]) -> Option<T> {
    rng.choose(items).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, GameRng};

    #[test]
    fn test_fresh_board_candidates() {
        let state = GameState::new(&GameConfig::default());
        let mut rng = GameRng::new(1);

        assert!(matches!(
            resolve_effect(&state, CoinKind::SpinRing, PlayerId::One, &mut rng),
            Some(CoinEffect::SpinRing { .. })
        ));
        assert!(matches!(
            resolve_effect(&state, CoinKind::PlaceBridge, PlayerId::One, &mut rng),
            Some(CoinEffect::PlaceBridge { .. })
        ));
        assert_eq!(resolve_effect(&state, CoinKind::RemoveWall, PlayerId::One, &mut rng), None);
        assert_eq!(resolve_effect(&state, CoinKind::ResetRing, PlayerId::One, &mut rng), None);
        assert_eq!(resolve_effect(&state, CoinKind::UnlockRing, PlayerId::One, &mut rng), None);
        assert_eq!(resolve_effect(&state, CoinKind::CopyOpponentCoin, PlayerId::One, &mut rng), None);
    }

    #[test]
    fn test_candidates_match_resolution() {
        let state = GameState::new(&GameConfig::default());
        let mut rng = GameRng::new(3);

        for coin in CoinKind::ALL {
            let resolved = resolve_effect(&state, coin, PlayerId::One, &mut rng);
            assert_eq!(has_candidate(&state, coin, PlayerId::One), resolved.is_some(), "{coin}");
        }
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let state = GameState::new(&GameConfig::default());
        let a = resolve_effect(&state, CoinKind::PlaceWall, PlayerId::Two, &mut GameRng::new(9));
        let b = resolve_effect(&state, CoinKind::PlaceWall, PlayerId::Two, &mut GameRng::new(9));
        assert_eq!(a, b);
    }
}
