//! Coin eligibility.
//!
//! A coin is *available* to a player when it is not on that player's
//! cooldown list and the current state gives it something to act on.
//! Eligibility does not depend on whose turn it is; `chooser` only decides
//! who counts as the opponent.

use super::CoinKind;
use crate::core::PlayerId;
use crate::game::GameState;

/// Whether `coin` has anything to act on for `chooser` in `state`.
#[must_use]
pub fn is_contextually_eligible(state: &GameState, coin: CoinKind, chooser: PlayerId) -> bool {
    let board = state.board();
    let rings = state.rings();
    let opponent = chooser.opponent();

    match coin {
        CoinKind::TransformWallBridge | CoinKind::MoveWallBridge => board.any_barrier(),
        CoinKind::RemoveBridge => board.any_bridge(),
        CoinKind::RemoveWall => board.any_wall(),
        CoinKind::ReturnOpponentStone => match state.last_move(opponent) {
            None => false,
            Some(mv) => mv.from.map_or(true, |from| !board.cell(from).is_occupied()),
        },
        CoinKind::ResetRing => rings.rotated_unlocked().next().is_some(),
        CoinKind::LockRing | CoinKind::SpinRing => !rings.all_locked(),
        CoinKind::UnlockRing => rings.any_locked(),
        CoinKind::CopyOpponentCoin => {
            if state.round() == 1 {
                return false;
            }
            match state.last_coin(opponent) {
                None => false,
                Some(CoinKind::CopyOpponentCoin) => false,
                Some(last) => {
                    state.magna_disabled() != Some(last) && !state.disabled(chooser).contains(last)
                }
            }
        }
        CoinKind::PlaceWall | CoinKind::PlaceBridge | CoinKind::DisableCoin => true,
    }
}

/// Whether `player` may choose `coin` right now.
#[must_use]
pub fn is_available(state: &GameState, coin: CoinKind, player: PlayerId) -> bool {
    !state.disabled(player).contains(coin) && is_contextually_eligible(state, coin, player)
}

/// Coins `player` may choose, catalog order.
#[must_use]
pub fn available_coins(state: &GameState, player: PlayerId) -> Vec<CoinKind> {
    CoinKind::ALL
        .into_iter()
        .filter(|&coin| is_available(state, coin, player))
        .collect()
}
