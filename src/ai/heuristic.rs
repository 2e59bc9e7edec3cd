//! Heuristic decision function.
//!
//! Stateless: given a game and a difficulty it proposes at most one stone
//! move and at most one coin for the active player. Randomness only enters
//! through the coin pick and its parameters.

use tracing::debug;

use super::{CoinChoice, Decision, ProposedStoneMove};
use crate::board::{Board, RingId};
use crate::coins::{self, CoinKind};
use crate::core::{Difficulty, PlayerId, RandomSource};
use crate::game::{GameState, StoneView};
use crate::stones::{Destination, StonePosition};

/// Propose a move for the player whose turn it is.
pub fn decide<R: RandomSource>(state: &GameState, difficulty: Difficulty, rng: &mut R) -> Decision {
    let player = state.turn();
    let stone_move = if state.has_moved_stone() {
        None
    } else {
        choose_stone_move(state, player, difficulty)
    };
    let coin_action = if state.has_used_coin() {
        None
    } else {
        choose_coin(state, player, rng)
    };

    debug!(%player, ?difficulty, ?stone_move, ?coin_action, "heuristic decision");
    Decision { stone_move, coin_action }
}

fn choose_stone_move(state: &GameState, player: PlayerId, difficulty: Difficulty) -> Option<ProposedStoneMove> {
    let ledger = state.stones(player);
    let board = state.board();
    let view = |id, position| StoneView::new(player, id, position);

    if difficulty.seeks_goal() {
        if let Some((id, key)) = ledger.on_board().find(|(_, key)| key.ring().is_innermost()) {
            return Some(ProposedStoneMove::new(view(id, StonePosition::OnBoard(key)), Destination::Goal));
        }
    }

    if let Some(id) = ledger.first_unplaced() {
        let open = Board::ring_keys(RingId::OUTER).find(|&key| {
            let cell = board.cell(key);
            !cell.is_occupied() && !cell.has_wall
        });
        if let Some(key) = open {
            return Some(ProposedStoneMove::new(view(id, StonePosition::Unplaced), Destination::Cell(key)));
        }
    }

    for (id, key) in ledger.on_board() {
        let Some(inward) = key.ring().inward() else {
            continue;
        };
        if let Some(target) = Board::ring_keys(inward).find(|&k| !board.cell(k).is_occupied()) {
            return Some(ProposedStoneMove::new(view(id, StonePosition::OnBoard(key)), Destination::Cell(target)));
        }
    }

    for (id, key) in ledger.on_board() {
        if key.ring().is_innermost() {
            continue;
        }
        let target = key.next_on_ring();
        if !board.cell(target).is_occupied() {
            return Some(ProposedStoneMove::new(view(id, StonePosition::OnBoard(key)), Destination::Cell(target)));
        }
    }

    None
}

fn choose_coin<R: RandomSource>(state: &GameState, player: PlayerId, rng: &mut R) -> Option<CoinChoice> {
    let available: Vec<CoinKind> = coins::available_coins(state, player);
    let coin = *rng.choose(&available)?;
    let effect = coins::resolve_effect(state, coin, player, rng);
    Some(CoinChoice { coin_title: coin, effect })
}
