//! Serializable view of a game.
//!
//! [`GameSnapshot`] is the camelCase JSON shape handed to the decision
//! endpoint. [`GameState::from_snapshot`] rebuilds a state from one and
//! rejects anything that could not have been produced by play.

use std::collections::BTreeMap;

use im::Vector;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::{GameState, WINNING_SCORE};
use crate::board::{Board, Cell, CellKey, Rings, RING_COUNT};
use crate::coins::{Aspect, CoinCatalog, CoinKind, CoinList};
use crate::core::{PlayerId, PlayerMap};
use crate::stones::{
    Destination, StoneId, StoneLedger, StoneMove, StonePosition, StoneRef, STONES_PER_PLAYER,
};

/// A stone with its wire position (`-1/-1` unplaced, `99/99` scored).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoneView {
    pub player: PlayerId,
    pub index: StoneId,
    pub ring: i32,
    pub cell: i32,
}

impl StoneView {
    #[must_use]
    pub fn new(player: PlayerId, index: StoneId, position: StonePosition) -> Self {
        let (ring, cell) = position.to_raw();
        Self { player, index, ring, cell }
    }

    #[must_use]
    pub fn position(&self) -> Option<StonePosition> {
        StonePosition::from_raw(self.ring, self.cell)
    }

    #[must_use]
    pub fn stone_ref(&self) -> StoneRef {
        StoneRef::new(self.player, self.index)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellView {
    pub has_wall: bool,
    pub has_bridge: bool,
    pub stone: Option<StoneView>,
}

/// A raw `(ring, cell)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPosition {
    pub ring: i32,
    pub cell: i32,
}

impl From<(i32, i32)> for RawPosition {
    fn from((ring, cell): (i32, i32)) -> Self {
        Self { ring, cell }
    }
}

/// Last stone move; `from` is `None` for a placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoneMoveView {
    pub stone: StoneId,
    pub from: Option<RawPosition>,
    pub to: RawPosition,
}

impl From<StoneMove> for StoneMoveView {
    fn from(mv: StoneMove) -> Self {
        Self {
            stone: mv.stone,
            from: mv.from.map(|key| StonePosition::OnBoard(key).to_raw().into()),
            to: mv.to.to_raw().into(),
        }
    }
}

impl StoneMoveView {
    fn to_move(self) -> Option<StoneMove> {
        let from = match self.from {
            None => None,
            Some(raw) => Some(CellKey::from_raw(raw.ring, raw.cell)?),
        };
        let to = Destination::from_raw(self.to.ring, self.to.cell)?;
        Some(StoneMove { stone: self.stone, from, to })
    }
}

/// Catalog entry as shown to clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinView {
    pub title: CoinKind,
    pub aspect: Aspect,
    pub description: String,
    pub action: String,
}

impl From<CoinKind> for CoinView {
    fn from(coin: CoinKind) -> Self {
        let def = coin.definition();
        Self {
            title: coin,
            aspect: def.aspect,
            description: def.description.to_string(),
            action: coin.action_name().to_string(),
        }
    }
}

/// Full JSON view of a match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub round: u32,
    pub turn: PlayerId,
    pub score: PlayerMap<u8>,
    pub game_win: bool,
    pub winner: Option<PlayerId>,
    pub cells: BTreeMap<CellKey, CellView>,
    pub degrees: [f64; RING_COUNT],
    pub locked_rings: [bool; RING_COUNT],
    pub stones: PlayerMap<Vec<StoneView>>,
    pub available_coins: Vec<CoinView>,
    pub disabled_coins: PlayerMap<CoinList>,
    pub coins_used_this_round: PlayerMap<CoinList>,
    pub magna_disabled_coin: Option<CoinKind>,
    pub last_stone_move: PlayerMap<Option<StoneMoveView>>,
    pub last_coin_used: PlayerMap<Option<CoinKind>>,
    pub has_moved_stone: bool,
    pub has_used_coin: bool,
}

/// Why a snapshot could not be turned back into a game.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SnapshotError {
    #[error("round must start at 1")]
    InvalidRound,

    #[error("cell {0} is missing")]
    MissingCell(CellKey),

    #[error("cell {0} has both a wall and a bridge")]
    WallAndBridge(CellKey),

    #[error("ring angles {0:?} are not whole ring steps")]
    RotationOffStep([f64; RING_COUNT]),

    #[error("{player} must have exactly 3 stones, found {count}")]
    StoneCount { player: PlayerId, count: usize },

    #[error("stone list of {player} is out of order or has foreign stones")]
    StoneOrder { player: PlayerId },

    #[error("stone of {player} has invalid position {ring}/{cell}")]
    BadStonePosition { player: PlayerId, ring: i32, cell: i32 },

    #[error("cell {0} and the stone ledgers disagree")]
    StoneMismatch(CellKey),

    #[error("{player} has score {score} but {scored} scored stones")]
    ScoreMismatch { player: PlayerId, score: u8, scored: usize },

    #[error("win flag and winner do not match the scores")]
    WinnerMismatch,

    #[error("last stone move of {player} is not a valid move")]
    BadStoneMove { player: PlayerId },

    #[error("{coin} is both disabled and used this round for {player}")]
    CoinDisabledAndUsed { player: PlayerId, coin: CoinKind },
}

impl GameState {
    /// Take a serializable view of the current state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        let cells: BTreeMap<CellKey, CellView> = self
            .board
            .iter()
            .map(|(key, cell)| {
                let stone = cell
                    .stone
                    .map(|s| StoneView::new(s.player, s.index, StonePosition::OnBoard(key)));
                let view = CellView { has_wall: cell.has_wall, has_bridge: cell.has_bridge, stone };
                (key, view)
            })
            .collect();

        let stones: PlayerMap<Vec<StoneView>> = PlayerMap::new(|player| {
            self.stones[player]
                .iter()
                .map(|(id, position)| StoneView::new(player, id, position))
                .collect()
        });

        GameSnapshot {
            round: self.round,
            turn: self.turn,
            score: self.score.clone(),
            game_win: self.winner.is_some(),
            winner: self.winner,
            cells,
            degrees: self.rings.all_degrees(),
            locked_rings: self.rings.locked_flags(),
            stones,
            available_coins: CoinKind::ALL.iter().map(|&coin| CoinView::from(coin)).collect(),
            disabled_coins: self.disabled.clone(),
            coins_used_this_round: self.used_this_round.clone(),
            magna_disabled_coin: self.magna_disabled,
            last_stone_move: self.last_move.map(|mv| (*mv).map(StoneMoveView::from)),
            last_coin_used: self.last_coin.clone(),
            has_moved_stone: self.has_moved_stone,
            has_used_coin: self.has_used_coin,
        }
    }

    /// Rebuild a game from a snapshot, checking every board and ledger invariant.
    ///
    /// Selection and history are not part of a snapshot and start empty.
    pub fn from_snapshot(snapshot: &GameSnapshot) -> Result<Self, SnapshotError> {
        if snapshot.round == 0 {
            return Err(SnapshotError::InvalidRound);
        }

        let rings = Rings::from_parts(snapshot.degrees, snapshot.locked_rings)
            .ok_or(SnapshotError::RotationOffStep(snapshot.degrees))?;

        let mut cells = Vector::new();
        for key in Board::keys() {
            let view = snapshot.cells.get(&key).ok_or(SnapshotError::MissingCell(key))?;
            if view.has_wall && view.has_bridge {
                return Err(SnapshotError::WallAndBridge(key));
            }
            if let Some(stone) = view.stone {
                if stone.position() != Some(StonePosition::OnBoard(key)) {
                    return Err(SnapshotError::StoneMismatch(key));
                }
            }
            cells.push_back(Cell {
                has_wall: view.has_wall,
                has_bridge: view.has_bridge,
                stone: view.stone.map(|s| s.stone_ref()),
            });
        }
        let board = Board::from_cells(cells);

        let mut stones = PlayerMap::with_value(StoneLedger::new());
        for player in PlayerId::ALL {
            stones[player] = rebuild_ledger(player, &snapshot.stones[player], &board)?;
        }

        // Cells must not hold stones the ledgers do not know about.
        let on_board: usize = PlayerId::ALL.iter().map(|&p| stones[p].on_board().count()).sum();
        if let Some((key, _)) = board.iter().filter(|(_, c)| c.is_occupied()).nth(on_board) {
            return Err(SnapshotError::StoneMismatch(key));
        }

        for player in PlayerId::ALL {
            let score = snapshot.score[player];
            let scored = stones[player].scored_count();
            if usize::from(score) != scored {
                return Err(SnapshotError::ScoreMismatch { player, score, scored });
            }
        }
        let expected_winner = PlayerId::ALL
            .into_iter()
            .find(|&p| snapshot.score[p] >= WINNING_SCORE);
        if snapshot.winner != expected_winner || snapshot.game_win != expected_winner.is_some() {
            return Err(SnapshotError::WinnerMismatch);
        }

        for player in PlayerId::ALL {
            let used = &snapshot.coins_used_this_round[player];
            if let Some(coin) = snapshot.disabled_coins[player].iter().find(|&coin| used.contains(coin)) {
                return Err(SnapshotError::CoinDisabledAndUsed { player, coin });
            }
        }

        let mut last_move = PlayerMap::with_value(None);
        for player in PlayerId::ALL {
            if let Some(view) = snapshot.last_stone_move[player] {
                let mv = view.to_move().ok_or(SnapshotError::BadStoneMove { player })?;
                last_move[player] = Some(mv);
            }
        }

        Ok(Self {
            round: snapshot.round,
            turn: snapshot.turn,
            score: snapshot.score.clone(),
            winner: snapshot.winner,
            board,
            rings,
            stones,
            catalog: CoinCatalog::standard(),
            disabled: snapshot.disabled_coins.clone(),
            used_this_round: snapshot.coins_used_this_round.clone(),
            magna_disabled: snapshot.magna_disabled_coin,
            last_move,
            last_coin: snapshot.last_coin_used.clone(),
            has_moved_stone: snapshot.has_moved_stone,
            has_used_coin: snapshot.has_used_coin,
            selection: None,
            status: format!("{} to move", snapshot.turn),
            history: Vector::new(),
        })
    }
}

fn rebuild_ledger(player: PlayerId, views: &[StoneView], board: &Board) -> Result<StoneLedger, SnapshotError> {
    if views.len() != STONES_PER_PLAYER {
        return Err(SnapshotError::StoneCount { player, count: views.len() });
    }

    let mut positions = [StonePosition::Unplaced; STONES_PER_PLAYER];
    for ((slot, view), id) in positions.iter_mut().zip(views).zip(StoneId::all()) {
        if view.player != player || view.index != id {
            return Err(SnapshotError::StoneOrder { player });
        }
        let position = view.position().ok_or(SnapshotError::BadStonePosition {
            player,
            ring: view.ring,
            cell: view.cell,
        })?;
        if let StonePosition::OnBoard(key) = position {
            if board.cell(key).stone != Some(view.stone_ref()) {
                return Err(SnapshotError::StoneMismatch(key));
            }
        }
        *slot = position;
    }
    Ok(StoneLedger::from_positions(positions))
}
