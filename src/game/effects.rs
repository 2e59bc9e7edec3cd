//! Coin effect primitives.
//!
//! `validate_effect` checks everything that could make an effect illegal;
//! `execute_effect` then applies it and cannot fail. Effects that find
//! nothing to act on (removing a wall that is not there) succeed without
//! changing the board and report `false`.

use super::error::CommandError;
use super::state::GameState;
use crate::board::CellKey;
use crate::coins::{CoinEffect, CoinKind};
use crate::core::PlayerId;
use crate::stones::{Destination, StonePosition, StoneRef};

impl GameState {
    pub(super) fn validate_effect(&self, effect: &CoinEffect, chooser: PlayerId) -> Result<(), CommandError> {
        match effect {
            CoinEffect::SpinRing { ring, .. } | CoinEffect::ResetRing { ring } => {
                if self.rings.is_locked(*ring) {
                    return Err(CommandError::RingLocked(*ring));
                }
            }
            CoinEffect::PlaceWall { cell } | CoinEffect::PlaceBridge { cell } => {
                if !self.board.cell(*cell).is_bare() {
                    return Err(CommandError::CellNotBare(*cell));
                }
            }
            CoinEffect::ReturnOpponentStone => {
                let opponent = chooser.opponent();
                let mv = self.last_move[opponent].ok_or(CommandError::NothingToReturn)?;
                if self.stones[opponent].position(mv.stone) != mv.to.resulting_position() {
                    return Err(CommandError::NothingToReturn);
                }
                if let Some(from) = mv.from {
                    if self.board.cell(from).is_occupied() {
                        return Err(CommandError::CellOccupied(from));
                    }
                }
            }
            CoinEffect::CopyOpponentCoin { copied } => {
                match self.last_coin[chooser.opponent()] {
                    Some(last) if last != CoinKind::CopyOpponentCoin && last == copied.kind() => {}
                    _ => return Err(CommandError::NothingToCopy),
                }
                self.validate_effect(copied, chooser)?;
            }
            CoinEffect::LockRing { .. }
            | CoinEffect::UnlockRing { .. }
            | CoinEffect::RemoveWall { .. }
            | CoinEffect::RemoveBridge { .. }
            | CoinEffect::TransformWallBridge { .. }
            | CoinEffect::MoveWallBridge { .. }
            | CoinEffect::DisableCoin { .. } => {}
        }
        Ok(())
    }

    /// Apply a validated effect. Returns whether anything changed.
    pub(super) fn execute_effect(&mut self, effect: &CoinEffect, chooser: PlayerId) -> bool {
        match effect {
            CoinEffect::SpinRing { ring, direction } => {
                self.rings.spin(*ring, *direction);
                true
            }
            CoinEffect::ResetRing { ring } => {
                let changed = self.rings.is_rotated(*ring);
                self.rings.reset(*ring);
                changed
            }
            CoinEffect::LockRing { ring } => {
                let changed = !self.rings.is_locked(*ring);
                self.rings.lock(*ring);
                changed
            }
            CoinEffect::UnlockRing { ring } => {
                let changed = self.rings.is_locked(*ring);
                self.rings.unlock(*ring);
                changed
            }
            CoinEffect::PlaceWall { cell } => {
                self.board.set_wall(*cell, true);
                true
            }
            CoinEffect::PlaceBridge { cell } => {
                self.board.set_bridge(*cell, true);
                true
            }
            CoinEffect::RemoveWall { cell } => {
                let changed = self.board.cell(*cell).has_wall;
                self.board.set_wall(*cell, false);
                changed
            }
            CoinEffect::RemoveBridge { cell } => {
                let changed = self.board.cell(*cell).has_bridge;
                self.board.set_bridge(*cell, false);
                changed
            }
            CoinEffect::TransformWallBridge { cell } => self.transform_barrier(*cell),
            CoinEffect::MoveWallBridge { from, to } => self.move_barrier(*from, *to),
            CoinEffect::ReturnOpponentStone => self.return_opponent_stone(chooser),
            CoinEffect::DisableCoin { coin } => {
                self.magna_disabled = Some(*coin);
                true
            }
            CoinEffect::CopyOpponentCoin { copied } => self.execute_effect(copied, chooser),
        }
    }

    fn transform_barrier(&mut self, cell: CellKey) -> bool {
        let current = *self.board.cell(cell);
        if current.has_wall {
            self.board.set_wall(cell, false);
            self.board.set_bridge(cell, true);
            true
        } else if current.has_bridge {
            self.board.set_bridge(cell, false);
            self.board.set_wall(cell, true);
            true
        } else {
            false
        }
    }

    /// Relocate whichever barrier `from` carries. No-op if the destination
    /// already has one.
    fn move_barrier(&mut self, from: CellKey, to: CellKey) -> bool {
        let source = *self.board.cell(from);
        if from == to || !source.has_barrier() || self.board.cell(to).has_barrier() {
            return false;
        }
        self.board.set_wall(from, false);
        self.board.set_bridge(from, false);
        self.board.set_wall(to, source.has_wall);
        self.board.set_bridge(to, source.has_bridge);
        true
    }

    /// Undo the opponent's last stone move. Their history entry is cleared
    /// so the same move cannot be undone twice.
    fn return_opponent_stone(&mut self, chooser: PlayerId) -> bool {
        let opponent = chooser.opponent();
        let Some(mv) = self.last_move[opponent].take() else {
            return false;
        };

        match mv.to {
            Destination::Cell(key) => self.board.set_stone(key, None),
            Destination::Goal => self.score[opponent] = self.score[opponent].saturating_sub(1),
        }

        let restored = match mv.from {
            Some(from) => {
                self.board.set_stone(from, Some(StoneRef::new(opponent, mv.stone)));
                StonePosition::OnBoard(from)
            }
            None => StonePosition::Unplaced,
        };
        self.stones[opponent].set_position(mv.stone, restored);
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::board::{CellKey, RingId, SpinDirection};
    use crate::coins::{CoinEffect, CoinKind};
    use crate::core::{GameConfig, PlayerId};
    use crate::game::{CommandError, GameCommands, GameState};
    use crate::stones::{Destination, StoneId, StonePosition};

    fn key(ring: u8, cell: usize) -> CellKey {
        CellKey::new(RingId::new(ring).unwrap(), cell).unwrap()
    }

    fn stone(i: u8) -> StoneId {
        StoneId::new(i).unwrap()
    }

    /// Select `coin`, apply `effect`, complete.
    fn spend(game: &mut GameState, coin: CoinKind, effect: CoinEffect) -> Result<(), CommandError> {
        game.select_coin(coin)?;
        game.apply_coin_effect(effect)?;
        game.complete_coin_action()?;
        Ok(())
    }

    /// Finish the current turn with a placement and a wall.
    fn pass_turn(game: &mut GameState, place: CellKey, wall: CellKey) {
        let id = game.stones(game.turn()).first_unplaced().unwrap();
        game.move_stone(id, Destination::Cell(place)).unwrap();
        spend(game, CoinKind::PlaceWall, CoinEffect::PlaceWall { cell: wall }).unwrap();
        game.end_turn().unwrap();
    }

    #[test]
    fn test_transform_toggles_barrier() {
        let mut game = GameState::new(&GameConfig::default());
        game.board.set_wall(key(2, 2), true);

        assert!(game.execute_effect(&CoinEffect::TransformWallBridge { cell: key(2, 2) }, PlayerId::One));
        let cell = game.board().cell(key(2, 2));
        assert!(cell.has_bridge && !cell.has_wall);

        assert!(game.execute_effect(&CoinEffect::TransformWallBridge { cell: key(2, 2) }, PlayerId::One));
        let cell = game.board().cell(key(2, 2));
        assert!(cell.has_wall && !cell.has_bridge);

        assert!(!game.execute_effect(&CoinEffect::TransformWallBridge { cell: key(2, 3) }, PlayerId::One));
        assert!(game.board().cell(key(2, 3)).is_bare());
    }

    #[test]
    fn test_move_barrier() {
        let mut game = GameState::new(&GameConfig::default());
        game.board.set_bridge(key(4, 3), true);

        let effect = CoinEffect::MoveWallBridge { from: key(4, 3), to: key(4, 0) };
        assert!(game.execute_effect(&effect, PlayerId::One));
        assert!(!game.board().cell(key(4, 3)).has_bridge);
        assert!(game.board().cell(key(4, 0)).has_bridge);
    }

    #[test]
    fn test_move_barrier_onto_barrier_is_noop() {
        let mut game = GameState::new(&GameConfig::default());
        game.board.set_wall(key(0, 0), true);
        game.board.set_bridge(key(0, 1), true);

        let effect = CoinEffect::MoveWallBridge { from: key(0, 0), to: key(0, 1) };
        assert!(!game.execute_effect(&effect, PlayerId::One));
        assert!(game.board().cell(key(0, 0)).has_wall);
        assert!(!game.board().cell(key(0, 1)).has_wall);
    }

    #[test]
    fn test_place_wall_requires_bare_cell() {
        let mut game = GameState::new(&GameConfig::default());
        game.board.set_bridge(key(1, 4), true);

        game.use_coin("Murus").unwrap();
        let err = game.apply_coin_effect(CoinEffect::PlaceWall { cell: key(1, 4) }).unwrap_err();
        assert_eq!(err, CommandError::CellNotBare(key(1, 4)));
        assert!(!game.board().cell(key(1, 4)).has_wall);
    }

    #[test]
    fn test_spin_locked_ring_rejected() {
        let mut game = GameState::new(&GameConfig::default());
        game.rings.lock(RingId::OUTER);

        game.use_coin("Rota").unwrap();
        let err = game
            .apply_coin_effect(CoinEffect::SpinRing { ring: RingId::OUTER, direction: SpinDirection::Clockwise })
            .unwrap_err();
        assert_eq!(err, CommandError::RingLocked(RingId::OUTER));
        assert_eq!(game.rings().degrees(RingId::OUTER), 0.0);
    }

    #[test]
    fn test_return_opponent_stone_to_previous_cell() {
        let mut game = GameState::new(&GameConfig::default());
        pass_turn(&mut game, key(0, 1), key(3, 0));
        pass_turn(&mut game, key(0, 9), key(3, 1));

        // Player 1 advances its stone; player 2 sends it back.
        game.move_stone(stone(0), Destination::Cell(key(1, 0))).unwrap();
        spend(&mut game, CoinKind::PlaceBridge, CoinEffect::PlaceBridge { cell: key(2, 5) }).unwrap();
        game.end_turn().unwrap();

        game.move_stone(stone(0), Destination::Cell(key(1, 7))).unwrap();
        spend(&mut game, CoinKind::ReturnOpponentStone, CoinEffect::ReturnOpponentStone).unwrap();

        assert_eq!(game.stones(PlayerId::One).position(stone(0)), StonePosition::OnBoard(key(0, 1)));
        assert!(game.board().cell(key(0, 1)).is_occupied());
        assert!(!game.board().cell(key(1, 0)).is_occupied());
        assert_eq!(game.last_move(PlayerId::One), None);
    }

    #[test]
    fn test_copy_replays_opponent_coin() {
        let mut game = GameState::new(&GameConfig::default());
        pass_turn(&mut game, key(0, 1), key(3, 0));

        // Player 2 spins ring 2
        game.move_stone(stone(0), Destination::Cell(key(0, 2))).unwrap();
        let spin = CoinEffect::SpinRing { ring: RingId::new(2).unwrap(), direction: SpinDirection::Clockwise };
        spend(&mut game, CoinKind::SpinRing, spin.clone()).unwrap();
        game.end_turn().unwrap();

        // Round 2: player 1 copies it
        game.move_stone(stone(1), Destination::Cell(key(0, 3))).unwrap();
        spend(&mut game, CoinKind::CopyOpponentCoin, CoinEffect::copy_of(spin)).unwrap();

        assert!((game.rings().degrees(RingId::new(2).unwrap()) - 45.0).abs() < 1e-9);
        assert_eq!(game.last_coin(PlayerId::One), Some(CoinKind::CopyOpponentCoin));
    }

    #[test]
    fn test_copy_must_match_opponent_coin() {
        let mut game = GameState::new(&GameConfig::default());
        pass_turn(&mut game, key(0, 1), key(3, 0));
        game.move_stone(stone(0), Destination::Cell(key(0, 2))).unwrap();
        spend(&mut game, CoinKind::PlaceBridge, CoinEffect::PlaceBridge { cell: key(3, 1) }).unwrap();
        game.end_turn().unwrap();

        game.use_coin("Speculum").unwrap();
        let err = game
            .apply_coin_effect(CoinEffect::copy_of(CoinEffect::LockRing { ring: RingId::OUTER }))
            .unwrap_err();
        assert_eq!(err, CommandError::NothingToCopy);
    }

    #[test]
    fn test_disable_coin_sets_magna() {
        let mut game = GameState::new(&GameConfig::default());
        spend(&mut game, CoinKind::DisableCoin, CoinEffect::DisableCoin { coin: CoinKind::SpinRing }).unwrap();
        assert_eq!(game.magna_disabled(), Some(CoinKind::SpinRing));
    }
}
