use crate::board::{Board, BoardConfig};
use crate::creature::{Creature, CreatureDef};
use crate::piece::{Piece, PieceId};
use std::sync::Arc;
use tracing::debug;

/// The scripted opponent. Its creatures are the items of its board, so a creature and
/// its board piece are always added and removed together.
pub struct Opponent {
    pub board: Board<Creature>,
}

impl Opponent {
    pub fn new(board: BoardConfig) -> Self {
        Self {
            board: Board::new(board),
        }
    }

    pub fn spawn_creature(&mut self, def: Arc<CreatureDef>) -> PieceId {
        let id = self.board.add_piece(Creature::from_def(def));
        debug!(?id, "spawned creature");
        id
    }

    pub fn destroy_creature(&mut self, id: PieceId) -> Option<Creature> {
        self.board.remove_piece(id)
    }

    pub fn creature(&self, id: PieceId) -> Option<&Creature> {
        self.board.get(id).map(|piece| &piece.item)
    }

    pub fn creature_mut(&mut self, id: PieceId) -> Option<&mut Creature> {
        self.board.get_mut(id).map(|piece| &mut piece.item)
    }

    pub fn creatures(&self) -> impl Iterator<Item = &Piece<Creature>> {
        self.board.iter()
    }

    pub fn creature_count(&self) -> usize {
        self.board.len()
    }

    /// Removes every creature whose health has dropped to zero or below.
    pub fn sweep_defeated(&mut self) -> Vec<(PieceId, Creature)> {
        let defeated = self.board.remove_where(Creature::is_defeated);
        for (id, creature) in &defeated {
            debug!(?id, name = creature.name(), "creature defeated");
        }
        defeated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goblin() -> Arc<CreatureDef> {
        Arc::new(CreatureDef::new("Goblin", 3, 2))
    }

    #[test]
    fn creatures_and_board_pieces_stay_in_sync() {
        let mut opponent = Opponent::new(BoardConfig::default());
        let first = opponent.spawn_creature(goblin());
        let second = opponent.spawn_creature(goblin());
        assert_eq!(opponent.creature_count(), 2);

        let removed = opponent.destroy_creature(first).unwrap();
        assert_eq!(removed.name(), "Goblin");
        assert_eq!(opponent.board.ids(), vec![second]);
        assert!(opponent.creature(first).is_none());
        assert!(opponent.destroy_creature(first).is_none());
    }

    #[test]
    fn sweep_removes_only_defeated_creatures() {
        let mut opponent = Opponent::new(BoardConfig::default());
        let ids: Vec<PieceId> = (0..3).map(|_| opponent.spawn_creature(goblin())).collect();

        opponent.creature_mut(ids[0]).unwrap().set_health(0);
        opponent.creature_mut(ids[2]).unwrap().set_health(-4);

        let swept: Vec<PieceId> = opponent.sweep_defeated().into_iter().map(|(id, _)| id).collect();
        assert_eq!(swept, vec![ids[0], ids[2]]);
        assert_eq!(opponent.board.ids(), vec![ids[1]]);
        assert!(opponent.sweep_defeated().is_empty());
    }
}
