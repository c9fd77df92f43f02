use crate::opponent::Opponent;
use crate::player::Player;
use fastrand::Rng;

/// Shared game state handed explicitly to sequences and effects.
pub struct Table {
    pub player: Player,
    pub opponent: Opponent,
    pub rng: Rng,
}

impl Table {
    pub fn new(player: Player, opponent: Opponent, rng: Rng) -> Self {
        Self {
            player,
            opponent,
            rng,
        }
    }

    pub fn tick_boards(&mut self, delta_seconds: f32) {
        self.player.hand.tick(delta_seconds);
        self.opponent.board.tick(delta_seconds);
    }
}
