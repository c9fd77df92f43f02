use crate::piece::PieceId;
use crate::table::Table;
use crate::turn::TurnOrchestrator;
use glam::Vec3;
use tracing::debug;

/// Input sampled once per tick. `pointer` is in world space on the z = 0 plane.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputFrame {
    pub pointer: Vec3,
    pub pointer_down: bool,
    pub pointer_up: bool,
    pub end_turn: bool,
}

/// Turns pointer input into board requests and plays. Does nothing outside the
/// player's turn.
#[derive(Debug, Default)]
pub struct PlayerController {
    selected_card: Option<PieceId>,
    target_creature: Option<PieceId>,
}

impl PlayerController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_card(&self) -> Option<PieceId> {
        self.selected_card
    }

    pub fn target_creature(&self) -> Option<PieceId> {
        self.target_creature
    }

    pub fn update(
        &mut self,
        input: &InputFrame,
        table: &mut Table,
        orchestrator: &mut TurnOrchestrator,
    ) {
        if !table.player.is_active_turn() {
            self.selected_card = None;
            self.target_creature = None;
            return;
        }

        if input.end_turn {
            self.selected_card = None;
            if let Err(err) = orchestrator.end_turn(table) {
                debug!(%err, "end of turn rejected");
            }
            return;
        }

        let hovered_card = table.player.hand.nearest_piece_to(input.pointer);
        table.player.hand.set_focus(hovered_card);

        self.target_creature = table.opponent.board.nearest_piece_to(input.pointer);
        table.opponent.board.set_focus(self.target_creature);

        if input.pointer_down {
            self.selected_card = hovered_card;
        }

        if input.pointer_up {
            if let Some(card) = self.selected_card.take() {
                if let Err(err) = orchestrator.try_play_card(table, card, self.target_creature) {
                    debug!(%err, "card play rejected");
                }
            }
            return;
        }

        if let Some(card) = self.selected_card {
            if !table.player.hand.set_drag(card, input.pointer) {
                self.selected_card = None;
            }
        }
    }
}
