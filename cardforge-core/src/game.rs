use crate::config::GameConfig;
use crate::content::ResolvedEncounter;
use crate::controller::{InputFrame, PlayerController};
use crate::layout::LayoutMode;
use crate::opponent::Opponent;
use crate::piece::PieceId;
use crate::player::Player;
use crate::table::Table;
use crate::turn::{PlayError, TurnOrchestrator, TurnPhase};
use fastrand::Rng;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Victory,
    Defeat,
}

/// One encounter: the table, the turn loop driving it and the controller feeding it input.
pub struct Game {
    table: Table,
    orchestrator: TurnOrchestrator,
    controller: PlayerController,
}

impl Game {
    pub fn new(config: &GameConfig, encounter: ResolvedEncounter, seed: u64) -> Self {
        let rules = &config.rules;
        let player = Player::new(
            rules.starting_health,
            rules.starting_mana,
            encounter.starting_deck,
            config.hand,
            rules.deck_policy,
        );

        let mut opponent = Opponent::new(config.opponent_board);
        for def in encounter.opponent_creatures {
            opponent.spawn_creature(def);
        }

        Self {
            table: Table::new(player, opponent, Rng::with_seed(seed)),
            orchestrator: TurnOrchestrator::new(config.rules, config.pacing),
            controller: PlayerController::new(),
        }
    }

    pub fn start(&mut self) {
        if self.orchestrator.begin(&mut self.table) {
            info!(
                deck = self.table.player.starting_deck().len(),
                creatures = self.table.opponent.creature_count(),
                "encounter started"
            );
        }
    }

    pub fn set_hand_layout(&mut self, layout: LayoutMode) {
        self.table.player.hand.set_layout(layout);
    }

    /// Advances one simulation step: input, then the turn loop, then piece motion.
    pub fn tick(&mut self, delta_seconds: f32, input: &InputFrame) {
        self.controller.update(input, &mut self.table, &mut self.orchestrator);
        self.orchestrator.tick(&mut self.table, delta_seconds);
        self.table.tick_boards(delta_seconds);
    }

    pub fn try_play_card(
        &mut self,
        card: PieceId,
        target: Option<PieceId>,
    ) -> Result<(), PlayError> {
        self.orchestrator.try_play_card(&mut self.table, card, target)
    }

    pub fn end_turn(&mut self) -> Result<(), PlayError> {
        self.orchestrator.end_turn(&mut self.table)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        if self.table.player.health <= 0 {
            Some(Outcome::Defeat)
        } else if self.table.opponent.board.is_empty() {
            Some(Outcome::Victory)
        } else {
            None
        }
    }

    pub fn phase(&self) -> TurnPhase {
        self.orchestrator.phase()
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn player(&self) -> &Player {
        &self.table.player
    }

    pub fn opponent(&self) -> &Opponent {
        &self.table.opponent
    }

    pub fn orchestrator(&self) -> &TurnOrchestrator {
        &self.orchestrator
    }

    pub fn controller(&self) -> &PlayerController {
        &self.controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{CardDef, CardEffect, EffectKind, TargetKind};
    use crate::config::RulesConfig;
    use crate::creature::CreatureDef;
    use std::sync::Arc;

    const STEP: f32 = 1.0 / 60.0;

    fn encounter(deck: Vec<CardDef>, creatures: usize) -> ResolvedEncounter {
        let goblin = Arc::new(CreatureDef::new("Goblin", 3, 4));
        ResolvedEncounter {
            starting_deck: deck.into_iter().map(Arc::new).collect(),
            opponent_creatures: vec![goblin; creatures],
        }
    }

    fn run(game: &mut Game, seconds: f32) {
        let idle = InputFrame::default();
        for _ in 0..(seconds / STEP).ceil() as usize {
            game.tick(STEP, &idle);
        }
    }

    #[test]
    fn new_game_spawns_opening_creatures_before_the_first_turn() {
        let mut game = Game::new(&GameConfig::default(), encounter(Vec::new(), 3), 1);
        assert_eq!(game.opponent().creature_count(), 3);
        assert_eq!(game.player().turn_index(), 0);
        assert_eq!(game.outcome(), None);

        game.start();
        game.start();
        assert_eq!(game.player().turn_index(), 1);
        assert_eq!(game.phase(), TurnPhase::PlayerActive);
    }

    #[test]
    fn clearing_the_board_is_a_victory() {
        let sweep = CardDef::new(
            "Firestorm",
            2,
            vec![CardEffect::new(TargetKind::AllOfKind, EffectKind::ChangeHealth, -3)],
        );
        let mut game = Game::new(&GameConfig::default(), encounter(vec![sweep], 2), 2);
        game.start();

        let card = game.player().hand.ids()[0];
        game.try_play_card(card, None).unwrap();
        assert_eq!(game.outcome(), None);

        run(&mut game, 1.5);
        assert_eq!(game.outcome(), Some(Outcome::Victory));
        assert_eq!(game.phase(), TurnPhase::PlayerActive);
    }

    #[test]
    fn running_out_of_health_is_a_defeat() {
        let config = GameConfig {
            rules: RulesConfig {
                starting_health: 10,
                ..RulesConfig::default()
            },
            ..GameConfig::default()
        };
        let mut game = Game::new(&config, encounter(Vec::new(), 2), 3);
        game.start();

        game.end_turn().unwrap();
        run(&mut game, 1.0);
        assert_eq!(game.player().health, 2);
        assert_eq!(game.outcome(), None);

        game.end_turn().unwrap();
        run(&mut game, 1.0);
        assert!(game.player().health <= 0);
        assert_eq!(game.outcome(), Some(Outcome::Defeat));
    }

    #[test]
    fn switching_the_hand_layout_reflows_the_cards() {
        let deck = (0..3)
            .map(|i| CardDef::new(format!("card-{i}"), 1, Vec::new()))
            .collect();
        let mut game = Game::new(&GameConfig::default(), encounter(deck, 1), 5);
        game.start();
        run(&mut game, 2.0);
        let hand_y = GameConfig::default().hand.origin.y;
        assert!(game.player().hand.iter().any(|piece| piece.position.y < hand_y - 1e-3));

        game.set_hand_layout(LayoutMode::Horizontal);
        run(&mut game, 2.0);

        assert_eq!(game.player().hand.config().layout, LayoutMode::Horizontal);
        for piece in game.player().hand.iter() {
            assert!((piece.position.y - hand_y).abs() < 1e-3);
            assert_eq!(piece.rotation, crate::Quat::IDENTITY);
        }
    }

    #[test]
    fn pieces_ease_into_their_slots() {
        let mut game = Game::new(&GameConfig::default(), encounter(Vec::new(), 3), 4);
        game.start();
        run(&mut game, 2.0);

        for piece in game.opponent().creatures() {
            assert!(piece.distance_to_destination() < 1e-3);
        }
    }
}
