use crate::card::CardDef;
use crate::config::{PacingConfig, RulesConfig};
use crate::effect;
use crate::opponent::Opponent;
use crate::piece::PieceId;
use crate::table::Table;
use glam::Vec3;
use std::sync::Arc;
use tracing::info;

/// What a sequence asks of the scheduler after one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Resume once this many seconds of simulation time have passed.
    Wait(f32),
    /// Resume on the next tick.
    Yield,
    Done,
}

/// A resumable, multi-step piece of game logic. Each call to `resume` runs exactly one
/// step against the table and reports when the next step may run.
pub trait Sequence: Send {
    fn resume(&mut self, table: &mut Table) -> Step;

    fn label(&self) -> &'static str;
}

/// Starts a player turn: shuffle on the first turn, then draw.
pub struct TurnStart {
    opening_hand: usize,
    draws_per_turn: usize,
}

impl TurnStart {
    pub fn new(rules: &RulesConfig) -> Self {
        Self {
            opening_hand: rules.opening_hand,
            draws_per_turn: rules.draws_per_turn,
        }
    }
}

impl Sequence for TurnStart {
    fn resume(&mut self, table: &mut Table) -> Step {
        let Table { player, rng, .. } = table;
        player.begin_turn(rng, self.opening_hand, self.draws_per_turn);
        Step::Done
    }

    fn label(&self) -> &'static str {
        "turn-start"
    }
}

/// Applies a played card's effects one at a time, then removes defeated creatures.
pub struct ResolveCard {
    card: Arc<CardDef>,
    target: Option<PieceId>,
    next_effect: usize,
    swept: bool,
    effect_delay: f32,
    settle_delay: f32,
}

impl ResolveCard {
    pub fn new(card: Arc<CardDef>, target: Option<PieceId>, pacing: &PacingConfig) -> Self {
        Self {
            card,
            target,
            next_effect: 0,
            swept: false,
            effect_delay: pacing.effect_delay,
            settle_delay: pacing.settle_delay,
        }
    }
}

impl Sequence for ResolveCard {
    fn resume(&mut self, table: &mut Table) -> Step {
        if let Some(card_effect) = self.card.effects.get(self.next_effect) {
            self.next_effect += 1;
            effect::resolve(card_effect, self.target, table);
            return Step::Wait(self.effect_delay);
        }

        if !self.swept {
            self.swept = true;
            table.opponent.sweep_defeated();
            return Step::Wait(self.settle_delay);
        }

        Step::Done
    }

    fn label(&self) -> &'static str {
        "resolve-card"
    }
}

/// The scripted opponent turn: every creature on the board at the start of the turn
/// strikes the player once, in board order.
pub struct OpponentAttack {
    order: Vec<PieceId>,
    next: usize,
    attacking: Option<PieceId>,
    attack_offset: Vec3,
    attack_delay: f32,
    settled: bool,
}

impl OpponentAttack {
    pub fn new(opponent: &Opponent, rules: &RulesConfig, pacing: &PacingConfig) -> Self {
        Self {
            order: opponent.board.ids(),
            next: 0,
            attacking: None,
            attack_offset: rules.attack_offset,
            attack_delay: pacing.attack_delay,
            settled: false,
        }
    }
}

impl Sequence for OpponentAttack {
    fn resume(&mut self, table: &mut Table) -> Step {
        if let Some(id) = self.attacking.take() {
            if let Some(piece) = table.opponent.board.get_mut(id) {
                piece.offset = Vec3::ZERO;
            }
        }

        while let Some(&id) = self.order.get(self.next) {
            self.next += 1;
            let Some(piece) = table.opponent.board.get_mut(id) else {
                continue;
            };
            if piece.item.is_defeated() {
                continue;
            }

            piece.offset = self.attack_offset;
            let strength = piece.item.strength;
            let health = table.player.health.saturating_sub(strength);
            table.player.set_health(health);
            info!(creature = piece.item.name(), strength, health, "creature attacks");

            self.attacking = Some(id);
            return Step::Wait(self.attack_delay);
        }

        // One more frame so the last creature's offset is restored before the next turn.
        if !self.settled {
            self.settled = true;
            return Step::Yield;
        }

        Step::Done
    }

    fn label(&self) -> &'static str {
        "opponent-attack"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardConfig;
    use crate::card::{CardEffect, EffectKind, TargetKind};
    use crate::creature::CreatureDef;
    use crate::player::{DeckPolicy, Player};
    use fastrand::Rng;

    fn table_with_creatures(stats: &[(i32, i32)]) -> (Table, Vec<PieceId>) {
        let deck = (0..5)
            .map(|i| Arc::new(CardDef::new(format!("card-{i}"), 1, Vec::new())))
            .collect();
        let player = Player::new(20, 5, deck, BoardConfig::default(), DeckPolicy::SkipDraw);
        let mut opponent = Opponent::new(BoardConfig::default());
        let ids = stats
            .iter()
            .map(|&(health, strength)| {
                opponent.spawn_creature(Arc::new(CreatureDef::new("Imp", health, strength)))
            })
            .collect();
        (Table::new(player, opponent, Rng::with_seed(3)), ids)
    }

    #[test]
    fn turn_start_draws_and_finishes_in_one_step() {
        let (mut table, _) = table_with_creatures(&[]);
        let mut sequence = TurnStart::new(&RulesConfig::default());

        assert_eq!(sequence.resume(&mut table), Step::Done);
        assert_eq!(table.player.turn_index(), 1);
        assert_eq!(table.player.hand.len(), 3);
    }

    #[test]
    fn resolve_card_paces_each_effect_before_sweeping() {
        let (mut table, ids) = table_with_creatures(&[(3, 1), (5, 1)]);
        let card = Arc::new(CardDef::new(
            "Double Strike",
            2,
            vec![
                CardEffect::new(TargetKind::SingleTarget, EffectKind::ChangeHealth, -2),
                CardEffect::new(TargetKind::SingleTarget, EffectKind::ChangeHealth, -2),
            ],
        ));
        let mut sequence = ResolveCard::new(card, Some(ids[0]), &PacingConfig::default());

        assert_eq!(sequence.resume(&mut table), Step::Wait(0.25));
        assert_eq!(table.opponent.creature(ids[0]).unwrap().health, 1);

        assert_eq!(sequence.resume(&mut table), Step::Wait(0.25));
        assert_eq!(table.opponent.creature(ids[0]).unwrap().health, -1);
        assert_eq!(table.opponent.creature_count(), 2);

        assert_eq!(sequence.resume(&mut table), Step::Wait(1.0));
        assert_eq!(table.opponent.board.ids(), vec![ids[1]]);

        assert_eq!(sequence.resume(&mut table), Step::Done);
    }

    #[test]
    fn opponent_attack_strikes_in_order_and_restores_offsets() {
        let (mut table, ids) = table_with_creatures(&[(3, 2), (3, 5)]);
        let mut sequence =
            OpponentAttack::new(&table.opponent, &RulesConfig::default(), &PacingConfig::default());

        assert_eq!(sequence.resume(&mut table), Step::Wait(0.25));
        assert_eq!(table.player.health, 18);
        assert_eq!(table.opponent.board.get(ids[0]).unwrap().offset, Vec3::NEG_Y);

        assert_eq!(sequence.resume(&mut table), Step::Wait(0.25));
        assert_eq!(table.player.health, 13);
        assert_eq!(table.opponent.board.get(ids[0]).unwrap().offset, Vec3::ZERO);
        assert_eq!(table.opponent.board.get(ids[1]).unwrap().offset, Vec3::NEG_Y);

        assert_eq!(sequence.resume(&mut table), Step::Yield);
        assert_eq!(table.opponent.board.get(ids[1]).unwrap().offset, Vec3::ZERO);
        assert_eq!(sequence.resume(&mut table), Step::Done);
    }

    #[test]
    fn opponent_attack_skips_creatures_removed_mid_sequence() {
        let (mut table, ids) = table_with_creatures(&[(3, 2), (3, 4)]);
        let mut sequence =
            OpponentAttack::new(&table.opponent, &RulesConfig::default(), &PacingConfig::default());

        table.opponent.destroy_creature(ids[1]);
        assert_eq!(sequence.resume(&mut table), Step::Wait(0.25));
        assert_eq!(sequence.resume(&mut table), Step::Yield);
        assert_eq!(table.player.health, 18);
    }

    #[test]
    fn empty_opponent_turn_still_waits_one_frame() {
        let (mut table, _) = table_with_creatures(&[]);
        let mut sequence =
            OpponentAttack::new(&table.opponent, &RulesConfig::default(), &PacingConfig::default());

        assert_eq!(sequence.resume(&mut table), Step::Yield);
        assert_eq!(sequence.resume(&mut table), Step::Done);
        assert_eq!(table.player.health, 20);
    }
}
