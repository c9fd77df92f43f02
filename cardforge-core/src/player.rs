use crate::board::{Board, BoardConfig};
use crate::card::CardDef;
use crate::piece::PieceId;
use fastrand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// What happens when a draw is required and the deck has run out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeckPolicy {
    #[default]
    SkipDraw,
    ReshuffleDiscard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DrawError {
    #[error("deck is empty")]
    DeckEmpty,
}

pub type Hand = Board<Arc<CardDef>>;

pub struct Player {
    pub health: i32,
    pub mana: i32,
    pub hand: Hand,
    starting_deck: Vec<Arc<CardDef>>,
    deck: Vec<Arc<CardDef>>,
    discard: Vec<Arc<CardDef>>,
    turn_index: u32,
    is_active_turn: bool,
    deck_policy: DeckPolicy,
}

impl Player {
    pub fn new(
        health: i32,
        mana: i32,
        starting_deck: Vec<Arc<CardDef>>,
        hand: BoardConfig,
        deck_policy: DeckPolicy,
    ) -> Self {
        Self {
            health,
            mana,
            hand: Board::new(hand),
            starting_deck,
            deck: Vec::new(),
            discard: Vec::new(),
            turn_index: 0,
            is_active_turn: false,
            deck_policy,
        }
    }

    pub fn starting_deck(&self) -> &[Arc<CardDef>] {
        &self.starting_deck
    }

    /// Remaining draw pile; the top of the deck is the last element.
    pub fn deck(&self) -> &[Arc<CardDef>] {
        &self.deck
    }

    pub fn discard(&self) -> &[Arc<CardDef>] {
        &self.discard
    }

    pub fn turn_index(&self) -> u32 {
        self.turn_index
    }

    pub fn is_active_turn(&self) -> bool {
        self.is_active_turn
    }

    pub fn set_active_turn(&mut self, active: bool) {
        self.is_active_turn = active;
    }

    pub fn set_health(&mut self, amount: i32) {
        self.health = amount;
    }

    pub fn set_mana(&mut self, amount: i32) {
        self.mana = amount;
    }

    pub fn card_in_hand(&self, id: PieceId) -> Option<&Arc<CardDef>> {
        self.hand.get(id).map(|piece| &piece.item)
    }

    /// Advances the turn counter and draws for the new turn. The first turn shuffles the
    /// starting deck and draws an opening hand. Returns how many cards were drawn.
    pub fn begin_turn(
        &mut self,
        rng: &mut Rng,
        opening_hand: usize,
        draws_per_turn: usize,
    ) -> usize {
        self.turn_index += 1;
        let draws = if self.turn_index == 1 {
            self.shuffle_starting_deck(rng);
            opening_hand
        } else {
            draws_per_turn
        };
        info!(turn = self.turn_index, draws, "player turn begins");

        let mut drawn = 0;
        for _ in 0..draws {
            match self.draw_card(rng) {
                Ok(_) => drawn += 1,
                Err(err) => {
                    warn!(turn = self.turn_index, "skipping draw: {err}");
                    break;
                }
            }
        }
        drawn
    }

    pub fn shuffle_starting_deck(&mut self, rng: &mut Rng) {
        let mut remaining = self.starting_deck.clone();
        while !remaining.is_empty() {
            let index = rng.usize(..remaining.len());
            self.deck.push(remaining.remove(index));
        }
    }

    pub fn draw_card(&mut self, rng: &mut Rng) -> Result<PieceId, DrawError> {
        if self.deck.is_empty() && self.deck_policy == DeckPolicy::ReshuffleDiscard {
            self.recycle_discard(rng);
        }

        let card = self.deck.pop().ok_or(DrawError::DeckEmpty)?;
        debug!(card = %card.name, remaining = self.deck.len(), "drew card");
        Ok(self.hand.add_piece(card))
    }

    /// Moves a card from the hand to the discard pile. Unknown ids are ignored.
    pub fn discard_card(&mut self, id: PieceId) -> Option<Arc<CardDef>> {
        let card = self.hand.remove_piece(id)?;
        self.discard.push(Arc::clone(&card));
        Some(card)
    }

    fn recycle_discard(&mut self, rng: &mut Rng) {
        if self.discard.is_empty() {
            return;
        }
        let mut recycled = std::mem::take(&mut self.discard);
        rng.shuffle(&mut recycled);
        info!(cards = recycled.len(), "reshuffling discard pile into deck");
        self.deck.extend(recycled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{CardEffect, EffectKind, TargetKind};

    fn card(name: &str) -> Arc<CardDef> {
        Arc::new(CardDef::new(
            name,
            1,
            vec![CardEffect::new(TargetKind::Actor, EffectKind::ChangeMana, 1)],
        ))
    }

    fn player_with(names: &[&str], policy: DeckPolicy) -> Player {
        let deck = names.iter().map(|name| card(name)).collect();
        Player::new(20, 3, deck, BoardConfig::default(), policy)
    }

    fn sorted_names(cards: impl IntoIterator<Item = Arc<CardDef>>) -> Vec<String> {
        let mut names: Vec<String> = cards.into_iter().map(|card| card.name.clone()).collect();
        names.sort();
        names
    }

    fn hand_names(player: &Player) -> Vec<String> {
        sorted_names(player.hand.iter().map(|piece| Arc::clone(&piece.item)))
    }

    #[test]
    fn shuffle_is_a_permutation_of_the_starting_deck() {
        let names = ["A", "B", "B", "C", "D", "E", "F"];
        for seed in 0..20 {
            let mut player = player_with(&names, DeckPolicy::SkipDraw);
            let mut rng = Rng::with_seed(seed);
            player.shuffle_starting_deck(&mut rng);

            assert_eq!(player.deck().len(), names.len());
            assert_eq!(
                sorted_names(player.deck().iter().cloned()),
                sorted_names(player.starting_deck().iter().cloned())
            );
        }
    }

    #[test]
    fn shuffle_depends_on_the_rng() {
        let names: Vec<String> = (0..12).map(|i| format!("card-{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let order = |seed| {
            let mut player = player_with(&refs, DeckPolicy::SkipDraw);
            player.shuffle_starting_deck(&mut Rng::with_seed(seed));
            player.deck().iter().map(|card| card.name.clone()).collect::<Vec<_>>()
        };
        assert_eq!(order(3), order(3));
        assert!((0..10).any(|seed| order(seed) != order(seed + 100)));
    }

    #[test]
    fn first_turn_draws_the_whole_three_card_deck() {
        let mut player = player_with(&["A", "B", "C"], DeckPolicy::SkipDraw);
        let drawn = player.begin_turn(&mut Rng::with_seed(1), 3, 1);

        assert_eq!(drawn, 3);
        assert_eq!(player.turn_index(), 1);
        assert_eq!(hand_names(&player), vec!["A", "B", "C"]);
        assert!(player.deck().is_empty());
        assert!(player.discard().is_empty());
    }

    #[test]
    fn later_turns_draw_one_card() {
        let mut player = player_with(&["A", "B", "C", "D", "E"], DeckPolicy::SkipDraw);
        let mut rng = Rng::with_seed(9);
        player.begin_turn(&mut rng, 3, 1);
        let drawn = player.begin_turn(&mut rng, 3, 1);

        assert_eq!(drawn, 1);
        assert_eq!(player.turn_index(), 2);
        assert_eq!(player.hand.len(), 4);
        assert_eq!(player.deck().len(), 1);
    }

    #[test]
    fn empty_deck_skips_the_draw() {
        let mut player = player_with(&["A"], DeckPolicy::SkipDraw);
        let mut rng = Rng::with_seed(2);
        assert_eq!(player.begin_turn(&mut rng, 3, 1), 1);
        assert_eq!(player.begin_turn(&mut rng, 3, 1), 0);
        assert_eq!(player.draw_card(&mut rng), Err(DrawError::DeckEmpty));
        assert_eq!(player.hand.len(), 1);
        assert_eq!(player.turn_index(), 2);
    }

    #[test]
    fn discard_moves_card_out_of_hand() {
        let mut player = player_with(&["A", "B"], DeckPolicy::SkipDraw);
        let mut rng = Rng::with_seed(4);
        let id = player.draw_card(&mut rng).unwrap();
        let name = player.card_in_hand(id).unwrap().name.clone();

        let discarded = player.discard_card(id).unwrap();
        assert_eq!(discarded.name, name);
        assert!(player.hand.is_empty());
        assert_eq!(player.discard().len(), 1);
        assert!(player.discard_card(id).is_none());
        assert_eq!(player.discard().len(), 1);
    }

    #[test]
    fn reshuffle_policy_recycles_the_discard_pile() {
        let mut player = player_with(&["A", "B"], DeckPolicy::ReshuffleDiscard);
        let mut rng = Rng::with_seed(5);
        player.begin_turn(&mut rng, 2, 1);
        for id in player.hand.ids() {
            player.discard_card(id);
        }
        assert!(player.deck().is_empty());

        assert!(player.draw_card(&mut rng).is_ok());
        assert_eq!(player.hand.len(), 1);
        assert_eq!(player.deck().len(), 1);
        assert!(player.discard().is_empty());
    }

    #[test]
    fn reshuffle_policy_still_reports_exhaustion() {
        let mut player = player_with(&[], DeckPolicy::ReshuffleDiscard);
        assert_eq!(
            player.draw_card(&mut Rng::with_seed(0)),
            Err(DrawError::DeckEmpty)
        );
    }
}
