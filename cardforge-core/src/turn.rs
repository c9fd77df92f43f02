use crate::config::{PacingConfig, RulesConfig};
use crate::piece::PieceId;
use crate::sequence::{OpponentAttack, ResolveCard, Sequence, Step, TurnStart};
use crate::table::Table;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    PlayerTurnStart,
    PlayerActive,
    ResolvingCard,
    OpponentTurn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlayError {
    #[error("it is not the player's turn")]
    NotPlayerTurn,
    #[error("another card is still resolving")]
    ResolutionInProgress,
    #[error("card {0:?} is not in the hand")]
    CardNotInHand(PieceId),
    #[error("card costs {cost} mana but only {available} is available")]
    InsufficientMana { cost: i32, available: i32 },
}

struct ActiveSequence {
    sequence: Box<dyn Sequence>,
    resume_at: f64,
}

/// Drives the turn loop. At most one sequence runs at a time; it is resumed from `tick`
/// once the simulation clock reaches the time it asked to wait for.
pub struct TurnOrchestrator {
    phase: TurnPhase,
    active: Option<ActiveSequence>,
    clock: f64,
    started: bool,
    end_turn_requested: bool,
    rules: RulesConfig,
    pacing: PacingConfig,
}

impl TurnOrchestrator {
    pub fn new(rules: RulesConfig, pacing: PacingConfig) -> Self {
        Self {
            phase: TurnPhase::PlayerTurnStart,
            active: None,
            clock: 0.0,
            started: false,
            end_turn_requested: false,
            rules,
            pacing,
        }
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn is_resolving(&self) -> bool {
        self.phase == TurnPhase::ResolvingCard
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn active_label(&self) -> Option<&'static str> {
        self.active.as_ref().map(|active| active.sequence.label())
    }

    pub fn end_turn_requested(&self) -> bool {
        self.end_turn_requested
    }

    /// Starts the first player turn. Returns `false` without touching anything once the
    /// turn loop is already running.
    pub fn begin(&mut self, table: &mut Table) -> bool {
        if self.started || self.active.is_some() || table.player.turn_index() > 0 {
            debug!("turn loop already started");
            return false;
        }
        self.started = true;
        self.start_player_turn();
        self.pump(table);
        true
    }

    pub fn tick(&mut self, table: &mut Table, delta_seconds: f32) {
        self.clock += f64::from(delta_seconds.max(0.0));
        self.pump(table);
    }

    /// Pays for and plays a card from the hand. Rejected plays leave every piece of state
    /// untouched. The first effect resolves before this returns.
    pub fn try_play_card(
        &mut self,
        table: &mut Table,
        card_id: PieceId,
        target: Option<PieceId>,
    ) -> Result<(), PlayError> {
        match self.phase {
            TurnPhase::PlayerActive => {}
            TurnPhase::ResolvingCard => return Err(PlayError::ResolutionInProgress),
            TurnPhase::PlayerTurnStart | TurnPhase::OpponentTurn => {
                return Err(PlayError::NotPlayerTurn);
            }
        }

        let card = table
            .player
            .card_in_hand(card_id)
            .cloned()
            .ok_or(PlayError::CardNotInHand(card_id))?;
        let available = table.player.mana;
        if card.mana_cost > available {
            return Err(PlayError::InsufficientMana {
                cost: card.mana_cost,
                available,
            });
        }

        table.player.set_mana(available.saturating_sub(card.mana_cost));
        table.player.discard_card(card_id);
        table.player.set_active_turn(false);
        info!(card = %card.name, cost = card.mana_cost, ?target, "card played");

        let sequence = ResolveCard::new(card, target, &self.pacing);
        self.launch(TurnPhase::ResolvingCard, Box::new(sequence));
        self.pump(table);
        Ok(())
    }

    /// Ends the player's turn. While a card is resolving the request is remembered and the
    /// opponent turn starts once resolution completes.
    pub fn end_turn(&mut self, table: &mut Table) -> Result<(), PlayError> {
        match self.phase {
            TurnPhase::PlayerActive => {
                self.start_opponent_turn(table);
                self.pump(table);
                Ok(())
            }
            TurnPhase::ResolvingCard => {
                self.end_turn_requested = true;
                debug!("end of turn deferred until resolution completes");
                Ok(())
            }
            TurnPhase::PlayerTurnStart | TurnPhase::OpponentTurn => Err(PlayError::NotPlayerTurn),
        }
    }

    fn launch(&mut self, phase: TurnPhase, sequence: Box<dyn Sequence>) {
        debug!(?phase, sequence = sequence.label(), clock = self.clock, "sequence started");
        self.phase = phase;
        self.active = Some(ActiveSequence {
            sequence,
            resume_at: self.clock,
        });
    }

    fn start_player_turn(&mut self) {
        self.end_turn_requested = false;
        self.launch(TurnPhase::PlayerTurnStart, Box::new(TurnStart::new(&self.rules)));
    }

    fn start_opponent_turn(&mut self, table: &mut Table) {
        self.end_turn_requested = false;
        table.player.set_active_turn(false);
        info!(turn = table.player.turn_index(), "opponent turn begins");
        let sequence = OpponentAttack::new(&table.opponent, &self.rules, &self.pacing);
        self.launch(TurnPhase::OpponentTurn, Box::new(sequence));
    }

    /// Runs every step that is due. Follow-up sequences start in the same call, so a
    /// finished turn start hands control to the player without losing a tick.
    fn pump(&mut self, table: &mut Table) {
        while let Some(active) = self.active.as_mut() {
            if active.resume_at > self.clock {
                return;
            }

            match active.sequence.resume(table) {
                Step::Wait(seconds) if seconds > 0.0 => {
                    active.resume_at = self.clock + f64::from(seconds);
                }
                Step::Wait(_) | Step::Yield => {
                    active.resume_at = self.clock;
                    return;
                }
                Step::Done => {
                    self.active = None;
                    self.finish(table);
                }
            }
        }
    }

    fn finish(&mut self, table: &mut Table) {
        match self.phase {
            TurnPhase::PlayerTurnStart => self.enter_player_active(table),
            TurnPhase::ResolvingCard if self.end_turn_requested => self.start_opponent_turn(table),
            TurnPhase::ResolvingCard => self.enter_player_active(table),
            TurnPhase::OpponentTurn => self.start_player_turn(),
            TurnPhase::PlayerActive => {}
        }
    }

    fn enter_player_active(&mut self, table: &mut Table) {
        self.phase = TurnPhase::PlayerActive;
        table.player.set_active_turn(true);
        debug!(turn = table.player.turn_index(), "awaiting player input");
    }
}
