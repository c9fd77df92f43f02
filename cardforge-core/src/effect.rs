use crate::card::{CardEffect, EffectKind, TargetKind};
use crate::creature::Creature;
use crate::piece::PieceId;
use crate::table::Table;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The effect kind does not apply to the requested target kind.
    MismatchedTarget,
    MissingTarget,
    TargetNotFound,
    DeckEmpty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied { affected: usize },
    Skipped(SkipReason),
}

/// Applies one card effect. Health and strength changes land on creatures, mana and
/// draws on the player; any other pairing is skipped without touching the table.
pub fn resolve(effect: &CardEffect, target: Option<PieceId>, table: &mut Table) -> Resolution {
    let resolution = match (effect.kind, effect.target) {
        (EffectKind::ChangeMana, TargetKind::Actor) => {
            let mana = table.player.mana.saturating_add(effect.magnitude);
            table.player.set_mana(mana);
            Resolution::Applied { affected: 1 }
        }
        (EffectKind::DrawCard, TargetKind::Actor) => draw_cards(effect.magnitude, table),
        (EffectKind::ChangeHealth | EffectKind::ChangeStrength, TargetKind::SingleTarget) => {
            match target {
                None => Resolution::Skipped(SkipReason::MissingTarget),
                Some(id) => match table.opponent.creature_mut(id) {
                    Some(creature) => {
                        apply_to_creature(effect, creature);
                        Resolution::Applied { affected: 1 }
                    }
                    None => Resolution::Skipped(SkipReason::TargetNotFound),
                },
            }
        }
        (EffectKind::ChangeHealth | EffectKind::ChangeStrength, TargetKind::AllOfKind) => {
            let mut affected = 0;
            for piece in table.opponent.board.iter_mut() {
                apply_to_creature(effect, &mut piece.item);
                affected += 1;
            }
            Resolution::Applied { affected }
        }
        _ => Resolution::Skipped(SkipReason::MismatchedTarget),
    };

    debug!(?effect, ?target, ?resolution, "resolved effect");
    resolution
}

fn apply_to_creature(effect: &CardEffect, creature: &mut Creature) {
    match effect.kind {
        EffectKind::ChangeHealth => {
            creature.set_health(creature.health.saturating_add(effect.magnitude));
        }
        EffectKind::ChangeStrength => {
            creature.set_strength(creature.strength.saturating_add(effect.magnitude));
        }
        EffectKind::ChangeMana | EffectKind::DrawCard => {}
    }
}

fn draw_cards(count: i32, table: &mut Table) -> Resolution {
    let Table { player, rng, .. } = table;
    let mut drawn = 0;
    for _ in 0..count.max(0) {
        if player.draw_card(rng).is_err() {
            break;
        }
        drawn += 1;
    }

    if drawn == 0 && count > 0 {
        Resolution::Skipped(SkipReason::DeckEmpty)
    } else {
        Resolution::Applied { affected: drawn }
    }
}
