use crate::card::CardDef;
use crate::creature::CreatureDef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to parse content: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown card `{0}`")]
    UnknownCard(String),
    #[error("unknown creature `{0}`")]
    UnknownCreature(String),
    #[error("unknown encounter `{0}`")]
    UnknownEncounter(String),
    #[error("card `{name}` has negative mana cost {cost}")]
    NegativeManaCost { name: String, cost: i32 },
    #[error("card `{0}` is defined more than once")]
    DuplicateCard(String),
    #[error("creature `{0}` is defined more than once")]
    DuplicateCreature(String),
}

/// A deck and an opposing line-up, by template name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Encounter {
    pub starting_deck: Vec<String>,
    pub opponent_creatures: Vec<String>,
}

/// An encounter with every name replaced by its shared template.
#[derive(Debug, Clone, Default)]
pub struct ResolvedEncounter {
    pub starting_deck: Vec<Arc<CardDef>>,
    pub opponent_creatures: Vec<Arc<CreatureDef>>,
}

#[derive(Debug, Deserialize)]
struct ContentFile {
    #[serde(default)]
    cards: Vec<CardDef>,
    #[serde(default)]
    creatures: Vec<CreatureDef>,
    #[serde(default)]
    encounters: HashMap<String, Encounter>,
}

/// Card and creature templates, looked up by name.
#[derive(Debug, Clone, Default)]
pub struct ContentLibrary {
    cards: HashMap<String, Arc<CardDef>>,
    creatures: HashMap<String, Arc<CreatureDef>>,
    encounters: HashMap<String, Encounter>,
}

impl ContentLibrary {
    pub fn from_json_str(source: &str) -> Result<Self, ContentError> {
        let file: ContentFile = serde_json::from_str(source)?;
        let mut library = Self {
            encounters: file.encounters,
            ..Self::default()
        };
        for card in file.cards {
            library.insert_card(card)?;
        }
        for creature in file.creatures {
            library.insert_creature(creature)?;
        }
        Ok(library)
    }

    pub fn insert_card(&mut self, card: CardDef) -> Result<(), ContentError> {
        if card.mana_cost < 0 {
            return Err(ContentError::NegativeManaCost {
                cost: card.mana_cost,
                name: card.name,
            });
        }
        if self.cards.contains_key(&card.name) {
            return Err(ContentError::DuplicateCard(card.name));
        }
        self.cards.insert(card.name.clone(), Arc::new(card));
        Ok(())
    }

    pub fn insert_creature(&mut self, creature: CreatureDef) -> Result<(), ContentError> {
        if self.creatures.contains_key(&creature.name) {
            return Err(ContentError::DuplicateCreature(creature.name));
        }
        self.creatures.insert(creature.name.clone(), Arc::new(creature));
        Ok(())
    }

    pub fn card(&self, name: &str) -> Result<Arc<CardDef>, ContentError> {
        self.cards
            .get(name)
            .cloned()
            .ok_or_else(|| ContentError::UnknownCard(name.to_owned()))
    }

    pub fn creature(&self, name: &str) -> Result<Arc<CreatureDef>, ContentError> {
        self.creatures
            .get(name)
            .cloned()
            .ok_or_else(|| ContentError::UnknownCreature(name.to_owned()))
    }

    pub fn encounter(&self, name: &str) -> Result<&Encounter, ContentError> {
        self.encounters
            .get(name)
            .ok_or_else(|| ContentError::UnknownEncounter(name.to_owned()))
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn creature_count(&self) -> usize {
        self.creatures.len()
    }

    pub fn resolve_encounter(
        &self,
        encounter: &Encounter,
    ) -> Result<ResolvedEncounter, ContentError> {
        let starting_deck = encounter
            .starting_deck
            .iter()
            .map(|name| self.card(name))
            .collect::<Result<_, _>>()?;
        let opponent_creatures = encounter
            .opponent_creatures
            .iter()
            .map(|name| self.creature(name))
            .collect::<Result<_, _>>()?;

        Ok(ResolvedEncounter {
            starting_deck,
            opponent_creatures,
        })
    }
}
