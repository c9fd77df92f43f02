use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetKind {
    Actor,
    SingleTarget,
    AllOfKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    ChangeHealth,
    ChangeStrength,
    ChangeMana,
    DrawCard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardEffect {
    pub target: TargetKind,
    pub kind: EffectKind,
    pub magnitude: i32,
}

impl CardEffect {
    pub fn new(target: TargetKind, kind: EffectKind, magnitude: i32) -> Self {
        Self {
            target,
            kind,
            magnitude,
        }
    }
}

/// Immutable card template. Runtime copies share it through `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub mana_cost: i32,
    #[serde(default)]
    pub effects: Vec<CardEffect>,
}

impl CardDef {
    pub fn new(name: impl Into<String>, mana_cost: i32, effects: Vec<CardEffect>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            mana_cost,
            effects,
        }
    }
}
