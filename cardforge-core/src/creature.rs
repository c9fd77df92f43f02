use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureDef {
    pub name: String,
    pub health: i32,
    pub strength: i32,
}

impl CreatureDef {
    pub fn new(name: impl Into<String>, health: i32, strength: i32) -> Self {
        Self {
            name: name.into(),
            health,
            strength,
        }
    }
}

/// Runtime stats of a creature on the opponent's board, seeded from its template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creature {
    pub def: Arc<CreatureDef>,
    pub health: i32,
    pub strength: i32,
}

impl Creature {
    pub fn from_def(def: Arc<CreatureDef>) -> Self {
        Self {
            health: def.health,
            strength: def.strength,
            def,
        }
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn set_health(&mut self, amount: i32) {
        self.health = amount;
    }

    pub fn set_strength(&mut self, amount: i32) {
        self.strength = amount;
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_stats_from_template() {
        let def = Arc::new(CreatureDef::new("Goblin", 3, 2));
        let mut creature = Creature::from_def(Arc::clone(&def));
        assert_eq!((creature.health, creature.strength), (3, 2));

        creature.set_health(0);
        assert!(creature.is_defeated());
        // The template is never touched.
        assert_eq!(def.health, 3);
    }
}
