use crate::board::BoardConfig;
use crate::hit_region::Bounds;
use crate::layout::{LayoutMode, LayoutParams};
use crate::player::DeckPolicy;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub starting_health: i32,
    pub starting_mana: i32,
    pub opening_hand: usize,
    pub draws_per_turn: usize,
    pub deck_policy: DeckPolicy,
    /// Offset applied to a creature while it attacks.
    pub attack_offset: Vec3,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            starting_health: 20,
            starting_mana: 10,
            opening_hand: 3,
            draws_per_turn: 1,
            deck_policy: DeckPolicy::SkipDraw,
            attack_offset: Vec3::NEG_Y,
        }
    }
}

/// Delays in seconds between the observable steps of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub effect_delay: f32,
    pub settle_delay: f32,
    pub attack_delay: f32,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            effect_delay: 0.25,
            settle_delay: 1.0,
            attack_delay: 0.25,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    #[serde(default = "default_hand")]
    pub hand: BoardConfig,
    #[serde(default = "default_opponent_board")]
    pub opponent_board: BoardConfig,
    pub rules: RulesConfig,
    pub pacing: PacingConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            hand: default_hand(),
            opponent_board: default_opponent_board(),
            rules: RulesConfig::default(),
            pacing: PacingConfig::default(),
        }
    }
}

fn default_hand() -> BoardConfig {
    BoardConfig {
        layout: LayoutMode::Radial,
        params: LayoutParams {
            width: 1.4,
            padding: 0.2,
            radius: 12.0,
            focus_offset: 0.6,
        },
        origin: Vec3::new(0.0, -3.5, 0.0),
        spawn_position: Vec3::new(8.0, -6.0, 0.0),
        bounds: Bounds::new(Vec2::ZERO, Vec2::new(12.0, 3.0)),
        ..BoardConfig::default()
    }
}

fn default_opponent_board() -> BoardConfig {
    BoardConfig {
        layout: LayoutMode::Horizontal,
        params: LayoutParams {
            width: 1.8,
            padding: 0.6,
            radius: 10.0,
            focus_offset: 0.3,
        },
        origin: Vec3::new(0.0, 2.5, 0.0),
        spawn_position: Vec3::new(0.0, 7.0, 0.0),
        bounds: Bounds::new(Vec2::ZERO, Vec2::new(12.0, 3.0)),
        ..BoardConfig::default()
    }
}

impl GameConfig {
    /// Parses `source` as overrides on top of [`GameConfig::default`]: any field left out,
    /// at any depth, keeps its default value.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let overrides: Value = serde_json::from_str(source)?;
        let mut merged = serde_json::to_value(Self::default())?;
        merge_json(&mut merged, overrides);

        let config: Self = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_board("hand", &self.hand)?;
        validate_board("opponent_board", &self.opponent_board)?;

        let pacing = &self.pacing;
        for (field, delay) in [
            ("pacing.effect_delay", pacing.effect_delay),
            ("pacing.settle_delay", pacing.settle_delay),
            ("pacing.attack_delay", pacing.attack_delay),
        ] {
            if !(delay >= 0.0 && delay.is_finite()) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be a finite, non-negative number of seconds",
                });
            }
        }

        if !self.rules.attack_offset.is_finite() {
            return Err(ConfigError::Invalid {
                field: "rules.attack_offset",
                reason: "must be finite",
            });
        }
        Ok(())
    }
}

fn merge_json(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

fn validate_board(field: &'static str, board: &BoardConfig) -> Result<(), ConfigError> {
    let invalid = |reason| Err(ConfigError::Invalid { field, reason });

    if !(board.params.width > 0.0) {
        return invalid("width must be positive");
    }
    if !(board.params.padding >= 0.0) {
        return invalid("padding must not be negative");
    }
    if board.layout == LayoutMode::Radial && !(board.params.radius > 0.0) {
        return invalid("radial layouts need a positive radius");
    }
    if !(board.move_speed > 0.0) {
        return invalid("move_speed must be positive");
    }
    if !board.origin.is_finite() || !board.spawn_position.is_finite() {
        return invalid("origin and spawn_position must be finite");
    }
    Ok(())
}
