pub mod board;
pub mod card;
pub mod config;
pub mod content;
pub mod controller;
pub mod creature;
pub mod effect;
pub mod game;
pub mod hit_region;
pub mod layout;
pub mod opponent;
pub mod piece;
pub mod player;
pub mod sequence;
pub mod table;
pub mod turn;

pub use board::{Board, BoardConfig};
pub use card::{CardDef, CardEffect, EffectKind, TargetKind};
pub use config::{ConfigError, GameConfig, PacingConfig, RulesConfig};
pub use content::{ContentError, ContentLibrary, Encounter, ResolvedEncounter};
pub use controller::{InputFrame, PlayerController};
pub use creature::{Creature, CreatureDef};
pub use effect::{Resolution, SkipReason};
pub use game::{Game, Outcome};
pub use hit_region::{Bounds, HitRegion, PlacedBounds};
pub use layout::{LayoutMode, LayoutParams, RadialArc};
pub use opponent::Opponent;
pub use piece::{DEFAULT_MOVE_SPEED, Piece, PieceId};
pub use player::{DeckPolicy, DrawError, Hand, Player};
pub use sequence::{Sequence, Step};
pub use table::Table;
pub use turn::{PlayError, TurnOrchestrator, TurnPhase};

pub use glam::{Quat, Vec2, Vec3};
