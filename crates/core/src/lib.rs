pub mod config;
pub mod content;
pub mod curve;
pub mod entity;
pub mod logging;
pub mod mapgen;
pub mod types;

pub use config::{ConfigError, DungeonConfig, GenerationParams, SpawnConfig};
pub use content::StandardFactory;
pub use curve::{ControlPoint, Curve, CurveError};
pub use entity::{Blueprint, Entity, EntityFactory};
pub use mapgen::{DungeonGenerator, GeneratedLevel, GenerationError, generate_dungeon};
pub use types::*;
