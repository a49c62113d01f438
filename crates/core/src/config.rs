//! Generation parameters and spawn configuration, loadable from TOML.
//!
//! A config file looks like:
//!
//! ```toml
//! [generation]
//! max_rooms = 30
//! room_min_size = 6
//! room_max_size = 10
//! map_width = 80
//! map_height = 45
//!
//! [spawns]
//! max_monsters_per_room = [[1, 2], [4, 3], [6, 5]]
//! max_items_per_room = [[1, 1], [4, 2]]
//!
//! [spawns.monsters]
//! orc = [[1, 80]]
//! troll = [[2, 0], [3, 15], [5, 30], [7, 60]]
//!
//! [spawns.items]
//! health_potion = [[0, 35]]
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use toml::de::Error as TomlError;

use crate::curve::{Curve, CurveError};
use crate::mapgen::SpawnTable;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid generation parameters: {0}")]
    InvalidParams(String),
    #[error("curve `{name}` is unusable: {source}")]
    Curve {
        name: String,
        #[source]
        source: CurveError,
    },
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] TomlError),
}

/// Shape of the map and the room-placement budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationParams {
    pub max_rooms: u32,
    pub room_min_size: i32,
    pub room_max_size: i32,
    pub map_width: i32,
    pub map_height: i32,
}

impl GenerationParams {
    /// Rejects parameters under which a room can never be placed on the map.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.room_min_size < 2 {
            return Err(ConfigError::InvalidParams(format!(
                "room_min_size must be at least 2, got {}",
                self.room_min_size
            )));
        }
        if self.room_min_size > self.room_max_size {
            return Err(ConfigError::InvalidParams(format!(
                "room_min_size {} exceeds room_max_size {}",
                self.room_min_size, self.room_max_size
            )));
        }
        if self.room_max_size >= self.map_width || self.room_max_size >= self.map_height {
            return Err(ConfigError::InvalidParams(format!(
                "room_max_size {} does not fit a {}x{} map",
                self.room_max_size, self.map_width, self.map_height
            )));
        }
        Ok(())
    }
}

/// Per-room caps and the weighted tables rooms are populated from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpawnConfig {
    pub max_monsters_per_room: Curve,
    pub max_items_per_room: Curve,
    #[serde(default)]
    pub monsters: SpawnTable,
    #[serde(default)]
    pub items: SpawnTable,
}

impl SpawnConfig {
    /// Every curve must have at least one finite point. Empty tables are fine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let named = [
            ("max_monsters_per_room".to_string(), &self.max_monsters_per_room),
            ("max_items_per_room".to_string(), &self.max_items_per_room),
        ];
        let tables = [("monsters", &self.monsters), ("items", &self.items)];
        let entries = tables.into_iter().flat_map(|(table, entries)| {
            entries.iter().map(move |(template, curve)| {
                (format!("{table}.{}", template.key()), curve)
            })
        });

        for (name, curve) in named.into_iter().chain(entries) {
            curve.validate().map_err(|source| ConfigError::Curve { name, source })?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DungeonConfig {
    pub generation: GenerationParams,
    pub spawns: SpawnConfig,
}

impl DungeonConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generation.validate()?;
        self.spawns.validate()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::types::Template;

    fn params() -> GenerationParams {
        GenerationParams {
            max_rooms: 30,
            room_min_size: 6,
            room_max_size: 10,
            map_width: 80,
            map_height: 45,
        }
    }

    const SAMPLE: &str = r#"
[generation]
max_rooms = 12
room_min_size = 4
room_max_size = 8
map_width = 40
map_height = 30

[spawns]
max_monsters_per_room = [[1, 2], [4, 3]]
max_items_per_room = [[1, 1]]

[spawns.monsters]
orc = [[1, 80]]
troll = [[3, 15], [2, 0]]

[spawns.items]
health_potion = [[0, 35]]
"#;

    #[test]
    fn stock_parameters_are_valid() {
        assert!(params().validate().is_ok());
    }

    #[test]
    fn rooms_that_cannot_fit_are_rejected() {
        let cases = [
            GenerationParams { room_min_size: 1, ..params() },
            GenerationParams { room_min_size: 11, ..params() },
            GenerationParams { map_width: 10, ..params() },
            GenerationParams { map_height: 9, ..params() },
        ];
        for case in cases {
            assert!(
                matches!(case.validate(), Err(ConfigError::InvalidParams(_))),
                "{case:?} should be rejected"
            );
        }
    }

    #[test]
    fn toml_config_parses_curves_as_pairs() {
        let config = DungeonConfig::from_toml_str(SAMPLE).expect("sample config is valid");
        assert_eq!(config.generation.max_rooms, 12);
        assert_eq!(config.spawns.monsters.len(), 2);

        let troll = config.spawns.monsters.get(Template::Troll).expect("troll is listed");
        assert_eq!(troll.points()[0].input, 2.0);
        assert_eq!(troll.evaluate(3.0), Ok(15.0));
        assert_eq!(config.spawns.items.get(Template::HealthPotion).map(Curve::len), Some(1));
    }

    #[test]
    fn empty_curves_are_named_in_the_error() {
        let broken = SAMPLE.replace("orc = [[1, 80]]", "orc = []");
        let error = DungeonConfig::from_toml_str(&broken).expect_err("empty curve must fail");
        match error {
            ConfigError::Curve { name, source } => {
                assert_eq!(name, "monsters.orc");
                assert_eq!(source, CurveError::Empty);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_templates_and_fields_fail_to_parse() {
        let unknown_template = SAMPLE.replace("orc = [[1, 80]]", "dragon = [[1, 80]]");
        assert!(matches!(
            DungeonConfig::from_toml_str(&unknown_template),
            Err(ConfigError::Parse(_))
        ));

        let unknown_field = SAMPLE.replace("max_rooms = 12", "max_rooms = 12\nseed = 4");
        assert!(matches!(DungeonConfig::from_toml_str(&unknown_field), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn load_reads_from_disk_and_reports_missing_files() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(SAMPLE.as_bytes()).expect("write config");
        let config = DungeonConfig::load(file.path()).expect("config loads");
        assert_eq!(config.generation.map_width, 40);

        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("absent.toml");
        assert!(matches!(DungeonConfig::load(&missing), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn standard_config_survives_a_toml_trip() {
        let config = DungeonConfig { generation: params(), spawns: SpawnConfig::standard() };
        let text = toml::to_string(&config).expect("config serializes");
        assert_eq!(DungeonConfig::from_toml_str(&text).expect("re-parses"), config);
    }
}
