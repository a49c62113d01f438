use std::fs;

use depthgen_core::{
    ConfigError, DungeonConfig, GenerationParams, SpawnConfig, Template, generate_dungeon,
};

const SMALL_MAP: &str = r#"
[generation]
max_rooms = 15
room_min_size = 3
room_max_size = 6
map_width = 40
map_height = 24

[spawns]
max_monsters_per_room = [[1, 3]]
max_items_per_room = [[1, 0]]

[spawns.monsters]
troll = [[1, 10]]
"#;

#[test]
fn level_generated_from_a_config_file_uses_its_tables() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("small.toml");
    fs::write(&path, SMALL_MAP).expect("write config");

    let config = DungeonConfig::load(&path).expect("config loads");
    assert!(config.spawns.items.is_empty());

    let level = generate_dungeon(8, 1, config.generation, &config.spawns).expect("generation");
    assert_eq!((level.width(), level.height()), (40, 24));
    assert!(!level.is_degenerate());
    assert!(level.spawned().count() > 0);
    assert!(level.spawned().all(|(_, entity)| entity.template == Template::Troll));
}

#[test]
fn invalid_generation_section_is_reported_on_load() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("too_big.toml");
    fs::write(&path, SMALL_MAP.replace("room_max_size = 6", "room_max_size = 30"))
        .expect("write config");

    let error = DungeonConfig::load(&path).expect_err("rooms cannot fit");
    assert!(matches!(error, ConfigError::InvalidParams(_)), "{error}");
}

#[test]
fn standard_spawns_round_trip_through_a_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("standard.toml");
    let config = DungeonConfig {
        generation: GenerationParams {
            max_rooms: 30,
            room_min_size: 6,
            room_max_size: 10,
            map_width: 80,
            map_height: 45,
        },
        spawns: SpawnConfig::standard(),
    };
    fs::write(&path, toml::to_string(&config).expect("serialize")).expect("write config");

    let loaded = DungeonConfig::load(&path).expect("config loads");
    assert_eq!(loaded, config);
    let from_file = generate_dungeon(5, 4, loaded.generation, &loaded.spawns).expect("generation");
    let in_memory = generate_dungeon(5, 4, config.generation, &config.spawns).expect("generation");
    assert_eq!(from_file.fingerprint(), in_memory.fingerprint());
}
