use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use depthgen_core::logging::{LogLevel, TracingConfig, init_tracing};
use depthgen_core::mapgen::RectangularRoom;
use depthgen_core::{
    DungeonConfig, GeneratedLevel, GenerationParams, Pos, SpawnConfig, Template, TileKind,
    generate_dungeon,
};
use serde::Serialize;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Ascii,
    Json,
}

#[derive(Parser)]
#[command(author, version, about = "Generate dungeon levels and print them", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// First floor to generate
    #[arg(short, long, default_value_t = 1)]
    floor: u32,
    /// Number of consecutive floors to generate
    #[arg(long, default_value_t = 1)]
    floors: u32,
    /// TOML file with `[generation]` and `[spawns]` sections; overrides the
    /// size flags below
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 30)]
    max_rooms: u32,
    #[arg(long, default_value_t = 6)]
    room_min_size: i32,
    #[arg(long, default_value_t = 10)]
    room_max_size: i32,
    #[arg(long, default_value_t = 80)]
    width: i32,
    #[arg(long, default_value_t = 45)]
    height: i32,
    #[arg(long, value_enum, default_value_t = OutputFormat::Ascii)]
    format: OutputFormat,
    /// Log each accepted room and spawn batch to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct EntitySummary<'a> {
    template: Template,
    name: &'a str,
    pos: Option<Pos>,
}

#[derive(Serialize)]
struct LevelSummary<'a> {
    seed: u64,
    floor: u32,
    width: usize,
    height: usize,
    fingerprint: String,
    player_start: Option<Pos>,
    down_stairs: Option<Pos>,
    rooms: &'a [RectangularRoom],
    entities: Vec<EntitySummary<'a>>,
    rows: Vec<String>,
}

fn render_rows(level: &GeneratedLevel) -> Vec<String> {
    let mut cells: Vec<Vec<char>> = vec![vec!['#'; level.width()]; level.height()];
    for (pos, tile) in level.grid.positions() {
        cells[pos.y as usize][pos.x as usize] = match tile {
            TileKind::Wall => '#',
            TileKind::Floor => '.',
            TileKind::DownStairs => '>',
        };
    }
    let entities = level.spawned().map(|(_, entity)| entity).chain(level.player_entity());
    for entity in entities {
        if let Some(pos) = entity.location.filter(|&pos| level.grid.in_bounds(pos)) {
            cells[pos.y as usize][pos.x as usize] = entity.glyph;
        }
    }
    cells.into_iter().map(String::from_iter).collect()
}

fn summarize(seed: u64, level: &GeneratedLevel) -> LevelSummary<'_> {
    LevelSummary {
        seed,
        floor: level.floor,
        width: level.width(),
        height: level.height(),
        fingerprint: format!("{:016x}", level.fingerprint()),
        player_start: level.player_start(),
        down_stairs: level.down_stairs,
        rooms: &level.rooms,
        entities: level
            .spawned()
            .map(|(_, entity)| EntitySummary {
                template: entity.template,
                name: &entity.name,
                pos: entity.location,
            })
            .collect(),
        rows: render_rows(level),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { LogLevel::Debug } else { LogLevel::Info };
    init_tracing(&TracingConfig::with_generation_level(log_level));

    let (params, spawns) = match &args.config {
        Some(path) => {
            let config = DungeonConfig::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?;
            (config.generation, config.spawns)
        }
        None => (
            GenerationParams {
                max_rooms: args.max_rooms,
                room_min_size: args.room_min_size,
                room_max_size: args.room_max_size,
                map_width: args.width,
                map_height: args.height,
            },
            SpawnConfig::standard(),
        ),
    };

    let mut summaries = Vec::new();
    for floor in args.floor..args.floor.saturating_add(args.floors.max(1)) {
        let level = generate_dungeon(args.seed, floor, params, &spawns)
            .with_context(|| format!("Failed to generate floor {floor}"))?;
        if level.is_degenerate() {
            bail!("floor {floor} placed no rooms; try another seed or more rooms");
        }

        match args.format {
            OutputFormat::Ascii => {
                println!(
                    "Floor {floor} (seed {}, fingerprint {:016x})",
                    args.seed,
                    level.fingerprint()
                );
                for row in render_rows(&level) {
                    println!("{row}");
                }
                println!(
                    "Rooms: {}  Entities: {}  Stairs: {:?}",
                    level.rooms.len(),
                    level.spawned().count(),
                    level.down_stairs
                );
            }
            OutputFormat::Json => {
                let summary = summarize(args.seed, &level);
                summaries.push(
                    serde_json::to_value(&summary).context("Failed to serialize level summary")?,
                );
            }
        }
    }

    if let OutputFormat::Json = args.format {
        let json = serde_json::to_string_pretty(&summaries)
            .context("Failed to serialize level summaries")?;
        println!("{json}");
    }

    Ok(())
}
