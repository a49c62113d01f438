use std::collections::{BTreeSet, VecDeque};

use anyhow::{Context, Result, ensure};
use clap::Parser;
use depthgen_core::{GeneratedLevel, GenerationParams, Pos, SpawnConfig, generate_dungeon};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about = "Generate many random levels and check their invariants", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    runs: u32,
}

fn pick(rng: &mut ChaCha8Rng, lo: i32, hi: i32) -> i32 {
    lo + (rng.next_u64() % (hi - lo + 1) as u64) as i32
}

fn random_params(rng: &mut ChaCha8Rng) -> GenerationParams {
    let room_min_size = pick(rng, 2, 8);
    let room_max_size = pick(rng, room_min_size, 12);
    GenerationParams {
        max_rooms: pick(rng, 0, 60) as u32,
        room_min_size,
        room_max_size,
        map_width: pick(rng, room_max_size + 1, 120),
        map_height: pick(rng, room_max_size + 1, 60),
    }
}

fn reachable_from(level: &GeneratedLevel, start: Pos) -> BTreeSet<Pos> {
    let mut open = VecDeque::from([start]);
    let mut seen = BTreeSet::from([start]);
    while let Some(pos) = open.pop_front() {
        for next in [
            Pos { y: pos.y - 1, x: pos.x },
            Pos { y: pos.y, x: pos.x + 1 },
            Pos { y: pos.y + 1, x: pos.x },
            Pos { y: pos.y, x: pos.x - 1 },
        ] {
            if !seen.contains(&next) && level.tile_at(next).is_walkable() {
                seen.insert(next);
                open.push_back(next);
            }
        }
    }
    seen
}

fn check_invariants(level: &GeneratedLevel) -> Result<()> {
    if level.is_degenerate() {
        ensure!(level.down_stairs.is_none(), "degenerate level has stairs");
        ensure!(level.player_start().is_none(), "degenerate level placed the player");
        return Ok(());
    }

    for (index, room) in level.rooms.iter().enumerate() {
        for other in &level.rooms[index + 1..] {
            ensure!(!room.intersects(other), "{room:?} intersects {other:?}");
        }
    }

    let start = level.player_start().context("player was not placed")?;
    let stairs = level.down_stairs.context("stairs were not placed")?;
    let reachable = reachable_from(level, start);
    ensure!(reachable.contains(&stairs), "stairs {stairs:?} unreachable from {start:?}");
    let walkable = level.grid.positions().filter(|(_, tile)| tile.is_walkable()).count();
    ensure!(reachable.len() == walkable, "walkable tiles split into several regions");

    let mut occupied = BTreeSet::new();
    for (_, entity) in &level.entities {
        let pos = entity.location.context("entity left unplaced")?;
        ensure!(level.tile_at(pos).is_walkable(), "{} spawned inside a wall", entity.name);
        ensure!(occupied.insert(pos), "two entities share {pos:?}");
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting generation fuzz on seed {} for {} runs...", args.seed, args.runs);
    let spawns = SpawnConfig::standard();
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let mut degenerate = 0;
    for run in 0..args.runs {
        let params = random_params(&mut rng);
        let run_seed = rng.next_u64();
        let floor = pick(&mut rng, 1, 10) as u32;

        let level = generate_dungeon(run_seed, floor, params, &spawns)
            .with_context(|| format!("run {run}: {params:?} rejected"))?;
        check_invariants(&level).with_context(|| {
            format!("run {run}: seed={run_seed}, floor={floor}, params={params:?}")
        })?;
        if level.is_degenerate() {
            degenerate += 1;
        }
    }

    println!("Fuzzing completed successfully ({degenerate} degenerate levels).");
    Ok(())
}
