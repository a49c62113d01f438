//! Room-and-corridor generation: place rooms, link them, populate, add stairs.

use thiserror::Error;
use tracing::{debug, debug_span, info, trace, warn};

use crate::config::{ConfigError, GenerationParams, SpawnConfig};
use crate::content::StandardFactory;
use crate::curve::CurveError;
use crate::entity::EntityFactory;
use crate::types::{Pos, Template, TileKind};

use super::grid::farthest_walkable_cell;
use super::model::GeneratedLevel;
use super::random::{RandomSource, floor_rng};
use super::room::RectangularRoom;
use super::spawns::place_entities;
use super::tunnel::tunnel_between;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Curve(#[from] CurveError),
}

pub struct DungeonGenerator<'a, F> {
    params: GenerationParams,
    spawns: &'a SpawnConfig,
    factory: &'a F,
}

impl<'a, F: EntityFactory> DungeonGenerator<'a, F> {
    /// Validates `params` and `spawns` up front so generation itself can only
    /// fail on a programming error.
    pub fn new(
        params: GenerationParams,
        spawns: &'a SpawnConfig,
        factory: &'a F,
    ) -> Result<Self, ConfigError> {
        params.validate()?;
        spawns.validate()?;
        Ok(Self { params, spawns, factory })
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    /// Generates one level for `floor`, drawing every random decision from
    /// `rng`. The same source state always yields the same level.
    ///
    /// A level with no rooms is returned rather than treated as an error; see
    /// [`GeneratedLevel::is_degenerate`].
    pub fn generate(
        &self,
        floor: u32,
        rng: &mut impl RandomSource,
    ) -> Result<GeneratedLevel, CurveError> {
        let params = &self.params;
        let span = debug_span!("generate_dungeon", floor, max_rooms = params.max_rooms);
        let _entered = span.enter();

        let player = self.factory.blueprint(Template::Player).unplaced();
        let mut level = GeneratedLevel::new(
            floor,
            params.map_width as usize,
            params.map_height as usize,
            player,
        );
        let mut last_connected: Option<Pos> = None;

        for attempt in 0..params.max_rooms {
            let room_width = rng.int_in_range(params.room_min_size, params.room_max_size);
            let room_height = rng.int_in_range(params.room_min_size, params.room_max_size);
            let x = rng.int_in_range(0, params.map_width - room_width - 1);
            let y = rng.int_in_range(0, params.map_height - room_height - 1);
            let candidate = RectangularRoom::new(x, y, room_width, room_height);

            if level.rooms.iter().any(|room| room.intersects(&candidate)) {
                trace!(attempt, ?candidate, "room overlaps an accepted room");
                continue;
            }

            level.grid.carve_inner(candidate.inner_bounds());
            let center = candidate.center();
            match level.rooms.last().map(RectangularRoom::center) {
                None => level.place_player(center),
                Some(previous) => {
                    for pos in tunnel_between(previous, center, rng) {
                        level.grid.set(pos, TileKind::Floor);
                    }
                    last_connected = Some(center);
                }
            }

            let spawned = place_entities(&candidate, &mut level, self.spawns, rng, self.factory)?;
            level.rooms.push(candidate);
            debug!(
                attempt,
                room = level.rooms.len(),
                ?center,
                spawned = spawned.len(),
                "room accepted"
            );
        }

        level.down_stairs = place_down_stairs(&mut level, last_connected);

        if level.is_degenerate() {
            warn!(floor, max_rooms = params.max_rooms, "no room could be placed");
        }
        info!(
            floor,
            rooms = level.rooms.len(),
            entities = level.entities.len(),
            stairs = ?level.down_stairs,
            "dungeon generated"
        );
        Ok(level)
    }
}

fn place_down_stairs(level: &mut GeneratedLevel, last_connected: Option<Pos>) -> Option<Pos> {
    let stairs = match (last_connected, level.rooms.as_slice()) {
        (Some(center), _) => Some(center),
        (None, [only]) => level
            .player_start()
            .and_then(|start| farthest_walkable_cell(&level.grid, only.inner_bounds(), start)),
        (None, _) => None,
    }?;
    level.grid.set(stairs, TileKind::DownStairs);
    Some(stairs)
}

/// Generates `floor` of the run identified by `run_seed` with the built-in
/// blueprints. Each floor draws from its own seeded source, so floors can be
/// generated in any order or in parallel.
pub fn generate_dungeon(
    run_seed: u64,
    floor: u32,
    params: GenerationParams,
    spawns: &SpawnConfig,
) -> Result<GeneratedLevel, GenerationError> {
    let generator = DungeonGenerator::new(params, spawns, &StandardFactory)?;
    let mut rng = floor_rng(run_seed, floor);
    Ok(generator.generate(floor, &mut rng)?)
}
