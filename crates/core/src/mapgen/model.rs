//! The generated level: tiles, accepted rooms, spawned entities and stairs.

use slotmap::SlotMap;
use xxhash_rust::xxh3::xxh3_64;

use crate::entity::Entity;
use crate::types::{EntityId, Pos, TileKind};

use super::grid::TileGrid;
use super::room::RectangularRoom;

#[derive(Clone, Debug)]
pub struct GeneratedLevel {
    pub floor: u32,
    pub grid: TileGrid,
    /// Accepted rooms in acceptance order.
    pub rooms: Vec<RectangularRoom>,
    pub entities: SlotMap<EntityId, Entity>,
    pub player: EntityId,
    pub down_stairs: Option<Pos>,
}

impl GeneratedLevel {
    /// An all-wall level holding only `player`.
    pub fn new(floor: u32, width: usize, height: usize, player: Entity) -> Self {
        let mut entities = SlotMap::with_key();
        let player = entities.insert(player);
        Self {
            floor,
            grid: TileGrid::filled(width, height, TileKind::Wall),
            rooms: Vec::new(),
            entities,
            player,
            down_stairs: None,
        }
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn player_entity(&self) -> Option<&Entity> {
        self.entities.get(self.player)
    }

    pub fn player_start(&self) -> Option<Pos> {
        self.player_entity().and_then(|player| player.location)
    }

    pub(crate) fn place_player(&mut self, pos: Pos) {
        if let Some(player) = self.entities.get_mut(self.player) {
            player.place(pos);
        }
    }

    pub fn add_entity(&mut self, entity: Entity) -> EntityId {
        self.entities.insert(entity)
    }

    pub fn entity_at(&self, pos: Pos) -> Option<EntityId> {
        self.entities.iter().find(|(_, entity)| entity.is_at(pos)).map(|(id, _)| id)
    }

    /// Entities other than the player, in spawn order.
    pub fn spawned(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        let player = self.player;
        self.entities.iter().filter(move |&(id, _)| id != player)
    }

    /// True when no room could be placed. Such a level has no usable start or
    /// stairs and callers should retry with another seed or parameters.
    pub fn is_degenerate(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Out-of-bounds positions read as wall.
    pub fn tile_at(&self, pos: Pos) -> TileKind {
        self.grid.get(pos).unwrap_or(TileKind::Wall)
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.floor.to_le_bytes());
        bytes.extend((self.width() as u32).to_le_bytes());
        bytes.extend((self.height() as u32).to_le_bytes());
        for tile in self.grid.tiles() {
            bytes.push(match tile {
                TileKind::Wall => 0,
                TileKind::Floor => 1,
                TileKind::DownStairs => 2,
            });
        }

        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            for coord in [room.x1, room.y1, room.x2, room.y2] {
                bytes.extend(coord.to_le_bytes());
            }
        }

        match self.down_stairs {
            Some(stairs) => {
                bytes.push(1);
                bytes.extend(stairs.y.to_le_bytes());
                bytes.extend(stairs.x.to_le_bytes());
            }
            None => bytes.push(0),
        }

        bytes.extend((self.entities.len() as u32).to_le_bytes());
        for (_, entity) in &self.entities {
            bytes.push(entity.template.code());
            match entity.location {
                Some(pos) => {
                    bytes.push(1);
                    bytes.extend(pos.y.to_le_bytes());
                    bytes.extend(pos.x.to_le_bytes());
                }
                None => bytes.push(0),
            }
        }

        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::StandardFactory;
    use crate::entity::EntityFactory;
    use crate::types::Template;

    fn empty_level() -> GeneratedLevel {
        GeneratedLevel::new(1, 10, 8, StandardFactory.blueprint(Template::Player).unplaced())
    }

    #[test]
    fn new_level_is_all_wall_and_degenerate() {
        let level = empty_level();
        assert_eq!(level.grid.count(TileKind::Wall), 80);
        assert!(level.is_degenerate());
        assert_eq!(level.player_start(), None);
        assert_eq!(level.spawned().count(), 0);
        assert_eq!(level.tile_at(Pos { y: -1, x: 0 }), TileKind::Wall);
    }

    #[test]
    fn entity_lookup_finds_placed_entities() {
        let mut level = empty_level();
        level.place_player(Pos { y: 2, x: 2 });
        let orc = level.add_entity(StandardFactory.instantiate(Template::Orc, Pos { y: 3, x: 4 }));

        assert_eq!(level.player_start(), Some(Pos { y: 2, x: 2 }));
        assert_eq!(level.entity_at(Pos { y: 2, x: 2 }), Some(level.player));
        assert_eq!(level.entity_at(Pos { y: 3, x: 4 }), Some(orc));
        assert_eq!(level.entity_at(Pos { y: 5, x: 5 }), None);
        assert_eq!(level.spawned().map(|(id, _)| id).collect::<Vec<_>>(), vec![orc]);
    }

    #[test]
    fn fingerprint_tracks_tiles_and_entities() {
        let mut level = empty_level();
        let baseline = level.fingerprint();
        assert_eq!(baseline, empty_level().fingerprint());

        level.grid.set(Pos { y: 1, x: 1 }, TileKind::Floor);
        let carved = level.fingerprint();
        assert_ne!(carved, baseline);

        level.add_entity(StandardFactory.instantiate(Template::Sword, Pos { y: 1, x: 1 }));
        assert_ne!(level.fingerprint(), carved);
    }
}
