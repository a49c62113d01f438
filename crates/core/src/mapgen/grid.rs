//! Tile storage and tile-space helpers used by carving and stairs placement.

use serde::{Deserialize, Serialize};

use crate::types::{Pos, TileKind};

use super::room::InnerBounds;

/// Row-major grid of tiles addressed by `Pos`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<TileKind>,
}

impl TileGrid {
    pub fn filled(width: usize, height: usize, tile: TileKind) -> Self {
        Self { width, height, tiles: vec![tile; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tiles(&self) -> &[TileKind] {
        &self.tiles
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn get(&self, pos: Pos) -> Option<TileKind> {
        self.index(pos).map(|index| self.tiles[index])
    }

    /// Writes `tile` at `pos`. Out-of-bounds writes are dropped and reported
    /// with `false`.
    pub fn set(&mut self, pos: Pos, tile: TileKind) -> bool {
        match self.index(pos) {
            Some(index) => {
                self.tiles[index] = tile;
                true
            }
            None => false,
        }
    }

    pub fn carve_inner(&mut self, inner: InnerBounds) {
        for pos in inner.cells() {
            self.set(pos, TileKind::Floor);
        }
    }

    pub fn count(&self, tile: TileKind) -> usize {
        self.tiles.iter().filter(|&&candidate| candidate == tile).count()
    }

    pub fn positions(&self) -> impl Iterator<Item = (Pos, TileKind)> + '_ {
        self.tiles.iter().enumerate().map(|(index, &tile)| {
            let pos = Pos { y: (index / self.width) as i32, x: (index % self.width) as i32 };
            (pos, tile)
        })
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        self.in_bounds(pos).then(|| (pos.y as usize) * self.width + (pos.x as usize))
    }
}

pub(super) fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// The walkable cell of `area` farthest from `origin`, ties going to the
/// larger `(y, x)`.
pub(super) fn farthest_walkable_cell(
    grid: &TileGrid,
    area: InnerBounds,
    origin: Pos,
) -> Option<Pos> {
    let mut best: Option<(u32, Pos)> = None;
    for pos in area.cells() {
        if !grid.get(pos).is_some_and(TileKind::is_walkable) {
            continue;
        }
        let distance = manhattan(origin, pos);
        let replace = match best {
            None => true,
            Some((best_distance, best_pos)) => {
                distance > best_distance
                    || (distance == best_distance && (pos.y, pos.x) > (best_pos.y, best_pos.x))
            }
        };
        if replace {
            best = Some((distance, pos));
        }
    }
    best.map(|(_, pos)| pos)
}
