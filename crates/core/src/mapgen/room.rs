//! Axis-aligned rectangular rooms and their carvable interiors.

use serde::{Deserialize, Serialize};

use crate::types::Pos;

/// A room spanning corners `(x1, y1)` to `(x2, y2)`, walls included.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RectangularRoom {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl RectangularRoom {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x1: x, y1: y, x2: x + width, y2: y + height }
    }

    pub fn center(&self) -> Pos {
        Pos { y: (self.y1 + self.y2).div_euclid(2), x: (self.x1 + self.x2).div_euclid(2) }
    }

    /// Interior cells, leaving a one-cell wall on every side.
    pub fn inner_bounds(&self) -> InnerBounds {
        InnerBounds { x1: self.x1 + 1, y1: self.y1 + 1, x2: self.x2 - 1, y2: self.y2 - 1 }
    }

    /// Edge contact counts as overlap so neighbouring rooms never share a wall.
    pub fn intersects(&self, other: &Self) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }
}

/// Inclusive cell rectangle. Empty when `x1 > x2` or `y1 > y2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InnerBounds {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl InnerBounds {
    pub fn is_empty(&self) -> bool {
        self.x1 > self.x2 || self.y1 > self.y2
    }

    pub fn contains(&self, pos: Pos) -> bool {
        (self.x1..=self.x2).contains(&pos.x) && (self.y1..=self.y2).contains(&pos.y)
    }

    pub fn cell_count(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        ((self.x2 - self.x1 + 1) as usize) * ((self.y2 - self.y1 + 1) as usize)
    }

    pub fn cells(self) -> impl Iterator<Item = Pos> {
        (self.y1..=self.y2).flat_map(move |y| (self.x1..=self.x2).map(move |x| Pos { y, x }))
    }
}
