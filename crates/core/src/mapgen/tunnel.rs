//! L-shaped tunnels built from two Bresenham segments.

use std::iter::{Chain, Skip};

use crate::types::Pos;

use super::random::RandomSource;

pub type Tunnel = Chain<BresenhamLine, Skip<BresenhamLine>>;

/// 8-connected line from `start` to `end`, both endpoints included.
#[derive(Clone, Debug)]
pub struct BresenhamLine {
    current: Pos,
    end: Pos,
    dx: i32,
    dy: i32,
    step_x: i32,
    step_y: i32,
    error: i32,
    finished: bool,
}

impl BresenhamLine {
    pub fn new(start: Pos, end: Pos) -> Self {
        let dx = (end.x - start.x).abs();
        let dy = -(end.y - start.y).abs();
        Self {
            current: start,
            end,
            dx,
            dy,
            step_x: if start.x < end.x { 1 } else { -1 },
            step_y: if start.y < end.y { 1 } else { -1 },
            error: dx + dy,
            finished: false,
        }
    }
}

impl Iterator for BresenhamLine {
    type Item = Pos;

    fn next(&mut self) -> Option<Pos> {
        if self.finished {
            return None;
        }
        let point = self.current;
        if point == self.end {
            self.finished = true;
            return Some(point);
        }

        let doubled = 2 * self.error;
        if doubled >= self.dy {
            self.error += self.dy;
            self.current.x += self.step_x;
        }
        if doubled <= self.dx {
            self.error += self.dx;
            self.current.y += self.step_y;
        }
        Some(point)
    }
}

/// Which leg of an L-shaped tunnel comes first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TunnelBend {
    HorizontalFirst,
    VerticalFirst,
}

impl TunnelBend {
    pub fn corner(self, start: Pos, end: Pos) -> Pos {
        match self {
            Self::HorizontalFirst => Pos { y: start.y, x: end.x },
            Self::VerticalFirst => Pos { y: end.y, x: start.x },
        }
    }
}

/// Cells of a tunnel from `start` to `end` bending once at a corner picked by a
/// fair coin flip.
///
/// The corner cell is produced once, so every step moves exactly one cell.
pub fn tunnel_between(start: Pos, end: Pos, rng: &mut impl RandomSource) -> Tunnel {
    let bend =
        if rng.unit_f64() < 0.5 { TunnelBend::HorizontalFirst } else { TunnelBend::VerticalFirst };
    tunnel_with_bend(start, end, bend)
}

pub fn tunnel_with_bend(start: Pos, end: Pos, bend: TunnelBend) -> Tunnel {
    let corner = bend.corner(start, end);
    BresenhamLine::new(start, corner).chain(BresenhamLine::new(corner, end).skip(1))
}
