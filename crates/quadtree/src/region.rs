//! Half-open axis-aligned regions and their quadrant split.

use crate::Point;
use std::fmt;

/// One of the four sub-regions produced by splitting a region at its midpoint.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    NW = 0,
    NE = 1,
    SW = 2,
    SE = 3,
}

impl Quadrant {
    /// All quadrants in child order.
    pub const ALL: [Quadrant; 4] = [Quadrant::NW, Quadrant::NE, Quadrant::SW, Quadrant::SE];

    /// Position of this quadrant in a node's child array.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Axis-aligned rectangle covering `[min_x, max_x) x [min_y, max_y)`.
///
/// The y axis grows downward (screen coordinates), so north is `min_y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Region {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        debug_assert!(max_x > min_x && max_y > min_y, "degenerate region");
        Self { min_x, min_y, max_x, max_y }
    }

    /// The `[0, size)` square anchored at the origin.
    #[inline]
    pub fn square(size: f32) -> Self {
        Self::new(0.0, 0.0, size, size)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Half-open containment: points on the max edges belong to the neighbour.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x && point.x < self.max_x && point.y >= self.min_y && point.y < self.max_y
    }

    /// Side length of the quadrants `quadrants()` would produce.
    ///
    /// Taken from the x extent and reused for y, so only square regions
    /// split into four equal squares.
    #[inline]
    pub fn quadrant_size(&self) -> f32 {
        self.width() / 2.0
    }

    /// Split at the midpoint into `[NW, NE, SW, SE]`.
    pub fn quadrants(&self) -> [Region; 4] {
        let half = self.quadrant_size();
        let mid_x = self.min_x + half;
        let mid_y = self.min_y + half;
        // Built directly: for wide regions the south row can come out empty.
        let region = |min_x, min_y, max_x, max_y| Region { min_x, min_y, max_x, max_y };
        [
            region(self.min_x, self.min_y, mid_x, mid_y),
            region(mid_x, self.min_y, self.max_x, mid_y),
            region(self.min_x, mid_y, mid_x, self.max_y),
            region(mid_x, mid_y, self.max_x, self.max_y),
        ]
    }

    /// The quadrant of this region holding `point`, if this region holds it at all.
    pub fn quadrant_of(&self, point: Point) -> Option<Quadrant> {
        if !self.contains(point) {
            return None;
        }
        let half = self.quadrant_size();
        let east = point.x >= self.min_x + half;
        let south = point.y >= self.min_y + half;
        Some(match (south, east) {
            (false, false) => Quadrant::NW,
            (false, true) => Quadrant::NE,
            (true, false) => Quadrant::SW,
            (true, true) => Quadrant::SE,
        })
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {} | {} | {}", self.min_x, self.min_y, self.max_x, self.max_y)
    }
}
