// =============================================================================
// GEOMETRY.RS: Geometric primitives for the playfield
//
// - The four movement directions and their unit vectors
// - Axis-aligned box overlap (AABB)
// - Playfield clamping
// - Mapping a box onto the 8×8 background cells it covers
// =============================================================================

use glam::Vec2;

use crate::ppu::{SCREEN_HEIGHT, SCREEN_WIDTH, TILE_SIZE};

/// Playfield extent in pixels.
pub const PLAYFIELD: Vec2 = Vec2::new(SCREEN_WIDTH as f32, SCREEN_HEIGHT as f32);

/// Playfield extent in background cells.
pub const PLAYFIELD_COLS: i32 = (SCREEN_WIDTH / TILE_SIZE) as i32;
pub const PLAYFIELD_ROWS: i32 = (SCREEN_HEIGHT / TILE_SIZE) as i32;

// =============================================================================
// DIRECTIONS
// =============================================================================

/// One of the four axis directions. The discriminant is the rotation
/// variant offset inside a sprite's four tiles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    /// Unit vector for this direction (+y is up).
    #[inline]
    pub fn vector(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::Y,
            Direction::Right => Vec2::X,
            Direction::Down => Vec2::NEG_Y,
            Direction::Left => Vec2::NEG_X,
        }
    }

    /// Offset of the matching rotation tile (0..=3).
    #[inline]
    pub fn tile_offset(self) -> u8 {
        self as u8
    }

    /// Direction of a non-zero axis vector. Diagonal or zero vectors give `None`.
    pub fn from_vector(v: Vec2) -> Option<Direction> {
        match (v.x == 0.0, v.y == 0.0) {
            (true, false) if v.y > 0.0 => Some(Direction::Up),
            (true, false) => Some(Direction::Down),
            (false, true) if v.x > 0.0 => Some(Direction::Right),
            (false, true) => Some(Direction::Left),
            _ => None,
        }
    }
}

// =============================================================================
// BOXES
// =============================================================================

/// Square axis-aligned box anchored at its bottom-left corner.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn square(min: Vec2, size: f32) -> Self {
        Self { min, size: Vec2::splat(size) }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Standard AABB predicate. Boxes that only share an edge do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x
            && other.min.x < a_max.x
            && self.min.y < b_max.y
            && other.min.y < a_max.y
    }
}

/// Clamp the position of a `size`-wide box so the whole box stays on the
/// playfield: each axis ends up in `[0, PLAYFIELD - size]`.
#[inline]
pub fn clamp_to_playfield(pos: Vec2, size: f32) -> Vec2 {
    pos.clamp(Vec2::ZERO, PLAYFIELD - Vec2::splat(size))
}

/// True if the box lies entirely on the playfield.
pub fn inside_playfield(pos: Vec2, size: f32) -> bool {
    pos.x >= 0.0 && pos.y >= 0.0 && pos.x + size <= PLAYFIELD.x && pos.y + size <= PLAYFIELD.y
}

// =============================================================================
// CELLS
// =============================================================================

/// Background cells touched by a `size`-wide box at `pos`. A box no larger
/// than one tile covers at most 2×2 cells; an edge lying exactly on a cell
/// boundary does not count as touching the next cell.
pub fn cells_covering(pos: Vec2, size: f32) -> impl Iterator<Item = (i32, i32)> {
    let tile = TILE_SIZE as f32;
    let x0 = (pos.x / tile).floor() as i32;
    let y0 = (pos.y / tile).floor() as i32;
    let x1 = ((pos.x + size) / tile).ceil() as i32 - 1;
    let y1 = ((pos.y + size) / tile).ceil() as i32 - 1;
    (y0..=y1.max(y0)).flat_map(move |y| (x0..=x1.max(x0)).map(move |x| (x, y)))
}

/// Pixel box of background cell `(x, y)`.
pub fn cell_box(x: i32, y: i32) -> Aabb {
    let tile = TILE_SIZE as f32;
    Aabb::square(Vec2::new(x as f32 * tile, y as f32 * tile), tile)
}
