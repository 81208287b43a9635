// =============================================================================
// COLLISION.RS: Box overlap queries and positional correction
//
// A query box is tested first against the solid sprite occupants (player,
// base, walls, enemies, in slot order) and then against the background
// cells it covers. Contacts come back in that order; movement correction
// only acts on obstacles lying ahead of where the box started.
// =============================================================================

use glam::{IVec2, Vec2};

use crate::geometry::{Aabb, Direction, cell_box, cells_covering};
use crate::ppu::{BACKGROUND_HEIGHT, BACKGROUND_WIDTH, EMPTY_BACKGROUND, background_index};
use crate::slots::EntityId;

// ── BackgroundGrid ───────────────────────────────────────────────────────────

/// Background tile entries as the simulation sees them. Any entry other than
/// `EMPTY_BACKGROUND` blocks movement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackgroundGrid {
    cells: Vec<u16>,
}

impl Default for BackgroundGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl BackgroundGrid {
    pub fn new() -> Self {
        Self { cells: vec![EMPTY_BACKGROUND; BACKGROUND_WIDTH * BACKGROUND_HEIGHT] }
    }

    fn index(x: i32, y: i32) -> Option<usize> {
        let inside =
            x >= 0 && y >= 0 && (x as usize) < BACKGROUND_WIDTH && (y as usize) < BACKGROUND_HEIGHT;
        inside.then(|| background_index(x as usize, y as usize))
    }

    /// Entry at `(x, y)`; cells outside the grid read as empty.
    pub fn get(&self, x: i32, y: i32) -> u16 {
        Self::index(x, y).map_or(EMPTY_BACKGROUND, |i| self.cells[i])
    }

    /// Write one entry. Writes outside the grid are ignored.
    pub fn set(&mut self, x: i32, y: i32, entry: u16) {
        if let Some(i) = Self::index(x, y) {
            self.cells[i] = entry;
        }
    }

    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.get(x, y) != EMPTY_BACKGROUND
    }

    pub fn clear(&mut self) {
        self.cells.fill(EMPTY_BACKGROUND);
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.cells
    }
}

// ── Queries ──────────────────────────────────────────────────────────────────

/// What a query box ran into.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Hit {
    Sprite(EntityId),
    /// Background cell `(x, y)`.
    Background(IVec2),
}

/// A reported collision and the obstacle's box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Contact {
    pub hit: Hit,
    pub obstacle: Aabb,
}

/// Every obstacle overlapping the `size`-wide box at `pos`: solid sprite
/// occupants in slot order, then occupied background cells.
///
/// The entity `exclude` is skipped, and so is any occupant whose box sits at
/// exactly `pos`: two coinciding boxes are treated as the same entity, never
/// as a collision.
pub fn contacts<I>(
    pos: Vec2,
    size: f32,
    exclude: EntityId,
    occupants: I,
    background: &BackgroundGrid,
) -> impl Iterator<Item = Contact>
where
    I: IntoIterator<Item = (EntityId, Aabb)>,
{
    let query = Aabb::square(pos, size);

    let sprites = occupants
        .into_iter()
        .filter(move |&(id, obstacle)| {
            id != exclude && id.is_solid() && obstacle.min != pos && query.overlaps(&obstacle)
        })
        .map(|(id, obstacle)| Contact { hit: Hit::Sprite(id), obstacle });

    let cells = cells_covering(pos, size)
        .filter(move |&(x, y)| background.is_occupied(x, y))
        .map(|(x, y)| Contact {
            hit: Hit::Background(IVec2::new(x, y)),
            obstacle: cell_box(x, y),
        });

    sprites.chain(cells)
}

/// The first obstacle `contacts` reports, if any.
pub fn test_overlap<I>(
    pos: Vec2,
    size: f32,
    exclude: EntityId,
    occupants: I,
    background: &BackgroundGrid,
) -> Option<Contact>
where
    I: IntoIterator<Item = (EntityId, Aabb)>,
{
    contacts(pos, size, exclude, occupants, background).next()
}

/// Push a `size`-wide box at `pos`, which moved there from `from` along
/// `dir`, out of `obstacle`.
///
/// Only the movement axis is corrected: the leading edge is snapped flush
/// against the near edge of the obstacle. Nothing happens if the boxes no
/// longer overlap or the obstacle lay behind the box at `from`. Returns true
/// if `pos` changed.
pub fn resolve_position(
    pos: &mut Vec2,
    from: Vec2,
    size: f32,
    dir: Direction,
    obstacle: &Aabb,
) -> bool {
    if !Aabb::square(*pos, size).overlaps(obstacle) {
        return false;
    }
    let (mine, theirs) = (Aabb::square(from, size).center(), obstacle.center());
    let before = *pos;
    match dir {
        Direction::Right if theirs.x > mine.x => pos.x = obstacle.min.x - size,
        Direction::Left if theirs.x < mine.x => pos.x = obstacle.max().x,
        Direction::Up if theirs.y > mine.y => pos.y = obstacle.min.y - size,
        Direction::Down if theirs.y < mine.y => pos.y = obstacle.max().y,
        _ => {}
    }
    *pos != before
}
