use glam::Vec2;

use crate::collision::{contacts, resolve_position};
use crate::geometry::{Direction, PLAYFIELD, clamp_to_playfield};
use crate::slots::EntityId;

use super::{PARKED, World};

/// Corrections attempted per move before giving up on an overlap.
const MAX_CORRECTIONS: usize = 4;

/// A player or enemy tank.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tank {
    pub pos: Vec2,
    /// Current movement. `None` is idle for the player and dead for an enemy.
    pub direction: Option<Direction>,
    /// Which rotation tile is drawn. Survives stopping.
    pub facing: Direction,
}

impl Tank {
    pub fn new(pos: Vec2, direction: Option<Direction>) -> Self {
        Self { pos, direction, facing: direction.unwrap_or(Direction::Up) }
    }

    pub fn is_active(&self) -> bool {
        self.direction.is_some()
    }

    /// Remove from play without freeing the slot.
    pub fn deactivate(&mut self) {
        self.direction = None;
        self.pos = PARKED;
    }

    pub fn turn(&mut self, dir: Direction) {
        self.direction = Some(dir);
        self.facing = dir;
    }
}

/// A destructible wall block.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Wall {
    pub pos: Vec2,
    pub intact: bool,
}

impl Wall {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, intact: true }
    }

    pub fn destroy(&mut self) {
        self.intact = false;
        self.pos = PARKED;
    }
}

/// Where the tank `id` at `pos` ends up after travelling `distance` along
/// `dir`: clamped to the playfield and stopped flush against whatever it ran
/// into.
///
/// Long moves are split into steps no longer than the box, so a slow frame
/// cannot carry a tank past or through an obstacle.
pub(crate) fn advance(
    world: &World,
    id: EntityId,
    pos: Vec2,
    dir: Direction,
    distance: f32,
    size: f32,
) -> Vec2 {
    // Anything longer than the playfield ends at its edge anyway.
    let distance = distance.clamp(0.0, PLAYFIELD.max_element());
    let steps = (distance / size).ceil().max(1.0) as usize;
    let step = distance / steps as f32;

    let mut pos = pos;
    for _ in 0..steps {
        let (next, blocked) = step_once(world, id, pos, dir, step, size);
        pos = next;
        if blocked {
            break;
        }
    }
    pos
}

/// One move of at most `size` pixels. Returns the new position and whether
/// an obstacle ahead stopped it.
fn step_once(
    world: &World,
    id: EntityId,
    from: Vec2,
    dir: Direction,
    distance: f32,
    size: f32,
) -> (Vec2, bool) {
    let mut next = clamp_to_playfield(from + dir.vector() * distance, size);
    let mut blocked = false;
    for _ in 0..MAX_CORRECTIONS {
        // Obstacles overlapping from behind are skipped, not allowed to hide
        // the one ahead.
        let corrected = contacts(next, size, id, world.occupants(size), &world.background)
            .any(|c| resolve_position(&mut next, from, size, dir, &c.obstacle));
        if !corrected {
            break;
        }
        blocked = true;
        next = clamp_to_playfield(next, size);
    }
    (next, blocked)
}
