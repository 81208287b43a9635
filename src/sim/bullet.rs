use glam::Vec2;

use crate::geometry::Direction;
use crate::slots::{EntityId, MAX_BULLETS};

use super::PARKED;

/// One pool entry. `direction == None` means pooled.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    pub direction: Option<Direction>,
    /// Shooter; never hit by its own bullet.
    pub owner: EntityId,
}

impl Bullet {
    const POOLED: Bullet = Bullet { pos: PARKED, direction: None, owner: EntityId::Player };

    pub fn in_flight(&self) -> bool {
        self.direction.is_some()
    }

    pub fn recycle(&mut self) {
        *self = Self::POOLED;
    }
}

/// Fixed-capacity bullet pool. Slot `i` is always drawn in `EntityId::Bullet(i)`.
#[derive(Clone, Debug, PartialEq)]
pub struct BulletPool {
    bullets: [Bullet; MAX_BULLETS],
}

impl Default for BulletPool {
    fn default() -> Self {
        Self::new()
    }
}

impl BulletPool {
    pub fn new() -> Self {
        Self { bullets: [Bullet::POOLED; MAX_BULLETS] }
    }

    pub const fn capacity(&self) -> usize {
        MAX_BULLETS
    }

    /// Claim the first pooled slot. Returns `None`, changing nothing, when
    /// every bullet is already in flight.
    pub fn fire(&mut self, pos: Vec2, dir: Direction, owner: EntityId) -> Option<usize> {
        let index = self.bullets.iter().position(|b| !b.in_flight())?;
        self.bullets[index] = Bullet { pos, direction: Some(dir), owner };
        Some(index)
    }

    pub fn in_flight(&self) -> usize {
        self.bullets.iter().filter(|b| b.in_flight()).count()
    }

    pub fn get(&self, index: usize) -> Option<&Bullet> {
        self.bullets.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Bullet> {
        self.bullets.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bullet> {
        self.bullets.iter()
    }

    pub fn clear(&mut self) {
        self.bullets.iter_mut().for_each(Bullet::recycle);
    }
}
