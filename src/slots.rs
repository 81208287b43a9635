// =============================================================================
// SLOTS.RS: Fixed partition of the 64-entry sprite table
//
//   slot 0        player
//   slot 1        base
//   slots 2..42   walls
//   slots 42..56  enemies
//   slots 56..64  bullets (the bullet pool)
//
// Everything else in the crate talks about entities through `EntityId`;
// only this module knows the numeric ranges.
// =============================================================================

use std::ops::Range;

use crate::ppu::SPRITE_COUNT;

pub const PLAYER_SLOT: usize = 0;
pub const BASE_SLOT: usize = 1;
pub const WALL_SLOTS: Range<usize> = 2..42;
pub const ENEMY_SLOTS: Range<usize> = 42..56;
pub const BULLET_SLOTS: Range<usize> = 56..SPRITE_COUNT;

pub const MAX_WALLS: usize = WALL_SLOTS.end - WALL_SLOTS.start;
pub const MAX_ENEMIES: usize = ENEMY_SLOTS.end - ENEMY_SLOTS.start;
/// Capacity of the bullet pool.
pub const MAX_BULLETS: usize = BULLET_SLOTS.end - BULLET_SLOTS.start;

/// What occupies a sprite slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EntityId {
    Player,
    Base,
    Wall(usize),
    Enemy(usize),
    Bullet(usize),
}

impl EntityId {
    /// Sprite slot of this entity, or `None` if the index is past its range.
    pub fn slot(self) -> Option<usize> {
        let (range, i) = match self {
            EntityId::Player => return Some(PLAYER_SLOT),
            EntityId::Base => return Some(BASE_SLOT),
            EntityId::Wall(i) => (WALL_SLOTS, i),
            EntityId::Enemy(i) => (ENEMY_SLOTS, i),
            EntityId::Bullet(i) => (BULLET_SLOTS, i),
        };
        let slot = range.start + i;
        range.contains(&slot).then_some(slot)
    }

    pub fn from_slot(slot: usize) -> Option<EntityId> {
        match slot {
            PLAYER_SLOT => Some(EntityId::Player),
            BASE_SLOT => Some(EntityId::Base),
            s if WALL_SLOTS.contains(&s) => Some(EntityId::Wall(s - WALL_SLOTS.start)),
            s if ENEMY_SLOTS.contains(&s) => Some(EntityId::Enemy(s - ENEMY_SLOTS.start)),
            s if BULLET_SLOTS.contains(&s) => Some(EntityId::Bullet(s - BULLET_SLOTS.start)),
            _ => None,
        }
    }

    /// Entities a moving box can collide with (everything below the bullet range).
    pub fn is_solid(self) -> bool {
        !matches!(self, EntityId::Bullet(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_partition_the_table() {
        let mut seen = [false; SPRITE_COUNT];
        for slot in 0..SPRITE_COUNT {
            let id = EntityId::from_slot(slot).expect("every slot has an owner");
            assert_eq!(id.slot(), Some(slot));
            assert!(!seen[slot]);
            seen[slot] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn out_of_range_index_has_no_slot() {
        assert_eq!(EntityId::Wall(MAX_WALLS).slot(), None);
        assert_eq!(EntityId::Bullet(MAX_BULLETS).slot(), None);
        assert_eq!(EntityId::from_slot(SPRITE_COUNT), None);
    }

    #[test]
    fn pool_holds_eight_bullets() {
        assert_eq!(MAX_BULLETS, 8);
        assert_eq!(MAX_WALLS, 40);
        assert_eq!(MAX_ENEMIES, 14);
    }
}
