//! Writes the simulation into the PPU: one pass per frame over the fixed slot
//! layout plus the background grid and clear color. Reads the world, never
//! changes it.

use std::f32::consts::TAU;

use glam::Vec2;

use crate::assets::AssetBundle;
use crate::geometry::Direction;
use crate::ppu::{Ppu, Rgba, SCREEN_WIDTH, Sprite};
use crate::sim::World;
use crate::slots::{EntityId, MAX_BULLETS, MAX_ENEMIES, MAX_WALLS};

pub fn project(world: &World, assets: &AssetBundle, ppu: &mut Ppu) {
    let sprite = |name: &str, dir: Direction, pos: Vec2| Sprite {
        x: pixel(pos.x, SCREEN_WIDTH as f32 - 1.0),
        y: pixel(pos.y, 255.0),
        index: assets.registry.tile(name, dir).unwrap_or_default(),
        attributes: assets.palette_of(name),
    };

    write(ppu, EntityId::Player, sprite("player", world.player.facing, world.player.pos));
    write(ppu, EntityId::Base, sprite("basement", Direction::Up, world.base));

    for i in 0..MAX_WALLS {
        let s = match world.walls.get(i) {
            Some(w) if w.intact => sprite("wall", Direction::Up, w.pos),
            _ => Sprite::hidden(),
        };
        write(ppu, EntityId::Wall(i), s);
    }

    for i in 0..MAX_ENEMIES {
        let s = match world.enemies.get(i) {
            Some(e) if e.is_active() => sprite("enemy", e.facing, e.pos),
            _ => Sprite::hidden(),
        };
        write(ppu, EntityId::Enemy(i), s);
    }

    for i in 0..MAX_BULLETS {
        let s = match world.bullets.get(i) {
            Some(b) => match b.direction {
                Some(dir) => sprite("bullet", dir, b.pos),
                None => Sprite::hidden(),
            },
            None => Sprite::hidden(),
        };
        write(ppu, EntityId::Bullet(i), s);
    }

    ppu.background.copy_from_slice(world.background.as_slice());
    ppu.background_color = fade_color(world.background_fade);
}

fn write(ppu: &mut Ppu, id: EntityId, sprite: Sprite) {
    if let Some(slot) = id.slot() {
        ppu.sprites[slot] = sprite;
    }
}

/// Integer pixel coordinate, clamped into the sprite register range.
#[inline]
fn pixel(v: f32, max: f32) -> u8 {
    v.clamp(0.0, max) as u8
}

/// Three sines a third of a turn apart, one per channel.
pub fn fade_color(fade: f32) -> Rgba {
    let channel = |phase: f32| {
        let v = 255.0 * 0.5 * (0.5 + (TAU * (fade + phase)).sin());
        v.clamp(0.0, 255.0) as u8
    };
    [channel(0.0), channel(1.0 / 3.0), channel(2.0 / 3.0), 0xff]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_color_is_opaque() {
        for step in 0..10 {
            assert_eq!(fade_color(step as f32 / 10.0)[3], 0xff);
        }
    }

    #[test]
    fn pixel_truncates_and_clamps() {
        assert_eq!(pixel(12.9, 255.0), 12);
        assert_eq!(pixel(-4.0, 255.0), 0);
        assert_eq!(pixel(400.0, 255.0), 255);
    }
}
