// =============================================================================
// SIM: Per-frame simulation of tanks and bullets
//
// One `World::update` per frame:
//   1. player: pick a direction from the held buttons, move, fire on press
//   2. enemies: AI dice rolls, move, fire
//   3. bullets: travel, hit something or leave the playfield, return to pool
//   4. level progression once every enemy is gone
// =============================================================================

pub mod ai;
pub mod bullet;
pub mod tank;

use glam::Vec2;
use rand::Rng;
use tracing::{debug, info, trace, warn};

use crate::assets::{AssetBundle, Level};
use crate::collision::{BackgroundGrid, Hit, test_overlap};
use crate::config::GameConfig;
use crate::geometry::{Aabb, Direction, inside_playfield};
use crate::input::Buttons;
use crate::ppu::{TILE_SIZE, background_entry};
use crate::slots::EntityId;

pub use bullet::{Bullet, BulletPool};
pub use tank::{Tank, Wall};

/// Where deactivated entities wait: just below the visible 240 rows.
pub const PARKED: Vec2 = Vec2::new(0.0, 248.0);

const SPRITE_SIZE: f32 = TILE_SIZE as f32;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Playing,
    /// Base destroyed or out of lives. The world no longer changes.
    GameOver,
    /// Last level cleared.
    Victory,
}

/// Complete simulation state for the current level.
#[derive(Clone, Debug)]
pub struct World {
    pub level_index: usize,
    pub player: Tank,
    pub player_spawn: Vec2,
    pub lives: u32,
    pub base: Vec2,
    pub walls: Vec<Wall>,
    pub enemies: Vec<Tank>,
    pub bullets: BulletPool,
    /// Blocking background cells (the level's `o` blocks).
    pub background: BackgroundGrid,
    /// Slowly cycles through `[0, 1)`; drives the background color.
    pub background_fade: f32,
    pub status: Status,
}

impl World {
    /// Start at level 0 with a full set of lives.
    pub fn new(assets: &AssetBundle, config: &GameConfig) -> Self {
        let mut world = Self {
            level_index: 0,
            player: Tank::new(Vec2::ZERO, None),
            player_spawn: Vec2::ZERO,
            lives: config.player_lives,
            base: Vec2::ZERO,
            walls: Vec::new(),
            enemies: Vec::new(),
            bullets: BulletPool::new(),
            background: BackgroundGrid::new(),
            background_fade: 0.0,
            status: Status::Playing,
        };
        world.load_level(assets, 0);
        world
    }

    /// Replace the playfield with level `index`. Lives and fade carry over.
    /// An index past the end is clamped to the last level.
    pub fn load_level(&mut self, assets: &AssetBundle, index: usize) {
        let index = if index < assets.levels.len() {
            index
        } else {
            warn!("level {index} does not exist; using the last level");
            assets.levels.len().saturating_sub(1)
        };
        let Some(level) = assets.levels.get(index) else { return };
        info!("loading level {index} ({})", level.name);

        self.level_index = index;
        self.player_spawn = Level::cell_position(level.player);
        self.player = Tank::new(self.player_spawn, None);
        self.base = Level::cell_position(level.base);
        self.walls = level.walls.iter().map(|&c| Wall::new(Level::cell_position(c))).collect();
        self.enemies = level
            .enemies
            .iter()
            .map(|&c| Tank::new(Level::cell_position(c), Some(Direction::Down)))
            .collect();
        self.bullets.clear();

        self.background.clear();
        let sprite = assets.background_sprite();
        let tile = assets.registry.tile(sprite, Direction::Up).unwrap_or_default();
        let entry = background_entry(tile, assets.palette_of(sprite));
        for &cell in &level.decorations {
            let at = Level::background_cell(cell);
            self.background.set(at.x, at.y, entry);
        }
    }

    /// Solid occupants in slot order: player, base, intact walls, live enemies.
    pub fn occupants(&self, tank_box: f32) -> impl Iterator<Item = (EntityId, Aabb)> + '_ {
        let player = std::iter::once((EntityId::Player, Aabb::square(self.player.pos, tank_box)));
        let base = std::iter::once((EntityId::Base, Aabb::square(self.base, SPRITE_SIZE)));
        let walls = self
            .walls
            .iter()
            .enumerate()
            .filter(|(_, w)| w.intact)
            .map(|(i, w)| (EntityId::Wall(i), Aabb::square(w.pos, SPRITE_SIZE)));
        let enemies = self
            .enemies
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_active())
            .map(move |(i, e)| (EntityId::Enemy(i), Aabb::square(e.pos, tank_box)));
        player.chain(base).chain(walls).chain(enemies)
    }

    pub fn enemies_alive(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_active()).count()
    }

    /// Advance one frame. `elapsed` is in seconds.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        elapsed: f32,
        buttons: &Buttons,
        assets: &AssetBundle,
        config: &GameConfig,
        rng: &mut R,
    ) {
        let elapsed = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };

        self.background_fade += elapsed / 10.0;
        self.background_fade -= self.background_fade.floor();

        if self.status != Status::Playing {
            return;
        }

        self.update_player(elapsed, buttons, config);
        self.update_enemies(elapsed, config, rng);
        self.step_bullets(config);

        if self.status == Status::Playing && !self.enemies.is_empty() && self.enemies_alive() == 0 {
            let next = self.level_index + 1;
            if next < assets.levels.len() {
                self.load_level(assets, next);
            } else {
                info!("all levels cleared");
                self.status = Status::Victory;
            }
        }
    }

    fn update_player(&mut self, elapsed: f32, buttons: &Buttons, config: &GameConfig) {
        // One axis at a time; the first held button in this order wins.
        let held = [
            (buttons.up.pressed, Direction::Up),
            (buttons.down.pressed, Direction::Down),
            (buttons.left.pressed, Direction::Left),
            (buttons.right.pressed, Direction::Right),
        ];
        self.player.direction = held.iter().find(|(pressed, _)| *pressed).map(|&(_, d)| d);

        if let Some(dir) = self.player.direction {
            self.player.facing = dir;
            let distance = config.player_speed * elapsed;
            let (pos, size) = (self.player.pos, config.tank_box);
            self.player.pos = tank::advance(self, EntityId::Player, pos, dir, distance, size);
        }

        if buttons.fire.downs > 0 {
            self.fire(self.player.pos, self.player.facing, EntityId::Player);
        }
    }

    fn update_enemies<R: Rng + ?Sized>(&mut self, elapsed: f32, config: &GameConfig, rng: &mut R) {
        let distance = config.enemy_speed * elapsed;
        let size = config.tank_box;
        for i in 0..self.enemies.len() {
            let decision = ai::think(&mut self.enemies[i], config, rng);
            let enemy = self.enemies[i];
            let Some(dir) = enemy.direction else { continue };

            let id = EntityId::Enemy(i);
            self.enemies[i].pos = tank::advance(self, id, enemy.pos, dir, distance, size);
            if decision.fire {
                self.fire(self.enemies[i].pos, self.enemies[i].facing, EntityId::Enemy(i));
            }
        }
    }

    /// Request a bullet. Dropped silently if the pool is exhausted.
    pub fn fire(&mut self, pos: Vec2, dir: Direction, owner: EntityId) -> Option<usize> {
        let claimed = self.bullets.fire(pos, dir, owner);
        match claimed {
            Some(i) => debug!("{owner:?} fired bullet {i} {dir:?}"),
            None => trace!("{owner:?} fire dropped: bullet pool exhausted"),
        }
        claimed
    }

    /// Move every bullet in flight by `bullet_speed` pixels and resolve impacts.
    pub fn step_bullets(&mut self, config: &GameConfig) {
        let size = config.bullet_box;
        // The collision box sits centered inside the 8×8 sprite.
        let inset = Vec2::splat((SPRITE_SIZE - size) * 0.5);

        for i in 0..self.bullets.capacity() {
            let Some(bullet) = self.bullets.get(i).copied() else { continue };
            let Some(dir) = bullet.direction else { continue };

            let pos = bullet.pos + dir.vector() * config.bullet_speed;
            let hitbox = pos + inset;
            if !inside_playfield(hitbox, size) {
                self.recycle_bullet(i);
                continue;
            }

            let occupants = self.occupants(config.tank_box);
            match test_overlap(hitbox, size, bullet.owner, occupants, &self.background) {
                Some(contact) => {
                    self.impact(contact.hit);
                    self.recycle_bullet(i);
                }
                None => {
                    if let Some(b) = self.bullets.get_mut(i) {
                        b.pos = pos;
                    }
                }
            }
            if self.status != Status::Playing {
                break;
            }
        }
    }

    fn recycle_bullet(&mut self, i: usize) {
        if let Some(b) = self.bullets.get_mut(i) {
            b.recycle();
        }
    }

    fn impact(&mut self, hit: Hit) {
        debug!("bullet hit {hit:?}");
        match hit {
            Hit::Sprite(EntityId::Player) => self.player_hit(),
            Hit::Sprite(EntityId::Base) => {
                info!("base destroyed: game over");
                self.status = Status::GameOver;
            }
            Hit::Sprite(EntityId::Wall(i)) => match self.walls.get_mut(i) {
                Some(wall) => wall.destroy(),
                None => warn!("hit on unknown wall {i}"),
            },
            Hit::Sprite(EntityId::Enemy(i)) => match self.enemies.get_mut(i) {
                Some(enemy) => enemy.deactivate(),
                None => warn!("hit on unknown enemy {i}"),
            },
            Hit::Sprite(EntityId::Bullet(_)) | Hit::Background(_) => {}
        }
    }

    /// A hit costs one life and sends the player back to its spawn cell.
    fn player_hit(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            info!("player out of lives: game over");
            self.status = Status::GameOver;
            return;
        }
        info!("player hit, {} lives left", self.lives);
        self.player = Tank::new(self.player_spawn, None);
    }
}
