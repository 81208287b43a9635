mod common;

use glam::Vec2;
use tankppu::geometry::Direction;
use tankppu::ppu::{EMPTY_BACKGROUND, Ppu, Sprite, background_entry};
use tankppu::projector::{fade_color, project};
use tankppu::sim::World;
use tankppu::slots::{BASE_SLOT, BULLET_SLOTS, ENEMY_SLOTS, EntityId, PLAYER_SLOT, WALL_SLOTS};
use tankppu::{AssetBundle, Mode, PlayMode};

fn scene() -> (AssetBundle, World) {
    let assets = common::bundle(&[common::level_text(&[
        ('p', 4, 29),
        ('b', 16, 29),
        ('w', 0, 0),
        ('w', 1, 0),
        ('e', 10, 5),
        ('e', 20, 5),
        ('o', 31, 29),
    ])]);
    let world = World::new(&assets, &common::quiet_config());
    (assets, world)
}

fn drawn(world: &World, assets: &AssetBundle) -> Ppu {
    let mut ppu = Ppu::new();
    project(world, assets, &mut ppu);
    ppu
}

#[test]
fn test_fixed_slots_hold_player_and_base() {
    let (assets, world) = scene();
    let ppu = drawn(&world, &assets);

    let player = ppu.sprites[PLAYER_SLOT];
    assert_eq!((player.x, player.y), (32, 0));
    assert_eq!(player.index, assets.registry.tile("player", Direction::Up).unwrap());
    assert_eq!(player.palette(), assets.registry.index("player").unwrap());

    let base = ppu.sprites[BASE_SLOT];
    assert_eq!((base.x, base.y), (128, 0));
    assert_eq!(base.index, assets.registry.base_tile("basement").unwrap());
}

#[test]
fn test_walls_enemies_and_bullets_use_their_ranges() {
    let (assets, mut world) = scene();
    world.fire(Vec2::new(100.0, 100.0), Direction::Left, EntityId::Player);
    let ppu = drawn(&world, &assets);

    let walls: Vec<_> = ppu.sprites[WALL_SLOTS].iter().filter(|s| s.is_visible()).collect();
    assert_eq!(walls.len(), 2);
    assert_eq!((walls[0].x, walls[0].y), (0, 232));
    assert_eq!((walls[1].x, walls[1].y), (8, 232));

    let enemies = &ppu.sprites[ENEMY_SLOTS];
    assert_eq!(enemies.iter().filter(|s| s.is_visible()).count(), 2);
    assert_eq!(enemies[0].index, assets.registry.tile("enemy", Direction::Down).unwrap());

    let bullets = &ppu.sprites[BULLET_SLOTS];
    assert_eq!((bullets[0].x, bullets[0].y), (100, 100));
    assert_eq!(bullets[0].index, assets.registry.tile("bullet", Direction::Left).unwrap());
    assert!(bullets[1..].iter().all(|s| *s == Sprite::hidden()));
}

#[test]
fn test_dead_entities_are_hidden() {
    let (assets, mut world) = scene();
    world.walls[1].destroy();
    world.enemies[0].deactivate();
    let ppu = drawn(&world, &assets);

    assert_eq!(ppu.sprites[EntityId::Wall(1).slot().unwrap()], Sprite::hidden());
    assert_eq!(ppu.sprites[EntityId::Enemy(0).slot().unwrap()], Sprite::hidden());
    assert!(ppu.sprites[EntityId::Enemy(1).slot().unwrap()].is_visible());
    // Slots past the level's wall count stay hidden too.
    assert_eq!(ppu.sprites[EntityId::Wall(2).slot().unwrap()], Sprite::hidden());
}

#[test]
fn test_hidden_slots_overwrite_stale_sprites() {
    let (assets, mut world) = scene();
    let mut ppu = Ppu::new();
    ppu.sprites.fill(Sprite { x: 1, y: 2, index: 3, attributes: 4 });
    world.enemies[1].deactivate();
    project(&world, &assets, &mut ppu);
    assert_eq!(ppu.sprites[EntityId::Enemy(1).slot().unwrap()], Sprite::hidden());
    assert_eq!(ppu.sprites[EntityId::Bullet(7).slot().unwrap()], Sprite::hidden());
}

#[test]
fn test_facing_selects_the_rotation() {
    let (assets, mut world) = scene();
    for dir in Direction::ALL {
        world.player.facing = dir;
        let ppu = drawn(&world, &assets);
        let expected = assets.registry.base_tile("player").unwrap() + dir as u8;
        assert_eq!(ppu.sprites[PLAYER_SLOT].index, expected);
    }
}

#[test]
fn test_background_and_color_follow_the_world() {
    let (assets, world) = scene();
    let ppu = drawn(&world, &assets);

    let tile = assets.registry.tile(assets.background_sprite(), Direction::Up).unwrap();
    let entry = background_entry(tile, assets.palette_of(assets.background_sprite()));
    // Level cell (31, 29) is the bottom-right background cell.
    assert_eq!(ppu.background_at(31, 0), entry);
    assert_eq!(ppu.background_at(0, 0), EMPTY_BACKGROUND);
    assert_eq!(ppu.background_color, fade_color(world.background_fade));
    assert_eq!(ppu.background_color[3], 0xff);
}

#[test]
fn test_drawing_does_not_change_the_world() {
    let (assets, world) = scene();
    let before = world.clone();
    drawn(&world, &assets);
    assert_eq!(world.player, before.player);
    assert_eq!(world.enemies, before.enemies);
    assert_eq!(world.bullets, before.bullets);
}

#[test]
fn test_play_mode_draws_a_frame() {
    let level = common::level_text(&[('p', 4, 29), ('b', 16, 29), ('e', 10, 5)]);
    let assets = common::bundle(&[level]);
    let mut game = PlayMode::seeded(assets, common::quiet_config(), 3);
    let mut ppu = Ppu::new();
    game.install(&mut ppu);
    game.update(1.0 / 60.0);
    game.draw(&mut ppu);

    let player_tile = ppu.sprites[PLAYER_SLOT].index as usize;
    assert_eq!(ppu.tile_table[player_tile], game.assets().tiles[player_tile]);
    assert!(ppu.sprites[ENEMY_SLOTS.start].is_visible());
    assert_eq!(ppu.sprite_bytes().len(), 64 * 4);
}
