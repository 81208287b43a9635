#![allow(dead_code)]

use tankppu::assets::{LevelSource, REQUIRED_SPRITES, SpriteSource};
use tankppu::{AssetBundle, GameConfig};

/// A solid 8×8 block in color 1 with a distinct first color per name.
pub fn sprite_text(seed: u8) -> String {
    let mut text = String::from("# fixture\n");
    text.push_str(&format!("{seed:02x}0000ff\n00{seed:02x}00ff\n0000{seed:02x}ff\n"));
    for _ in 0..8 {
        text.push_str("11111111\n");
    }
    text
}

pub fn sprite_sources(extra: &[&str]) -> Vec<SpriteSource> {
    REQUIRED_SPRITES
        .iter()
        .chain(extra)
        .enumerate()
        .map(|(i, name)| SpriteSource::new(*name, sprite_text(i as u8 * 16 + 1)))
        .collect()
}

/// A 32×30 grid with `markers` placed at `(column, row)`.
pub fn level_text(markers: &[(char, usize, usize)]) -> String {
    let mut rows = vec![vec!['.'; 32]; 30];
    for &(ch, col, row) in markers {
        rows[row][col] = ch;
    }
    rows.into_iter().map(|r| r.into_iter().collect::<String>() + "\n").collect()
}

pub fn bundle(levels: &[String]) -> AssetBundle {
    let levels: Vec<LevelSource> = levels
        .iter()
        .enumerate()
        .map(|(i, text)| LevelSource::new(format!("level{i}"), text.clone()))
        .collect();
    AssetBundle::from_sources(&sprite_sources(&["background"]), &levels)
        .expect("fixture assets load")
}

/// Enemies that never turn or shoot, so tests control every event.
pub fn quiet_config() -> GameConfig {
    GameConfig {
        enemy_turn_chance: 0.0,
        enemy_fire_chance: 0.0,
        seed: Some(1),
        ..GameConfig::default()
    }
}
