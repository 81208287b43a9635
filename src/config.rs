use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

// ── GameConfig ────────────────────────────────────────────────────────────────

/// Tunables for one play session.
///
/// Read from JSON; any field left out keeps its default:
///
/// ```json
/// { "player_speed": 40.0, "enemy_fire_chance": 0.002, "seed": 7 }
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Player tank speed in pixels per second.
    pub player_speed: f32,
    /// Enemy tank speed in pixels per second.
    pub enemy_speed: f32,
    /// Bullet travel in pixels per tick.
    pub bullet_speed: f32,
    /// Per-frame probability that an enemy picks a new direction.
    pub enemy_turn_chance: f64,
    /// Per-frame probability that an enemy fires.
    pub enemy_fire_chance: f64,
    /// Lives the player starts with; a bullet hit costs one.
    pub player_lives: u32,
    /// Collision box edge for tanks, in pixels.
    pub tank_box: f32,
    /// Collision box edge for bullets, in pixels.
    pub bullet_box: f32,
    /// Seed for the AI random source. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_speed: 30.0,
            enemy_speed: 20.0,
            bullet_speed: 3.0,
            enemy_turn_chance: 1.0 / 20.0,
            enemy_fire_chance: 1.0 / 1000.0,
            player_lives: 3,
            tank_box: 8.0,
            bullet_box: 4.0,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: GameConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("player_speed", self.player_speed)?;
        positive("enemy_speed", self.enemy_speed)?;
        positive("bullet_speed", self.bullet_speed)?;
        positive("tank_box", self.tank_box)?;
        positive("bullet_box", self.bullet_box)?;
        probability("enemy_turn_chance", self.enemy_turn_chance)?;
        probability("enemy_fire_chance", self.enemy_fire_chance)?;
        if self.tank_box > 8.0 || self.bullet_box > 8.0 {
            return Err(ConfigError::Invalid {
                field: if self.tank_box > 8.0 { "tank_box" } else { "bullet_box" },
                reason: "boxes cannot be larger than one 8×8 tile".into(),
            });
        }
        if self.player_lives == 0 {
            return Err(ConfigError::Invalid {
                field: "player_lives",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, v: f32) -> Result<(), ConfigError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason: format!("{v} is not a positive number") })
    }
}

fn probability(field: &'static str, p: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason: format!("{p} is outside [0, 1]") })
    }
}
