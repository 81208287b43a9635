use std::fs;

use tankppu::{ConfigError, GameConfig};

#[test]
fn test_defaults_are_valid() {
    let cfg = GameConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.player_speed, 30.0);
    assert_eq!(cfg.enemy_speed, 20.0);
    assert_eq!(cfg.bullet_speed, 3.0);
    assert_eq!(cfg.player_lives, 3);
    assert_eq!(cfg.seed, None);
}

#[test]
fn test_partial_json_keeps_other_defaults() {
    let cfg = GameConfig::from_json(r#"{ "player_speed": 45.0, "seed": 7 }"#).unwrap();
    assert_eq!(cfg.player_speed, 45.0);
    assert_eq!(cfg.seed, Some(7));
    assert_eq!(cfg.enemy_speed, GameConfig::default().enemy_speed);
}

#[test]
fn test_empty_object_is_the_default() {
    assert_eq!(GameConfig::from_json("{}").unwrap(), GameConfig::default());
}

#[test]
fn test_unknown_field_is_rejected() {
    let err = GameConfig::from_json(r#"{ "player_sped": 1.0 }"#);
    assert!(matches!(err, Err(ConfigError::Json(_))));
}

#[test]
fn test_out_of_range_values_are_rejected() {
    let cases = [
        (r#"{ "player_speed": 0.0 }"#, "player_speed"),
        (r#"{ "bullet_speed": -3.0 }"#, "bullet_speed"),
        (r#"{ "enemy_fire_chance": 1.5 }"#, "enemy_fire_chance"),
        (r#"{ "enemy_turn_chance": -0.1 }"#, "enemy_turn_chance"),
        (r#"{ "tank_box": 9.0 }"#, "tank_box"),
        (r#"{ "player_lives": 0 }"#, "player_lives"),
    ];
    for (json, expected) in cases {
        match GameConfig::from_json(json) {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected, "{json}"),
            other => panic!("{json}: expected Invalid, got {other:?}"),
        }
    }
}

#[test]
fn test_load_reads_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{ "enemy_turn_chance": 0.25 }"#).unwrap();
    assert_eq!(GameConfig::load(&path).unwrap().enemy_turn_chance, 0.25);
    let missing = GameConfig::load(dir.path().join("missing.json"));
    assert!(matches!(missing, Err(ConfigError::Io { .. })));
}

#[test]
fn test_shipped_config_loads() {
    let path = std::path::Path::new(tankppu::DEFAULT_ASSET_DIR).join("config.json");
    assert_eq!(GameConfig::load(path).unwrap().seed, Some(466));
}
