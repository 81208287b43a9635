//! Headless driver: loads the assets, runs a fixed number of frames with a
//! scripted trigger finger and reports how the round went.
//!
//! Usage: `tankppu [ASSET_DIR] [FRAMES]`. `ASSET_DIR/config.json` is read
//! when present.

use std::path::PathBuf;
use std::process::ExitCode;

use tankppu::input::KeyCode;
use tankppu::{AssetBundle, DEFAULT_ASSET_DIR, GameConfig, Mode, PlayMode, Ppu, Status};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const FRAME_TIME: f32 = 1.0 / 60.0;
const DEFAULT_FRAMES: u32 = 60 * 60;
/// Tap fire this often, in frames.
const FIRE_EVERY: u32 = 45;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tankppu=debug")),
        )
        .with_target(true)
        .init();

    let mut args = std::env::args().skip(1);
    let root = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from(DEFAULT_ASSET_DIR));
    let frames = args.next().and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_FRAMES);

    let config_path = root.join("config.json");
    let config = if config_path.is_file() {
        match GameConfig::load(&config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!("{e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        GameConfig::default()
    };

    let assets = match AssetBundle::load_dir(&root) {
        Ok(a) => a,
        Err(e) => {
            error!("asset loading failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut ppu = Ppu::new();
    let mut mode = PlayMode::new(assets, config);
    mode.install(&mut ppu);

    let mut frame = 0;
    while frame < frames && mode.status() == Status::Playing {
        let fire = frame % FIRE_EVERY == 0;
        mode.handle_key(KeyCode::Space, fire);
        mode.update(FRAME_TIME);
        mode.draw(&mut ppu);
        frame += 1;
    }

    let world = mode.world();
    info!(
        "stopped after {frame} frames: {:?}, level {}, {} lives, {} enemies left, {} visible",
        world.status,
        world.level_index,
        world.lives,
        world.enemies_alive(),
        ppu.sprites.iter().filter(|s| s.is_visible()).count(),
    );
    ExitCode::SUCCESS
}
