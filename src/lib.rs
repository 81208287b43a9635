pub mod assets;
pub mod collision;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod mode;
pub mod ppu;
pub mod projector;
pub mod sim;
pub mod slots;

pub use assets::AssetBundle;
pub use config::GameConfig;
pub use error::{AssetError, AssetResult, ConfigError};
pub use mode::{Mode, PlayMode};
pub use ppu::Ppu;
pub use sim::{Status, World};

/// Sprite and level files shipped with the crate, relative to the manifest.
pub const DEFAULT_ASSET_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/resources");
