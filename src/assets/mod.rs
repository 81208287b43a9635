pub mod level;
pub mod sprite;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{AssetError, AssetResult};
use crate::ppu::{Palette, Ppu, TILE_COUNT, Tile};

pub use level::{Level, parse_level};
pub use sprite::{CompiledSprite, SpriteRegistry, compile_sprite};

/// Sprite names the simulation draws with. Loading fails without them.
pub const REQUIRED_SPRITES: [&str; 5] = ["basement", "bullet", "enemy", "player", "wall"];
/// Tile for background blocks; `wall` is used when absent.
pub const BACKGROUND_SPRITE: &str = "background";

/// Text of one sprite description.
#[derive(Clone, Debug)]
pub struct SpriteSource {
    pub name: String,
    /// Shown in error messages.
    pub file: String,
    pub text: String,
}

impl SpriteSource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        let name = name.into();
        Self { file: name.clone(), name, text: text.into() }
    }
}

/// Text of one level grid.
#[derive(Clone, Debug)]
pub struct LevelSource {
    pub file: String,
    pub text: String,
}

impl LevelSource {
    pub fn new(file: impl Into<String>, text: impl Into<String>) -> Self {
        Self { file: file.into(), text: text.into() }
    }
}

// ── AssetBundle ──────────────────────────────────────────────────────────────

/// Everything loaded at startup. Immutable once built; the simulation and
/// projector borrow it.
#[derive(Clone, Debug)]
pub struct AssetBundle {
    pub registry: SpriteRegistry,
    /// `tiles[i*4 + d]` is sprite `i` facing direction `d`.
    pub tiles: Vec<Tile>,
    /// `palettes[i]` belongs to sprite `i`.
    pub palettes: Vec<Palette>,
    /// Levels in file-name order; the index selects a level.
    pub levels: Vec<Level>,
}

impl AssetBundle {
    /// Compile in-memory sources. Sprite indices follow name order, levels
    /// keep the order given.
    pub fn from_sources(sprites: &[SpriteSource], levels: &[LevelSource]) -> AssetResult<Self> {
        let compiled = sprites
            .iter()
            .map(|s| compile_sprite(&s.name, &s.file, &s.text))
            .collect::<AssetResult<Vec<_>>>()?;

        let registry = SpriteRegistry::from_names(compiled.iter().map(|s| s.name.as_str()))?;
        for name in REQUIRED_SPRITES {
            if !registry.contains(name) {
                return Err(AssetError::MissingSprite(name.to_string()));
            }
        }

        let mut tiles = vec![Tile::default(); registry.len() * 4];
        let mut palettes = vec![Palette::default(); registry.len()];
        for compiled in &compiled {
            // A repeated name overwrites the earlier sprite.
            let Some(index) = registry.index(&compiled.name) else { continue };
            let base = index as usize * 4;
            tiles[base..base + 4].copy_from_slice(&compiled.tiles);
            palettes[index as usize] = compiled.palette;
        }
        for (name, index) in registry.iter() {
            info!("sprite {name} => {index}");
        }

        let levels = levels
            .iter()
            .map(|l| parse_level(&l.file, &l.text))
            .collect::<AssetResult<Vec<_>>>()?;
        if levels.is_empty() {
            return Err(AssetError::NoLevels);
        }
        info!("loaded {} level(s)", levels.len());

        Ok(Self { registry, tiles, palettes, levels })
    }

    /// Load `root/sprites/*` and `root/levels/*`. Files are visited in name
    /// order; names starting with `.` are skipped.
    pub fn load_dir(root: impl AsRef<Path>) -> AssetResult<Self> {
        let root = root.as_ref();
        let sprites = read_sorted(&root.join("sprites"))?
            .into_iter()
            .map(|(path, text)| SpriteSource {
                name: file_stem(&path),
                file: path.display().to_string(),
                text,
            })
            .collect::<Vec<_>>();
        let levels = read_sorted(&root.join("levels"))?
            .into_iter()
            .map(|(path, text)| LevelSource { file: file_stem(&path), text })
            .collect::<Vec<_>>();
        Self::from_sources(&sprites, &levels)
    }

    /// Copy tiles and palettes into the PPU's tables.
    pub fn install(&self, ppu: &mut Ppu) {
        let count = self.tiles.len().min(TILE_COUNT);
        ppu.tile_table[..count].copy_from_slice(&self.tiles[..count]);
        for (dst, src) in ppu.palette_table.iter_mut().zip(&self.palettes) {
            *dst = *src;
        }
    }

    /// Palette index for a registered sprite, 0 if unknown.
    pub fn palette_of(&self, name: &str) -> u8 {
        self.registry.index(name).unwrap_or(0)
    }

    /// Sprite used for background blocks.
    pub fn background_sprite(&self) -> &'static str {
        if self.registry.contains(BACKGROUND_SPRITE) { BACKGROUND_SPRITE } else { "wall" }
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem().and_then(|s| s.to_str()).unwrap_or_default().to_string()
}

/// Read every regular, non-hidden file directly under `dir`, sorted by name.
fn read_sorted(dir: &Path) -> AssetResult<Vec<(PathBuf, String)>> {
    let mut out = Vec::new();
    for entry in walkdir::WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() || entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.into_path();
        let text = std::fs::read_to_string(&path)
            .map_err(|source| AssetError::Io { path: path.clone(), source })?;
        debug!("read {:?}", path);
        out.push((path, text));
    }
    Ok(out)
}
