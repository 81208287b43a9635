// =============================================================================
// LEVEL.RS: ASCII level grids
//
//   p  player start        e  enemy spawn
//   b  base                o  background block
//   w  wall                anything else is floor
//
// Row = line index (top line first), column = character index.
// =============================================================================

use glam::{IVec2, Vec2};

use crate::error::{AssetError, AssetResult};
use crate::geometry::{PLAYFIELD_COLS, PLAYFIELD_ROWS};
use crate::ppu::TILE_SIZE;
use crate::slots::{MAX_ENEMIES, MAX_WALLS};

pub const PLAYER_MARKER: char = 'p';
pub const BASE_MARKER: char = 'b';
pub const WALL_MARKER: char = 'w';
pub const ENEMY_MARKER: char = 'e';
pub const DECORATION_MARKER: char = 'o';

/// One parsed level. Cells are `(column, row)` exactly as they appear in the
/// file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    pub name: String,
    pub player: IVec2,
    pub base: IVec2,
    pub walls: Vec<IVec2>,
    pub enemies: Vec<IVec2>,
    /// Background-only blocks, drawn into the tile grid.
    pub decorations: Vec<IVec2>,
}

impl Level {
    /// Pixel position of a grid cell. The top text row sits at the top of
    /// the playfield.
    pub fn cell_position(cell: IVec2) -> Vec2 {
        let tile = TILE_SIZE as i32;
        Vec2::new((cell.x * tile) as f32, ((PLAYFIELD_ROWS - 1 - cell.y) * tile) as f32)
    }

    /// Background grid coordinates of a grid cell.
    pub fn background_cell(cell: IVec2) -> IVec2 {
        IVec2::new(cell.x, PLAYFIELD_ROWS - 1 - cell.y)
    }
}

/// Parse one level. `file` names the level and labels errors.
pub fn parse_level(file: &str, text: &str) -> AssetResult<Level> {
    let mut player: Option<IVec2> = None;
    let mut base: Option<IVec2> = None;
    let mut walls = Vec::new();
    let mut enemies = Vec::new();
    let mut decorations = Vec::new();

    for (row, line) in text.lines().enumerate() {
        for (column, ch) in line.chars().enumerate() {
            let slot = match ch {
                PLAYER_MARKER => &mut player,
                BASE_MARKER => &mut base,
                WALL_MARKER | ENEMY_MARKER | DECORATION_MARKER => {
                    let cell = checked_cell(file, row, column)?;
                    match ch {
                        WALL_MARKER => walls.push(cell),
                        ENEMY_MARKER => enemies.push(cell),
                        _ => decorations.push(cell),
                    }
                    continue;
                }
                _ => continue,
            };
            if slot.is_some() {
                return Err(AssetError::DuplicateMarker {
                    file: file.to_string(),
                    line: row + 1,
                    marker: ch,
                });
            }
            *slot = Some(checked_cell(file, row, column)?);
        }
    }

    let missing = |marker| AssetError::MissingMarker { file: file.to_string(), marker };
    let player = player.ok_or_else(|| missing(PLAYER_MARKER))?;
    let base = base.ok_or_else(|| missing(BASE_MARKER))?;

    if walls.len() > MAX_WALLS {
        return Err(AssetError::TooManyEntities {
            file: file.to_string(),
            kind: "walls",
            count: walls.len(),
            max: MAX_WALLS,
        });
    }
    if enemies.len() > MAX_ENEMIES {
        return Err(AssetError::TooManyEntities {
            file: file.to_string(),
            kind: "enemies",
            count: enemies.len(),
            max: MAX_ENEMIES,
        });
    }

    Ok(Level { name: file.to_string(), player, base, walls, enemies, decorations })
}

fn checked_cell(file: &str, row: usize, column: usize) -> AssetResult<IVec2> {
    if column as i32 >= PLAYFIELD_COLS || row as i32 >= PLAYFIELD_ROWS {
        return Err(AssetError::OutOfPlayfield { file: file.to_string(), line: row + 1, column });
    }
    Ok(IVec2::new(column as i32, row as i32))
}
