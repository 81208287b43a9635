// =============================================================================
// SPRITE.RS: Text sprite descriptions → bitplane tiles and palettes
//
// A description is plain text:
//
//   # comment lines and blank lines are ignored
//   ff0000ff        ← palette color 1 (RRGGBBAA)
//   00ff00ff        ← palette color 2
//   0000ffff        ← palette color 3
//   00011000        ← 8 rows of 8 color indices (0..=3), top row first
//   ...
//
// Each sprite compiles to four tiles (up, right, down, left) and one palette.
// =============================================================================

use std::collections::BTreeMap;

use crate::error::{AssetError, AssetResult};
use crate::geometry::Direction;
use crate::ppu::{PALETTE_COUNT, Palette, Rgba, TRANSPARENT, Tile};

const COLOR_LINES: usize = 3;
const ROW_LINES: usize = 8;

/// One sprite type after compilation.
#[derive(Clone, Debug, PartialEq)]
pub struct CompiledSprite {
    pub name: String,
    pub palette: Palette,
    /// Rotation variants indexed by `Direction::tile_offset`.
    pub tiles: [Tile; 4],
}

/// Compile one description. `file` only labels errors.
pub fn compile_sprite(name: &str, file: &str, text: &str) -> AssetResult<CompiledSprite> {
    let mut palette: Palette = [TRANSPARENT; 4];
    let mut up = Tile::default();
    let mut data_lines = 0usize;

    for (line_no, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line_no = line_no + 1;

        if data_lines < COLOR_LINES {
            palette[data_lines + 1] = parse_color(line).ok_or_else(|| AssetError::Parse {
                file: file.to_string(),
                line: line_no,
                message: format!("expected 8 hex digits (RRGGBBAA), got {line:?}"),
            })?;
        } else if data_lines < COLOR_LINES + ROW_LINES {
            // Text is written top-down; tile row 0 is the bottom row.
            let row = ROW_LINES - 1 - (data_lines - COLOR_LINES);
            let (bit0, bit1) = parse_row(line).ok_or_else(|| AssetError::Parse {
                file: file.to_string(),
                line: line_no,
                message: format!("expected 8 color indices in 0..=3, got {line:?}"),
            })?;
            up.bit0[row] = bit0;
            up.bit1[row] = bit1;
        }
        data_lines += 1;
    }

    if data_lines != COLOR_LINES + ROW_LINES {
        return Err(AssetError::WrongLineCount { file: file.to_string(), found: data_lines });
    }

    Ok(CompiledSprite { name: name.to_string(), palette, tiles: rotations(up) })
}

/// The base tile and its three successive quarter turns.
pub fn rotations(up: Tile) -> [Tile; 4] {
    let right = up.rotated();
    let down = right.rotated();
    let left = down.rotated();
    [up, right, down, left]
}

fn parse_color(line: &str) -> Option<Rgba> {
    if line.len() != 8 || !line.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let mut rgba = [0u8; 4];
    for (i, channel) in rgba.iter_mut().enumerate() {
        *channel = u8::from_str_radix(&line[i * 2..i * 2 + 2], 16).ok()?;
    }
    Some(rgba)
}

/// One row of digits into its two bitplane bytes. Digit `c` lands in bit `c`.
fn parse_row(line: &str) -> Option<(u8, u8)> {
    if line.len() != 8 {
        return None;
    }
    let mut bit0 = 0u8;
    let mut bit1 = 0u8;
    for (col, b) in line.bytes().enumerate() {
        let digit = match b {
            b'0'..=b'3' => b - b'0',
            _ => return None,
        };
        bit0 |= (digit & 1) << col;
        bit1 |= ((digit >> 1) & 1) << col;
    }
    Some((bit0, bit1))
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Name → sprite index. Sprite `i` owns tiles `i*4 ..= i*4+3` and palette `i`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpriteRegistry {
    indices: BTreeMap<String, u8>,
}

impl SpriteRegistry {
    /// Assign indices in name order so the numbering never depends on how
    /// the file system enumerates a directory.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> AssetResult<Self> {
        let mut sorted: Vec<&str> = names.into_iter().collect();
        sorted.sort_unstable();
        sorted.dedup();
        if sorted.len() > PALETTE_COUNT {
            return Err(AssetError::TooManySprites { count: sorted.len(), max: PALETTE_COUNT });
        }
        let indices = sorted
            .into_iter()
            .enumerate()
            .map(|(i, name)| (name.to_string(), i as u8))
            .collect();
        Ok(Self { indices })
    }

    pub fn index(&self, name: &str) -> Option<u8> {
        self.indices.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }

    /// First of the sprite's four rotation tiles.
    pub fn base_tile(&self, name: &str) -> Option<u8> {
        self.index(name).map(|i| i * 4)
    }

    /// Tile index of the rotation facing `dir`.
    pub fn tile(&self, name: &str, dir: Direction) -> Option<u8> {
        self.base_tile(name).map(|base| base + dir.tile_offset())
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// `(name, index)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.indices.iter().map(|(n, &i)| (n.as_str(), i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARROW: &str = "\
# arrow
ff0000ff
00ff00ff
0000ffff
00011000
00111100
01111110
00011000
00011000
00011000
00011000
00000000
";

    #[test]
    fn palette_entry_zero_is_transparent() {
        let s = compile_sprite("arrow", "arrow", ARROW).unwrap();
        assert_eq!(s.palette[0], TRANSPARENT);
        assert_eq!(s.palette[1], [0xff, 0, 0, 0xff]);
        assert_eq!(s.palette[3], [0, 0, 0xff, 0xff]);
    }

    #[test]
    fn first_text_row_is_top_tile_row() {
        let s = compile_sprite("arrow", "arrow", ARROW).unwrap();
        assert_eq!(s.tiles[0].bit0[7], 0b0001_1000);
        assert_eq!(s.tiles[0].bit0[0], 0);
    }

    #[test]
    fn digits_split_into_planes() {
        let (bit0, bit1) = parse_row("01230000").unwrap();
        assert_eq!(bit0, 0b0000_1010);
        assert_eq!(bit1, 0b0000_1100);
    }

    #[test]
    fn bad_digit_reports_line() {
        let text = ARROW.replace("00111100", "00141100");
        match compile_sprite("arrow", "arrow.sprite", &text) {
            Err(AssetError::Parse { file, line, .. }) => {
                assert_eq!(file, "arrow.sprite");
                assert_eq!(line, 6);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn sign_prefixed_hex_is_rejected() {
        assert_eq!(parse_color("+f0000ff"), None);
    }

    #[test]
    fn registry_orders_by_name() {
        let reg = SpriteRegistry::from_names(["wall", "bullet", "player"]).unwrap();
        assert_eq!(reg.index("bullet"), Some(0));
        assert_eq!(reg.index("player"), Some(1));
        assert_eq!(reg.index("wall"), Some(2));
        assert_eq!(reg.tile("wall", Direction::Left), Some(11));
    }
}
