// =============================================================================
// PPU.RS: The picture-processing unit the core writes into
//
// A fixed-function 466-style PPU:
// - 256 tiles of 8×8 pixels, 2 bits per pixel, stored as two bitplanes
// - 8 palettes of 4 RGBA colors (color 0 is transparent)
// - 64 sprites, each an 8×8 tile placed at integer pixel coordinates
// - a 64×60 background tile grid plus a single clear color
//
// The renderer that turns these buffers into pixels lives outside this crate.
// Origin is the bottom-left corner of the screen, +y is up.
// =============================================================================

use glam::IVec2;

/// Visible screen width in pixels.
pub const SCREEN_WIDTH: u32 = 256;
/// Visible screen height in pixels.
pub const SCREEN_HEIGHT: u32 = 240;

/// Edge length of one tile in pixels.
pub const TILE_SIZE: u32 = 8;

pub const TILE_COUNT: usize = 256;
pub const PALETTE_COUNT: usize = 8;
pub const SPRITE_COUNT: usize = 64;

pub const BACKGROUND_WIDTH: usize = 64;
pub const BACKGROUND_HEIGHT: usize = 60;

/// Background entry meaning "nothing here": tile 255 with palette 7.
pub const EMPTY_BACKGROUND: u16 = 0b0000_0111_1111_1111;

/// One RGBA color, 8 bits per channel.
pub type Rgba = [u8; 4];

/// Color index 0 of every palette. Never drawn.
pub const TRANSPARENT: Rgba = [0, 0, 0, 0];

/// Four colors selected by a tile's 2-bit pixel values.
pub type Palette = [Rgba; 4];

// ── Tile ─────────────────────────────────────────────────────────────────────

/// 8×8 two-bitplane tile. Row 0 is the bottom row; bit `x` of a row byte is
/// column `x`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Tile {
    pub bit0: [u8; 8],
    pub bit1: [u8; 8],
}

impl Tile {
    /// Color index (0..=3) of the pixel at column `x`, row `y`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        let lo = (self.bit0[y] >> x) & 1;
        let hi = (self.bit1[y] >> x) & 1;
        (hi << 1) | lo
    }

    /// Set the color index of one pixel. Only the low two bits of `color` are used.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: u8) {
        let mask = 1u8 << x;
        self.bit0[y] = (self.bit0[y] & !mask) | ((color & 1) << x);
        self.bit1[y] = (self.bit1[y] & !mask) | (((color >> 1) & 1) << x);
    }

    /// Quarter turn: pixel `(row i, col j)` of the result is pixel
    /// `(row j, col 7-i)` of `self`, applied to both bitplanes.
    ///
    /// With +y up this turns the image clockwise, so repeated application
    /// walks up → right → down → left.
    pub fn rotated(&self) -> Tile {
        let mut out = Tile::default();
        for i in 0..8 {
            for j in 0..8 {
                out.bit0[i] |= ((self.bit0[j] >> (7 - i)) & 1) << j;
                out.bit1[i] |= ((self.bit1[j] >> (7 - i)) & 1) << j;
            }
        }
        out
    }
}

// ── Sprite ───────────────────────────────────────────────────────────────────

/// One entry of the 64-slot sprite table.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Sprite {
    pub x: u8,
    pub y: u8,
    /// Index into the tile table.
    pub index: u8,
    /// Low 3 bits select the palette.
    pub attributes: u8,
}

impl Sprite {
    /// A sprite placed below the visible area.
    pub const fn hidden() -> Self {
        Self { x: 0, y: 250, index: 0, attributes: 0 }
    }

    pub fn is_visible(&self) -> bool {
        (self.y as u32) < SCREEN_HEIGHT
    }

    pub fn palette(&self) -> u8 {
        self.attributes & 0x07
    }
}

// ── Background helpers ───────────────────────────────────────────────────────

/// Pack a tile and palette index into a background entry.
#[inline]
pub fn background_entry(tile: u8, palette: u8) -> u16 {
    (tile as u16) | (((palette & 0x07) as u16) << 8)
}

/// Index into `Ppu::background` for cell `(x, y)`.
#[inline]
pub fn background_index(x: usize, y: usize) -> usize {
    y * BACKGROUND_WIDTH + x
}

// ── Ppu ──────────────────────────────────────────────────────────────────────

/// All PPU-visible state. Plain data; the renderer reads it after `draw`.
#[derive(Clone, Debug)]
pub struct Ppu {
    pub palette_table: [Palette; PALETTE_COUNT],
    pub tile_table: [Tile; TILE_COUNT],
    pub sprites: [Sprite; SPRITE_COUNT],
    pub background: [u16; BACKGROUND_WIDTH * BACKGROUND_HEIGHT],
    pub background_position: IVec2,
    pub background_color: Rgba,
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

impl Ppu {
    pub fn new() -> Self {
        Self {
            palette_table: [[TRANSPARENT; 4]; PALETTE_COUNT],
            tile_table: [Tile::default(); TILE_COUNT],
            sprites: [Sprite::hidden(); SPRITE_COUNT],
            background: [EMPTY_BACKGROUND; BACKGROUND_WIDTH * BACKGROUND_HEIGHT],
            background_position: IVec2::ZERO,
            background_color: [0, 0, 0, 0xff],
        }
    }

    /// Raw sprite table bytes, ready for a GPU buffer upload.
    pub fn sprite_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.sprites)
    }

    /// Raw tile table bytes, ready for a GPU buffer upload.
    pub fn tile_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.tile_table)
    }

    /// Background entry at `(x, y)`, or `EMPTY_BACKGROUND` outside the grid.
    pub fn background_at(&self, x: i32, y: i32) -> u16 {
        if x < 0 || y < 0 || x as usize >= BACKGROUND_WIDTH || y as usize >= BACKGROUND_HEIGHT {
            return EMPTY_BACKGROUND;
        }
        self.background[background_index(x as usize, y as usize)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_reads_both_planes() {
        let mut t = Tile::default();
        t.bit0[2] = 0b0000_1000;
        t.bit1[2] = 0b0000_1100;
        assert_eq!(t.pixel(3, 2), 3);
        assert_eq!(t.pixel(2, 2), 2);
        assert_eq!(t.pixel(0, 2), 0);
    }

    #[test]
    fn set_pixel_round_trips() {
        let mut t = Tile::default();
        t.set_pixel(5, 7, 2);
        assert_eq!(t.pixel(5, 7), 2);
        t.set_pixel(5, 7, 1);
        assert_eq!(t.pixel(5, 7), 1);
    }

    #[test]
    fn four_rotations_are_identity() {
        let mut t = Tile::default();
        t.set_pixel(1, 6, 3);
        t.set_pixel(4, 0, 1);
        let back = t.rotated().rotated().rotated().rotated();
        assert_eq!(back, t);
    }

    #[test]
    fn sprite_table_is_256_bytes() {
        let ppu = Ppu::new();
        assert_eq!(ppu.sprite_bytes().len(), 256);
        assert_eq!(ppu.tile_bytes().len(), 256 * 16);
    }

    #[test]
    fn hidden_sprite_is_not_visible() {
        assert!(!Sprite::hidden().is_visible());
    }
}
