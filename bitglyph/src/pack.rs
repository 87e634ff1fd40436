//! 1bpp bit packing.
//!
//! Both layouts are LSB-first: bit 0 (value 1) of a byte is the leftmost pixel
//! it covers. This is the order the kernel renderer shifts bytes out in.
//!
//! - **Tile rows**: one byte per tile row, bit `x` = column `x`. Tiles are at
//!   most 8 columns wide (see [`MAX_TILE_WIDTH`](crate::grid::MAX_TILE_WIDTH)).
//! - **Stride rows**: `ceil(width/8)` bytes per row, byte `x/8` bit `x%8` =
//!   column `x`. Unused high bits of the last byte stay zero.

use crate::error::ConfigError;
use crate::grid::MAX_TILE_WIDTH;

/// Bytes needed to hold `width` packed pixels.
#[inline]
pub const fn stride(width: u32) -> usize {
  (width as usize + 7) / 8
}

/// Pack one tile row into a byte. Callers keep rows at most 8 pixels wide.
#[inline]
fn pack_tile_row(bits: &[bool]) -> u8 {
  bits.iter().enumerate().fold(0u8, |b, (x, &set)| if set { b | (1 << x) } else { b })
}

/// Pack a `height x width` row-major tile, appending `height` bytes to `out`.
/// Widths over [`MAX_TILE_WIDTH`] are rejected; nothing is appended then.
pub fn pack_tile(bits: &[bool], width: usize, out: &mut Vec<u8>) -> Result<(), ConfigError> {
  if width > MAX_TILE_WIDTH as usize {
    return Err(ConfigError::TileTooWide(u32::try_from(width).unwrap_or(u32::MAX)));
  }
  if width == 0 {
    return Err(ConfigError::EmptyTile { width: 0, height: 0 });
  }
  debug_assert_eq!(bits.len() % width, 0);
  out.extend(bits.chunks_exact(width).map(pack_tile_row));
  Ok(())
}

/// Pack an arbitrary-width row, appending [`stride`] bytes to `out`.
pub fn pack_row(bits: &[bool], out: &mut Vec<u8>) {
  let start = out.len();
  out.resize(start + stride(bits.len() as u32), 0);
  let line = &mut out[start..];
  for (x, &set) in bits.iter().enumerate() {
    if set {
      line[x / 8] |= 1 << (x % 8);
    }
  }
}
