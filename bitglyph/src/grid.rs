//! Tile grid geometry.
//!
//! A grid is `columns x rows` tiles of `tile_width x tile_height` pixels, with a
//! `margin` around the whole grid and `padding` between neighbouring tiles:
//!
//! ```text
//!   width  = 2*margin + columns*tile_width  + (columns-1)*padding
//!   height = 2*margin + rows   *tile_height + (rows-1)   *padding
//! ```
//!
//! Tiles are numbered row-major from 0; kernels index their glyph tables by
//! that number, so the order is part of the output format.

use crate::error::{Axis, ConfigError, DimensionError};

/// Widest tile a single packed byte per row can hold.
pub const MAX_TILE_WIDTH: u32 = 8;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TileGridSpec {
  tile_width: u32,
  tile_height: u32,
  columns: u32,
  rows: u32,
  margin: u32,
  padding: u32,
  // derived, checked for overflow once
  width: u32,
  height: u32,
}

impl TileGridSpec {
  /// Checks the layout up front: non-empty tiles and grid, tiles at most
  /// [`MAX_TILE_WIDTH`] wide, and a total size that fits in `u32`.
  pub fn new(
    tile_width: u32,
    tile_height: u32,
    columns: u32,
    rows: u32,
    margin: u32,
    padding: u32,
  ) -> Result<Self, ConfigError> {
    if tile_width == 0 || tile_height == 0 {
      return Err(ConfigError::EmptyTile { width: tile_width, height: tile_height });
    }
    if tile_width > MAX_TILE_WIDTH {
      return Err(ConfigError::TileTooWide(tile_width));
    }
    if columns == 0 || rows == 0 {
      return Err(ConfigError::EmptyGrid { columns, rows });
    }
    let width = span(margin, columns, tile_width, padding).ok_or(ConfigError::Overflow)?;
    let height = span(margin, rows, tile_height, padding).ok_or(ConfigError::Overflow)?;
    columns.checked_mul(rows).ok_or(ConfigError::Overflow)?;
    Ok(Self { tile_width, tile_height, columns, rows, margin, padding, width, height })
  }

  #[inline]
  pub fn tile_width(&self) -> u32 {
    self.tile_width
  }
  #[inline]
  pub fn tile_height(&self) -> u32 {
    self.tile_height
  }
  #[inline]
  pub fn columns(&self) -> u32 {
    self.columns
  }
  #[inline]
  pub fn rows(&self) -> u32 {
    self.rows
  }
  #[inline]
  pub fn margin(&self) -> u32 {
    self.margin
  }
  #[inline]
  pub fn padding(&self) -> u32 {
    self.padding
  }

  /// Number of tiles the grid holds.
  #[inline]
  pub fn capacity(&self) -> u32 {
    self.columns * self.rows
  }

  /// Raster size this grid requires, `(width, height)`.
  #[inline]
  pub fn expected_dimensions(&self) -> (u32, u32) {
    (self.width, self.height)
  }

  /// Exact match of the raster size against the grid; width is checked first.
  pub fn validate(&self, width: u32, height: u32) -> Result<(), DimensionError> {
    if width != self.width {
      return Err(DimensionError { axis: Axis::Width, expected: self.width, actual: width });
    }
    if height != self.height {
      return Err(DimensionError { axis: Axis::Height, expected: self.height, actual: height });
    }
    Ok(())
  }

  /// Top-left pixel of tile `index`. `index` must be below [`capacity`](Self::capacity).
  #[inline]
  pub fn tile_origin(&self, index: u32) -> (u32, u32) {
    debug_assert!(index < self.capacity(), "tile {index} outside {}x{} grid", self.columns, self.rows);
    let col = index % self.columns;
    let row = index / self.columns;
    (
      self.margin + (self.tile_width + self.padding) * col,
      self.margin + (self.tile_height + self.padding) * row,
    )
  }
}

/// `2*margin + count*tile + (count-1)*padding`, `None` on overflow.
fn span(margin: u32, count: u32, tile: u32, padding: u32) -> Option<u32> {
  let tiles = count.checked_mul(tile)?;
  let gaps = (count - 1).checked_mul(padding)?;
  margin.checked_mul(2)?.checked_add(tiles)?.checked_add(gaps)
}
