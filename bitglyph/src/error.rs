use core::fmt;

use thiserror::Error;

/// Raster axis named by a [`DimensionError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
  Width,
  Height,
}

impl fmt::Display for Axis {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Axis::Width => "width",
      Axis::Height => "height",
    })
  }
}

/// The raster does not have the size the tile grid implies.
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
#[error("invalid image {axis}: {actual} (expected {expected})")]
pub struct DimensionError {
  pub axis: Axis,
  pub expected: u32,
  pub actual: u32,
}

/// A tile layout that can never be encoded.
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
  #[error("tile width {0} exceeds the 8 columns one packed byte can hold")]
  TileTooWide(u32),
  #[error("tile size {width}x{height} must be non-zero")]
  EmptyTile { width: u32, height: u32 },
  #[error("grid {columns}x{rows} must have at least one column and one row")]
  EmptyGrid { columns: u32, rows: u32 },
  #[error("{count} tiles requested but the grid holds {capacity}")]
  TooManyTiles { count: u32, capacity: u32 },
  #[error("grid geometry overflows 32-bit pixel coordinates")]
  Overflow,
}

#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum EncodeError {
  #[error(transparent)]
  BadDimensions(#[from] DimensionError),
  #[error(transparent)]
  Config(#[from] ConfigError),
}
