//! Build-time compilers for small-kernel assets: 1bpp tile fonts and icon
//! sheets, 1bpp bitmaps, and keyboard scancode tables.
//!
//! Tile fonts are read from a grid image and stored as `tile_height` bytes per
//! tile, bit `x` of byte `y` set when column `x` of row `y` is foreground:
//!
//! ```
//! # use bitglyph::{Canvas, Color, Threshold, TileGridSpec, encode};
//! let grid = TileGridSpec::new(8, 8, 2, 2, 0, 0).unwrap();
//! let mut sheet = Canvas::new(16, 16, Color::BLACK);
//! sheet.fill_rect(0, 0, 8, 8, Color::WHITE);
//! let blob = encode(&sheet, grid, Threshold::RED_FULL.into(), 4).unwrap();
//! assert_eq!(blob.len(), 4 * 8);
//! assert_eq!(&blob[..8], &[0xFF; 8]);
//! ```
//!
//! Bitmaps ([`encode_bitmap`]) carry a `u32 width, u32 height` header followed
//! by `ceil(width/8)` bytes per row. Keymaps ([`keymap::compile`]) are
//! 128 × 4-byte entries.

mod classify;
mod color;
mod encode;
mod error;
mod grid;
pub mod keymap;
pub mod pack;
mod preset;
mod raster;

pub use classify::{ChromaMode, ForegroundPolicy, PixelClassifier, Threshold};
pub use color::{Channel, Color};
pub use encode::{BITMAP_HEADER_LEN, TileBitmapEncoder, encode, encode_bitmap};
pub use error::{Axis, ConfigError, DimensionError, EncodeError};
pub use grid::{MAX_TILE_WIDTH, TileGridSpec};
pub use keymap::{Keymap, KeymapError};
pub use preset::Preset;
pub use raster::{Canvas, Raster};
