//! Layouts of the stock asset tools.

use crate::classify::{ChromaMode, ForegroundPolicy, Threshold};
use crate::encode::TileBitmapEncoder;
use crate::error::ConfigError;
use crate::grid::TileGridSpec;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Preset {
  /// 128 ASCII glyphs, 6x8, 16 per row, no margin; white (`red == 0xFF`) is set.
  /// Source image: 96x64.
  LegacyFont,
  /// 256 icons, 8x8, 16x16 grid, 1px margin and padding; anything not matching
  /// the key color at (1, 1) is set. Source image: 145x145.
  Icons,
  /// 256 glyphs, 6x6, 16x16 grid, no margin or padding; keyed like `Icons`
  /// with the key sampled at (0, 0). Source image: 96x96.
  Grid96,
}

impl Preset {
  pub const ALL: [Preset; 3] = [Preset::LegacyFont, Preset::Icons, Preset::Grid96];

  /// `(tile_width, tile_height, columns, rows, margin, padding)`.
  const fn geometry(self) -> (u32, u32, u32, u32, u32, u32) {
    match self {
      Preset::LegacyFont => (6, 8, 16, 8, 0, 0),
      Preset::Icons => (8, 8, 16, 16, 1, 1),
      Preset::Grid96 => (6, 6, 16, 16, 0, 0),
    }
  }

  pub fn grid(self) -> Result<TileGridSpec, ConfigError> {
    let (tw, th, cols, rows, margin, padding) = self.geometry();
    TileGridSpec::new(tw, th, cols, rows, margin, padding)
  }

  pub const fn policy(self) -> ForegroundPolicy {
    match self {
      Preset::LegacyFont => ForegroundPolicy::Threshold(Threshold::RED_FULL),
      Preset::Icons | Preset::Grid96 => ForegroundPolicy::ChromaKey(ChromaMode::EqualIsBackground),
    }
  }

  pub const fn tile_count(self) -> u32 {
    match self {
      Preset::LegacyFont => 128,
      Preset::Icons | Preset::Grid96 => 256,
    }
  }

  pub fn encoder(self) -> Result<TileBitmapEncoder, ConfigError> {
    TileBitmapEncoder::new(self.grid()?, self.policy(), self.tile_count())
  }
}
