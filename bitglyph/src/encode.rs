//! Raster → packed 1bpp blobs.
//!
//! Tile blob (font/icon tables):
//!   tile_count × tile_height bytes, tile `i` at offset `i * tile_height`,
//!   one byte per tile row (LSB = leftmost column). No header.
//!
//! Bitmap blob (arbitrary images):
//!   u32 width (LE), u32 height (LE),
//!   height × ceil(width/8) bytes, rows top to bottom (LSB = leftmost column).

use log::{debug, trace};

use crate::classify::{ForegroundPolicy, PixelClassifier, Threshold};
use crate::error::{ConfigError, EncodeError};
use crate::grid::TileGridSpec;
use crate::pack;
use crate::raster::Raster;

/// Size of the `{width, height}` prefix of a bitmap blob.
pub const BITMAP_HEADER_LEN: usize = 8;

/// Slices a raster into a tile grid and packs every tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TileBitmapEncoder {
  grid: TileGridSpec,
  policy: ForegroundPolicy,
  tile_count: u32,
}

impl TileBitmapEncoder {
  /// Encode the first `tile_count` tiles of `grid` (row-major).
  pub fn new(grid: TileGridSpec, policy: ForegroundPolicy, tile_count: u32) -> Result<Self, ConfigError> {
    if tile_count > grid.capacity() {
      return Err(ConfigError::TooManyTiles { count: tile_count, capacity: grid.capacity() });
    }
    Ok(Self { grid, policy, tile_count })
  }

  #[inline]
  pub fn grid(&self) -> &TileGridSpec {
    &self.grid
  }
  #[inline]
  pub fn policy(&self) -> ForegroundPolicy {
    self.policy
  }
  #[inline]
  pub fn tile_count(&self) -> u32 {
    self.tile_count
  }

  /// Length of the blob [`encode`](Self::encode) produces.
  #[inline]
  pub fn output_len(&self) -> usize {
    self.tile_count as usize * self.grid.tile_height() as usize
  }

  /// Validate the raster against the grid, then pack all tiles in index order.
  /// Nothing is read from the raster when validation fails.
  pub fn encode<R: Raster + ?Sized>(&self, raster: &R) -> Result<Vec<u8>, EncodeError> {
    let (w, h) = raster.dimensions();
    self.grid.validate(w, h)?;

    let classifier = self.resolve(raster);
    debug!(
      "encoding {} tiles of {}x{} from {w}x{h} raster with {:?}",
      self.tile_count,
      self.grid.tile_width(),
      self.grid.tile_height(),
      classifier
    );

    let tw = self.grid.tile_width();
    let th = self.grid.tile_height();
    let mut bits = vec![false; tw as usize * th as usize];
    let mut out = Vec::with_capacity(self.output_len());

    for index in 0..self.tile_count {
      let (ox, oy) = self.grid.tile_origin(index);
      for y in 0..th {
        for x in 0..tw {
          bits[(y * tw + x) as usize] = classifier.classify(raster.pixel(ox + x, oy + y));
        }
      }
      pack::pack_tile(&bits, tw as usize, &mut out)?;
      trace!("tile {index} at ({ox}, {oy}): {:02X?}", &out[out.len() - th as usize..]);
    }

    Ok(out)
  }

  /// Turn the policy into a classifier, sampling the chroma key at the margin
  /// origin. This is the only pixel read outside the tile windows.
  fn resolve<R: Raster + ?Sized>(&self, raster: &R) -> PixelClassifier {
    match self.policy {
      ForegroundPolicy::Threshold(t) => PixelClassifier::Threshold(t),
      ForegroundPolicy::ChromaKey(mode) => {
        let m = self.grid.margin();
        let reference = raster.pixel(m, m);
        debug!("chroma key sampled at ({m}, {m}): {reference:?}");
        PixelClassifier::ChromaKey { reference, mode }
      }
    }
  }
}

/// One-shot form of [`TileBitmapEncoder::encode`].
pub fn encode<R: Raster + ?Sized>(
  raster: &R,
  grid: TileGridSpec,
  policy: ForegroundPolicy,
  tile_count: u32,
) -> Result<Vec<u8>, EncodeError> {
  TileBitmapEncoder::new(grid, policy, tile_count)?.encode(raster)
}

/// Pack a whole raster row by row behind a `{width, height}` header.
pub fn encode_bitmap<R: Raster + ?Sized>(raster: &R, threshold: Threshold) -> Vec<u8> {
  let (w, h) = raster.dimensions();
  let stride = pack::stride(w);
  debug!("encoding {w}x{h} bitmap, stride {stride}, set where {:?} == {:#04X}", threshold.channel, threshold.value);

  let mut out = Vec::with_capacity(BITMAP_HEADER_LEN + stride * h as usize);
  out.extend_from_slice(&w.to_le_bytes());
  out.extend_from_slice(&h.to_le_bytes());

  let mut line = vec![false; w as usize];
  for y in 0..h {
    for (x, bit) in (0..w).zip(line.iter_mut()) {
      *bit = threshold.matches(raster.pixel(x, y));
    }
    pack::pack_row(&line, &mut out);
  }
  out
}
