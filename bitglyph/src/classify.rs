//! Foreground/background decision for single pixels.
//!
//! Classification is exact: no tolerance, no luminance math. A pixel that is
//! "almost white" is background under a `red == 0xFF` threshold.

use crate::color::{Channel, Color};

/// Foreground iff `color[channel] == value`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Threshold {
  pub channel: Channel,
  pub value: u8,
}

impl Threshold {
  /// `red == 0xFF`, the historic "white pixel is set" rule.
  pub const RED_FULL: Threshold = Threshold { channel: Channel::Red, value: 0xFF };

  #[inline]
  pub const fn new(channel: Channel, value: u8) -> Self {
    Self { channel, value }
  }

  #[inline]
  pub const fn matches(&self, color: Color) -> bool {
    color.channel(self.channel) == self.value
  }
}

impl Default for Threshold {
  fn default() -> Self {
    Self::RED_FULL
  }
}

/// What a pixel equal to the chroma key means.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ChromaMode {
  /// Key color is background; anything else is set.
  #[default]
  EqualIsBackground,
  /// Key color is set; anything else is background.
  EqualIsForeground,
}

/// How the tile encoder tells set pixels from unset ones.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ForegroundPolicy {
  Threshold(Threshold),
  /// Compare against the color found at `(margin, margin)` of the raster.
  ChromaKey(ChromaMode),
}

impl From<Threshold> for ForegroundPolicy {
  fn from(t: Threshold) -> Self {
    ForegroundPolicy::Threshold(t)
  }
}

/// A policy with its chroma key (if any) already sampled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PixelClassifier {
  Threshold(Threshold),
  ChromaKey { reference: Color, mode: ChromaMode },
}

impl PixelClassifier {
  #[inline]
  pub fn classify(&self, color: Color) -> bool {
    match *self {
      PixelClassifier::Threshold(t) => t.matches(color),
      PixelClassifier::ChromaKey { reference, mode } => (color == reference) == (mode == ChromaMode::EqualIsForeground),
    }
  }
}

impl From<Threshold> for PixelClassifier {
  fn from(t: Threshold) -> Self {
    PixelClassifier::Threshold(t)
  }
}
