//! Tile layout files (`--layout`).
//!
//! ```json
//! {
//!   "tile_width": 8, "tile_height": 8,
//!   "columns": 16, "rows": 16,
//!   "margin": 1, "padding": 1,
//!   "tile_count": 256,
//!   "policy": { "kind": "chroma_key", "mode": "equal_is_background" }
//! }
//! ```
//!
//! `margin` and `padding` default to 0, `tile_count` to `columns * rows`.
//! Threshold policies look like `{ "kind": "threshold", "channel": "red", "value": 255 }`.

use bitglyph::{Channel, ChromaMode, ConfigError, ForegroundPolicy, Preset, Threshold, TileBitmapEncoder, TileGridSpec};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Layout {
  pub tile_width: u32,
  pub tile_height: u32,
  pub columns: u32,
  pub rows: u32,
  #[serde(default)]
  pub margin: u32,
  #[serde(default)]
  pub padding: u32,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub tile_count: Option<u32>,
  pub policy: Policy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Policy {
  Threshold {
    #[serde(default)]
    channel: ChannelName,
    #[serde(default = "full_scale")]
    value: u8,
  },
  ChromaKey {
    #[serde(default)]
    mode: KeyMode,
  },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ChannelName {
  #[default]
  Red,
  Green,
  Blue,
  Alpha,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyMode {
  #[default]
  EqualIsBackground,
  EqualIsForeground,
}

fn full_scale() -> u8 {
  0xFF
}

impl From<ChannelName> for Channel {
  fn from(c: ChannelName) -> Self {
    match c {
      ChannelName::Red => Channel::Red,
      ChannelName::Green => Channel::Green,
      ChannelName::Blue => Channel::Blue,
      ChannelName::Alpha => Channel::Alpha,
    }
  }
}

impl From<Channel> for ChannelName {
  fn from(c: Channel) -> Self {
    match c {
      Channel::Red => ChannelName::Red,
      Channel::Green => ChannelName::Green,
      Channel::Blue => ChannelName::Blue,
      Channel::Alpha => ChannelName::Alpha,
    }
  }
}

impl From<Policy> for ForegroundPolicy {
  fn from(p: Policy) -> Self {
    match p {
      Policy::Threshold { channel, value } => ForegroundPolicy::Threshold(Threshold::new(channel.into(), value)),
      Policy::ChromaKey { mode: KeyMode::EqualIsBackground } => ForegroundPolicy::ChromaKey(ChromaMode::EqualIsBackground),
      Policy::ChromaKey { mode: KeyMode::EqualIsForeground } => ForegroundPolicy::ChromaKey(ChromaMode::EqualIsForeground),
    }
  }
}

impl From<ForegroundPolicy> for Policy {
  fn from(p: ForegroundPolicy) -> Self {
    match p {
      ForegroundPolicy::Threshold(t) => Policy::Threshold { channel: t.channel.into(), value: t.value },
      ForegroundPolicy::ChromaKey(ChromaMode::EqualIsBackground) => {
        Policy::ChromaKey { mode: KeyMode::EqualIsBackground }
      }
      ForegroundPolicy::ChromaKey(ChromaMode::EqualIsForeground) => {
        Policy::ChromaKey { mode: KeyMode::EqualIsForeground }
      }
    }
  }
}

impl Layout {
  /// The layout a built-in tool variant uses, with `tile_count` spelled out.
  pub fn from_preset(preset: Preset) -> Result<Self, ConfigError> {
    Ok(Self::from_encoder(&preset.encoder()?))
  }

  pub fn from_encoder(enc: &TileBitmapEncoder) -> Self {
    let g = enc.grid();
    Self {
      tile_width: g.tile_width(),
      tile_height: g.tile_height(),
      columns: g.columns(),
      rows: g.rows(),
      margin: g.margin(),
      padding: g.padding(),
      tile_count: Some(enc.tile_count()),
      policy: enc.policy().into(),
    }
  }

  pub fn encoder(&self) -> Result<TileBitmapEncoder, ConfigError> {
    let grid = TileGridSpec::new(self.tile_width, self.tile_height, self.columns, self.rows, self.margin, self.padding)?;
    let count = self.tile_count.unwrap_or_else(|| grid.capacity());
    TileBitmapEncoder::new(grid, self.policy.into(), count)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_full_document() {
    let text = r#"{
      "tile_width": 8, "tile_height": 8, "columns": 16, "rows": 16,
      "margin": 1, "padding": 1, "tile_count": 200,
      "policy": { "kind": "chroma_key", "mode": "equal_is_foreground" }
    }"#;
    let layout: Layout = serde_json::from_str(text).unwrap();
    let enc = layout.encoder().unwrap();
    assert_eq!(enc.tile_count(), 200);
    assert_eq!(enc.grid().expected_dimensions(), (145, 145));
    assert_eq!(enc.policy(), ForegroundPolicy::ChromaKey(ChromaMode::EqualIsForeground));
  }

  #[test]
  fn defaults_fill_the_grid() {
    let text = r#"{ "tile_width": 6, "tile_height": 8, "columns": 16, "rows": 8, "policy": { "kind": "threshold" } }"#;
    let layout: Layout = serde_json::from_str(text).unwrap();
    assert_eq!((layout.margin, layout.padding, layout.tile_count), (0, 0, None));
    let enc = layout.encoder().unwrap();
    assert_eq!(enc.tile_count(), 128);
    assert_eq!(enc.policy(), ForegroundPolicy::Threshold(Threshold::RED_FULL));
  }

  #[test]
  fn threshold_channel_and_value() {
    let text = r#"{ "tile_width": 8, "tile_height": 8, "columns": 1, "rows": 1,
      "policy": { "kind": "threshold", "channel": "alpha", "value": 0 } }"#;
    let layout: Layout = serde_json::from_str(text).unwrap();
    assert_eq!(layout.encoder().unwrap().policy(), ForegroundPolicy::Threshold(Threshold::new(Channel::Alpha, 0)));
  }

  #[test]
  fn presets_survive_json() {
    for p in Preset::ALL {
      let layout = Layout::from_preset(p).unwrap();
      let text = serde_json::to_string_pretty(&layout).unwrap();
      let back: Layout = serde_json::from_str(&text).unwrap();
      assert_eq!(back.encoder().unwrap(), p.encoder().unwrap(), "{p:?}");
    }
  }

  #[test]
  fn invalid_layouts_are_config_errors() {
    let wide = r#"{ "tile_width": 12, "tile_height": 8, "columns": 16, "rows": 16, "policy": { "kind": "threshold" } }"#;
    let layout: Layout = serde_json::from_str(wide).unwrap();
    assert_eq!(layout.encoder().unwrap_err(), ConfigError::TileTooWide(12));

    let over = r#"{ "tile_width": 8, "tile_height": 8, "columns": 2, "rows": 2, "tile_count": 5,
      "policy": { "kind": "chroma_key" } }"#;
    let layout: Layout = serde_json::from_str(over).unwrap();
    assert_eq!(layout.encoder().unwrap_err(), ConfigError::TooManyTiles { count: 5, capacity: 4 });
  }

  #[test]
  fn rejects_unknown_fields_and_kinds() {
    let typo = r#"{ "tile_width": 8, "tile_height": 8, "columns": 1, "rows": 1, "marign": 1,
      "policy": { "kind": "threshold" } }"#;
    assert!(serde_json::from_str::<Layout>(typo).is_err());
    let kind = r#"{ "tile_width": 8, "tile_height": 8, "columns": 1, "rows": 1, "policy": { "kind": "dither" } }"#;
    assert!(serde_json::from_str::<Layout>(kind).is_err());
  }
}
