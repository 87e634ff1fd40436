mod layout;

use anyhow::{Context, Result, bail};
use bitglyph::{Preset, Raster, Threshold, keymap};
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};
use std::{fs, fs::File, io::Write, path::Path, path::PathBuf};

use crate::layout::{ChannelName, Layout};

// ---------------------------------------------
// bitglyph: kernel asset builder
// Modes:
//   1) tiles  <img> (--preset P | --layout F) -> tile_count × tile_height bytes (1bpp, LSB = left)
//   2) bitmap <img>                            -> u32 w, u32 h, rows of ceil(w/8) bytes
//   3) keymap <tsv>                            -> 128 × {0, lower, upper, graph}
// Output files are only created once encoding has succeeded.
// ---------------------------------------------
#[derive(Parser, Debug)]
#[command(name = "bitglyph", author, version, about = "bitglyph: build 1bpp font/bitmap blobs and keymaps for the kernel", long_about = None)]
struct Cli {
  /// Log debug output (RUST_LOG takes precedence)
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
  /// Slice a tile sheet into packed 1bpp glyphs/icons
  Tiles {
    /// Source image (PNG/BMP/GIF)
    input: PathBuf,

    /// Built-in layout [alternative to --layout]
    #[arg(long, value_enum)]
    preset: Option<PresetArg>,

    /// Layout JSON (grid geometry, policy, tile count) [alternative to --preset]
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Print the effective layout as JSON to stdout
    #[arg(long, default_value_t = false)]
    dump_layout: bool,

    /// Output blob
    #[arg(short, long)]
    output: PathBuf,
  },

  /// Pack a whole image row by row behind a width/height header
  Bitmap {
    /// Source image (PNG/BMP/GIF)
    input: PathBuf,

    /// Channel compared against --value
    #[arg(long, value_enum, default_value_t = ChannelName::Red)]
    channel: ChannelName,

    /// Channel value that marks a pixel as set
    #[arg(long, default_value_t = 0xFF)]
    value: u8,

    /// Output blob
    #[arg(short, long)]
    output: PathBuf,
  },

  /// Compile a tab-separated keyboard layout into a scancode table
  Keymap {
    /// Layout table (UTF-8 text)
    input: PathBuf,

    /// Output table
    #[arg(short, long)]
    output: PathBuf,
  },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PresetArg {
  /// 128 glyphs, 6x8, from a 96x64 sheet; white is set
  LegacyFont,
  /// 256 icons, 8x8, 1px margin/padding, from a 145x145 sheet; non-key color is set
  Icons,
  /// 256 glyphs, 6x6, from a 96x96 sheet; non-key color is set
  Grid96,
}

impl From<PresetArg> for Preset {
  fn from(p: PresetArg) -> Self {
    match p {
      PresetArg::LegacyFont => Preset::LegacyFont,
      PresetArg::Icons => Preset::Icons,
      PresetArg::Grid96 => Preset::Grid96,
    }
  }
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_filter = if cli.verbose { "debug" } else { "info" };
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

  run(cli.cmd)
}

fn run(cmd: Cmd) -> Result<()> {
  match cmd {
    Cmd::Tiles { input, preset, layout, dump_layout, output } => {
      do_tiles(&input, preset, layout.as_deref(), dump_layout, &output)
    }
    Cmd::Bitmap { input, channel, value, output } => do_bitmap(&input, Threshold::new(channel.into(), value), &output),
    Cmd::Keymap { input, output } => do_keymap(&input, &output),
  }
}

fn do_tiles(input: &Path, preset: Option<PresetArg>, layout: Option<&Path>, dump: bool, output: &Path) -> Result<()> {
  let layout = match (preset, layout) {
    (Some(_), Some(_)) => bail!("Specify either --preset or --layout, not both"),
    (None, None) => bail!("--preset or --layout is required"),
    (Some(p), None) => Layout::from_preset(p.into()).with_context(|| format!("preset {p:?}"))?,
    (None, Some(path)) => {
      let text = fs::read_to_string(path).with_context(|| format!("read layout {:?}", path))?;
      serde_json::from_str(&text).with_context(|| format!("parse layout {:?}", path))?
    }
  };
  if dump {
    println!("{}", serde_json::to_string_pretty(&layout)?);
  }
  let encoder = layout.encoder().context("invalid layout")?;

  let img = decode_image(input)?;
  let blob = encoder.encode(&img).with_context(|| format!("encode {:?}", input))?;

  write_blob(output, &blob)
}

fn do_bitmap(input: &Path, threshold: Threshold, output: &Path) -> Result<()> {
  let img = decode_image(input)?;
  let blob = bitglyph::encode_bitmap(&img, threshold);
  write_blob(output, &blob)
}

fn do_keymap(input: &Path, output: &Path) -> Result<()> {
  let text = fs::read_to_string(input).with_context(|| format!("read keymap {:?}", input))?;
  let blob = keymap::compile(&text).with_context(|| format!("compile {:?}", input))?;
  write_blob(output, &blob)
}

/// Decode any supported image format, sniffing the format from its header.
/// RGBA8 sources are read in place; other pixel types convert per read.
fn decode_image(path: &Path) -> Result<image::DynamicImage> {
  use image::ImageReader;
  use std::io::Cursor;

  let bytes = fs::read(path).with_context(|| format!("read image {:?}", path))?;
  let img = ImageReader::new(Cursor::new(bytes))
    .with_guessed_format()?
    .decode()
    .with_context(|| format!("decode image {:?}", path))?;
  debug!("decoded {:?}: {}x{} {:?}", path, Raster::width(&img), Raster::height(&img), img.color());
  Ok(img)
}

fn write_blob(path: &Path, blob: &[u8]) -> Result<()> {
  let mut f = File::create(path).with_context(|| format!("create {:?}", path))?;
  f.write_all(blob)?;
  f.flush()?;
  info!("wrote {} bytes to {}", blob.len(), path.display());
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use clap::CommandFactory;
  use image::{ImageFormat, Rgba, RgbaImage};

  fn save_png(img: &RgbaImage, path: &Path) {
    img.save_with_format(path, ImageFormat::Png).unwrap();
  }

  #[test]
  fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
  }

  #[test]
  fn parses_tiles_with_preset() {
    let cli = Cli::try_parse_from(["bitglyph", "tiles", "font.png", "--preset", "legacy-font", "-o", "font.bin"]).unwrap();
    match cli.cmd {
      Cmd::Tiles { preset, layout, output, .. } => {
        assert_eq!(preset, Some(PresetArg::LegacyFont));
        assert_eq!(layout, None);
        assert_eq!(output, PathBuf::from("font.bin"));
      }
      other => panic!("unexpected {other:?}"),
    }
  }

  #[test]
  fn bitmap_defaults_to_white_is_set() {
    let cli = Cli::try_parse_from(["bitglyph", "-v", "bitmap", "logo.png", "-o", "logo.bin"]).unwrap();
    assert!(cli.verbose);
    match cli.cmd {
      Cmd::Bitmap { channel, value, .. } => assert_eq!((channel, value), (ChannelName::Red, 0xFF)),
      other => panic!("unexpected {other:?}"),
    }
  }

  #[test]
  fn icons_end_to_end() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();
    let key = Rgba([0xFF, 0x00, 0xFF, 0xFF]);
    let mut sheet = RgbaImage::from_pixel(145, 145, key);
    // tile 1: top-left pixel set
    sheet.put_pixel(10, 1, Rgba([0, 0, 0, 0xFF]));
    save_png(&sheet, &dir.join("icons.png"));

    run(Cmd::Tiles {
      input: dir.join("icons.png"),
      preset: Some(PresetArg::Icons),
      layout: None,
      dump_layout: false,
      output: dir.join("icons.bin"),
    })
    .unwrap();

    let blob = fs::read(dir.join("icons.bin")).unwrap();
    assert_eq!(blob.len(), 256 * 8);
    assert_eq!(blob[8], 0x01);
    assert_eq!(blob.iter().filter(|&&b| b != 0).count(), 1);
  }

  #[test]
  fn bad_dimensions_leave_no_output() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();
    save_png(&RgbaImage::new(100, 64), &dir.join("font.png"));

    let err = run(Cmd::Tiles {
      input: dir.join("font.png"),
      preset: Some(PresetArg::LegacyFont),
      layout: None,
      dump_layout: false,
      output: dir.join("font.bin"),
    })
    .unwrap_err();

    assert!(format!("{err:#}").contains("invalid image width: 100 (expected 96)"), "{err:#}");
    assert!(!dir.join("font.bin").exists());
  }

  #[test]
  fn layout_file_and_preset_conflict() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();
    let err = do_tiles(&dir.join("x.png"), Some(PresetArg::Icons), Some(&dir.join("l.json")), false, &dir.join("o"))
      .unwrap_err();
    assert!(err.to_string().contains("not both"));
    assert!(do_tiles(&dir.join("x.png"), None, None, false, &dir.join("o")).is_err());
  }

  #[test]
  fn custom_layout_file() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();
    fs::write(
      dir.join("layout.json"),
      r#"{ "tile_width": 4, "tile_height": 2, "columns": 2, "rows": 1, "padding": 2,
           "policy": { "kind": "threshold", "channel": "green", "value": 255 } }"#,
    )
    .unwrap();
    let mut img = RgbaImage::from_pixel(10, 2, Rgba([0, 0, 0, 0xFF]));
    img.put_pixel(6, 1, Rgba([0, 0xFF, 0, 0xFF]));
    save_png(&img, &dir.join("in.png"));

    do_tiles(&dir.join("in.png"), None, Some(&dir.join("layout.json")), false, &dir.join("out.bin")).unwrap();

    assert_eq!(fs::read(dir.join("out.bin")).unwrap(), [0x00, 0x00, 0x00, 0x01]);
  }

  #[test]
  fn bitmap_end_to_end() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();
    let mut img = RgbaImage::from_pixel(10, 2, Rgba([0, 0, 0, 0xFF]));
    for x in 0..5 {
      img.put_pixel(x, 0, Rgba([0xFF, 0xFF, 0xFF, 0xFF]));
    }
    save_png(&img, &dir.join("in.png"));

    do_bitmap(&dir.join("in.png"), Threshold::RED_FULL, &dir.join("out.bin")).unwrap();

    assert_eq!(fs::read(dir.join("out.bin")).unwrap(), [10, 0, 0, 0, 2, 0, 0, 0, 0x1F, 0x00, 0x00, 0x00]);
  }

  #[test]
  fn grayscale_sources_decode_without_rgba_copy() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();
    let mut img = image::GrayImage::new(9, 1);
    img.put_pixel(8, 0, image::Luma([0xFF]));
    img.save_with_format(dir.join("in.png"), ImageFormat::Png).unwrap();

    let decoded = decode_image(&dir.join("in.png")).unwrap();
    assert!(matches!(decoded, image::DynamicImage::ImageLuma8(_)));

    do_bitmap(&dir.join("in.png"), Threshold::RED_FULL, &dir.join("out.bin")).unwrap();
    assert_eq!(fs::read(dir.join("out.bin")).unwrap(), [9, 0, 0, 0, 1, 0, 0, 0, 0x00, 0x01]);
  }

  #[test]
  fn keymap_end_to_end() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();
    fs::write(dir.join("de.tsv"), "# German\n30\tA\ta\tA\n44\tY\tz\tZ\n").unwrap();

    do_keymap(&dir.join("de.tsv"), &dir.join("de.bin")).unwrap();

    let table = fs::read(dir.join("de.bin")).unwrap();
    assert_eq!(table.len(), keymap::TABLE_LEN);
    assert_eq!(&table[44 * 4..45 * 4], &[0, b'z', b'Z', b'z']);
  }
}
