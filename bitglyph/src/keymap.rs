//! Keyboard layout tables.
//!
//! Source format: one key per line, fields separated by a single tab.
//!
//! ```text
//! # scancode  name    lower  upper  graph
//! 30          A       a      A
//! 1           Esc     \1B
//! 57          Space   \20
//! 42          LShift
//! ```
//!
//! Lines starting with `#` and blank lines are skipped. A line with only a
//! scancode and a name declares a key without characters. `upper` and `graph`
//! default to `lower`. A value of `\` followed by hex digits is a raw byte.
//!
//! Output: 128 entries × 4 bytes, entry `i` at `4*i`:
//!   u8 reserved (0), u8 lower, u8 upper, u8 graph.

use log::debug;
use thiserror::Error;

/// Scancodes the table covers.
pub const SCANCODES: usize = 128;
/// Bytes per scancode entry.
pub const ENTRY_LEN: usize = 4;
/// Size of a compiled table.
pub const TABLE_LEN: usize = SCANCODES * ENTRY_LEN;

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum KeymapError {
  #[error("line {line}: expected 2 to 5 tab-separated fields, found {found}")]
  FieldCount { line: usize, found: usize },
  #[error("line {line}: bad scancode {text:?}")]
  BadScancode { line: usize, text: String },
  #[error("line {line}: scancode {scancode} out of range (0..128)")]
  ScancodeRange { line: usize, scancode: u32 },
  #[error("line {line}: key {text:?} is neither one ASCII character nor a \\XX hex byte")]
  BadKey { line: usize, text: String },
}

/// One scancode's characters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyEntry {
  pub lower: u8,
  pub upper: u8,
  pub graph: u8,
}

impl KeyEntry {
  #[inline]
  pub fn to_bytes(&self) -> [u8; ENTRY_LEN] {
    [0, self.lower, self.upper, self.graph]
  }
}

/// Parsed layout, indexed by scancode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keymap {
  entries: [KeyEntry; SCANCODES],
}

impl Default for Keymap {
  fn default() -> Self {
    Self { entries: [KeyEntry::default(); SCANCODES] }
  }
}

impl Keymap {
  pub fn parse(text: &str) -> Result<Self, KeymapError> {
    let mut map = Keymap::default();
    let mut defined = 0usize;
    for (i, raw) in text.lines().enumerate() {
      let line = i + 1;
      let l = raw.strip_suffix('\r').unwrap_or(raw);
      if l.is_empty() || l.starts_with('#') {
        continue;
      }
      let fields: Vec<&str> = l.split('\t').collect();
      if !(2..=5).contains(&fields.len()) {
        return Err(KeymapError::FieldCount { line, found: fields.len() });
      }
      if fields.len() == 2 {
        continue;
      }
      let scancode: u32 = fields[0]
        .trim()
        .parse()
        .map_err(|_| KeymapError::BadScancode { line, text: fields[0].to_owned() })?;
      if scancode as usize >= SCANCODES {
        return Err(KeymapError::ScancodeRange { line, scancode });
      }
      let lower = key_to_byte(fields[2], line)?;
      let upper = fields.get(3).map(|s| key_to_byte(s, line)).transpose()?.unwrap_or(lower);
      let graph = fields.get(4).map(|s| key_to_byte(s, line)).transpose()?.unwrap_or(lower);
      map.entries[scancode as usize] = KeyEntry { lower, upper, graph };
      defined += 1;
    }
    debug!("keymap: {defined} key definitions");
    Ok(map)
  }

  #[inline]
  pub fn get(&self, scancode: u8) -> Option<&KeyEntry> {
    self.entries.get(scancode as usize)
  }

  pub fn to_bytes(&self) -> Vec<u8> {
    self.entries.iter().flat_map(KeyEntry::to_bytes).collect()
  }
}

/// Parse a layout and serialize it to a [`TABLE_LEN`]-byte table.
pub fn compile(text: &str) -> Result<Vec<u8>, KeymapError> {
  Keymap::parse(text).map(|m| m.to_bytes())
}

fn key_to_byte(text: &str, line: usize) -> Result<u8, KeymapError> {
  let bad = || KeymapError::BadKey { line, text: text.to_owned() };
  if text.len() > 1 {
    if let Some(hex) = text.strip_prefix('\\') {
      return u8::from_str_radix(hex, 16).map_err(|_| bad());
    }
  }
  match text.as_bytes() {
    [b] if b.is_ascii() => Ok(*b),
    _ => Err(bad()),
  }
}
