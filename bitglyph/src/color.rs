/// One of the four 8-bit channels of a [`Color`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
  Red,
  Green,
  Blue,
  Alpha,
}

impl Channel {
  #[inline]
  const fn index(self) -> usize {
    match self {
      Channel::Red => 0,
      Channel::Green => 1,
      Channel::Blue => 2,
      Channel::Alpha => 3,
    }
  }
}

/// RGBA8 pixel value. Equality compares all four channels exactly.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color(pub [u8; 4]);

impl Color {
  pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
  pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

  /// Opaque color from three channels.
  #[inline]
  pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
    Color([r, g, b, 0xFF])
  }

  #[inline]
  pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
    Color([r, g, b, a])
  }

  #[inline]
  pub const fn channel(&self, channel: Channel) -> u8 {
    self.0[channel.index()]
  }
}

impl From<[u8; 4]> for Color {
  #[inline]
  fn from(v: [u8; 4]) -> Self {
    Color(v)
  }
}

impl From<[u8; 3]> for Color {
  #[inline]
  fn from([r, g, b]: [u8; 3]) -> Self {
    Color::rgb(r, g, b)
  }
}
