use crate::color::Color;

/// Read-only, random-access pixel surface.
///
/// The encoders only ever read through this trait; decoding the source file is
/// the caller's business. Reads must be in range (`x < width`, `y < height`),
/// which the encoders guarantee by validating geometry first.
pub trait Raster {
  fn width(&self) -> u32;
  fn height(&self) -> u32;
  fn pixel(&self, x: u32, y: u32) -> Color;

  #[inline]
  fn dimensions(&self) -> (u32, u32) {
    (self.width(), self.height())
  }
}

impl<R: Raster + ?Sized> Raster for &R {
  #[inline]
  fn width(&self) -> u32 {
    (**self).width()
  }
  #[inline]
  fn height(&self) -> u32 {
    (**self).height()
  }
  #[inline]
  fn pixel(&self, x: u32, y: u32) -> Color {
    (**self).pixel(x, y)
  }
}

/// Owned in-memory raster, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
  width: u32,
  height: u32,
  pixels: Vec<Color>,
}

impl Canvas {
  /// A `width x height` canvas filled with `fill`.
  pub fn new(width: u32, height: u32, fill: Color) -> Self {
    Self { width, height, pixels: vec![fill; width as usize * height as usize] }
  }

  pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Color) -> Self {
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
      for x in 0..width {
        pixels.push(f(x, y));
      }
    }
    Self { width, height, pixels }
  }

  /// Panics when `(x, y)` is outside the canvas.
  #[inline]
  pub fn set(&mut self, x: u32, y: u32, color: Color) {
    let i = self.index(x, y);
    self.pixels[i] = color;
  }

  /// Fill the rectangle `[x, x+w) x [y, y+h)`, clipped to the canvas.
  pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Color) {
    let x1 = x.saturating_add(w).min(self.width);
    let y1 = y.saturating_add(h).min(self.height);
    for yy in y..y1 {
      for xx in x..x1 {
        self.set(xx, yy, color);
      }
    }
  }

  #[inline]
  fn index(&self, x: u32, y: u32) -> usize {
    assert!(x < self.width && y < self.height, "pixel ({x}, {y}) outside {}x{}", self.width, self.height);
    y as usize * self.width as usize + x as usize
  }
}

impl Raster for Canvas {
  #[inline]
  fn width(&self) -> u32 {
    self.width
  }
  #[inline]
  fn height(&self) -> u32 {
    self.height
  }
  #[inline]
  fn pixel(&self, x: u32, y: u32) -> Color {
    self.pixels[self.index(x, y)]
  }
}

// ---- image crate adapters ----

#[cfg(feature = "image")]
impl Raster for image::RgbaImage {
  #[inline]
  fn width(&self) -> u32 {
    image::RgbaImage::width(self)
  }
  #[inline]
  fn height(&self) -> u32 {
    image::RgbaImage::height(self)
  }
  #[inline]
  fn pixel(&self, x: u32, y: u32) -> Color {
    Color(self.get_pixel(x, y).0)
  }
}

/// Pixels of non-RGBA8 images are converted per read (grey/RGB become opaque).
#[cfg(feature = "image")]
impl Raster for image::DynamicImage {
  #[inline]
  fn width(&self) -> u32 {
    image::DynamicImage::width(self)
  }
  #[inline]
  fn height(&self) -> u32 {
    image::DynamicImage::height(self)
  }
  #[inline]
  fn pixel(&self, x: u32, y: u32) -> Color {
    match self {
      image::DynamicImage::ImageRgba8(buf) => Raster::pixel(buf, x, y),
      other => Color(image::GenericImageView::get_pixel(other, x, y).0),
    }
  }
}
