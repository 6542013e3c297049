//! Image sources for [`crate::Epd2in13::print_image`]
//!
//! Anything that can answer "is this pixel black" can be printed. [`Canvas`]
//! is the owned implementation and doubles as an `embedded-graphics` draw
//! target, so text and primitives can be rendered onto it directly.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

/// A rectangular 1-bit image read by the pixel packer.
pub trait SourceImage {
    /// Columns
    fn width(&self) -> usize;
    /// Rows
    fn height(&self) -> usize;
    /// `true` when the pixel should be inked. Only called with
    /// `x < width()` and `y < height()`.
    fn is_black(&self, x: usize, y: usize) -> bool;
}

impl<T: SourceImage + ?Sized> SourceImage for &T {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn height(&self) -> usize {
        (**self).height()
    }

    fn is_black(&self, x: usize, y: usize) -> bool {
        (**self).is_black(x, y)
    }
}

/// Owned black/white bitmap, one `bool` per pixel, row-major.
///
/// `BinaryColor::On` is ink, `BinaryColor::Off` is paper. Pixels drawn
/// outside the canvas are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
}

impl Canvas {
    /// Blank (all white) canvas
    pub fn new(width: usize, height: usize) -> Self {
        Canvas {
            width,
            height,
            pixels: vec![false; width * height],
        }
    }

    /// Canvas in panel orientation, 122 wide and 250 tall
    pub fn portrait() -> Self {
        Self::new(crate::WIDTH as usize, crate::HEIGHT as usize)
    }

    /// Canvas rotated a quarter turn, 250 wide and 122 tall
    pub fn landscape() -> Self {
        Self::new(crate::HEIGHT as usize, crate::WIDTH as usize)
    }

    /// Ink or clear one pixel. Out of range coordinates are ignored.
    pub fn set_pixel(&mut self, x: usize, y: usize, black: bool) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = black;
        }
    }

    /// Reset every pixel to white
    pub fn clear_all(&mut self) {
        self.pixels.fill(false);
    }

    /// Number of inked pixels
    pub fn black_pixels(&self) -> usize {
        self.pixels.iter().filter(|p| **p).count()
    }
}

impl SourceImage for Canvas {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn is_black(&self, x: usize, y: usize) -> bool {
        self.pixels[y * self.width + x]
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for Canvas {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            self.set_pixel(point.x as usize, point.y as usize, color.is_on());
        }
        Ok(())
    }
}
