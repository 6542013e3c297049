//! Converts a [`SourceImage`] into the controller's RAM layout
//!
//! The controller wants `height` rows of `line_width` bytes, MSB first, with
//! a cleared bit for ink and a set bit for paper. Its X counter runs opposite
//! to natural left-to-right order, so every column is mirrored on the way in.
//!
//! Images that are as wide as the panel are copied as they are. Anything
//! else is treated as a landscape image and turned a quarter turn so that
//! its columns run down the panel.

use crate::geometry::PanelGeometry;
use crate::image::SourceImage;

/// How source pixels map onto panel rows and columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Source `x` feeds the panel column, `y` the panel row
    Native,
    /// Source `x` feeds the panel row, `y` the panel column
    Rotated,
}

impl Orientation {
    /// Native when the image width equals the panel width, Rotated otherwise
    pub fn for_image<I: SourceImage + ?Sized>(image: &I, geometry: &PanelGeometry) -> Self {
        if image.width() == geometry.width as usize {
            Orientation::Native
        } else {
            Orientation::Rotated
        }
    }

    /// Usable `(columns, rows)` of the source once clipped to the panel
    fn clip<I: SourceImage + ?Sized>(self, image: &I, geometry: &PanelGeometry) -> (usize, usize) {
        let (panel_w, panel_h) = (geometry.width as usize, geometry.height as usize);
        match self {
            Orientation::Native => (image.width().min(panel_w), image.height().min(panel_h)),
            Orientation::Rotated => (image.width().min(panel_h), image.height().min(panel_w)),
        }
    }

    /// Panel `(column, row)` for source pixel `(x, y)` of a clipped image
    /// `used_w` columns wide, or `None` when it lands outside the panel.
    fn target(
        self,
        x: usize,
        y: usize,
        used_w: usize,
        geometry: &PanelGeometry,
    ) -> Option<(usize, usize)> {
        match self {
            Orientation::Native => Some((used_w - x - 1, y)),
            Orientation::Rotated => {
                // height - x - 1 mirrored back against the used width
                let flipped = geometry.height as usize - x - 1;
                let row = used_w.checked_sub(flipped + 1)?;
                Some((y, row))
            }
        }
    }
}

/// One packed frame, `height * line_width` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    bytes: Vec<u8>,
    line_width: usize,
}

impl PixelBuffer {
    /// All-white frame for a panel
    pub fn white(geometry: &PanelGeometry) -> Self {
        PixelBuffer {
            bytes: vec![0xFF; geometry.buffer_len()],
            line_width: geometry.line_width(),
        }
    }

    /// Mark the pixel at panel `(column, row)` as ink
    fn ink(&mut self, column: usize, row: usize) {
        let index = column / 8 + row * self.line_width;
        self.bytes[index] &= !(0x80 >> (column % 8));
    }

    /// Packed bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Take the packed bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Only true for a zero-sized panel
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for PixelBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Pack an image with an explicit orientation.
///
/// Only the overlap of image and panel is sampled, everything else stays
/// white. An image with no overlap packs to an all-white frame.
pub fn pack<I: SourceImage + ?Sized>(
    image: &I,
    geometry: &PanelGeometry,
    orientation: Orientation,
) -> PixelBuffer {
    let mut buffer = PixelBuffer::white(geometry);
    let (used_w, used_h) = orientation.clip(image, geometry);

    for y in 0..used_h {
        for x in 0..used_w {
            if !image.is_black(x, y) {
                continue;
            }
            if let Some((column, row)) = orientation.target(x, y, used_w, geometry) {
                buffer.ink(column, row);
            }
        }
    }
    buffer
}

/// Pack an image, choosing the orientation from its width.
pub fn pack_image<I: SourceImage + ?Sized>(image: &I, geometry: &PanelGeometry) -> PixelBuffer {
    let orientation = Orientation::for_image(image, geometry);
    log::debug!(
        "Packing {}x{} image ({:?})",
        image.width(),
        image.height(),
        orientation
    );
    pack(image, geometry, orientation)
}
