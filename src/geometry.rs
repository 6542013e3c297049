//! Panel dimensions and the RAM window values derived from them

/// Physical pixel dimensions of a panel, fixed for the driver's lifetime.
///
/// `width` is the number of source lines (packed 8 to a byte), `height` the
/// number of gate lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelGeometry {
    /// Pixels per row
    pub width: u16,
    /// Rows
    pub height: u16,
}

impl PanelGeometry {
    /// Create a geometry
    pub const fn new(width: u16, height: u16) -> Self {
        PanelGeometry { width, height }
    }

    /// Bytes per row, `ceil(width / 8)`
    pub const fn line_width(&self) -> usize {
        (self.width as usize).div_ceil(8)
    }

    /// Size of one full frame in controller RAM
    pub const fn buffer_len(&self) -> usize {
        self.height as usize * self.line_width()
    }

    /// Last byte column of the RAM X window
    pub(crate) const fn ram_x_end(&self) -> u8 {
        (self.line_width() - 1) as u8
    }

    /// Last gate line as `[LSB, MSB]`
    pub(crate) const fn last_row(&self) -> [u8; 2] {
        let row = self.height - 1;
        [(row & 0xFF) as u8, (row >> 8) as u8]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn reference_panel() {
        let geometry = crate::GEOMETRY;
        assert_eq!(geometry.width, 122);
        assert_eq!(geometry.height, 250);
        assert_eq!(geometry.line_width(), 16);
        assert_eq!(geometry.buffer_len(), 4000);
        assert_eq!(geometry.ram_x_end(), 0x0F);
        assert_eq!(geometry.last_row(), [0xF9, 0x00]);
    }

    #[test]
    fn tall_panel_row_spills_into_msb() {
        let geometry = PanelGeometry::new(128, 296);
        assert_eq!(geometry.last_row(), [0x27, 0x01]);
    }

    proptest! {
        #[test]
        fn line_width_covers_every_pixel(width in 1u16..2048, height in 1u16..512) {
            let geometry = PanelGeometry::new(width, height);
            let line_width = geometry.line_width();
            prop_assert_eq!(line_width, (width as usize + 7) / 8);
            prop_assert!(line_width * 8 >= width as usize);
            prop_assert!(line_width * 8 < width as usize + 8);
            prop_assert_eq!(geometry.buffer_len(), height as usize * line_width);
        }
    }
}
