//! Waveform look-up tables
//!
//! A waveform is 76 bytes: five 7-byte voltage rows (one per pixel
//! transition plus VCOM), seven 5-byte timing rows, and a 6-byte trailer of
//! register values that are written with their own commands rather than
//! through the LUT register.

/// Number of bytes streamed to the LUT register (0x32)
pub const LUT_LEN: usize = 70;

/// Total length of a waveform including the trailer
pub const WAVEFORM_LEN: usize = LUT_LEN + 6;

/// Register values that travel with a waveform but are not part of the LUT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trailer {
    /// Gate driving voltage (0x03)
    pub gate_voltage: u8,
    /// Source driving voltage VSH1, VSH2, VSL (0x04)
    pub source_voltage: [u8; 3],
    /// Dummy line period (0x3A)
    pub dummy_line: u8,
    /// Gate line width (0x3B)
    pub gate_line_width: u8,
}

/// One complete waveform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Waveform {
    /// LUT0..LUT4: BB, BW, WB, WW, VCOM
    pub voltage: [[u8; 7]; 5],
    /// TP0..TP6: phase A~D durations and repeat count
    pub timing: [[u8; 5]; 7],
    /// Registers written alongside the LUT
    pub trailer: Trailer,
}

impl Waveform {
    /// The 70 bytes written to the LUT register, voltage rows first.
    pub fn lut(&self) -> [u8; LUT_LEN] {
        let mut out = [0u8; LUT_LEN];
        let rows = self.voltage.iter().flatten().chain(self.timing.iter().flatten());
        for (slot, byte) in out.iter_mut().zip(rows) {
            *slot = *byte;
        }
        out
    }

    /// Flat vendor layout: LUT followed by the trailer.
    pub fn to_bytes(&self) -> [u8; WAVEFORM_LEN] {
        let mut out = [0u8; WAVEFORM_LEN];
        out[..LUT_LEN].copy_from_slice(&self.lut());
        let t = &self.trailer;
        out[LUT_LEN] = t.gate_voltage;
        out[LUT_LEN + 1..LUT_LEN + 4].copy_from_slice(&t.source_voltage);
        out[LUT_LEN + 4] = t.dummy_line;
        out[LUT_LEN + 5] = t.gate_line_width;
        out
    }
}

const TRAILER: Trailer = Trailer {
    gate_voltage: 0x15,
    source_voltage: [0x41, 0xA8, 0x32],
    dummy_line: 0x30,
    gate_line_width: 0x0A,
};

/// Slow, full-contrast refresh
pub const LUT_FULL_UPDATE: Waveform = Waveform {
    voltage: [
        [0x80, 0x60, 0x40, 0x00, 0x00, 0x00, 0x00], // LUT0: BB
        [0x10, 0x60, 0x20, 0x00, 0x00, 0x00, 0x00], // LUT1: BW
        [0x80, 0x60, 0x40, 0x00, 0x00, 0x00, 0x00], // LUT2: WB
        [0x10, 0x60, 0x20, 0x00, 0x00, 0x00, 0x00], // LUT3: WW
        [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // LUT4: VCOM
    ],
    timing: [
        [0x03, 0x03, 0x00, 0x00, 0x02], // TP0
        [0x09, 0x09, 0x00, 0x00, 0x02], // TP1
        [0x03, 0x03, 0x00, 0x00, 0x02], // TP2
        [0x00, 0x00, 0x00, 0x00, 0x00], // TP3
        [0x00, 0x00, 0x00, 0x00, 0x00], // TP4
        [0x00, 0x00, 0x00, 0x00, 0x00], // TP5
        [0x00, 0x00, 0x00, 0x00, 0x00], // TP6
    ],
    trailer: TRAILER,
};

/// Fast refresh, single phase, accumulates ghosting
pub const LUT_PARTIAL_UPDATE: Waveform = Waveform {
    voltage: [
        [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // LUT0: BB
        [0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // LUT1: BW
        [0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // LUT2: WB
        [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // LUT3: WW
        [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // LUT4: VCOM
    ],
    timing: [
        [0x0A, 0x00, 0x00, 0x00, 0x00], // TP0
        [0x00, 0x00, 0x00, 0x00, 0x00], // TP1
        [0x00, 0x00, 0x00, 0x00, 0x00], // TP2
        [0x00, 0x00, 0x00, 0x00, 0x00], // TP3
        [0x00, 0x00, 0x00, 0x00, 0x00], // TP4
        [0x00, 0x00, 0x00, 0x00, 0x00], // TP5
        [0x00, 0x00, 0x00, 0x00, 0x00], // TP6
    ],
    trailer: TRAILER,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_update_flat_layout() {
        let bytes = LUT_FULL_UPDATE.to_bytes();
        assert_eq!(bytes.len(), 76);
        assert_eq!(&bytes[..7], &[0x80, 0x60, 0x40, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(&bytes[35..40], &[0x03, 0x03, 0x00, 0x00, 0x02]);
        assert_eq!(&bytes[40..45], &[0x09, 0x09, 0x00, 0x00, 0x02]);
        assert_eq!(&bytes[70..], &[0x15, 0x41, 0xA8, 0x32, 0x30, 0x0A]);
    }

    #[test]
    fn lut_is_prefix_of_flat_layout() {
        for waveform in [LUT_FULL_UPDATE, LUT_PARTIAL_UPDATE] {
            assert_eq!(&waveform.to_bytes()[..LUT_LEN], &waveform.lut()[..]);
        }
    }

    #[test]
    fn partial_update_single_phase() {
        let lut = LUT_PARTIAL_UPDATE.lut();
        assert_eq!(lut[7], 0x80);
        assert_eq!(lut[14], 0x40);
        assert_eq!(lut[35], 0x0A);
        let nonzero = lut.iter().filter(|b| **b != 0).count();
        assert_eq!(nonzero, 3);
    }
}
