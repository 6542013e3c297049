//! Default wiring of the panel HAT on a Raspberry Pi header
//!
//! Line numbers are BCM offsets on `/dev/gpiochip0`.

/// Pin configuration constants for the panel
pub struct Pins;

impl Pins {
    /// SPI device with hardware chip select CE0 (BCM 8)
    pub const SPI_DEVICE: &'static str = "/dev/spidev0.0";
    /// GPIO character device
    pub const GPIO_CHIP: &'static str = "/dev/gpiochip0";
    /// Reset pin for display
    pub const RST: u32 = 17;
    /// Data/Command control pin (High for data, Low for command)
    pub const DC: u32 = 25;
    /// Busy status pin (High when display is busy)
    pub const BSY: u32 = 24;
    /// SPI clock, the controller is specified up to 20 MHz for writes
    pub const SPI_HZ: u32 = 4_000_000;
}
