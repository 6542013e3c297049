//! 2.13" V2 Display Driver Implementation
//!
//! ## Architecture
//!
//! ### Initialization Functions
//! - `full_update()` - Hardware + soft reset, panel registers, full waveform
//! - `partial_update()` - Swap to the fast waveform, needs a prior `full_update()`
//!
//! ### Display Update Functions
//! - `clear()` - Fill RAM with one byte and refresh
//! - `print_image()` - Pack an image and refresh
//! - `write_frame()` - Stream an already packed frame and refresh
//! - `display()` - Trigger the refresh matching the active mode
//!
//! ### Power Management
//! - `sleep()` - Power off and enter deep sleep
//!
//! ## Critical Implementation Details
//!
//! ### Polarity
//!
//! RAM bit `1` is white and `0` is black, so `clear(0xFF)` blanks the panel.
//!
//! ### Sequencing
//!
//! The driver tracks a [`DriverState`]. Operations that are not legal in the
//! current state fail with [`Error::InvalidState`] before anything is sent.
//! An initializer that fails part way leaves the driver `Uninitialized`.
//!
//! ### BUSY Pin Wait
//!
//! After `MASTER_ACTIVATE` the controller holds BUSY high for the whole
//! refresh (2-4 s for a full update). Polling is bounded by
//! [`Config::busy_timeout_ms`].

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;

use crate::cmd::Cmd;
use crate::config::Config;
use crate::error::Error;
use crate::flag::Flag;
use crate::geometry::PanelGeometry;
use crate::image::SourceImage;
use crate::interface::DisplayInterface;
use crate::lut::{Waveform, LUT_FULL_UPDATE, LUT_PARTIAL_UPDATE};
use crate::packer;
use crate::state::{DriverState, RefreshMode};
use crate::GEOMETRY;

/// Display option (0x37) payload: no window offsets, ping-pong RAM on
const PARTIAL_DISPLAY_OPTION: [u8; 7] = [
    0x00,
    0x00,
    0x00,
    0x00,
    Flag::DISPLAY_OPTION_PING_PONG,
    0x00,
    0x00,
];

/// 2.13" V2 E-Paper Display Driver
///
/// ## Type Parameters
///
/// - `SPI` - SPI device for communication
/// - `BSY` - BUSY input pin (HIGH when display is busy)
/// - `DC` - Data/Command output pin
/// - `RST` - Reset output pin
/// - `DELAY` - Delay provider for timing
pub struct Epd2in13<SPI, BSY, DC, RST, DELAY> {
    /// The display interface
    interface: DisplayInterface<SPI, BSY, DC, RST, DELAY>,
    state: DriverState,
}

impl<SPI, BSY, DC, RST, DELAY> Epd2in13<SPI, BSY, DC, RST, DELAY> {
    /// Create the driver with default timing. Nothing is sent until an
    /// initializer is called.
    pub fn new(spi: SPI, busy: BSY, dc: DC, rst: RST, delay: DELAY) -> Self {
        Self::with_config(spi, busy, dc, rst, delay, Config::default())
    }

    /// Create the driver with explicit timing
    pub fn with_config(
        spi: SPI,
        busy: BSY,
        dc: DC,
        rst: RST,
        delay: DELAY,
        config: Config,
    ) -> Self {
        Epd2in13 {
            interface: DisplayInterface::new(spi, busy, dc, rst, delay, config),
            state: DriverState::Uninitialized,
        }
    }

    /// Give the peripherals back
    pub fn release(self) -> (SPI, BSY, DC, RST, DELAY) {
        self.interface.release()
    }

    /// Panel width in pixels
    pub fn width(&self) -> u16 {
        GEOMETRY.width
    }

    /// Panel height in pixels
    pub fn height(&self) -> u16 {
        GEOMETRY.height
    }

    /// Bytes per row in controller RAM
    pub fn line_width(&self) -> usize {
        GEOMETRY.line_width()
    }

    /// Panel geometry
    pub fn geometry(&self) -> PanelGeometry {
        GEOMETRY
    }

    /// Current state
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Active refresh mode, `None` before initialization or while asleep
    pub fn refresh_mode(&self) -> Option<RefreshMode> {
        self.state.refresh_mode()
    }

    /// Timing in use
    pub fn config(&self) -> &Config {
        self.interface.config()
    }

    fn require_configured(&self, operation: &'static str) -> Result<RefreshMode, Error> {
        self.state.refresh_mode().ok_or(Error::InvalidState {
            operation,
            state: self.state,
        })
    }
}

impl<SPI, BSY, DC, RST, DELAY> Epd2in13<SPI, BSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    RST: OutputPin,
    DC: OutputPin,
    BSY: InputPin,
    DELAY: DelayNs,
{
    /// Configure the controller for full-contrast refreshes.
    ///
    /// Legal from any state; this is also the way out of deep sleep and out
    /// of a failed sequence.
    pub fn full_update(&mut self) -> Result<(), Error> {
        log::info!("Initializing panel for full refresh");
        self.state = DriverState::Uninitialized;

        self.interface.reset()?;
        self.interface.wait_until_idle()?;
        self.interface.cmd(Cmd::SW_RESET)?;
        self.interface.wait_until_idle()?;

        self.interface
            .cmd_with_data(Cmd::SET_ANALOG_BLOCK_CONTROL, &[Flag::ANALOG_BLOCK_CONTROL])?;
        self.interface
            .cmd_with_data(Cmd::SET_DIGITAL_BLOCK_CONTROL, &[Flag::DIGITAL_BLOCK_CONTROL])?;

        // MUX lines = height - 1
        let [last_lsb, last_msb] = GEOMETRY.last_row();
        self.interface.cmd_with_data(
            Cmd::DRIVER_OUTPUT_CONTROL,
            &[last_lsb, last_msb, Flag::DRIVER_OUTPUT_GATE_SCAN_FROM_G0],
        )?;
        self.interface
            .cmd_with_data(Cmd::DATA_ENTRY_MODE, &[Flag::DATA_ENTRY_DECRY_INCRX])?;

        self.set_ram_window()?;

        self.interface
            .cmd_with_data(Cmd::BORDER_WAVEFORM_CONTROL, &[Flag::BORDER_WAVEFORM_FULL])?;
        self.interface
            .cmd_with_data(Cmd::WRITE_VCOM_REGISTER, &[Flag::VCOM_FULL])?;

        self.set_waveform_registers(&LUT_FULL_UPDATE)?;
        self.set_lut(&LUT_FULL_UPDATE)?;

        self.set_ram_counter()?;
        self.interface.wait_until_idle()?;

        self.state = DriverState::configured(RefreshMode::Full);
        log::info!("Panel ready for full refresh");
        Ok(())
    }

    /// Switch the controller to the fast partial waveform.
    ///
    /// Relies on registers written by [`full_update`](Self::full_update) in
    /// the same power cycle, so it is rejected unless the panel is
    /// configured.
    pub fn partial_update(&mut self) -> Result<(), Error> {
        self.require_configured("start a partial update")?;
        log::info!("Switching panel to partial refresh");
        self.state = DriverState::Uninitialized;

        self.interface.reset()?;
        self.interface
            .cmd_with_data(Cmd::WRITE_VCOM_REGISTER, &[Flag::VCOM_PARTIAL])?;
        self.interface.wait_until_idle()?;

        self.set_lut(&LUT_PARTIAL_UPDATE)?;
        self.interface
            .cmd_with_data(Cmd::WRITE_DISPLAY_OPTION, &PARTIAL_DISPLAY_OPTION)?;

        // power the analog block up so the new waveform takes effect
        self.trigger_display_update(Flag::DISPLAY_UPDATE_LOAD_PARTIAL)?;

        self.interface
            .cmd_with_data(Cmd::BORDER_WAVEFORM_CONTROL, &[Flag::BORDER_WAVEFORM_PARTIAL])?;

        self.state = DriverState::configured(RefreshMode::Partial);
        log::info!("Panel ready for partial refresh");
        Ok(())
    }

    /// Refresh the panel from RAM using the active mode
    pub fn display(&mut self) -> Result<(), Error> {
        let mode = self.require_configured("refresh the display")?;
        log::info!("Refreshing display ({:?})", mode);
        let sequence = match mode {
            RefreshMode::Full => Flag::DISPLAY_UPDATE_FULL,
            RefreshMode::Partial => Flag::DISPLAY_UPDATE_PARTIAL,
        };
        self.trigger_display_update(sequence)
    }

    /// Fill the whole frame with `fill` and refresh.
    ///
    /// `0xFF` is white, `0x00` black.
    pub fn clear(&mut self, fill: u8) -> Result<(), Error> {
        self.require_configured("clear the display")?;
        log::info!("Clearing display with 0x{:02X}", fill);
        self.interface.cmd(Cmd::WRITE_BW_DATA)?;
        self.interface.data_x_times(fill, GEOMETRY.buffer_len())?;
        self.display()
    }

    /// Pack `image` into the panel layout and refresh.
    ///
    /// Images as wide as the panel are printed as they are, anything else is
    /// rotated a quarter turn (see [`packer::Orientation`]). Parts of the
    /// image outside the panel are ignored.
    pub fn print_image<I: SourceImage + ?Sized>(&mut self, image: &I) -> Result<(), Error> {
        self.require_configured("print an image")?;
        let buffer = packer::pack_image(image, &GEOMETRY);
        self.send_frame(buffer.as_bytes())
    }

    /// Stream an already packed frame of `height * line_width` bytes and
    /// refresh.
    pub fn write_frame(&mut self, buffer: &[u8]) -> Result<(), Error> {
        self.require_configured("write a frame")?;
        let expected = GEOMETRY.buffer_len();
        if buffer.len() != expected {
            return Err(Error::BufferSize {
                expected,
                actual: buffer.len(),
            });
        }
        self.send_frame(buffer)
    }

    /// Power down and enter deep sleep.
    ///
    /// Only [`full_update`](Self::full_update) is accepted afterwards.
    pub fn sleep(&mut self) -> Result<(), Error> {
        self.require_configured("enter deep sleep")?;
        log::info!("Putting display into deep sleep mode");

        self.interface
            .cmd_with_data(Cmd::UPDATE_DISPLAY_CTRL2, &[Flag::DISPLAY_UPDATE_POWER_OFF])?;
        self.interface.cmd(Cmd::MASTER_ACTIVATE)?;

        self.interface
            .cmd_with_data(Cmd::DEEP_SLEEP_MODE, &[Flag::DEEP_SLEEP_MODE_1])?;
        let settle = self.interface.config().sleep_settle_ms;
        self.interface.delay.delay_ms(settle);

        self.state = DriverState::Asleep;
        Ok(())
    }

    fn send_frame(&mut self, buffer: &[u8]) -> Result<(), Error> {
        log::debug!("Writing {} bytes to RAM", buffer.len());
        self.interface.cmd_with_data(Cmd::WRITE_BW_DATA, buffer)?;
        self.display()
    }

    /// Write the 70 LUT bytes of a waveform
    fn set_lut(&mut self, waveform: &Waveform) -> Result<(), Error> {
        log::debug!("Setting LUT data");
        self.interface
            .cmd_with_data(Cmd::WRITE_LUT_REGISTER, &waveform.lut())
    }

    /// Voltage and line timing registers carried in the waveform trailer
    fn set_waveform_registers(&mut self, waveform: &Waveform) -> Result<(), Error> {
        let trailer = &waveform.trailer;
        self.interface
            .cmd_with_data(Cmd::GATE_DRIVING_VOLTAGE, &[trailer.gate_voltage])?;
        self.interface
            .cmd_with_data(Cmd::SOURCE_DRIVING_VOLTAGE, &trailer.source_voltage)?;
        self.interface
            .cmd_with_data(Cmd::SET_DUMMY_LINE_PERIOD, &[trailer.dummy_line])?;
        self.interface
            .cmd_with_data(Cmd::SET_GATE_LINE_WIDTH, &[trailer.gate_line_width])
    }

    /// X window covers every byte column, Y window runs from the last gate
    /// line down to 0 to match the Y-decrement entry mode
    fn set_ram_window(&mut self) -> Result<(), Error> {
        let [last_lsb, last_msb] = GEOMETRY.last_row();
        self.interface
            .cmd_with_data(Cmd::SET_RAMX_START_END, &[0x00, GEOMETRY.ram_x_end()])?;
        self.interface
            .cmd_with_data(Cmd::SET_RAMY_START_END, &[last_lsb, last_msb, 0x00, 0x00])
    }

    /// Point the RAM counters at X = 0, Y = last gate line
    fn set_ram_counter(&mut self) -> Result<(), Error> {
        self.interface.cmd_with_data(Cmd::SET_RAMX_COUNTER, &[0x00])?;
        self.interface
            .cmd_with_data(Cmd::SET_RAMY_COUNTER, &GEOMETRY.last_row())
    }

    /// Trigger display update with specified control value and wait for completion
    fn trigger_display_update(&mut self, ctrl2_value: u8) -> Result<(), Error> {
        self.interface
            .cmd_with_data(Cmd::UPDATE_DISPLAY_CTRL2, &[ctrl2_value])?;
        self.interface.cmd(Cmd::MASTER_ACTIVATE)?;
        self.interface.wait_until_idle()
    }
}
