/// Parameter bytes sent along with the commands in [`crate::cmd::Cmd`].
///
/// Values that depend on the panel geometry (RAM windows, MUX lines) are not
/// here, they are derived from [`crate::GEOMETRY`].
pub struct Flag;
#[allow(missing_docs)]
impl Flag {
    // Analog / Digital Block Control (0x74 / 0x7E), fixed by the vendor
    pub const ANALOG_BLOCK_CONTROL: u8 = 0x54;
    pub const DIGITAL_BLOCK_CONTROL: u8 = 0x3B;

    // Driver Output Control (0x01) third byte
    pub const DRIVER_OUTPUT_GATE_SCAN_FROM_G0: u8 = 0x00;

    // Data Entry Mode (0x11)
    pub const DATA_ENTRY_DECRY_INCRX: u8 = 0x01; // Y decrement, X increment

    // Deep Sleep Mode (0x10)
    pub const DEEP_SLEEP_MODE_1: u8 = 0x01;

    // Border Waveform Control (0x3C)
    pub const BORDER_WAVEFORM_FULL: u8 = 0x03;
    pub const BORDER_WAVEFORM_PARTIAL: u8 = 0x01;

    // VCOM (0x2C)
    pub const VCOM_FULL: u8 = 0x55;
    pub const VCOM_PARTIAL: u8 = 0x26; // lower swing, less ghosting

    // Display Update Control 2 (0x22) sequences
    pub const DISPLAY_UPDATE_FULL: u8 = 0xC7; // clock, analog, LUT, refresh, power off
    pub const DISPLAY_UPDATE_PARTIAL: u8 = 0x0C; // refresh with the resident LUT
    pub const DISPLAY_UPDATE_LOAD_PARTIAL: u8 = 0xC0; // clock + analog on, no refresh
    pub const DISPLAY_UPDATE_POWER_OFF: u8 = 0xC3;

    // Display option (0x37), byte 4 enables RAM ping-pong for partial refresh
    pub const DISPLAY_OPTION_PING_PONG: u8 = 0x40;
}
