/// Command opcodes understood by the panel controller.
pub struct Cmd;
impl Cmd {
    // Init
    pub const DRIVER_OUTPUT_CONTROL: u8 = 0x01;
    pub const GATE_DRIVING_VOLTAGE: u8 = 0x03;
    pub const SOURCE_DRIVING_VOLTAGE: u8 = 0x04;
    pub const DEEP_SLEEP_MODE: u8 = 0x10;
    pub const DATA_ENTRY_MODE: u8 = 0x11;
    pub const SW_RESET: u8 = 0x12;
    pub const WRITE_VCOM_REGISTER: u8 = 0x2C;
    pub const WRITE_LUT_REGISTER: u8 = 0x32;
    pub const WRITE_DISPLAY_OPTION: u8 = 0x37;
    pub const SET_DUMMY_LINE_PERIOD: u8 = 0x3A;
    pub const SET_GATE_LINE_WIDTH: u8 = 0x3B;
    pub const BORDER_WAVEFORM_CONTROL: u8 = 0x3C;
    pub const SET_RAMX_START_END: u8 = 0x44;
    pub const SET_RAMY_START_END: u8 = 0x45;
    pub const SET_ANALOG_BLOCK_CONTROL: u8 = 0x74;
    pub const SET_DIGITAL_BLOCK_CONTROL: u8 = 0x7E;

    // Update
    pub const SET_RAMX_COUNTER: u8 = 0x4E;
    pub const SET_RAMY_COUNTER: u8 = 0x4F;
    pub const WRITE_BW_DATA: u8 = 0x24;
    pub const UPDATE_DISPLAY_CTRL2: u8 = 0x22;
    pub const MASTER_ACTIVATE: u8 = 0x20;
}

/*
Vendor reference init for the 2.13" V2 uses, in order:
0x12 - Software Reset
0x74 / 0x7E - Analog / Digital Block Control
0x01 - Driver Output Control
0x11 - Data Entry Mode
0x44 / 0x45 - RAM X / Y window
0x3C - Border Waveform Control
0x2C - VCOM
0x03 / 0x04 - Gate / Source driving voltage
0x3A / 0x3B - Dummy line period / Gate line width
0x32 - Write LUT
0x4E / 0x4F - RAM X / Y counter
*/
