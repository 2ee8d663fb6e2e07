// HEAD is the byte that marks the beginning of any frame (command or response).
pub const HEAD: u8 = 0xFF;

// SENSOR_ID is the address byte sent in every command frame. The sensor only answers
// on this address, there is no multi-drop support.
pub const SENSOR_ID: u8 = 0x01;

// FRAME_LEN is the length of every command and response frame.
pub const FRAME_LEN: usize = 9;

// UART settings the serial collaborator must be opened with.
pub const BAUD_RATE: u32 = 9600;
pub const DATA_BITS: u8 = 8;
pub const STOP_BITS: u8 = 1;

// RESYNC_LIMIT is how many bytes a single read may discard while looking for the start
// of a reply before giving up on the attempt.
pub const RESYNC_LIMIT: usize = 2 * FRAME_LEN;

// Lowest span concentration the datasheet accepts for span calibration.
pub const MIN_SPAN_PPM: u16 = 1000;

// Temperature byte offset, temperature = TT - 40.
pub const TEMPERATURE_OFFSET: i16 = 40;

/// Read gas concentration request.
pub const READ_GAS_CONCENTRATION: [u8; FRAME_LEN] =
    [0xFF, 0x01, 0x86, 0x00, 0x00, 0x00, 0x00, 0x00, 0x79];

/// Zero point (400 ppm) calibration request.
pub const CALIBRATE_ZERO: [u8; FRAME_LEN] = [0xFF, 0x01, 0x87, 0x00, 0x00, 0x00, 0x00, 0x00, 0x78];

/// Enable automatic baseline correction.
pub const ENABLE_SELF_CALIBRATION: [u8; FRAME_LEN] =
    [0xFF, 0x01, 0x79, 0xA0, 0x00, 0x00, 0x00, 0x00, 0xE6];

/// Disable automatic baseline correction.
pub const DISABLE_SELF_CALIBRATION: [u8; FRAME_LEN] =
    [0xFF, 0x01, 0x79, 0x00, 0x00, 0x00, 0x00, 0x00, 0x86];
