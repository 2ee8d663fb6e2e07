//! Frame codec for the MH-Z19 serial protocol.
//!
//! Every frame is 9 bytes. Requests look like `FF 01 CMD d0 d1 d2 d3 d4 CS` and responses
//! like `FF CMD b2 b3 b4 b5 b6 b7 CS`, where `CS` is the checksum of bytes 1 to 7.

use crate::constants::*;
use crate::error::FrameError;
use crate::Measurement;

/// A command or response frame.
pub type Frame = [u8; FRAME_LEN];

/// Command codes understood by the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Read gas concentration and the raw status bytes.
    ReadGasConcentration,
    /// Zero point calibration. The sensor must have been in 400 ppm air for 20 minutes.
    CalibrateZero,
    /// Span point calibration.
    CalibrateSpan,
    /// Turn automatic baseline correction on or off.
    SetSelfCalibration,
    /// Set the full scale detection range (MH-Z19B).
    SetDetectionRange,
}

impl Command {
    /// Returns the byte sent in position 2 of a request and echoed in position 1 of the
    /// reply.
    pub fn code(self) -> u8 {
        match self {
            Command::ReadGasConcentration => 0x86,
            Command::CalibrateZero => 0x87,
            Command::CalibrateSpan => 0x88,
            Command::SetSelfCalibration => 0x79,
            Command::SetDetectionRange => 0x99,
        }
    }
}

/// Full scale detection range of the MH-Z19B.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionRange {
    /// 0 to 2000 ppm.
    Ppm2000,
    /// 0 to 5000 ppm.
    Ppm5000,
}

impl DetectionRange {
    /// Returns the upper bound of the range in ppm.
    pub fn ppm(self) -> u16 {
        match self {
            DetectionRange::Ppm2000 => 2000,
            DetectionRange::Ppm5000 => 5000,
        }
    }
}

/// Computes the protocol checksum of `bytes`.
///
/// The result is the two's complement of the byte sum, so `sum + checksum` is always
/// `0` modulo 256. A sum of zero yields zero.
pub fn checksum(bytes: &[u8]) -> u8 {
    let sum = bytes.iter().fold(0u8, |sum, &b| sum.wrapping_add(b));
    if sum == 0 {
        0
    } else {
        0xFF - sum + 1
    }
}

// Builds a request with the checksum computed over bytes 1 to 7.
fn command_frame(command: Command, data: [u8; 5]) -> Frame {
    let mut frame = [
        HEAD,
        SENSOR_ID,
        command.code(),
        data[0],
        data[1],
        data[2],
        data[3],
        data[4],
        0x00, // Placeholder for checksum
    ];
    frame[8] = checksum(&frame[1..8]);
    frame
}

/// Request for a span point calibration at `span` ppm.
///
/// The checksum is taken over `[0x01, 0x88, high, low]` only. The trailing data bytes
/// are zero, so the byte matches the regular 7-byte window.
pub fn calibrate_span_frame(span: u16) -> Frame {
    let [high, low] = span.to_be_bytes();
    let cs = checksum(&[SENSOR_ID, Command::CalibrateSpan.code(), high, low]);
    [
        HEAD,
        SENSOR_ID,
        Command::CalibrateSpan.code(),
        high,
        low,
        0x00,
        0x00,
        0x00,
        cs,
    ]
}

/// Request to change the detection range (MH-Z19B datasheet layout: the range goes in
/// bytes 6 and 7).
pub fn detection_range_frame(range: DetectionRange) -> Frame {
    let [high, low] = range.ppm().to_be_bytes();
    command_frame(Command::SetDetectionRange, [0, 0, 0, high, low])
}

/// Returns the offset of the first possible start of a reply to `command` in `bytes`,
/// or `bytes.len()` if there is none.
///
/// A start is `HEAD` followed by the command code, or a `HEAD` in the last position
/// whose successor has not arrived yet.
pub fn sync_offset(bytes: &[u8], command: Command) -> usize {
    (0..bytes.len())
        .find(|&i| {
            bytes[i] == HEAD && bytes.get(i + 1).map_or(true, |&b| b == command.code())
        })
        .unwrap_or(bytes.len())
}

/// Checks that `frame` is a complete response to `command`.
///
/// On success the frame is returned as a fixed-size array.
pub fn validate_response(frame: &[u8], command: Command) -> Result<Frame, FrameError> {
    let frame: Frame = frame
        .try_into()
        .map_err(|_| FrameError::WrongLength(frame.len()))?;

    if frame[0] != HEAD {
        return Err(FrameError::WrongStartByte(frame[0]));
    }
    if frame[1] != command.code() {
        return Err(FrameError::WrongCommand(command.code(), frame[1]));
    }
    let expected = checksum(&frame[1..8]);
    if expected != frame[8] {
        return Err(FrameError::BadChecksum(expected, frame[8]));
    }
    Ok(frame)
}

/// Decodes a validated gas concentration response.
pub fn parse_measurement(frame: &Frame) -> Measurement {
    let tt = frame[4];
    Measurement {
        co2_ppm: u16::from_be_bytes([frame[2], frame[3]]),
        temperature_celsius: i16::from(tt) - TEMPERATURE_OFFSET,
        tt,
        ss: frame[5],
        uhul: u16::from_be_bytes([frame[6], frame[7]]),
    }
}
