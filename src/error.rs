use core::fmt;

/// Errors surfaced by the driver.
///
/// Sensor-side problems (silence, garbled or mismatched frames) are not errors: read
/// operations retry them and report `None` once the attempts are used up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Writing or flushing the serial channel failed.
    WriteFailure,
    /// The serial channel reported a read error other than a timeout or an interruption.
    ReadFailure,
    /// An argument was outside the range accepted by the sensor.
    InvalidArg,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WriteFailure => write!(f, "failed to write to serial channel"),
            Error::ReadFailure => write!(f, "failed to read from serial channel"),
            Error::InvalidArg => write!(f, "argument out of range"),
        }
    }
}

/// Reason a response frame was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// The frame is not exactly 9 bytes long.
    WrongLength(usize),
    /// The first byte was not `0xFF`.
    WrongStartByte(u8),
    /// The echoed command code differs from the one sent (expected, found).
    WrongCommand(u8, u8),
    /// The checksum byte does not match the payload (expected, found).
    BadChecksum(u8, u8),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::WrongLength(len) => {
                write!(f, "wrong frame length, expected 9 bytes, found {}", len)
            }
            FrameError::WrongStartByte(found) => {
                write!(f, "wrong start byte, expected 0xFF, found {:02X}", found)
            }
            FrameError::WrongCommand(expected, found) => write!(
                f,
                "wrong command, expected {:02X}, found {:02X}",
                expected, found
            ),
            FrameError::BadChecksum(expected, found) => write!(
                f,
                "bad checksum, expected {:02X}, found {:02X}",
                expected, found
            ),
        }
    }
}
