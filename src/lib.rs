#![cfg_attr(not(test), no_std)]

use embedded_hal::delay::DelayNs;
use embedded_io::{Error as _, ErrorKind, Read, Write};
use log::debug;

mod constants;
pub use constants::*;

mod error;
pub use error::*;

mod config;
pub use config::*;

pub mod frame;
pub use frame::{checksum, Command, DetectionRange, Frame};

/// Represents an MH-Z19 CO2 sensor.
///
/// This struct provides methods to read measurements from the sensor and to
/// calibrate it.
///
/// # Type Parameters
///
/// * `Serial`: The serial interface used to communicate with the sensor (9600 8N1).
///   It must implement `embedded_io::Read` and `embedded_io::Write`.
/// * `Delay`: Provides the pause between two read attempts.
pub struct Mhz19<Serial, Delay> {
    serial: Serial,
    delay: Delay,
    config: Config,
}

/// Represents a full reading from the MH-Z19 sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    /// CO2 concentration in ppm.
    pub co2_ppm: u16,
    /// Sensor temperature in °C (`tt - 40`).
    pub temperature_celsius: i16,
    /// Raw temperature byte.
    pub tt: u8,
    /// Raw status byte.
    pub ss: u8,
    /// Raw `UhUl` word.
    pub uhul: u16,
}

impl<S, D> Mhz19<S, D>
where
    S: Read + Write,
    D: DelayNs,
{
    /// Creates a new `Mhz19` sensor instance.
    ///
    /// # Arguments
    ///
    /// * `serial`: The serial interface, already opened at 9600 baud, 8 data bits,
    ///   no parity and 1 stop bit.
    /// * `delay`: Delay provider for the backoff between read attempts.
    /// * `config`: Retry settings.
    pub fn new(serial: S, delay: D, config: Config) -> Self {
        Self {
            serial,
            delay,
            config,
        }
    }

    /// Returns the retry settings in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Releases the serial interface and the delay provider.
    pub fn release(self) -> (S, D) {
        (self.serial, self.delay)
    }

    /// Reads the CO2 concentration in ppm.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(ppm))` once a valid reply is received.
    /// * `Ok(None)` if no valid reply came back within the configured attempts. This is
    ///   expected while the sensor warms up or when the line is noisy.
    /// * `Err(Error)` if the serial channel itself failed.
    pub fn read_co2_ppm(&mut self) -> Result<Option<u16>, Error> {
        let reading = self.read_all()?;
        Ok(reading.map(|m| m.co2_ppm))
    }

    /// Reads the CO2 concentration together with the temperature and raw status fields.
    ///
    /// Uses the same framing and retry policy as [`Mhz19::read_co2_ppm`]. When all
    /// attempts fail the result is `None`, never a partially filled reading.
    pub fn read_all(&mut self) -> Result<Option<Measurement>, Error> {
        let reply = self.query(Command::ReadGasConcentration, &READ_GAS_CONCENTRATION)?;
        let measurement = reply.as_ref().map(frame::parse_measurement);
        if let Some(m) = &measurement {
            debug!(
                "CO2: {} ppm, temperature: {} °C, SS: {:02X}, UhUl: {}",
                m.co2_ppm, m.temperature_celsius, m.ss, m.uhul
            );
        }
        Ok(measurement)
    }

    /// Performs a zero point calibration.
    ///
    /// Zero point is 400 ppm. The sensor must have been working in 400 ppm air for at
    /// least 20 minutes. The sensor sends no acknowledgement.
    pub fn calibrate_zero(&mut self) -> Result<(), Error> {
        debug!("Calibrating zero point (CMD 0x87)");
        self.write(&CALIBRATE_ZERO)
    }

    /// Performs a span point calibration at `span` ppm.
    ///
    /// Run [`Mhz19::calibrate_zero`] first and keep the sensor at the given CO2 level for
    /// at least 20 minutes. The datasheet asks for at least 1000 ppm and suggests 2000.
    ///
    /// # Returns
    ///
    /// * `Ok(())` once the command is written.
    /// * `Err(Error::InvalidArg)` if `span` is below 1000 ppm. Nothing is sent.
    /// * `Err(Error::WriteFailure)` for serial communication issues.
    pub fn calibrate_span(&mut self, span: u16) -> Result<(), Error> {
        if span < MIN_SPAN_PPM {
            log::error!("Span {} ppm below minimum of {} ppm", span, MIN_SPAN_PPM);
            return Err(Error::InvalidArg);
        }
        debug!("Calibrating span point to {} ppm (CMD 0x88)", span);
        self.write(&frame::calibrate_span_frame(span))
    }

    /// Enables automatic baseline correction (factory default).
    ///
    /// Suited to indoor monitors in offices, schools and homes.
    pub fn enable_self_calibration(&mut self) -> Result<(), Error> {
        debug!("Enabling self calibration (CMD 0x79)");
        self.write(&ENABLE_SELF_CALIBRATION)
    }

    /// Disables automatic baseline correction.
    ///
    /// Suited to greenhouses, farms and refrigerators, where the air never settles
    /// back to 400 ppm.
    pub fn disable_self_calibration(&mut self) -> Result<(), Error> {
        debug!("Disabling self calibration (CMD 0x79)");
        self.write(&DISABLE_SELF_CALIBRATION)
    }

    /// Sets the full scale detection range (MH-Z19B).
    pub fn set_detection_range(&mut self, range: DetectionRange) -> Result<(), Error> {
        debug!("Setting detection range to {} ppm (CMD 0x99)", range.ppm());
        self.write(&frame::detection_range_frame(range))
    }

    // Sends `request` and waits for a valid reply to `command`, retrying with a fixed
    // backoff. Returns `None` once the attempts are exhausted.
    fn query(&mut self, command: Command, request: &Frame) -> Result<Option<Frame>, Error> {
        let attempts = self.config.attempts.max(1);

        for attempt in 1..=attempts {
            self.write(request)?;

            let mut buffer = [0u8; FRAME_LEN];
            let len = self.read(command, &mut buffer)?;

            match frame::validate_response(&buffer[..len], command) {
                Ok(frame) => {
                    debug!("Successfully read and validated frame: {:02X?}", frame);
                    return Ok(Some(frame));
                }
                Err(e) => {
                    log::warn!(
                        "Attempt {}/{} rejected: {}. Frame: {:02X?}",
                        attempt,
                        attempts,
                        e,
                        &buffer[..len]
                    );
                }
            }

            self.delay.delay_ms(self.config.retry_delay_ms);
        }

        log::error!("Failed to read a valid frame after {} attempts", attempts);
        Ok(None)
    }

    // Writes a 9-byte command frame to the serial port.
    fn write(&mut self, command: &Frame) -> Result<(), Error> {
        debug!("Executing command: {:02X?}", command);
        self.serial
            .write_all(command)
            .map_err(|_| Error::WriteFailure)?;
        self.serial.flush().map_err(|_| Error::WriteFailure)?; // Ensure data is sent
        Ok(())
    }

    // Reads one frame. Bytes ahead of `HEAD` + command code are dropped, so a stray
    // byte or the tail of an earlier reply does not shift every later frame. A timeout,
    // end of data or too much noise ends the read early and leaves the short length for
    // validation to reject.
    fn read(&mut self, command: Command, buffer: &mut Frame) -> Result<usize, Error> {
        let mut filled = 0;
        let mut skipped = 0;

        while filled < FRAME_LEN {
            match self.serial.read(&mut buffer[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == ErrorKind::TimedOut => {
                    debug!("Serial read timed out after {} bytes", filled);
                    break;
                }
                Err(e) => {
                    log::error!("Serial read error: {:?}", e);
                    return Err(Error::ReadFailure);
                }
            }

            let start = frame::sync_offset(&buffer[..filled], command);
            if start > 0 {
                debug!("Dropping {:02X?} ahead of frame start", &buffer[..start]);
                buffer.copy_within(start..filled, 0);
                filled -= start;
                skipped += start;
                if skipped > RESYNC_LIMIT {
                    log::warn!("No frame start found within {} bytes", skipped);
                    break;
                }
            }
        }

        Ok(filled)
    }
}
