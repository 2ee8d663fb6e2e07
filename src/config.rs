/// Retry settings for read operations.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Config {
    /// Total number of request/response cycles per read, including the first one.
    pub attempts: u8,
    /// Fixed pause between two failed attempts, in milliseconds.
    pub retry_delay_ms: u32,
}

impl Config {
    /// Creates a new `Config` instance.
    ///
    /// # Arguments
    ///
    /// * `attempts` - Number of attempts per read. `0` is treated as `1`.
    /// * `retry_delay_ms` - Backoff between attempts.
    pub fn new(attempts: u8, retry_delay_ms: u32) -> Config {
        Config {
            attempts,
            retry_delay_ms,
        }
    }

    /// Sets the number of attempts per read.
    pub fn attempts(mut self, attempts: u8) -> Self {
        self.attempts = attempts;
        self
    }

    /// Sets the backoff between attempts.
    pub fn retry_delay_ms(mut self, retry_delay_ms: u32) -> Self {
        self.retry_delay_ms = retry_delay_ms;
        self
    }
}

/// Provides default configuration values for the MH-Z19 sensor.
impl Default for Config {
    /// Five attempts, 100 ms apart.
    fn default() -> Config {
        Config {
            attempts: 5,
            retry_delay_ms: 100,
        }
    }
}
