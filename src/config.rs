//! Timing configuration

/// Timing knobs for the bus primitives.
///
/// The defaults follow the vendor reference: a 200 ms dwell on each edge of
/// the reset pulse and 100 ms between busy polls. Polling stops with
/// [`crate::Error::BusyTimeout`] after `busy_timeout_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Sleep between two reads of the busy line
    pub busy_poll_ms: u32,
    /// Give up waiting for the busy line after this long
    pub busy_timeout_ms: u32,
    /// Dwell after each edge of the hardware reset pulse
    pub reset_pulse_ms: u32,
    /// Settle time after entering deep sleep
    pub sleep_settle_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            busy_poll_ms: 100,
            busy_timeout_ms: 10_000, // a full refresh takes 2-4 s
            reset_pulse_ms: 200,
            sleep_settle_ms: 100,
        }
    }
}

impl Config {
    /// Set the busy poll interval, clamped to at least 1 ms
    pub fn with_busy_poll_ms(mut self, ms: u32) -> Self {
        self.busy_poll_ms = ms.max(1);
        self
    }

    /// Set the busy timeout
    pub fn with_busy_timeout_ms(mut self, ms: u32) -> Self {
        self.busy_timeout_ms = ms;
        self
    }

    /// Set the reset pulse dwell
    pub fn with_reset_pulse_ms(mut self, ms: u32) -> Self {
        self.reset_pulse_ms = ms;
        self
    }

    /// Set the deep sleep settle time
    pub fn with_sleep_settle_ms(mut self, ms: u32) -> Self {
        self.sleep_settle_ms = ms;
        self
    }
}
