//! Wall clock trait

/// Clock errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// The RTC rejected the new time
    Rejected,
    /// The RTC did not respond
    Unavailable,
}

/// Source of wall-clock time in Unix seconds
pub trait Clock {
    /// Current time, or `None` until the clock has been set
    fn now(&self) -> Option<u32>;

    /// Set the current time
    fn set_time(&mut self, timestamp: u32) -> Result<(), ClockError>;
}

/// Clock kept in software and advanced by the tick timer
///
/// Boards without an RTC use this; `advance_ms` is called from the same
/// loop that ticks the device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SoftClock {
    base: Option<u32>,
    elapsed_ms: u32,
}

impl SoftClock {
    pub const fn new() -> Self {
        Self {
            base: None,
            elapsed_ms: 0,
        }
    }

    pub fn advance_ms(&mut self, ms: u32) {
        if self.base.is_none() {
            return;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(ms);
        // Fold whole seconds into the base so the counter never saturates
        let secs = self.elapsed_ms / 1000;
        if let Some(base) = self.base.as_mut() {
            *base = base.saturating_add(secs);
        }
        self.elapsed_ms %= 1000;
    }
}

impl Clock for SoftClock {
    fn now(&self) -> Option<u32> {
        self.base
    }

    fn set_time(&mut self, timestamp: u32) -> Result<(), ClockError> {
        self.base = Some(timestamp);
        self.elapsed_ms = 0;
        Ok(())
    }
}
