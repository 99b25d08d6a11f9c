//! Device configuration
//!
//! All timing is expressed in ticks of the periodic timer that drives
//! [`Device::tick`](crate::device::Device::tick).

/// Stored notifications before the oldest is evicted
pub const MAX_NOTIFICATIONS: usize = 30;

/// Default tick period in milliseconds
pub const TICK_INTERVAL_MS: u32 = 100;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Tick period of zero
    ZeroTickInterval,
    /// Undo window of zero ticks would commit deletes immediately
    ZeroDeleteTimeout,
    /// A refresh interval of zero ticks
    ZeroRefreshInterval,
}

/// Timing configuration for the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceConfig {
    /// Period of the tick timer (ms)
    pub tick_interval_ms: u32,
    /// Ticks a pending delete waits before it is committed
    pub delete_timeout_ticks: u16,
    /// Ticks between refreshes of relative timestamps ("5m ago")
    pub relative_refresh_ticks: u32,
    /// Ticks between clock readouts
    pub clock_refresh_ticks: u32,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            delete_timeout_ticks: 20,
            relative_refresh_ticks: 300,
            clock_refresh_ticks: 600,
        }
    }
}

impl DeviceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.delete_timeout_ticks == 0 {
            return Err(ConfigError::ZeroDeleteTimeout);
        }
        if self.relative_refresh_ticks == 0 || self.clock_refresh_ticks == 0 {
            return Err(ConfigError::ZeroRefreshInterval);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing() {
        let config = DeviceConfig::default();
        assert!(config.validate().is_ok());
        // 2 s undo window, 30 s and 60 s refreshes at 100 ms per tick
        assert_eq!(config.tick_interval_ms, 100);
        assert_eq!(config.delete_timeout_ticks, 20);
        assert_eq!(config.relative_refresh_ticks, 300);
        assert_eq!(config.clock_refresh_ticks, 600);
    }

    #[test]
    fn test_validate_rejects_zero() {
        let mut config = DeviceConfig::default();
        config.delete_timeout_ticks = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroDeleteTimeout));

        let mut config = DeviceConfig::default();
        config.tick_interval_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickInterval));

        let mut config = DeviceConfig::default();
        config.clock_refresh_ticks = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroRefreshInterval));
    }
}
