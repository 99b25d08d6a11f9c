//! Relay configuration

use notiwatch_protocol::{ADD_NOTIFICATION_HEADER_LEN, MAX_FRAME_SIZE};

/// Smallest ATT MTU a BLE link may negotiate
pub const MIN_MTU: u16 = 23;

/// Messages held while the device is unreachable
pub const OUTBOX_CAPACITY: usize = 16;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// MTU below the BLE minimum
    MtuTooSmall(u16),
    /// ATT overhead leaves no room for a notification header
    OverheadTooLarge(u16),
    /// Retry delay of zero ticks would resend on every poll
    ZeroRetryDelay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelayConfig {
    /// MTU assumed until the link reports the negotiated one
    pub mtu: u16,
    /// Bytes of every write taken by the ATT header
    pub att_overhead: u16,
    /// Poll ticks between two queued sends
    pub drain_spacing_ticks: u16,
    /// Poll ticks to wait for a write confirmation before resending
    pub retry_delay_ticks: u16,
    /// Resends of one message before it is given up
    pub max_retry_attempts: u8,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            mtu: MIN_MTU,
            att_overhead: 3,
            drain_spacing_ticks: 1,
            retry_delay_ticks: 50,
            max_retry_attempts: 3,
        }
    }
}

impl RelayConfig {
    /// Largest frame that fits one write at `mtu`
    pub fn frame_budget(&self, mtu: u16) -> usize {
        usize::from(mtu.max(MIN_MTU))
            .saturating_sub(usize::from(self.att_overhead))
            .min(MAX_FRAME_SIZE)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mtu < MIN_MTU {
            return Err(ConfigError::MtuTooSmall(self.mtu));
        }
        if self.frame_budget(self.mtu) < ADD_NOTIFICATION_HEADER_LEN {
            return Err(ConfigError::OverheadTooLarge(self.att_overhead));
        }
        if self.retry_delay_ticks == 0 {
            return Err(ConfigError::ZeroRetryDelay);
        }
        Ok(())
    }
}
