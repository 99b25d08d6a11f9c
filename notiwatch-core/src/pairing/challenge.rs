//! Passkey challenge data

use core::fmt::Write;

use heapless::String;

use super::machine::PairingError;
use crate::link::ConnHandle;

/// Largest passkey that fits six decimal digits
pub const MAX_PASSKEY: u32 = 999_999;

/// Six-digit numeric pairing code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Passkey(u32);

impl Passkey {
    pub fn new(value: u32) -> Result<Self, PairingError> {
        if value > MAX_PASSKEY {
            return Err(PairingError::InvalidPasskey(value));
        }
        Ok(Self(value))
    }

    /// Zero-padded decimal form, e.g. "004821"
    pub fn digits(&self) -> String<6> {
        let mut out = String::new();
        // Six digits always fit
        let _ = write!(out, "{:06}", self.0);
        out
    }
}

/// Challenge raised for one connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PairingChallenge {
    pub conn: ConnHandle,
    pub passkey: Passkey,
}
