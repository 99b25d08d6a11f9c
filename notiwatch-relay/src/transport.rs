//! Write side of the phone's GATT client

/// Transport errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// No connection to the device
    NotConnected,
    /// A previous write is still outstanding
    Busy,
    /// The stack or the device refused the write
    Rejected,
}

/// Characteristic writer
///
/// `write` only starts the write. The result arrives later and must be
/// passed to [`Outbox::on_write_complete`](crate::Outbox::on_write_complete).
pub trait Transport {
    fn write(&mut self, frame: &[u8]) -> Result<(), TransportError>;
}
