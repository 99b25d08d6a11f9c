//! Observer for input the device drops
//!
//! None of these conditions are fatal; the observer exists for logging and
//! counters. Every method has an empty default.

use notiwatch_protocol::{PacketError, ReassemblyError};

pub trait ErrorObserver {
    /// A complete frame failed to decode and was dropped
    fn malformed_packet(&mut self, _error: PacketError) {}

    /// A write would have overflowed the reassembly buffer
    fn buffer_overflow(&mut self, _error: ReassemblyError) {}

    /// The phone disconnected
    fn connection_dropped(&mut self, _reason: u8) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ErrorObserver for NoopObserver {}
