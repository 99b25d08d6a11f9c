//! Phone-side delivery of notifications to a Notiwatch device
//!
//! The [`Outbox`] encodes each message to fit the negotiated MTU, holds
//! messages while the link is not ready, drains them one at a time with
//! a short gap, and re-sends a frame whose write was never confirmed.
//! It is driven by the same kind of periodic `poll()` as the device side.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

mod fmt;

pub mod config;
pub mod outbox;
pub mod shared;
pub mod transport;

pub use config::{ConfigError, RelayConfig, MIN_MTU, OUTBOX_CAPACITY};
pub use outbox::{Outbound, Outbox, Submitted};
pub use shared::SharedOutbox;
pub use transport::{Transport, TransportError};
