//! Board-agnostic device logic for Notiwatch
//!
//! This crate contains everything the wearable does with notifications
//! that does not depend on a specific radio, screen or RTC:
//!
//! - Notification store with cursor and undoable delete
//! - BLE link and passkey pairing state machines
//! - Command dispatch from reassembled GATT writes
//! - Clock readout and relative timestamps
//! - Collaborator traits for the display, clock and secure layer
//! - The [`Device`] composition root and its mutex-guarded wrapper

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

mod fmt;

pub mod config;
pub mod device;
pub mod gesture;
pub mod link;
pub mod pairing;
pub mod shared;
pub mod store;
pub mod time;
pub mod traits;

pub use config::{ConfigError, DeviceConfig, MAX_NOTIFICATIONS, TICK_INTERVAL_MS};
pub use device::{Device, Dispatch, Store, WriteOutcome};
pub use gesture::{Action, Gesture};
pub use link::{ConnHandle, ConnectionStatus, LinkState};
pub use pairing::{PairingError, PairingState};
pub use shared::SharedDevice;
pub use store::{DeleteError, Notification, NotificationStore};
