//! BLE link lifecycle
//!
//! Tracks advertising, connection and encryption. The link state decides
//! which connection indicator is shown and whether phone commands are
//! applied.

pub mod state;

pub use state::{ConnHandle, ConnectionStatus, LinkEvent, LinkState};
