//! Notiwatch Notification Protocol
//!
//! This crate defines the binary protocol a phone uses to push notifications
//! to the Notiwatch device over a BLE GATT characteristic. Both ends link it:
//! the device decodes commands, the phone encodes frames sized to the
//! negotiated MTU.
//!
//! # Protocol Overview
//!
//! Every frame starts with a one-byte command. Integers are little-endian.
//! ```text
//! ADD_NOTIFICATION (0x01)
//! ┌─────┬──────┬─────────┬───────────┬──────────┬───────────┬─────┬───────┬──────┐
//! │ CMD │ KIND │ APP_LEN │ TITLE_LEN │ TEXT_LEN │ TIMESTAMP │ APP │ TITLE │ TEXT │
//! │ 1B  │ 1B   │ 1B      │ 1B        │ 1B       │ 4B (u32)  │ …   │ …     │ …    │
//! └─────┴──────┴─────────┴───────────┴──────────┴───────────┴─────┴───────┴──────┘
//!
//! TIME_SYNC (0x05)          CLEAR_ALL (0x03)
//! ┌─────┬───────────┐       ┌─────┐
//! │ CMD │ TIMESTAMP │       │ CMD │
//! └─────┴───────────┘       └─────┘
//! ```
//!
//! GATT writes may be split across several offset writes. The
//! [`Reassembler`] collects them; a write at offset 0 completes the frame.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

mod fmt;

pub mod command;
pub mod encoder;
pub mod kind;
pub mod reassembly;
pub mod text;

pub use command::{
    AddNotification, Command, PacketError, ADD_NOTIFICATION_HEADER_LEN, MAX_APP_NAME_LEN,
    MAX_TEXT_LEN, MAX_TITLE_LEN,
};
pub use encoder::{EncodeError, Frame, NotificationRecord, MAX_FRAME_SIZE};
pub use kind::NotificationKind;
pub use reassembly::{Reassembler, ReassemblyError, REASSEMBLY_BUFFER_SIZE};
