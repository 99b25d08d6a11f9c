//! Presentation model for the Notiwatch screen
//!
//! This crate provides:
//! - `DisplayState`, the [`DisplaySink`](notiwatch_core::traits::DisplaySink)
//!   the device pushes status, time and pairing updates into
//! - `NotificationView`, a snapshot of the store ready to draw
//! - `DisplayBackend` trait for the panel driver
//! - Text sanitization and RTL detection for the bundled fonts
//! - Status and app accent colors
//!
//! # Architecture
//!
//! The device never draws. It marks the state dirty; the main loop calls
//! [`DisplayState::render`] which pulls a fresh snapshot from the store and
//! hands it to the backend.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod backend;
pub mod palette;
pub mod sanitize;
pub mod state;
pub mod view;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use palette::{app_color, status_color, Rgb};
pub use sanitize::{is_rtl, sanitize, sanitize_bytes, TextDirection};
pub use state::DisplayState;
pub use view::{NotificationView, UNDO_BANNER};
