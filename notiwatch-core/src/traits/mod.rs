//! Collaborator traits
//!
//! These traits define the interface between the device logic and the
//! board: the screen, the real-time clock, the BLE secure layer, and an
//! optional observer for dropped input.

pub mod clock;
pub mod display;
pub mod observer;
pub mod secure;

pub use clock::{Clock, ClockError, SoftClock};
pub use display::DisplaySink;
pub use observer::{ErrorObserver, NoopObserver};
pub use secure::SecureLayer;
