//! Notification storage
//!
//! A bounded, ordered list of notifications with a cursor and a single
//! pending delete that can be undone until its window expires.

pub mod deletion;
pub mod notification;
pub mod ring;

pub use deletion::{DeleteError, DeletionTick, PendingDeletion};
pub use notification::Notification;
pub use ring::NotificationStore;
