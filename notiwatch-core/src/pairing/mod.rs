//! Passkey pairing
//!
//! Tracks the single authentication challenge raised by the secure layer
//! and its resolution by the user or by the stack.

pub mod challenge;
pub mod machine;

pub use challenge::{Passkey, PairingChallenge, MAX_PASSKEY};
pub use machine::{PairingError, PairingEvent, PairingState};
