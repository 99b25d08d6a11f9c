//! Pairing state machine

use super::challenge::{PairingChallenge, Passkey};

/// Pairing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PairingError {
    /// No challenge is waiting for the user
    NoChallenge,
    /// Passkey does not fit six digits
    InvalidPasskey(u32),
}

/// Pairing states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PairingState {
    #[default]
    NoChallenge,
    /// Code shown, waiting for the user
    Displaying(PairingChallenge),
    /// User accepted; waiting for the stack to finish pairing
    Confirmed(PairingChallenge),
}

/// Pairing events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PairingEvent {
    /// Secure layer asked to display or confirm a passkey
    Requested(PairingChallenge),
    UserAccepted,
    UserRejected,
    /// Secure layer cancelled or failed authentication, or the link dropped
    Aborted,
    /// Secure layer reports pairing finished
    Completed,
}

impl PairingState {
    pub fn transition(self, event: PairingEvent) -> Self {
        use PairingEvent::*;
        use PairingState::*;

        match (self, event) {
            // A second request updates the shown code in place
            (NoChallenge | Displaying(_), Requested(challenge)) => Displaying(challenge),

            (Displaying(challenge), UserAccepted) => Confirmed(challenge),
            (Displaying(_), UserRejected) => NoChallenge,

            (Displaying(_) | Confirmed(_), Aborted) => NoChallenge,
            (Displaying(_) | Confirmed(_), Completed) => NoChallenge,

            // Default: stay in current state
            _ => self,
        }
    }

    /// Challenge waiting for the user
    pub fn challenge(&self) -> Option<&PairingChallenge> {
        match self {
            PairingState::Displaying(challenge) => Some(challenge),
            _ => None,
        }
    }

    /// Code of the handshake in progress, kept until it resolves
    pub fn passkey(&self) -> Option<Passkey> {
        match self {
            PairingState::Displaying(challenge) | PairingState::Confirmed(challenge) => {
                Some(challenge.passkey)
            }
            PairingState::NoChallenge => None,
        }
    }

    /// A handshake has started and not yet resolved
    pub fn is_in_progress(&self) -> bool {
        !matches!(self, PairingState::NoChallenge)
    }
}
