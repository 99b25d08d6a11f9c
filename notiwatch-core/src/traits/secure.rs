//! BLE secure layer trait

use crate::link::ConnHandle;

/// Authentication replies sent back to the BLE stack
pub trait SecureLayer {
    /// The user confirmed the passkey shown for `conn`
    fn accept_passkey(&mut self, conn: ConnHandle);

    /// The user rejected the passkey shown for `conn`
    fn cancel_auth(&mut self, conn: ConnHandle);
}
