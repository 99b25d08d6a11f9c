//! Display sink trait

use crate::link::ConnectionStatus;

/// Receiver of display refresh requests
///
/// Rendering is pull-based: `notifications_changed` carries no data, the
/// implementation reads the store again when it redraws.
pub trait DisplaySink {
    /// Update the connection indicator
    fn set_connection_status(&mut self, status: ConnectionStatus);

    /// Update the top-bar clock ("HH:MM" or "--:--")
    fn set_time(&mut self, time: &str);

    /// The notification list, cursor, read flags or pending delete changed,
    /// or relative timestamps need redrawing
    fn notifications_changed(&mut self);

    /// Show the pairing overlay with a six-digit code
    fn show_pairing_code(&mut self, code: &str);

    /// Dismiss the pairing overlay
    fn hide_pairing(&mut self);
}
