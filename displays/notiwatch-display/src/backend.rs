//! Display backend trait
//!
//! Defines the interface for the panel driver.

use crate::palette::Rgb;
use crate::view::NotificationView;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Display not initialized
    NotInitialized,
    /// Glyph or frame buffer exhausted
    BufferOverflow,
}

/// Display backend trait
///
/// Implementations own layout and fonts; they receive already sanitized
/// text and resolved colors.
pub trait DisplayBackend {
    /// Connection indicator dot
    fn draw_status(&mut self, color: Rgb) -> Result<(), DisplayError>;

    /// Top-bar clock
    fn draw_time(&mut self, time: &str) -> Result<(), DisplayError>;

    /// Notification card, counter and undo banner
    fn draw_notification(&mut self, view: &NotificationView) -> Result<(), DisplayError>;

    /// Pairing overlay; `None` hides it
    fn draw_pairing(&mut self, code: Option<&str>) -> Result<(), DisplayError>;

    /// Flush buffered content to the panel
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Check if the display is ready
    fn is_ready(&self) -> bool;
}
