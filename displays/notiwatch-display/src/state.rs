//! Display state fed by the device
//!
//! [`DisplayState`] is the device's [`DisplaySink`]. It only records what
//! changed; [`DisplayState::render`] redraws the dirty parts.

use heapless::String;
use notiwatch_core::store::NotificationStore;
use notiwatch_core::traits::DisplaySink;
use notiwatch_core::ConnectionStatus;

use crate::backend::{DisplayBackend, DisplayError};
use crate::palette::status_color;
use crate::view::NotificationView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct Dirty {
    status: bool,
    time: bool,
    notifications: bool,
    pairing: bool,
}

impl Dirty {
    const ALL: Self = Self {
        status: true,
        time: true,
        notifications: true,
        pairing: true,
    };

    fn any(&self) -> bool {
        self.status || self.time || self.notifications || self.pairing
    }
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayState {
    status: ConnectionStatus,
    time: String<8>,
    pairing_code: Option<String<6>>,
    dirty: Dirty,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayState {
    pub fn new() -> Self {
        let mut time = String::new();
        let _ = time.push_str("--:--");
        Self {
            status: ConnectionStatus::Disconnected,
            time,
            pairing_code: None,
            dirty: Dirty::ALL,
        }
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    /// Code on the pairing overlay, if shown
    pub fn pairing_code(&self) -> Option<&str> {
        self.pairing_code.as_deref()
    }

    /// Check if anything needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty.any()
    }

    /// Force a full redraw (e.g. after the panel woke up)
    pub fn mark_dirty(&mut self) {
        self.dirty = Dirty::ALL;
    }

    /// Redraw whatever changed since the last render
    ///
    /// Returns `Ok(false)` when nothing was dirty or the backend is not
    /// ready. Dirty flags are only cleared once the frame is flushed.
    pub fn render<B: DisplayBackend, const N: usize>(
        &mut self,
        store: &NotificationStore<N>,
        now: Option<u32>,
        backend: &mut B,
    ) -> Result<bool, DisplayError> {
        if !self.is_dirty() || !backend.is_ready() {
            return Ok(false);
        }

        if self.dirty.status {
            backend.draw_status(status_color(self.status))?;
        }
        if self.dirty.time {
            backend.draw_time(&self.time)?;
        }
        if self.dirty.notifications {
            backend.draw_notification(&NotificationView::capture(store, now))?;
        }
        if self.dirty.pairing {
            backend.draw_pairing(self.pairing_code())?;
        }
        backend.flush()?;

        self.dirty = Dirty::default();
        Ok(true)
    }
}

impl DisplaySink for DisplayState {
    fn set_connection_status(&mut self, status: ConnectionStatus) {
        if self.status != status {
            self.status = status;
            self.dirty.status = true;
        }
    }

    fn set_time(&mut self, time: &str) {
        if self.time != time {
            self.time.clear();
            let _ = self.time.push_str(time);
            self.dirty.time = true;
        }
    }

    fn notifications_changed(&mut self) {
        self.dirty.notifications = true;
    }

    fn show_pairing_code(&mut self, code: &str) {
        let mut digits = String::new();
        let _ = digits.push_str(code);
        self.pairing_code = Some(digits);
        self.dirty.pairing = true;
    }

    fn hide_pairing(&mut self) {
        if self.pairing_code.take().is_some() {
            self.dirty.pairing = true;
        }
    }
}
