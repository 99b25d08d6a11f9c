//! Snapshot of what the notification screen shows

use core::fmt::Write;

use heapless::String;
use notiwatch_core::store::NotificationStore;
use notiwatch_core::time::{format_relative, RELATIVE_LEN};

use crate::palette::{app_color, Rgb, DEFAULT_APP_COLOR};
use crate::sanitize::{sanitize, TextDirection};

/// Banner shown while a delete can still be undone
pub const UNDO_BANNER: &str = "Deleting... Tap to cancel";

/// Header line on an empty screen
pub const EMPTY_TITLE: &str = "No notifications";

/// Body text on an empty screen
pub const EMPTY_BODY: &str = "All clear!";

/// Sanitized content buffer; large enough for a full content field
pub const CONTENT_LEN: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NotificationView {
    pub app_name: String<32>,
    pub app_color: Rgb,
    pub sender: String<64>,
    pub sender_direction: TextDirection,
    pub content: String<CONTENT_LEN>,
    pub content_direction: TextDirection,
    /// "5m ago"; empty on an empty screen
    pub age: String<RELATIVE_LEN>,
    /// "2 of 7"; empty on an empty screen
    pub counter: String<16>,
    pub unread: bool,
    pub undo_banner: bool,
}

impl NotificationView {
    /// Build the view for the store's current notification
    pub fn capture<const N: usize>(store: &NotificationStore<N>, now: Option<u32>) -> Self {
        let undo_banner = store.pending_delete().is_some();

        let Some(current) = store.current() else {
            return Self::empty(undo_banner);
        };

        let sender = sanitize::<64>(&current.sender);
        let content = sanitize::<CONTENT_LEN>(&current.content);

        let mut counter = String::new();
        let _ = write!(counter, "{} of {}", store.current_index() + 1, store.len());

        Self {
            app_name: sanitize(&current.app_name),
            app_color: app_color(&current.app_name),
            sender_direction: TextDirection::of(&sender),
            sender,
            content_direction: TextDirection::of(&content),
            content,
            age: format_relative(now, current.timestamp),
            counter,
            unread: !current.read,
            undo_banner,
        }
    }

    fn empty(undo_banner: bool) -> Self {
        let mut app_name = String::new();
        let _ = app_name.push_str(EMPTY_TITLE);
        let mut content = String::new();
        let _ = content.push_str(EMPTY_BODY);

        Self {
            app_name,
            app_color: DEFAULT_APP_COLOR,
            sender: String::new(),
            sender_direction: TextDirection::Ltr,
            content,
            content_direction: TextDirection::Ltr,
            age: String::new(),
            counter: String::new(),
            unread: false,
            undo_banner,
        }
    }

    pub fn is_empty_screen(&self) -> bool {
        self.counter.is_empty()
    }
}
