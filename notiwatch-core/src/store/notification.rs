//! A single stored notification

use heapless::String;
use notiwatch_protocol::text::copy_truncated;
use notiwatch_protocol::{
    AddNotification, NotificationKind, MAX_APP_NAME_LEN, MAX_TEXT_LEN, MAX_TITLE_LEN,
};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Notification {
    pub kind: NotificationKind,
    /// Source application, e.g. "WhatsApp"
    pub app_name: String<MAX_APP_NAME_LEN>,
    /// Sender or title line
    pub sender: String<MAX_TITLE_LEN>,
    /// Body text
    pub content: String<MAX_TEXT_LEN>,
    /// Unix seconds as sent by the phone
    pub timestamp: u32,
    pub read: bool,
}

impl Notification {
    /// Build an unread notification, truncating each field to its capacity
    pub fn new(app_name: &str, sender: &str, content: &str, timestamp: u32) -> Self {
        Self {
            kind: NotificationKind::Other,
            app_name: copy_truncated(app_name.as_bytes()),
            sender: copy_truncated(sender.as_bytes()),
            content: copy_truncated(content.as_bytes()),
            timestamp,
            read: false,
        }
    }
}

impl From<AddNotification> for Notification {
    fn from(add: AddNotification) -> Self {
        Self {
            kind: add.kind,
            app_name: add.app_name,
            sender: add.title,
            content: add.text,
            timestamp: add.timestamp,
            read: false,
        }
    }
}
