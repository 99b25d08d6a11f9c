//! Outbound frame encoder (phone side)
//!
//! Builds frames in the same layout [`Command::decode`] accepts. An
//! ADD_NOTIFICATION frame is sized to fit one ATT write: the app name is
//! capped first, then the title, and the body takes whatever is left.
//!
//! [`Command::decode`]: crate::command::Command::decode

use heapless::{String, Vec};

use crate::command::{
    ADD_NOTIFICATION_HEADER_LEN, CMD_ADD_NOTIFICATION, CMD_CLEAR_ALL, CMD_TIME_SYNC,
    TIME_SYNC_LEN,
};
use crate::kind::NotificationKind;
use crate::reassembly::REASSEMBLY_BUFFER_SIZE;
use crate::text::floor_char_boundary;

/// Largest frame the device can reassemble
pub const MAX_FRAME_SIZE: usize = REASSEMBLY_BUFFER_SIZE;

/// App name cap on the wire (bytes)
pub const APP_NAME_BUDGET: usize = 20;

/// Title cap on the wire (bytes)
pub const TITLE_BUDGET: usize = 40;

/// Largest value a one-byte length field can describe
pub const MAX_FIELD_LEN: usize = u8::MAX as usize;

/// An encoded frame
pub type Frame = Vec<u8, MAX_FRAME_SIZE>;

/// Encoder errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// The budget cannot even hold the fixed header
    BudgetTooSmall { budget: usize },
    /// Frame grew past `MAX_FRAME_SIZE`
    FrameOverflow,
}

/// A captured notification waiting to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NotificationRecord {
    /// Category
    pub kind: NotificationKind,
    /// Capture time (Unix seconds)
    pub timestamp: u32,
    /// Source application label
    pub app_name: String<MAX_FIELD_LEN>,
    /// Sender / title
    pub title: String<MAX_FIELD_LEN>,
    /// Body text
    pub text: String<MAX_FIELD_LEN>,
}

impl NotificationRecord {
    /// Build a record, clamping each field to what a length byte can carry
    pub fn new(kind: NotificationKind, app_name: &str, title: &str, text: &str, timestamp: u32) -> Self {
        Self {
            kind,
            timestamp,
            app_name: bounded(app_name),
            title: bounded(title),
            text: bounded(text),
        }
    }

    /// Encode as ADD_NOTIFICATION, never exceeding `budget` bytes
    ///
    /// Truncation is deterministic for a given budget and always lands on
    /// a UTF-8 character boundary.
    pub fn encode(&self, budget: usize) -> Result<Frame, EncodeError> {
        let budget = budget.min(MAX_FRAME_SIZE);
        if budget < ADD_NOTIFICATION_HEADER_LEN {
            return Err(EncodeError::BudgetTooSmall { budget });
        }

        let mut avail = budget - ADD_NOTIFICATION_HEADER_LEN;
        let app = floor_char_boundary(&self.app_name, APP_NAME_BUDGET.min(avail));
        avail -= app.len();
        let title = floor_char_boundary(&self.title, TITLE_BUDGET.min(avail));
        avail -= title.len();
        let text = floor_char_boundary(&self.text, MAX_FIELD_LEN.min(avail));

        if text.len() < self.text.len() {
            debug!("Body truncated {} -> {} bytes", self.text.len(), text.len());
        }

        let mut frame = Frame::new();
        frame
            .extend_from_slice(&[
                CMD_ADD_NOTIFICATION,
                self.kind.to_byte(),
                app.len() as u8,
                title.len() as u8,
                text.len() as u8,
            ])
            .map_err(|_| EncodeError::FrameOverflow)?;
        frame
            .extend_from_slice(&self.timestamp.to_le_bytes())
            .map_err(|_| EncodeError::FrameOverflow)?;
        for field in [app, title, text] {
            frame
                .extend_from_slice(field.as_bytes())
                .map_err(|_| EncodeError::FrameOverflow)?;
        }

        Ok(frame)
    }
}

/// Encode a CLEAR_ALL frame
pub fn encode_clear_all() -> Frame {
    let mut frame = Frame::new();
    let _ = frame.push(CMD_CLEAR_ALL);
    frame
}

/// Encode a TIME_SYNC frame
pub fn encode_time_sync(timestamp: u32) -> Frame {
    let mut frame = Frame::new();
    let _ = frame.push(CMD_TIME_SYNC);
    let _ = frame.extend_from_slice(&timestamp.to_le_bytes());
    debug_assert_eq!(frame.len(), TIME_SYNC_LEN);
    frame
}

fn bounded(s: &str) -> String<MAX_FIELD_LEN> {
    let mut out = String::new();
    let _ = out.push_str(floor_char_boundary(s, MAX_FIELD_LEN));
    out
}
