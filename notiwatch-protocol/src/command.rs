//! Phone → device commands
//!
//! A command is the first byte of a reassembled frame. Decoding validates
//! every length field before any payload byte is read, and produces an
//! owned [`Command`] so a malformed frame can never partially mutate the
//! caller's state.

use heapless::String;

use crate::kind::NotificationKind;
use crate::text::copy_truncated;

// Command IDs
pub const CMD_ADD_NOTIFICATION: u8 = 0x01;
pub const CMD_REMOVE_NOTIFICATION: u8 = 0x02;
pub const CMD_CLEAR_ALL: u8 = 0x03;
pub const CMD_ACTION: u8 = 0x04;
pub const CMD_TIME_SYNC: u8 = 0x05;

/// CMD + KIND + three length bytes + u32 timestamp
pub const ADD_NOTIFICATION_HEADER_LEN: usize = 9;

/// CMD + u32 timestamp
pub const TIME_SYNC_LEN: usize = 5;

/// Stored app name length in bytes
pub const MAX_APP_NAME_LEN: usize = 31;

/// Stored title/sender length in bytes
pub const MAX_TITLE_LEN: usize = 63;

/// Stored body length in bytes
pub const MAX_TEXT_LEN: usize = 255;

/// Reasons a frame is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketError {
    /// Frame shorter than the fixed header of its command
    TooShort,
    /// Declared string lengths run past the end of the frame
    InvalidLengths,
    /// Command byte is not part of the protocol
    UnknownCommand(u8),
}

/// A decoded ADD_NOTIFICATION payload
///
/// Strings are already clamped to the device's storage limits.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AddNotification {
    /// Category reported by the phone
    pub kind: NotificationKind,
    /// Capture time on the phone (Unix seconds)
    pub timestamp: u32,
    /// Source application
    pub app_name: String<MAX_APP_NAME_LEN>,
    /// Sender or title line
    pub title: String<MAX_TITLE_LEN>,
    /// Body text
    pub text: String<MAX_TEXT_LEN>,
}

/// Commands the phone can send
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Store a new notification
    AddNotification(AddNotification),
    /// Remove a single notification (reserved, no effect)
    RemoveNotification,
    /// Empty the notification store
    ClearAll,
    /// Trigger a notification action (reserved, no effect)
    Action,
    /// Set the device clock
    TimeSync { timestamp: u32 },
}

impl Command {
    /// Decode a complete frame
    pub fn decode(data: &[u8]) -> Result<Self, PacketError> {
        let (&cmd, _) = data.split_first().ok_or(PacketError::TooShort)?;

        match cmd {
            CMD_ADD_NOTIFICATION => decode_add_notification(data).map(Command::AddNotification),
            CMD_TIME_SYNC => {
                if data.len() < TIME_SYNC_LEN {
                    return Err(PacketError::TooShort);
                }
                Ok(Command::TimeSync {
                    timestamp: read_u32_le(&data[1..5]),
                })
            }
            CMD_CLEAR_ALL => Ok(Command::ClearAll),
            CMD_REMOVE_NOTIFICATION => Ok(Command::RemoveNotification),
            CMD_ACTION => Ok(Command::Action),
            other => Err(PacketError::UnknownCommand(other)),
        }
    }

    /// Wire command byte
    pub fn code(&self) -> u8 {
        match self {
            Command::AddNotification(_) => CMD_ADD_NOTIFICATION,
            Command::RemoveNotification => CMD_REMOVE_NOTIFICATION,
            Command::ClearAll => CMD_CLEAR_ALL,
            Command::Action => CMD_ACTION,
            Command::TimeSync { .. } => CMD_TIME_SYNC,
        }
    }
}

fn decode_add_notification(data: &[u8]) -> Result<AddNotification, PacketError> {
    if data.len() < ADD_NOTIFICATION_HEADER_LEN {
        return Err(PacketError::TooShort);
    }

    let kind = NotificationKind::from_byte(data[1]);
    let app_len = data[2] as usize;
    let title_len = data[3] as usize;
    let text_len = data[4] as usize;
    let timestamp = read_u32_le(&data[5..9]);

    if ADD_NOTIFICATION_HEADER_LEN + app_len + title_len + text_len > data.len() {
        return Err(PacketError::InvalidLengths);
    }

    let app_start = ADD_NOTIFICATION_HEADER_LEN;
    let title_start = app_start + app_len;
    let text_start = title_start + title_len;

    Ok(AddNotification {
        kind,
        timestamp,
        app_name: copy_truncated(&data[app_start..title_start]),
        title: copy_truncated(&data[title_start..text_start]),
        text: copy_truncated(&data[text_start..text_start + text_len]),
    })
}

fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_frame(app: &[u8], title: &[u8], text: &[u8], ts: u32) -> heapless::Vec<u8, 1024> {
        let mut frame = heapless::Vec::new();
        let _ = frame.extend_from_slice(&[
            CMD_ADD_NOTIFICATION,
            1,
            app.len() as u8,
            title.len() as u8,
            text.len() as u8,
        ]);
        let _ = frame.extend_from_slice(&ts.to_le_bytes());
        let _ = frame.extend_from_slice(app);
        let _ = frame.extend_from_slice(title);
        let _ = frame.extend_from_slice(text);
        frame
    }

    #[test]
    fn test_decode_add_notification() {
        let frame = add_frame(b"WhatsApp", b"Mom", b"Hi honey!", 1_700_000_000);
        let cmd = Command::decode(&frame).unwrap();

        match cmd {
            Command::AddNotification(n) => {
                assert_eq!(n.kind, NotificationKind::Message);
                assert_eq!(n.timestamp, 1_700_000_000);
                assert_eq!(n.app_name.as_str(), "WhatsApp");
                assert_eq!(n.title.as_str(), "Mom");
                assert_eq!(n.text.as_str(), "Hi honey!");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_add_notification_header_incomplete() {
        assert_eq!(
            Command::decode(&[0x01, 0, 0, 0, 0]),
            Err(PacketError::TooShort)
        );
        assert_eq!(
            Command::decode(&[0x01, 0, 0, 0, 0, 0, 0, 0]),
            Err(PacketError::TooShort)
        );
    }

    #[test]
    fn test_add_notification_empty_strings() {
        let frame = add_frame(b"", b"", b"", 7);
        let cmd = Command::decode(&frame).unwrap();
        assert!(matches!(cmd, Command::AddNotification(ref n) if n.app_name.is_empty() && n.timestamp == 7));
    }

    #[test]
    fn test_add_notification_lengths_past_end() {
        let mut frame = add_frame(b"App", b"Title", b"Body", 0);
        frame.truncate(frame.len() - 1);
        assert_eq!(Command::decode(&frame), Err(PacketError::InvalidLengths));
    }

    #[test]
    fn test_add_notification_trailing_bytes_ignored() {
        let mut frame = add_frame(b"A", b"B", b"C", 1);
        let _ = frame.extend_from_slice(&[0xEE, 0xEE]);
        let cmd = Command::decode(&frame).unwrap();
        assert!(matches!(cmd, Command::AddNotification(ref n) if n.text.as_str() == "C"));
    }

    #[test]
    fn test_app_name_clamped_to_storage() {
        let app = [b'x'; 40];
        let frame = add_frame(&app, b"t", b"body", 0);
        match Command::decode(&frame).unwrap() {
            Command::AddNotification(n) => {
                assert_eq!(n.app_name.len(), MAX_APP_NAME_LEN);
                // Declared length still drives the field offsets
                assert_eq!(n.title.as_str(), "t");
                assert_eq!(n.text.as_str(), "body");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_text_clamped_to_storage() {
        let text = [b'y'; 255];
        let title = [b'z'; 100];
        let frame = add_frame(b"a", &title, &text, 0);
        match Command::decode(&frame).unwrap() {
            Command::AddNotification(n) => {
                assert_eq!(n.title.len(), MAX_TITLE_LEN);
                assert_eq!(n.text.len(), MAX_TEXT_LEN);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_decode_time_sync() {
        let ts: u32 = 0x6543_2101;
        let mut frame = [0u8; 5];
        frame[0] = CMD_TIME_SYNC;
        frame[1..].copy_from_slice(&ts.to_le_bytes());
        assert_eq!(Command::decode(&frame), Ok(Command::TimeSync { timestamp: ts }));
    }

    #[test]
    fn test_time_sync_too_short() {
        assert_eq!(
            Command::decode(&[CMD_TIME_SYNC, 1, 2, 3]),
            Err(PacketError::TooShort)
        );
    }

    #[test]
    fn test_reserved_commands_are_not_malformed() {
        assert_eq!(Command::decode(&[CMD_REMOVE_NOTIFICATION]), Ok(Command::RemoveNotification));
        assert_eq!(Command::decode(&[CMD_ACTION, 9, 9]), Ok(Command::Action));
        assert_eq!(Command::decode(&[CMD_CLEAR_ALL]), Ok(Command::ClearAll));
    }

    #[test]
    fn test_unknown_and_empty() {
        assert_eq!(Command::decode(&[0x7F]), Err(PacketError::UnknownCommand(0x7F)));
        assert_eq!(Command::decode(&[0x00, 1, 2]), Err(PacketError::UnknownCommand(0x00)));
        assert_eq!(Command::decode(&[]), Err(PacketError::TooShort));
    }

    #[test]
    fn test_command_code() {
        assert_eq!(Command::ClearAll.code(), CMD_CLEAR_ALL);
        assert_eq!(Command::TimeSync { timestamp: 0 }.code(), CMD_TIME_SYNC);
    }

    mod props {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn decode_never_panics(data in proptest::collection::vec(any::<u8>(), 0..600)) {
                let _ = Command::decode(&data);
            }

            #[test]
            fn short_add_notification_is_rejected(tail in proptest::collection::vec(any::<u8>(), 0..8)) {
                let mut data = std::vec![CMD_ADD_NOTIFICATION];
                data.extend_from_slice(&tail);
                prop_assert_eq!(Command::decode(&data), Err(PacketError::TooShort));
            }

            #[test]
            fn decoded_strings_fit_storage(data in proptest::collection::vec(any::<u8>(), 9..800)) {
                let mut data = data;
                data[0] = CMD_ADD_NOTIFICATION;
                if let Ok(Command::AddNotification(n)) = Command::decode(&data) {
                    prop_assert!(n.app_name.len() <= MAX_APP_NAME_LEN);
                    prop_assert!(n.title.len() <= MAX_TITLE_LEN);
                    prop_assert!(n.text.len() <= MAX_TEXT_LEN);
                }
            }
        }
    }
}
