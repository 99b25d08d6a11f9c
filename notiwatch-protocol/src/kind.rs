//! Notification category carried in byte 1 of ADD_NOTIFICATION

/// Category of a notification as classified by the phone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NotificationKind {
    /// Incoming or missed call
    Phone,
    /// Chat / SMS message
    Message,
    /// E-mail
    Email,
    /// Social network activity
    Social,
    /// Calendar reminder
    Calendar,
    /// Anything else
    #[default]
    Other,
}

// Wire format values
const KIND_PHONE: u8 = 0;
const KIND_MESSAGE: u8 = 1;
const KIND_EMAIL: u8 = 2;
const KIND_SOCIAL: u8 = 3;
const KIND_CALENDAR: u8 = 4;
const KIND_OTHER: u8 = 5;

impl NotificationKind {
    /// Parse a kind from its wire byte
    ///
    /// The phone is free to send categories this firmware does not know;
    /// those are folded into `Other` rather than rejecting the packet.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            KIND_PHONE => NotificationKind::Phone,
            KIND_MESSAGE => NotificationKind::Message,
            KIND_EMAIL => NotificationKind::Email,
            KIND_SOCIAL => NotificationKind::Social,
            KIND_CALENDAR => NotificationKind::Calendar,
            _ => NotificationKind::Other,
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            NotificationKind::Phone => KIND_PHONE,
            NotificationKind::Message => KIND_MESSAGE,
            NotificationKind::Email => KIND_EMAIL,
            NotificationKind::Social => KIND_SOCIAL,
            NotificationKind::Calendar => KIND_CALENDAR,
            NotificationKind::Other => KIND_OTHER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_kinds() {
        assert_eq!(NotificationKind::from_byte(0), NotificationKind::Phone);
        assert_eq!(NotificationKind::from_byte(2), NotificationKind::Email);
        assert_eq!(NotificationKind::from_byte(4), NotificationKind::Calendar);
        assert_eq!(NotificationKind::Social.to_byte(), 3);
    }

    #[test]
    fn test_unknown_kind_is_other() {
        assert_eq!(NotificationKind::from_byte(0x42), NotificationKind::Other);
        assert_eq!(NotificationKind::from_byte(0xFF), NotificationKind::Other);
    }
}
