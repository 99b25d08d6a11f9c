//! Link state machine

/// Handle of an active BLE connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnHandle(pub u16);

/// Connection indicator shown on the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectionStatus {
    /// Encrypted link to the phone
    Connected,
    /// Linked but signal is poor
    WeakSignal,
    /// Link up, security not yet established
    Connecting,
    /// No link
    Disconnected,
}

/// Link states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// Radio idle
    #[default]
    Disconnected,
    /// Waiting for the phone to connect
    Advertising,
    /// Connected, link not encrypted yet
    Connected(ConnHandle),
    /// Connected with security level 2 or higher
    Paired(ConnHandle),
}

/// Events reported by the BLE stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    AdvertisingStarted,
    Connected(ConnHandle),
    ConnectionFailed,
    /// Encryption reached at least security level 2
    SecurityEstablished,
    Disconnected,
}

impl LinkState {
    pub fn transition(self, event: LinkEvent) -> Self {
        use LinkEvent::*;

        match (self, event) {
            (LinkState::Disconnected, AdvertisingStarted) => LinkState::Advertising,

            // A connection ends advertising
            (LinkState::Disconnected | LinkState::Advertising, Connected(conn)) => {
                LinkState::Connected(conn)
            }
            (LinkState::Advertising, ConnectionFailed) => LinkState::Disconnected,

            (LinkState::Connected(conn), SecurityEstablished) => LinkState::Paired(conn),

            (LinkState::Connected(_) | LinkState::Paired(_), Disconnected) => {
                LinkState::Disconnected
            }

            // Default: stay in current state
            _ => self,
        }
    }

    /// Active connection, if any
    pub fn conn(&self) -> Option<ConnHandle> {
        match self {
            LinkState::Connected(conn) | LinkState::Paired(conn) => Some(*conn),
            LinkState::Disconnected | LinkState::Advertising => None,
        }
    }

    /// Phone commands are applied only while a phone is linked
    pub fn accepts_commands(&self) -> bool {
        self.conn().is_some()
    }

    /// Indicator for this state, ignoring signal quality
    pub fn status(&self) -> ConnectionStatus {
        match self {
            LinkState::Disconnected | LinkState::Advertising => ConnectionStatus::Disconnected,
            LinkState::Connected(_) => ConnectionStatus::Connecting,
            LinkState::Paired(_) => ConnectionStatus::Connected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONN: ConnHandle = ConnHandle(7);

    #[test]
    fn test_connect_then_secure() {
        let state = LinkState::default()
            .transition(LinkEvent::AdvertisingStarted)
            .transition(LinkEvent::Connected(CONN));
        assert_eq!(state, LinkState::Connected(CONN));
        assert_eq!(state.status(), ConnectionStatus::Connecting);

        let state = state.transition(LinkEvent::SecurityEstablished);
        assert_eq!(state, LinkState::Paired(CONN));
        assert_eq!(state.status(), ConnectionStatus::Connected);
    }

    #[test]
    fn test_disconnect_from_linked_states() {
        for state in [LinkState::Connected(CONN), LinkState::Paired(CONN)] {
            let next = state.transition(LinkEvent::Disconnected);
            assert_eq!(next, LinkState::Disconnected);
            assert_eq!(next.status(), ConnectionStatus::Disconnected);
        }
    }

    #[test]
    fn test_commands_only_when_linked() {
        assert!(!LinkState::Disconnected.accepts_commands());
        assert!(!LinkState::Advertising.accepts_commands());
        assert!(LinkState::Connected(CONN).accepts_commands());
        assert!(LinkState::Paired(CONN).accepts_commands());
    }

    #[test]
    fn test_failed_connection_stops_advertising() {
        let next = LinkState::Advertising.transition(LinkEvent::ConnectionFailed);
        assert_eq!(next, LinkState::Disconnected);
    }

    #[test]
    fn test_security_needs_connection() {
        let next = LinkState::Advertising.transition(LinkEvent::SecurityEstablished);
        assert_eq!(next, LinkState::Advertising);
    }
}
