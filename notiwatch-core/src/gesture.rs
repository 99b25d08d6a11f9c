//! Touch gesture mapping

/// Gestures reported by the touch controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    SwipeLeft,
    SwipeRight,
    SwipeUp,
    SwipeDown,
    Tap,
    DoubleTap,
}

/// Store operation a gesture resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Mark the current notification read, then move to the next one
    Next,
    /// Mark the current notification read, then move to the previous one
    Prev,
    /// Stage the current notification for deletion
    Delete,
    /// Cancel the pending deletion
    Undo,
    MarkRead,
    None,
}

impl Gesture {
    /// Resolve the gesture given whether a deletion is pending
    ///
    /// While a deletion is pending only a tap does anything (undo).
    pub fn action(self, delete_pending: bool) -> Action {
        if delete_pending {
            return match self {
                Gesture::Tap => Action::Undo,
                _ => Action::None,
            };
        }

        match self {
            Gesture::SwipeLeft => Action::Next,
            Gesture::SwipeRight => Action::Prev,
            Gesture::SwipeUp => Action::Delete,
            Gesture::DoubleTap => Action::MarkRead,
            Gesture::SwipeDown | Gesture::Tap => Action::None,
        }
    }
}
