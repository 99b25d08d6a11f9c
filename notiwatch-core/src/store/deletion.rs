//! Delayed-delete state machine
//!
//! A delete is first staged; it is committed once `timeout_ticks` ticks
//! have elapsed unless it is cancelled before then. At most one delete can
//! be staged at a time. Commit and cancel both consume the staged target,
//! so a delete resolves exactly once.

/// Errors starting a delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeleteError {
    /// The store holds no notifications
    Empty,
    /// Index past the end of the store
    OutOfRange { index: usize, len: usize },
    /// Another delete is still inside its undo window
    AlreadyPending,
}

/// Result of advancing the undo window by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeletionTick {
    /// Nothing staged
    Idle,
    /// Still inside the undo window
    Waiting { remaining: u16 },
    /// Window elapsed; the target must be removed now
    Expired { index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Stage {
    Idle,
    Pending { index: usize, elapsed: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PendingDeletion {
    stage: Stage,
    timeout_ticks: u16,
}

impl PendingDeletion {
    pub const fn new(timeout_ticks: u16) -> Self {
        Self {
            stage: Stage::Idle,
            timeout_ticks,
        }
    }

    /// Index of the staged target
    pub fn target(&self) -> Option<usize> {
        match self.stage {
            Stage::Pending { index, .. } => Some(index),
            Stage::Idle => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.target().is_some()
    }

    pub fn begin(&mut self, index: usize) -> Result<(), DeleteError> {
        if self.is_pending() {
            return Err(DeleteError::AlreadyPending);
        }
        self.stage = Stage::Pending { index, elapsed: 0 };
        Ok(())
    }

    /// Drop the staged delete, returning its target
    pub fn cancel(&mut self) -> Option<usize> {
        let target = self.target();
        self.stage = Stage::Idle;
        target
    }

    /// Take the staged target for commit, leaving nothing staged
    pub fn take(&mut self) -> Option<usize> {
        self.cancel()
    }

    pub fn tick(&mut self) -> DeletionTick {
        match &mut self.stage {
            Stage::Idle => DeletionTick::Idle,
            Stage::Pending { index, elapsed } => {
                *elapsed = elapsed.saturating_add(1);
                if *elapsed >= self.timeout_ticks {
                    DeletionTick::Expired { index: *index }
                } else {
                    DeletionTick::Waiting {
                        remaining: self.timeout_ticks - *elapsed,
                    }
                }
            }
        }
    }

    /// Keep the staged index pointing at the same entry after `removed` was
    /// taken out of the list
    ///
    /// Returns `true` if the staged target itself was removed, in which
    /// case nothing is staged any more.
    pub fn on_removed(&mut self, removed: usize) -> bool {
        let Stage::Pending { index, .. } = &mut self.stage else {
            return false;
        };
        if *index == removed {
            self.stage = Stage::Idle;
            return true;
        }
        if *index > removed {
            *index -= 1;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_then_expire() {
        let mut d = PendingDeletion::new(3);
        d.begin(2).unwrap();
        assert_eq!(d.tick(), DeletionTick::Waiting { remaining: 2 });
        assert_eq!(d.tick(), DeletionTick::Waiting { remaining: 1 });
        assert_eq!(d.tick(), DeletionTick::Expired { index: 2 });
        // Expiry alone does not clear the stage; the owner takes it
        assert_eq!(d.take(), Some(2));
        assert_eq!(d.tick(), DeletionTick::Idle);
    }

    #[test]
    fn test_second_begin_rejected() {
        let mut d = PendingDeletion::new(20);
        d.begin(0).unwrap();
        assert_eq!(d.begin(1), Err(DeleteError::AlreadyPending));
        assert_eq!(d.target(), Some(0));
    }

    #[test]
    fn test_cancel_resolves_once() {
        let mut d = PendingDeletion::new(20);
        d.begin(4).unwrap();
        assert_eq!(d.cancel(), Some(4));
        assert_eq!(d.cancel(), None);
        assert_eq!(d.take(), None);
    }

    #[test]
    fn test_on_removed_shifts_or_drops() {
        let mut d = PendingDeletion::new(20);
        d.begin(3).unwrap();
        assert!(!d.on_removed(0));
        assert_eq!(d.target(), Some(2));
        assert!(!d.on_removed(5));
        assert_eq!(d.target(), Some(2));
        assert!(d.on_removed(2));
        assert!(!d.is_pending());
    }
}
