//! Bounded notification list with a cursor and undoable delete

use heapless::Vec;

use super::deletion::{DeleteError, DeletionTick, PendingDeletion};
use super::notification::Notification;

/// Ordered notification list, oldest first
///
/// When full, adding evicts the oldest entry. The cursor (`current`) always
/// points at a valid entry while the list is non-empty and is 0 otherwise.
#[derive(Debug, Clone)]
pub struct NotificationStore<const N: usize> {
    entries: Vec<Notification, N>,
    current: usize,
    deletion: PendingDeletion,
}

impl<const N: usize> NotificationStore<N> {
    pub const fn new(delete_timeout_ticks: u16) -> Self {
        Self {
            entries: Vec::new(),
            current: 0,
            deletion: PendingDeletion::new(delete_timeout_ticks),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Cursor position (0 when empty)
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Entry under the cursor
    pub fn current(&self) -> Option<&Notification> {
        self.entries.get(self.current)
    }

    pub fn get(&self, index: usize) -> Option<&Notification> {
        self.entries.get(index)
    }

    /// Entries oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|n| !n.read).count()
    }

    /// Index of the entry inside its undo window
    pub fn pending_delete(&self) -> Option<usize> {
        self.deletion.target()
    }

    /// Append an unread notification and move the cursor onto it
    pub fn add(&mut self, app_name: &str, sender: &str, content: &str, timestamp: u32) -> usize {
        self.insert(Notification::new(app_name, sender, content, timestamp))
    }

    /// Append `notification`, evicting the oldest entry when full
    ///
    /// Returns the index of the new entry, which becomes current.
    pub fn insert(&mut self, mut notification: Notification) -> usize {
        if self.entries.is_full() && !self.entries.is_empty() {
            self.evict_oldest();
        }

        notification.read = false;
        if self.entries.push(notification).is_err() {
            // Zero-capacity store
            return 0;
        }

        self.current = self.entries.len() - 1;
        debug!("stored notification {} of {}", self.current, N);
        self.current
    }

    fn evict_oldest(&mut self) {
        self.entries.remove(0);
        if self.current > 0 {
            self.current -= 1;
        }
        if self.deletion.on_removed(0) {
            warn!("pending delete target evicted");
        }
        trace!("evicted oldest notification");
    }

    /// Move the cursor to the next (newer) entry, wrapping
    pub fn next(&mut self) {
        if !self.entries.is_empty() {
            self.current = (self.current + 1) % self.entries.len();
        }
    }

    /// Move the cursor to the previous (older) entry, wrapping
    pub fn prev(&mut self) {
        let len = self.entries.len();
        if len > 0 {
            self.current = (self.current + len - 1) % len;
        }
    }

    /// Mark the current entry read; returns `true` if it was unread
    pub fn mark_current_read(&mut self) -> bool {
        match self.entries.get_mut(self.current) {
            Some(n) if !n.read => {
                n.read = true;
                true
            }
            _ => false,
        }
    }

    /// Stage `index` for deletion
    pub fn begin_delete(&mut self, index: usize) -> Result<(), DeleteError> {
        let len = self.entries.len();
        if len == 0 {
            return Err(DeleteError::Empty);
        }
        if index >= len {
            return Err(DeleteError::OutOfRange { index, len });
        }
        self.deletion.begin(index)?;
        debug!("delete staged for {}", index);
        Ok(())
    }

    /// Stage the entry under the cursor for deletion
    pub fn begin_delete_current(&mut self) -> Result<(), DeleteError> {
        self.begin_delete(self.current)
    }

    /// Undo the staged delete; returns `true` if one was pending
    pub fn cancel_delete(&mut self) -> bool {
        let cancelled = self.deletion.cancel().is_some();
        if cancelled {
            debug!("delete undone");
        }
        cancelled
    }

    /// Remove the staged entry now
    pub fn commit_delete(&mut self) -> Option<Notification> {
        let index = self.deletion.take()?;
        if index >= self.entries.len() {
            return None;
        }

        let removed = self.entries.remove(index);
        if self.current > index {
            self.current -= 1;
        }
        if self.current >= self.entries.len() {
            self.current = self.entries.len().saturating_sub(1);
        }
        debug!("delete committed for {}", index);
        Some(removed)
    }

    /// Advance the undo window; commits and returns the removed entry once
    /// the window has elapsed
    pub fn tick(&mut self) -> Option<Notification> {
        match self.deletion.tick() {
            DeletionTick::Expired { .. } => self.commit_delete(),
            DeletionTick::Idle | DeletionTick::Waiting { .. } => None,
        }
    }

    /// Remove every entry and drop any pending delete
    pub fn clear(&mut self) {
        self.entries.clear();
        self.current = 0;
        self.deletion.cancel();
    }
}
