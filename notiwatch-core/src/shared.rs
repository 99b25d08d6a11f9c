//! Device behind a blocking mutex
//!
//! BLE stacks usually deliver writes and connection events from their own
//! interrupt or task context while the main loop ticks and handles touch
//! input. [`SharedDevice`] serializes all of them through one lock.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use notiwatch_protocol::ReassemblyError;

use crate::device::{Device, WriteOutcome};
use crate::gesture::{Action, Gesture};
use crate::traits::{Clock, DisplaySink, ErrorObserver, SecureLayer};

pub struct SharedDevice<M: RawMutex, D, C, S, O> {
    inner: Mutex<M, RefCell<Device<D, C, S, O>>>,
}

impl<M, D, C, S, O> SharedDevice<M, D, C, S, O>
where
    M: RawMutex,
    D: DisplaySink,
    C: Clock,
    S: SecureLayer,
    O: ErrorObserver,
{
    pub fn new(device: Device<D, C, S, O>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(device)),
        }
    }

    /// Run `f` with exclusive access to the device
    ///
    /// Must not be called again from inside `f`.
    pub fn lock<R>(&self, f: impl FnOnce(&mut Device<D, C, S, O>) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    pub fn on_write(&self, offset: u16, data: &[u8]) -> Result<WriteOutcome, ReassemblyError> {
        self.lock(|device| device.on_write(offset, data))
    }

    pub fn on_gesture(&self, gesture: Gesture) -> Action {
        self.lock(|device| device.on_gesture(gesture))
    }

    pub fn tick(&self) {
        self.lock(|device| device.tick())
    }

    pub fn into_inner(self) -> Device<D, C, S, O> {
        self.inner.into_inner().into_inner()
    }
}
