//! Device composition root
//!
//! [`Device`] owns the notification store, the reassembly buffer, link and
//! pairing state, and the board collaborators. Every entry point (GATT
//! write, BLE stack callback, touch gesture, timer tick) is a method on it,
//! so all state changes happen in one place and one execution context.
//! Use [`SharedDevice`](crate::shared::SharedDevice) when callbacks arrive
//! from another context.

use heapless::String;
use notiwatch_protocol::{Command, PacketError, Reassembler, ReassemblyError};

use crate::config::{ConfigError, DeviceConfig, MAX_NOTIFICATIONS};
use crate::gesture::{Action, Gesture};
use crate::link::{ConnHandle, ConnectionStatus, LinkEvent, LinkState};
use crate::pairing::{PairingChallenge, PairingError, PairingEvent, PairingState, Passkey};
use crate::store::{DeleteError, Notification, NotificationStore};
use crate::time::{format_hhmm, format_relative, RELATIVE_LEN};
use crate::traits::{Clock, ClockError, DisplaySink, ErrorObserver, NoopObserver, SecureLayer};

/// Store sized for the device
pub type Store = NotificationStore<MAX_NOTIFICATIONS>;

/// Effect of one decoded phone command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dispatch {
    /// Notification stored at `index`
    Added { index: usize },
    Cleared,
    TimeSynced,
    /// Recognized command with no effect on the device
    Ignored { command: u8 },
    /// Dropped because no phone is linked
    Unreachable { command: u8 },
    /// TIME_SYNC decoded but the clock refused it
    ClockFailed(ClockError),
}

/// Result of one GATT write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WriteOutcome {
    /// Fragment buffered, waiting for the offset-0 write
    Staged,
    /// Frame completed and applied
    Dispatched(Dispatch),
    /// Frame completed but failed to decode; nothing was applied
    Malformed(PacketError),
}

pub struct Device<D, C, S, O = NoopObserver> {
    config: DeviceConfig,
    store: Store,
    reassembler: Reassembler,
    link: LinkState,
    weak_signal: bool,
    pairing: PairingState,
    display: D,
    clock: C,
    secure: S,
    observer: O,
    refresh_ticks: u32,
    clock_ticks: u32,
}

impl<D, C, S, O> Device<D, C, S, O>
where
    D: DisplaySink,
    C: Clock,
    S: SecureLayer,
    O: ErrorObserver,
{
    /// Create the device and draw the initial screen state
    pub fn new(
        config: DeviceConfig,
        display: D,
        clock: C,
        secure: S,
        observer: O,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut device = Self {
            config,
            store: NotificationStore::new(config.delete_timeout_ticks),
            reassembler: Reassembler::new(),
            link: LinkState::default(),
            weak_signal: false,
            pairing: PairingState::default(),
            display,
            clock,
            secure,
            observer,
            refresh_ticks: 0,
            clock_ticks: 0,
        };

        device.push_status();
        device.push_time();
        device.display.notifications_changed();
        Ok(device)
    }

    // --- Accessors ---

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn link(&self) -> LinkState {
        self.link
    }

    pub fn pairing(&self) -> PairingState {
        self.pairing
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn secure(&self) -> &S {
        &self.secure
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Lend the display out together with the store and the current time
    ///
    /// Pull-based renderers redraw from inside `f`.
    pub fn redraw<R>(&mut self, f: impl FnOnce(&mut D, &Store, Option<u32>) -> R) -> R {
        let now = self.clock.now();
        f(&mut self.display, &self.store, now)
    }

    /// Current wall-clock time, if synced
    pub fn now(&self) -> Option<u32> {
        self.clock.now()
    }

    /// Connection indicator currently shown
    pub fn status(&self) -> ConnectionStatus {
        if self.weak_signal && self.link.conn().is_some() {
            ConnectionStatus::WeakSignal
        } else {
            self.link.status()
        }
    }

    /// "5m ago" style age of `notification`
    pub fn relative_time(&self, notification: &Notification) -> String<RELATIVE_LEN> {
        format_relative(self.clock.now(), notification.timestamp)
    }

    // --- Transport ---

    /// Handle a write to the notification characteristic
    ///
    /// Fragments at non-zero offsets are buffered; the write at offset 0
    /// completes the frame, which is then decoded and applied. A frame with
    /// unwritten holes is reported as [`PacketError::InvalidLengths`]. An
    /// `Err` should be returned to the peer as an invalid-offset ATT error.
    pub fn on_write(&mut self, offset: u16, data: &[u8]) -> Result<WriteOutcome, ReassemblyError> {
        let decoded = match self.reassembler.write(offset, data) {
            Ok(Some(frame)) => Command::decode(frame),
            Ok(None) => return Ok(WriteOutcome::Staged),
            Err(ReassemblyError::Gap { .. }) => Err(PacketError::InvalidLengths),
            Err(err) => {
                self.observer.buffer_overflow(err);
                return Err(err);
            }
        };

        Ok(match decoded {
            Ok(command) => WriteOutcome::Dispatched(self.dispatch(command)),
            Err(err) => {
                self.report_malformed(err);
                WriteOutcome::Malformed(err)
            }
        })
    }

    /// Decode and apply one complete frame
    pub fn handle_frame(&mut self, frame: &[u8]) -> Result<Dispatch, PacketError> {
        match Command::decode(frame) {
            Ok(command) => Ok(self.dispatch(command)),
            Err(err) => {
                self.report_malformed(err);
                Err(err)
            }
        }
    }

    /// Apply a decoded command
    pub fn dispatch(&mut self, command: Command) -> Dispatch {
        let code = command.code();

        if !self.link.accepts_commands() {
            warn!("command {:#x} dropped, no phone linked", code);
            return Dispatch::Unreachable { command: code };
        }

        match command {
            Command::AddNotification(add) => {
                let index = self.store.insert(add.into());
                info!("notification added at {}, {} unread", index, self.store.unread_count());
                // Only an encrypted link can write the characteristic
                self.weak_signal = false;
                self.apply_link(LinkEvent::SecurityEstablished);
                self.push_status();
                self.display.notifications_changed();
                Dispatch::Added { index }
            }
            Command::ClearAll => {
                self.clear_all();
                Dispatch::Cleared
            }
            Command::TimeSync { timestamp } => match self.clock.set_time(timestamp) {
                Ok(()) => {
                    info!("clock synced to {}", timestamp);
                    self.push_time();
                    self.clock_ticks = 0;
                    // Relative ages depend on the clock
                    self.display.notifications_changed();
                    Dispatch::TimeSynced
                }
                Err(err) => {
                    error!("clock rejected time sync: {}", err);
                    Dispatch::ClockFailed(err)
                }
            },
            Command::RemoveNotification | Command::Action => {
                debug!("command {:#x} has no device action", code);
                Dispatch::Ignored { command: code }
            }
        }
    }

    fn report_malformed(&mut self, err: PacketError) {
        warn!("malformed packet dropped: {}", err);
        self.observer.malformed_packet(err);
    }

    // --- Link callbacks ---

    pub fn on_advertising(&mut self) {
        debug!("advertising");
        self.apply_link(LinkEvent::AdvertisingStarted);
    }

    pub fn on_connected(&mut self, conn: ConnHandle) {
        info!("connected, handle {}", conn.0);
        self.apply_link(LinkEvent::Connected(conn));
    }

    pub fn on_connection_failed(&mut self, reason: u8) {
        warn!("connection failed: {}", reason);
        self.apply_link(LinkEvent::ConnectionFailed);
    }

    /// Encryption level changed; `level_ok` is true at security level 2+
    pub fn on_security_changed(&mut self, level_ok: bool) {
        if level_ok {
            self.apply_link(LinkEvent::SecurityEstablished);
        } else {
            warn!("security level below 2");
        }
    }

    /// Link quality report; ignored while no phone is connected
    pub fn on_signal_quality(&mut self, weak: bool) {
        if self.link.conn().is_none() {
            debug!("signal report without a connection");
            return;
        }
        if self.weak_signal != weak {
            self.weak_signal = weak;
            self.push_status();
        }
    }

    /// The phone disconnected
    ///
    /// Link, signal and pairing state are reset and any partial frame is
    /// discarded. Stored notifications are kept. The stack is expected to
    /// restart advertising and report it through [`Self::on_advertising`].
    pub fn on_disconnected(&mut self, reason: u8) {
        info!("disconnected, reason {:#x}", reason);
        self.weak_signal = false;
        self.apply_link(LinkEvent::Disconnected);
        self.push_status();
        self.reassembler.reset();
        self.abort_pairing();
        self.observer.connection_dropped(reason);
    }

    fn apply_link(&mut self, event: LinkEvent) {
        let next = self.link.transition(event);
        if next == self.link {
            return;
        }
        debug!("link {} -> {}", self.link, next);
        self.link = next;
        if next.conn().is_none() {
            self.weak_signal = false;
        }
        self.push_status();
    }

    // --- Pairing ---

    /// The secure layer asks to display a passkey
    pub fn on_passkey_display(&mut self, conn: ConnHandle, passkey: u32) -> Result<(), PairingError> {
        self.request_pairing(conn, passkey)
    }

    /// The secure layer asks the user to confirm a passkey
    pub fn on_passkey_confirm(&mut self, conn: ConnHandle, passkey: u32) -> Result<(), PairingError> {
        self.request_pairing(conn, passkey)
    }

    fn request_pairing(&mut self, conn: ConnHandle, passkey: u32) -> Result<(), PairingError> {
        let passkey = Passkey::new(passkey)?;
        self.pairing = self
            .pairing
            .transition(PairingEvent::Requested(PairingChallenge { conn, passkey }));
        info!("pairing requested, handle {}", conn.0);
        self.display.show_pairing_code(&passkey.digits());
        Ok(())
    }

    /// The user accepted the shown code
    pub fn confirm_pairing(&mut self) -> Result<(), PairingError> {
        let challenge = *self.pairing.challenge().ok_or(PairingError::NoChallenge)?;
        self.secure.accept_passkey(challenge.conn);
        self.pairing = self.pairing.transition(PairingEvent::UserAccepted);
        self.display.hide_pairing();
        Ok(())
    }

    /// The user rejected the shown code
    pub fn reject_pairing(&mut self) -> Result<(), PairingError> {
        let challenge = *self.pairing.challenge().ok_or(PairingError::NoChallenge)?;
        self.secure.cancel_auth(challenge.conn);
        self.pairing = self.pairing.transition(PairingEvent::UserRejected);
        self.display.hide_pairing();
        Ok(())
    }

    pub fn on_pairing_complete(&mut self, bonded: bool) {
        info!("pairing complete, bonded: {}", bonded);
        if self.pairing.is_in_progress() {
            self.pairing = self.pairing.transition(PairingEvent::Completed);
            self.display.hide_pairing();
        }
        self.apply_link(LinkEvent::SecurityEstablished);
    }

    pub fn on_pairing_failed(&mut self, reason: u8) {
        warn!("pairing failed: {}", reason);
        self.abort_pairing();
    }

    /// The secure layer cancelled authentication
    pub fn on_auth_cancel(&mut self, conn: ConnHandle) {
        debug!("auth cancelled, handle {}", conn.0);
        self.abort_pairing();
    }

    fn abort_pairing(&mut self) {
        if self.pairing.is_in_progress() {
            self.pairing = self.pairing.transition(PairingEvent::Aborted);
            self.display.hide_pairing();
        }
    }

    pub fn is_pairing_in_progress(&self) -> bool {
        self.pairing.is_in_progress()
    }

    /// Code of the handshake in progress, zero-padded
    ///
    /// Still available after the user confirms, until the stack reports
    /// completion or failure.
    pub fn pairing_code(&self) -> Option<String<6>> {
        self.pairing.passkey().map(|passkey| passkey.digits())
    }

    // --- Store operations ---

    pub fn next(&mut self) {
        self.store.next();
        self.display.notifications_changed();
    }

    pub fn prev(&mut self) {
        self.store.prev();
        self.display.notifications_changed();
    }

    pub fn mark_current_read(&mut self) {
        if self.store.mark_current_read() {
            self.display.notifications_changed();
        }
    }

    pub fn begin_delete(&mut self, index: usize) -> Result<(), DeleteError> {
        self.store.begin_delete(index)?;
        self.display.notifications_changed();
        Ok(())
    }

    pub fn cancel_delete(&mut self) -> bool {
        let cancelled = self.store.cancel_delete();
        if cancelled {
            self.display.notifications_changed();
        }
        cancelled
    }

    pub fn clear_all(&mut self) {
        self.store.clear();
        info!("notifications cleared");
        self.display.notifications_changed();
    }

    /// Apply a touch gesture; returns the action taken
    pub fn on_gesture(&mut self, gesture: Gesture) -> Action {
        let action = gesture.action(self.store.pending_delete().is_some());
        match action {
            Action::Next => {
                self.store.mark_current_read();
                self.next();
            }
            Action::Prev => {
                self.store.mark_current_read();
                self.prev();
            }
            Action::Delete => {
                let current = self.store.current_index();
                if let Err(err) = self.begin_delete(current) {
                    debug!("delete gesture ignored: {}", err);
                    return Action::None;
                }
            }
            Action::Undo => {
                self.cancel_delete();
            }
            Action::MarkRead => self.mark_current_read(),
            Action::None => {}
        }
        action
    }

    // --- Timer ---

    /// Advance by one tick period
    ///
    /// Drives the undo window of a pending delete, the periodic redraw of
    /// relative timestamps and the top-bar clock.
    pub fn tick(&mut self) {
        if self.store.tick().is_some() {
            self.display.notifications_changed();
        }

        self.refresh_ticks += 1;
        if self.refresh_ticks >= self.config.relative_refresh_ticks {
            self.refresh_ticks = 0;
            if !self.store.is_empty() {
                trace!("relative time refresh");
                self.display.notifications_changed();
            }
        }

        self.clock_ticks += 1;
        if self.clock_ticks >= self.config.clock_refresh_ticks {
            self.clock_ticks = 0;
            self.push_time();
        }
    }

    // --- Display ---

    fn push_status(&mut self) {
        let status = self.status();
        self.display.set_connection_status(status);
    }

    fn push_time(&mut self) {
        let time = format_hhmm(self.clock.now());
        self.display.set_time(&time);
    }
}
