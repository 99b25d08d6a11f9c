//! Outbound message queue
//!
//! At most one frame is in flight. Everything else waits in a FIFO until
//! the link is ready, the previous write was confirmed, and the drain
//! spacing has elapsed. A frame whose confirmation does not arrive within
//! `retry_delay_ticks` is written again, up to `max_retry_attempts` times.

use heapless::Deque;
use notiwatch_protocol::encoder::{encode_clear_all, encode_time_sync};
use notiwatch_protocol::{EncodeError, Frame, NotificationRecord};

use crate::config::{ConfigError, RelayConfig, MIN_MTU, OUTBOX_CAPACITY};
use crate::transport::{Transport, TransportError};

/// Message for the device
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outbound {
    Notification(NotificationRecord),
    ClearAll,
    TimeSync(u32),
}

impl Outbound {
    /// Encode for a frame budget; notifications are truncated to fit
    pub fn encode(&self, budget: usize) -> Result<Frame, EncodeError> {
        match self {
            Outbound::Notification(record) => record.encode(budget),
            Outbound::ClearAll => Ok(encode_clear_all()),
            Outbound::TimeSync(timestamp) => Ok(encode_time_sync(*timestamp)),
        }
    }
}

/// What `submit` did with a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Submitted {
    /// Written immediately
    Sent,
    /// Waiting in the queue
    Queued,
    /// Queued after dropping the oldest waiting message
    QueuedDroppedOldest,
    /// Could not be encoded for the current MTU; counted as failed
    Failed,
}

/// What `start` did with a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Start {
    Written,
    Requeued,
    Dropped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Readiness {
    NotReady,
    Ready { mtu: u16 },
}

#[derive(Debug, Clone)]
struct InFlight {
    message: Outbound,
    retries: u8,
    elapsed: u16,
}

pub struct Outbox<const N: usize = OUTBOX_CAPACITY> {
    config: RelayConfig,
    readiness: Readiness,
    queue: Deque<Outbound, N>,
    in_flight: Option<InFlight>,
    cooldown: u16,
    total_sent: u32,
    dropped: u32,
    failed: u32,
}

impl<const N: usize> Outbox<N> {
    pub fn new(config: RelayConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            readiness: Readiness::NotReady,
            queue: Deque::new(),
            in_flight: None,
            cooldown: 0,
            total_sent: 0,
            dropped: 0,
            failed: 0,
        })
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.readiness, Readiness::Ready { .. })
    }

    /// Negotiated MTU, or the configured default while not ready
    pub fn mtu(&self) -> u16 {
        match self.readiness {
            Readiness::Ready { mtu } => mtu,
            Readiness::NotReady => self.config.mtu,
        }
    }

    /// Current frame budget
    pub fn frame_budget(&self) -> usize {
        self.config.frame_budget(self.mtu())
    }

    /// Messages waiting, not counting the one in flight
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn has_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Frames confirmed by the transport
    pub fn total_sent(&self) -> u32 {
        self.total_sent
    }

    /// Messages dropped because the queue was full
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Messages given up after exhausting their retries
    pub fn failed(&self) -> u32 {
        self.failed
    }

    /// The link is up and notifications can be written
    pub fn set_ready(&mut self, mtu: u16) {
        let mtu = mtu.max(MIN_MTU);
        info!("outbox ready, mtu {}", mtu);
        self.readiness = Readiness::Ready { mtu };
    }

    /// The link went down; an unconfirmed frame goes back to the head of
    /// the queue
    pub fn set_not_ready(&mut self) {
        if !self.is_ready() {
            return;
        }
        info!("outbox not ready, {} queued", self.queue.len());
        self.readiness = Readiness::NotReady;
        self.cooldown = 0;
        if let Some(flight) = self.in_flight.take() {
            self.requeue_front(flight.message);
        }
    }

    /// Send `message` now if possible, otherwise queue it
    pub fn submit<T: Transport>(&mut self, message: Outbound, transport: &mut T) -> Submitted {
        let idle = self.is_ready() && self.in_flight.is_none() && self.cooldown == 0;
        if idle && self.queue.is_empty() {
            return match self.start(message, 0, transport) {
                Start::Written => Submitted::Sent,
                Start::Requeued => Submitted::Queued,
                Start::Dropped => Submitted::Failed,
            };
        }
        self.enqueue(message)
    }

    pub fn notify<T: Transport>(&mut self, record: NotificationRecord, transport: &mut T) -> Submitted {
        self.submit(Outbound::Notification(record), transport)
    }

    pub fn clear_all<T: Transport>(&mut self, transport: &mut T) -> Submitted {
        self.submit(Outbound::ClearAll, transport)
    }

    pub fn time_sync<T: Transport>(&mut self, timestamp: u32, transport: &mut T) -> Submitted {
        self.submit(Outbound::TimeSync(timestamp), transport)
    }

    /// Advance by one tick: retry an unconfirmed frame or send the next
    /// queued one
    pub fn poll<T: Transport>(&mut self, transport: &mut T) {
        if !self.is_ready() {
            return;
        }

        if let Some(mut flight) = self.in_flight.take() {
            flight.elapsed = flight.elapsed.saturating_add(1);
            if flight.elapsed < self.config.retry_delay_ticks {
                self.in_flight = Some(flight);
            } else if flight.retries >= self.config.max_retry_attempts {
                warn!("giving up after {} retries", flight.retries);
                self.failed += 1;
                self.cooldown = self.config.drain_spacing_ticks;
            } else {
                debug!("no write confirmation, retry {}", flight.retries + 1);
                self.start(flight.message, flight.retries + 1, transport);
            }
            return;
        }

        if self.cooldown > 0 {
            self.cooldown -= 1;
            if self.cooldown > 0 {
                return;
            }
        }

        if let Some(message) = self.queue.pop_front() {
            trace!("draining, {} left", self.queue.len());
            self.start(message, 0, transport);
        }
    }

    /// Result of the write started last
    pub fn on_write_complete(&mut self, result: Result<(), TransportError>) {
        match result {
            Ok(()) => {
                if self.in_flight.take().is_some() {
                    self.total_sent += 1;
                    self.cooldown = self.config.drain_spacing_ticks;
                    trace!("write confirmed, {} sent", self.total_sent);
                } else {
                    debug!("stale write confirmation");
                }
            }
            Err(TransportError::NotConnected) => self.set_not_ready(),
            Err(err) => {
                warn!("write failed: {}", err);
                // Resend after a full retry delay
                if let Some(flight) = self.in_flight.as_mut() {
                    flight.elapsed = 0;
                }
            }
        }
    }

    fn start<T: Transport>(&mut self, message: Outbound, retries: u8, transport: &mut T) -> Start {
        let frame = match message.encode(self.frame_budget()) {
            Ok(frame) => frame,
            Err(err) => {
                error!("cannot encode message: {}", err);
                self.failed += 1;
                return Start::Dropped;
            }
        };

        match transport.write(&frame) {
            Ok(()) => {
                debug!("wrote {} byte frame", frame.len());
                self.in_flight = Some(InFlight {
                    message,
                    retries,
                    elapsed: 0,
                });
                Start::Written
            }
            Err(TransportError::Busy) => self.requeue_front(message),
            Err(TransportError::NotConnected) => {
                self.readiness = Readiness::NotReady;
                self.requeue_front(message)
            }
            Err(TransportError::Rejected) => {
                // Handled by the retry timer like a missing confirmation
                self.in_flight = Some(InFlight {
                    message,
                    retries,
                    elapsed: 0,
                });
                Start::Written
            }
        }
    }

    fn enqueue(&mut self, message: Outbound) -> Submitted {
        let mut submitted = Submitted::Queued;
        if self.queue.is_full() {
            if self.queue.pop_front().is_some() {
                self.dropped += 1;
                warn!("outbox full, oldest message dropped");
            }
            submitted = Submitted::QueuedDroppedOldest;
        }
        if self.queue.push_back(message).is_err() {
            // Zero-capacity queue
            self.dropped += 1;
        }
        submitted
    }

    fn requeue_front(&mut self, message: Outbound) -> Start {
        // The message being returned is older than anything queued
        if self.queue.push_front(message).is_err() {
            self.dropped += 1;
            warn!("outbox full, unsent message dropped");
            return Start::Dropped;
        }
        Start::Requeued
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notiwatch_protocol::{Command, NotificationKind};
    use std::vec::Vec;

    #[derive(Default)]
    struct MockTransport {
        writes: Vec<Vec<u8>>,
        next_error: Option<TransportError>,
    }

    impl Transport for MockTransport {
        fn write(&mut self, frame: &[u8]) -> Result<(), TransportError> {
            if let Some(err) = self.next_error.take() {
                return Err(err);
            }
            self.writes.push(frame.to_vec());
            Ok(())
        }
    }

    impl MockTransport {
        fn commands(&self) -> Vec<Command> {
            self.writes
                .iter()
                .map(|w| Command::decode(w).unwrap())
                .collect()
        }
    }

    fn record(text: &str) -> NotificationRecord {
        NotificationRecord::new(NotificationKind::Message, "Signal", "Ana", text, 100)
    }

    fn outbox() -> Outbox<4> {
        Outbox::new(RelayConfig::default()).unwrap()
    }

    #[test]
    fn test_queued_until_ready() {
        let mut outbox = outbox();
        let mut link = MockTransport::default();

        assert_eq!(outbox.notify(record("one"), &mut link), Submitted::Queued);
        assert_eq!(outbox.time_sync(5, &mut link), Submitted::Queued);
        outbox.poll(&mut link);
        assert!(link.writes.is_empty());

        outbox.set_ready(185);
        outbox.poll(&mut link);
        assert_eq!(link.writes.len(), 1);
        assert!(matches!(link.commands()[0], Command::AddNotification(_)));
    }

    #[test]
    fn test_sent_immediately_when_idle() {
        let mut outbox = outbox();
        let mut link = MockTransport::default();
        outbox.set_ready(23);

        assert_eq!(outbox.clear_all(&mut link), Submitted::Sent);
        assert_eq!(link.commands(), [Command::ClearAll]);
        // Next message waits for the confirmation
        assert_eq!(outbox.time_sync(9, &mut link), Submitted::Queued);
    }

    #[test]
    fn test_drain_in_order_with_spacing() {
        let config = RelayConfig {
            drain_spacing_ticks: 3,
            ..RelayConfig::default()
        };
        let mut outbox: Outbox<4> = Outbox::new(config).unwrap();
        let mut link = MockTransport::default();
        outbox.notify(record("a"), &mut link);
        outbox.clear_all(&mut link);
        outbox.time_sync(77, &mut link);
        outbox.set_ready(100);

        outbox.poll(&mut link);
        outbox.on_write_complete(Ok(()));
        outbox.poll(&mut link);
        outbox.poll(&mut link);
        assert_eq!(link.writes.len(), 1);
        outbox.poll(&mut link);
        assert_eq!(link.writes.len(), 2);

        outbox.on_write_complete(Ok(()));
        for _ in 0..3 {
            outbox.poll(&mut link);
        }
        outbox.on_write_complete(Ok(()));

        let commands = link.commands();
        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[0], Command::AddNotification(_)));
        assert_eq!(commands[1], Command::ClearAll);
        assert_eq!(commands[2], Command::TimeSync { timestamp: 77 });
        assert_eq!(outbox.total_sent(), 3);
        assert_eq!(outbox.queued(), 0);
    }

    #[test]
    fn test_frames_fit_mtu() {
        let mut outbox = outbox();
        let mut link = MockTransport::default();
        outbox.set_ready(23);
        let long = "x".repeat(200);
        outbox.notify(record(&long), &mut link);
        assert_eq!(link.writes[0].len(), 20);
    }

    #[test]
    fn test_full_queue_drops_oldest() {
        let mut outbox = outbox();
        let mut link = MockTransport::default();
        for ts in 0..4 {
            assert_eq!(outbox.time_sync(ts, &mut link), Submitted::Queued);
        }
        assert_eq!(outbox.time_sync(4, &mut link), Submitted::QueuedDroppedOldest);
        assert_eq!(outbox.dropped(), 1);
        assert_eq!(outbox.queued(), 4);

        outbox.set_ready(23);
        outbox.poll(&mut link);
        assert_eq!(link.commands(), [Command::TimeSync { timestamp: 1 }]);
    }

    #[test]
    fn test_unconfirmed_write_is_retried() {
        let mut outbox = outbox();
        let mut link = MockTransport::default();
        outbox.set_ready(23);
        outbox.clear_all(&mut link);

        for _ in 0..49 {
            outbox.poll(&mut link);
        }
        assert_eq!(link.writes.len(), 1);
        outbox.poll(&mut link);
        assert_eq!(link.writes.len(), 2);

        outbox.on_write_complete(Ok(()));
        assert_eq!(outbox.total_sent(), 1);
        assert!(!outbox.has_in_flight());
    }

    #[test]
    fn test_gives_up_after_max_retries() {
        let mut outbox = outbox();
        let mut link = MockTransport::default();
        outbox.set_ready(23);
        outbox.clear_all(&mut link);

        for _ in 0..(50 * 4) {
            outbox.poll(&mut link);
        }
        // One send plus three retries
        assert_eq!(link.writes.len(), 4);
        assert_eq!(outbox.failed(), 1);
        assert!(!outbox.has_in_flight());
        assert_eq!(outbox.total_sent(), 0);
    }

    #[test]
    fn test_not_ready_requeues_in_flight() {
        let mut outbox = outbox();
        let mut link = MockTransport::default();
        outbox.set_ready(23);
        outbox.time_sync(1, &mut link);
        outbox.time_sync(2, &mut link);

        outbox.set_not_ready();
        assert!(!outbox.has_in_flight());
        assert_eq!(outbox.queued(), 2);

        outbox.set_ready(23);
        outbox.poll(&mut link);
        assert_eq!(
            link.commands(),
            [
                Command::TimeSync { timestamp: 1 },
                Command::TimeSync { timestamp: 1 }
            ]
        );
    }

    #[test]
    fn test_busy_transport_keeps_order() {
        let mut outbox = outbox();
        let mut link = MockTransport {
            next_error: Some(TransportError::Busy),
            ..MockTransport::default()
        };
        outbox.set_ready(23);

        assert_eq!(outbox.time_sync(1, &mut link), Submitted::Queued);
        outbox.time_sync(2, &mut link);
        outbox.poll(&mut link);
        assert_eq!(link.commands(), [Command::TimeSync { timestamp: 1 }]);
    }

    #[test]
    fn test_disconnected_write_stops_drain() {
        let mut outbox = outbox();
        let mut link = MockTransport {
            next_error: Some(TransportError::NotConnected),
            ..MockTransport::default()
        };
        outbox.set_ready(23);

        assert_eq!(outbox.clear_all(&mut link), Submitted::Queued);
        assert!(!outbox.is_ready());
        assert_eq!(outbox.queued(), 1);
    }

    #[test]
    fn test_unencodable_message_reported_as_failed() {
        let mut outbox = outbox();
        let mut link = MockTransport::default();
        outbox.set_ready(23);
        // Leaves a 3 byte budget, below the notification header
        outbox.config.att_overhead = 20;

        assert_eq!(outbox.notify(record("hi"), &mut link), Submitted::Failed);
        assert_eq!(outbox.failed(), 1);
        assert_eq!(outbox.queued(), 0);
        assert!(!outbox.has_in_flight());
        assert!(link.writes.is_empty());
    }

    #[test]
    fn test_invalid_config() {
        let config = RelayConfig {
            retry_delay_ticks: 0,
            ..RelayConfig::default()
        };
        assert!(matches!(
            Outbox::<4>::new(config),
            Err(ConfigError::ZeroRetryDelay)
        ));
    }
}
