//! Outbox behind a blocking mutex
//!
//! The capture path submits from whatever context delivers phone
//! notifications; a periodic task polls. Both go through one lock, which
//! also guards the sent counter.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::outbox::{Outbound, Outbox, Submitted};
use crate::transport::{Transport, TransportError};

pub struct SharedOutbox<M: RawMutex, const N: usize> {
    inner: Mutex<M, RefCell<Outbox<N>>>,
}

impl<M: RawMutex, const N: usize> SharedOutbox<M, N> {
    pub fn new(outbox: Outbox<N>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(outbox)),
        }
    }

    /// Run `f` with exclusive access to the outbox
    pub fn lock<R>(&self, f: impl FnOnce(&mut Outbox<N>) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    pub fn submit<T: Transport>(&self, message: Outbound, transport: &mut T) -> Submitted {
        self.lock(|outbox| outbox.submit(message, transport))
    }

    pub fn poll<T: Transport>(&self, transport: &mut T) {
        self.lock(|outbox| outbox.poll(transport))
    }

    pub fn on_write_complete(&self, result: Result<(), TransportError>) {
        self.lock(|outbox| outbox.on_write_complete(result))
    }

    pub fn total_sent(&self) -> u32 {
        self.lock(|outbox| outbox.total_sent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RelayConfig;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    struct CountingTransport(usize);

    impl Transport for CountingTransport {
        fn write(&mut self, _frame: &[u8]) -> Result<(), TransportError> {
            self.0 += 1;
            Ok(())
        }
    }

    #[test]
    fn test_submit_and_poll_share_counter() {
        let outbox: Outbox<8> = Outbox::new(RelayConfig::default()).unwrap();
        let shared: SharedOutbox<NoopRawMutex, 8> = SharedOutbox::new(outbox);
        let mut transport = CountingTransport(0);

        shared.lock(|o| o.set_ready(23));
        assert_eq!(shared.submit(Outbound::ClearAll, &mut transport), Submitted::Sent);
        assert_eq!(shared.submit(Outbound::TimeSync(3), &mut transport), Submitted::Queued);

        shared.on_write_complete(Ok(()));
        shared.poll(&mut transport);
        shared.on_write_complete(Ok(()));

        assert_eq!(transport.0, 2);
        assert_eq!(shared.total_sent(), 2);
    }
}
