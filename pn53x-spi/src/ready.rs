// pn53x-spi/src/ready.rs

//! "Data available" signalling from the chip.
//!
//! The chip pulls its IRQ line low when it has a frame for the host. A
//! platform interrupt handler turns that edge into a single store on an
//! [`IrqFlag`]; the transaction code arms the flag, performs the bus
//! action that will eventually trigger the line, then waits on it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::utils::ms;
use crate::{Error, Result};

/// Poll granularity used when no interval is configured.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1;

/// Capability interface over the readiness latch.
pub trait ReadySignal {
    /// Clear the latch ahead of the action that will raise it.
    fn arm(&self);

    /// Whether the chip has signalled since the last `arm`/`clear`.
    fn is_signaled(&self) -> bool;

    /// Drop a pending signal.
    fn clear(&self);

    /// Atomically observe and consume a pending signal.
    fn take(&self) -> bool {
        let set = self.is_signaled();
        if set {
            self.clear();
        }
        set
    }

    /// Block until the signal is observed or `timeout_ms` elapses.
    fn wait(&self, timeout_ms: u64) -> Result<()> {
        wait_until(|| Ok(self.take()), timeout_ms, DEFAULT_POLL_INTERVAL_MS)
    }
}

/// Poll `probe` every `interval_ms` until it reports `true`.
///
/// The probe runs at least once, and once more after the deadline has
/// passed, so a signal raised just before expiry is still observed. A
/// zero timeout polls exactly once.
pub fn wait_until<F>(mut probe: F, timeout_ms: u64, interval_ms: u64) -> Result<()>
where
    F: FnMut() -> Result<bool>,
{
    let start = Instant::now();
    let deadline = ms(timeout_ms);
    loop {
        if probe()? {
            return Ok(());
        }
        if start.elapsed() >= deadline {
            return Err(Error::Timeout);
        }
        let remaining = deadline.saturating_sub(start.elapsed());
        std::thread::sleep(remaining.min(ms(interval_ms.max(1))));
    }
}

/// Single-word latch written from interrupt context.
#[derive(Debug, Default)]
pub struct IrqFlag {
    raised: AtomicBool,
}

impl IrqFlag {
    /// Lowered latch.
    pub const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
        }
    }

    /// Called by the interrupt handler on the falling edge of the IRQ line.
    pub fn signal(&self) {
        self.raised.store(true, Ordering::Release);
    }
}

impl ReadySignal for IrqFlag {
    fn arm(&self) {
        self.raised.store(false, Ordering::Release);
    }

    fn is_signaled(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }

    fn clear(&self) {
        self.raised.store(false, Ordering::Release);
    }

    // read-then-clear must not lose an edge landing in between
    fn take(&self) -> bool {
        self.raised.swap(false, Ordering::AcqRel)
    }
}

impl<T: ReadySignal + ?Sized> ReadySignal for &T {
    fn arm(&self) {
        (**self).arm()
    }
    fn is_signaled(&self) -> bool {
        (**self).is_signaled()
    }
    fn clear(&self) {
        (**self).clear()
    }
    fn take(&self) -> bool {
        (**self).take()
    }
    fn wait(&self, timeout_ms: u64) -> Result<()> {
        (**self).wait(timeout_ms)
    }
}

impl<T: ReadySignal + ?Sized> ReadySignal for Arc<T> {
    fn arm(&self) {
        (**self).arm()
    }
    fn is_signaled(&self) -> bool {
        (**self).is_signaled()
    }
    fn clear(&self) {
        (**self).clear()
    }
    fn take(&self) -> bool {
        (**self).take()
    }
    fn wait(&self, timeout_ms: u64) -> Result<()> {
        (**self).wait(timeout_ms)
    }
}
