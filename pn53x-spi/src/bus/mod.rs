// pn53x-spi/src/bus/mod.rs

//! Downward contract: a byte-shifting SPI bus and a chip-select capability.
//!
//! The bus does not know which device it talks to. Each transaction is
//! handed a [`DeviceSelector`] that asserts and releases the chip-select
//! line of one device, so several devices can share a bus.

#[cfg(feature = "embedded-hal")]
pub mod hal;

use crate::constants::SPI_DUMMY;
use crate::protocol::ByteSource;
use crate::Result;

#[cfg(feature = "embedded-hal")]
pub use hal::{HalBus, PinSelector};

/// Chip-select capability bound to one device.
pub trait DeviceSelector {
    /// Assert chip-select.
    fn select(&mut self) -> Result<()>;
    /// Release chip-select.
    fn deselect(&mut self) -> Result<()>;
}

/// Selector built from a pair of closures, e.g. two register writes.
pub struct FnSelector<S, D> {
    select: S,
    deselect: D,
}

impl<S, D> FnSelector<S, D>
where
    S: FnMut(),
    D: FnMut(),
{
    /// Selector calling `select` and `deselect` in turn.
    pub fn new(select: S, deselect: D) -> Self {
        Self { select, deselect }
    }
}

impl<S, D> DeviceSelector for FnSelector<S, D>
where
    S: FnMut(),
    D: FnMut(),
{
    fn select(&mut self) -> Result<()> {
        (self.select)();
        Ok(())
    }

    fn deselect(&mut self) -> Result<()> {
        (self.deselect)();
        Ok(())
    }
}

/// Selector for buses that drive chip-select themselves.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSelect;

impl DeviceSelector for NoSelect {
    fn select(&mut self) -> Result<()> {
        Ok(())
    }

    fn deselect(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Byte-oriented duplex bus.
///
/// Byte-level operations are only valid between `begin_transaction` and
/// `end_transaction` on an open bus. Calling them otherwise is a
/// programming error; implementations may panic. A failing
/// `begin_transaction` must leave the device deselected.
pub trait SpiBus {
    /// Claim the bus. Fails if it is already open.
    fn open(&mut self, name: &str) -> Result<()>;

    /// Release the bus.
    fn close(&mut self) -> Result<()>;

    /// Assert the device's chip-select for one exchange.
    fn begin_transaction(&mut self, selector: &mut dyn DeviceSelector) -> Result<()>;

    /// Release the chip-select asserted by `begin_transaction`.
    fn end_transaction(&mut self, selector: &mut dyn DeviceSelector) -> Result<()>;

    /// Shift one byte out and return the byte shifted in.
    fn transceive_byte(&mut self, tx: u8) -> Result<u8>;

    /// Shift out `data`, discarding what comes back.
    fn send_bytes(&mut self, data: &[u8], _timeout_ms: u64) -> Result<usize> {
        for &b in data {
            self.transceive_byte(b)?;
        }
        Ok(data.len())
    }

    /// Fill `buf` by clocking out dummy bytes.
    fn receive_bytes(&mut self, buf: &mut [u8], _timeout_ms: u64) -> Result<usize> {
        for slot in buf.iter_mut() {
            *slot = self.transceive_byte(SPI_DUMMY)?;
        }
        Ok(buf.len())
    }
}

/// One selected exchange on the bus. Dropping the guard without calling
/// [`Transaction::end`] still deselects the device.
pub struct Transaction<'a> {
    bus: &'a mut dyn SpiBus,
    selector: &'a mut dyn DeviceSelector,
    active: bool,
}

impl<'a> Transaction<'a> {
    /// Select the device and open the guard.
    pub fn begin(bus: &'a mut dyn SpiBus, selector: &'a mut dyn DeviceSelector) -> Result<Self> {
        bus.begin_transaction(selector)?;
        Ok(Self {
            bus,
            selector,
            active: true,
        })
    }

    /// One full-duplex byte.
    pub fn transceive(&mut self, tx: u8) -> Result<u8> {
        self.bus.transceive_byte(tx)
    }

    /// Shift out `data`.
    pub fn write(&mut self, data: &[u8], timeout_ms: u64) -> Result<()> {
        self.bus.send_bytes(data, timeout_ms)?;
        Ok(())
    }

    /// Fill `buf` from the bus.
    pub fn read(&mut self, buf: &mut [u8], timeout_ms: u64) -> Result<()> {
        self.bus.receive_bytes(buf, timeout_ms)?;
        Ok(())
    }

    /// Deselect the device, reporting failures the drop path would swallow.
    pub fn end(mut self) -> Result<()> {
        self.active = false;
        self.bus.end_transaction(self.selector)
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if self.active {
            self.active = false;
            if let Err(e) = self.bus.end_transaction(self.selector) {
                log::warn!("deselect after aborted transaction failed: {}", e);
            }
        }
    }
}

/// Each byte the scanner pulls is a live bus read.
impl ByteSource for Transaction<'_> {
    fn next_byte(&mut self) -> Result<u8> {
        self.transceive(SPI_DUMMY)
    }
}
