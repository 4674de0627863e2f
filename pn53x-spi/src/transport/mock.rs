// pn53x-spi/src/transport/mock.rs

//! In-memory PN53x on an SPI bus.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;

use crate::bus::{DeviceSelector, SpiBus};
use crate::constants::{
    ACK_FRAME, FRAME_OVERHEAD, MAX_PAYLOAD_LEN, SPI_DATAREAD, SPI_DATAWRITE, SPI_DUMMY, SPI_STATREAD,
    SPI_STATUS_READY, TFI_CHIP_TO_HOST,
};
use crate::protocol::Frame;
use crate::ready::IrqFlag;
use crate::{Error, Result};

/// Wire form of a chip -> host information frame carrying `payload`.
pub fn chip_frame(payload: &[u8]) -> Vec<u8> {
    assert!(payload.len() <= MAX_PAYLOAD_LEN, "payload does not fit a frame");
    Frame::Data {
        tfi: TFI_CHIP_TO_HOST,
        payload: payload.to_vec(),
    }
    .to_bytes()
    .unwrap_or_default()
}

#[derive(Debug, Default)]
struct MockChip {
    open: bool,
    selected: bool,
    transactions: usize,
    marker: Option<u8>,
    incoming: Vec<u8>,
    read_cursor: usize,
    written: Vec<Vec<u8>>,
    sent_bytes: Vec<u8>,
    /// Frames the chip will hand out on DATAREAD, front first
    ready: VecDeque<Vec<u8>>,
    /// Replies queued behind the ACK of each command frame
    responses: VecDeque<Vec<u8>>,
    manual_ack: bool,
    silent: bool,
    ignored_commands: usize,
    fail_after: Option<usize>,
    fail_once: bool,
    irq: Option<Arc<IrqFlag>>,
}

impl MockChip {
    fn has_data(&self) -> bool {
        !self.silent && !self.ready.is_empty()
    }

    fn raise_irq(&self) {
        if self.has_data() {
            if let Some(irq) = &self.irq {
                irq.signal();
            }
        }
    }

    fn on_frame_written(&mut self, frame: Vec<u8>) {
        let is_abort = frame == ACK_FRAME;
        self.written.push(frame.clone());
        if is_abort {
            self.ready.clear();
            return;
        }
        // garbled or truncated frames are dropped without an ACK
        let complete = frame
            .get(3)
            .is_some_and(|&len| frame.len() == usize::from(len) + FRAME_OVERHEAD - 1);
        if !complete {
            return;
        }
        if self.ignored_commands > 0 {
            self.ignored_commands -= 1;
            return;
        }
        if !self.manual_ack {
            self.ready.push_back(ACK_FRAME.to_vec());
            if let Some(reply) = self.responses.pop_front() {
                self.ready.push_back(reply);
            }
        }
    }
}

/// Simulated PN53x behind an SPI bus, for unit and integration tests.
///
/// Cloning yields another handle on the same chip, so a test can keep one
/// handle for assertions after moving the other into a device. Every
/// command frame is answered with an ACK and then the next queued
/// response; readiness is reported through the status byte and, when
/// attached, an [`IrqFlag`].
#[derive(Debug, Clone, Default)]
pub struct MockBus {
    chip: Rc<RefCell<MockChip>>,
}

impl MockBus {
    /// Chip present, polled through the status byte.
    pub fn new() -> Self {
        Self::default()
    }

    /// Chip wired to an interrupt latch.
    pub fn with_irq(irq: Arc<IrqFlag>) -> Self {
        let bus = Self::new();
        bus.chip.borrow_mut().irq = Some(irq);
        bus
    }

    /// A bus with nothing attached: every write vanishes, nothing is ever
    /// ready.
    pub fn absent() -> Self {
        let bus = Self::new();
        bus.set_silent(true);
        bus
    }

    /// Queue the reply to a future command as a data frame.
    pub fn push_response(&self, payload: &[u8]) {
        self.push_raw_response(&chip_frame(payload));
    }

    /// Queue raw reply bytes to a future command.
    pub fn push_raw_response(&self, bytes: &[u8]) {
        self.chip.borrow_mut().responses.push_back(bytes.to_vec());
    }

    /// Make bytes readable right now, ahead of anything generated later.
    pub fn push_ready(&self, bytes: &[u8]) {
        let mut chip = self.chip.borrow_mut();
        chip.ready.push_back(bytes.to_vec());
        chip.raise_irq();
    }

    /// When off, command frames get no ACK and no response; the test
    /// feeds everything through [`MockBus::push_ready`].
    pub fn set_auto_ack(&self, on: bool) {
        self.chip.borrow_mut().manual_ack = !on;
    }

    /// A silent chip never reports data, as if it had hung.
    pub fn set_silent(&self, silent: bool) {
        self.chip.borrow_mut().silent = silent;
    }

    /// The next `n` command frames are dropped without ACK.
    pub fn ignore_commands(&self, n: usize) {
        self.chip.borrow_mut().ignored_commands = n;
    }

    /// Fail every byte transfer after `n` more succeed.
    pub fn fail_after(&self, n: usize) {
        let mut chip = self.chip.borrow_mut();
        chip.fail_after = Some(n);
        chip.fail_once = false;
    }

    /// Fail a single byte transfer after `n` more succeed, then recover.
    pub fn glitch_after(&self, n: usize) {
        let mut chip = self.chip.borrow_mut();
        chip.fail_after = Some(n);
        chip.fail_once = true;
    }

    /// Frames written with DATAWRITE, oldest first.
    pub fn written(&self) -> Vec<Vec<u8>> {
        self.chip.borrow().written.clone()
    }

    /// Every byte shifted out, markers included.
    pub fn sent_bytes(&self) -> Vec<u8> {
        self.chip.borrow().sent_bytes.clone()
    }

    /// Whether the bus is claimed.
    pub fn is_open(&self) -> bool {
        self.chip.borrow().open
    }

    /// Whether chip-select is asserted right now.
    pub fn is_selected(&self) -> bool {
        self.chip.borrow().selected
    }

    /// Number of `begin_transaction` calls that selected the chip.
    pub fn transactions(&self) -> usize {
        self.chip.borrow().transactions
    }

    /// Bytes still waiting to be read.
    pub fn pending(&self) -> usize {
        self.chip.borrow().ready.iter().map(Vec::len).sum()
    }
}

impl SpiBus for MockBus {
    fn open(&mut self, name: &str) -> Result<()> {
        let mut chip = self.chip.borrow_mut();
        if chip.open {
            return Err(Error::Bus(format!("{} is already open", name)));
        }
        chip.open = true;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let mut chip = self.chip.borrow_mut();
        if !chip.open {
            return Err(Error::NotOpen);
        }
        chip.open = false;
        Ok(())
    }

    fn begin_transaction(&mut self, selector: &mut dyn DeviceSelector) -> Result<()> {
        let mut chip = self.chip.borrow_mut();
        if !chip.open {
            return Err(Error::NotOpen);
        }
        assert!(!chip.selected, "nested transaction");
        selector.select()?;
        chip.selected = true;
        chip.transactions += 1;
        chip.marker = None;
        chip.incoming.clear();
        chip.read_cursor = 0;
        Ok(())
    }

    fn end_transaction(&mut self, selector: &mut dyn DeviceSelector) -> Result<()> {
        let mut chip = self.chip.borrow_mut();
        chip.selected = false;
        match chip.marker.take() {
            Some(SPI_DATAWRITE) => {
                let frame = std::mem::take(&mut chip.incoming);
                chip.on_frame_written(frame);
            }
            Some(SPI_DATAREAD) if chip.read_cursor > 0 => {
                // leftovers of a partially read frame are gone
                chip.ready.pop_front();
            }
            _ => {}
        }
        chip.raise_irq();
        drop(chip);
        selector.deselect()
    }

    fn transceive_byte(&mut self, tx: u8) -> Result<u8> {
        let mut chip = self.chip.borrow_mut();
        assert!(chip.open && chip.selected, "byte I/O outside a transaction");
        match chip.fail_after {
            Some(0) => {
                if chip.fail_once {
                    chip.fail_after = None;
                }
                return Err(Error::Bus("injected transfer failure".into()));
            }
            Some(left) => chip.fail_after = Some(left - 1),
            None => {}
        }
        chip.sent_bytes.push(tx);

        let Some(marker) = chip.marker else {
            chip.marker = Some(tx);
            return Ok(0x00);
        };
        let rx = match marker {
            SPI_DATAWRITE => {
                chip.incoming.push(tx);
                0x00
            }
            SPI_STATREAD => {
                if chip.has_data() {
                    SPI_STATUS_READY
                } else {
                    0x00
                }
            }
            SPI_DATAREAD if !chip.silent => {
                let cursor = chip.read_cursor;
                let next = chip.ready.front().and_then(|f| f.get(cursor).copied());
                match next {
                    Some(b) => {
                        chip.read_cursor += 1;
                        b
                    }
                    None => SPI_DUMMY,
                }
            }
            _ => SPI_DUMMY,
        };
        Ok(rx)
    }
}
