// pn53x-spi/src/device/handle.rs

//! The type-state device handle and its send/receive sequences.

use std::marker::PhantomData;

use crate::bus::{DeviceSelector, SpiBus, Transaction};
use crate::config::{DriverConfig, ReadyMode};
use crate::constants::{
    ACK_FRAME, FRAME_OVERHEAD, SPI_DATAREAD, SPI_DATAWRITE, SPI_DUMMY, SPI_STATREAD,
    SPI_STATUS_READY,
};
use crate::protocol::command::response_code;
use crate::protocol::{FirmwareVersion, Frame, FrameKind, Malformed, codec, parser, scan_frame};
use crate::ready::{ReadySignal, wait_until};
use crate::transport::Transport;
use crate::utils::HexBytes;
use crate::{Error, Result};

/// Handle before the firmware handshake.
pub struct Uninitialized;
/// Handle that passed the firmware handshake.
pub struct Initialized;

/// PN53x reached over SPI.
///
/// The handle owns the bus, the chip-select capability and the readiness
/// signal, so no other component can select the chip while an exchange is
/// in flight. Only an `Initialized` handle, one that passed the firmware
/// handshake, exposes `send`/`receive`.
pub struct Device<State = Uninitialized> {
    pub(super) bus: Box<dyn SpiBus>,
    pub(super) selector: Box<dyn DeviceSelector>,
    pub(super) ready: Option<Box<dyn ReadySignal>>,
    pub(super) config: DriverConfig,
    pub(super) firmware: Option<FirmwareVersion>,
    last_command: Option<u8>,
    last_error: Option<Error>,
    _state: PhantomData<State>,
}

impl Device<Uninitialized> {
    /// Assemble a handle from its parts. See also
    /// [`DeviceBuilder`](crate::device::builder::DeviceBuilder).
    pub fn new(
        bus: Box<dyn SpiBus>,
        selector: Box<dyn DeviceSelector>,
        ready: Option<Box<dyn ReadySignal>>,
        config: DriverConfig,
    ) -> Self {
        Self {
            bus,
            selector,
            ready,
            config,
            firmware: None,
            last_command: None,
            last_error: None,
            _state: PhantomData,
        }
    }
}

impl<S> Device<S> {
    /// Active configuration.
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub(super) fn into_state<T>(self) -> Device<T> {
        Device {
            bus: self.bus,
            selector: self.selector,
            ready: self.ready,
            config: self.config,
            firmware: self.firmware,
            last_command: self.last_command,
            last_error: self.last_error,
            _state: PhantomData,
        }
    }

    fn transaction(&mut self) -> Result<Transaction<'_>> {
        Transaction::begin(&mut *self.bus, &mut *self.selector)
    }

    fn arm(&self) {
        if let Some(signal) = &self.ready {
            signal.arm();
        }
    }

    /// Block until the chip reports data. Irq mode without a signal
    /// installed falls back to status polling.
    fn wait_ready(&mut self, timeout_ms: u64) -> Result<()> {
        let interval = self.config.poll_interval_ms;
        match (&self.ready, self.config.ready_mode) {
            (Some(signal), ReadyMode::Irq) => wait_until(|| Ok(signal.take()), timeout_ms, interval),
            _ => {
                let bus = &mut *self.bus;
                let selector = &mut *self.selector;
                wait_until(|| read_status(bus, selector), timeout_ms, interval)
            }
        }
    }

    /// Frame `payload`, write it and consume the chip's ACK.
    pub(super) fn send_frame(&mut self, payload: &[u8], timeout_ms: u64) -> Result<()> {
        let frame = Frame::command(payload)?;
        log::debug!("send: {} byte command", payload.len());
        log::trace!("> {}", HexBytes(&frame));

        self.arm();
        let mut tx = self.transaction()?;
        tx.transceive(SPI_DATAWRITE)?;
        tx.write(&frame, timeout_ms)?;
        tx.end()?;

        self.wait_ready(timeout_ms)?;

        // the ACK read is what lets the chip raise the line for the response
        self.arm();
        let mut window = [0u8; ACK_FRAME.len()];
        let mut tx = self.transaction()?;
        tx.transceive(SPI_DATAREAD)?;
        tx.read(&mut window, timeout_ms)?;
        tx.end()?;

        log::trace!("< {}", HexBytes(&window));
        codec::decode_ack(&window)?;
        log::debug!("send: ACK received");
        self.last_command = payload.first().copied();
        Ok(())
    }

    /// Wait for the response frame and copy its payload into `buf`.
    pub(super) fn receive_frame(&mut self, buf: &mut [u8], timeout_ms: u64) -> Result<usize> {
        self.wait_ready(timeout_ms)?;

        let max_bytes = self
            .config
            .max_frame_len
            .min(buf.len().saturating_add(FRAME_OVERHEAD));
        let mut tx = self.transaction()?;
        tx.transceive(SPI_DATAREAD)?;
        let (frame, consumed) = scan_frame(&mut tx, max_bytes)?;
        if frame.kind() == FrameKind::ApplicationError {
            // DCS and postamble of the error frame
            let mut tail = [0u8; 2];
            tx.read(&mut tail, timeout_ms)?;
        }
        tx.end()?;
        log::debug!("receive: {} after {} bytes", frame.kind(), consumed);

        let payload = match frame {
            Frame::Malformed(Malformed::InsufficientBuffer { .. }) => {
                return Err(Error::InsufficientBuffer {
                    capacity: buf.len(),
                });
            }
            other => other.into_payload()?,
        };
        log::trace!("< payload {}", HexBytes(&payload));

        // an empty data frame carries no response code to check
        if self.config.verify_response_code && !payload.is_empty() {
            if let Some(cmd) = self.last_command {
                parser::expect_response_code(&payload, response_code(cmd))?;
            }
        }
        let capacity = buf.len();
        let out = buf
            .get_mut(..payload.len())
            .ok_or(Error::InsufficientBuffer { capacity })?;
        out.copy_from_slice(&payload);
        Ok(payload.len())
    }

    /// Write the fixed ACK frame; the chip drops whatever it was doing.
    pub(super) fn write_abort(&mut self, timeout_ms: u64) -> Result<()> {
        log::debug!("abort");
        let mut tx = self.transaction()?;
        tx.transceive(SPI_DATAWRITE)?;
        tx.write(&ACK_FRAME, timeout_ms)?;
        tx.end()
    }

    fn record<T>(&mut self, op: &str, res: Result<T>) -> Result<T> {
        if let Err(e) = &res {
            log::warn!("{} failed: {}", op, e);
            self.last_error = Some(e.clone());
        }
        res
    }
}

fn read_status(bus: &mut dyn SpiBus, selector: &mut dyn DeviceSelector) -> Result<bool> {
    let mut tx = Transaction::begin(bus, selector)?;
    tx.transceive(SPI_STATREAD)?;
    let status = tx.transceive(SPI_DUMMY)?;
    tx.end()?;
    Ok(status & SPI_STATUS_READY != 0)
}

impl Device<Initialized> {
    /// Send one command payload (opcode first) and consume the ACK.
    pub fn send(&mut self, payload: &[u8], timeout_ms: u64) -> Result<()> {
        let res = self.send_frame(payload, timeout_ms);
        self.record("send", res)
    }

    /// Receive the response to the last command into `buf`.
    pub fn receive(&mut self, buf: &mut [u8], timeout_ms: u64) -> Result<usize> {
        let res = self.receive_frame(buf, timeout_ms);
        self.record("receive", res)
    }

    /// Write an ACK frame so the chip drops the command in progress.
    pub fn abort(&mut self) -> Result<()> {
        let timeout_ms = self.config.handshake_timeout_ms;
        let res = self.write_abort(timeout_ms);
        self.record("abort", res)
    }

    /// Firmware reported during the handshake.
    pub fn firmware_version(&self) -> Option<FirmwareVersion> {
        self.firmware
    }

    /// Most recent failure of `send`, `receive` or `abort`.
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    /// Release the bus.
    pub fn close(mut self) -> Result<()> {
        log::debug!("close");
        self.bus.close()
    }
}

impl Transport for Device<Initialized> {
    fn send(&mut self, payload: &[u8], timeout_ms: u64) -> Result<()> {
        Device::send(self, payload, timeout_ms)
    }

    fn receive(&mut self, buf: &mut [u8], timeout_ms: u64) -> Result<usize> {
        Device::receive(self, buf, timeout_ms)
    }

    fn abort(&mut self) -> Result<()> {
        Device::abort(self)
    }
}
