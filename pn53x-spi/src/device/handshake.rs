// pn53x-spi/src/device/handshake.rs

//! Bring-up: claim the bus, abort whatever the chip was doing and probe
//! it with GetFirmwareVersion. This is the only place the driver retries.

use crate::constants::DRIVER_NAME;
use crate::device::handle::{Device, Initialized, Uninitialized};
use crate::protocol::FirmwareVersion;
use crate::protocol::command::get_firmware_version;
use crate::{Error, Result};

/// Room for the firmware reply plus slack for chips that append bytes.
const FIRMWARE_REPLY_CAPACITY: usize = 16;

impl Device<Uninitialized> {
    /// Open the bus and run the firmware handshake.
    ///
    /// Any failure, including a bus that is already open, is reported as
    /// [`Error::DeviceNotFound`]; the cause is kept behind
    /// [`Error::detail`]. The bus is closed again on failure.
    pub fn initialize(mut self) -> Result<Device<Initialized>> {
        self.bus.open(DRIVER_NAME).map_err(Error::not_found)?;

        match self.handshake() {
            Ok(fw) => {
                log::info!("{}: {}", DRIVER_NAME, fw);
                self.firmware = Some(fw);
                Ok(self.into_state())
            }
            Err(e) => {
                log::warn!("{}: handshake failed: {}", DRIVER_NAME, e);
                if let Err(close_err) = self.bus.close() {
                    log::warn!("{}: closing bus failed: {}", DRIVER_NAME, close_err);
                }
                Err(Error::not_found(e))
            }
        }
    }

    fn handshake(&mut self) -> Result<FirmwareVersion> {
        let attempts = self.config.handshake_attempts();
        let timeout_ms = self.config.handshake_timeout_ms;
        let mut last = None;

        for attempt in 1..=attempts {
            let res = if self.config.abort_on_open {
                self.write_abort(timeout_ms)
                    .and_then(|()| self.probe_firmware(timeout_ms))
            } else {
                self.probe_firmware(timeout_ms)
            };
            match res {
                Ok(fw) => return Ok(fw),
                Err(e) => {
                    log::warn!("handshake attempt {}/{} failed: {}", attempt, attempts, e);
                    last = Some(e);
                }
            }
        }
        Err(last.unwrap_or(Error::Timeout))
    }

    fn probe_firmware(&mut self, timeout_ms: u64) -> Result<FirmwareVersion> {
        self.send_frame(get_firmware_version(), timeout_ms)?;
        let mut buf = [0u8; FIRMWARE_REPLY_CAPACITY];
        let n = self.receive_frame(&mut buf, timeout_ms)?;
        FirmwareVersion::parse(&buf[..n])
    }
}
