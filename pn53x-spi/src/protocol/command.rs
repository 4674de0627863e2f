// pn53x-spi/src/protocol/command.rs

//! The few chip commands this layer issues itself.

use derive_more::Display;

use crate::constants::CMD_GET_FIRMWARE_VERSION;
use crate::{Error, Result};

/// GetFirmwareVersion command payload (opcode only).
pub fn get_firmware_version() -> &'static [u8] {
    &[CMD_GET_FIRMWARE_VERSION]
}

/// Response code the chip answers a command with.
pub fn response_code(command: u8) -> u8 {
    command.wrapping_add(1)
}

/// Decoded GetFirmwareVersion reply.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[display(fmt = "PN5{:02x} v{}.{} (support {:#04x})", ic, version, revision, support)]
pub struct FirmwareVersion {
    /// IC code, 0x32 for a PN532
    pub ic: u8,
    /// Firmware version
    pub version: u8,
    /// Firmware revision
    pub revision: u8,
    /// Supported card families bitmap
    pub support: u8,
}

impl FirmwareVersion {
    /// Parse the payload of a GetFirmwareVersion reply
    /// (`03 IC Ver Rev Support`, TFI already stripped).
    pub fn parse(payload: &[u8]) -> Result<Self> {
        crate::protocol::parser::expect_response_code(
            payload,
            response_code(CMD_GET_FIRMWARE_VERSION),
        )?;
        let b = crate::protocol::parser::slice_at(payload, 1, 4)?;
        Ok(Self {
            ic: b[0],
            version: b[1],
            revision: b[2],
            support: b[3],
        })
    }
}

impl TryFrom<&[u8]> for FirmwareVersion {
    type Error = Error;

    fn try_from(payload: &[u8]) -> Result<Self> {
        Self::parse(payload)
    }
}
