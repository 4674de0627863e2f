// pn53x-spi/src/constants.rs
//! Wire-level constants of the PN53x SPI protocol

/// Connection string accepted by [`crate::device::open`].
pub const DRIVER_NAME: &str = "pn53x_spi";

/// SPI marker: host is about to write a frame
pub const SPI_DATAWRITE: u8 = 0x01;
/// SPI marker: host reads the status byte
pub const SPI_STATREAD: u8 = 0x02;
/// SPI marker: host reads frame bytes
pub const SPI_DATAREAD: u8 = 0x03;
/// Bit set in the status byte when the chip has data for the host
pub const SPI_STATUS_READY: u8 = 0x01;
/// Filler byte clocked out while reading
pub const SPI_DUMMY: u8 = 0xFF;

/// First byte of every frame
pub const PREAMBLE: u8 = 0x00;
/// Start code, first byte
pub const STARTCODE1: u8 = 0x00;
/// Start code, second byte
pub const STARTCODE2: u8 = 0xFF;
/// Last byte of every frame
pub const POSTAMBLE: u8 = 0x00;

/// Frame identifier, host -> chip
pub const TFI_HOST_TO_CHIP: u8 = 0xD4;
/// Frame identifier, chip -> host
pub const TFI_CHIP_TO_HOST: u8 = 0xD5;
/// Frame identifier of the application-level error frame
pub const TFI_ERROR: u8 = 0x7F;

/// Fixed ACK frame
pub const ACK_FRAME: [u8; 6] = [0x00, 0x00, 0xFF, 0x00, 0xFF, 0x00];
/// Fixed NACK frame
pub const NACK_FRAME: [u8; 6] = [0x00, 0x00, 0xFF, 0xFF, 0x00, 0x00];
/// Application-level error frame sent by the chip
pub const ERROR_FRAME: [u8; 8] = [0x00, 0x00, 0xFF, 0x01, 0xFF, 0x7F, 0x81, 0x00];

/// Framing bytes around a command payload:
/// preamble, two start codes, LEN, LCS, TFI, DCS, postamble.
pub const FRAME_OVERHEAD: usize = 8;

/// Largest payload `encode_command` accepts (LEN must fit in one byte with the TFI)
pub const MAX_PAYLOAD_LEN: usize = 254;

/// Largest normal information frame: 7 framing bytes plus LEN = 255
pub const MAX_FRAME_LEN: usize = 7 + 255;

/// GetFirmwareVersion opcode, the handshake probe
pub const CMD_GET_FIRMWARE_VERSION: u8 = 0x02;
