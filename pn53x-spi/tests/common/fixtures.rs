// fixtures.rs: wire vectors written the way they appear in the datasheet

/// GetFirmwareVersion command frame.
pub const FIRMWARE_COMMAND: &str = "00 00 ff 02 fe d4 02 2a 00";

/// PN532 firmware reply (IC 0x32, v1.6, support 0x07).
pub const FIRMWARE_RESPONSE: &str = "00 00 ff 06 fa d5 03 32 01 06 07 e8 00";

/// Firmware reply with an `a0` where the DCS should be `e8`.
pub const FIRMWARE_RESPONSE_BAD_DCS: &str = "00 00 ff 06 fa d5 03 32 01 06 07 a0 00";

pub const ACK: &str = "00 00 ff 00 ff 00";
pub const NACK: &str = "00 00 ff ff 00 00";
pub const APPLICATION_ERROR: &str = "00 00 ff 01 ff 7f 81 00";

/// Decode a spaced hex vector.
pub fn wire(spaced: &str) -> Vec<u8> {
    let compact: String = spaced.split_whitespace().collect();
    hex::decode(compact).expect("fixture is valid hex")
}

pub fn firmware_response() -> Vec<u8> {
    wire(FIRMWARE_RESPONSE)
}
