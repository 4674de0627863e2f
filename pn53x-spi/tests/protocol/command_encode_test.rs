#[path = "../common/mod.rs"]
mod common;

use pn53x_spi::Error;
use pn53x_spi::constants::{CMD_GET_FIRMWARE_VERSION, MAX_FRAME_LEN, MAX_PAYLOAD_LEN};
use pn53x_spi::protocol::codec::encode_command_frame;
use pn53x_spi::protocol::command::get_firmware_version;
use pn53x_spi::protocol::encode_command;

#[test]
fn firmware_query_wire_bytes() {
    assert_eq!(get_firmware_version(), &[CMD_GET_FIRMWARE_VERSION]);
    assert_eq!(
        encode_command(get_firmware_version()),
        common::wire(common::FIRMWARE_COMMAND)
    );
}

#[test]
fn empty_payload_is_tfi_only() {
    assert_eq!(
        encode_command(&[]),
        common::wire("00 00 ff 01 ff d4 2c 00")
    );
}

#[test]
fn largest_payload_fills_a_normal_frame() {
    let frame = encode_command_frame(&[0xAB; MAX_PAYLOAD_LEN]).unwrap();
    assert_eq!(frame.len(), MAX_FRAME_LEN);
    assert_eq!(frame[3], 0xff);
    assert_eq!(frame[4], 0x01);
}

#[test]
fn oversized_payload_is_rejected() -> anyhow::Result<()> {
    match encode_command_frame(&[0u8; MAX_PAYLOAD_LEN + 1]) {
        Err(Error::PayloadTooLarge { len }) => assert_eq!(len, 255),
        other => anyhow::bail!("expected PayloadTooLarge, got {:?}", other),
    }
    Ok(())
}
