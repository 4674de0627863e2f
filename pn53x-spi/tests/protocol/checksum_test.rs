#[path = "../common/mod.rs"]
mod common;

use pn53x_spi::protocol::checksum::residue;
use pn53x_spi::protocol::{dcs, lcs};

#[test]
fn lcs_and_dcs_examples() {
    assert_eq!(lcs(2), 0xfe);
    assert_eq!(lcs(6), 0xfa);
    assert_eq!(lcs(0), 0x00);
    assert_eq!(lcs(0xff), 0x01);

    assert_eq!(dcs(0xd4, &[0x02]), 0x2a);
    assert_eq!(dcs(0xd5, &[0x03, 0x32, 0x01, 0x06, 0x07]), 0xe8);
    assert_eq!(dcs(0x00, &[]), 0x00);
}

#[test]
fn fixture_frames_sum_to_zero() {
    for vector in [common::FIRMWARE_COMMAND, common::FIRMWARE_RESPONSE] {
        let bytes = common::wire(vector);
        let len = bytes[3];
        assert_eq!(len.wrapping_add(bytes[4]), 0, "{}", vector);
        let data = &bytes[5..5 + usize::from(len) + 1];
        assert_eq!(residue(0, data), 0, "{}", vector);
    }
}

#[test]
fn bad_dcs_fixture_leaves_a_residue() {
    let bytes = common::wire(common::FIRMWARE_RESPONSE_BAD_DCS);
    assert_eq!(residue(0, &bytes[5..12]), 0xa0u8.wrapping_sub(0xe8));
}
