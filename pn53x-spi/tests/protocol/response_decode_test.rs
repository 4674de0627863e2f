#[path = "../common/mod.rs"]
mod common;

use pn53x_spi::Error;
use pn53x_spi::protocol::FirmwareVersion;
use pn53x_spi::protocol::FrameKind;
use pn53x_spi::protocol::codec::{decode_ack, decode_response_frame};

#[test]
fn decode_firmware_reply() -> anyhow::Result<()> {
    let payload = decode_response_frame(Some(0x02), &common::firmware_response())?;
    let fw = FirmwareVersion::try_from(payload.as_slice())?;
    assert_eq!(fw.ic, 0x32);
    assert_eq!(fw.version, 1);
    assert_eq!(fw.revision, 6);
    assert_eq!(fw.support, 0x07);
    Ok(())
}

#[test]
fn ack_window_accepts_only_ack() {
    decode_ack(&common::wire(common::ACK)).unwrap();
    match decode_ack(&common::wire(common::NACK)) {
        Err(Error::UnexpectedFrame { expected, actual }) => {
            assert_eq!(expected, FrameKind::Ack);
            assert_eq!(actual, FrameKind::Nack);
        }
        other => panic!("expected UnexpectedFrame, got: {:?}", other),
    }
    // a valid data frame is still not an ACK
    assert!(matches!(
        decode_ack(&common::wire("00 00 ff 01 ff d5 2b 00")),
        Err(Error::UnexpectedFrame {
            actual: FrameKind::Data,
            ..
        })
    ));
}

#[test]
fn corrupted_reply_maps_to_checksum_error() {
    let err = decode_response_frame(None, &common::wire(common::FIRMWARE_RESPONSE_BAD_DCS))
        .unwrap_err();
    assert!(matches!(err, Error::DataChecksumMismatch { .. }));
}

#[test]
fn corrupted_length_maps_to_lcs_error() {
    let mut bytes = common::firmware_response();
    bytes[4] = 0xfb;
    assert!(matches!(
        decode_response_frame(None, &bytes),
        Err(Error::LengthChecksumMismatch { len: 0x06, lcs: 0xfb })
    ));
}

#[test]
fn error_frame_is_unexpected() {
    assert!(matches!(
        decode_response_frame(None, &common::wire(common::APPLICATION_ERROR)),
        Err(Error::UnexpectedFrame {
            expected: FrameKind::Data,
            actual: FrameKind::ApplicationError
        })
    ));
}
