#[path = "../common/mod.rs"]
mod common;

use pn53x_spi::protocol::{Frame, FrameKind, Malformed, SliceSource, scan_frame};

fn scan(bytes: &[u8]) -> (Frame, usize) {
    let mut src = SliceSource::new(bytes);
    scan_frame(&mut src, bytes.len()).unwrap()
}

#[test]
fn firmware_exchange_end_to_end() {
    common::init_logging();
    let (ack, n) = scan(&common::wire(common::ACK));
    assert_eq!(ack, Frame::Ack);
    assert_eq!(n, 6);

    let (reply, n) = scan(&common::firmware_response());
    assert_eq!(n, 13);
    assert_eq!(
        reply,
        Frame::Data {
            tfi: 0xd5,
            payload: vec![0x03, 0x32, 0x01, 0x06, 0x07],
        }
    );
}

#[test]
fn nack_is_classified() {
    let (frame, _) = scan(&common::wire(common::NACK));
    assert_eq!(frame.kind(), FrameKind::Nack);
}

#[test]
fn bad_dcs_is_rejected() {
    let (frame, _) = scan(&common::wire(common::FIRMWARE_RESPONSE_BAD_DCS));
    assert!(matches!(
        frame,
        Frame::Malformed(Malformed::DataChecksum { .. })
    ));
}

#[test]
fn application_error_frame_kind() {
    let (frame, consumed) = scan(&common::wire(common::APPLICATION_ERROR));
    assert_eq!(frame.kind(), FrameKind::ApplicationError);
    // classified at the TFI, DCS and postamble left on the wire
    assert_eq!(consumed, 6);
}

#[test]
fn leading_garbage_is_skipped() {
    let mut bytes = vec![0xff, 0x12, 0x00];
    bytes.extend(common::firmware_response());
    let (frame, consumed) = scan(&bytes);
    assert_eq!(frame.kind(), FrameKind::Data);
    assert_eq!(consumed, bytes.len());
}

#[test]
fn window_too_small_for_reply() {
    let bytes = common::firmware_response();
    let mut src = SliceSource::new(&bytes);
    let (frame, consumed) = scan_frame(&mut src, 6).unwrap();
    assert_eq!(
        frame,
        Frame::Malformed(Malformed::InsufficientBuffer { capacity: 6 })
    );
    assert_eq!(consumed, 6);
}
