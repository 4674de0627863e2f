// pn53x-spi/src/protocol/codec.rs

//! Whole-buffer encode/decode of ACK and response frames.

use crate::Result;

use super::command::response_code;
use super::frame::Frame;
use super::scanner::{SliceSource, scan_frame};

/// Encode a command payload into a full wire frame, rejecting payloads
/// that do not fit.
pub fn encode_command_frame(payload: &[u8]) -> Result<Vec<u8>> {
    Frame::command(payload)
}

/// Decode a complete chip -> host frame held in memory and return its
/// payload. When `expected_cmd` is given the response code is checked
/// against `expected_cmd + 1`.
pub fn decode_response_frame(expected_cmd: Option<u8>, frame: &[u8]) -> Result<Vec<u8>> {
    let mut src = SliceSource::new(frame);
    let (decoded, _) = scan_frame(&mut src, frame.len())?;
    let payload = decoded.into_payload()?;
    if let Some(cmd) = expected_cmd {
        super::parser::expect_response_code(&payload, response_code(cmd))?;
    }
    Ok(payload)
}

/// Decode an ACK window (the six bytes read after a command).
pub fn decode_ack(window: &[u8]) -> Result<()> {
    let mut src = SliceSource::new(window);
    let (decoded, _) = scan_frame(&mut src, window.len())?;
    decoded.expect_ack()
}
