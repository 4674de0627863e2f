// pn53x-spi/src/protocol/frame.rs

//! Frame types and the host-to-chip encoder.

use derive_more::Display;

use crate::constants::{
    ACK_FRAME, MAX_PAYLOAD_LEN, NACK_FRAME, POSTAMBLE, PREAMBLE, STARTCODE1, STARTCODE2,
    TFI_ERROR, TFI_HOST_TO_CHIP,
};
use crate::protocol::checksum::{dcs, lcs};
use crate::{Error, Result};

/// A frame as classified by the scanner.
///
/// Wire format of an information frame:
/// [Preamble] [Start 00 FF] [Len] [LCS] [TFI] [Payload(n)] [DCS] [Postamble]
/// where `Len` counts the TFI plus the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// `00 00 FF 00 FF 00`
    Ack,
    /// `00 00 FF FF 00 00`
    Nack,
    /// Checksum-verified information frame.
    Data {
        /// Frame identifier, `D5` or the `7F` error marker
        tfi: u8,
        /// Bytes after the TFI
        payload: Vec<u8>,
    },
    /// Something that started like a frame but did not hold together.
    Malformed(Malformed),
}

/// Structural or checksum violations detected while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    /// `(len + lcs) mod 256 != 0`
    LengthChecksum {
        /// LEN as received
        len: u8,
        /// LCS as received
        lcs: u8,
    },
    /// The byte after LCS was not the chip -> host TFI
    UnexpectedTfi(u8),
    /// TFI + payload + DCS did not sum to zero; carries the residue
    DataChecksum {
        /// Low byte of the sum
        residue: u8,
    },
    /// The frame needed more than `capacity` bytes
    InsufficientBuffer {
        /// Byte budget of the scan
        capacity: usize,
    },
}

/// Coarse frame classification used in error reports.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// [`Frame::Ack`]
    #[display(fmt = "ACK")]
    Ack,
    /// [`Frame::Nack`]
    #[display(fmt = "NACK")]
    Nack,
    /// Data frame with the chip -> host TFI
    #[display(fmt = "data frame")]
    Data,
    /// Data frame with the `7F` error TFI
    #[display(fmt = "application error frame")]
    ApplicationError,
    /// [`Frame::Malformed`]
    #[display(fmt = "malformed frame")]
    Malformed,
}

/// Build the wire frame for a host -> chip command.
///
/// Layout: `00 00 FF LEN LCS D4 payload.. DCS 00` with `LEN = payload + 1`.
/// The caller must reject payloads longer than [`MAX_PAYLOAD_LEN`] first;
/// see [`Frame::command`] for the checked variant.
pub fn encode_command(payload: &[u8]) -> Vec<u8> {
    debug_assert!(payload.len() <= MAX_PAYLOAD_LEN);
    let len = (payload.len() + 1) as u8;
    let mut out = Vec::with_capacity(payload.len() + crate::constants::FRAME_OVERHEAD);
    out.push(PREAMBLE);
    out.push(STARTCODE1);
    out.push(STARTCODE2);
    out.push(len);
    out.push(lcs(len));
    out.push(TFI_HOST_TO_CHIP);
    out.extend_from_slice(payload);
    out.push(dcs(TFI_HOST_TO_CHIP, payload));
    out.push(POSTAMBLE);
    out
}

impl Frame {
    /// Checked command encoding: rejects payloads that do not fit a
    /// normal information frame.
    pub fn command(payload: &[u8]) -> Result<Vec<u8>> {
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(Error::PayloadTooLarge { len: payload.len() });
        }
        Ok(encode_command(payload))
    }

    /// Serialize a well-formed frame. `Malformed` has no wire form.
    pub fn to_bytes(&self) -> Option<Vec<u8>> {
        match self {
            Frame::Ack => Some(ACK_FRAME.to_vec()),
            Frame::Nack => Some(NACK_FRAME.to_vec()),
            Frame::Data { tfi, payload } => {
                if payload.len() > MAX_PAYLOAD_LEN {
                    return None;
                }
                let len = (payload.len() + 1) as u8;
                let mut out = vec![PREAMBLE, STARTCODE1, STARTCODE2, len, lcs(len), *tfi];
                out.extend_from_slice(payload);
                out.push(dcs(*tfi, payload));
                out.push(POSTAMBLE);
                Some(out)
            }
            Frame::Malformed(_) => None,
        }
    }

    /// Classification for logs and error reports.
    pub fn kind(&self) -> FrameKind {
        match self {
            Frame::Ack => FrameKind::Ack,
            Frame::Nack => FrameKind::Nack,
            Frame::Data { .. } => FrameKind::Data,
            Frame::Malformed(Malformed::UnexpectedTfi(TFI_ERROR)) => FrameKind::ApplicationError,
            Frame::Malformed(_) => FrameKind::Malformed,
        }
    }

    /// Require an ACK.
    pub fn expect_ack(self) -> Result<()> {
        match self {
            Frame::Ack => Ok(()),
            other => Err(Error::UnexpectedFrame {
                expected: FrameKind::Ack,
                actual: other.kind(),
            }),
        }
    }

    /// Require a data frame and return its payload. Checksum and buffer
    /// violations map onto their dedicated error variants.
    pub fn into_payload(self) -> Result<Vec<u8>> {
        let actual = self.kind();
        match self {
            Frame::Data { payload, .. } => Ok(payload),
            Frame::Malformed(Malformed::LengthChecksum { len, lcs }) => {
                Err(Error::LengthChecksumMismatch { len, lcs })
            }
            Frame::Malformed(Malformed::DataChecksum { residue }) => {
                Err(Error::DataChecksumMismatch { residue })
            }
            Frame::Malformed(Malformed::InsufficientBuffer { capacity }) => {
                Err(Error::InsufficientBuffer { capacity })
            }
            Frame::Ack | Frame::Nack | Frame::Malformed(Malformed::UnexpectedTfi(_)) => {
                Err(Error::UnexpectedFrame {
                    expected: FrameKind::Data,
                    actual,
                })
            }
        }
    }
}
