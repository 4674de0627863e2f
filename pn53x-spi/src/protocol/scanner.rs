// pn53x-spi/src/protocol/scanner.rs

//! Byte-at-a-time frame scanner.
//!
//! The scanner is an explicit automaton fed one byte per step. It
//! resynchronises on the `00 FF` start code, tells the ACK and NACK
//! sentinels apart from a data frame by the byte that follows the length
//! field, and validates both checksums. Bytes are pulled from a
//! [`ByteSource`], which for a live receive is a bus read per byte.

use crate::constants::{STARTCODE1, STARTCODE2, TFI_CHIP_TO_HOST};
use crate::protocol::frame::{Frame, Malformed};
use crate::{Error, Result};

/// Pull-based byte supply for the scanner.
pub trait ByteSource {
    /// Next byte, or an error when none can be produced.
    fn next_byte(&mut self) -> Result<u8>;
}

/// Byte source over an already received buffer.
#[derive(Debug)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    /// Read `bytes` front to back.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Bytes handed out so far.
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl ByteSource for SliceSource<'_> {
    fn next_byte(&mut self) -> Result<u8> {
        match self.bytes.get(self.pos) {
            Some(&b) => {
                self.pos += 1;
                Ok(b)
            }
            None => Err(Error::InvalidLength {
                expected: self.pos + 1,
                actual: self.bytes.len(),
            }),
        }
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn next_byte(&mut self) -> Result<u8> {
        (**self).next_byte()
    }
}

/// Position of [`FrameScanner`] within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Skipping bytes until `00`.
    AwaitStart1,
    /// Expecting `FF` after a `00`.
    AwaitStart2,
    /// Next byte is LEN.
    ReadLength,
    /// Next byte is LCS.
    ReadLcs,
    /// Next byte is the TFI.
    ReadTfi,
    /// Collecting payload bytes.
    ReadPayload,
    /// Next byte is DCS.
    ReadDcs,
    /// Next byte is the postamble.
    ReadPostamble,
    /// One trailing byte of an ACK or NACK sentinel is still due.
    SentinelTail {
        /// ACK rather than NACK
        ack: bool,
    },
}

/// Scanner state for one receive. Never shared between calls.
#[derive(Debug)]
pub struct FrameScanner {
    state: ScanState,
    raw: Vec<u8>,
    payload: Vec<u8>,
    length: u8,
    checksum: u8,
}

impl Default for FrameScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScanner {
    /// Scanner waiting for a start code.
    pub fn new() -> Self {
        Self {
            state: ScanState::AwaitStart1,
            raw: Vec::new(),
            payload: Vec::new(),
            length: 0,
            checksum: 0,
        }
    }

    /// Where the scanner currently is.
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Bytes of the current candidate frame (from its first start byte).
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    fn restart(&mut self) {
        self.state = ScanState::AwaitStart1;
        self.raw.clear();
        self.payload.clear();
        self.length = 0;
        self.checksum = 0;
    }

    /// Advance the automaton by one byte. Returns the classified frame
    /// once the last byte of a frame (or the first violating byte) has
    /// been seen.
    pub fn feed(&mut self, b: u8) -> Option<Frame> {
        match self.state {
            ScanState::AwaitStart1 => {
                if b == STARTCODE1 {
                    self.raw.push(b);
                    self.state = ScanState::AwaitStart2;
                } else {
                    self.restart();
                }
                None
            }
            ScanState::AwaitStart2 => {
                if b == STARTCODE2 {
                    self.raw.push(b);
                    self.state = ScanState::ReadLength;
                } else if b == STARTCODE1 {
                    // extra preamble byte
                    self.raw.push(b);
                } else {
                    self.restart();
                }
                None
            }
            ScanState::ReadLength => {
                self.raw.push(b);
                self.length = b;
                self.state = ScanState::ReadLcs;
                None
            }
            ScanState::ReadLcs => {
                self.raw.push(b);
                if self.length == 0x00 && b == 0xFF {
                    self.state = ScanState::SentinelTail { ack: true };
                    None
                } else if self.length == 0xFF && b == 0x00 {
                    self.state = ScanState::SentinelTail { ack: false };
                    None
                } else if self.length.wrapping_add(b) != 0 {
                    Some(Frame::Malformed(Malformed::LengthChecksum {
                        len: self.length,
                        lcs: b,
                    }))
                } else {
                    self.state = ScanState::ReadTfi;
                    None
                }
            }
            ScanState::SentinelTail { ack } => {
                self.raw.push(b);
                Some(if ack { Frame::Ack } else { Frame::Nack })
            }
            ScanState::ReadTfi => {
                self.raw.push(b);
                if b != TFI_CHIP_TO_HOST {
                    return Some(Frame::Malformed(Malformed::UnexpectedTfi(b)));
                }
                self.checksum = b;
                // LEN counts the TFI; a zero LEN wraps like the chip's 8-bit counter
                self.length = self.length.wrapping_sub(1);
                self.state = if self.length == 0 {
                    ScanState::ReadDcs
                } else {
                    ScanState::ReadPayload
                };
                None
            }
            ScanState::ReadPayload => {
                self.raw.push(b);
                self.payload.push(b);
                self.checksum = self.checksum.wrapping_add(b);
                self.length -= 1;
                if self.length == 0 {
                    self.state = ScanState::ReadDcs;
                }
                None
            }
            ScanState::ReadDcs => {
                self.raw.push(b);
                let residue = self.checksum.wrapping_add(b);
                if residue != 0 {
                    return Some(Frame::Malformed(Malformed::DataChecksum { residue }));
                }
                self.state = ScanState::ReadPostamble;
                None
            }
            ScanState::ReadPostamble => {
                self.raw.push(b);
                Some(Frame::Data {
                    tfi: TFI_CHIP_TO_HOST,
                    payload: std::mem::take(&mut self.payload),
                })
            }
        }
    }

    /// Pull bytes from `source` until a frame is classified or `max_bytes`
    /// bytes have been consumed. Returns the classification and the number
    /// of bytes consumed. Only source failures surface as `Err`.
    pub fn scan<S: ByteSource + ?Sized>(
        &mut self,
        source: &mut S,
        max_bytes: usize,
    ) -> Result<(Frame, usize)> {
        let mut consumed = 0usize;
        loop {
            if consumed == max_bytes {
                return Ok((
                    Frame::Malformed(Malformed::InsufficientBuffer {
                        capacity: max_bytes,
                    }),
                    consumed,
                ));
            }
            let b = source.next_byte()?;
            consumed += 1;
            if let Some(frame) = self.feed(b) {
                return Ok((frame, consumed));
            }
        }
    }
}

/// Scan one frame from `source` with a fresh scanner.
pub fn scan_frame<S: ByteSource + ?Sized>(source: &mut S, max_bytes: usize) -> Result<(Frame, usize)> {
    FrameScanner::new().scan(source, max_bytes)
}
