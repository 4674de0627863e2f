// pn53x-spi/src/error.rs

//! Crate-wide error type.

use thiserror::Error;

use crate::protocol::FrameKind;

/// Common error type
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// Coarse `open` failure. The internal cause, if any, is kept for
    /// diagnostics and reachable through [`Error::detail`].
    #[error("device not found")]
    DeviceNotFound {
        /// What went wrong underneath.
        #[source]
        cause: Option<Box<Error>>,
    },

    /// The platform bus or chip-select line failed.
    #[error("bus error: {0}")]
    Bus(String),

    /// Byte I/O or close on a bus that was never opened.
    #[error("device is not open")]
    NotOpen,

    /// The chip did not become ready within the budget.
    #[error("operation timed out")]
    Timeout,

    /// The response payload is larger than the caller's buffer.
    #[error("insufficient buffer: frame does not fit in {capacity} bytes")]
    InsufficientBuffer {
        /// Size of the buffer that was offered.
        capacity: usize,
    },

    /// A command payload does not fit in a normal information frame.
    #[error("payload too large: {len} bytes (max {max})", max = crate::constants::MAX_PAYLOAD_LEN)]
    PayloadTooLarge {
        /// Rejected payload length.
        len: usize,
    },

    /// `LEN + LCS` is not zero.
    #[error("length checksum mismatch: len={len:#04x}, lcs={lcs:#04x}")]
    LengthChecksumMismatch {
        /// LEN byte as received.
        len: u8,
        /// LCS byte as received.
        lcs: u8,
    },

    /// TFI, payload and DCS do not sum to zero.
    #[error("data checksum mismatch: residue {residue:#04x}")]
    DataChecksumMismatch {
        /// Low byte of the sum; zero for a sound frame.
        residue: u8,
    },

    /// A well-formed frame of the wrong kind, e.g. NACK where an ACK was due.
    #[error("unexpected frame: expected {expected}, got {actual}")]
    UnexpectedFrame {
        /// Kind the exchange was waiting for.
        expected: FrameKind,
        /// Kind that arrived.
        actual: FrameKind,
    },

    /// The reply does not answer the command that was sent.
    #[error("unexpected response code: expected {expected:#04x}, got {actual:#04x}")]
    UnexpectedResponse {
        /// Command code plus one.
        expected: u8,
        /// First payload byte of the reply.
        actual: u8,
    },

    /// Input ended early or a payload has the wrong size.
    #[error("invalid packet length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Bytes required.
        expected: usize,
        /// Bytes available.
        actual: usize,
    },
}

impl Error {
    /// Wrap an internal failure into the coarse `DeviceNotFound`.
    pub fn not_found(cause: Error) -> Self {
        Error::DeviceNotFound {
            cause: Some(Box::new(cause)),
        }
    }

    /// Diagnostic detail behind a `DeviceNotFound`; `None` for any other
    /// variant or when no cause was recorded.
    pub fn detail(&self) -> Option<&Error> {
        match self {
            Error::DeviceNotFound { cause } => cause.as_deref(),
            _ => None,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
