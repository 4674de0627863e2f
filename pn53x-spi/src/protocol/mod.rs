// pn53x-spi/src/protocol/mod.rs

//! Frame format: checksums, encoding, scanning and decoding.

pub mod checksum;
pub mod codec;
pub mod command;
pub mod frame;
pub mod parser;
pub mod scanner;

pub use checksum::{dcs, lcs};
pub use command::FirmwareVersion;
pub use frame::{Frame, FrameKind, Malformed, encode_command};
pub use scanner::{ByteSource, FrameScanner, ScanState, SliceSource, scan_frame};
