// pn53x-spi/src/lib.rs

//! pn53x-spi
//!
//! SPI framing and transport layer for NXP PN53x NFC controllers: the
//! frame codec, the select/write/ACK/read transaction sequence and the
//! firmware handshake run at open.
#![warn(missing_docs)]

pub mod bus;
pub mod config;
pub mod constants;
pub mod device;
pub mod error;
pub mod prelude;
pub mod protocol;
pub mod ready;
pub mod test_support;
pub mod transport;
pub mod utils;

// Re-export the error type at crate root so `crate::Error` and
// `crate::Result` are available for consumers and for the prelude.
pub use crate::error::*;

pub use prelude::*;
