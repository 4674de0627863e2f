//! Small helpers shared across the crate: hex rendering for log output
//! and millisecond timeout conversion.

pub mod hex;
pub mod timeout;

pub use hex::*;
pub use timeout::*;
