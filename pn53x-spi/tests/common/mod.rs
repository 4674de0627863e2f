// Shared helpers for the integration test crates.
#![allow(dead_code, unused_imports)]

pub mod fixtures;

pub use fixtures::*;
pub use pn53x_spi::test_support::{
    chip_response, firmware_payload, initialized_mock_device, irq_mock_device,
    mock_with_firmware, quick_config,
};

/// Install env_logger once; `RUST_LOG=pn53x_spi=trace` shows the wire.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
