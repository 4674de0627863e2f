// pn53x-spi/src/device/mod.rs

//! Device handle, builder and bring-up.

pub mod builder;
pub mod handle;
mod handshake;

pub use builder::DeviceBuilder;
pub use handle::{Device, Initialized, Uninitialized};

use crate::Result;
use crate::bus::SpiBus;
use crate::constants::DRIVER_NAME;

/// Connection strings this driver answers to.
pub fn scan() -> Vec<String> {
    vec![DRIVER_NAME.to_string()]
}

/// Open the chip on `bus` with the default configuration, no chip-select
/// capability and status-byte readiness.
pub fn open(name: &str, bus: impl SpiBus + 'static) -> Result<Device<Initialized>> {
    DeviceBuilder::new().with_bus(bus).open(name)
}
