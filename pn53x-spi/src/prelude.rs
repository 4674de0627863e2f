// pn53x-spi/src/prelude.rs

//! Convenience re-exports.

pub use crate::bus::{DeviceSelector, FnSelector, NoSelect, SpiBus};
#[cfg(feature = "embedded-hal")]
pub use crate::bus::{HalBus, PinSelector};
pub use crate::config::{DriverConfig, ReadyMode};
pub use crate::device::{Device, DeviceBuilder, Initialized, Uninitialized};
pub use crate::protocol::{FirmwareVersion, Frame, FrameKind};
pub use crate::ready::{IrqFlag, ReadySignal};
pub use crate::transport::Transport;
pub use crate::{Error, Result};

// Re-export small utilities for convenience
pub use crate::utils::{HexBytes, ms};
