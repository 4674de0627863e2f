// pn53x-spi/src/device/builder.rs

//! Fluent assembly of a [`Device`](crate::device::handle::Device).

use crate::bus::{DeviceSelector, NoSelect, SpiBus};
use crate::config::DriverConfig;
use crate::constants::DRIVER_NAME;
use crate::device::handle::{Device, Initialized, Uninitialized};
use crate::ready::ReadySignal;
use crate::{Error, Result};

/// Helper to assemble a Device from its collaborators.
#[derive(Default)]
pub struct DeviceBuilder {
    bus: Option<Box<dyn SpiBus>>,
    selector: Option<Box<dyn DeviceSelector>>,
    ready: Option<Box<dyn ReadySignal>>,
    config: DriverConfig,
}

impl DeviceBuilder {
    /// Empty builder; a bus must be supplied before building.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bus the chip hangs off.
    pub fn with_bus(mut self, bus: impl SpiBus + 'static) -> Self {
        self.bus = Some(Box::new(bus));
        self
    }

    /// Chip-select for this device. Defaults to [`NoSelect`] for buses
    /// that handle chip-select themselves.
    pub fn with_selector(mut self, selector: impl DeviceSelector + 'static) -> Self {
        self.selector = Some(Box::new(selector));
        self
    }

    /// Latch raised by the IRQ handler. Without one the device polls the
    /// status byte.
    pub fn with_ready_signal(mut self, signal: impl ReadySignal + 'static) -> Self {
        self.ready = Some(Box::new(signal));
        self
    }

    /// Replace the default [`DriverConfig`].
    pub fn with_config(mut self, config: DriverConfig) -> Self {
        self.config = config;
        self
    }

    /// Consume the builder and return an uninitialized Device.
    /// Requires a bus; otherwise returns DeviceNotFound.
    pub fn build_uninitialized(self) -> Result<Device<Uninitialized>> {
        let bus = self.bus.ok_or(Error::DeviceNotFound { cause: None })?;
        let selector = self.selector.unwrap_or_else(|| Box::new(NoSelect));
        Ok(Device::new(bus, selector, self.ready, self.config))
    }

    /// Build and run the handshake. `name` must be the driver's
    /// connection string.
    pub fn open(self, name: &str) -> Result<Device<Initialized>> {
        if name != DRIVER_NAME {
            log::debug!("open: {:?} is not handled by {}", name, DRIVER_NAME);
            return Err(Error::not_found(Error::Bus(format!(
                "unknown connection string {:?}",
                name
            ))));
        }
        self.build_uninitialized()?.initialize()
    }
}
