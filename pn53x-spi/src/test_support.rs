//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize common MockBus setup so tests across the
//! crate and tests/ directory can reuse the same logic.
#![allow(dead_code)]

use std::sync::Arc;

use crate::config::{DriverConfig, ReadyMode};
use crate::device::{Device, DeviceBuilder, Initialized};
use crate::ready::IrqFlag;
use crate::transport::MockBus;
use crate::{Result, constants};

/// Payload of a PN532 GetFirmwareVersion reply (IC 0x32, v1.6, all
/// protocols supported).
#[doc(hidden)]
pub fn firmware_payload() -> Vec<u8> {
    vec![0x03, 0x32, 0x01, 0x06, 0x07]
}

/// Wire bytes of a chip -> host frame carrying `payload`.
#[doc(hidden)]
pub fn chip_response(payload: &[u8]) -> Vec<u8> {
    crate::transport::mock::chip_frame(payload)
}

/// Configuration that keeps failing tests fast: status polling and a
/// short handshake.
#[doc(hidden)]
pub fn quick_config() -> DriverConfig {
    DriverConfig::new()
        .with_ready_mode(ReadyMode::StatusPoll)
        .with_handshake_timeout_ms(20)
}

/// MockBus that will answer the open handshake.
#[doc(hidden)]
pub fn mock_with_firmware() -> MockBus {
    let bus = MockBus::new();
    bus.push_response(&firmware_payload());
    bus
}

/// Initialized status-polling device plus a handle on its simulated chip.
#[doc(hidden)]
pub fn initialized_mock_device() -> Result<(Device<Initialized>, MockBus)> {
    let bus = mock_with_firmware();
    let device = DeviceBuilder::new()
        .with_bus(bus.clone())
        .with_config(quick_config())
        .open(constants::DRIVER_NAME)?;
    Ok((device, bus))
}

/// Initialized IRQ-driven device. The simulated chip raises the returned
/// flag the way an interrupt handler would.
#[doc(hidden)]
pub fn irq_mock_device() -> Result<(Device<Initialized>, MockBus, Arc<IrqFlag>)> {
    let irq = Arc::new(IrqFlag::new());
    let bus = MockBus::with_irq(Arc::clone(&irq));
    bus.push_response(&firmware_payload());
    let device = DeviceBuilder::new()
        .with_bus(bus.clone())
        .with_ready_signal(Arc::clone(&irq))
        .with_config(quick_config().with_ready_mode(ReadyMode::Irq))
        .open(constants::DRIVER_NAME)?;
    Ok((device, bus, irq))
}
