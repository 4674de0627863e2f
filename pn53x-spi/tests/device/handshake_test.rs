#[path = "../common/mod.rs"]
mod common;

use std::cell::RefCell;
use std::rc::Rc;

use pn53x_spi::Error;
use pn53x_spi::bus::{FnSelector, SpiBus};
use pn53x_spi::constants::ACK_FRAME;
use pn53x_spi::device::DeviceBuilder;
use pn53x_spi::transport::MockBus;

#[test]
fn absent_chip_is_device_not_found() {
    common::init_logging();
    let bus = MockBus::absent();
    let err = DeviceBuilder::new()
        .with_bus(bus.clone())
        .with_config(common::quick_config().with_handshake_retries(2))
        .open("pn53x_spi")
        .err()
        .expect("open must fail");

    assert_eq!(err.to_string(), "device not found");
    assert!(matches!(err.detail(), Some(Error::Timeout)));
    // three attempts, each an abort plus a probe
    assert_eq!(bus.written().len(), 6);
    assert!(!bus.is_open());
    assert!(!bus.is_selected());
}

#[test]
fn nack_during_handshake_is_device_not_found() {
    let bus = MockBus::new();
    bus.set_auto_ack(false);
    bus.push_ready(&[0x00, 0x00, 0xff, 0xff, 0x00, 0x00]);
    let err = DeviceBuilder::new()
        .with_bus(bus.clone())
        .with_config(common::quick_config().with_handshake_retries(0).with_abort_on_open(false))
        .open("pn53x_spi")
        .err()
        .expect("open must fail");
    assert!(matches!(err.detail(), Some(Error::UnexpectedFrame { .. })));
}

#[test]
fn chip_that_wakes_up_late_is_found() -> anyhow::Result<()> {
    let bus = common::mock_with_firmware();
    bus.ignore_commands(2);
    let dev = DeviceBuilder::new()
        .with_bus(bus.clone())
        .with_config(common::quick_config().with_handshake_retries(2))
        .open("pn53x_spi")?;
    assert!(dev.firmware_version().is_some());
    Ok(())
}

#[test]
fn wrong_connection_string() {
    let err = DeviceBuilder::new()
        .with_bus(common::mock_with_firmware())
        .open("pn532_uart")
        .err()
        .expect("open must fail");
    assert!(matches!(err, Error::DeviceNotFound { cause: Some(_) }));
}

#[test]
fn bus_claimed_elsewhere() {
    let mut bus = common::mock_with_firmware();
    bus.open("someone else").unwrap();
    let err = DeviceBuilder::new()
        .with_bus(bus.clone())
        .open("pn53x_spi")
        .err()
        .expect("open must fail");
    assert!(matches!(err.detail(), Some(Error::Bus(_))));
    assert_eq!(bus.transactions(), 0);
}

#[test]
fn selector_brackets_every_transaction() -> anyhow::Result<()> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let (sel_log, desel_log) = (Rc::clone(&log), Rc::clone(&log));
    let selector = FnSelector::new(
        move || sel_log.borrow_mut().push('L'),
        move || desel_log.borrow_mut().push('H'),
    );
    let bus = common::mock_with_firmware();
    DeviceBuilder::new()
        .with_bus(bus.clone())
        .with_selector(selector)
        .with_config(common::quick_config())
        .open("pn53x_spi")?;

    let events = log.borrow();
    assert_eq!(events.len(), 2 * bus.transactions());
    assert!(events.chunks(2).all(|pair| pair == ['L', 'H']));
    assert_eq!(bus.written()[0], ACK_FRAME);
    Ok(())
}
