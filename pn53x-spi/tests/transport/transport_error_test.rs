#[path = "../common/mod.rs"]
mod common;

use pn53x_spi::Error;
use pn53x_spi::bus::{NoSelect, SpiBus, Transaction};
use pn53x_spi::transport::{MockBus, Transport};

#[test]
fn transfer_failure_and_recovery() -> anyhow::Result<()> {
    let (mut dev, bus) = common::initialized_mock_device()?;
    bus.fail_after(2);
    assert!(matches!(dev.send(&[0x4A], 100), Err(Error::Bus(_))));
    assert!(!bus.is_selected());

    // give the bus back, abort the half-written command and carry on
    bus.fail_after(usize::MAX);
    Transport::abort(&mut dev)?;
    bus.push_response(&[0x4B, 0x00]);
    let mut buf = [0u8; 4];
    assert_eq!(dev.transceive(&[0x4A], &mut buf, 100)?, 2);
    Ok(())
}

#[test]
fn byte_io_needs_an_open_bus() {
    let mut bus = MockBus::new();
    let mut sel = NoSelect;
    assert!(matches!(
        Transaction::begin(&mut bus, &mut sel),
        Err(Error::NotOpen)
    ));
    assert!(matches!(bus.close(), Err(Error::NotOpen)));
}

#[test]
fn dropped_transaction_releases_chip_select() -> anyhow::Result<()> {
    let mut bus = MockBus::new();
    bus.open("spi")?;
    let mut sel = NoSelect;
    {
        let mut tx = Transaction::begin(&mut bus, &mut sel)?;
        tx.transceive(0x03)?;
        // dropped without end()
    }
    assert!(!bus.is_selected());
    Ok(())
}
