#[path = "../common/mod.rs"]
mod common;

use pn53x_spi::bus::{NoSelect, SpiBus, Transaction};
use pn53x_spi::constants::{SPI_DATAREAD, SPI_DATAWRITE, SPI_STATREAD, SPI_STATUS_READY};
use pn53x_spi::protocol::scan_frame;
use pn53x_spi::transport::{MockBus, Transport};

#[test]
fn scanner_reads_live_from_the_bus() -> anyhow::Result<()> {
    let mut bus = MockBus::new();
    bus.open("spi")?;
    bus.push_ready(&common::firmware_response());
    let mut sel = NoSelect;

    let mut tx = Transaction::begin(&mut bus, &mut sel)?;
    tx.transceive(SPI_DATAREAD)?;
    let (frame, consumed) = scan_frame(&mut tx, 64)?;
    tx.end()?;

    assert_eq!(consumed, 13);
    assert_eq!(frame.into_payload()?, common::firmware_payload());
    // marker plus one dummy clock per scanned byte
    assert_eq!(bus.sent_bytes().len(), 14);
    assert_eq!(bus.pending(), 0);
    Ok(())
}

#[test]
fn status_read_and_write_markers() -> anyhow::Result<()> {
    let mut bus = MockBus::new();
    bus.open("spi")?;
    let mut sel = NoSelect;

    let mut tx = Transaction::begin(&mut bus, &mut sel)?;
    tx.transceive(SPI_DATAWRITE)?;
    tx.write(&common::wire(common::FIRMWARE_COMMAND), 10)?;
    tx.end()?;

    let mut tx = Transaction::begin(&mut bus, &mut sel)?;
    tx.transceive(SPI_STATREAD)?;
    assert_eq!(tx.transceive(0xFF)? & SPI_STATUS_READY, SPI_STATUS_READY);
    tx.end()?;

    assert_eq!(bus.written(), vec![common::wire(common::FIRMWARE_COMMAND)]);
    assert_eq!(bus.transactions(), 2);
    Ok(())
}

#[test]
fn device_as_generic_transport() -> anyhow::Result<()> {
    fn firmware_via(t: &mut dyn Transport) -> pn53x_spi::Result<Vec<u8>> {
        let mut buf = [0u8; 16];
        let n = t.transceive(&[0x02], &mut buf, 100)?;
        Ok(buf[..n].to_vec())
    }

    let (mut dev, bus) = common::initialized_mock_device()?;
    bus.push_response(&common::firmware_payload());
    assert_eq!(firmware_via(&mut dev)?, common::firmware_payload());
    Ok(())
}
