// pn53x-spi/src/bus/hal.rs

//! [`SpiBus`] over `embedded-hal` 1.0 traits.
//!
//! The PN53x shifts bytes LSB first. Peripherals that can only do MSB
//! first can still be used with [`HalBus::with_bit_reversal`], which
//! mirrors every byte in software.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus as HalSpiBus;

use super::{DeviceSelector, SpiBus};
use crate::constants::SPI_DUMMY;
use crate::{Error, Result};

fn spi_error<E: embedded_hal::spi::Error>(e: E) -> Error {
    Error::Bus(format!("spi: {:?}", e.kind()))
}

fn pin_error<E: embedded_hal::digital::Error>(e: E) -> Error {
    Error::Bus(format!("chip select: {:?}", e.kind()))
}

/// [`SpiBus`](crate::bus::SpiBus) over an `embedded-hal` 1.0 SPI bus.
///
/// Chip-select stays with the [`DeviceSelector`](crate::bus::DeviceSelector);
/// pair it with a [`PinSelector`] when the line is a plain GPIO.
pub struct HalBus<SPI> {
    spi: SPI,
    open: bool,
    selected: bool,
    reverse_bits: bool,
}

impl<SPI> HalBus<SPI>
where
    SPI: HalSpiBus<u8>,
{
    /// Wrap `spi`; the bus starts closed.
    pub fn new(spi: SPI) -> Self {
        Self {
            spi,
            open: false,
            selected: false,
            reverse_bits: false,
        }
    }

    /// Mirror each byte for MSB-first-only peripherals.
    pub fn with_bit_reversal(mut self, reverse: bool) -> Self {
        self.reverse_bits = reverse;
        self
    }

    /// Give the peripheral back.
    pub fn release(self) -> SPI {
        self.spi
    }

    fn wire(&self, b: u8) -> u8 {
        if self.reverse_bits { b.reverse_bits() } else { b }
    }

    fn ensure_active(&self) -> Result<()> {
        if !self.open {
            return Err(Error::NotOpen);
        }
        debug_assert!(self.selected, "byte I/O outside a transaction");
        Ok(())
    }
}

impl<SPI> SpiBus for HalBus<SPI>
where
    SPI: HalSpiBus<u8>,
{
    fn open(&mut self, name: &str) -> Result<()> {
        if self.open {
            return Err(Error::Bus(format!("{} is already open", name)));
        }
        self.open = true;
        self.selected = false;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if !self.open {
            return Err(Error::NotOpen);
        }
        self.open = false;
        Ok(())
    }

    fn begin_transaction(&mut self, selector: &mut dyn DeviceSelector) -> Result<()> {
        if !self.open {
            return Err(Error::NotOpen);
        }
        debug_assert!(!self.selected, "nested transaction");
        if let Err(e) = selector.select() {
            let _ = selector.deselect();
            return Err(e);
        }
        self.selected = true;
        Ok(())
    }

    fn end_transaction(&mut self, selector: &mut dyn DeviceSelector) -> Result<()> {
        // the last byte must be on the wire before chip-select rises
        let flushed = self.spi.flush().map_err(spi_error);
        self.selected = false;
        selector.deselect()?;
        flushed
    }

    fn transceive_byte(&mut self, tx: u8) -> Result<u8> {
        self.ensure_active()?;
        let mut word = [self.wire(tx)];
        self.spi.transfer_in_place(&mut word).map_err(spi_error)?;
        Ok(self.wire(word[0]))
    }

    fn send_bytes(&mut self, data: &[u8], _timeout_ms: u64) -> Result<usize> {
        self.ensure_active()?;
        if self.reverse_bits {
            let mirrored: Vec<u8> = data.iter().map(|b| b.reverse_bits()).collect();
            self.spi.write(&mirrored).map_err(spi_error)?;
        } else {
            self.spi.write(data).map_err(spi_error)?;
        }
        Ok(data.len())
    }

    fn receive_bytes(&mut self, buf: &mut [u8], _timeout_ms: u64) -> Result<usize> {
        self.ensure_active()?;
        let dummy = self.wire(SPI_DUMMY);
        buf.fill(dummy);
        self.spi.transfer_in_place(buf).map_err(spi_error)?;
        if self.reverse_bits {
            for b in buf.iter_mut() {
                *b = b.reverse_bits();
            }
        }
        Ok(buf.len())
    }
}

/// Active-low chip-select on a GPIO.
pub struct PinSelector<P> {
    pin: P,
}

impl<P: OutputPin> PinSelector<P> {
    /// Take ownership of the chip-select pin.
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Give the pin back.
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> DeviceSelector for PinSelector<P> {
    fn select(&mut self) -> Result<()> {
        self.pin.set_low().map_err(pin_error)
    }

    fn deselect(&mut self) -> Result<()> {
        self.pin.set_high().map_err(pin_error)
    }
}
