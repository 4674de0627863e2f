// pn53x-spi/src/transport/traits.rs

use crate::Result;

/// Upward contract handed to the generic PN53x command layer.
///
/// Payloads are raw chip commands (opcode first, TFI excluded); framing,
/// chip-select and readiness are the transport's business.
pub trait Transport {
    /// Frame and send one command, then consume the chip's ACK.
    fn send(&mut self, payload: &[u8], timeout_ms: u64) -> Result<()>;

    /// Wait for the reply frame and copy its payload into `buf`.
    /// Returns the payload length.
    fn receive(&mut self, buf: &mut [u8], timeout_ms: u64) -> Result<usize>;

    /// Ask the chip to drop the command in progress.
    fn abort(&mut self) -> Result<()>;

    /// `send` followed by `receive` with the same budget.
    fn transceive(&mut self, payload: &[u8], buf: &mut [u8], timeout_ms: u64) -> Result<usize> {
        self.send(payload, timeout_ms)?;
        self.receive(buf, timeout_ms)
    }
}
