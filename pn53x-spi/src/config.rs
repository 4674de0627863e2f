// pn53x-spi/src/config.rs

//! Driver configuration

use crate::constants::MAX_FRAME_LEN;
use crate::ready::DEFAULT_POLL_INTERVAL_MS;
use crate::utils::HANDSHAKE_TIMEOUT_MS;

/// How the driver learns that the chip has a frame ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReadyMode {
    /// Wait on the IRQ-driven [`crate::ready::ReadySignal`].
    #[default]
    Irq,
    /// Poll the chip's status byte with the `STATREAD` marker. For boards
    /// without the IRQ line wired.
    StatusPoll,
}

/// Tunables for the handshake and the transaction sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DriverConfig {
    /// Timeout of the firmware-version probe at open (ms)
    pub handshake_timeout_ms: u64,
    /// Extra handshake attempts after the first one
    pub handshake_retries: u8,
    /// Send an ACK frame as an abort before the handshake
    pub abort_on_open: bool,
    /// IRQ or status polling
    pub ready_mode: ReadyMode,
    /// Sleep between readiness polls (ms)
    pub poll_interval_ms: u64,
    /// Most bytes the scanner may consume in one receive
    pub max_frame_len: usize,
    /// Check that a reply's first byte is the last opcode + 1
    pub verify_response_code: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            handshake_timeout_ms: HANDSHAKE_TIMEOUT_MS,
            handshake_retries: 2,
            abort_on_open: true,
            ready_mode: ReadyMode::Irq,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_frame_len: MAX_FRAME_LEN,
            verify_response_code: true,
        }
    }
}

impl DriverConfig {
    /// Same as [`Default::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Set [`Self::handshake_timeout_ms`].
    pub fn with_handshake_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.handshake_timeout_ms = timeout_ms;
        self
    }

    /// Set [`Self::handshake_retries`].
    pub fn with_handshake_retries(mut self, retries: u8) -> Self {
        self.handshake_retries = retries;
        self
    }

    /// Set [`Self::abort_on_open`].
    pub fn with_abort_on_open(mut self, abort: bool) -> Self {
        self.abort_on_open = abort;
        self
    }

    /// Set [`Self::ready_mode`].
    pub fn with_ready_mode(mut self, mode: ReadyMode) -> Self {
        self.ready_mode = mode;
        self
    }

    /// Set [`Self::poll_interval_ms`].
    pub fn with_poll_interval_ms(mut self, interval_ms: u64) -> Self {
        self.poll_interval_ms = interval_ms;
        self
    }

    /// Clamped to at least one ACK frame and at most one normal frame.
    pub fn with_max_frame_len(mut self, len: usize) -> Self {
        self.max_frame_len = len.clamp(crate::constants::ACK_FRAME.len(), MAX_FRAME_LEN);
        self
    }

    /// Set [`Self::verify_response_code`].
    pub fn with_verify_response_code(mut self, verify: bool) -> Self {
        self.verify_response_code = verify;
        self
    }

    /// Total handshake attempts.
    pub fn handshake_attempts(&self) -> usize {
        usize::from(self.handshake_retries) + 1
    }
}
