// pn53x-spi/src/transport/mod.rs

//! Upward transport contract and the simulated chip used in tests.

pub mod mock;
/// The [`Transport`] trait.
pub mod traits;

pub use mock::MockBus;
pub use traits::Transport;
