//! Signer implementations.

pub mod memory;

pub use memory::{RecordingSigner, SignerCall};
