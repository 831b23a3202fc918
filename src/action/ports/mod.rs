//! Port contract for the external signer.

pub mod signer;

pub use signer::{SignerCapability, SignerError, SignerReceipt, SignerResult};
