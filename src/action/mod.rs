//! Outbound writes.
//!
//! Nothing in this crate writes to the chain directly. Every write is shaped
//! here into a request and handed to a [`ports::SignerCapability`], which
//! holds the user's keys and broadcasts on their behalf. Composition is
//! pure; dispatch is a single request/response with no retry.
//!
//! - Request shapes in [`domain`]
//! - The signer port in [`ports`]
//! - A recording signer in [`adapters`]
//! - The composer and dispatch service in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
