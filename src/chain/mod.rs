//! Upstream store access.
//!
//! The social chain is the marketplace's only database: posts, threaded
//! comments and account records. This module models the raw records the
//! chain nodes return and the read-only port every other context queries.
//! Writes never go through here; they are mediated by the signer port in
//! [`crate::action`].
//!
//! - Wire records and identifiers in [`domain`]
//! - The store port in [`ports`]
//! - In-memory and JSON-RPC implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
