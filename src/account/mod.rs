//! Accounts, reputation and the logged-in session.
//!
//! There is no server-side session. Identity is proven by having the signer
//! sign a login challenge; the profile fetched afterwards is cached through
//! a [`ports::SessionStore`] until logout.
//!
//! - Profiles, reputation and tiers in [`domain`]
//! - The session port in [`ports`]
//! - In-memory and file-backed session stores in [`adapters`]
//! - Profile lookup and login in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
