//! Marketplace tasks.
//!
//! Tasks have no table of their own: each one is a top-level post under the
//! marketplace tag with the structured record embedded in it. This module
//! owns that record, the codec that writes it into a post and reads it back,
//! and the read paths that turn a page of posts into task listings.
//!
//! - Records and drafts in [`domain`]
//! - Post encoding and decoding in [`codec`]
//! - Discovery and detail loading in [`services`]

pub mod codec;
pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
