//! Port contract for session persistence.

pub mod session;

pub use session::{SessionResult, SessionStore, SessionStoreError};
