//! Profile lookup and session management.

mod profile;
mod session;

pub use profile::{ProfileError, fetch_profile};
pub use session::{LOGIN_CHALLENGE_PREFIX, SessionError, SessionService};
