//! Request composition and dispatch.

mod composer;
mod dispatch;

pub use composer::{ActionComposer, ComposeError, SUBMISSION_FOOTER};
pub use dispatch::{ActionError, ActionReceipt, ActionResult, ActionService};
