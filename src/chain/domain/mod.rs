//! Raw chain records and validated identifiers.

mod account;
mod error;
mod ids;
mod post;

pub use account::ChainAccount;
pub use error::ChainDomainError;
pub use ids::{AccountName, Permlink, PostRef};
pub use post::{ActiveVote, ChainPost};
