//! Account domain types.

mod profile;
mod reputation;

pub use profile::{ProfileDetails, ProfileMetadata, UserProfile};
pub use reputation::{
    GatedAction, NEUTRAL_REPUTATION, ParseReputationTierError, ReputationTier,
    reputation_transform,
};
