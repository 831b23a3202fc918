//! Chain operations carried by a broadcast.

use serde::ser::{Serialize, SerializeTuple, Serializer};

/// Fields of a `comment` operation, which creates a post or reply.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CommentOperation {
    /// Parent author; empty for top-level posts.
    pub parent_author: String,
    /// Parent permlink, or the category tag for top-level posts.
    pub parent_permlink: String,
    /// Author account.
    pub author: String,
    /// New post permlink.
    pub permlink: String,
    /// Post title.
    pub title: String,
    /// Markdown body.
    pub body: String,
    /// Serialized JSON metadata.
    pub json_metadata: String,
}

/// A chain operation, serialized as the `[name, payload]` pair nodes expect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Create a post or reply.
    Comment(CommentOperation),
}

impl Operation {
    /// Returns the operation name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Comment(_) => "comment",
        }
    }
}

impl Serialize for Operation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut pair = serializer.serialize_tuple(2)?;
        pair.serialize_element(self.name())?;
        match self {
            Self::Comment(comment) => pair.serialize_element(comment)?,
        }
        pair.end()
    }
}
