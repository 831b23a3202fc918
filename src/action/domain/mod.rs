//! Request shapes handed to the signer.

mod operation;
mod request;

pub use operation::{CommentOperation, Operation};
pub use request::{
    APPROVE_WEIGHT, BroadcastRequest, KeyType, PublishTaskRequest, REJECT_WEIGHT, ReplyRequest,
    SignMessageRequest, VoteRequest,
};
