use crate::{CommentId, Time};

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Unknown error: {0}")]
    Unknown(String),

    #[error("Comment id already used {0:?}")]
    CommentIdAlreadyUsed(CommentId),

    #[error("Comment id must not be empty")]
    EmptyId,

    #[error("Null byte in string is not allowed {0:?}")]
    NullByteInString(String),

    #[error("Comment {0:?} replies to itself")]
    SelfReply(CommentId),

    #[error("Time out of range {0}")]
    InvalidTime(Time),

    #[error("Unknown order {0:?}")]
    UnknownOrder(String),
}
