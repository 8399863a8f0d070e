use std::fmt;

use crate::{ClaimId, Error, Time, UserId};

#[derive(
    Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
#[serde(transparent)]
pub struct CommentId(pub String);

impl CommentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CommentId {
    fn from(s: &str) -> CommentId {
        CommentId(String::from(s))
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct VoteCounts {
    pub upvotes: u64,
    pub downvotes: u64,
}

impl VoteCounts {
    pub fn score(&self) -> i64 {
        self.upvotes as i64 - self.downvotes as i64
    }
}

/// One stored comment, as fetched from the hosted store
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CommentRecord {
    pub id: CommentId,

    /// The comment this replies to, `None` for a top-level comment
    #[serde(default)]
    pub parent_id: Option<CommentId>,

    /// `true` if the comment argues for the claim, `false` if against
    pub stance: bool,

    pub created_at: Time,

    // Everything below is carried along untouched by the tree builder
    pub claim_id: ClaimId,
    pub author_id: UserId,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub votes: VoteCounts,
    #[serde(default)]
    pub my_vote: Option<Vote>,
}

impl CommentRecord {
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    // See comments on other `validate` functions throughout agora-api
    pub fn validate(&self) -> Result<(), Error> {
        if self.id.0.is_empty() {
            return Err(Error::EmptyId);
        }
        crate::validate_string(&self.id.0)?;
        if let Some(parent) = &self.parent_id {
            crate::validate_string(&parent.0)?;
            if *parent == self.id {
                return Err(Error::SelfReply(self.id.clone()));
            }
        }
        crate::validate_time(&self.created_at)?;
        crate::validate_string(&self.text)?;
        for img in &self.images {
            crate::validate_string(img)?;
        }
        Ok(())
    }
}
