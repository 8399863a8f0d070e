use crate::{ClaimId, CommentRecord, UserId};

/// Everything needed to render one discussion offline: the flat comments of
/// a claim, and who the viewing user has blocked
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Snapshot {
    pub claim_id: ClaimId,
    pub viewer: UserId,
    pub comments: Vec<CommentRecord>,
    #[serde(default)]
    pub blocked: Vec<UserId>,
}
