use std::collections::HashSet;

use async_trait::async_trait;

use crate::{ClaimId, CommentRecord, UserId};

/// The hosted backend, as seen from the discussion core
///
/// Filtering, pagination and auth all happen behind this trait; callers get
/// back flat snapshots.
#[async_trait]
pub trait Store: Send + Sync {
    /// All comments attached to `claim`, in storage order
    async fn comments_for(&self, claim: ClaimId) -> anyhow::Result<Vec<CommentRecord>>;

    /// Users that `user` has blocked
    async fn blocked_by(&self, user: UserId) -> anyhow::Result<HashSet<UserId>>;
}
