use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use anyhow::Context;

use crate::{
    api::{ClaimId, CommentId, CommentRecord, Order, StanceCounts, Store, ThreadOrder, UserId},
    branch_stances, build_tree, count_stances, top_level_forest, BlockedCache, CommentNode,
    OrderExt, ThreadOrderExt,
};

/// The discussion under one claim, as seen by `viewer`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Thread {
    pub claim_id: ClaimId,
    pub viewer: UserId,

    /// Flat comments in storage order, blocked authors included
    pub records: Arc<Vec<CommentRecord>>,

    /// Authors `viewer` does not want to see
    pub blocked: Arc<HashSet<UserId>>,
}

impl Thread {
    #[cfg(test)]
    pub fn stub() -> Thread {
        Thread {
            claim_id: ClaimId::stub(),
            viewer: UserId::stub(),
            records: Arc::new(Vec::new()),
            blocked: Arc::new(HashSet::new()),
        }
    }

    pub async fn load<S>(
        store: &S,
        cache: &BlockedCache,
        viewer: UserId,
        claim_id: ClaimId,
    ) -> anyhow::Result<Thread>
    where
        S: Store + ?Sized,
    {
        let records = store
            .comments_for(claim_id)
            .await
            .with_context(|| format!("fetching comments for claim {claim_id:?}"))?;
        let blocked = cache
            .blocked_by(viewer)
            .await
            .with_context(|| format!("loading thread {claim_id:?} for {viewer:?}"))?;
        tracing::debug!(
            ?claim_id,
            num_comments = records.len(),
            num_blocked = blocked.len(),
            "loaded thread"
        );
        Ok(Thread {
            claim_id,
            viewer,
            records: Arc::new(records),
            blocked,
        })
    }

    /// Appends freshly posted comments, eg. from a realtime feed
    pub fn add_records(&mut self, records: Vec<CommentRecord>) {
        Arc::make_mut(&mut self.records).extend(records);
    }

    pub fn set_blocked(&mut self, blocked: Arc<HashSet<UserId>>) {
        self.blocked = blocked;
    }

    /// Comments whose author is not blocked. Replies to hidden comments stay
    /// visible: the tree builder lifts them to top-level.
    pub fn visible_records(&self) -> impl Iterator<Item = &CommentRecord> {
        self.records
            .iter()
            .filter(|r| !self.blocked.contains(&r.author_id))
    }

    pub fn tree(&self, order: &ThreadOrder) -> Vec<CommentNode> {
        let mut forest = build_tree(self.visible_records().cloned());
        order.apply(&mut forest);
        forest
    }

    /// Top-level comments only, without their replies
    pub fn top_level(&self, order: &Order) -> Vec<CommentNode> {
        let mut forest = top_level_forest(self.visible_records().cloned());
        order.sort(&mut forest);
        forest
    }

    pub fn stances(&self) -> StanceCounts {
        count_stances(&build_tree(self.visible_records().cloned()))
    }

    pub fn top_level_stances(&self) -> StanceCounts {
        count_stances(&top_level_forest(self.visible_records().cloned()))
    }

    pub fn branch_stances(&self) -> HashMap<CommentId, StanceCounts> {
        branch_stances(&build_tree(self.visible_records().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::Uuid,
        testing::{record, record_at},
        CacheConfig,
    };
    use agora_mock_store::MockStore;

    fn by(mut r: CommentRecord, author: UserId) -> CommentRecord {
        r.author_id = author;
        r
    }

    #[tokio::test]
    async fn load_hides_blocked_authors() {
        let store = Arc::new(MockStore::new());
        let (me, friend, troll) = (
            UserId(Uuid::new_v4()),
            UserId(Uuid::new_v4()),
            UserId(Uuid::new_v4()),
        );
        store.block(me, troll);
        for r in [
            by(record_at("a", None, true, 0), friend),
            by(record_at("bad", Some("a"), false, 1), troll),
            by(record_at("reply", Some("bad"), true, 2), friend),
            by(record_at("b", None, false, 3), friend),
        ] {
            store.add_comment(r).expect("adding comment");
        }
        let cache = BlockedCache::new(store.clone(), CacheConfig::default());

        let thread = Thread::load(&*store, &cache, me, ClaimId::stub())
            .await
            .expect("loading thread");
        assert_eq!(thread.records.len(), 4);
        assert_eq!(thread.visible_records().count(), 3);

        let forest = thread.tree(&ThreadOrder::default());
        let ids = forest.iter().map(|n| n.id().as_str()).collect::<Vec<_>>();
        // the reply to the hidden comment is lifted to top-level, newest first
        assert_eq!(ids, vec!["b", "reply", "a"]);
        assert_eq!(thread.stances(), StanceCounts::new(2, 1));
        assert_eq!(thread.top_level_stances(), StanceCounts::new(2, 1));

        let top = thread.top_level(&Order::CreatedAt(crate::api::OrderType::Asc));
        let ids = top.iter().map(|n| n.id().as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["a", "reply", "b"]);
    }

    #[tokio::test]
    async fn load_reports_store_failures() {
        let store = Arc::new(MockStore::new());
        store.set_offline(true);
        let cache = BlockedCache::new(store.clone(), CacheConfig::default());
        let err = Thread::load(&*store, &cache, UserId::stub(), ClaimId::stub())
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("fetching comments for claim"));
    }

    #[test]
    fn added_records_join_the_tree() {
        let mut thread = Thread::stub();
        thread.add_records(vec![record("a", None, true)]);
        let before = thread.clone();
        thread.add_records(vec![record("b", Some("a"), false)]);
        assert_eq!(before.records.len(), 1);

        let forest = thread.tree(&ThreadOrder::default());
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].num_comments(), 2);
        assert_eq!(thread.top_level_stances(), StanceCounts::new(1, 0));
        assert_eq!(
            thread.branch_stances()[&CommentId::from("a")],
            StanceCounts::new(1, 1)
        );
    }

    #[test]
    fn blocking_changes_visible_counts() {
        let troll = UserId(Uuid::new_v4());
        let mut thread = Thread::stub();
        thread.add_records(vec![
            record("a", None, true),
            by(record("b", None, false), troll),
        ]);
        assert_eq!(thread.stances(), StanceCounts::new(1, 1));
        thread.set_blocked(Arc::new([troll].into_iter().collect()));
        assert_eq!(thread.stances(), StanceCounts::new(1, 0));
    }
}
