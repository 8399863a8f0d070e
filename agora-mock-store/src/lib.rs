use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
    time::Duration,
};

use agora_api::{ClaimId, CommentId, CommentRecord, Error, Store, UserId};
use anyhow::anyhow;
use async_trait::async_trait;
use parking_lot::Mutex;

/// In-memory stand-in for the hosted store
///
/// Unlike the tree builder, it refuses bad records at ingestion: invalid
/// records and reused comment ids are rejected.
pub struct MockStore {
    state: Mutex<State>,
    latency: Option<Duration>,
    offline: AtomicBool,
    comment_fetches: AtomicUsize,
    block_fetches: AtomicUsize,
}

#[derive(Debug, Default)]
struct State {
    comments: BTreeMap<ClaimId, Vec<CommentRecord>>,
    ids: HashSet<CommentId>,
    blocks: HashMap<UserId, HashSet<UserId>>,
}

impl MockStore {
    pub fn new() -> MockStore {
        MockStore {
            state: Mutex::new(State::default()),
            latency: None,
            offline: AtomicBool::new(false),
            comment_fetches: AtomicUsize::new(0),
            block_fetches: AtomicUsize::new(0),
        }
    }

    /// Every fetch sleeps for `latency` before answering
    pub fn with_latency(mut self, latency: Duration) -> MockStore {
        self.latency = Some(latency);
        self
    }

    /// While offline, every fetch fails
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn add_comment(&self, c: CommentRecord) -> Result<(), Error> {
        c.validate()?;
        let mut state = self.state.lock();
        if !state.ids.insert(c.id.clone()) {
            return Err(Error::CommentIdAlreadyUsed(c.id));
        }
        state.comments.entry(c.claim_id).or_default().push(c);
        Ok(())
    }

    pub fn block(&self, user: UserId, blocked: UserId) {
        self.state
            .lock()
            .blocks
            .entry(user)
            .or_default()
            .insert(blocked);
    }

    pub fn unblock(&self, user: UserId, blocked: UserId) {
        if let Some(b) = self.state.lock().blocks.get_mut(&user) {
            b.remove(&blocked);
        }
    }

    pub fn num_comments(&self) -> usize {
        self.state.lock().ids.len()
    }

    /// Number of `comments_for` calls so far, failed ones included
    pub fn num_comment_fetches(&self) -> usize {
        self.comment_fetches.load(Ordering::SeqCst)
    }

    /// Number of `blocked_by` calls so far, failed ones included
    pub fn num_block_fetches(&self) -> usize {
        self.block_fetches.load(Ordering::SeqCst)
    }

    async fn simulate_network(&self) -> anyhow::Result<()> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        match self.offline.load(Ordering::SeqCst) {
            true => Err(anyhow!("mock store is offline")),
            false => Ok(()),
        }
    }
}

impl Default for MockStore {
    fn default() -> MockStore {
        MockStore::new()
    }
}

#[async_trait]
impl Store for MockStore {
    async fn comments_for(&self, claim: ClaimId) -> anyhow::Result<Vec<CommentRecord>> {
        self.comment_fetches.fetch_add(1, Ordering::SeqCst);
        self.simulate_network().await?;
        let res = self
            .state
            .lock()
            .comments
            .get(&claim)
            .cloned()
            .unwrap_or_default();
        tracing::trace!(?claim, num_comments = res.len(), "mock store served comments");
        Ok(res)
    }

    async fn blocked_by(&self, user: UserId) -> anyhow::Result<HashSet<UserId>> {
        self.block_fetches.fetch_add(1, Ordering::SeqCst);
        self.simulate_network().await?;
        Ok(self
            .state
            .lock()
            .blocks
            .get(&user)
            .cloned()
            .unwrap_or_default())
    }
}
