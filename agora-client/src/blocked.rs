use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::anyhow;
use futures::{
    future::{BoxFuture, Shared},
    FutureExt,
};
use parking_lot::Mutex;

use crate::api::{Store, UserId};

type BlockedSet = Arc<HashSet<UserId>>;
type Fetch = Shared<BoxFuture<'static, Result<BlockedSet, Arc<anyhow::Error>>>>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CacheConfig {
    /// How long a fetched blocked-users set is served before being fetched again
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> CacheConfig {
        CacheConfig {
            ttl: Duration::from_secs(5 * 60),
        }
    }
}

struct Entry {
    blocked: BlockedSet,
    fetched_at: Instant,
}

#[derive(Default)]
struct State {
    entries: HashMap<UserId, Entry>,

    /// In-flight fetches, each tagged with a generation so that a finished
    /// fetch only ever removes itself
    pending: HashMap<UserId, (u64, Fetch)>,
    next_generation: u64,
}

/// Who each user has blocked, with expiry
///
/// Concurrent misses for the same user share one request to the store.
pub struct BlockedCache {
    store: Arc<dyn Store>,
    config: CacheConfig,
    state: Mutex<State>,
}

impl BlockedCache {
    pub fn new(store: Arc<dyn Store>, config: CacheConfig) -> BlockedCache {
        BlockedCache {
            store,
            config,
            state: Mutex::new(State::default()),
        }
    }

    pub async fn blocked_by(&self, user: UserId) -> anyhow::Result<BlockedSet> {
        let (generation, fetch) = {
            let mut state = self.state.lock();
            if let Some(e) = state.entries.get(&user) {
                if e.fetched_at.elapsed() < self.config.ttl {
                    tracing::debug!(?user, "blocked users served from cache");
                    return Ok(e.blocked.clone());
                }
            }
            let in_flight = state
                .pending
                .get(&user)
                .map(|(generation, fetch)| (*generation, fetch.clone()));
            match in_flight {
                Some(in_flight) => {
                    tracing::debug!(?user, "joining in-flight blocked users fetch");
                    in_flight
                }
                None => {
                    tracing::debug!(?user, "fetching blocked users");
                    let store = self.store.clone();
                    let fetch = async move {
                        store
                            .blocked_by(user)
                            .await
                            .map(Arc::new)
                            .map_err(Arc::new)
                    }
                    .boxed()
                    .shared();
                    let generation = state.next_generation;
                    state.next_generation += 1;
                    state.pending.insert(user, (generation, fetch.clone()));
                    (generation, fetch)
                }
            }
        };

        let res = fetch.await;

        let mut state = self.state.lock();
        if matches!(state.pending.get(&user), Some((g, _)) if *g == generation) {
            state.pending.remove(&user);
            if let Ok(blocked) = &res {
                state.entries.insert(
                    user,
                    Entry {
                        blocked: blocked.clone(),
                        fetched_at: Instant::now(),
                    },
                );
            }
        }
        res.map_err(|err| anyhow!("fetching users blocked by {user:?}: {err:#}"))
    }

    /// Forgets the cached set of `user`, eg. after they blocked someone
    ///
    /// A fetch already in flight still answers its callers, but its result is
    /// not cached.
    pub fn invalidate(&self, user: UserId) {
        let mut state = self.state.lock();
        state.entries.remove(&user);
        state.pending.remove(&user);
    }

    pub fn evict_expired(&self) {
        let ttl = self.config.ttl;
        self.state
            .lock()
            .entries
            .retain(|_, e| e.fetched_at.elapsed() < ttl);
    }

    pub fn num_cached(&self) -> usize {
        self.state.lock().entries.len()
    }
}
