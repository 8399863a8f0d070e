use std::path::Path;

use agora_client::api::Snapshot;
use agora_mock_store::MockStore;
use anyhow::Context;

pub fn load(path: &Path) -> anyhow::Result<Snapshot> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("reading snapshot file {path:?}"))?;
    serde_json::from_str(&data).with_context(|| format!("parsing snapshot file {path:?}"))
}

/// Loads `snapshot` into a fresh store. Comments the store refuses are
/// logged and skipped.
pub fn to_store(snapshot: &Snapshot) -> MockStore {
    let store = MockStore::new();
    let mut num_rejected = 0;
    for c in snapshot.comments.iter().cloned() {
        let id = c.id.clone();
        if let Err(err) = store.add_comment(c) {
            tracing::warn!(%id, %err, "skipping comment rejected by the store");
            num_rejected += 1;
        }
    }
    if num_rejected > 0 {
        tracing::warn!(num_rejected, "some snapshot comments were not loaded");
    }
    for b in &snapshot.blocked {
        store.block(snapshot.viewer, *b);
    }
    store
}
