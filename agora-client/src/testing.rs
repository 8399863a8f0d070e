use chrono::{Duration, TimeZone, Utc};

use crate::api::{ClaimId, CommentId, CommentRecord, UserId, VoteCounts};

/// A record whose `created_at` grows with `minute`, so tests can reason about ordering
pub fn record_at(id: &str, parent: Option<&str>, stance: bool, minute: i64) -> CommentRecord {
    CommentRecord {
        id: CommentId::from(id),
        parent_id: parent.map(CommentId::from),
        stance,
        created_at: Utc.with_ymd_and_hms(2023, 3, 1, 12, 0, 0).unwrap() + Duration::minutes(minute),
        claim_id: ClaimId::stub(),
        author_id: UserId::stub(),
        text: format!("comment {id}"),
        images: Vec::new(),
        votes: VoteCounts::default(),
        my_vote: None,
    }
}

pub fn record(id: &str, parent: Option<&str>, stance: bool) -> CommentRecord {
    record_at(id, parent, stance, 0)
}

/// Flattens a forest into `(id, depth)` pairs in pre-order, which makes shape assertions readable
pub fn shape(forest: &[crate::CommentNode]) -> Vec<(String, usize)> {
    fn visit(node: &crate::CommentNode, depth: usize, out: &mut Vec<(String, usize)>) {
        out.push((node.record.id.0.clone(), depth));
        for r in &node.replies {
            visit(r, depth + 1, out);
        }
    }
    let mut res = Vec::new();
    for n in forest {
        visit(n, 0, &mut res);
    }
    res
}
