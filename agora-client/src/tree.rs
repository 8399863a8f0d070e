use std::collections::{hash_map, HashMap, VecDeque};

use crate::api::{CommentId, CommentRecord};

#[derive(Debug, serde::Serialize)]
pub struct CommentNode {
    #[serde(flatten)]
    pub record: CommentRecord,

    /// Direct replies, in the order they appeared in the flat input
    pub replies: Vec<CommentNode>,
}

impl CommentNode {
    pub fn leaf(record: CommentRecord) -> CommentNode {
        CommentNode {
            record,
            replies: Vec::new(),
        }
    }

    pub fn id(&self) -> &CommentId {
        &self.record.id
    }

    /// Number of comments in this subtree, this one included
    pub fn num_comments(&self) -> usize {
        self.iter().count()
    }

    /// 1 for a comment without replies
    pub fn depth(&self) -> usize {
        let mut res = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, depth)) = stack.pop() {
            res = res.max(depth);
            stack.extend(node.replies.iter().map(|r| (r, depth + 1)));
        }
        res
    }

    pub fn find(&self, id: &CommentId) -> Option<&CommentNode> {
        self.iter().find(|n| n.record.id == *id)
    }

    /// Pre-order walk over this subtree
    pub fn iter(&self) -> Nodes<'_> {
        Nodes { stack: vec![self] }
    }
}

// Reply chains can be thousands of comments deep, so nothing below recurses
impl Drop for CommentNode {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.replies);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.replies);
        }
    }
}

/// Same records, nested the same way
impl PartialEq for CommentNode {
    fn eq(&self, other: &CommentNode) -> bool {
        // pre-order walks with matching reply counts at every step describe
        // the same shape
        self.iter()
            .zip(other.iter())
            .all(|(a, b)| a.record == b.record && a.replies.len() == b.replies.len())
    }
}

impl Eq for CommentNode {}

pub struct Nodes<'a> {
    stack: Vec<&'a CommentNode>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a CommentNode;

    fn next(&mut self) -> Option<&'a CommentNode> {
        let node = self.stack.pop()?;
        self.stack.extend(node.replies.iter().rev());
        Some(node)
    }
}

/// Turns a flat list of comments into a forest of reply trees
///
/// Never fails and never drops a comment:
/// - a later record with an already-seen id replaces the earlier one in place
/// - a reply whose parent is not in `records` becomes top-level
/// - if no comment at all is top-level, every comment is returned flat,
///   without any nesting
/// - otherwise, parent chains that loop without reaching a top-level comment
///   are cut at their first record (in input order), which becomes top-level
///
/// Top-level comments and reply lists keep the input order.
pub fn build_tree<I>(records: I) -> Vec<CommentNode>
where
    I: IntoIterator<Item = CommentRecord>,
{
    let (mut records, index) = dedup(records);
    if records.is_empty() {
        return Vec::new();
    }
    let mut parents = heal_orphans(&mut records, &index);

    if parents.iter().all(Option::is_some) {
        tracing::warn!(
            num_comments = records.len(),
            "no top-level comment in thread, ignoring reply structure"
        );
        return records.into_iter().map(CommentNode::leaf).collect();
    }

    let mut children = vec![Vec::new(); records.len()];
    for (i, p) in parents.iter().enumerate() {
        if let Some(p) = p {
            children[*p].push(i);
        }
    }
    let promoted = promote_detached(&mut parents, &mut children);
    if !promoted.is_empty() {
        tracing::warn!(
            num_promoted = promoted.len(),
            "reply chains looping back on themselves, promoted to top-level"
        );
        for i in promoted {
            records[i].parent_id = None;
        }
    }

    let mut on_path = vec![false; records.len()];
    parents
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_none())
        .map(|(root, _)| expand(&records, &children, root, &mut on_path))
        .collect()
}

/// The depth-1 forest: top-level comments only (orphans included), without
/// their replies
pub fn top_level_forest<I>(records: I) -> Vec<CommentNode>
where
    I: IntoIterator<Item = CommentRecord>,
{
    let (mut records, index) = dedup(records);
    let parents = heal_orphans(&mut records, &index);
    records
        .into_iter()
        .zip(parents)
        .filter(|(_, p)| p.is_none())
        .map(|(r, _)| CommentNode::leaf(r))
        .collect()
}

fn dedup<I>(records: I) -> (Vec<CommentRecord>, HashMap<CommentId, usize>)
where
    I: IntoIterator<Item = CommentRecord>,
{
    let mut res = Vec::new();
    let mut index = HashMap::new();
    for r in records {
        match index.entry(r.id.clone()) {
            hash_map::Entry::Occupied(e) => {
                tracing::warn!(id = %r.id, "duplicate comment id, keeping the latest record");
                res[*e.get()] = r;
            }
            hash_map::Entry::Vacant(e) => {
                e.insert(res.len());
                res.push(r);
            }
        }
    }
    (res, index)
}

/// Resolves every parent reference to an index into `records`, clearing the
/// ones that point outside of it
fn heal_orphans(
    records: &mut [CommentRecord],
    index: &HashMap<CommentId, usize>,
) -> Vec<Option<usize>> {
    let mut num_orphans = 0;
    let parents: Vec<Option<usize>> = records
        .iter_mut()
        .map(|r| {
            let parent = r.parent_id.as_ref().map(|p| index.get(p).copied());
            match parent {
                None => None,
                Some(Some(p)) => Some(p),
                Some(None) => {
                    num_orphans += 1;
                    r.parent_id = None;
                    None
                }
            }
        })
        .collect();
    if num_orphans > 0 {
        tracing::warn!(num_orphans, "replies to unknown comments, promoted to top-level");
    }
    parents
}

/// Makes every record reachable from a root, by detaching the first
/// unreachable record of each loop from its parent. Returns the detached ones.
fn promote_detached(parents: &mut [Option<usize>], children: &mut [Vec<usize>]) -> Vec<usize> {
    let mut reached = vec![false; parents.len()];
    let mut queue = VecDeque::new();
    for (i, p) in parents.iter().enumerate() {
        if p.is_none() {
            reached[i] = true;
            queue.push_back(i);
        }
    }
    let mut promoted = Vec::new();
    let mut next = 0;
    loop {
        while let Some(i) = queue.pop_front() {
            for &c in &children[i] {
                if !reached[c] {
                    reached[c] = true;
                    queue.push_back(c);
                }
            }
        }
        match (next..parents.len()).find(|&i| !reached[i]) {
            None => return promoted,
            Some(i) => {
                if let Some(p) = parents[i].take() {
                    children[p].retain(|&c| c != i);
                }
                promoted.push(i);
                reached[i] = true;
                queue.push_back(i);
                next = i + 1;
            }
        }
    }
}

struct Frame {
    i: usize,
    next_child: usize,
    replies: Vec<CommentNode>,
}

impl Frame {
    fn new(i: usize) -> Frame {
        Frame {
            i,
            next_child: 0,
            replies: Vec::new(),
        }
    }

    fn finish(self, records: &[CommentRecord]) -> CommentNode {
        CommentNode {
            record: records[self.i].clone(),
            replies: self.replies,
        }
    }
}

/// Builds the subtree below `root` depth-first, with the path from `root`
/// kept on an explicit stack. `on_path` marks the records on that path: a
/// child that is already one of them is kept as a leaf instead of being
/// expanded again.
fn expand(
    records: &[CommentRecord],
    children: &[Vec<usize>],
    root: usize,
    on_path: &mut [bool],
) -> CommentNode {
    let mut root = Frame::new(root);
    let mut path: Vec<Frame> = Vec::new();
    on_path[root.i] = true;
    loop {
        let frame = path.last_mut().unwrap_or(&mut root);
        let Some(&c) = children[frame.i].get(frame.next_child) else {
            let Some(done) = path.pop() else { break };
            on_path[done.i] = false;
            let node = done.finish(records);
            path.last_mut().unwrap_or(&mut root).replies.push(node);
            continue;
        };
        frame.next_child += 1;
        match on_path[c] {
            true => frame.replies.push(CommentNode::leaf(records[c].clone())),
            false => {
                on_path[c] = true;
                path.push(Frame::new(c));
            }
        }
    }
    on_path[root.i] = false;
    root.finish(records)
}
