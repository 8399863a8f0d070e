use std::collections::HashMap;

use crate::{
    api::{CommentId, StanceCounts},
    CommentNode,
};

/// Tallies every comment of `forest`, at any depth
///
/// To count top-level comments only, pass a depth-1 forest such as the one
/// returned by `top_level_forest`.
pub fn count_stances(forest: &[CommentNode]) -> StanceCounts {
    StanceCounts::from_stances(
        forest
            .iter()
            .flat_map(|n| n.iter())
            .map(|n| n.record.stance),
    )
}

/// Subtree tallies for every comment of `forest`, computed in one pass
pub fn branch_stances(forest: &[CommentNode]) -> HashMap<CommentId, StanceCounts> {
    // pre-order, so every comment comes after its parent
    let mut nodes: Vec<(&CommentNode, Option<usize>)> = Vec::new();
    let mut stack = forest.iter().map(|n| (n, None)).collect::<Vec<_>>();
    while let Some((node, parent)) = stack.pop() {
        let i = nodes.len();
        nodes.push((node, parent));
        stack.extend(node.replies.iter().map(|r| (r, Some(i))));
    }

    let mut counts = nodes
        .iter()
        .map(|(n, _)| StanceCounts::from_stances([n.record.stance]))
        .collect::<Vec<_>>();
    for (i, (_, parent)) in nodes.iter().enumerate().rev() {
        if let Some(p) = *parent {
            counts[p] = counts[p] + counts[i];
        }
    }
    nodes
        .into_iter()
        .zip(counts)
        .map(|((n, _), c)| (n.record.id.clone(), c))
        .collect()
}

impl CommentNode {
    pub fn stance_counts(&self) -> StanceCounts {
        count_stances(std::slice::from_ref(self))
    }
}
