#![cfg(test)]

use std::collections::HashSet;

use crate::{
    api::{CommentRecord, StanceCounts, ThreadOrder},
    build_tree, count_stances, testing::record, top_level_forest, CommentNode, ThreadOrderExt,
};

/// `(id, parent, stance)` triples; the small id space makes cycles,
/// self-replies, duplicates and dangling parents all likely
fn records_from(shape: &[(u8, Option<u8>, bool)]) -> Vec<CommentRecord> {
    shape
        .iter()
        .map(|(id, parent, stance)| {
            let parent = parent.map(|p| format!("c{p}"));
            record(&format!("c{id}"), parent.as_deref(), *stance)
        })
        .collect()
}

#[test]
fn build_tree_keeps_every_comment_once() {
    bolero::check!()
        .with_type::<Vec<(u8, Option<u8>, bool)>>()
        .cloned()
        .for_each(|shape| {
            let records = records_from(&shape);
            let unique = records.iter().map(|r| &r.id).collect::<HashSet<_>>().len();
            let forest = build_tree(records.clone());

            let stances = count_stances(&forest);
            assert_eq!(stances.total, unique);
            assert_eq!(stances.for_count + stances.against_count, stances.total);
            assert_eq!(
                forest.iter().map(CommentNode::num_comments).sum::<usize>(),
                stances.total
            );

            let seen = forest
                .iter()
                .flat_map(|n| n.iter())
                .map(|n| n.id().clone())
                .collect::<HashSet<_>>();
            assert_eq!(seen.len(), unique);
            assert_eq!(records.is_empty(), forest.is_empty());
        })
}

#[test]
fn replies_point_at_their_parent() {
    bolero::check!()
        .with_type::<Vec<(u8, Option<u8>, bool)>>()
        .cloned()
        .for_each(|shape| {
            fn check(node: &CommentNode) {
                for r in &node.replies {
                    assert_eq!(r.record.parent_id.as_ref(), Some(node.id()));
                    check(r);
                }
            }
            let forest = build_tree(records_from(&shape));
            let nested = forest.iter().any(|n| !n.replies.is_empty());
            for n in &forest {
                check(n);
                if nested {
                    assert_eq!(n.record.parent_id, None);
                }
            }
        })
}

#[test]
fn top_level_forest_is_flat_subset() {
    bolero::check!()
        .with_type::<Vec<(u8, Option<u8>, bool)>>()
        .cloned()
        .for_each(|shape| {
            let records = records_from(&shape);
            let flat = top_level_forest(records.clone());
            assert!(flat.iter().all(|n| n.replies.is_empty() && n.record.is_top_level()));
            assert!(count_stances(&flat).total <= count_stances(&build_tree(records)).total);
        })
}

#[test]
fn ordering_keeps_counts() {
    bolero::check!()
        .with_type::<Vec<(u8, Option<u8>, bool)>>()
        .cloned()
        .for_each(|shape| {
            let mut forest = build_tree(records_from(&shape));
            let before = count_stances(&forest);
            ThreadOrder::default().apply(&mut forest);
            assert_eq!(count_stances(&forest), before);
        })
}

#[test]
fn percentages_are_rounded_ratios() {
    bolero::check!()
        .with_type::<(u16, u16)>()
        .cloned()
        .for_each(|(f, a)| {
            let c = StanceCounts::new(f as usize, a as usize);
            assert_eq!(c.total, f as usize + a as usize);
            assert!(c.for_percentage <= 100 && c.against_percentage <= 100);
            if c.total == 0 {
                assert_eq!((c.for_percentage, c.against_percentage), (0, 0));
            } else {
                let exact = f as f64 * 100.0 / c.total as f64;
                assert!((c.for_percentage as f64 - exact).abs() <= 0.5 + 1e-9);
                let exact = a as f64 * 100.0 / c.total as f64;
                assert!((c.against_percentage as f64 - exact).abs() <= 0.5 + 1e-9);
            }
        })
}
