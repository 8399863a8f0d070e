use crate::{
    api::{CommentId, Order, OrderType, ThreadOrder, Time},
    CommentNode,
};

pub trait OrderExt {
    fn sort(&self, nodes: &mut [CommentNode]);
}

fn by_date(n: &CommentNode) -> (Time, &CommentId) {
    (n.record.created_at, &n.record.id)
}

fn by_score(n: &CommentNode) -> (i64, Time, &CommentId) {
    (n.record.votes.score(), n.record.created_at, &n.record.id)
}

impl OrderExt for Order {
    /// Only sorts `nodes` itself, replies are left untouched
    fn sort(&self, nodes: &mut [CommentNode]) {
        match self {
            Order::CreatedAt(OrderType::Asc) => {
                nodes.sort_unstable_by(|a, b| by_date(a).cmp(&by_date(b)))
            }
            Order::CreatedAt(OrderType::Desc) => {
                nodes.sort_unstable_by(|a, b| by_date(b).cmp(&by_date(a)))
            }
            Order::Score(OrderType::Asc) => {
                nodes.sort_unstable_by(|a, b| by_score(a).cmp(&by_score(b)))
            }
            Order::Score(OrderType::Desc) => {
                nodes.sort_unstable_by(|a, b| by_score(b).cmp(&by_score(a)))
            }
        }
    }
}

pub trait ThreadOrderExt {
    fn apply(&self, forest: &mut [CommentNode]);
}

impl ThreadOrderExt for ThreadOrder {
    fn apply(&self, forest: &mut [CommentNode]) {
        self.top_level.sort(forest);
        let mut stack = forest.iter_mut().collect::<Vec<_>>();
        while let Some(node) = stack.pop() {
            self.replies.sort(&mut node.replies);
            stack.extend(node.replies.iter_mut());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_tree, testing::record_at};

    fn ids(nodes: &[CommentNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.id().as_str()).collect()
    }

    #[test]
    fn default_thread_order() {
        let mut forest = build_tree(vec![
            record_at("old", None, true, 0),
            record_at("new", None, true, 10),
            record_at("late-reply", Some("old"), true, 30),
            record_at("early-reply", Some("old"), true, 5),
            record_at("nested-b", Some("early-reply"), true, 9),
            record_at("nested-a", Some("early-reply"), true, 8),
        ]);
        ThreadOrder::default().apply(&mut forest);
        assert_eq!(ids(&forest), vec!["new", "old"]);
        assert_eq!(ids(&forest[1].replies), vec!["early-reply", "late-reply"]);
        assert_eq!(
            ids(&forest[1].replies[0].replies),
            vec!["nested-a", "nested-b"]
        );
    }

    #[test]
    fn score_order_breaks_ties_by_date() {
        let mut low = record_at("low", None, true, 0);
        low.votes.downvotes = 2;
        let mut high = record_at("high", None, true, 1);
        high.votes.upvotes = 5;
        let tie_old = record_at("tie-old", None, true, 2);
        let tie_new = record_at("tie-new", None, true, 3);
        let mut forest = build_tree(vec![tie_new, low, tie_old, high]);
        Order::Score(OrderType::Desc).sort(&mut forest);
        assert_eq!(ids(&forest), vec!["high", "tie-new", "tie-old", "low"]);
        Order::Score(OrderType::Asc).sort(&mut forest);
        assert_eq!(ids(&forest), vec!["low", "tie-old", "tie-new", "high"]);
    }

    #[test]
    fn same_time_falls_back_to_id() {
        let mut forest = build_tree(vec![
            record_at("b", None, true, 0),
            record_at("a", None, true, 0),
        ]);
        Order::CreatedAt(OrderType::Asc).sort(&mut forest);
        assert_eq!(ids(&forest), vec!["a", "b"]);
    }
}
