use std::fmt::{self, Write};

use agora_client::{api::StanceCounts, CommentNode};

const EXCERPT_LEN: usize = 60;

pub fn summary(counts: &StanceCounts) -> String {
    format!(
        "{} comments: {} for ({}%), {} against ({}%)",
        counts.total,
        counts.for_count,
        counts.for_percentage,
        counts.against_count,
        counts.against_percentage,
    )
}

fn excerpt(text: &str) -> String {
    let line = text.lines().next().unwrap_or("");
    let mut res = line.chars().take(EXCERPT_LEN).collect::<String>();
    if line.chars().count() > EXCERPT_LEN {
        res.push('…');
    }
    res
}

/// One line per comment, replies indented below their parent
pub fn tree(out: &mut impl Write, forest: &[CommentNode]) -> fmt::Result {
    let mut stack = forest.iter().rev().map(|n| (n, 0)).collect::<Vec<_>>();
    while let Some((n, depth)) = stack.pop() {
        let stance = match n.record.stance {
            true => "for",
            false => "against",
        };
        writeln!(
            out,
            "{:indent$}[{stance}] {} ({:+}) {}",
            "",
            n.record.id,
            n.record.votes.score(),
            excerpt(&n.record.text),
            indent = 2 * depth,
        )?;
        stack.extend(n.replies.iter().rev().map(|r| (r, depth + 1)));
    }
    Ok(())
}
