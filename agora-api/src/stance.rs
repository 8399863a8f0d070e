use std::ops::Add;

/// For/against tally over a set of comments
///
/// `for_count + against_count == total` always holds. Each percentage is
/// rounded on its own, so the two need not add up to 100.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct StanceCounts {
    pub total: usize,
    pub for_count: usize,
    pub against_count: usize,
    pub for_percentage: u8,
    pub against_percentage: u8,
}

impl StanceCounts {
    pub fn new(for_count: usize, against_count: usize) -> StanceCounts {
        let total = for_count + against_count;
        StanceCounts {
            total,
            for_count,
            against_count,
            for_percentage: percentage(for_count, total),
            against_percentage: percentage(against_count, total),
        }
    }

    pub fn from_stances<I>(stances: I) -> StanceCounts
    where
        I: IntoIterator<Item = bool>,
    {
        let (for_count, against_count) =
            stances
                .into_iter()
                .fold((0, 0), |(f, a), stance| match stance {
                    true => (f + 1, a),
                    false => (f, a + 1),
                });
        StanceCounts::new(for_count, against_count)
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

impl Add for StanceCounts {
    type Output = Self;

    fn add(self, rhs: StanceCounts) -> StanceCounts {
        StanceCounts::new(
            self.for_count + rhs.for_count,
            self.against_count + rhs.against_count,
        )
    }
}

/// `round(count / total * 100)`, ties away from zero, `0` for an empty tally
fn percentage(count: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    // count <= total, so the result is at most 100
    ((200 * count as u128 + total as u128) / (2 * total as u128)) as u8
}
