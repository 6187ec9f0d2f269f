use crate::analyze::DatePair;

impl DatePair {
    /// Earliest start, latest end; an open end beats any closing date.
    pub fn merge(self, other: DatePair) -> DatePair {
        DatePair::new(self.start.min(other.start), self.end.max(other.end))
    }
}

/// Collapses every observation of one student+lab into a single range.
pub fn merge(pairs: &[DatePair]) -> Option<DatePair> {
    pairs.iter().copied().reduce(DatePair::merge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::LabEnd;
    use chrono::NaiveDate;
    use itertools::Itertools;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, month, day).unwrap()
    }

    fn closed(start: (u32, u32), end: (u32, u32)) -> DatePair {
        DatePair::new(date(start.0, start.1), LabEnd::Closed(date(end.0, end.1)))
    }

    fn open(start: (u32, u32)) -> DatePair {
        DatePair::new(date(start.0, start.1), LabEnd::Open)
    }

    #[test]
    fn empty_has_no_range() {
        assert_eq!(merge(&[]), None);
    }

    #[test]
    fn singleton_is_unchanged() {
        for pair in [closed((3, 1), (3, 5)), open((4, 2))] {
            assert_eq!(merge(&[pair]), Some(pair));
        }
    }

    #[test]
    fn earliest_start_latest_end() {
        let pairs = [closed((3, 10), (3, 12)), closed((3, 1), (3, 5)), closed((2, 20), (3, 2))];
        assert_eq!(merge(&pairs), Some(closed((2, 20), (3, 12))));
    }

    #[test]
    fn open_end_dominates() {
        let pairs = [closed((3, 1), (3, 5)), open((3, 10)), closed((3, 11), (4, 30))];
        assert_eq!(merge(&pairs), Some(open((3, 1))));
    }

    #[test]
    fn result_does_not_depend_on_order() {
        let pairs = vec![
            closed((3, 1), (3, 5)),
            open((3, 10)),
            closed((2, 27), (3, 3)),
            closed((3, 12), (4, 1)),
        ];
        let expected = merge(&pairs);
        for permutation in pairs.iter().copied().permutations(pairs.len()) {
            assert_eq!(merge(&permutation), expected);
        }

        let closed_only = pairs
            .iter()
            .copied()
            .filter(|pair| pair.end != LabEnd::Open)
            .collect::<Vec<_>>();
        let expected = merge(&closed_only);
        assert_eq!(expected, Some(closed((2, 27), (4, 1))));
        for permutation in closed_only.iter().copied().permutations(closed_only.len()) {
            assert_eq!(merge(&permutation), expected);
        }
    }
}
