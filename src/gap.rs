// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! Gap Transform
//!
//! Converts an `OrderedSequence` between absolute ordinals and a
//! "gap before" form, where each item records how many free slots sit
//! between it and its predecessor:
//!
//! ```text
//! ordinals:  2  3  7
//! gaps:      2  0  3
//! ```
//!
//! Insertions reason about free space in gap form, then `compute_prefixes`
//! turns the gaps back into ordinals. For distinct ordinals the round trip
//! is exact.

use crate::sequence::OrderedSequence;

impl OrderedSequence {
    /// Overwrite every `gap_before` from the current ordinals.
    ///
    /// The first item's gap is its own ordinal. Ties and adjacent ordinals
    /// give a gap of zero.
    pub fn compute_deltas(&mut self) {
        let mut prev: Option<u64> = None;
        let mut current = self.first();
        while let Some(id) = current {
            let item = self.get_mut(id);
            item.gap_before = match prev {
                None => item.ordinal,
                Some(p) if item.ordinal > p => item.ordinal - p - 1,
                Some(_) => 0,
            };
            prev = Some(item.ordinal);
            current = self.next(id);
        }
    }

    /// Recompute every ordinal from the gaps, ignoring the old ordinals.
    pub fn compute_prefixes(&mut self) {
        let mut next_ordinal = 0u64;
        let mut current = self.first();
        while let Some(id) = current {
            let ordinal = next_ordinal.saturating_add(self.get(id).gap_before);
            self.set_ordinal(id, ordinal);
            next_ordinal = ordinal.saturating_add(1);
            current = self.next(id);
        }
    }

    /// Gaps in sequence order.
    pub fn gaps(&self) -> Vec<u64> {
        return self.iter().map(|(_, item)| item.gap_before).collect();
    }

    /// Total free slots below the last item.
    pub fn total_gap(&self) -> u64 {
        return self.iter().map(|(_, item)| item.gap_before).sum();
    }
}

#[cfg(test)]
mod tests {
    use crate::sequence::Item;
    use crate::sequence::OrderedSequence;

    fn build(ordinals: &[u64]) -> OrderedSequence {
        return ordinals
            .iter()
            .enumerate()
            .map(|(i, &o)| Item::new(format!("_{}", i), o, 1))
            .collect();
    }

    #[test]
    fn deltas_from_ordinals() {
        let mut seq = build(&[2, 3, 7]);
        seq.compute_deltas();
        assert_eq!(seq.gaps(), vec![2, 0, 3]);
        assert_eq!(seq.total_gap(), 5);
    }

    #[test]
    fn deltas_first_at_zero() {
        let mut seq = build(&[0, 1, 2]);
        seq.compute_deltas();
        assert_eq!(seq.gaps(), vec![0, 0, 0]);
    }

    #[test]
    fn deltas_with_ties() {
        let mut seq = build(&[4, 4, 6]);
        seq.compute_deltas();
        assert_eq!(seq.gaps(), vec![4, 0, 1]);
    }

    #[test]
    fn deltas_overwrite_stale_gaps() {
        let mut seq = build(&[1, 5]);
        let first = seq.first().unwrap();
        seq.get_mut(first).gap_before = 99;
        seq.compute_deltas();
        assert_eq!(seq.gaps(), vec![1, 3]);
    }

    #[test]
    fn prefixes_ignore_old_ordinals() {
        let mut seq = build(&[100, 200, 300]);
        let ids: Vec<_> = seq.iter().map(|(id, _)| id).collect();
        for (id, gap) in ids.into_iter().zip([0, 2, 0]) {
            seq.get_mut(id).gap_before = gap;
        }
        seq.compute_prefixes();
        assert_eq!(seq.ordinals(), vec![0, 3, 4]);
    }

    #[test]
    fn round_trip_distinct() {
        let mut seq = build(&[0, 3, 4, 10, 11, 50]);
        seq.compute_deltas();
        seq.compute_prefixes();
        assert_eq!(seq.ordinals(), vec![0, 3, 4, 10, 11, 50]);
    }

    #[test]
    fn prefixes_split_ties() {
        let mut seq = build(&[4, 4, 6]);
        seq.compute_deltas();
        seq.compute_prefixes();
        assert_eq!(seq.ordinals(), vec![4, 5, 7]);
    }

    #[test]
    fn prefixes_widen_sequence() {
        let mut seq = build(&[9, 9]);
        assert_eq!(seq.max_width(), 1);
        seq.compute_deltas();
        seq.compute_prefixes();
        assert_eq!(seq.ordinals(), vec![9, 10]);
        assert_eq!(seq.max_width(), 2);
    }
}
