// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! Property-based tests for the name codec, the ordered sequence and the
//! move planner.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use nmv::name;
use nmv::plan::plan;
use nmv::sequence::{Item, OrderedSequence, Tie};
use proptest::prelude::*;

// =============================================================================
// Test helpers
// =============================================================================

fn build(ordinals: &[u64]) -> OrderedSequence {
    return ordinals
        .iter()
        .enumerate()
        .map(|(i, &o)| Item::new(format!("_{}", i), o, 3))
        .collect();
}

fn arbitrary_tie() -> impl Strategy<Value = Tie> {
    return prop_oneof![Just(Tie::After), Just(Tie::Before)];
}

/// Resulting directory after a plan, applied as one batch.
fn settle(names: &[String], plan: &nmv::plan::Plan) -> BTreeSet<String> {
    let mut dir: BTreeSet<String> = names.iter().cloned().collect();
    for rename in &plan.renames {
        dir.remove(&rename.from);
    }
    for rename in &plan.renames {
        dir.insert(rename.to.clone());
    }
    return dir;
}

// =============================================================================
// Name codec
// =============================================================================

proptest! {
    #[test]
    fn render_then_parse(
        ordinal in any::<u64>(),
        extra in 0u32..5,
        rest in "[a-z_.][a-z0-9_.]{0,10}",
    ) {
        let width = name::digits(ordinal) + extra;
        let rendered = name::render(ordinal, width, &rest);
        let parsed = name::parse(&rendered).unwrap();

        prop_assert_eq!(parsed.ordinal, ordinal);
        prop_assert_eq!(parsed.width, width);
        prop_assert_eq!(&parsed.name, &rest);
        prop_assert_eq!(parsed.file_name(), rendered);
    }

    #[test]
    fn render_never_truncates(ordinal in any::<u64>(), width in 0u32..4) {
        let rendered = name::render(ordinal, width, "");
        prop_assert_eq!(rendered.len() as u32, width.max(name::digits(ordinal)));
    }
}

// =============================================================================
// Ordered sequence
// =============================================================================

proptest! {
    #[test]
    fn inserts_keep_order(
        ops in prop::collection::vec((0u64..50, arbitrary_tie()), 0..40),
    ) {
        let mut seq = OrderedSequence::new();
        for (i, (ordinal, tie)) in ops.iter().enumerate() {
            seq.insert_with(Item::new("_x", *ordinal, 2), false, *tie);

            let ordinals = seq.ordinals();
            prop_assert_eq!(ordinals.len(), i + 1);
            prop_assert!(ordinals.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn gap_round_trip_for_distinct(set in prop::collection::btree_set(0u64..10_000, 0..30)) {
        let ordinals: Vec<u64> = set.into_iter().collect();
        let mut seq = build(&ordinals);
        seq.compute_deltas();
        seq.compute_prefixes();
        prop_assert_eq!(seq.ordinals(), ordinals);
    }

    #[test]
    fn squash_into_free_slot_leaves_others(
        set in prop::collection::btree_set(0u64..200, 1..20),
        ordinal in 0u64..250,
        tie in arbitrary_tie(),
    ) {
        prop_assume!(!set.contains(&ordinal));
        let ordinals: Vec<u64> = set.iter().copied().collect();
        let mut seq = build(&ordinals);
        seq.compute_deltas();
        let total = seq.total_gap();

        let id = seq.insert_with(Item::new("_new", ordinal, 3), true, tie);

        // The new item carves its slot out of exactly one existing gap.
        if seq.next(id).is_some() {
            prop_assert_eq!(seq.total_gap(), total - 1);
        } else {
            let last = ordinals[ordinals.len() - 1];
            prop_assert_eq!(seq.get(id).gap_before, ordinal - last - 1);
        }

        seq.compute_prefixes();
        let mut expected = ordinals.clone();
        expected.push(ordinal);
        expected.sort();
        prop_assert_eq!(seq.ordinals(), expected);
        prop_assert_eq!(seq.get(id).ordinal, ordinal);
    }

    #[test]
    fn collision_before_lands_exactly(
        set in prop::collection::btree_set(0u64..100, 1..20),
        pick in any::<prop::sample::Index>(),
    ) {
        let ordinals: Vec<u64> = set.iter().copied().collect();
        let ordinal = ordinals[pick.index(ordinals.len())];
        let mut seq = build(&ordinals);
        seq.compute_deltas();

        let id = seq.insert_with(Item::new("_new", ordinal, 3), true, Tie::Before);
        seq.compute_prefixes();

        prop_assert_eq!(seq.get(id).ordinal, ordinal);
        let after = seq.ordinals();
        prop_assert!(after.windows(2).all(|w| w[0] < w[1]));

        // Everything else either stays put or moves up by one.
        for (i, &old) in ordinals.iter().enumerate() {
            let now = seq.get(seq.find(&format!("_{}", i)).unwrap()).ordinal;
            prop_assert!(now == old || now == old + 1, "{} -> {}", old, now);
        }
    }
}

// =============================================================================
// Move planner
// =============================================================================

proptest! {
    #[test]
    fn plan_lands_target_and_keeps_order(
        set in prop::collection::btree_set(0u64..60, 1..12),
        pick in any::<prop::sample::Index>(),
        new_ordinal in 0u64..80,
    ) {
        let names: Vec<String> = set
            .iter()
            .map(|&o| name::render(o, 2, &format!("_f{}", o)))
            .collect();
        let target = names[pick.index(names.len())].clone();

        let plan = plan(&names, &target, new_ordinal).unwrap();
        let dir = settle(&names, &plan);
        prop_assert_eq!(dir.len(), names.len());

        let mut finals: BTreeMap<String, u64> = BTreeMap::new();
        for file in &dir {
            let parsed = name::parse(file).unwrap();
            prop_assert_eq!(parsed.width, 2);
            finals.insert(parsed.name, parsed.ordinal);
        }

        let target_name = name::parse(&target).unwrap().name;
        prop_assert_eq!(finals[&target_name], new_ordinal);
        prop_assert_eq!(plan.target_ordinal, new_ordinal);

        // Files other than the target keep their relative order.
        let others: Vec<u64> = set
            .iter()
            .map(|&o| format!("_f{}", o))
            .filter(|n| *n != target_name)
            .map(|n| finals[&n])
            .collect();
        prop_assert!(others.windows(2).all(|w| w[0] < w[1]));

        let distinct: BTreeSet<u64> = finals.values().copied().collect();
        prop_assert_eq!(distinct.len(), finals.len());
    }

    #[test]
    fn plan_to_current_ordinal_is_noop(
        set in prop::collection::btree_set(0u64..60, 1..12),
        pick in any::<prop::sample::Index>(),
    ) {
        let ordinals: Vec<u64> = set.iter().copied().collect();
        let names: Vec<String> = ordinals
            .iter()
            .map(|&o| name::render(o, 2, &format!("_f{}", o)))
            .collect();
        let i = pick.index(names.len());

        let plan = plan(&names, &names[i], ordinals[i]).unwrap();
        prop_assert!(plan.is_empty());
    }
}
