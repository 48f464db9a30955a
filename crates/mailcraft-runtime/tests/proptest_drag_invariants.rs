#![forbid(unsafe_code)]

//! Property tests for drop index arithmetic.
//!
//! Validates:
//! - `drop_index` is always within `[0, len]`.
//! - `drop_index` never decreases as the pointer moves down.
//! - A pointer inside item `i` (above its midpoint) resolves to slot `i`
//!   under both strategies.
//! - `move_to_slot` keeps every element, lands the block at
//!   `reorder_index`, and a slot past the source lands at `slot - 1`.

use proptest::prelude::*;

use mailcraft_core::VerticalSpan;
use mailcraft_runtime::drag::{IndexStrategy, drop_index, move_to_slot, reorder_index};

// ============================================================================
// Strategy helpers
// ============================================================================

fn strategy() -> impl Strategy<Value = IndexStrategy> {
    prop_oneof![Just(IndexStrategy::Edge), Just(IndexStrategy::Midpoint)]
}

fn layout() -> impl Strategy<Value = Vec<VerticalSpan>> {
    (
        prop::collection::vec(1.0f64..120.0, 0..20),
        0.0f64..16.0,
        -50.0f64..50.0,
    )
        .prop_map(|(heights, gap, origin)| VerticalSpan::stack(origin, &heights, gap))
}

// ============================================================================
// drop_index
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn index_is_within_bounds(
        spans in layout(),
        y in -500.0f64..3000.0,
        strategy in strategy(),
    ) {
        let index = drop_index(y, &spans, strategy);
        prop_assert!(index <= spans.len());
    }

    #[test]
    fn index_is_monotonic_in_pointer(
        spans in layout(),
        a in -500.0f64..3000.0,
        b in -500.0f64..3000.0,
        strategy in strategy(),
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(drop_index(lo, &spans, strategy) <= drop_index(hi, &spans, strategy));
    }

    #[test]
    fn pointer_in_upper_half_targets_that_item(
        spans in layout().prop_filter("non-empty", |s| !s.is_empty()),
        pick in any::<prop::sample::Index>(),
        strategy in strategy(),
    ) {
        let i = pick.index(spans.len());
        let span = spans[i];
        let y = span.top + span.height() * 0.25;
        prop_assert_eq!(drop_index(y, &spans, strategy), i);
    }

    #[test]
    fn pointer_below_everything_appends(spans in layout(), strategy in strategy()) {
        let below = spans.last().map_or(0.0, |s| s.bottom) + 1.0;
        prop_assert_eq!(drop_index(below, &spans, strategy), spans.len());
    }
}

// ============================================================================
// move_to_slot
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn move_preserves_elements(
        len in 1usize..16,
        from_pick in any::<prop::sample::Index>(),
        slot in prop::option::of(0usize..20),
    ) {
        let mut list: Vec<usize> = (0..len).collect();
        let from = from_pick.index(len);
        let to = move_to_slot(&mut list, from, slot).unwrap();

        prop_assert_eq!(list[to], from);
        let mut sorted = list.clone();
        sorted.sort_unstable();
        prop_assert_eq!(sorted, (0..len).collect::<Vec<_>>());

        let expected = slot.map_or(len - 1, |s| reorder_index(from, s.min(len)));
        prop_assert_eq!(to, expected);
    }

    #[test]
    fn slot_after_source_lands_one_earlier(
        len in 2usize..16,
        from_pick in any::<prop::sample::Index>(),
        slot_pick in any::<prop::sample::Index>(),
    ) {
        let from = from_pick.index(len - 1);
        // Any slot strictly after the source, up to `len`.
        let slot = from + 1 + slot_pick.index(len - from);
        let mut list: Vec<usize> = (0..len).collect();
        prop_assert_eq!(move_to_slot(&mut list, from, Some(slot)), Some(slot - 1));
    }

    #[test]
    fn out_of_range_source_is_rejected(len in 0usize..8, extra in 0usize..4) {
        let mut list: Vec<usize> = (0..len).collect();
        prop_assert_eq!(move_to_slot(&mut list, len + extra, Some(0)), None);
        prop_assert_eq!(list.len(), len);
    }
}
