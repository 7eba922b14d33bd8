//! Property-based invariant tests for the binning state machine and histogram engine.
//!
//! Verifies:
//! 1. Any key sequence keeps n_bins >= 1, left >= 0, left < right and the display clamp
//! 2. Edges always have n_bins + 1 strictly increasing entries
//! 3. Unmapped keys never change the state
//! 4. Four presses of x (or X) return to the starting increment
//! 5. Unweighted data counts equal the number of in-range values

use binscope_core::{recompute, BinningState, Key, Sample};
use proptest::prelude::*;

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_key() -> impl Strategy<Value = Key> {
    prop_oneof![
        Just(Key::FewerBins),
        Just(Key::MoreBins),
        Just(Key::LeftDown),
        Just(Key::LeftUp),
        Just(Key::RightDown),
        Just(Key::RightUp),
        Just(Key::IncrementDown),
        Just(Key::IncrementUp),
        Just(Key::Other),
    ]
}

fn arb_state() -> impl Strategy<Value = BinningState> {
    (1usize..200, 0.0f64..50.0, 0.001f64..50.0)
        .prop_map(|(n, left, span)| BinningState::new(n, left, left + span).unwrap())
}

fn arb_sample() -> impl Strategy<Value = Sample> {
    prop::collection::vec(-10.0f64..110.0, 0..300)
        .prop_map(|v| Sample::unweighted(v).unwrap())
}

proptest! {
    #[test]
    fn invariants_hold_after_every_key(
        start in arb_state(),
        keys in prop::collection::vec(arb_key(), 0..200),
        width in 1usize..300,
    ) {
        let mut s = start;
        for key in keys {
            s.apply(key, width);
            prop_assert!(s.n_bins() >= 1);
            prop_assert!(s.n_bins_display() >= 1);
            prop_assert!(s.left() >= 0.0);
            prop_assert!(!s.left().is_sign_negative());
            prop_assert!(s.left() < s.right());
            prop_assert!(s.n_bins_display() <= s.n_bins().max(width));
            if key != Key::Other {
                prop_assert!(s.n_bins_display() <= width);
            }
        }
    }

    #[test]
    fn edges_strictly_increase(state in arb_state(), sample in arb_sample()) {
        let snap = recompute(&state, &sample, &sample);
        prop_assert_eq!(snap.edges.len(), state.n_bins() + 1);
        prop_assert!(snap.edges.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(snap.edges[0], state.left());
        prop_assert_eq!(*snap.edges.last().unwrap(), state.right());
    }

    #[test]
    fn unmapped_key_is_identity(state in arb_state(), width in 1usize..300) {
        let mut s = state;
        s.clamp_display(width);
        let before = s;
        s.apply(Key::Other, width);
        prop_assert_eq!(s, before);
    }

    #[test]
    fn increment_cycles_in_four(state in arb_state(), up in any::<bool>()) {
        let mut s = state;
        let key = if up { Key::IncrementUp } else { Key::IncrementDown };
        let start = s.increment_index();
        for _ in 0..4 {
            s.apply(key, 100);
        }
        prop_assert_eq!(s.increment_index(), start);
    }

    #[test]
    fn unweighted_sum_counts_in_range(state in arb_state(), sample in arb_sample()) {
        let snap = recompute(&state, &sample, &Sample::default());
        let expected = sample
            .values()
            .iter()
            .filter(|&&v| v >= state.left() && v <= state.right())
            .count() as u64;
        prop_assert_eq!(snap.data_unweighted.iter().sum::<u64>(), expected);
    }
}
