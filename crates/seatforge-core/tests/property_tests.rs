mod common;

use common::seeded;
use proptest::prelude::*;
use seatforge_core::matrix::Matrix;
use seatforge_core::{EnergyKind, GroupDimension, SeatingState};

// --- STRATEGIES ---

prop_compose! {
    fn arb_state()(
        persons in 2usize..12,
        meals in 1usize..4,
        tables in 2usize..4,
        groups in 0usize..3,
        seed in any::<u64>(),
    ) -> SeatingState {
        let mut s = seeded(persons, meals, tables, groups, seed);
        s.shuffle(&mut fastrand::Rng::with_seed(seed));
        s
    }
}

prop_compose! {
    fn arb_pinned_state()(
        base in arb_state(),
        pin_seed in any::<u64>(),
    ) -> SeatingState {
        let mut rng = fastrand::Rng::with_seed(pin_seed);
        let mut fixed = Matrix::<bool>::zeros(base.persons(), base.columns());
        for p in 0..base.persons() {
            for c in 0..base.columns() {
                if base.seating().get(p, c) == 1 && rng.u8(0..4) == 0 {
                    fixed.set(p, c, true);
                }
            }
        }
        SeatingState::new(
            base.names().to_vec(),
            base.dimensions().to_vec(),
            base.seating().clone(),
            Some(fixed),
        ).unwrap()
    }
}

fn exclusive_row_sums(state: &SeatingState) -> Vec<Vec<u32>> {
    let ranges: Vec<_> = state.exclusive_dimensions().map(GroupDimension::range).collect();
    (0..state.persons())
        .map(|p| {
            ranges
                .iter()
                .map(|r| state.seating().row(p)[r.clone()].iter().map(|&v| v as u32).sum())
                .collect()
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn swap_is_an_involution(
        state in arb_state(),
        dim_pick in any::<prop::sample::Index>(),
        a in 0usize..12,
        b in 0usize..12,
    ) {
        let dims: Vec<_> = state.dimensions().to_vec();
        let range = dim_pick.get(&dims).range();
        let mut s = state.clone();
        if s.swap(range.clone(), a, b) {
            prop_assert!(s.swap(range, a, b));
        }
        prop_assert_eq!(s.seating(), state.seating());
        prop_assert_eq!(s.geometry(), state.geometry());
    }

    #[test]
    fn pinned_cells_survive_any_swap_sequence(
        state in arb_pinned_state(),
        moves in proptest::collection::vec((any::<prop::sample::Index>(), 0usize..12, 0usize..12), 1..40),
    ) {
        let dims: Vec<_> = state.dimensions().to_vec();
        let mut s = state.clone();
        for (pick, a, b) in moves {
            s.swap(pick.get(&dims).range(), a, b);
        }
        for p in 0..s.persons() {
            for c in 0..s.columns() {
                if s.fixed().get(p, c) {
                    prop_assert_eq!(s.seating().get(p, c), state.seating().get(p, c));
                }
            }
        }
    }

    #[test]
    fn swaps_preserve_seat_counts(
        state in arb_state(),
        moves in proptest::collection::vec((any::<prop::sample::Index>(), 0usize..12, 0usize..12), 1..40),
    ) {
        let dims: Vec<_> = state.exclusive_dimensions().cloned().collect();
        prop_assume!(!dims.is_empty());
        let before = exclusive_row_sums(&state);
        let mut s = state.clone();
        for (pick, a, b) in moves {
            s.swap(pick.get(&dims).range(), a, b);
        }
        prop_assert_eq!(exclusive_row_sums(&s), before);
        prop_assert_eq!(s.geometry(), &s.seating().transpose());
    }

    #[test]
    fn closeness_is_symmetric_with_zero_diagonal(state in arb_state()) {
        let n = state.closeness();
        for i in 0..state.persons() {
            prop_assert_eq!(n.get(i, i), 0);
            for j in 0..state.persons() {
                prop_assert_eq!(n.get(i, j), n.get(j, i));
            }
        }
    }

    #[test]
    fn energy_is_zero_iff_no_repeats(state in arb_state()) {
        let repeats = state.closeness().as_slice().iter().any(|&v| v > 1);
        for kind in [EnergyKind::Square, EnergyKind::SumOfSquares] {
            let e = kind.evaluate(&state);
            prop_assert_eq!(e == 0, !repeats);
        }
    }
}
