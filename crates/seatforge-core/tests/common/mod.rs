#![allow(dead_code)]

use seatforge_core::config::SeedParams;
use seatforge_core::seeding::start_seating;
use seatforge_core::SeatingState;

pub fn seeded(persons: usize, meals: usize, tables: usize, groups: usize, seed: u64) -> SeatingState {
    let params = SeedParams {
        persons,
        meals,
        tables,
        groups,
    };
    let mut rng = fastrand::Rng::with_seed(seed);
    start_seating(&params, &mut rng).expect("seeding never fails for these shapes")
}

/// Four people over three meals and two weighted clubs, Bea pinned at breakfast.
pub const FOUR_FRIENDS: &str = "\
# Breakfast

*Bea
Ari

Cal
Dot

# Lunch

Ari
Cal

Bea
Dot

# Dinner

Ari
Dot

Bea
Cal

# Chess (17)

Ari
Bea

# Choir (42)

Cal
Dot
Ari
";
