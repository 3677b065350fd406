use crate::config::SeedParams;
use crate::error::SfResult;
use crate::matrix::Matrix;
use crate::model::{GroupDimension, SeatingState};
use fastrand::Rng;

/// Builds a naive starting seating: every meal seats person `p` at table
/// `p / per_table`, and membership bits are random except that person 0
/// joins every group so none is empty.
pub fn start_seating(params: &SeedParams, rng: &mut Rng) -> SfResult<SeatingState> {
    let SeedParams {
        persons,
        meals,
        tables,
        groups,
    } = *params;

    let names: Vec<String> = (0..persons).map(|i| format!("Person #{:03}", i)).collect();

    let mut dimensions = Vec::with_capacity(meals + groups);
    for m in 0..meals {
        dimensions.push(GroupDimension::new(
            format!("Meal #{}", m),
            m * tables,
            (m + 1) * tables,
            1,
        ));
    }
    let group_base = meals * tables;
    for g in 0..groups {
        dimensions.push(GroupDimension::new(
            format!("Group #{}", g),
            group_base + g,
            group_base + g + 1,
            2 + g as u32,
        ));
    }

    let mut seating = Matrix::<u8>::zeros(persons, group_base + groups);

    for p in 0..persons {
        for g in 0..groups {
            if p == 0 || rng.bool() {
                seating.set(p, group_base + g, 1);
            }
        }
    }

    if tables > 0 {
        let per_table = (persons / tables).max(1);
        for m in 0..meals {
            for p in 0..persons {
                let table = (p / per_table).min(tables - 1);
                seating.set(p, m * tables + table, 1);
            }
        }
    }

    SeatingState::new(names, dimensions, seating, None)
}
