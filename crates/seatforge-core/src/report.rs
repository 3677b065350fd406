use crate::error::SfResult;
use crate::matrix::Matrix;
use crate::model::SeatingState;
use itertools::Itertools;
use serde::Serialize;
use std::fmt::Write as _;
use std::io::Write;

/// Slot-by-slot listing of occupant indices.
pub fn dump(state: &SeatingState) -> String {
    let mut out = String::new();
    for dim in state.dimensions() {
        let _ = writeln!(out, "# {}", dim.name);
        for column in dim.range() {
            let _ = writeln!(out, "   {:?}", state.occupants(column));
        }
    }
    out
}

/// For every table of every meal, how many members of each group sit there.
pub fn report(state: &SeatingState) -> String {
    let seating = state.seating();
    let geometry = state.geometry();
    let attendance = |table: usize, group: usize| -> u32 {
        geometry
            .row(table)
            .iter()
            .enumerate()
            .map(|(p, &v)| v as u32 * seating.get(p, group) as u32)
            .sum()
    };

    let groups: Vec<_> = state.membership_dimensions().collect();
    let mut out = String::new();
    for meal in state.exclusive_dimensions() {
        let _ = writeln!(out, "{}", meal.name);
        for (idx, table) in meal.range().enumerate() {
            let _ = writeln!(out, "  {}", idx);
            for group in &groups {
                let n = attendance(table, group.start);
                if n > 0 {
                    let _ = writeln!(out, "    {}: {}", group.name, n);
                }
            }
        }
    }
    out
}

/// Number of occupants per column.
pub fn persons_at_each_slot(state: &SeatingState) -> Vec<u32> {
    (0..state.columns())
        .map(|c| state.geometry().row(c).iter().map(|&v| v as u32).sum())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairStat {
    pub pair: String,
    pub meal_closeness: u32,
    pub group_closeness: u32,
}

/// Pairs that share more than one table, worst first. Closeness is split
/// into the part earned at meals and the part earned through groups.
pub fn pair_stats(state: &SeatingState) -> Vec<PairStat> {
    let meal_columns: Vec<bool> = state
        .dimensions()
        .iter()
        .flat_map(|d| std::iter::repeat(d.is_exclusive()).take(d.len()))
        .collect();

    let meal = masked_closeness(state, &meal_columns, true);
    let group = masked_closeness(state, &meal_columns, false);

    (0..state.persons())
        .tuple_combinations()
        .map(|(i, j)| PairStat {
            pair: format!("{}-{}", state.name(i), state.name(j)),
            meal_closeness: meal.get(i, j),
            group_closeness: group.get(i, j),
        })
        .filter(|s| s.meal_closeness > 1)
        .sorted_by(|a, b| b.meal_closeness.cmp(&a.meal_closeness))
        .collect()
}

fn masked_closeness(state: &SeatingState, meal_columns: &[bool], keep_meals: bool) -> Matrix<u32> {
    let weights: Vec<u32> = state
        .weight_row()
        .iter()
        .zip(meal_columns)
        .map(|(&w, &is_meal)| if is_meal == keep_meals { w } else { 0 })
        .collect();
    let mut m = state.seating().weighted_product(&weights, state.geometry());
    m.zero_diagonal();
    m
}

pub fn write_pair_stats_csv<W: Write>(stats: &[PairStat], writer: W) -> SfResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for s in stats {
        wtr.serialize(s)?;
    }
    wtr.flush()?;
    Ok(())
}

/// People `person` meets more than once, with the closeness to each.
pub fn repeat_partners(state: &SeatingState, person: usize) -> Vec<(usize, u32)> {
    state
        .closeness()
        .row(person)
        .iter()
        .enumerate()
        .filter(|(_, &v)| v > 1)
        .map(|(p, &v)| (p, v))
        .sorted_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)))
        .collect()
}
