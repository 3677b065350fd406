use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use seatforge_core::report::{persons_at_each_slot, PairStat};
use seatforge_core::{EnergyKind, SeatingState};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn summary(state: &SeatingState) {
    let closeness = state.closeness();
    let repeats = closeness.as_slice().iter().filter(|&&v| v > 1).count() / 2;
    let slot_sizes = persons_at_each_slot(state);
    let largest = slot_sizes.iter().max().copied().unwrap_or(0);

    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);
    let rows: Vec<(&str, String)> = vec![
        ("Persons", state.persons().to_string()),
        ("Meals", state.exclusive_dimensions().count().to_string()),
        ("Groups", state.membership_dimensions().count().to_string()),
        ("Largest slot", largest.to_string()),
        ("Max closeness", closeness.max().to_string()),
        ("Repeat pairs", repeats.to_string()),
        ("Energy (square)", EnergyKind::Square.evaluate(state).to_string()),
        (
            "Energy (sum-of-squares)",
            EnergyKind::SumOfSquares.evaluate(state).to_string(),
        ),
    ];
    for (name, value) in rows {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}", table);
}

pub fn pair_stats(stats: &[PairStat]) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Pair").add_attribute(Attribute::Bold),
        Cell::new("Meals").fg(Color::Red),
        Cell::new("Groups").fg(Color::Cyan),
    ]);
    for s in stats {
        table.add_row(vec![
            Cell::new(&s.pair),
            Cell::new(s.meal_closeness).set_alignment(CellAlignment::Right),
            Cell::new(s.group_closeness).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("\n{}", table);
}

pub fn partners(state: &SeatingState, person: usize, partners: &[(usize, u32)]) {
    println!("\nRepeat partners of {}:", state.name(person));
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Person").add_attribute(Attribute::Bold),
        Cell::new("Closeness").fg(Color::Red),
    ]);
    for &(other, closeness) in partners {
        table.add_row(vec![
            Cell::new(state.name(other)),
            Cell::new(closeness).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}", table);
}

pub fn attempts(initial: u64, energies: &[u64]) {
    let best = energies.iter().min().copied().unwrap_or(initial);
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Attempt").add_attribute(Attribute::Bold),
        Cell::new("Energy").fg(Color::Cyan),
        Cell::new("Gain").fg(Color::Green),
    ]);
    for (i, &energy) in energies.iter().enumerate() {
        let mut cell = Cell::new(energy).set_alignment(CellAlignment::Right);
        if energy == best {
            cell = cell.add_attribute(Attribute::Bold);
        }
        table.add_row(vec![
            Cell::new(i + 1),
            cell,
            Cell::new(initial.saturating_sub(energy)).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("Initial energy: {}\n{}", initial, table);
}
