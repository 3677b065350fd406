//! Plain-text seating plans.
//!
//! ```text
//! # Lunch
//!
//! *Alice
//! Bob
//!
//! Carol
//!
//! # Chess (3)
//!
//! Alice
//! Carol
//! ```
//!
//! `#` opens a group with an optional `(weight)`, blank lines separate
//! slots, and a leading `*` pins that person to the slot.

use crate::error::{SeatingError, SfResult};
use crate::matrix::Matrix;
use crate::model::{GroupDimension, SeatingState};
use fnv::FnvHashMap;
use regex::Regex;
use std::collections::BTreeSet;
use std::fmt::Write;
use std::path::Path;
use std::sync::LazyLock;

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#\s*(.*?)\s*(?:\((\d+)\))?\s*$").expect("header pattern is valid")
});

struct RawGroup {
    name: String,
    weight: u32,
    slots: Vec<Vec<(String, bool)>>,
}

pub fn read_text(content: &str) -> SfResult<SeatingState> {
    let mut groups: Vec<RawGroup> = Vec::new();
    let mut slot: Vec<(String, bool)> = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim_end();

        if line.starts_with('#') {
            if let Some(group) = groups.last_mut() {
                if !slot.is_empty() {
                    group.slots.push(std::mem::take(&mut slot));
                }
            }
            let caps = HEADER.captures(line).ok_or_else(|| SeatingError::Parse {
                line: line_no,
                message: format!("malformed group header '{}'", line),
            })?;
            let name = caps.get(1).map_or("", |m| m.as_str()).to_string();
            let weight = match caps.get(2) {
                Some(w) => w.as_str().parse::<u32>().map_err(|e| SeatingError::Parse {
                    line: line_no,
                    message: format!("bad weight: {}", e),
                })?,
                None => 1,
            };
            if weight == 0 {
                return Err(SeatingError::Parse {
                    line: line_no,
                    message: format!("group '{}' has weight 0", name),
                });
            }
            groups.push(RawGroup {
                name,
                weight,
                slots: Vec::new(),
            });
        } else if line.trim().is_empty() {
            if !slot.is_empty() {
                if let Some(group) = groups.last_mut() {
                    group.slots.push(std::mem::take(&mut slot));
                }
            }
        } else {
            if groups.is_empty() {
                return Err(SeatingError::Parse {
                    line: line_no,
                    message: "person listed before the first '#' header".to_string(),
                });
            }
            let trimmed = line.trim();
            let (name, fixed) = match trimmed.strip_prefix('*') {
                Some(rest) => (rest.trim(), true),
                None => (trimmed, false),
            };
            slot.push((name.to_string(), fixed));
        }
    }
    if let Some(group) = groups.last_mut() {
        if !slot.is_empty() {
            group.slots.push(slot);
        }
    }

    if groups.is_empty() {
        return Err(SeatingError::Parse {
            line: 0,
            message: "no groups found".to_string(),
        });
    }

    let names: Vec<String> = groups
        .iter()
        .flat_map(|g| g.slots.iter().flatten().map(|(n, _)| n.clone()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let index: FnvHashMap<&str, usize> = names
        .iter()
        .enumerate()
        .map(|(i, n)| (n.as_str(), i))
        .collect();

    let mut dimensions = Vec::with_capacity(groups.len());
    let mut cursor = 0;
    for g in &groups {
        if g.slots.is_empty() {
            return Err(SeatingError::Validation(format!(
                "group '{}' has no occupied slots",
                g.name
            )));
        }
        dimensions.push(GroupDimension::new(
            g.name.clone(),
            cursor,
            cursor + g.slots.len(),
            g.weight,
        ));
        cursor += g.slots.len();
    }

    let mut seating = Matrix::<u8>::zeros(names.len(), cursor);
    let mut fixed = Matrix::<bool>::zeros(names.len(), cursor);
    let mut column = 0;
    for g in &groups {
        for members in &g.slots {
            for (name, is_fixed) in members {
                let row = index[name.as_str()];
                seating.set(row, column, 1);
                fixed.set(row, column, *is_fixed);
            }
            column += 1;
        }
    }

    SeatingState::new(names, dimensions, seating, Some(fixed))
}

pub fn read_text_file<P: AsRef<Path>>(path: P) -> SfResult<SeatingState> {
    let content = std::fs::read_to_string(path)?;
    read_text(&content)
}

pub fn write_text(state: &SeatingState) -> String {
    let mut out = String::new();
    for dim in state.dimensions() {
        // Writing into a String cannot fail.
        if dim.weight > 1 {
            let _ = writeln!(out, "# {} ({})\n", dim.name, dim.weight);
        } else {
            let _ = writeln!(out, "# {}\n", dim.name);
        }
        for column in dim.range() {
            for p in state.occupants(column) {
                if state.fixed().get(p, column) {
                    out.push('*');
                }
                out.push_str(state.name(p));
                out.push('\n');
            }
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN: &str = "\
# Lunch

*Alice
Bob

Carol
Dave

# Chess (3)

Alice
Carol
";

    #[test]
    fn parses_groups_slots_and_pins() {
        let s = read_text(PLAN).unwrap();
        assert_eq!(s.names(), &["Alice", "Bob", "Carol", "Dave"]);
        assert_eq!(s.dimensions().len(), 2);
        assert_eq!(s.dimensions()[0].range(), 0..2);
        assert_eq!(s.dimensions()[1].range(), 2..3);
        assert_eq!(s.dimensions()[1].weight, 3);
        assert!(s.fixed().get(0, 0));
        assert!(!s.fixed().get(1, 0));
        assert_eq!(s.occupants(1), vec![2, 3]);
        assert_eq!(s.occupants(2), vec![0, 2]);
    }

    #[test]
    fn write_then_read_is_identity() {
        let s = read_text(PLAN).unwrap();
        let text = write_text(&s);
        assert!(text.starts_with("# Lunch\n\n*Alice\nBob\n\n"));
        assert!(text.contains("# Chess (3)\n"));
        assert_eq!(read_text(&text).unwrap(), s);
    }

    #[test]
    fn names_before_header_are_rejected() {
        let err = read_text("Alice\n# Lunch\nBob\n").unwrap_err();
        assert!(matches!(err, SeatingError::Parse { line: 1, .. }));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            read_text("\n\n").unwrap_err(),
            SeatingError::Parse { .. }
        ));
    }

    #[test]
    fn double_booking_within_a_meal_is_rejected() {
        let err = read_text("# Lunch\nAlice\n\nAlice\n").unwrap_err();
        assert!(matches!(err, SeatingError::Validation(_)));
    }

    #[test]
    fn weights_too_heavy_to_score_are_rejected() {
        let heavy = "# M\n\nA\n\nB\n\n# G (3000000000)\n\nA\nB\n\n# H (3000000000)\n\nA\nB\n";
        let err = read_text(heavy).unwrap_err();
        assert!(matches!(err, SeatingError::Validation(_)));
    }
}
