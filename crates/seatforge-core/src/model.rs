use crate::closeness;
use crate::error::{SeatingError, SfResult};
use crate::matrix::Matrix;
use fastrand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::sync::{Arc, OnceLock};

/// A named, weighted run of contiguous columns `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDimension {
    pub name: String,
    pub start: usize,
    pub end: usize,
    pub weight: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionKind {
    /// Several slots, a person occupies at most one (tables of a meal).
    Exclusive,
    /// A single column flagging membership (an affinity group).
    Membership,
}

impl GroupDimension {
    pub fn new(name: impl Into<String>, start: usize, end: usize, weight: u32) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            weight,
        }
    }

    #[inline(always)]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn kind(&self) -> DimensionKind {
        if self.len() > 1 {
            DimensionKind::Exclusive
        } else {
            DimensionKind::Membership
        }
    }

    pub fn is_exclusive(&self) -> bool {
        self.kind() == DimensionKind::Exclusive
    }
}

/// Who sits where.
///
/// `seating` is persons × columns, `geometry` is its transpose and is kept in
/// lockstep by every mutation. Names, dimensions, weights and the fixed mask
/// never change after construction and are shared between copies.
#[derive(Debug)]
pub struct SeatingState {
    names: Arc<Vec<String>>,
    dimensions: Arc<Vec<GroupDimension>>,
    weights: Arc<Vec<u32>>,
    fixed: Arc<Matrix<bool>>,
    seating: Matrix<u8>,
    geometry: Matrix<u8>,
    closeness: OnceLock<Matrix<u32>>,
}

// Copies start with an empty closeness cache: they are almost always
// about to be swapped.
impl Clone for SeatingState {
    fn clone(&self) -> Self {
        Self {
            names: Arc::clone(&self.names),
            dimensions: Arc::clone(&self.dimensions),
            weights: Arc::clone(&self.weights),
            fixed: Arc::clone(&self.fixed),
            seating: self.seating.clone(),
            geometry: self.geometry.clone(),
            closeness: OnceLock::new(),
        }
    }
}

impl PartialEq for SeatingState {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names
            && self.dimensions == other.dimensions
            && self.weights == other.weights
            && self.fixed == other.fixed
            && self.seating == other.seating
            && self.geometry == other.geometry
    }
}

impl Eq for SeatingState {}

impl SeatingState {
    /// Builds a state with a geometry derived from `seating` and the weight
    /// row broadcast from the dimensions.
    pub fn new(
        names: Vec<String>,
        dimensions: Vec<GroupDimension>,
        seating: Matrix<u8>,
        fixed: Option<Matrix<bool>>,
    ) -> SfResult<Self> {
        let geometry = seating.transpose();
        let weights = broadcast_weights(&dimensions);
        let fixed = fixed.unwrap_or_else(|| Matrix::zeros(seating.rows(), seating.cols()));
        Self::from_parts(names, dimensions, weights, seating, fixed, geometry)
    }

    /// Assembles a state from every stored field and checks the invariants
    /// that the search relies on.
    pub fn from_parts(
        names: Vec<String>,
        dimensions: Vec<GroupDimension>,
        weights: Vec<u32>,
        seating: Matrix<u8>,
        fixed: Matrix<bool>,
        geometry: Matrix<u8>,
    ) -> SfResult<Self> {
        let persons = seating.rows();
        let columns = seating.cols();

        if names.len() != persons {
            return Err(invalid(format!(
                "{} names for {} persons",
                names.len(),
                persons
            )));
        }
        if fixed.rows() != persons || fixed.cols() != columns {
            return Err(invalid(format!(
                "fixed mask is {}x{}, seating is {}x{}",
                fixed.rows(),
                fixed.cols(),
                persons,
                columns
            )));
        }
        if geometry.rows() != columns || geometry.cols() != persons {
            return Err(invalid(format!(
                "geometry is {}x{}, expected {}x{}",
                geometry.rows(),
                geometry.cols(),
                columns,
                persons
            )));
        }
        if weights.len() != columns {
            return Err(invalid(format!(
                "{} column weights for {} columns",
                weights.len(),
                columns
            )));
        }

        let mut next = 0;
        for dim in &dimensions {
            if dim.start != next || dim.is_empty() {
                return Err(invalid(format!(
                    "dimension '{}' covers [{}, {}), expected to start at {}",
                    dim.name, dim.start, dim.end, next
                )));
            }
            if dim.weight == 0 {
                return Err(invalid(format!("dimension '{}' has weight 0", dim.name)));
            }
            if weights[dim.range()].iter().any(|&w| w != dim.weight) {
                return Err(invalid(format!(
                    "column weights of '{}' disagree with its weight {}",
                    dim.name, dim.weight
                )));
            }
            next = dim.end;
        }
        if next != columns {
            return Err(invalid(format!(
                "dimensions cover {} of {} columns",
                next, columns
            )));
        }
        // A pair meets at most once per dimension, so this bounds every
        // closeness entry.
        let reach = dimensions
            .iter()
            .try_fold(0u32, |acc, d| acc.checked_add(d.weight));
        if reach.is_none() {
            return Err(invalid(format!("dimension weights sum past {}", u32::MAX)));
        }

        for p in 0..persons {
            for c in 0..columns {
                let v = seating.get(p, c);
                if v > 1 {
                    return Err(invalid(format!("seating[{}][{}] = {}", p, c, v)));
                }
                if geometry.get(c, p) != v {
                    return Err(invalid(format!(
                        "geometry[{}][{}] disagrees with seating[{}][{}]",
                        c, p, p, c
                    )));
                }
                if fixed.get(p, c) && v == 0 {
                    return Err(invalid(format!(
                        "'{}' is pinned to an empty slot in column {}",
                        names[p], c
                    )));
                }
            }
            for dim in dimensions.iter().filter(|d| d.is_exclusive()) {
                let seats: u32 = seating.row(p)[dim.range()].iter().map(|&v| v as u32).sum();
                if seats > 1 {
                    return Err(invalid(format!(
                        "'{}' occupies {} slots in '{}'",
                        names[p], seats, dim.name
                    )));
                }
            }
        }

        Ok(Self {
            names: Arc::new(names),
            dimensions: Arc::new(dimensions),
            weights: Arc::new(weights),
            fixed: Arc::new(fixed),
            seating,
            geometry,
            closeness: OnceLock::new(),
        })
    }

    #[inline(always)]
    pub fn persons(&self) -> usize {
        self.seating.rows()
    }

    #[inline(always)]
    pub fn columns(&self) -> usize {
        self.seating.cols()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name(&self, person: usize) -> &str {
        &self.names[person]
    }

    pub fn person_index(&self, name: &str) -> SfResult<usize> {
        self.names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| SeatingError::UnknownPerson(name.to_string()))
    }

    pub fn dimensions(&self) -> &[GroupDimension] {
        &self.dimensions
    }

    pub fn exclusive_dimensions(&self) -> impl Iterator<Item = &GroupDimension> {
        self.dimensions.iter().filter(|d| d.is_exclusive())
    }

    pub fn membership_dimensions(&self) -> impl Iterator<Item = &GroupDimension> {
        self.dimensions.iter().filter(|d| !d.is_exclusive())
    }

    pub fn weight_row(&self) -> &[u32] {
        &self.weights
    }

    pub fn seating(&self) -> &Matrix<u8> {
        &self.seating
    }

    pub fn geometry(&self) -> &Matrix<u8> {
        &self.geometry
    }

    pub fn fixed(&self) -> &Matrix<bool> {
        &self.fixed
    }

    /// Occupants of a single column, in person order.
    pub fn occupants(&self, column: usize) -> Vec<usize> {
        self.geometry
            .row(column)
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == 1)
            .map(|(p, _)| p)
            .collect()
    }

    /// Weighted co-occurrence matrix, computed on first use after a mutation.
    pub fn closeness(&self) -> &Matrix<u32> {
        self.closeness.get_or_init(|| closeness::compute(self))
    }

    fn invalidate_closeness(&mut self) {
        self.closeness.take();
    }

    /// Exchanges the slices of persons `a` and `b` over `range`.
    ///
    /// Refused (returning `false` with nothing touched) when either person is
    /// absent from the range or holds a pinned seat inside it.
    pub fn swap(&mut self, range: Range<usize>, a: usize, b: usize) -> bool {
        if range.start >= range.end || range.end > self.columns() {
            return false;
        }
        if !self.is_movable(range.clone(), a) || !self.is_movable(range.clone(), b) {
            return false;
        }

        self.seating.swap_row_segments(a, b, range.clone());
        self.geometry.swap_column_segments(a, b, range);
        self.invalidate_closeness();
        true
    }

    /// Whether `person` sits somewhere in `range` without a pinned seat there.
    pub fn is_movable(&self, range: Range<usize>, person: usize) -> bool {
        if person >= self.persons() {
            return false;
        }
        let seats = &self.seating.row(person)[range.clone()];
        let pins = &self.fixed.row(person)[range];
        let present = seats.iter().any(|&v| v != 0);
        let pinned = seats.iter().zip(pins).any(|(&v, &f)| v != 0 && f);
        present && !pinned
    }

    /// One pass of random pairwise swaps per exclusive dimension. Refused
    /// swaps are skipped.
    pub fn shuffle(&mut self, rng: &mut Rng) {
        let persons = self.persons();
        if persons == 0 {
            return;
        }
        let ranges: Vec<Range<usize>> = self.exclusive_dimensions().map(|d| d.range()).collect();
        for range in ranges {
            for a in 0..persons {
                let b = rng.usize(0..persons);
                self.swap(range.clone(), a, b);
            }
        }
    }
}

fn invalid(msg: String) -> SeatingError {
    SeatingError::Validation(msg)
}

pub(crate) fn broadcast_weights(dimensions: &[GroupDimension]) -> Vec<u32> {
    dimensions
        .iter()
        .flat_map(|d| std::iter::repeat(d.weight).take(d.len()))
        .collect()
}
