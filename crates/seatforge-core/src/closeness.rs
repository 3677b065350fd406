use crate::matrix::Matrix;
use crate::model::SeatingState;

/// Weighted co-occurrence of every pair of persons:
/// `(seating ⊙ weights) × geometry` with the diagonal cleared.
///
/// Position within a slot is ignored; sharing a column is all that counts.
/// Callers normally go through [`SeatingState::closeness`], which memoizes
/// this result until the next successful swap.
pub fn compute(state: &SeatingState) -> Matrix<u32> {
    let mut result = state
        .seating()
        .weighted_product(state.weight_row(), state.geometry());
    result.zero_diagonal();
    result
}

/// Persons whose row contains the largest closeness value anywhere in the
/// matrix, in ascending order.
pub fn most_exposed(closeness: &Matrix<u32>) -> Vec<usize> {
    let max = closeness.max();
    (0..closeness.rows())
        .filter(|&p| closeness.row(p).contains(&max))
        .collect()
}
