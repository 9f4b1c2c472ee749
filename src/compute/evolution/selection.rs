//! Rank-based parent selection.

use crate::error::OperatorError;
use crate::schema::Chromosome;

/// Population indices ordered by ascending score.
///
/// The sort is stable, so equal scores keep their population order.
pub fn rank(scores: &[u64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by_key(|&i| scores[i]);
    order
}

/// Pick the two lowest-scoring chromosomes as parents.
///
/// The first parent's score is never greater than the second's, and neither
/// is greater than any chromosome left out.
pub fn select_parents<'a>(
    population: &'a [Chromosome],
    scores: &[u64],
) -> Result<(&'a Chromosome, &'a Chromosome), OperatorError> {
    if population.len() != scores.len() {
        return Err(OperatorError::ScoreCountMismatch {
            population: population.len(),
            scores: scores.len(),
        });
    }
    match rank(scores).as_slice() {
        [first, second, ..] => Ok((&population[*first], &population[*second])),
        _ => Err(OperatorError::PopulationTooSmall(population.len())),
    }
}
