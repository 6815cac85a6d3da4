//! Aggregation of the standardized values into a ranking index, and the final ordering.

use log::{debug, info};

use crate::config::*;
use crate::descriptive;
use crate::matrix::{check_labels, StandardizedMatrix};

/// The mean of the standardized values of each observation, in observation order.
pub fn observation_means(matrix: &StandardizedMatrix) -> Vec<f64> {
    let n = matrix.variable_count() as f64;
    (0..matrix.observation_count())
        .map(|i| matrix.row(i).iter().sum::<f64>() / n)
        .collect()
}

/// Min-max normalization of the observation means into [0, 1].
///
/// The observation with the smallest mean gets 0, the one with the largest mean gets 1.
/// If all the means are equal, the index is undefined and `ConstantRanking` is returned.
/// Means or a spread that are not finite give `NonFiniteScore`.
///
/// ```
/// use linear_ordering::ranking::ranking_indices;
/// assert_eq!(ranking_indices(&[-1.0, 0.0, 3.0])?, vec![0.0, 0.25, 1.0]);
/// # Ok::<(), linear_ordering::RankingErrors>(())
/// ```
pub fn ranking_indices(means: &[f64]) -> Result<Vec<f64>, RankingErrors> {
    if means.iter().any(|m| !m.is_finite()) {
        return Err(RankingErrors::NonFiniteScore);
    }
    let lo = descriptive::minimum(means).ok_or(RankingErrors::EmptyDataset)?;
    let hi = descriptive::maximum(means).ok_or(RankingErrors::EmptyDataset)?;
    let range = hi - lo;
    if !range.is_finite() {
        return Err(RankingErrors::NonFiniteScore);
    }
    if range == 0.0 {
        return Err(RankingErrors::ConstantRanking);
    }
    debug!("ranking_indices: min: {} max: {}", lo, hi);
    Ok(means.iter().map(|m| (m - lo) / range).collect())
}

/// Scores all the observations of a standardized matrix, in input order.
pub fn score_observations(
    matrix: &StandardizedMatrix,
    labels: &[String],
) -> Result<Vec<ObservationScore>, RankingErrors> {
    check_labels("observation", matrix.observation_count(), labels)?;
    let means = observation_means(matrix);
    let indices = ranking_indices(&means)?;
    let scores: Vec<ObservationScore> = labels
        .iter()
        .zip(means)
        .zip(indices)
        .map(|((label, raw_mean), ranking_index)| ObservationScore {
            label: label.clone(),
            raw_mean,
            ranking_index,
        })
        .collect();
    for s in scores.iter() {
        debug!(
            "score_observations: {}: mean {} index {}",
            s.label, s.raw_mean, s.ranking_index
        );
    }
    Ok(scores)
}

/// Orders the scores from the best (highest index) to the worst.
///
/// The sort is stable: observations with exactly the same index keep their input order.
/// Positions start at 1.
pub fn rank(scores: &[ObservationScore]) -> Vec<RankedObservation> {
    let mut sorted: Vec<(usize, &ObservationScore)> = scores.iter().enumerate().collect();
    sorted.sort_by(|(_, a), (_, b)| b.ranking_index.total_cmp(&a.ranking_index));
    info!("rank: ordered {} observations", sorted.len());
    sorted
        .into_iter()
        .enumerate()
        .map(|(idx, (observation, s))| RankedObservation {
            position: idx + 1,
            ranking_index: s.ranking_index,
            label: s.label.clone(),
            observation,
        })
        .collect()
}
