//! Descriptive statistics of a single variable.
//!
//! All the functions work on one column of the matrix and are pure: the column is
//! never modified (the median sorts a copy).

use log::debug;

use crate::config::*;

/// The smallest value of the column, or `None` if it is empty.
pub fn minimum(column: &[f64]) -> Option<f64> {
    let (first, rest) = column.split_first()?;
    Some(rest.iter().fold(*first, |acc, &x| if x < acc { x } else { acc }))
}

/// The largest value of the column, or `None` if it is empty.
pub fn maximum(column: &[f64]) -> Option<f64> {
    let (first, rest) = column.split_first()?;
    Some(rest.iter().fold(*first, |acc, &x| if x > acc { x } else { acc }))
}

pub fn mean(column: &[f64]) -> Option<f64> {
    if column.is_empty() {
        return None;
    }
    let sum: f64 = column.iter().sum();
    Some(sum / column.len() as f64)
}

/// The median of the column.
///
/// For an even number of values, this is the average of the two central values.
///
/// ```
/// use linear_ordering::descriptive::median;
/// assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
/// assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
/// ```
pub fn median(column: &[f64]) -> Option<f64> {
    if column.is_empty() {
        return None;
    }
    let mut sorted = column.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid] + sorted[mid - 1]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Population standard deviation around the given mean (the divisor is the number of
/// values, not the number of values minus one).
pub fn standard_deviation(column: &[f64], mean: f64) -> Option<f64> {
    if column.is_empty() {
        return None;
    }
    let squares: f64 = column.iter().map(|x| (x - mean).powi(2)).sum();
    Some((squares / column.len() as f64).sqrt())
}

pub fn variance(standard_deviation: f64) -> f64 {
    standard_deviation.powi(2)
}

/// |sd / mean| in percent. Undefined (`None`) when the mean is zero.
pub fn coefficient_of_variation(mean: f64, standard_deviation: f64) -> Option<f64> {
    if mean == 0.0 {
        None
    } else {
        Some((standard_deviation / mean * 100.0).abs())
    }
}

impl VariableStats {
    /// Computes all the statistics of one variable.
    ///
    /// `name` is only used to report errors.
    pub fn compute(name: &str, column: &[f64]) -> Result<VariableStats, RankingErrors> {
        let minimum = minimum(column).ok_or(RankingErrors::EmptyDataset)?;
        let maximum = maximum(column).ok_or(RankingErrors::EmptyDataset)?;
        let mean = mean(column).ok_or(RankingErrors::EmptyDataset)?;
        let median = median(column).ok_or(RankingErrors::EmptyDataset)?;
        let standard_deviation =
            standard_deviation(column, mean).ok_or(RankingErrors::EmptyDataset)?;
        let coefficient_of_variation = coefficient_of_variation(mean, standard_deviation)
            .ok_or_else(|| RankingErrors::ZeroMean {
                variable: name.to_string(),
            })?;
        let stats = VariableStats {
            minimum,
            maximum,
            mean,
            median,
            standard_deviation,
            variance: variance(standard_deviation),
            coefficient_of_variation,
        };
        // The inputs are finite, but sums and squares can overflow.
        let computed = [
            stats.mean,
            stats.median,
            stats.standard_deviation,
            stats.variance,
            stats.coefficient_of_variation,
        ];
        if computed.iter().any(|x| !x.is_finite()) {
            debug!("VariableStats::compute: {}: overflow: {:?}", name, stats);
            return Err(RankingErrors::NonFiniteStatistic {
                variable: name.to_string(),
            });
        }
        debug!("VariableStats::compute: {}: {:?}", name, stats);
        Ok(stats)
    }
}
