// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// How a flat buffer of values maps onto the observations x variables matrix.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub enum DataLayout {
    /// One observation after the other: all the values of the first observation
    /// (in variable order), then all the values of the second observation, and so on.
    #[default]
    ObservationMajor,
    /// One variable after the other: all the values of the first variable
    /// (in observation order), then the second variable, and so on.
    VariableMajor,
}

// ******** Output data structures *********

/// Descriptive statistics of one variable, computed on the raw values.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct VariableStats {
    pub minimum: f64,
    pub maximum: f64,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation (divisor n).
    pub standard_deviation: f64,
    /// Always the square of the standard deviation.
    pub variance: f64,
    /// |standard_deviation / mean| expressed as a percentage.
    pub coefficient_of_variation: f64,
}

/// The statistics of a variable, with its name and the outcome of the
/// coefficient of variation filter.
#[derive(PartialEq, Debug, Clone)]
pub struct VariableSummary {
    pub name: String,
    pub stats: VariableStats,
    /// True when the coefficient of variation is strictly lower than the
    /// minimum requested in the rules.
    pub below_threshold: bool,
}

/// The score of one observation.
#[derive(PartialEq, Debug, Clone)]
pub struct ObservationScore {
    pub label: String,
    /// Mean of the standardized values of the observation.
    pub raw_mean: f64,
    /// Min-max normalization of the raw mean, in [0, 1].
    pub ranking_index: f64,
}

/// One line of the final ranking.
#[derive(PartialEq, Debug, Clone)]
pub struct RankedObservation {
    /// Starts at 1.
    pub position: usize,
    pub ranking_index: f64,
    pub label: String,
    /// Index of the observation in the input, starting at 0.
    pub observation: usize,
}

#[derive(PartialEq, Debug, Clone)]
pub struct RankingResult {
    /// One entry per variable, in input order.
    pub variables: Vec<VariableSummary>,
    /// One entry per observation, in input order.
    pub scores: Vec<ObservationScore>,
    /// One entry per observation, best first.
    pub ranking: Vec<RankedObservation>,
}

/// Errors that prevent the ordering from completing successfully.
#[derive(PartialEq, Debug, Clone)]
pub enum RankingErrors {
    /// No observation or no variable.
    EmptyDataset,
    /// The number of labels does not match the dimension of the matrix.
    LabelCountMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    /// observations x variables is not the number of values provided.
    DataCountMismatch {
        observations: usize,
        variables: usize,
        values: usize,
    },
    /// A value that is NaN or infinite. The position starts at 1.
    NonFiniteValue { position: usize },
    /// The minimum coefficient of variation is negative or not finite.
    NegativeThreshold,
    /// The mean of a variable is exactly zero: the coefficient of variation is undefined.
    ZeroMean { variable: String },
    /// All the values of a variable are identical: it cannot be standardized.
    ZeroStandardDeviation { variable: String },
    /// All the observations have the same mean: the ranking index is undefined.
    ConstantRanking,
    /// A statistic of the variable overflowed: the values are too large to be described.
    NonFiniteStatistic { variable: String },
    /// The mean of an observation or the spread of the means is not a finite number.
    NonFiniteScore,
}

impl RankingErrors {
    /// True for the errors caused by a division by zero in the computations.
    pub fn is_degenerate(&self) -> bool {
        matches!(
            self,
            RankingErrors::ZeroMean { .. }
                | RankingErrors::ZeroStandardDeviation { .. }
                | RankingErrors::ConstantRanking
                | RankingErrors::NonFiniteStatistic { .. }
                | RankingErrors::NonFiniteScore
        )
    }
}

impl Error for RankingErrors {}

impl Display for RankingErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RankingErrors::EmptyDataset => {
                write!(f, "the dataset needs at least one observation and one variable")
            }
            RankingErrors::LabelCountMismatch {
                what,
                expected,
                actual,
            } => write!(f, "expected {} {} labels, got {}", expected, what, actual),
            RankingErrors::DataCountMismatch {
                observations,
                variables,
                values,
            } => write!(
                f,
                "number of observations*variables does not match number of data \
                 (observations: {}, variables: {}, data: {})",
                observations, variables, values
            ),
            RankingErrors::NonFiniteValue { position } => {
                write!(f, "value in position {} is not a finite number", position)
            }
            RankingErrors::NegativeThreshold => {
                write!(f, "coefficient cannot be lower than 0")
            }
            RankingErrors::ZeroMean { variable } => write!(
                f,
                "mean of variable {} is 0, the coefficient of variation is undefined",
                variable
            ),
            RankingErrors::ZeroStandardDeviation { variable } => write!(
                f,
                "standard deviation of variable {} is 0, the variable cannot be standardized",
                variable
            ),
            RankingErrors::ConstantRanking => write!(
                f,
                "all the observations have the same mean, the ranking index is undefined"
            ),
            RankingErrors::NonFiniteStatistic { variable } => write!(
                f,
                "the statistics of variable {} are not finite numbers (overflow)",
                variable
            ),
            RankingErrors::NonFiniteScore => write!(
                f,
                "the observation means are not finite numbers, the ranking index is undefined"
            ),
        }
    }
}

// ********* Configuration **********

#[derive(PartialEq, Debug, Clone, Copy)]
pub struct RankingRules {
    /// Variables with a coefficient of variation (in %) strictly below this value
    /// are flagged for removal. They still take part in the ranking.
    pub minimum_coefficient_of_variation: f64,
}

impl RankingRules {
    pub const DEFAULT_RULES: RankingRules = RankingRules {
        minimum_coefficient_of_variation: 0.0,
    };

    pub(crate) fn check(&self) -> Result<(), RankingErrors> {
        let t = self.minimum_coefficient_of_variation;
        if t.is_finite() && t >= 0.0 {
            Ok(())
        } else {
            Err(RankingErrors::NegativeThreshold)
        }
    }
}

impl Default for RankingRules {
    fn default() -> Self {
        RankingRules::DEFAULT_RULES
    }
}
