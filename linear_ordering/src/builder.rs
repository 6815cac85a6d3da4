pub use crate::config::*;
use crate::matrix::RawMatrix;
use crate::Dataset;

/// A builder for adding observations one at a time.
///
/// ```
/// pub use linear_ordering::builder::Builder;
/// pub use linear_ordering::RankingRules;
/// # use linear_ordering::RankingErrors;
///
/// let mut builder = Builder::new(&RankingRules::DEFAULT_RULES)?
///     .variables(&["Income".to_string(), "Schools".to_string()])?;
///
/// builder.add_observation("North", &[32.5, 12.0])?;
/// builder.add_observation("South", &[28.0, 15.0])?;
/// builder.add_observation("East", &[41.0, 9.0])?;
///
/// let result = builder.run()?;
/// assert_eq!(result.ranking.len(), 3);
///
/// # Ok::<(), RankingErrors>(())
/// ```
pub struct Builder {
    pub(crate) _rules: RankingRules,
    pub(crate) _variables: Vec<String>,
    pub(crate) _observations: Vec<String>,
    pub(crate) _values: Vec<f64>,
}

impl Builder {
    pub fn new(rules: &RankingRules) -> Result<Builder, RankingErrors> {
        rules.check()?;
        Ok(Builder {
            _rules: *rules,
            _variables: Vec::new(),
            _observations: Vec::new(),
            _values: Vec::new(),
        })
    }

    /// Sets the variables. This discards the observations added so far.
    pub fn variables(self, names: &[String]) -> Result<Builder, RankingErrors> {
        if names.is_empty() {
            return Err(RankingErrors::EmptyDataset);
        }
        Ok(Builder {
            _rules: self._rules,
            _variables: names.to_vec(),
            _observations: Vec::new(),
            _values: Vec::new(),
        })
    }

    /// Adds an observation with one value per variable, in variable order.
    pub fn add_observation(&mut self, label: &str, values: &[f64]) -> Result<(), RankingErrors> {
        if values.len() != self._variables.len() {
            return Err(RankingErrors::DataCountMismatch {
                observations: 1,
                variables: self._variables.len(),
                values: values.len(),
            });
        }
        if let Some(idx) = values.iter().position(|x| !x.is_finite()) {
            return Err(RankingErrors::NonFiniteValue {
                position: self._values.len() + idx + 1,
            });
        }
        self._observations.push(label.to_string());
        self._values.extend_from_slice(values);
        Ok(())
    }

    pub fn build(self) -> Result<Dataset, RankingErrors> {
        let matrix = RawMatrix::from_flat(
            self._observations.len(),
            self._variables.len(),
            self._values,
            DataLayout::ObservationMajor,
        )?;
        Ok(Dataset {
            observations: self._observations,
            variables: self._variables,
            matrix,
        })
    }

    /// Builds the dataset and runs the whole ordering with the rules of the builder.
    pub fn run(self) -> Result<RankingResult, RankingErrors> {
        let rules = self._rules;
        crate::run_ranking(self.build()?, &rules)
    }
}
