/*!
Linear ordering of multidimensional observations with the standardized sum method.

Each observation is described by several numeric variables, all of them stimulants
(a higher value is better). The observations are not directly comparable, so each
one is reduced to a single ranking index:

1. descriptive statistics are computed for every variable ([`descriptive`])
2. every variable is standardized into z-scores ([`matrix`])
3. the z-scores of each observation are averaged, and the averages are normalized
   into [0, 1] ([`ranking`])
4. the observations are sorted by decreasing index

```
use linear_ordering::*;

let observations = vec!["A".to_string(), "B".to_string(), "C".to_string()];
let variables = vec!["X".to_string(), "Y".to_string()];
let values = vec![1.0, 10.0, 2.0, 20.0, 3.0, 15.0];

let dataset = Dataset::from_flat(observations, variables, values, DataLayout::ObservationMajor)?;
let result = run_ranking(dataset, &RankingRules::DEFAULT_RULES)?;

assert_eq!(result.ranking[0].label, "B");
assert_eq!(result.ranking[2].label, "A");
# Ok::<(), RankingErrors>(())
```

See the [`manual`] for the command line program built on top of this library.
*/

mod config;
use log::{debug, info, warn};

pub use crate::config::*;

pub mod builder;
pub mod descriptive;
pub mod manual;
pub mod matrix;
pub mod ranking;

use crate::matrix::{check_labels, RawMatrix};

/// The labels and the raw values of a dataset.
///
/// Invariant: the labels have exactly one entry per row (observations) and per
/// column (variables) of the matrix.
#[derive(PartialEq, Debug, Clone)]
pub struct Dataset {
    pub(crate) observations: Vec<String>,
    pub(crate) variables: Vec<String>,
    pub(crate) matrix: RawMatrix,
}

impl Dataset {
    /// Creates a dataset from labels and a flat buffer of values laid out as `layout`.
    pub fn from_flat(
        observations: Vec<String>,
        variables: Vec<String>,
        values: Vec<f64>,
        layout: DataLayout,
    ) -> Result<Dataset, RankingErrors> {
        let matrix = RawMatrix::from_flat(observations.len(), variables.len(), values, layout)?;
        Dataset::new(observations, variables, matrix)
    }

    pub fn new(
        observations: Vec<String>,
        variables: Vec<String>,
        matrix: RawMatrix,
    ) -> Result<Dataset, RankingErrors> {
        check_labels("observation", matrix.observation_count(), &observations)?;
        check_labels("variable", matrix.variable_count(), &variables)?;
        Ok(Dataset {
            observations,
            variables,
            matrix,
        })
    }

    pub fn observations(&self) -> &[String] {
        &self.observations
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn matrix(&self) -> &RawMatrix {
        &self.matrix
    }
}

/// Runs the standardized sum method on a dataset.
///
/// The dataset is consumed: its matrix is standardized in place. Nothing is returned
/// unless every step succeeds.
///
/// Arguments:
/// * `dataset` the observations, variables and raw values
/// * `rules` the minimum coefficient of variation used to flag the variables
pub fn run_ranking(dataset: Dataset, rules: &RankingRules) -> Result<RankingResult, RankingErrors> {
    rules.check()?;
    let Dataset {
        observations,
        variables,
        matrix,
    } = dataset;
    info!(
        "Processing {:?} observations, {:?} variables, rules: {:?}",
        observations.len(),
        variables.len(),
        rules
    );

    let stats = matrix.describe(&variables)?;
    let summaries: Vec<VariableSummary> = variables
        .iter()
        .zip(stats.iter())
        .map(|(name, s)| {
            let below_threshold =
                s.coefficient_of_variation < rules.minimum_coefficient_of_variation;
            if below_threshold {
                warn!(
                    "Variable {} has a low coefficient of variation: {}",
                    name, s.coefficient_of_variation
                );
            }
            VariableSummary {
                name: name.clone(),
                stats: *s,
                below_threshold,
            }
        })
        .collect();

    let standardized = matrix.standardize(&stats, &variables)?;
    debug!("run_ranking: standardized matrix: {:?}", standardized);

    let scores = ranking::score_observations(&standardized, &observations)?;
    let ranking = ranking::rank(&scores);
    if let Some(first) = ranking.first() {
        info!("Best observation: {} ({})", first.label, first.ranking_index);
    }

    Ok(RankingResult {
        variables: summaries,
        scores,
        ranking,
    })
}
