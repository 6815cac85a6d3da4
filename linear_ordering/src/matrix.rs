//! Observations x variables matrix, in its two phases.
//!
//! A [`RawMatrix`] holds the values as they were provided. Standardizing consumes it and
//! rewrites the values in place, giving a [`StandardizedMatrix`]. The ranking functions
//! only accept the standardized phase.

use log::debug;

use crate::config::*;

// Dense row-major storage. Invariant: values.len() == rows * cols.
#[derive(PartialEq, Debug, Clone)]
struct Cells {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl Cells {
    fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.cols..(i + 1) * self.cols]
    }

    fn column(&self, j: usize) -> Vec<f64> {
        (0..self.rows).map(|i| self.values[i * self.cols + j]).collect()
    }
}

/// The matrix before standardization.
#[derive(PartialEq, Debug, Clone)]
pub struct RawMatrix(Cells);

/// The matrix after every column has been turned into z-scores.
#[derive(PartialEq, Debug, Clone)]
pub struct StandardizedMatrix(Cells);

impl RawMatrix {
    /// Builds the matrix from a flat buffer.
    ///
    /// The buffer must contain exactly `observations * variables` finite values.
    ///
    /// ```
    /// use linear_ordering::matrix::RawMatrix;
    /// use linear_ordering::DataLayout;
    ///
    /// let m = RawMatrix::from_flat(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], DataLayout::VariableMajor)?;
    /// assert_eq!(m.row(0), &[1.0, 3.0, 5.0]);
    /// assert_eq!(m.column(2), vec![5.0, 6.0]);
    /// # Ok::<(), linear_ordering::RankingErrors>(())
    /// ```
    pub fn from_flat(
        observations: usize,
        variables: usize,
        values: Vec<f64>,
        layout: DataLayout,
    ) -> Result<RawMatrix, RankingErrors> {
        if observations == 0 || variables == 0 {
            return Err(RankingErrors::EmptyDataset);
        }
        if observations.checked_mul(variables) != Some(values.len()) {
            return Err(RankingErrors::DataCountMismatch {
                observations,
                variables,
                values: values.len(),
            });
        }
        if let Some(idx) = values.iter().position(|x| !x.is_finite()) {
            return Err(RankingErrors::NonFiniteValue { position: idx + 1 });
        }
        let values = match layout {
            DataLayout::ObservationMajor => values,
            DataLayout::VariableMajor => {
                let mut transposed = Vec::with_capacity(values.len());
                for i in 0..observations {
                    for j in 0..variables {
                        transposed.push(values[j * observations + i]);
                    }
                }
                transposed
            }
        };
        Ok(RawMatrix(Cells {
            rows: observations,
            cols: variables,
            values,
        }))
    }

    pub fn observation_count(&self) -> usize {
        self.0.rows
    }

    pub fn variable_count(&self) -> usize {
        self.0.cols
    }

    pub fn row(&self, observation: usize) -> &[f64] {
        self.0.row(observation)
    }

    /// A copy of the values of one variable, in observation order.
    pub fn column(&self, variable: usize) -> Vec<f64> {
        self.0.column(variable)
    }

    /// Computes the statistics of each variable, in order.
    ///
    /// `names` gives the variable names used in error messages.
    pub fn describe(&self, names: &[String]) -> Result<Vec<VariableStats>, RankingErrors> {
        check_labels("variable", self.variable_count(), names)?;
        names
            .iter()
            .enumerate()
            .map(|(j, name)| VariableStats::compute(name, &self.column(j)))
            .collect()
    }

    /// Replaces every value by its z-score, using the statistics of its own variable.
    ///
    /// Fails on the first variable with a standard deviation of zero. The matrix is consumed
    /// in both cases.
    pub fn standardize(
        self,
        stats: &[VariableStats],
        names: &[String],
    ) -> Result<StandardizedMatrix, RankingErrors> {
        check_labels("variable", self.variable_count(), names)?;
        if stats.len() != self.variable_count() {
            return Err(RankingErrors::LabelCountMismatch {
                what: "statistics",
                expected: self.variable_count(),
                actual: stats.len(),
            });
        }
        let mut cells = self.0;
        for (j, (s, name)) in stats.iter().zip(names.iter()).enumerate() {
            for i in 0..cells.rows {
                let cell = &mut cells.values[i * cells.cols + j];
                *cell = scale(*cell, s, name)?;
            }
            debug!("standardize: variable {} done", name);
        }
        Ok(StandardizedMatrix(cells))
    }
}

impl StandardizedMatrix {
    pub fn observation_count(&self) -> usize {
        self.0.rows
    }

    pub fn variable_count(&self) -> usize {
        self.0.cols
    }

    pub fn row(&self, observation: usize) -> &[f64] {
        self.0.row(observation)
    }

    pub fn column(&self, variable: usize) -> Vec<f64> {
        self.0.column(variable)
    }
}

/// The z-score of a value of `variable`: (value - mean) / sd.
pub fn scale(value: f64, stats: &VariableStats, variable: &str) -> Result<f64, RankingErrors> {
    if stats.standard_deviation == 0.0 {
        return Err(RankingErrors::ZeroStandardDeviation {
            variable: variable.to_string(),
        });
    }
    Ok((value - stats.mean) / stats.standard_deviation)
}

pub(crate) fn check_labels(
    what: &'static str,
    expected: usize,
    labels: &[String],
) -> Result<(), RankingErrors> {
    if labels.len() == expected {
        Ok(())
    } else {
        Err(RankingErrors::LabelCountMismatch {
            what,
            expected,
            actual: labels.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptive;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn observation_major_layout() {
        let m = RawMatrix::from_flat(
            3,
            2,
            vec![1.0, 10.0, 2.0, 20.0, 3.0, 15.0],
            DataLayout::ObservationMajor,
        )
        .unwrap();
        assert_eq!(m.row(1), &[2.0, 20.0]);
        assert_eq!(m.column(0), vec![1.0, 2.0, 3.0]);
        assert_eq!(m.column(1), vec![10.0, 20.0, 15.0]);
    }

    #[test]
    fn both_layouts_agree() {
        let a = RawMatrix::from_flat(
            3,
            2,
            vec![1.0, 10.0, 2.0, 20.0, 3.0, 15.0],
            DataLayout::ObservationMajor,
        )
        .unwrap();
        let b = RawMatrix::from_flat(
            3,
            2,
            vec![1.0, 2.0, 3.0, 10.0, 20.0, 15.0],
            DataLayout::VariableMajor,
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn count_mismatch() {
        let res = RawMatrix::from_flat(2, 2, vec![1.0, 2.0, 3.0], DataLayout::default());
        assert_eq!(
            res,
            Err(RankingErrors::DataCountMismatch {
                observations: 2,
                variables: 2,
                values: 3
            })
        );
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let res = RawMatrix::from_flat(1, 3, vec![1.0, f64::NAN, 2.0], DataLayout::default());
        assert_eq!(res, Err(RankingErrors::NonFiniteValue { position: 2 }));
        let res = RawMatrix::from_flat(1, 1, vec![f64::INFINITY], DataLayout::default());
        assert_eq!(res, Err(RankingErrors::NonFiniteValue { position: 1 }));
    }

    #[test]
    fn empty_dimensions() {
        let res = RawMatrix::from_flat(0, 2, vec![], DataLayout::default());
        assert_eq!(res, Err(RankingErrors::EmptyDataset));
    }

    #[test]
    fn standardized_columns_have_zero_mean_unit_sd() {
        let vars = names(&["X", "Y", "Z"]);
        let m = RawMatrix::from_flat(
            4,
            3,
            vec![
                1.0, 100.0, -3.0, //
                2.0, 250.0, 7.5, //
                4.0, 175.0, 0.25, //
                8.0, 50.0, 12.0,
            ],
            DataLayout::ObservationMajor,
        )
        .unwrap();
        let stats = m.describe(&vars).unwrap();
        let z = m.standardize(&stats, &vars).unwrap();
        for j in 0..z.variable_count() {
            let col = z.column(j);
            let m = descriptive::mean(&col).unwrap();
            let sd = descriptive::standard_deviation(&col, m).unwrap();
            assert!(m.abs() < 1e-12, "mean {} for column {}", m, j);
            assert!((sd - 1.0).abs() < 1e-12, "sd {} for column {}", sd, j);
        }
    }

    #[test]
    fn constant_column_cannot_be_standardized() {
        let vars = names(&["X", "Flat"]);
        let m = RawMatrix::from_flat(
            3,
            2,
            vec![1.0, 5.0, 2.0, 5.0, 3.0, 5.0],
            DataLayout::ObservationMajor,
        )
        .unwrap();
        let stats = m.describe(&vars).unwrap();
        assert_eq!(stats[1].standard_deviation, 0.0);
        let res = m.standardize(&stats, &vars);
        assert_eq!(
            res,
            Err(RankingErrors::ZeroStandardDeviation {
                variable: "Flat".to_string()
            })
        );
    }

    #[test]
    fn describe_checks_names() {
        let m = RawMatrix::from_flat(1, 2, vec![1.0, 2.0], DataLayout::default()).unwrap();
        assert_eq!(
            m.describe(&names(&["only"])),
            Err(RankingErrors::LabelCountMismatch {
                what: "variable",
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn scale_rejects_zero_deviation() {
        let mut stats = VariableStats::compute("T", &[1.0, 3.0]).unwrap();
        assert_eq!(stats.mean, 2.0);
        assert_eq!(scale(4.0, &stats, "T"), Ok(2.0));
        stats.standard_deviation = 0.0;
        assert_eq!(
            scale(4.0, &stats, "T"),
            Err(RankingErrors::ZeroStandardDeviation {
                variable: "T".to_string()
            })
        );
    }
}
