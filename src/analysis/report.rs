use std::fmt::Write;

use serde_json::json;
use serde_json::Value as JSValue;

use crate::analysis::*;

/// Renders the text report: the statistics of every variable, then the ranking.
pub fn render_report(result: &RankingResult) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    for var in result.variables.iter() {
        write_variable(&mut out, var)?;
    }
    writeln!(out, "\nRANKING")?;
    for r in result.ranking.iter() {
        writeln!(out, "{}. {:.6} - {}", r.position, r.ranking_index, r.label)?;
    }
    Ok(out)
}

fn write_variable(out: &mut String, var: &VariableSummary) -> std::fmt::Result {
    let s = &var.stats;
    writeln!(out, "Variable: {}", var.name)?;
    if var.below_threshold {
        writeln!(
            out,
            "NOTE: Required to remove variable {} due to low level of coefficient of variation",
            var.name
        )?;
    }
    writeln!(out, "Minimum: {:.6}", s.minimum)?;
    writeln!(out, "Maximum: {:.6}", s.maximum)?;
    writeln!(out, "Mean: {:.6}", s.mean)?;
    writeln!(out, "Median: {:.6}", s.median)?;
    writeln!(out, "Standard deviation: {:.6}", s.standard_deviation)?;
    writeln!(out, "Variance: {:.6}", s.variance)?;
    writeln!(
        out,
        "Coefficient of variation (%): {:.6}",
        s.coefficient_of_variation
    )?;
    writeln!(out)
}

fn variable_to_json(var: &VariableSummary) -> JSValue {
    let s = &var.stats;
    json!({
        "name": var.name,
        "minimum": s.minimum,
        "maximum": s.maximum,
        "mean": s.mean,
        "median": s.median,
        "standardDeviation": s.standard_deviation,
        "variance": s.variance,
        "coefficientOfVariation": s.coefficient_of_variation,
        "belowThreshold": var.below_threshold,
    })
}

/// The results in JSON format.
pub fn summary_json(result: &RankingResult, rules: &RankingRules, layout: DataLayout) -> JSValue {
    let variables: Vec<JSValue> = result.variables.iter().map(variable_to_json).collect();
    let ranking: Vec<JSValue> = result
        .ranking
        .iter()
        .map(|r| {
            let raw_mean = result.scores.get(r.observation).map(|s| s.raw_mean);
            json!({
                "position": r.position,
                "rankingIndex": r.ranking_index,
                "label": r.label,
                "rawMean": raw_mean,
            })
        })
        .collect();
    json!({
        "config": {
            "minimumCoefficientOfVariation": rules.minimum_coefficient_of_variation,
            "dataLayout": format!("{:?}", layout),
        },
        "variables": variables,
        "ranking": ranking,
    })
}
