// Primitives for reading the text input files.

use std::fs;
use std::path::Path;

use crate::analysis::*;

/// Reads a whole file. Invalid UTF-8 sequences are replaced, they end up rejected as
/// bad numbers or kept inside labels.
pub fn read_file(path: &str) -> AnalysisResult<String> {
    let bytes = fs::read(path).context(ExistenceSnafu { path })?;
    debug!("read_file: {:?}: {} bytes", path, bytes.len());
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// One label per line. Line terminators (`\n` or `\r\n`) are removed and trailing blank
/// lines are ignored.
pub fn parse_labels(content: &str, path: &str) -> AnalysisResult<Vec<String>> {
    let mut labels: Vec<String> = content.lines().map(|l| l.to_string()).collect();
    while labels.last().map_or(false, |l| l.trim().is_empty()) {
        labels.pop();
    }
    ensure!(!labels.is_empty(), EmptyFileSnafu { path });
    debug!("parse_labels: {:?}: {:?}", path, labels);
    Ok(labels)
}

/// The whitespace separated tokens of a data file.
pub fn split_tokens(content: &str, path: &str) -> AnalysisResult<Vec<String>> {
    let tokens: Vec<String> = content.split_whitespace().map(|s| s.to_string()).collect();
    ensure!(!tokens.is_empty(), EmptyFileSnafu { path });
    Ok(tokens)
}

/// Parses every token as a finite number. Positions in errors start at 1.
pub fn parse_values(tokens: &[String], path: &str) -> AnalysisResult<Vec<f64>> {
    tokens
        .iter()
        .enumerate()
        .map(|(idx, token)| match parse_number(token) {
            Some(x) => Ok(x),
            None => DataFormatSnafu {
                path,
                position: idx + 1,
                token: token.as_str(),
            }
            .fail(),
        })
        .collect()
}

pub fn parse_threshold(s: &str) -> AnalysisResult<f64> {
    let value = parse_number(s.trim()).context(ThresholdFormatSnafu { value: s })?;
    ensure!(value >= 0.0, RangeSnafu { value });
    Ok(value)
}

// NaN and infinities parse as f64 but are not accepted as data.
fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|x| x.is_finite())
}

fn same_file(a: &str, b: &str) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(x), Ok(y)) => x == y,
        _ => Path::new(a) == Path::new(b),
    }
}

/// Fails if both paths point at the same file.
pub fn ensure_distinct(path: &str, other: &str) -> AnalysisResult<()> {
    ensure!(
        !same_file(path, other),
        DuplicateFileSnafu {
            first: other,
            second: path,
        }
    );
    Ok(())
}
