use log::{debug, info, warn};

use linear_ordering::*;
use snafu::{prelude::*, Snafu};

use std::fs;

use text_diff::print_diff;

use crate::analysis::config_reader::AnalysisSettings;

pub mod config_reader;
mod io_text;
mod report;

#[derive(Debug, Snafu)]
pub enum AnalysisError {
    #[snafu(display("EXISTENCE ERROR: cannot open file {path}: {source}"))]
    Existence {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("DUPLICATE FILE ERROR: tried to open the same file twice ({first} and {second})"))]
    DuplicateFile { first: String, second: String },
    #[snafu(display("EMPTY FILE ERROR: file {path} is empty"))]
    EmptyFile { path: String },
    #[snafu(display(
        "DATA ERROR: Incorrect data - Number of observations*variables does not match number of data\n\
         Number of observations: {observations}\n\
         Number of variables: {variables}\n\
         Number of data: {values}"
    ))]
    DataCountMismatch {
        observations: usize,
        variables: usize,
        values: usize,
    },
    #[snafu(display(
        "DATA FORMAT ERROR: Value in position {position} of {path} is not a number: {token:?}"
    ))]
    DataFormat {
        path: String,
        position: usize,
        token: String,
    },
    #[snafu(display("DATA FORMAT ERROR: Minimum coefficient of variation is not a number: {value:?}"))]
    ThresholdFormat { value: String },
    #[snafu(display("RANGE ERROR: Coefficient cannot be lower than 0 (got {value})"))]
    Range { value: f64 },
    #[snafu(display("{}: {}", ranking_error_kind(source), source))]
    Ranking { source: RankingErrors },
    #[snafu(display(
        "Unknown data layout {layout:?}, expected 'observation-major' or 'variable-major'"
    ))]
    InvalidLayout { layout: String },
    #[snafu(display("Error opening configuration file {path}: {source}"))]
    OpeningConfig {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing configuration file {path}: {source}"))]
    ParsingConfig {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error reading the standard input: {source}"))]
    Prompt { source: std::io::Error },
    #[snafu(display("No answer provided for: {question}"))]
    MissingAnswer { question: String },
    #[snafu(display("Error writing file {path}: {source}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error rendering the report: {source}"))]
    RenderingReport { source: std::fmt::Error },
    #[snafu(display("Error serializing the summary: {source}"))]
    SerializingSummary { source: serde_json::Error },
    #[snafu(display("Error reading reference report {path}: {source}"))]
    ReadingReference {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Difference detected between the report and the reference report {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

fn ranking_error_kind(e: &RankingErrors) -> &'static str {
    if e.is_degenerate() {
        "DEGENERATE ARITHMETIC ERROR"
    } else {
        "DATA ERROR"
    }
}

/// The validated inputs of the ordering.
struct LoadedInput {
    observations: Vec<String>,
    variables: Vec<String>,
    values: Vec<f64>,
    min_coefficient: f64,
}

fn load_input(settings: &AnalysisSettings) -> AnalysisResult<LoadedInput> {
    let obs_path = settings.observation_file.as_str();
    let var_path = settings.variable_file.as_str();
    let data_path = settings.data_file.as_str();

    info!("Reading observations from {:?}", obs_path);
    let obs_content = io_text::read_file(obs_path)?;
    let observations = io_text::parse_labels(&obs_content, obs_path)?;

    info!("Reading variables from {:?}", var_path);
    let var_content = io_text::read_file(var_path)?;
    io_text::ensure_distinct(var_path, obs_path)?;
    let variables = io_text::parse_labels(&var_content, var_path)?;

    info!("Reading data from {:?}", data_path);
    let data_content = io_text::read_file(data_path)?;
    io_text::ensure_distinct(data_path, obs_path)?;
    io_text::ensure_distinct(data_path, var_path)?;
    let tokens = io_text::split_tokens(&data_content, data_path)?;
    ensure!(
        observations.len() * variables.len() == tokens.len(),
        DataCountMismatchSnafu {
            observations: observations.len(),
            variables: variables.len(),
            values: tokens.len(),
        }
    );
    let values = io_text::parse_values(&tokens, data_path)?;

    let min_coefficient = io_text::parse_threshold(&settings.min_coefficient)?;

    for input in [obs_path, var_path, data_path] {
        io_text::ensure_distinct(settings.output_file.as_str(), input)?;
    }

    info!(
        "Loaded {} observations, {} variables, {} values",
        observations.len(),
        variables.len(),
        values.len()
    );
    Ok(LoadedInput {
        observations,
        variables,
        values,
        min_coefficient,
    })
}

/// Runs the whole analysis: reads and validates the inputs, ranks the observations and
/// writes the report (and the JSON summary if requested).
///
/// Nothing is written if any input is invalid or if the ordering cannot be computed.
pub fn run_analysis(settings: &AnalysisSettings) -> AnalysisResult<()> {
    debug!("run_analysis: settings: {:?}", settings);
    let input = load_input(settings)?;

    let rules = RankingRules {
        minimum_coefficient_of_variation: input.min_coefficient,
    };
    let dataset =
        Dataset::from_flat(input.observations, input.variables, input.values, settings.layout)
            .context(RankingSnafu {})?;
    let result = run_ranking(dataset, &rules).context(RankingSnafu {})?;

    let report_text = report::render_report(&result).context(RenderingReportSnafu {})?;
    let summary_text = match settings.summary_file.as_ref() {
        Some(_) => Some(
            serde_json::to_string_pretty(&report::summary_json(&result, &rules, settings.layout))
                .context(SerializingSummarySnafu {})?,
        ),
        None => None,
    };

    fs::write(&settings.output_file, &report_text).context(WritingOutputSnafu {
        path: settings.output_file.clone(),
    })?;
    info!("Report written to {:?}", settings.output_file);

    match (settings.summary_file.as_deref(), summary_text) {
        (Some("stdout"), Some(js)) => {
            println!("{}", js);
        }
        (Some(path), Some(js)) => {
            fs::write(path, js).context(WritingOutputSnafu { path })?;
            info!("Summary written to {:?}", path);
        }
        _ => {}
    }

    // The reference report, if provided for comparison
    if let Some(reference_path) = settings.reference_file.as_deref() {
        check_reference(&report_text, reference_path)?;
    }

    Ok(())
}

fn check_reference(report_text: &str, reference_path: &str) -> AnalysisResult<()> {
    let reference = fs::read_to_string(reference_path).context(ReadingReferenceSnafu {
        path: reference_path,
    })?;
    let reference = normalize_newlines(&reference);
    if reference != report_text {
        warn!(
            "Found differences with the reference report {:?}",
            reference_path
        );
        print_diff(reference.as_str(), report_text, "\n");
        return ReferenceMismatchSnafu {
            path: reference_path,
        }
        .fail();
    }
    info!("Report matches the reference {:?}", reference_path);
    Ok(())
}

fn normalize_newlines(s: &str) -> String {
    s.replace("\r\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Args;
    use crate::analysis::config_reader::resolve_settings;

    use std::path::{Path, PathBuf};

    fn test_dir() -> PathBuf {
        [env!("CARGO_MANIFEST_DIR"), "tests", "data"].iter().collect()
    }

    fn empty_args() -> Args {
        Args {
            config: None,
            observations: None,
            variables: None,
            data: None,
            min_coefficient: None,
            output: None,
            layout: None,
            summary: None,
            reference: None,
            verbose: false,
        }
    }

    // Runs the configuration of a test directory and compares the report with the expected one.
    fn run_fixture(test_name: &str, output: &Path) -> AnalysisResult<()> {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = test_dir().join(test_name);
        let args = Args {
            config: Some(
                dir.join(format!("{}_config.json", test_name))
                    .display()
                    .to_string(),
            ),
            output: Some(output.display().to_string()),
            reference: Some(
                dir.join(format!("{}_expected_report.txt", test_name))
                    .display()
                    .to_string(),
            ),
            ..empty_args()
        };
        let mut no_input: &[u8] = b"";
        let mut prompts: Vec<u8> = Vec::new();
        let settings = resolve_settings(&args, &mut no_input, &mut prompts)?;
        assert!(prompts.is_empty(), "unexpected prompt");
        run_analysis(&settings)
    }

    fn test_wrapper(test_name: &str) {
        let tmp = tempfile::tempdir().unwrap();
        let output = tmp.path().join("report.txt");
        let res = run_fixture(test_name, &output);
        if let Err(e) = &res {
            eprintln!("An error occurred {}", e);
        }
        assert!(res.is_ok(), "test {} failed: {:?}", test_name, res);
        assert!(output.exists());
    }

    fn write(dir: &Path, name: &str, content: &str) -> String {
        let p = dir.join(name);
        fs::write(&p, content).unwrap();
        p.display().to_string()
    }

    // Writes the three input files and returns settings pointing at them.
    fn inline_settings(
        dir: &Path,
        observations: &str,
        variables: &str,
        data: &str,
        min_coefficient: &str,
    ) -> AnalysisSettings {
        AnalysisSettings {
            observation_file: write(dir, "obs.txt", observations),
            variable_file: write(dir, "var.txt", variables),
            data_file: write(dir, "data.txt", data),
            min_coefficient: min_coefficient.to_string(),
            output_file: dir.join("results.txt").display().to_string(),
            layout: DataLayout::ObservationMajor,
            summary_file: None,
            reference_file: None,
        }
    }

    #[test]
    fn basic_scenario() {
        test_wrapper("basic_scenario");
    }

    #[test]
    fn regions_variable_major() {
        test_wrapper("regions_variable_major");
    }

    #[test]
    fn count_mismatch_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let output = tmp.path().join("report.txt");
        let res = run_fixture("count_mismatch", &output);
        assert!(matches!(
            res,
            Err(AnalysisError::DataCountMismatch {
                observations: 2,
                variables: 2,
                values: 3
            })
        ));
        assert!(!output.exists());
    }

    #[test]
    fn reference_mismatch_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let mut settings = inline_settings(tmp.path(), "A\nB\nC\n", "X\nY\n", "1 10\n2 20\n3 15\n", "0");
        settings.reference_file = Some(write(tmp.path(), "ref.txt", "RANKING\n"));
        let res = run_analysis(&settings);
        assert!(matches!(res, Err(AnalysisError::ReferenceMismatch { .. })));
    }

    #[test]
    fn summary_is_written() {
        let tmp = tempfile::tempdir().unwrap();
        let mut settings = inline_settings(tmp.path(), "A\nB\nC\n", "X\nY\n", "1 10\n2 20\n3 15\n", "30");
        let summary = tmp.path().join("summary.json");
        settings.summary_file = Some(summary.display().to_string());
        run_analysis(&settings).unwrap();
        let js: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&summary).unwrap()).unwrap();
        assert_eq!(js["ranking"][0]["label"], "B");
        assert_eq!(js["ranking"][2]["position"], 3);
        assert_eq!(js["variables"][1]["name"], "Y");
        assert_eq!(js["variables"][1]["belowThreshold"], true);
        assert_eq!(js["variables"][0]["belowThreshold"], false);
    }

    #[test]
    fn missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let mut settings = inline_settings(tmp.path(), "A\nB\n", "X\n", "1 2\n", "0");
        settings.variable_file = tmp.path().join("nope.txt").display().to_string();
        let res = run_analysis(&settings);
        assert!(matches!(res, Err(AnalysisError::Existence { .. })));
        assert!(!Path::new(&settings.output_file).exists());
    }

    #[test]
    fn duplicate_files() {
        let tmp = tempfile::tempdir().unwrap();
        let mut settings = inline_settings(tmp.path(), "A\nB\n", "X\n", "1 2\n", "0");
        settings.data_file = settings.variable_file.clone();
        let res = run_analysis(&settings);
        assert!(matches!(res, Err(AnalysisError::DuplicateFile { .. })));

        let mut settings = inline_settings(tmp.path(), "A\nB\n", "X\n", "1 2\n", "0");
        settings.output_file = settings.data_file.clone();
        let res = run_analysis(&settings);
        assert!(matches!(res, Err(AnalysisError::DuplicateFile { .. })));
        // The data file was not overwritten.
        assert_eq!(fs::read_to_string(&settings.data_file).unwrap(), "1 2\n");
    }

    #[test]
    fn empty_files() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = inline_settings(tmp.path(), "", "X\n", "1 2\n", "0");
        assert!(matches!(
            run_analysis(&settings),
            Err(AnalysisError::EmptyFile { .. })
        ));
        let settings = inline_settings(tmp.path(), "A\nB\n", "X\n", " \n\n", "0");
        assert!(matches!(
            run_analysis(&settings),
            Err(AnalysisError::EmptyFile { .. })
        ));
    }

    #[test]
    fn bad_token() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = inline_settings(tmp.path(), "A\nB\n", "X\n", "1\nabc\n", "0");
        let res = run_analysis(&settings);
        match res {
            Err(AnalysisError::DataFormat {
                position, token, ..
            }) => {
                assert_eq!(position, 2);
                assert_eq!(token, "abc");
            }
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn bad_threshold() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = inline_settings(tmp.path(), "A\nB\n", "X\n", "1 2\n", "ten");
        assert!(matches!(
            run_analysis(&settings),
            Err(AnalysisError::ThresholdFormat { .. })
        ));
        let settings = inline_settings(tmp.path(), "A\nB\n", "X\n", "1 2\n", "-5");
        assert!(matches!(
            run_analysis(&settings),
            Err(AnalysisError::Range { .. })
        ));
    }

    #[test]
    fn overflowing_column_is_degenerate() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = inline_settings(
            tmp.path(),
            "A\nB\nC\n",
            "X\nY\n",
            "1e308 1\n1.5e308 2\n1.7e308 3\n",
            "0",
        );
        match run_analysis(&settings) {
            Err(e @ AnalysisError::Ranking { .. }) => {
                let msg = e.to_string();
                assert!(msg.starts_with("DEGENERATE ARITHMETIC ERROR"), "{}", msg);
                assert!(msg.contains("variable X"), "{}", msg);
            }
            x => panic!("unexpected result {:?}", x),
        }
        assert!(!Path::new(&settings.output_file).exists());
    }

    #[test]
    fn constant_column_is_degenerate() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = inline_settings(tmp.path(), "A\nB\nC\n", "X\nY\n", "1 7\n2 7\n3 7\n", "0");
        let res = run_analysis(&settings);
        match res {
            Err(e @ AnalysisError::Ranking { .. }) => {
                let msg = e.to_string();
                assert!(msg.starts_with("DEGENERATE ARITHMETIC ERROR"), "{}", msg);
                assert!(msg.contains('Y'), "{}", msg);
            }
            x => panic!("unexpected result {:?}", x),
        }
        assert!(!Path::new(&settings.output_file).exists());
    }
}
