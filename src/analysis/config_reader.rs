use crate::analysis::*;
use crate::args::Args;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

use std::io::{BufRead, Write};
use std::path::Path;

/// The content of a JSON configuration file. Every entry is optional: what is missing
/// comes from the command line or is asked for interactively.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(rename = "observationFile")]
    pub observation_file: Option<String>,
    #[serde(rename = "variableFile")]
    pub variable_file: Option<String>,
    #[serde(rename = "dataFile")]
    pub data_file: Option<String>,
    #[serde(rename = "minimumCoefficientOfVariation")]
    pub minimum_coefficient_of_variation: Option<JSValue>,
    #[serde(rename = "outputFile")]
    pub output_file: Option<String>,
    #[serde(rename = "dataLayout")]
    pub data_layout: Option<String>,
    #[serde(rename = "summaryFile")]
    pub summary_file: Option<String>,
}

impl AnalysisConfig {
    // The coefficient is kept as text: it is validated with the other inputs.
    fn minimum_coefficient(&self) -> AnalysisResult<Option<String>> {
        match &self.minimum_coefficient_of_variation {
            None => Ok(None),
            Some(JSValue::Number(n)) => Ok(Some(n.to_string())),
            Some(JSValue::String(s)) => Ok(Some(s.clone())),
            Some(x) => whatever!(
                "minimumCoefficientOfVariation should be a number, found {:?}",
                x
            ),
        }
    }
}

/// Everything needed to run one analysis.
#[derive(PartialEq, Debug, Clone)]
pub struct AnalysisSettings {
    pub observation_file: String,
    pub variable_file: String,
    pub data_file: String,
    /// As typed by the user. Parsed and checked when the inputs are loaded.
    pub min_coefficient: String,
    pub output_file: String,
    pub layout: DataLayout,
    /// A file path, or `stdout`.
    pub summary_file: Option<String>,
    pub reference_file: Option<String>,
}

pub fn read_config(path: &str) -> AnalysisResult<AnalysisConfig> {
    let contents = fs::read_to_string(path).context(OpeningConfigSnafu { path })?;
    debug!("read config content: {:?}", contents);
    let config: AnalysisConfig =
        serde_json::from_str(contents.as_str()).context(ParsingConfigSnafu { path })?;
    Ok(config)
}

pub fn parse_layout(s: &str) -> AnalysisResult<DataLayout> {
    match s {
        "observation-major" | "observationMajor" => Ok(DataLayout::ObservationMajor),
        "variable-major" | "variableMajor" => Ok(DataLayout::VariableMajor),
        x => InvalidLayoutSnafu { layout: x }.fail(),
    }
}

// Paths in a configuration file are relative to the directory of that file.
fn config_path(root: &Path, p: &str) -> String {
    root.join(p).display().to_string()
}

/// Writes the question and reads one answer line.
pub fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> AnalysisResult<String> {
    write!(out, "{}", question).context(PromptSnafu {})?;
    out.flush().context(PromptSnafu {})?;
    let mut line = String::new();
    let n = input.read_line(&mut line).context(PromptSnafu {})?;
    let answer = line.trim();
    ensure!(n > 0 && !answer.is_empty(), MissingAnswerSnafu { question });
    Ok(answer.to_string())
}

/// Combines the command line, the configuration file (if any) and interactive answers.
///
/// The command line wins over the configuration file. Questions are only asked for the
/// values found in neither of them.
pub fn resolve_settings<R: BufRead, W: Write>(
    args: &Args,
    input: &mut R,
    out: &mut W,
) -> AnalysisResult<AnalysisSettings> {
    let (config, root) = match args.config.as_deref() {
        Some(p) => {
            info!("Reading configuration {:?}", p);
            let root = Path::new(p).parent().unwrap_or_else(|| Path::new(""));
            (read_config(p)?, root.to_path_buf())
        }
        None => (AnalysisConfig::default(), Path::new("").to_path_buf()),
    };
    debug!("resolve_settings: config: {:?}", config);

    let from_config = |v: &Option<String>| v.as_deref().map(|p| config_path(&root, p));

    let mut pick = |arg: &Option<String>, conf: Option<String>, question: &str| {
        match arg.clone().or(conf) {
            Some(x) => Ok(x),
            None => prompt(&mut *input, &mut *out, question),
        }
    };

    let observation_file = pick(
        &args.observations,
        from_config(&config.observation_file),
        "Provide file name (observation file) (e.g. Obs.txt): ",
    )?;
    let variable_file = pick(
        &args.variables,
        from_config(&config.variable_file),
        "Provide file name (variable file) (e.g. Var.txt): ",
    )?;
    let data_file = pick(
        &args.data,
        from_config(&config.data_file),
        "Provide file name (data file) (e.g. Data.txt): ",
    )?;
    let min_coefficient = pick(
        &args.min_coefficient,
        config.minimum_coefficient()?,
        "Provide minimal coeff value (e.g. 10% = 10): ",
    )?;
    let output_file = pick(
        &args.output,
        from_config(&config.output_file),
        "Provide file name (results file) (e.g. Results.txt): ",
    )?;

    let layout = match args.layout.as_ref().or(config.data_layout.as_ref()) {
        Some(s) => parse_layout(s)?,
        None => DataLayout::default(),
    };

    let summary_file = match (&args.summary, &config.summary_file) {
        (Some(s), _) => Some(s.clone()),
        (None, Some(s)) if s == "stdout" => Some(s.clone()),
        (None, Some(s)) => Some(config_path(&root, s)),
        (None, None) => None,
    };

    Ok(AnalysisSettings {
        observation_file,
        variable_file,
        data_file,
        min_coefficient,
        output_file,
        layout,
        summary_file,
        reference_file: args.reference.clone(),
    })
}
