use clap::Parser;

/// Ranks observations described by several variables with the standardized sum method.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the analysis (input files, minimum coefficient,
    /// output file). Options passed on the command line take precedence over the content of the file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The observation file: one observation name per line.
    #[clap(long, value_parser)]
    pub observations: Option<String>,

    /// (file path) The variable file: one variable name per line.
    #[clap(long, value_parser)]
    pub variables: Option<String>,

    /// (file path) The data file: numbers separated by spaces or new lines, all of them stimulants.
    #[clap(short, long, value_parser)]
    pub data: Option<String>,

    /// (number, 0 or more) The minimum coefficient of variation in percent (10% = 10). Variables below
    /// it are reported for removal.
    #[clap(short, long, value_parser)]
    pub min_coefficient: Option<String>,

    /// (file path) The file the report is written to.
    #[clap(short, long, value_parser)]
    pub output: Option<String>,

    /// (default observation-major) How the data file is laid out: 'observation-major' (one observation
    /// after the other) or 'variable-major' (one variable after the other). Data files written for the
    /// historical C version of the program list one variable after the other: pass 'variable-major'
    /// for them, the default layout would silently read them transposed.
    #[clap(long, value_parser)]
    pub layout: Option<String>,

    /// (file path or 'stdout', optional) If specified, the results are also written in JSON format
    /// to the given location.
    #[clap(short, long, value_parser)]
    pub summary: Option<String>,

    /// (file path, optional) A reference report. If provided, linord checks that the report it
    /// produces matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
