mod analysis;
mod args;

use clap::Parser;
use env_logger::Env;
use log::debug;

use std::io;

use crate::analysis::config_reader::resolve_settings;
use crate::analysis::run_analysis;

fn main() {
    let args = args::Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();
    debug!("args: {:?}", args);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let settings = {
        let mut input = stdin.lock();
        let mut out = stdout.lock();
        resolve_settings(&args, &mut input, &mut out)
    };

    let res = settings.and_then(|s| run_analysis(&s).map(|_| s));
    match res {
        Ok(s) => {
            println!("Completed. Results stored in {} file", s.output_file);
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
