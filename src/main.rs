// Time a separate-chaining hash table against one dataset in three
// arrangements:
// * Already sorted, ascending and ignoring case.
// * Shuffled, uniformly at random.
// * Reversed, descending and ignoring case.
//
// For each arrangement a fresh table is built, then measure:
// * Insert every name, in order.
// * Search every name, in the same order.
// * Delete every name, in the same order.
//
// Each phase is a single wall-clock span over the whole batch. Results
// are printed and appended to the analysis log as
// `count,label,insert,search,delete`.

use std::{path::PathBuf, process};

use clap::{error::ErrorKind, Parser};
use log::{info, warn};
use rand::{rngs::SmallRng, thread_rng, SeedableRng};

use chain_bench::{
    initialize_logger, load_names, run_all, ChainTable, Error, Orderings, Report, ANALYSIS_FILE,
    DEFAULT_BUCKETS,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// CSV file, header first, name in the second column.
    input: PathBuf,

    /// Maximum number of names to load.
    count: usize,

    /// File the analysis lines are appended to.
    #[arg(short, long, default_value = ANALYSIS_FILE)]
    output: PathBuf,

    /// Seed for the shuffled arrangement, random when omitted.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Initial bucket count of every table.
    #[arg(short, long, default_value_t = DEFAULT_BUCKETS)]
    buckets: usize,
}

// Help and version exit cleanly, every other argument error is a usage
// error with status 1.
fn exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

fn main() -> Result<(), Error> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => match exit_code(&err) {
            0 => err.exit(),
            code => {
                eprintln!("{}", err);
                process::exit(code);
            }
        },
    };
    initialize_logger();

    let names = load_names(&args.input, args.count)?;
    if names.len() < args.count {
        warn!(
            "{:?} holds {} usable names, {} requested",
            args.input,
            names.len(),
            args.count
        );
    }
    info!("loaded {} names from {:?}", names.len(), args.input);

    let orderings = match args.seed {
        Some(seed) => Orderings::derive(&names, &mut SmallRng::seed_from_u64(seed)),
        None => Orderings::derive(&names, &mut thread_rng()),
    };

    let runs = run_all(&orderings, |arrangement| {
        ChainTable::<&str>::with_buckets(arrangement.label(), args.buckets)
    });

    let report = Report::new(args.count, runs);
    report.print()?;
    report.append_to(&args.output)
}
