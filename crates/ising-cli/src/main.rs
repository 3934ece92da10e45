//! ising-verify command-line interface
//!
//! Statistical verification of Ising annealer outputs, plus the small file
//! conversions around an annealer run:
//!
//! ```text
//! ising-verify pvalue samples.csv --estimate-energy
//! ising-verify pvalue result.json -s 5000 --seed 42 --parallel --output json
//! ising-verify qubo problem.csv --num-reads 2000
//! ising-verify solution result.json -o solutions.csv
//! ising-verify timing result.json --fields qpu_access_time,minimum
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::pvalue::{InputFormat, OutputFormat};
use commands::{pvalue, qubo, solution, timing, version};

/// Statistical verification of Ising annealer outputs
#[derive(Parser)]
#[command(name = "ising-verify")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the p-value that the lowest sampled energy is the ground state
    Pvalue {
        /// Sample table with `energy` and `num_occurrences` columns, or a serialized sample set
        input: PathBuf,

        /// Shape parameter of the energy distribution model
        #[arg(long, default_value_t = ising_stats::DEFAULT_ALPHA, allow_negative_numbers = true)]
        alpha: f64,

        /// Number of bootstrap samples
        #[arg(short = 's', long, default_value_t = ising_stats::DEFAULT_BOOTSTRAP_SAMPLES)]
        bootstrap_samples: usize,

        /// Also print a ground-state energy estimate from the raw sample
        #[arg(long)]
        estimate_energy: bool,

        /// Seed for the bootstrap random stream (random if omitted)
        #[arg(long, env = "ISING_VERIFY_SEED")]
        seed: Option<u64>,

        /// Run bootstrap replicates on all cores
        #[arg(long)]
        parallel: bool,

        /// Input format
        #[arg(long, value_enum, default_value = "auto")]
        format: InputFormat,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Read a sparse QUBO (`i,j,Qij`) and echo it with the sampling parameters
    Qubo {
        /// CSV file with a header line; symmetric, upper or lower triangular
        input: PathBuf,

        /// Number of reads
        #[arg(long, default_value = "1000")]
        num_reads: u32,

        /// Annealing time per sample in microseconds
        #[arg(long, default_value = "20.0")]
        annealing_time: f64,

        /// Disable autoscale
        #[arg(long)]
        no_autoscale: bool,
    },

    /// Convert a sample set into a CSV table of solutions sorted by energy
    Solution {
        /// Serialized sample set
        input: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Drop the chain break fraction column
        #[arg(short = 'n', long)]
        no_chain_break: bool,
    },

    /// Print the solver timing of a sample set as CSV
    Timing {
        /// Serialized sample set
        input: PathBuf,

        /// Omit the header line
        #[arg(long)]
        noheader: bool,

        /// Comma-separated fields to print, in order (all if omitted)
        #[arg(long, value_delimiter = ',')]
        fields: Vec<String>,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Pvalue {
            input,
            alpha,
            bootstrap_samples,
            estimate_energy,
            seed,
            parallel,
            format,
            output,
        } => pvalue::execute(
            &input,
            alpha,
            bootstrap_samples,
            estimate_energy,
            seed,
            parallel,
            format,
            output,
        ),

        Commands::Qubo {
            input,
            num_reads,
            annealing_time,
            no_autoscale,
        } => qubo::execute(&input, num_reads, annealing_time, !no_autoscale),

        Commands::Solution {
            input,
            output,
            no_chain_break,
        } => solution::execute(&input, output.as_deref(), no_chain_break),

        Commands::Timing {
            input,
            noheader,
            fields,
        } => timing::execute(&input, noheader, &fields),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}
