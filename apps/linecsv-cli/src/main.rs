use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;

use config::{DialectArgs, OutputArgs};
use error::CliResult;

#[derive(Parser)]
#[command(name = "linecsv")]
#[command(about = "Read, inspect and re-encode line-oriented CSV data")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the field names of a file or directory of part files
    Headers {
        /// Input file or directory
        input: PathBuf,

        #[command(flatten)]
        dialect: DialectArgs,
    },

    /// Copy records from one dialect to another
    Convert {
        /// Input file or directory
        input: PathBuf,

        /// Output file
        output: PathBuf,

        #[command(flatten)]
        dialect: DialectArgs,

        #[command(flatten)]
        output_args: OutputArgs,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Headers { input, dialect } => commands::headers::execute(input, dialect),

        Commands::Convert {
            input,
            output,
            dialect,
            output_args,
        } => commands::convert::execute(input, output, dialect, output_args),
    }
}
