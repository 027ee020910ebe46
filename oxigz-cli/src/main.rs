//! oxigz - gzip and gunzip from the command line.
//!
//! Compresses files to `.gz`, restores them, verifies them and streams
//! their contents to stdout.

mod commands;
mod utils;

use clap::{Parser, Subcommand};
use commands::{TransferOptions, cmd_cat, cmd_gunzip, cmd_gzip, cmd_test};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxigz")]
#[command(author, version, about = "Pure Rust gzip / gunzip")]
#[command(long_about = "
oxigz compresses files into the gzip format and restores them.

Examples:
  oxigz gzip notes.txt
  oxigz gzip -l 9 -k data.bin
  oxigz gzip report.csv -o archive/report.csv.gz
  oxigz gunzip notes.txt.gz
  oxigz test *.gz
  oxigz cat log.gz | grep ERROR
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress files to .gz
    #[command(alias = "c")]
    Gzip {
        /// Files to compress
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output path (single input only)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Compression level: 0 (store) to 9 (best), -1 for the default
        #[arg(short, long, default_value_t = -1, allow_negative_numbers = true)]
        level: i32,

        #[command(flatten)]
        options: TransferArgs,
    },

    /// Decompress .gz files
    #[command(alias = "d")]
    Gunzip {
        /// Files to decompress
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output path (single input only)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        options: TransferArgs,
    },

    /// Test integrity of .gz files
    #[command(alias = "t")]
    Test {
        /// Files to test
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Show a line per file
        #[arg(short, long)]
        verbose: bool,
    },

    /// Decompress .gz files to stdout
    Cat {
        /// Files to print
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

/// Flags shared by `gzip` and `gunzip`.
#[derive(clap::Args)]
struct TransferArgs {
    /// Keep the source file
    #[arg(short, long)]
    keep: bool,

    /// Overwrite an existing destination
    #[arg(short, long)]
    force: bool,

    /// Output as JSON (machine-readable)
    #[arg(short, long)]
    json: bool,

    /// Show a progress bar
    #[arg(short = 'P', long)]
    progress: bool,
}

impl From<TransferArgs> for TransferOptions {
    fn from(args: TransferArgs) -> Self {
        Self {
            keep: args.keep,
            force: args.force,
            json: args.json,
            progress: args.progress,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Gzip {
            files,
            output,
            level,
            options,
        } => cmd_gzip(&files, output.as_deref(), level, &options.into()),
        Commands::Gunzip {
            files,
            output,
            options,
        } => cmd_gunzip(&files, output.as_deref(), &options.into()),
        Commands::Test { files, verbose } => cmd_test(&files, verbose),
        Commands::Cat { files } => cmd_cat(&files),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
