//! Huffman file compressor.
//!
//! ```bash
//! huffpack compress input.txt input.huff
//! huffpack decompress input.huff restored.txt
//! huffpack --log-level debug compress input.txt input.huff
//! ```

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use huffpack::{compress, decompress, Summary};

#[derive(Parser, Debug)]
#[command(name = "huffpack")]
#[command(version)]
#[command(about = "Static Huffman compressor", long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress INPUT into OUTPUT
    Compress { input: PathBuf, output: PathBuf },
    /// Decompress INPUT into OUTPUT
    Decompress { input: PathBuf, output: PathBuf },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("failed to install log subscriber");
    }

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> huffpack::Result<()> {
    match command {
        Command::Compress { input, output } => {
            info!(input = %input.display(), output = %output.display(), "compressing");
            let summary = compress(File::open(&input)?, File::create(&output)?)?;
            report(&summary);
        }
        Command::Decompress { input, output } => {
            info!(input = %input.display(), output = %output.display(), "decompressing");
            let summary = decompress(File::open(&input)?, File::create(&output)?)?;
            report(&summary);
        }
    }
    Ok(())
}

fn report(summary: &Summary) {
    info!(
        symbols = summary.symbols,
        unique = summary.unique_symbols,
        height = ?summary.tree_height,
        "coding tree"
    );
    info!(
        input_bytes = summary.input_bytes,
        output_bytes = summary.output_bytes,
        ratio = format_args!("{:.5}", summary.ratio()),
        "done"
    );
}
