use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

use gcodecrc::cli::{frame_lines, open_input, verify_lines};
use gcodecrc::{init_logging, parse_frame, text_checksum, Config};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")"),
    about = "RepRap line checksums for G-code"
)]
struct Args {
    /// Config file (.toml or .json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level, overriding the config file
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the checksum of a numbered line
    Checksum {
        /// Line text, without `*NN` suffix or comment
        line: String,
    },
    /// Print the parsed frame of a line as JSON
    Parse {
        /// Line text
        line: String,
    },
    /// Number and checksum every line of a G-code file (stdin if omitted)
    Frame {
        /// Input file
        file: Option<PathBuf>,
    },
    /// Verify line numbers and checksums of every line (stdin if omitted)
    Verify {
        /// Input file
        file: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config =
        Config::load_or_default(args.config.as_deref()).context("failed to load config")?;
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    init_logging(&config.logging)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Checksum { line } => {
            let checksum = text_checksum(&line)?;
            writeln!(out, "{checksum}")?;
        }
        Command::Parse { line } => {
            let frame = parse_frame(&line)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&frame)?)?;
        }
        Command::Frame { file } => {
            let input = open_input(file.as_deref())?;
            frame_lines(input, &mut out, &config.numbering)?;
        }
        Command::Verify { file } => {
            let input = open_input(file.as_deref())?;
            let report = verify_lines(input, &mut out)?;
            if !report.is_clean() {
                out.flush()?;
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
