//! Command implementations behind the `gcodecrc` binary
//!
//! Each command reads lines from a `BufRead` and writes results to a `Write`
//! so it can run against files, stdin or in-memory buffers alike.

use anyhow::Context;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use tracing::{debug, info};

use gcodecrc_core::{Error, GcodeError};
use gcodecrc_parser::parse_frame;
use gcodecrc_protocol::{verify_line, LineNumberer};
use gcodecrc_settings::NumberingSettings;

/// Open a file for reading, or stdin when no path is given
pub fn open_input(path: Option<&Path>) -> anyhow::Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// Number and checksum every G-code line of `input`.
///
/// Blank and comment-only lines are dropped; comments and any existing line
/// numbers or checksums are replaced. Returns the number of framed lines.
pub fn frame_lines<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    settings: &NumberingSettings,
) -> anyhow::Result<usize> {
    let numberer = LineNumberer::starting_at(settings.start_line);
    if settings.send_reset {
        writeln!(output, "{}", numberer.reset_line())?;
    }

    let mut framed = 0;
    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let frame = match parse_frame(&line) {
            Ok(frame) => frame,
            Err(GcodeError::Empty) => continue,
            Err(e) => return Err(e).with_context(|| format!("line {}", index + 1)),
        };
        writeln!(output, "{}", numberer.number(frame))?;
        framed += 1;
    }

    info!(framed, "framed lines");
    Ok(framed)
}

/// Outcome of verifying a stream of lines
#[derive(Debug, Default)]
pub struct VerifyReport {
    /// Lines whose checksum matched
    pub checked: usize,
    /// Lines carrying neither line number nor checksum
    pub unchecked: usize,
    /// One-based input line index and error of each failing line
    pub failures: Vec<(usize, Error)>,
}

impl VerifyReport {
    /// Whether every line passed
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Verify every line of `input`, writing one report line per failure.
pub fn verify_lines<R: BufRead, W: Write>(input: R, output: &mut W) -> anyhow::Result<VerifyReport> {
    let mut report = VerifyReport::default();

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        match verify_line(&line) {
            Ok(verified) if verified.checked => report.checked += 1,
            Ok(_) => report.unchecked += 1,
            Err(Error::Gcode(GcodeError::Empty)) => continue,
            Err(e) => {
                writeln!(output, "line {}: [{}] {}", index + 1, e.kind(), e)?;
                report.failures.push((index + 1, e));
            }
        }
    }

    debug!(
        checked = report.checked,
        unchecked = report.unchecked,
        failures = report.failures.len(),
        "verification finished"
    );
    Ok(report)
}
