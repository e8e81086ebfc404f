//! # gcodecrc
//!
//! RepRap line checksums for G-code sent to 3D-printer and CNC firmware over a
//! serial link.
//!
//! ## Architecture
//!
//! gcodecrc is organized as a workspace with multiple crates:
//!
//! 1. **gcodecrc-core** - Error types and stable error kinds
//! 2. **gcodecrc-parser** - Command frame model and line parser
//! 3. **gcodecrc-protocol** - Checksum, `*NN` framing/verification, line numbering
//! 4. **gcodecrc-settings** - Configuration files
//! 5. **gcodecrc** - CLI binary that integrates all crates

pub mod cli;

pub use gcodecrc_core::{Error, ErrorKind, GcodeError, ProtocolError, Result};
pub use gcodecrc_parser::{parse_frame, CommandFrame, GcodeParser, Word};
pub use gcodecrc_protocol::{
    compute_checksum, frame_checksum, frame_line, text_checksum, verify_line, LineNumberer,
    VerifiedLine,
};
pub use gcodecrc_settings::{Config, LoggingSettings, NumberingSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, keeping stdout for command output
/// - RUST_LOG environment variable support, falling back to the configured level
/// - Human-readable or JSON records
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    let registry = tracing_subscriber::registry().with(env_filter);
    if settings.json {
        registry.with(fmt_layer.json()).try_init()?;
    } else {
        registry.with(fmt_layer).try_init()?;
    }

    Ok(())
}
