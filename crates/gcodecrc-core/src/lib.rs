//! # gcodecrc core
//!
//! Error types shared by the parser, protocol and settings crates.

pub mod error;

pub use error::{Error, ErrorKind, GcodeError, ProtocolError, Result};
