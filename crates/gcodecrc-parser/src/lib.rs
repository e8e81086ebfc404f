//! G-Code command frames
//!
//! This crate provides:
//! - The [`CommandFrame`] model of one G-code line
//! - Deterministic rendering of a frame as transmitted text
//! - Parsing raw text into frames

pub mod frame;
pub mod parser;

pub use frame::{CommandFrame, Word};
pub use parser::{parse_frame, GcodeParser};
