//! # gcodecrc protocol
//!
//! Line checksums for G-code sent over a serial link, following the RepRap
//! `N<line> <command>*<checksum>` convention.
//!
//! A line number and a checksum always travel together: a numbered line must
//! carry a checksum and an unnumbered line must not. This crate provides:
//! - [`compute_checksum`]: the byte-level checksum fold
//! - [`frame_checksum`] / [`text_checksum`]: checksums gated on a line number
//! - [`frame_line`] / [`verify_line`]: sender and receiver sides of `*NN`
//! - [`LineNumberer`]: sequential numbering for a transmission

pub mod checksum;
pub mod line;
pub mod numbering;

pub use checksum::{compute_checksum, frame_checksum, text_checksum};
pub use line::{frame_line, verify_line, VerifiedLine};
pub use numbering::LineNumberer;
