//! Error handling for gcodecrc
//!
//! Provides the error types for every layer of the workspace:
//! - G-Code errors (raw text that is not a well-formed frame)
//! - Protocol errors (line number / checksum pairing violations)
//!
//! All error types use `thiserror` for ergonomic error handling. Each error
//! maps onto a stable [`ErrorKind`] so presentation layers can choose their
//! own wording.

use std::fmt;
use thiserror::Error;

/// G-Code error type
///
/// Raised by the frame parser when raw text cannot be turned into a frame.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GcodeError {
    /// Line is blank or holds only a comment
    #[error("Empty frame")]
    Empty,

    /// A token that is not a `<letter><value>` word
    #[error("Invalid word '{word}' at column {column}")]
    InvalidWord {
        /// The offending token.
        word: String,
        /// Zero-based byte offset of the token in the line.
        column: usize,
    },

    /// The `N` field is present but not an integer
    #[error("Invalid line number '{value}'")]
    InvalidLineNumber {
        /// The text following `N`.
        value: String,
    },

    /// The `*` suffix is not an integer in 0-255
    #[error("Invalid checksum '{value}'")]
    InvalidChecksum {
        /// The text following `*`.
        value: String,
    },

    /// A `(` comment with no closing `)`
    #[error("Unterminated comment at column {column}")]
    UnterminatedComment {
        /// Zero-based byte offset of the opening parenthesis.
        column: usize,
    },
}

/// Protocol error type
///
/// Violations of the rule that a line number and a checksum travel together.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// A checksum was requested for a frame without a positive line number
    #[error("Frame line number expected, got {line_number}")]
    MissingLineNumber {
        /// The line number the frame carried (zero or negative).
        line_number: i64,
    },

    /// A numbered line arrived without a `*NN` suffix
    #[error("Line {line_number} has a line number but no checksum")]
    MissingChecksum {
        /// The line number of the offending line.
        line_number: i64,
    },

    /// A `*NN` suffix arrived on a line without a line number
    #[error("Checksum {received} present without a line number")]
    ChecksumWithoutLineNumber {
        /// The transmitted checksum.
        received: u8,
    },

    /// Transmitted and recomputed checksums differ
    #[error("Checksum mismatch on line {line_number}: expected {expected}, received {received}")]
    ChecksumMismatch {
        /// The line number of the corrupted line.
        line_number: i64,
        /// Checksum recomputed from the line text.
        expected: u8,
        /// Checksum carried by the line.
        received: u8,
    },
}

/// Stable classification of every error the workspace produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Checksum requested for an unnumbered frame
    MissingLineNumber,
    /// Raw text is not a well-formed frame
    MalformedFrameText,
    /// Numbered line without checksum
    MissingChecksum,
    /// Checksum on an unnumbered line
    ChecksumWithoutLineNumber,
    /// Checksum does not match the line text
    ChecksumMismatch,
}

impl ErrorKind {
    /// Machine-readable code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingLineNumber => "missing_line_number",
            Self::MalformedFrameText => "malformed_frame_text",
            Self::MissingChecksum => "missing_checksum",
            Self::ChecksumWithoutLineNumber => "checksum_without_line_number",
            Self::ChecksumMismatch => "checksum_mismatch",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl ProtocolError {
    /// Stable kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingLineNumber { .. } => ErrorKind::MissingLineNumber,
            Self::MissingChecksum { .. } => ErrorKind::MissingChecksum,
            Self::ChecksumWithoutLineNumber { .. } => ErrorKind::ChecksumWithoutLineNumber,
            Self::ChecksumMismatch { .. } => ErrorKind::ChecksumMismatch,
        }
    }
}

/// Main error type for gcodecrc
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// G-Code error
    #[error(transparent)]
    Gcode(#[from] GcodeError),

    /// Protocol error
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl Error {
    /// Stable kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Gcode(_) => ErrorKind::MalformedFrameText,
            Error::Protocol(e) => e.kind(),
        }
    }

    /// Check if this is a G-Code error
    pub fn is_gcode_error(&self) -> bool {
        matches!(self, Error::Gcode(_))
    }

    /// Check if this is a protocol error
    pub fn is_protocol_error(&self) -> bool {
        matches!(self, Error::Protocol(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcode_error_display() {
        let err = GcodeError::InvalidWord {
            word: "#5".to_string(),
            column: 3,
        };
        assert_eq!(err.to_string(), "Invalid word '#5' at column 3");

        let err = GcodeError::InvalidChecksum {
            value: "300".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid checksum '300'");
    }

    #[test]
    fn test_protocol_error_display() {
        let err = ProtocolError::MissingLineNumber { line_number: 0 };
        assert_eq!(err.to_string(), "Frame line number expected, got 0");

        let err = ProtocolError::ChecksumMismatch {
            line_number: 12,
            expected: 40,
            received: 41,
        };
        assert_eq!(
            err.to_string(),
            "Checksum mismatch on line 12: expected 40, received 41"
        );
    }

    #[test]
    fn test_error_kinds() {
        let err: Error = GcodeError::Empty.into();
        assert_eq!(err.kind(), ErrorKind::MalformedFrameText);
        assert!(err.is_gcode_error());

        let err: Error = ProtocolError::MissingLineNumber { line_number: -3 }.into();
        assert_eq!(err.kind(), ErrorKind::MissingLineNumber);
        assert_eq!(err.kind().code(), "missing_line_number");
        assert!(err.is_protocol_error());
    }

    #[test]
    fn test_transparent_display() {
        let err: Error = ProtocolError::MissingChecksum { line_number: 7 }.into();
        assert_eq!(
            err.to_string(),
            "Line 7 has a line number but no checksum"
        );
    }
}
