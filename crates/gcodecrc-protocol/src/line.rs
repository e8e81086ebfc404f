//! Sender and receiver sides of the `*NN` checksum suffix
//!
//! If present, the checksum is the last field of a line, before any comment.
//! A line must carry both a line number and a checksum, or neither.

use gcodecrc_core::{ProtocolError, Result};
use gcodecrc_parser::{CommandFrame, GcodeParser};
use tracing::{trace, warn};

use crate::checksum::{compute_checksum, require_line_number};

/// A received line that passed verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedLine {
    /// The parsed frame
    pub frame: CommandFrame,
    /// Whether a checksum was present and compared
    pub checked: bool,
}

/// Render a numbered frame with its checksum suffix: `N12 G1 X5*NN`
pub fn frame_line(frame: &CommandFrame) -> std::result::Result<String, ProtocolError> {
    require_line_number(frame)?;
    Ok(append_checksum(frame.to_text()))
}

pub(crate) fn append_checksum(text: String) -> String {
    let checksum = compute_checksum(&text);
    format!("{text}*{checksum}")
}

/// Verify a received line against its checksum suffix.
///
/// Lines with neither a line number nor a checksum are accepted unchecked.
/// A line with only one of the two is a protocol violation.
pub fn verify_line(raw: &str) -> Result<VerifiedLine> {
    let (frame, checksum_offset) = GcodeParser::new().parse_with_checksum_offset(raw)?;

    match (frame.has_line_number(), frame.checksum) {
        (false, None) => Ok(VerifiedLine {
            frame,
            checked: false,
        }),
        (true, None) => Err(ProtocolError::MissingChecksum {
            line_number: frame.line_number,
        }
        .into()),
        (false, Some(received)) => Err(ProtocolError::ChecksumWithoutLineNumber { received }.into()),
        (true, Some(received)) => {
            let covered = checksum_offset.map_or(raw, |offset| &raw[..offset]);
            let expected = compute_checksum(covered);
            if expected != received {
                warn!(
                    line_number = frame.line_number,
                    expected, received, "checksum mismatch"
                );
                return Err(ProtocolError::ChecksumMismatch {
                    line_number: frame.line_number,
                    expected,
                    received,
                }
                .into());
            }
            trace!(line_number = frame.line_number, "line verified");
            Ok(VerifiedLine {
                frame,
                checked: true,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gcodecrc_core::ErrorKind;
    use gcodecrc_parser::Word;

    #[test]
    fn test_frame_line() {
        let frame = CommandFrame::new(vec![Word::new('G', "28")]).with_line_number(2);
        assert_eq!(frame_line(&frame).unwrap(), "N2 G28*49");
    }

    #[test]
    fn test_frame_line_unnumbered() {
        let frame = CommandFrame::new(vec![Word::new('G', "28")]);
        assert_eq!(
            frame_line(&frame),
            Err(ProtocolError::MissingLineNumber { line_number: 0 })
        );
    }

    #[test]
    fn test_verify_line_ok() {
        let verified = verify_line("N123 G1 X10*113").unwrap();
        assert!(verified.checked);
        assert_eq!(verified.frame.line_number, 123);
    }

    #[test]
    fn test_verify_line_with_comment() {
        let verified = verify_line("N1 M110*2 ; reset counter").unwrap();
        assert!(verified.checked);
        assert_eq!(verified.frame.comment.as_deref(), Some("reset counter"));
    }

    #[test]
    fn test_verify_line_star_inside_comment() {
        let verified = verify_line("N1 M110*2 (a*b)").unwrap();
        assert!(verified.checked);
        assert_eq!(verified.frame.comment.as_deref(), Some("a*b"));

        let verified = verify_line("N1 M110*2 ; a*b").unwrap();
        assert!(verified.checked);
    }

    #[test]
    fn test_verify_line_semicolon_inside_comment() {
        let text = "N1 G28 (a;b)";
        let line = format!("{text}*{}", compute_checksum(text));
        let verified = verify_line(&line).unwrap();
        assert!(verified.checked);
        assert_eq!(verified.frame.checksum, Some(43));
    }

    #[test]
    fn test_verify_line_unchecked() {
        let verified = verify_line("G28 ; home").unwrap();
        assert!(!verified.checked);
    }

    #[test]
    fn test_verify_line_mismatch() {
        let err = verify_line("N123 G1 X11*113").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ChecksumMismatch);
        assert!(matches!(
            err,
            gcodecrc_core::Error::Protocol(ProtocolError::ChecksumMismatch {
                line_number: 123,
                expected: 112,
                received: 113,
            })
        ));
    }

    #[test]
    fn test_verify_line_pairing() {
        let err = verify_line("N5 G28").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingChecksum);

        let err = verify_line("G28*17").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ChecksumWithoutLineNumber);
    }
}
