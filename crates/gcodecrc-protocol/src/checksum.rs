//! RepRap line checksum
//!
//! See <http://reprap.org/wiki/G-code#.2A:_Checksum>. The firmware compares
//! the transmitted checksum against a locally computed value and requests a
//! repeat transmission when they differ.

use gcodecrc_core::{ProtocolError, Result};
use gcodecrc_parser::{parse_frame, CommandFrame};
use tracing::{debug, trace};

/// Checksum constant folded in after the bytes
const CHECKSUM_SEED: u32 = 32;

/// Compute the checksum of the bytes of a line.
///
/// The input is the line exactly as transmitted, without the `*NN` suffix
/// and without any comment. Each byte is XORed into the accumulator, then the
/// accumulator is XORed with 32.
pub fn compute_checksum(bytes: impl AsRef<[u8]>) -> u8 {
    let check = bytes
        .as_ref()
        .iter()
        .fold(0u32, |acc, &b| acc ^ (u32::from(b) & 0xFF));
    ((check ^ CHECKSUM_SEED) & 0xFF) as u8
}

/// Checksum of a frame, rendered with [`CommandFrame::to_text`].
///
/// Fails with [`ProtocolError::MissingLineNumber`] when the frame carries no
/// positive line number.
pub fn frame_checksum(frame: &CommandFrame) -> std::result::Result<u8, ProtocolError> {
    require_line_number(frame)?;
    let text = frame.to_text();
    let checksum = compute_checksum(&text);
    trace!(line_number = frame.line_number, checksum, "frame checksum");
    Ok(checksum)
}

/// Checksum of raw line text.
///
/// The text is parsed only to read its line number; the checksum covers the
/// text exactly as given, not a re-rendering of the parsed frame.
pub fn text_checksum(raw: &str) -> Result<u8> {
    let frame = parse_frame(raw)?;
    require_line_number(&frame)?;
    let checksum = compute_checksum(raw);
    trace!(line_number = frame.line_number, checksum, "text checksum");
    Ok(checksum)
}

pub(crate) fn require_line_number(frame: &CommandFrame) -> std::result::Result<(), ProtocolError> {
    if frame.has_line_number() {
        Ok(())
    } else {
        debug!(
            line_number = frame.line_number,
            "checksum requested for unnumbered frame"
        );
        Err(ProtocolError::MissingLineNumber {
            line_number: frame.line_number,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gcodecrc_core::ErrorKind;
    use gcodecrc_parser::Word;

    #[test]
    fn test_empty_input() {
        assert_eq!(compute_checksum(""), 32);
        assert_eq!(compute_checksum(b""), 32);
    }

    #[test]
    fn test_reference_vectors() {
        assert_eq!(compute_checksum("N1 M110"), 2);
        assert_eq!(compute_checksum("N123 G1 X10"), 113);
        assert_eq!(compute_checksum("N2 G28"), 49);
        assert_eq!(compute_checksum("N3 G1 X10 Y20 F3000"), 108);
        assert_eq!(compute_checksum("N10 M105"), 54);
    }

    #[test]
    fn test_high_bytes() {
        assert_eq!(compute_checksum([0xFFu8]), 223);
        assert_eq!(compute_checksum([0x80u8, 0x01]), 161);
    }

    #[test]
    fn test_whitespace_counts() {
        assert_ne!(compute_checksum("N1 M110"), compute_checksum("N1  M110"));
    }

    #[test]
    fn test_frame_checksum() {
        let frame = CommandFrame::new(vec![Word::new('M', "110")]).with_line_number(1);
        assert_eq!(frame_checksum(&frame), Ok(2));
    }

    #[test]
    fn test_frame_checksum_requires_line_number() {
        let frame = CommandFrame::new(vec![Word::new('M', "110")]);
        assert_eq!(
            frame_checksum(&frame),
            Err(ProtocolError::MissingLineNumber { line_number: 0 })
        );
        let frame = frame.with_line_number(-1);
        assert_eq!(
            frame_checksum(&frame),
            Err(ProtocolError::MissingLineNumber { line_number: -1 })
        );
    }

    #[test]
    fn test_text_checksum() {
        assert_eq!(text_checksum("N123 G1 X10").unwrap(), 113);
    }

    #[test]
    fn test_text_checksum_errors() {
        let err = text_checksum("G28").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingLineNumber);

        let err = text_checksum("N0 M110").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingLineNumber);

        let err = text_checksum("N1 G1 #").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedFrameText);
    }
}
