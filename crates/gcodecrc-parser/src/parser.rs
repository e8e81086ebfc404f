//! G-Code line parser
//!
//! Turns one raw line into a [`CommandFrame`]. The grammar covers what a
//! line-oriented sender needs: an optional leading `N` line number, words of
//! the form `<letter><value>`, string arguments of file/message commands, a
//! trailing `*NN` checksum, and `;` or `( ... )` comments.

use regex::Regex;
use std::sync::OnceLock;
use tracing::trace;

use crate::frame::{CommandFrame, Word};
use gcodecrc_core::GcodeError;

/// M-codes whose remaining text is a single string argument
const STRING_ARG_CODES: [&str; 5] = ["23", "28", "30", "117", "118"];

/// Stateless G-Code line parser
#[derive(Debug, Clone, Copy, Default)]
pub struct GcodeParser;

impl GcodeParser {
    /// Create a new G-Code parser
    pub fn new() -> Self {
        Self
    }

    /// Parse a raw G-Code line into a frame
    pub fn parse(&self, raw: &str) -> Result<CommandFrame, GcodeError> {
        self.parse_with_checksum_offset(raw).map(|(frame, _)| frame)
    }

    /// Parse a raw G-Code line, also returning the byte offset of its `*`.
    ///
    /// `&raw[..offset]` is exactly the text covered by the checksum; a `*` or
    /// `;` inside a comment never counts.
    pub fn parse_with_checksum_offset(
        &self,
        raw: &str,
    ) -> Result<(CommandFrame, Option<usize>), GcodeError> {
        let (code, comment) = split_comment(raw)?;
        let (code, checksum) = split_checksum(&code)?;
        let checksum_offset = checksum.map(|_| code.len());

        if code.trim().is_empty() {
            return Err(GcodeError::Empty);
        }

        let mut frame = CommandFrame {
            checksum,
            comment,
            ..CommandFrame::default()
        };
        parse_words(code, &mut frame)?;

        trace!(
            line_number = frame.line_number,
            words = frame.words.len(),
            checksum = ?frame.checksum,
            "parsed frame"
        );
        Ok((frame, checksum_offset))
    }
}

/// Parse a raw G-Code line with a default parser
pub fn parse_frame(raw: &str) -> Result<CommandFrame, GcodeError> {
    GcodeParser::new().parse(raw)
}

fn word_regex() -> &'static Regex {
    static WORD_REGEX: OnceLock<Regex> = OnceLock::new();
    WORD_REGEX.get_or_init(|| {
        Regex::new(r"^([A-Za-z])([-+]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)?)")
            .expect("invalid regex pattern")
    })
}

/// Separate comments from code.
///
/// Parenthesised comments are blanked out with spaces and a `;` comment is
/// cut off, so byte offsets in the returned code match the raw line.
fn split_comment(raw: &str) -> Result<(String, Option<String>), GcodeError> {
    let mut code = String::with_capacity(raw.len());
    let mut comments: Vec<&str> = Vec::new();
    let mut rest = raw;
    let mut offset = 0;

    while let Some(pos) = rest.find(|c: char| c == ';' || c == '(') {
        code.push_str(&rest[..pos]);
        if rest[pos..].starts_with(';') {
            comments.push(rest[pos + 1..].trim());
            rest = "";
            break;
        }

        let close = rest[pos..]
            .find(')')
            .ok_or(GcodeError::UnterminatedComment {
                column: offset + pos,
            })?;
        comments.push(rest[pos + 1..pos + close].trim());
        code.extend(std::iter::repeat(' ').take(close + 1));
        offset += pos + close + 1;
        rest = &rest[pos + close + 1..];
    }
    code.push_str(rest);

    let comments: Vec<&str> = comments.into_iter().filter(|c| !c.is_empty()).collect();
    let comment = if comments.is_empty() {
        None
    } else {
        Some(comments.join(" "))
    };
    Ok((code, comment))
}

fn split_checksum(code: &str) -> Result<(&str, Option<u8>), GcodeError> {
    match code.rfind('*') {
        None => Ok((code, None)),
        Some(pos) => {
            let value = code[pos + 1..].trim();
            let checksum = value
                .parse::<u8>()
                .map_err(|_| GcodeError::InvalidChecksum {
                    value: value.to_string(),
                })?;
            Ok((&code[..pos], Some(checksum)))
        }
    }
}

fn parse_words(code: &str, frame: &mut CommandFrame) -> Result<(), GcodeError> {
    let regex = word_regex();
    let mut pos = 0;
    let mut first = true;

    loop {
        let rest = &code[pos..];
        let trimmed = rest.trim_start();
        if trimmed.is_empty() {
            break;
        }
        pos += rest.len() - trimmed.len();

        let caps = regex
            .captures(trimmed)
            .ok_or_else(|| invalid_word(trimmed, pos))?;
        let (matched, [letter, value]) = caps.extract();
        let letter = letter.as_bytes()[0].to_ascii_uppercase() as char;
        let after = &trimmed[matched.len()..];

        if letter == 'M' && STRING_ARG_CODES.contains(&value) {
            frame.words.push(Word::new(letter, value));
            let text = after.trim();
            if !text.is_empty() {
                frame.text = Some(text.to_string());
            }
            break;
        }

        if after
            .chars()
            .next()
            .is_some_and(|c| !c.is_whitespace() && !c.is_ascii_alphabetic())
        {
            return Err(invalid_word(trimmed, pos));
        }

        if letter == 'N' && first {
            frame.line_number =
                value
                    .parse::<i64>()
                    .map_err(|_| GcodeError::InvalidLineNumber {
                        value: value.to_string(),
                    })?;
        } else {
            frame.words.push(Word::new(letter, value));
        }

        first = false;
        pos += matched.len();
    }

    Ok(())
}

fn invalid_word(rest: &str, column: usize) -> GcodeError {
    let word = rest.split_whitespace().next().unwrap_or(rest);
    GcodeError::InvalidWord {
        word: word.to_string(),
        column,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_comment_semicolon() {
        let (code, comment) = split_comment("G1 X10 ; move").unwrap();
        assert_eq!(code, "G1 X10 ");
        assert_eq!(comment.as_deref(), Some("move"));
    }

    #[test]
    fn test_split_comment_parentheses_keep_offsets() {
        let raw = "G1 (fast) X10";
        let (code, comment) = split_comment(raw).unwrap();
        assert_eq!(code.len(), raw.len());
        assert_eq!(code, format!("G1 {} X10", " ".repeat(6)));
        assert_eq!(comment.as_deref(), Some("fast"));
    }

    #[test]
    fn test_split_comment_unterminated() {
        assert_eq!(
            split_comment("G1 (oops X10"),
            Err(GcodeError::UnterminatedComment { column: 3 })
        );
    }

    #[test]
    fn test_split_checksum() {
        assert_eq!(split_checksum("N1 M110*2").unwrap(), ("N1 M110", Some(2)));
        assert_eq!(split_checksum("N1 M110 * 2 ").unwrap(), ("N1 M110 ", Some(2)));
        assert_eq!(split_checksum("G28").unwrap(), ("G28", None));
    }

    #[test]
    fn test_split_checksum_out_of_range() {
        assert_eq!(
            split_checksum("N1 M110*256"),
            Err(GcodeError::InvalidChecksum {
                value: "256".to_string()
            })
        );
    }

    #[test]
    fn test_checksum_offset() {
        let parser = GcodeParser::new();
        let raw = "N1 M110*2 (a*b)";
        let (frame, offset) = parser.parse_with_checksum_offset(raw).unwrap();
        assert_eq!(frame.checksum, Some(2));
        assert_eq!(offset, Some(7));
        assert_eq!(&raw[..7], "N1 M110");

        let raw = "N1 G28 (a;b)*43";
        let (frame, offset) = parser.parse_with_checksum_offset(raw).unwrap();
        assert_eq!(frame.checksum, Some(43));
        assert_eq!(offset.map(|o| &raw[..o]), Some("N1 G28 (a;b)"));

        let (_, offset) = parser.parse_with_checksum_offset("G28 ; a*b").unwrap();
        assert_eq!(offset, None);
    }

    #[test]
    fn test_leading_n_only_counts_first() {
        let frame = parse_frame("M110 N100").unwrap();
        assert_eq!(frame.line_number, 0);
        assert_eq!(frame.word('N').map(|w| w.value.as_str()), Some("100"));
    }
}
