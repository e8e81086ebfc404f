//! G-Code command frame types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use gcodecrc_core::GcodeError;

/// A single `<letter><value>` field of a frame
///
/// The value keeps the exact text it was written with (`X10.50` stays
/// `10.50`) so rendering a parsed frame reproduces its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// Upper-case field letter (`G`, `M`, `X`, ...)
    pub letter: char,
    /// Value text following the letter, possibly empty (`G28 X Y`)
    pub value: String,
}

impl Word {
    /// Create a new word, normalising the letter to upper case
    pub fn new(letter: char, value: impl Into<String>) -> Self {
        Self {
            letter: letter.to_ascii_uppercase(),
            value: value.into(),
        }
    }

    /// Numeric value of the word, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        self.value.parse().ok()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter, self.value)
    }
}

/// One logical G-code instruction line
///
/// A frame carries an optional line number, its command words, an optional
/// free-text argument and whatever checksum and comment were read with it.
/// Only the line number, words and text take part in [`CommandFrame::to_text`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandFrame {
    /// Line number; values `<= 0` mean the frame is unnumbered
    pub line_number: i64,
    /// Command words in transmission order
    pub words: Vec<Word>,
    /// Free-text argument of string commands (`M117 Hello`)
    pub text: Option<String>,
    /// Checksum read from a `*NN` suffix
    pub checksum: Option<u8>,
    /// Comment text read from the line
    pub comment: Option<String>,
}

impl CommandFrame {
    /// Create an unnumbered frame from its words
    pub fn new(words: Vec<Word>) -> Self {
        Self {
            words,
            ..Self::default()
        }
    }

    /// Set the line number for this frame
    pub fn with_line_number(mut self, line_number: i64) -> Self {
        self.line_number = line_number;
        self
    }

    /// Set the free-text argument for this frame
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Whether the frame takes part in numbered transmission
    pub fn has_line_number(&self) -> bool {
        self.line_number > 0
    }

    /// The command word (`G1`, `M110`), if any
    pub fn command(&self) -> Option<&Word> {
        self.words.first()
    }

    /// First word with the given letter
    pub fn word(&self, letter: char) -> Option<&Word> {
        let letter = letter.to_ascii_uppercase();
        self.words.iter().find(|w| w.letter == letter)
    }

    /// Render the frame as it is transmitted, without checksum or comment
    pub fn to_text(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(self.words.len() + 2);
        if self.has_line_number() {
            parts.push(format!("N{}", self.line_number));
        }
        parts.extend(self.words.iter().map(Word::to_string));
        if let Some(text) = &self.text {
            parts.push(text.clone());
        }
        parts.join(" ")
    }
}

impl fmt::Display for CommandFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl FromStr for CommandFrame {
    type Err = GcodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_frame(s)
    }
}
