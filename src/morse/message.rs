// src/morse/message.rs  —  Encoded message: words → chars → dot/dash symbols
use std::fmt;

pub const DOT:  char = '.';
pub const DASH: char = '-';

/// Separator used by [`EncodedMessage::dot_dash_string`] between words
const WORD_JOIN: &str = " / ";

/// One Morse character as its dot/dash symbols, e.g. `"...."` for H.
///
/// The encoder only ever produces `.` and `-`; anything else is rejected when
/// the message is sequenced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedChar(String);

impl EncodedChar {
    pub fn new(code: impl Into<String>) -> Self { Self(code.into()) }
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ { self.0.chars() }
    pub fn as_str(&self) -> &str { &self.0 }
    pub fn len(&self) -> usize { self.0.len() }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedWord {
    chars:   Vec<EncodedChar>,
    text:    String,
    prosign: bool,
}

impl EncodedWord {
    pub fn new(chars: Vec<EncodedChar>, text: impl Into<String>, prosign: bool) -> Self {
        Self { chars, text: text.into(), prosign }
    }

    pub fn chars(&self) -> &[EncodedChar] { &self.chars }
    /// Source text the word was encoded from (prosign markers stripped)
    pub fn text(&self) -> &str { &self.text }
    /// Prosign words are sent without inter-letter gaps
    pub fn is_prosign(&self) -> bool { self.prosign }
    pub fn len(&self) -> usize { self.chars.len() }

    /// Total dot + dash count
    pub fn token_count(&self) -> usize {
        self.chars.iter().map(EncodedChar::len).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedMessage {
    words: Vec<EncodedWord>,
}

impl EncodedMessage {
    pub fn new(words: Vec<EncodedWord>) -> Self { Self { words } }
    pub fn words(&self) -> &[EncodedWord] { &self.words }
    pub fn is_empty(&self) -> bool { self.words.is_empty() }

    pub fn token_count(&self) -> usize {
        self.words.iter().map(EncodedWord::token_count).sum()
    }

    /// Dots and dashes; chars split by a space (none inside prosigns),
    /// words split by `" / "`.
    pub fn dot_dash_string(&self) -> String {
        self.words
            .iter()
            .map(|w| {
                let joiner = if w.prosign { "" } else { " " };
                w.chars.iter().map(EncodedChar::as_str).collect::<Vec<_>>().join(joiner)
            })
            .collect::<Vec<_>>()
            .join(WORD_JOIN)
    }

    /// The text this message was encoded from, words joined by a space
    pub fn raw_string(&self) -> String {
        self.words.iter().map(EncodedWord::text).collect::<Vec<_>>().join(" ")
    }
}

impl fmt::Display for EncodedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw_string())
    }
}
