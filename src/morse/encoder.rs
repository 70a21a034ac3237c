// src/morse/encoder.rs  —  Text → EncodedMessage
use super::message::{EncodedChar, EncodedMessage, EncodedWord};

/// Every character the encoder knows, in display order: letters, digits,
/// punctuation.
pub const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz0123456789.,?=/:()+-&\"'@";

/// ITU Morse code table
pub fn char_to_morse(c: char) -> Option<&'static str> {
    match c.to_ascii_uppercase() {
        'A' => Some(".-"),    'B' => Some("-..."),  'C' => Some("-.-."),
        'D' => Some("-.."),   'E' => Some("."),      'F' => Some("..-."),
        'G' => Some("--."),   'H' => Some("...."),   'I' => Some(".."),
        'J' => Some(".---"),  'K' => Some("-.-"),    'L' => Some(".-.."),
        'M' => Some("--"),    'N' => Some("-."),     'O' => Some("---"),
        'P' => Some(".--."),  'Q' => Some("--.-"),   'R' => Some(".-."),
        'S' => Some("..."),   'T' => Some("-"),      'U' => Some("..-"),
        'V' => Some("...-"),  'W' => Some(".--"),    'X' => Some("-..-"),
        'Y' => Some("-.--"),  'Z' => Some("--.."),
        '0' => Some("-----"), '1' => Some(".----"),  '2' => Some("..---"),
        '3' => Some("...--"), '4' => Some("....-"),  '5' => Some("....."),
        '6' => Some("-...."), '7' => Some("--..."),  '8' => Some("---.."),
        '9' => Some("----."),
        '.' => Some(".-.-.-"),',' => Some("--..--"), '?' => Some("..--.."),
        '/' => Some("-..-."), '+' => Some(".-.-."),  '=' => Some("-...-"),
        '-' => Some("-....-"),'@' => Some(".--.-."), '(' => Some("-.--."),
        ')' => Some("-.--.-"),'\'' => Some(".----."),':' => Some("---..."),
        '&' => Some(".-..."), '"' => Some(".-..-."),
        _   => None,
    }
}

/// `~sk~` or `<SK>` → `Some("sk")`; letters of a prosign are run together.
fn prosign_body(word: &str) -> Option<&str> {
    if word.len() <= 2 {
        return None;
    }
    let wrapped = (word.starts_with('~') && word.ends_with('~'))
        || (word.starts_with('<') && word.ends_with('>'));
    wrapped.then(|| &word[1..word.len() - 1])
}

/// Encode one whitespace-free word.  Characters missing from the table are
/// skipped; `None` if nothing is left.
pub fn encode_word(word: &str) -> Option<EncodedWord> {
    let (body, prosign) = match prosign_body(word) {
        Some(b) => (b, true),
        None    => (word, false),
    };
    let chars: Vec<EncodedChar> = body
        .chars()
        .filter_map(char_to_morse)
        .map(EncodedChar::new)
        .collect();
    if chars.is_empty() {
        log::debug!("[encoder] dropping word {word:?}: no encodable characters");
        return None;
    }
    Some(EncodedWord::new(chars, body.to_lowercase(), prosign))
}

/// Encode full text into words of dot/dash characters
pub fn encode(text: &str) -> EncodedMessage {
    EncodedMessage::new(text.split_whitespace().filter_map(encode_word).collect())
}
