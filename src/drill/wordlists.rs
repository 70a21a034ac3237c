// src/drill/wordlists.rs  —  Built-in word lists (top words, Q-codes, characters)
use super::LineList;
use crate::morse::encoder::ALPHABET;
use rand::rngs::SmallRng;

/// Most common English words, most frequent first
pub static TOP_WORDS: &[&str] = &[
    "the", "of", "and", "to", "a", "in", "for", "is", "on", "that",
    "by", "this", "with", "i", "you", "it", "not", "or", "be", "are",
    "from", "at", "as", "your", "all", "have", "new", "more", "an", "was",
    "we", "will", "home", "can", "us", "about", "if", "page", "my", "has",
    "free", "but", "our", "one", "other", "do", "no", "time", "they", "site",
    "he", "up", "may", "what", "which", "their", "news", "out", "use", "any",
    "there", "see", "only", "so", "his", "when", "here", "who", "web", "also",
    "now", "help", "get", "view", "first", "am", "been", "would", "how", "were",
    "me", "some", "these", "its", "like", "than", "find", "back", "top", "people",
    "had", "list", "name", "just", "over", "year", "day", "into", "two", "world",
    "next", "used", "go", "work", "last", "most", "make", "them", "should", "her",
    "city", "add", "number", "such", "please", "after", "best", "then", "good", "well",
    "where", "info", "public", "high", "through", "each", "she", "years", "order", "very",
    "book", "read", "need", "many", "said", "does", "set", "under", "general", "life",
    "know", "way", "days", "part", "could", "great", "real", "must", "made", "line",
    "send", "right", "type", "because", "local", "those", "using", "office", "area", "want",
    "long", "code", "show", "even", "check", "open", "today", "south", "case", "same",
    "own", "found", "house", "both", "power", "while", "care", "down", "three", "total",
    "place", "end", "think", "north", "big", "water", "since", "small", "white", "text",
    "return", "old", "main", "call", "hours", "still", "money", "every", "little", "radio",
];

/// Common Q-codes; each also has a question form ending in `?`
pub static QCODES: &[&str] = &[
    "qra", "qrg", "qrh", "qrk", "qrl", "qrm", "qrn", "qro", "qrp", "qrq",
    "qrs", "qrt", "qru", "qrv", "qrx", "qrz", "qsa", "qsb", "qsd", "qsk",
    "qsl", "qsm", "qso", "qsp", "qst", "qsx", "qsy", "qta", "qth", "qtr",
];

/// The first `num` top words (0 or too many = the whole list)
pub fn top_words(num: usize, rng: SmallRng) -> LineList {
    let n = if num == 0 || num > TOP_WORDS.len() { TOP_WORDS.len() } else { num };
    LineList::new(TOP_WORDS[..n].iter().copied(), rng)
}

/// Q-codes, plus their `?` forms when `questions` is set
pub fn qcodes(questions: bool, rng: SmallRng) -> LineList {
    let mut lines: Vec<String> = QCODES.iter().map(|q| q.to_string()).collect();
    if questions {
        lines.extend(QCODES.iter().map(|q| format!("{q}?")));
    }
    LineList::new(lines.iter().map(String::as_str), rng)
}

/// Every character the encoder knows, one per line
pub fn chars(rng: SmallRng) -> LineList {
    let lines: Vec<String> = ALPHABET.chars().map(String::from).collect();
    LineList::new(lines.iter().map(String::as_str), rng)
}
