//! Word tokenizer for the combined genre/tag text.
//!
//! Text is lowercased, then split into runs of word characters
//! (alphanumerics and `_`). Runs shorter than two characters are dropped,
//! so "Sci-Fi" yields `["sci"]` and "a 3D movie" yields `["3d", "movie"]`.

use crate::stop_words::StopWords;

const MIN_TOKEN_CHARS: usize = 2;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split `text` into lowercase tokens, skipping stop words
pub fn tokenize(text: &str, stop_words: &StopWords) -> Vec<String> {
    let lowered = text.to_lowercase();
    lowered
        .split(|c: char| !is_word_char(c))
        .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
        .filter(|t| !stop_words.contains(t))
        .map(str::to_string)
        .collect()
}
