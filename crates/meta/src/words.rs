//! Sentence-to-word tokenizer feeding the word index.

/// Split a sentence into its unique indexable words, in first-seen order.
///
/// Words are maximal runs of alphanumeric code points; punctuation and
/// whitespace never survive tokenization, and the empty word is never
/// produced.
pub fn tokenize(sentence: &str) -> Vec<&str> {
    let mut words: Vec<&str> = Vec::new();
    for word in sentence.split(|ch: char| !ch.is_alphanumeric()) {
        if !word.is_empty() && !words.contains(&word) {
            words.push(word);
        }
    }
    words
}

/// The set of text encodings accepted as "true" for the visibility flag,
/// case-insensitively. Anything else is false.
pub fn truthy(value: &str) -> bool {
    ["true", "yes", "y", "1"]
        .iter()
        .any(|accepted| value.eq_ignore_ascii_case(accepted))
}
