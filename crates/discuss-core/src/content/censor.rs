//! Word-list profanity filter

use super::Censor;

/// Censor that replaces configured words with asterisks
///
/// Matching is case-insensitive and whole-word: a word is a maximal run of
/// alphanumeric characters. Replacement preserves the word's length.
#[derive(Debug, Clone, Default)]
pub struct WordListCensor {
    words: Vec<String>,
}

impl WordListCensor {
    /// Create a censor from a word list
    pub fn new(words: &[String]) -> Self {
        Self {
            words: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    fn is_censored(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        self.words.iter().any(|w| *w == lower)
    }
}

impl Censor for WordListCensor {
    fn censor(&self, text: &str) -> String {
        if self.words.is_empty() {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len());
        let mut word = String::new();

        for ch in text.chars() {
            if ch.is_alphanumeric() {
                word.push(ch);
            } else {
                flush_word(&mut out, &mut word, self);
                out.push(ch);
            }
        }
        flush_word(&mut out, &mut word, self);
        out
    }
}

fn flush_word(out: &mut String, word: &mut String, censor: &WordListCensor) {
    if word.is_empty() {
        return;
    }
    if censor.is_censored(word) {
        out.extend(std::iter::repeat('*').take(word.chars().count()));
    } else {
        out.push_str(word);
    }
    word.clear();
}
