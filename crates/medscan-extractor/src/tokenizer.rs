//! Tokenizer: cuts text into offset-tagged candidate tokens

use medscan_domain::Token;
use std::ops::Range;

/// Words that never start or join a phrase on their own
pub const STOP_WORDS: &[&str] = &[
    "and", "the", "but", "for", "with", "was", "were", "that", "this", "have", "from", "are",
    "has", "had", "not",
];

/// Case-insensitive stop-word check
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.iter().any(|w| w.eq_ignore_ascii_case(word))
}

/// Splits text into maximal ASCII alphanumeric runs
pub struct Tokenizer {
    min_token_len: usize,
}

impl Tokenizer {
    /// Create a tokenizer dropping runs shorter than `min_token_len`
    pub fn new(min_token_len: usize) -> Self {
        Self { min_token_len }
    }

    /// Tokenize `text`, left to right.
    ///
    /// Token offsets count characters; byte offsets are kept alongside for
    /// slicing `text`.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        // (char offset, byte offset) of the open run
        let mut run_start: Option<(usize, usize)> = None;

        for (pos, (idx, ch)) in text.char_indices().enumerate() {
            match (ch.is_ascii_alphanumeric(), run_start) {
                (true, None) => run_start = Some((pos, idx)),
                (false, Some((char_start, byte_start))) => {
                    self.push_run(text, char_start, byte_start..idx, &mut tokens);
                    run_start = None;
                }
                _ => {}
            }
        }

        if let Some((char_start, byte_start)) = run_start {
            self.push_run(text, char_start, byte_start..text.len(), &mut tokens);
        }

        tokens
    }

    fn push_run(
        &self,
        text: &str,
        char_start: usize,
        bytes: Range<usize>,
        tokens: &mut Vec<Token>,
    ) {
        let byte_start = bytes.start;
        let word = &text[bytes];
        if word.len() < self.min_token_len || is_stop_word(word) {
            return;
        }
        tokens.push(Token::new(word, char_start, byte_start));
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_scenario_sentence() {
        let text = "Patient has diabetes and hypertension.";
        let tokens = Tokenizer::default().tokenize(text);
        assert_eq!(texts(&tokens), vec!["Patient", "diabetes", "hypertension"]);
        assert_eq!((tokens[1].start, tokens[1].end), (12, 20));
        assert_eq!((tokens[2].start, tokens[2].end), (25, 37));
    }

    #[test]
    fn test_empty_input() {
        assert!(Tokenizer::default().tokenize("").is_empty());
        assert!(Tokenizer::default().tokenize("   \n\t").is_empty());
    }

    #[test]
    fn test_short_and_stop_words_dropped() {
        let tokens = Tokenizer::default().tokenize("He is on it. The AND Was not HAS");
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_punctuation_splits_runs() {
        let tokens = Tokenizer::default().tokenize("E11.9 gastro-esophageal");
        assert_eq!(texts(&tokens), vec!["E11", "gastro", "esophageal"]);
    }

    #[test]
    fn test_non_ascii_offsets_stay_valid() {
        let text = "Température élevée, fever noted";
        let tokens = Tokenizer::default().tokenize(text);
        for token in &tokens {
            assert!(token.matches_source(text));
        }
        assert!(texts(&tokens).contains(&"fever"));
    }

    #[test]
    fn test_offsets_count_characters() {
        let text = "Temp 38.5°C, fever noted";
        let tokens = Tokenizer::default().tokenize(text);
        let fever = tokens.iter().find(|t| t.text == "fever").unwrap();
        assert_eq!((fever.start, fever.end), (13, 18));
        assert_eq!(fever.byte_range(), 14..19);
        assert_eq!(&text[fever.byte_range()], "fever");
    }

    #[test]
    fn test_trailing_run() {
        let tokens = Tokenizer::default().tokenize("cough");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].end, 5);
    }

    #[test]
    fn test_is_stop_word() {
        assert!(is_stop_word("THE"));
        assert!(is_stop_word("With"));
        assert!(!is_stop_word("fever"));
    }
}
