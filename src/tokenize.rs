//! Normalize a line of text into lowercase alphabetic tokens
use regex::Regex;
use stripe::Token;

/// Everything that is not a lowercase ASCII letter or a space (after lowercasing)
const STRIP_PATTERN: &str = "[^a-z ]+";

/// Lowercases, strips everything but letters and spaces, then splits on whitespace.
///
/// Stripping happens in place, so it never creates a boundary: "don't" is one token and a tab
/// between two words glues them together. Building a `Tokenizer` compiles the pattern once; it
/// can then be shared between threads.
#[derive(Clone, Debug)]
pub struct Tokenizer {
    strip: Regex,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Tokenizer::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        Tokenizer {
            // The pattern is a constant, so this can only fail if it is edited badly
            strip: Regex::new(STRIP_PATTERN).expect("Token strip pattern should compile"),
        }
    }

    /// Split a line into tokens. Never fails, and never returns an empty token.
    pub fn tokenize(&self, line: &str) -> Vec<Token> {
        let lower = line.to_lowercase();
        self.strip.replace_all(&lower, "")
            .split_whitespace()
            .map(String::from)
            .collect()
    }
}

/// One-off tokenization. Prefer holding a `Tokenizer` when doing many lines.
pub fn tokenize(line: &str) -> Vec<Token> {
    Tokenizer::new().tokenize(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_punctuation_and_digits() {
        assert_eq!(tokenize("Hello, World! 123"), vec!["hello", "world"]);
    }

    #[test]
    fn test_stripping_does_not_split() {
        assert_eq!(tokenize("Don't stop-gap"), vec!["dont", "stopgap"]);
        // Tabs and newlines are stripped like punctuation
        assert_eq!(tokenize("cat\tsat\non"), vec!["catsaton"]);
    }

    #[test]
    fn test_empty_and_blank_lines() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("    ").is_empty());
        assert!(tokenize("1234 !!! ...").is_empty());
    }

    #[test]
    fn test_no_empty_tokens() {
        let tokens = tokenize("  the   cat, 42 sat  ");
        assert_eq!(tokens, vec!["the", "cat", "sat"]);
        assert!(tokens.iter().all(|t| !t.is_empty()));
    }

    #[test]
    fn test_non_ascii_letters_are_stripped() {
        assert_eq!(tokenize("Café ÜBER naïve"), vec!["caf", "ber", "nave"]);
        assert_eq!(tokenize("\u{fffd}\u{fffd} ok"), vec!["ok"]);
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let tokenizer = Tokenizer::new();
        for line in &["The cat sat on the mat.", "  I have a DREAM, that one day... 1963 ", "", "a\tb c"] {
            let once = tokenizer.tokenize(line);
            let twice = tokenizer.tokenize(&once.join(" "));
            assert_eq!(once, twice);
        }
    }
}
