//! Build one stripe per word occurrence from a sliding window
use std::convert::TryFrom;
use std::num::IntErrorKind;
use std::str::FromStr;
use errors::*;
use stripe::{Stripe, PartialStripeRecord};
use tokenize::Tokenizer;

/// Neighbors on each side when nothing else is configured
pub const DEFAULT_RADIUS: usize = 1;

/// How many tokens on each side of a word count as its neighbors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowConfig {
    radius: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig { radius: DEFAULT_RADIUS }
    }
}

impl WindowConfig {
    /// Validate a radius. 0 is allowed (every stripe is empty), negative is not.
    pub fn new(radius: i64) -> Result<Self> {
        if radius < 0 {
            return Err(Error::InvalidConfiguration(
                format!("window radius must be at least 0, got {}", radius)));
        }
        let radius = usize::try_from(radius)
            .map_err(|_| too_large(radius))?;
        Ok(WindowConfig { radius: radius })
    }

    pub fn radius(&self) -> usize {
        self.radius
    }
}

impl FromStr for WindowConfig {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        let radius = s.trim().parse::<i64>()
            .map_err(|err| match *err.kind() {
                IntErrorKind::PosOverflow => too_large(s.trim()),
                IntErrorKind::NegOverflow => Error::InvalidConfiguration(
                    format!("window radius must be at least 0, got {}", s.trim())),
                _ => Error::InvalidConfiguration(
                    format!("window radius must be an integer, got {:?} ({})", s, err)),
            })?;
        WindowConfig::new(radius)
    }
}

fn too_large<D: ::std::fmt::Display>(radius: D) -> Error {
    Error::InvalidConfiguration(
        format!("window radius {} is too large for this platform", radius))
}

/// Emit `(word, stripe)` for every token, in token order
///
/// The window for token `i` runs from `i - radius` to `i + radius`. Indices before the start of
/// the line are skipped; the scan stops at the first index past the end of the line. A word with
/// no neighbors still gets a record, with an empty stripe.
pub fn emit<S: AsRef<str>>(tokens: &[S], window: WindowConfig) -> Vec<PartialStripeRecord> {
    let mut records = Vec::with_capacity(tokens.len());
    for (i, word) in tokens.iter().enumerate() {
        let word = word.as_ref();
        if word.is_empty() { continue; }

        let mut stripe = Stripe::new();
        for j in i.saturating_sub(window.radius)..=i.saturating_add(window.radius) {
            if j >= tokens.len() { break; }
            if j == i { continue; }
            stripe.increment(tokens[j].as_ref());
        }
        records.push(PartialStripeRecord { word: word.to_string(), stripe: stripe });
    }
    records
}

/// Tokenize a raw line and emit its stripes. Lines without letters emit nothing.
pub fn emit_line(tokenizer: &Tokenizer, line: &str, window: WindowConfig) -> Vec<PartialStripeRecord> {
    emit(&tokenizer.tokenize(line), window)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stripe(entries: &[(&str, u64)]) -> Stripe {
        Stripe::from_counts(entries.iter().cloned()).unwrap()
    }

    fn window(radius: i64) -> WindowConfig {
        WindowConfig::new(radius).unwrap()
    }

    #[test]
    fn test_window_truncated_at_line_edges() {
        let records = emit(&["a", "b", "c"], window(1));
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].word, "a");
        assert_eq!(records[0].stripe, stripe(&[("b", 1)]));
        assert_eq!(records[1].stripe, stripe(&[("a", 1), ("c", 1)]));
        assert_eq!(records[2].word, "c");
        assert_eq!(records[2].stripe, stripe(&[("b", 1)]));
    }

    #[test]
    fn test_radius_zero_gives_empty_stripes() {
        let records = emit(&["a", "b"], window(0));
        assert_eq!(records, vec![
            PartialStripeRecord { word: "a".into(), stripe: Stripe::new() },
            PartialStripeRecord { word: "b".into(), stripe: Stripe::new() },
        ]);
    }

    #[test]
    fn test_single_word_line() {
        let records = emit(&["alone"], window(3));
        assert_eq!(records.len(), 1);
        assert!(records[0].stripe.is_empty());
    }

    #[test]
    fn test_empty_line_emits_nothing() {
        let none: [&str; 0] = [];
        assert!(emit(&none, window(2)).is_empty());
        assert!(emit_line(&Tokenizer::new(), "  42, ...", window(2)).is_empty());
    }

    #[test]
    fn test_repeated_neighbors_are_counted() {
        let records = emit(&["a", "b", "a", "b", "a"], window(2));
        // "a" in the middle sees b, a on the left and b, a on the right
        assert_eq!(records[2].stripe, stripe(&[("a", 2), ("b", 2)]));
        // each "a" emits its own record
        assert_eq!(records.iter().filter(|r| r.word == "a").count(), 3);
    }

    #[test]
    fn test_wider_window() {
        let records = emit(&["the", "cat", "sat", "on", "the", "mat"], window(2));
        assert_eq!(records[0].stripe, stripe(&[("cat", 1), ("sat", 1)]));
        assert_eq!(records[3].stripe, stripe(&[("cat", 1), ("sat", 1), ("the", 1), ("mat", 1)]));
        assert_eq!(records[5].stripe, stripe(&[("on", 1), ("the", 1)]));
    }

    #[test]
    fn test_radius_wider_than_line() {
        let records = emit(&["a", "b", "c"], window(100));
        assert_eq!(records[0].stripe, stripe(&[("b", 1), ("c", 1)]));
        assert_eq!(records[2].stripe, stripe(&[("a", 1), ("b", 1)]));
    }

    #[test]
    fn test_empty_tokens_do_not_emit() {
        let records = emit(&["a", "", "b"], window(0));
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].word, "b");
    }

    #[test]
    fn test_emit_is_deterministic() {
        let tokens = ["i", "have", "a", "dream", "a", "dream"];
        assert_eq!(emit(&tokens, window(2)), emit(&tokens, window(2)));
    }

    #[test]
    fn test_negative_radius_rejected() {
        match WindowConfig::new(-1) {
            Err(Error::InvalidConfiguration(_)) => {},
            other => panic!("Expected an invalid configuration, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_window() {
        assert_eq!("2".parse::<WindowConfig>().unwrap().radius(), 2);
        assert_eq!(" 0 ".parse::<WindowConfig>().unwrap().radius(), 0);
        assert!("-1".parse::<WindowConfig>().is_err());
        assert!("two".parse::<WindowConfig>().is_err());
        assert_eq!(WindowConfig::default().radius(), DEFAULT_RADIUS);
    }

    fn configuration_message(result: Result<WindowConfig>) -> String {
        match result {
            Err(Error::InvalidConfiguration(info)) => info,
            other => panic!("Expected an invalid configuration, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_radius_explains_why() {
        let huge = configuration_message("99999999999999999999".parse::<WindowConfig>());
        assert!(huge.contains("too large"), "{}", huge);
        let very_negative = configuration_message("-99999999999999999999".parse::<WindowConfig>());
        assert!(very_negative.contains("at least 0"), "{}", very_negative);
        let word = configuration_message("two".parse::<WindowConfig>());
        assert!(word.contains("integer"), "{}", word);
    }

    #[test]
    fn test_radius_never_truncated() {
        // Either kept exactly or refused, depending on the width of usize
        match WindowConfig::new(1 << 32) {
            Ok(window) => assert_eq!(window.radius() as u64, 1u64 << 32),
            Err(err) => assert!(err.to_string().contains("too large")),
        }
        assert_eq!(WindowConfig::new(i64::from(u32::MAX)).unwrap().radius() as u64, u64::from(u32::MAX));
    }
}
