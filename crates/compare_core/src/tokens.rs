//! Approximate token counting.

/// Estimate the number of tokens in `text`.
///
/// Rough heuristic of one token per four characters, which tracks closely
/// enough for the evaluation table. Empty and whitespace-only input
/// estimates zero.
pub fn estimate_tokens(text: &str) -> usize {
    if text.trim().is_empty() {
        return 0;
    }
    text.chars().count().div_ceil(4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_zero() {
        assert_eq!(estimate_tokens(""), 0);
    }

    #[test]
    fn whitespace_only_is_zero() {
        assert_eq!(estimate_tokens("   \n\t"), 0);
    }

    #[test]
    fn estimate_is_idempotent() {
        let text = "the quick brown fox jumps over the lazy dog";
        assert_eq!(estimate_tokens(text), estimate_tokens(text));
    }

    #[test]
    fn estimate_is_monotone_in_length() {
        let words = ["alpha", "beta", "gamma", "delta", "epsilon"];
        let mut text = String::new();
        let mut previous = 0;
        for word in words {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(word);
            let estimate = estimate_tokens(&text);
            assert!(estimate >= previous, "estimate shrank for {text:?}");
            previous = estimate;
        }
    }

    #[test]
    fn four_chars_is_one_token() {
        assert_eq!(estimate_tokens("word"), 1);
        assert_eq!(estimate_tokens("words"), 2);
    }
}
