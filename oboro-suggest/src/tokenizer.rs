//! Splitting a search phrase into terms.

/// Characters that separate terms: space, full-width (ideographic) space, and
/// horizontal tab.
pub const SEPARATORS: [char; 3] = [' ', '\u{3000}', '\t'];

/// Split `phrase` on every separator character, in order.
///
/// Consecutive separators produce empty strings, which are kept so that the
/// split is lossless. Use [`tokens`] to get only the terms.
pub fn split_phrase(phrase: &str) -> Vec<&str> {
    phrase.split(&SEPARATORS[..]).collect()
}

/// The non-empty terms of `phrase`, in order. No case folding is applied.
pub fn tokens(phrase: &str) -> Vec<&str> {
    split_phrase(phrase)
        .into_iter()
        .filter(|token| !token.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{split_phrase, tokens};
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_on_all_separators() {
        assert_eq!(
            split_phrase("Go\u{3000}Python\tRust java"),
            vec!["Go", "Python", "Rust", "java"]
        );
    }

    #[test]
    fn split_keeps_empty_tokens() {
        assert_eq!(split_phrase("Go  Python"), vec!["Go", "", "Python"]);
        assert_eq!(split_phrase(" Go"), vec!["", "Go"]);
    }

    #[test]
    fn tokens_drop_empty_pieces() {
        assert_eq!(tokens("  Go \u{3000}\tPython "), vec!["Go", "Python"]);
    }

    #[test]
    fn whitespace_only_has_no_tokens() {
        assert!(tokens("").is_empty());
        assert!(tokens(" \u{3000}\t ").is_empty());
    }

    #[test]
    fn case_is_preserved() {
        assert_eq!(tokens("gO pYthon"), vec!["gO", "pYthon"]);
    }
}
