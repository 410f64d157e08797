//! Tokenizer tests.
//!
//! Tests for splitting raw orders lines into tokens.

use atlantis_orders::TokenStream;
use atlantis_orders::tokenizer::value;
use proptest::prelude::*;

fn tokens(stream: &TokenStream) -> Vec<&str> {
    stream.remaining().collect()
}

#[test]
fn tokenize_mixed_line() {
    let stream = TokenStream::tokenize("@name unit \"Sir Robin\" ;brave").unwrap();
    assert!(stream.permanent);
    assert_eq!(tokens(&stream), vec!["name", "unit", "Sir Robin"]);
    assert_eq!(stream.comment.as_deref(), Some("brave"));
}

#[test]
fn tokenize_keeps_case() {
    let mut stream = TokenStream::tokenize("GIVE 12 5 SILV").unwrap();
    assert_eq!(stream.next_token().as_deref(), Some("GIVE"));
    assert_eq!(stream.next_lower().as_deref(), Some("12"));
    assert_eq!(stream.drain_lower(), vec!["5", "silv"]);
    assert!(stream.is_empty());
}

#[test]
fn tokenize_rejects_open_quote() {
    let err = TokenStream::tokenize("describe unit \"tall").unwrap_err();
    assert_eq!(format!("{err}"), "describe unit \"tall: Unmatched quotes");
}

fn word() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{1,8}"
}

proptest! {
    #[test]
    fn bare_words_survive(words in prop::collection::vec(word(), 0..8), permanent in any::<bool>()) {
        let line = format!("{}{}", if permanent { "@" } else { "" }, words.join(" "));
        let stream = TokenStream::tokenize(&line).unwrap();
        prop_assert_eq!(stream.permanent, permanent);
        prop_assert_eq!(tokens(&stream), words.iter().map(String::as_str).collect::<Vec<_>>());
        prop_assert_eq!(stream.comment, None);
    }

    #[test]
    fn comment_ends_the_tokens(words in prop::collection::vec(word(), 0..4), comment in "[a-z][a-z ;]{0,16}") {
        let line = format!("{} ;{comment}", words.join(" "));
        let stream = TokenStream::tokenize(&line).unwrap();
        prop_assert_eq!(stream.len(), words.len());
        prop_assert_eq!(stream.comment.as_deref(), Some(comment.trim_end()));
    }

    #[test]
    fn quoted_tokens_keep_spaces(text in "[a-z]{1,6}( [a-z]{1,6}){0,3}") {
        let stream = TokenStream::tokenize(&format!("name unit \"{text}\"")).unwrap();
        prop_assert_eq!(tokens(&stream), vec!["name", "unit", text.as_str()]);
    }

    #[test]
    fn value_reads_leading_digits(n in 0u32..1_000_000, suffix in "[a-z]{0,4}") {
        prop_assert_eq!(value(&format!("{n}{suffix}")), n);
        prop_assert_eq!(value(&format!("{suffix}x{n}")), 0);
    }
}
