//! Orders line tokenization.
//!
//! Splits one orders line into bare and quoted tokens, the permanent
//! marker, and the trailing comment.

use std::collections::VecDeque;

use atlantis_foundation::{Error, Result};

/// The tokens of one orders line, consumed left to right.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: VecDeque<String>,
    /// The line started with `@`.
    pub permanent: bool,
    /// Text after the first unquoted `;`, without the semicolon.
    pub comment: Option<String>,
}

impl TokenStream {
    /// Tokenizes a raw orders line.
    ///
    /// - A leading `@` sets [`permanent`](Self::permanent) and is removed
    /// - `"..."` is a single token kept verbatim
    /// - `;` outside quotes starts the comment and ends tokenization
    /// - Anything else is split on whitespace
    ///
    /// # Errors
    ///
    /// Returns a syntax error if a quote is never closed.
    pub fn tokenize(line: &str) -> Result<Self> {
        let mut rest = line.trim();
        let permanent = rest.starts_with('@');
        if permanent {
            rest = &rest[1..];
        }

        let mut stream = Self {
            tokens: VecDeque::new(),
            permanent,
            comment: None,
        };

        loop {
            rest = rest.trim_start();
            if rest.is_empty() {
                break;
            }
            if let Some(quoted) = rest.strip_prefix('"') {
                // The token holds at least one character, so the closing
                // quote is searched for after the first one.
                let first = quoted.chars().next().map_or(0, char::len_utf8);
                let Some(end) = quoted.get(first..).and_then(|s| s.find('"')) else {
                    return Err(Error::syntax(line, "Unmatched quotes"));
                };
                let end = first + end;
                stream.tokens.push_back(quoted[..end].to_string());
                rest = &quoted[end + 1..];
            } else if let Some(comment) = rest.strip_prefix(';') {
                stream.comment = Some(comment.trim_end().to_string());
                break;
            } else {
                let end = rest
                    .find(|c: char| c.is_whitespace() || c == ';')
                    .unwrap_or(rest.len());
                stream.tokens.push_back(rest[..end].to_string());
                rest = &rest[end..];
            }
        }

        Ok(stream)
    }

    /// Removes and returns the next token.
    pub fn next_token(&mut self) -> Option<String> {
        self.tokens.pop_front()
    }

    /// Removes and returns the next token in lowercase.
    pub fn next_lower(&mut self) -> Option<String> {
        self.tokens.pop_front().map(|t| t.to_lowercase())
    }

    /// Looks at the next token without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&str> {
        self.tokens.front().map(String::as_str)
    }

    /// Returns `true` when every token has been consumed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of tokens left.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// The tokens not yet consumed.
    pub fn remaining(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Consumes every remaining token, lowercased.
    pub fn drain_lower(&mut self) -> Vec<String> {
        self.tokens.drain(..).map(|t| t.to_lowercase()).collect()
    }
}

/// Reads a number the way the game engine does: leading decimal digits,
/// with anything else read as zero.
#[must_use]
pub fn value(token: &str) -> u32 {
    token
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u32, |acc, b| {
            acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
        })
}

/// Parses the boolean vocabulary shared by flag orders.
#[must_use]
pub fn flag(token: &str) -> Option<bool> {
    match token.to_lowercase().as_str() {
        "true" | "t" | "on" | "yes" | "1" => Some(true),
        "false" | "f" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Keeps only the characters the game accepts in town names.
#[must_use]
pub fn legal_name(token: &str) -> String {
    const PUNCTUATION: &str = "![],. {}@#$%^&*-_+=;:<>?/~'\\`";
    token
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || PUNCTUATION.contains(*c))
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(stream: &TokenStream) -> Vec<&str> {
        stream.remaining().collect()
    }

    #[test]
    fn tokenize_quoted_with_comment() {
        let stream = TokenStream::tokenize("cast \"Earth Lore\" 27; Casting").unwrap();
        assert_eq!(tokens(&stream), vec!["cast", "Earth Lore", "27"]);
        assert!(!stream.permanent);
        assert_eq!(stream.comment.as_deref(), Some(" Casting"));
    }

    #[test]
    fn tokenize_permanent_marker() {
        let stream = TokenStream::tokenize("@produce wood ;Producing wood").unwrap();
        assert_eq!(tokens(&stream), vec!["produce", "wood"]);
        assert!(stream.permanent);
        assert_eq!(stream.comment.as_deref(), Some("Producing wood"));
    }

    #[test]
    fn tokenize_comment_only() {
        let stream = TokenStream::tokenize(";This is a comment").unwrap();
        assert!(stream.is_empty());
        assert_eq!(stream.comment.as_deref(), Some("This is a comment"));
    }

    #[test]
    fn tokenize_unmatched_quotes() {
        let err = TokenStream::tokenize("#atlantis \"Bart ;Unmatched quotes").unwrap_err();
        assert_eq!(
            format!("{err}"),
            "#atlantis \"Bart ;Unmatched quotes: Unmatched quotes"
        );
    }

    #[test]
    fn tokenize_bare_token_keeps_quote_chars() {
        let stream = TokenStream::tokenize("cast p@#\" ;Special chars").unwrap();
        assert_eq!(tokens(&stream), vec!["cast", "p@#\""]);
    }

    #[test]
    fn tokenize_semicolon_ends_bare_token() {
        let stream = TokenStream::tokenize("study comb;now").unwrap();
        assert_eq!(tokens(&stream), vec!["study", "comb"]);
        assert_eq!(stream.comment.as_deref(), Some("now"));
    }

    #[test]
    fn tokenize_blank_line() {
        let stream = TokenStream::tokenize("   ").unwrap();
        assert!(stream.is_empty());
        assert!(stream.comment.is_none());
        assert!(!stream.permanent);
    }

    #[test]
    fn value_reads_leading_digits() {
        assert_eq!(value("123"), 123);
        assert_eq!(value("12abc"), 12);
        assert_eq!(value("abc"), 0);
        assert_eq!(value(""), 0);
        assert_eq!(value("99999999999999"), u32::MAX);
    }

    #[test]
    fn flag_vocabulary() {
        assert_eq!(flag("ON"), Some(true));
        assert_eq!(flag("f"), Some(false));
        assert_eq!(flag("maybe"), None);
    }

    #[test]
    fn legal_name_strips_foreign_chars() {
        assert_eq!(legal_name("¡Año Mariano!"), "Ao Mariano!");
        assert_eq!(legal_name("ñ"), "");
    }
}
