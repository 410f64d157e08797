//! Syntax highlighting for order lines.

use std::borrow::Cow;

use atlantis_orders::KEYWORDS;

/// Highlighter for the orders language.
pub struct OrdersHighlighter {}

impl OrdersHighlighter {
    /// Creates a new highlighter.
    pub const fn new() -> Self {
        Self {}
    }

    /// Highlight a line of input.
    ///
    /// The first word is coloured if it is an order keyword. Numbers,
    /// quoted strings, the `@` marker and `;` comments are coloured too.
    #[allow(clippy::unused_self)]
    pub fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.is_empty() {
            return Cow::Borrowed(line);
        }
        let mut result = String::with_capacity(line.len() * 2);
        let mut chars = line.chars().peekable();
        let mut first_word = true;

        while let Some(c) = chars.next() {
            match c {
                // Comments run to the end of the line
                ';' => {
                    result.push_str("\x1b[2;3m"); // dim italic
                    result.push(c);
                    result.extend(chars.by_ref());
                    result.push_str("\x1b[0m");
                }

                // Permanent marker
                '@' if first_word && result.is_empty() => {
                    result.push_str("\x1b[1;34m@\x1b[0m"); // bold blue
                }

                // Strings
                '"' => {
                    result.push_str("\x1b[33m"); // yellow
                    result.push(c);
                    for next in chars.by_ref() {
                        result.push(next);
                        if next == '"' {
                            break;
                        }
                    }
                    result.push_str("\x1b[0m");
                    first_word = false;
                }

                c if c.is_whitespace() => result.push(c),

                _ => {
                    let mut word = String::from(c);
                    while let Some(next) = chars.next_if(|n| !n.is_whitespace() && *n != ';') {
                        word.push(next);
                    }

                    let color = if first_word && KEYWORDS.contains(&word.to_lowercase().as_str()) {
                        "\x1b[1;32m" // bold green
                    } else if word.chars().all(|ch| ch.is_ascii_digit()) {
                        "\x1b[35m" // magenta
                    } else {
                        ""
                    };
                    first_word = false;

                    if color.is_empty() {
                        result.push_str(&word);
                    } else {
                        result.push_str(color);
                        result.push_str(&word);
                        result.push_str("\x1b[0m");
                    }
                }
            }
        }

        Cow::Owned(result)
    }
}

impl Default for OrdersHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlight(line: &str) -> String {
        OrdersHighlighter::new().highlight(line, 0).into_owned()
    }

    #[test]
    fn keyword_and_numbers() {
        assert_eq!(
            highlight("GIVE 12 5 silv"),
            "\x1b[1;32mGIVE\x1b[0m \x1b[35m12\x1b[0m \x1b[35m5\x1b[0m silv"
        );
    }

    #[test]
    fn only_the_first_word_is_a_keyword() {
        assert_eq!(highlight("name unit Tax"), "\x1b[1;32mname\x1b[0m unit Tax");
    }

    #[test]
    fn marker_string_and_comment() {
        assert_eq!(
            highlight("@name unit \"Big One\" ;x"),
            "\x1b[1;34m@\x1b[0m\x1b[1;32mname\x1b[0m unit \x1b[33m\"Big One\"\x1b[0m \x1b[2;3m;x\x1b[0m"
        );
    }

    #[test]
    fn empty_line_is_borrowed() {
        assert!(matches!(
            OrdersHighlighter::new().highlight("", 0),
            Cow::Borrowed("")
        ));
    }
}
