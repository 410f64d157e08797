//! Line editor abstraction for the REPL.
//!
//! The REPL talks to a [`LineEditor`] so tests can drive it with scripted
//! input. [`RustylineEditor`] is the terminal implementation.

use crate::highlight::OrdersHighlighter;
use atlantis_foundation::{Error, ErrorKind, Result};
use atlantis_orders::KEYWORDS;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::HistoryHinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Completer, Config, Context, Editor, Helper, Hinter, Validator as RLValidator};
use std::borrow::Cow;

/// Result of reading a line from the editor.
#[derive(Debug)]
pub enum ReadResult {
    /// A line was successfully read.
    Line(String),
    /// User pressed Ctrl+C.
    Interrupted,
    /// User pressed Ctrl+D (EOF).
    Eof,
}

/// Abstraction over line editing functionality.
pub trait LineEditor {
    /// Read a line with the given prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the terminal fails.
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult>;

    /// Add a line to history.
    fn add_history(&mut self, line: &str);

    /// Set available completions for the first word of a line.
    fn set_keywords(&mut self, keywords: Vec<String>);
}

#[derive(Helper, Completer, Hinter, RLValidator)]
struct OrdersHelper {
    #[rustyline(Completer)]
    completer: KeywordCompleter,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
    #[rustyline(Validator)]
    validator: QuoteValidator,
    highlighter: OrdersHighlighter,
}

impl Highlighter for OrdersHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Cow::Owned(format!("\x1b[1;32m{prompt}\x1b[0m"))
        } else {
            Cow::Borrowed(prompt)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[2m{hint}\x1b[0m"))
    }
}

/// Completes order keywords at the start of a line.
struct KeywordCompleter {
    keywords: Vec<String>,
}

impl KeywordCompleter {
    fn new() -> Self {
        Self {
            keywords: KEYWORDS.iter().map(|&kw| kw.to_string()).collect(),
        }
    }

    fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<Pair>) {
        let head = &line[..pos];
        let start = head.len() - head.trim_start().len();
        let start = start + usize::from(head[start..].starts_with('@'));
        let word = &head[start..];
        if word.contains(char::is_whitespace) {
            return (pos, Vec::new());
        }
        let word = word.to_lowercase();
        let candidates = self
            .keywords
            .iter()
            .filter(|kw| kw.starts_with(&word))
            .map(|kw| Pair {
                display: kw.clone(),
                replacement: kw.clone(),
            })
            .collect();
        (start, candidates)
    }
}

impl Completer for KeywordCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(line, pos))
    }
}

/// Refuses lines with an unterminated quoted token.
#[derive(Default)]
struct QuoteValidator;

impl Validator for QuoteValidator {
    fn validate(&self, ctx: &mut ValidationContext<'_>) -> rustyline::Result<ValidationResult> {
        if balanced_quotes(ctx.input()) {
            Ok(ValidationResult::Valid(None))
        } else {
            Ok(ValidationResult::Invalid(Some("  (unmatched quotes)".to_string())))
        }
    }
}

/// Checks that every quote opened before the comment is closed.
fn balanced_quotes(input: &str) -> bool {
    let mut in_string = false;
    for c in input.chars() {
        match c {
            '"' => in_string = !in_string,
            ';' if !in_string => break,
            _ => {}
        }
    }
    !in_string
}

/// Line editor implementation using rustyline.
pub struct RustylineEditor {
    editor: Editor<OrdersHelper, DefaultHistory>,
}

impl RustylineEditor {
    /// Creates a new rustyline-based editor.
    ///
    /// # Errors
    ///
    /// Returns an error if rustyline initialization fails.
    pub fn new() -> Result<Self> {
        let config = Config::builder()
            .auto_add_history(false)
            .max_history_size(1000)
            .map_err(|e| Error::new(ErrorKind::Internal(e.to_string())))?
            .build();

        let helper = OrdersHelper {
            completer: KeywordCompleter::new(),
            hinter: HistoryHinter::new(),
            validator: QuoteValidator,
            highlighter: OrdersHighlighter::new(),
        };

        let mut editor = Editor::with_config(config)
            .map_err(|e| Error::new(ErrorKind::Internal(e.to_string())))?;
        editor.set_helper(Some(helper));

        Ok(Self { editor })
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadResult::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadResult::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadResult::Eof),
            Err(e) => Err(Error::new(ErrorKind::Internal(e.to_string()))),
        }
    }

    fn add_history(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }

    fn set_keywords(&mut self, keywords: Vec<String>) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.completer.keywords = keywords;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replacements(line: &str) -> (usize, Vec<String>) {
        let (start, pairs) = KeywordCompleter::new().candidates(line, line.len());
        (start, pairs.into_iter().map(|p| p.replacement).collect())
    }

    #[test]
    fn completes_the_first_word() {
        let (start, words) = replacements("TEA");
        assert_eq!(start, 0);
        assert_eq!(words, vec!["teach".to_string()]);
    }

    #[test]
    fn completes_after_the_marker() {
        let (start, words) = replacements("  @wi");
        assert_eq!(start, 3);
        assert_eq!(words, vec!["withdraw".to_string()]);
    }

    #[test]
    fn arguments_are_not_completed() {
        let (_, words) = replacements("give 12 t");
        assert!(words.is_empty());
    }

    #[test]
    fn quotes() {
        assert!(balanced_quotes("name unit \"Big One\""));
        assert!(!balanced_quotes("name unit \"Big One"));
        assert!(balanced_quotes("tax ; \"quoted"));
    }
}
