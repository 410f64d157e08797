//! Logical line reconstruction for turn reports.
//!
//! The game wraps report lines at a fixed column and indents each
//! continuation one level deeper than the line it continues. [`ReportReader`]
//! joins those continuations back so every entity sits on one line.

use std::io::{self, BufRead, Lines};
use std::sync::LazyLock;

use regex::Regex;

/// One level of report indentation.
pub const INDENT: &str = "  ";

static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-+$").expect("valid regex"));
static EXITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^Exits:$").expect("valid regex"));
static OBJECT_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+ ").expect("valid regex"));
static UNIT_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*=:%!] ").expect("valid regex"));
static TEMPLATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Orders Template \((?:Short|Long|Map) Format\):$").expect("valid regex")
});

/// Reads logical lines from a wrapped report.
///
/// Lines are yielded without their terminators. Once the orders template
/// header has been read, that line and every line after it are returned
/// verbatim, so the template can be handed to an orders parser by
/// continuing to iterate the same reader.
pub struct ReportReader<R> {
    lines: Lines<R>,
    pending: Option<String>,
    in_template: bool,
}

impl<R: BufRead> ReportReader<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            pending: None,
            in_template: false,
        }
    }

    /// Returns `true` once the orders template header has been read.
    pub const fn in_template(&self) -> bool {
        self.in_template
    }

    /// Reads the next logical line, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying reader.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let Some(mut line) = self.physical()? else {
            return Ok(None);
        };
        if !self.in_template && TEMPLATE.is_match(&line) {
            self.in_template = true;
        }
        if self.in_template
            || line.trim().is_empty()
            || SEPARATOR.is_match(&line)
            || EXITS.is_match(&line)
        {
            return Ok(Some(line));
        }

        let depth = indent(&line);
        let object = OBJECT_ENTRY.is_match(&line[depth..]);
        while let Some(next) = self.lines.next().transpose()? {
            let next_depth = indent(&next);
            // A unit listed inside an object sits exactly one level deeper
            // than the object line without being a continuation of it.
            if next_depth != depth + INDENT.len()
                || (object && UNIT_ENTRY.is_match(&next[next_depth..]))
            {
                self.pending = Some(next);
                break;
            }
            line.truncate(line.trim_end().len());
            line.push(' ');
            line.push_str(&next[next_depth..]);
        }
        Ok(Some(line))
    }

    fn physical(&mut self) -> io::Result<Option<String>> {
        match self.pending.take() {
            Some(line) => Ok(Some(line)),
            None => self.lines.next().transpose(),
        }
    }
}

impl<R: BufRead> Iterator for ReportReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_line().transpose()
    }
}

fn indent(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}
