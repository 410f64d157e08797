//! Optional-clause extraction for free-text descriptions.
//!
//! Skill and item descriptions are a run of sentences, most of them
//! optional and any of them possibly missing. Each recognizable sentence is
//! a [`Clause`]; [`strip`] removes every clause it finds, records what it
//! says into a target record, and returns whatever text is left over.

use regex::{Captures, Regex};

/// A sentence that can be cut out of a description.
pub(crate) struct Clause<T> {
    pattern: Regex,
    apply: fn(&Captures<'_>, &mut T),
}

impl<T> Clause<T> {
    /// Builds a clause from a regex fragment.
    ///
    /// The fragment is matched at its last occurrence in the text. A
    /// fragment ending in a greedy group runs to the end of the text.
    ///
    /// # Panics
    ///
    /// Panics if the fragment is not a valid regex. Clause tables are
    /// static, so this fires on first use in tests.
    pub(crate) fn new(fragment: &str, apply: fn(&Captures<'_>, &mut T)) -> Self {
        Self {
            pattern: last(fragment),
            apply,
        }
    }
}

/// Compiles `fragment` so it matches at its last occurrence.
///
/// Group 1 is the text before the match. The pattern is not anchored at
/// the end, so text may follow the match.
pub(crate) fn last(fragment: &str) -> Regex {
    Regex::new(&format!("^(.*){fragment}")).expect("valid clause regex")
}

/// Removes every clause found in `text`, applying each to `target`.
///
/// Each clause cuts its last occurrence anywhere in the text, not only a
/// trailing one, and the text on either side is joined back together. A
/// clause whose fragment can also occur inside another clause must come
/// after that clause in the table.
///
/// Clauses are tried in order. After a successful cut the search restarts
/// from the first clause, so a clause may fire more than once and the order
/// of sentences in `text` does not matter. Returns the text no clause
/// claimed, trimmed.
pub(crate) fn strip<T>(text: &str, clauses: &[Clause<T>], target: &mut T) -> String {
    let mut rest = text.trim().to_owned();
    'scan: loop {
        for clause in clauses {
            let Some(caps) = clause.pattern.captures(&rest) else {
                continue;
            };
            let (Some(head), Some(whole)) = (caps.get(1), caps.get(0)) else {
                continue;
            };
            if whole.end() == head.end() {
                continue;
            }
            (clause.apply)(&caps, target);
            let joined = join(&rest[..head.end()], &rest[whole.end()..]);
            rest = joined;
            continue 'scan;
        }
        return rest;
    }
}

/// Cuts the last match of `re` (built with [`last`]) and everything after it.
///
/// Returns the captures and the text before the match, trimmed.
pub(crate) fn cut<'t>(re: &Regex, text: &'t str) -> Option<(Captures<'t>, &'t str)> {
    let caps = re.captures(text)?;
    let head = caps.get(1)?.as_str().trim_end();
    Some((caps, head))
}

/// Matches `re` at the start of `text` and returns the remainder.
pub(crate) fn take_prefix<'t>(re: &Regex, text: &'t str) -> Option<(Captures<'t>, &'t str)> {
    let caps = re.captures(text)?;
    let end = caps.get(0)?.end();
    Some((caps, &text[end..]))
}

fn join(head: &str, tail: &str) -> String {
    let head = head.trim_end();
    let tail = tail.trim_start();
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_owned(),
        (_, true) => head.to_owned(),
        _ => format!("{head} {tail}"),
    }
}
