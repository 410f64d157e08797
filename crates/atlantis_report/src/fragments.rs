//! Small pieces of report grammar shared by several entity parsers.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::events::{ItemRef, ItemStack, Location, Numbered, Quantity, SkillRef, Town};

/// `plain (18,38) in Decec`, with an optional level after the row.
pub(crate) const REGION_SHORT: &str = r"(?P<terrain>\S[^(]+) \((?P<x>\d+),(?P<y>\d+)(?:,(?P<z>[^)]+))?\) in (?P<province>[^,.]+)";

/// [`REGION_SHORT`] followed by an optional settlement.
pub(crate) static REGION_PRINT: LazyLock<String> = LazyLock::new(|| {
    format!(r"{REGION_SHORT}(?:, contains (?P<town>[^\[]+) \[(?P<town_kind>[^\]]+)\])?")
});

static ITEM_AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<amount>\d+|unlimited) (?P<name>[^\[]+) \[(?P<abbr>\w+)\]")
        .expect("valid regex")
});
static ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<name>[^\[]+) \[(?P<abbr>\w+)\]").expect("valid regex"));
static NUMBERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<name>[^(]+) \((?P<num>\d+)\)").expect("valid regex"));
static DEFENSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<value>\d+) against (?P<kind>.+) attacks").expect("valid regex")
});
static LIST_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",? and |, ").expect("valid regex"));
static OR_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",? or |, ").expect("valid regex"));

/// Reads a numeric capture group.
pub(crate) fn number(caps: &Captures<'_>, group: &str) -> Option<u32> {
    caps.name(group).and_then(|m| m.as_str().parse().ok())
}

/// Reads a textual capture group.
pub(crate) fn text(caps: &Captures<'_>, group: &str) -> Option<String> {
    caps.name(group).map(|m| m.as_str().to_owned())
}

/// Returns `true` if the group took part in the match.
pub(crate) fn present(caps: &Captures<'_>, group: &str) -> bool {
    caps.name(group).is_some()
}

/// Builds a [`Location`] from the [`REGION_SHORT`] groups.
pub(crate) fn location(caps: &Captures<'_>) -> Option<Location> {
    Some(Location {
        terrain: text(caps, "terrain")?,
        x: number(caps, "x")?,
        y: number(caps, "y")?,
        z: text(caps, "z"),
        name: text(caps, "province")?,
    })
}

/// Builds a [`Town`] from the [`REGION_PRINT`] groups.
pub(crate) fn town(caps: &Captures<'_>) -> Option<Town> {
    Some(Town {
        name: text(caps, "town")?,
        kind: text(caps, "town_kind")?,
    })
}

/// Builds a [`Numbered`] from a pair of name and number groups.
pub(crate) fn numbered(caps: &Captures<'_>, name: &str, num: &str) -> Option<Numbered> {
    Some(Numbered::new(caps.name(name)?.as_str(), number(caps, num)?))
}

/// Parses `Name (123)` at the start of `text`.
pub(crate) fn parse_numbered(text: &str) -> Option<Numbered> {
    NUMBERED
        .captures(text.trim())
        .and_then(|caps| numbered(&caps, "name", "num"))
}

/// Parses `name [ABBR]` at the start of `text`.
pub(crate) fn parse_item_ref(text: &str) -> Option<ItemRef> {
    let caps = ITEM.captures(text.trim())?;
    Some(ItemRef::new(&caps["name"], &caps["abbr"]))
}

/// Parses `name [ABBR]` as a skill.
pub(crate) fn parse_skill_ref(text: &str) -> Option<SkillRef> {
    parse_item_ref(text).map(|item| SkillRef::new(item.name, item.abbr))
}

/// Parses `12 swords [SWOR]`, `unlimited grain [GRAI]` or `sword [SWOR]`.
pub(crate) fn parse_item_stack(text: &str) -> Option<ItemStack> {
    let text = text.trim();
    if let Some(caps) = ITEM_AMOUNT.captures(text) {
        let amount = match &caps["amount"] {
            "unlimited" => Quantity::Unlimited,
            n => Quantity::Count(n.parse().ok()?),
        };
        return Some(ItemStack {
            amount,
            item: ItemRef::new(&caps["name"], &caps["abbr"]),
        });
    }
    parse_item_ref(text).map(|item| ItemStack {
        amount: Quantity::Count(1),
        item,
    })
}

/// Parses `2 against melee attacks and 1 against energy attacks`.
pub(crate) fn parse_defenses(text: &str) -> BTreeMap<String, u32> {
    split_list(text)
        .into_iter()
        .filter_map(|part| {
            let caps = DEFENSE.captures(part)?;
            Some((caps["kind"].to_owned(), number(&caps, "value")?))
        })
        .collect()
}

/// Splits `a, b and c` or `a, b, and c`.
pub(crate) fn split_list(text: &str) -> Vec<&str> {
    LIST_SEPARATOR
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Splits `a, b or c` or `a, b, or c`.
pub(crate) fn split_alternatives(text: &str) -> Vec<&str> {
    OR_SEPARATOR
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Splits `text` at every match of the named `group` in `re`.
///
/// The rest of the pattern only has to match around the separator, which
/// lets a split depend on what follows or precedes it.
pub(crate) fn split_at_group<'t>(text: &'t str, re: &Regex, group: &str) -> Vec<&'t str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for caps in re.captures_iter(text) {
        if let Some(sep) = caps.name(group) {
            parts.push(&text[start..sep.start()]);
            start = sep.end();
        }
    }
    parts.push(&text[start..]);
    parts.retain(|p| !p.trim().is_empty());
    parts
}

/// Splits on `", "` outside parentheses.
pub(crate) fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            b',' if depth == 0 && bytes.get(i + 1) == Some(&b' ') => {
                parts.push(&text[start..i]);
                start = i + 2;
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
    parts.push(&text[start..]);
    parts.retain(|p| !p.is_empty());
    parts
}
