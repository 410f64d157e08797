//! Faction header, status, attitude and message lines.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use atlantis_foundation::Attitude;
use regex::Regex;

use crate::consumer::ReportConsumer;
use crate::events::{
    DeclaredAttitudes, FactionInfo, FactionMessage, FactionStatus, FactionWarning, MessageKind,
    Numbered, QuitState,
};
use crate::fragments::{number, parse_numbered};

static FACTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>[^(]+) \((?P<num>\d+)\) \((?P<types>.+)\)").expect("valid regex")
});
static DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<month>.+), Year (?P<year>\d+)").expect("valid regex"));
static VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Atlantis Engine Version: (?P<version>.+)").expect("valid regex")
});
static RULES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>[^,]+), Version: (?P<version>.+)").expect("valid regex")
});
static INACTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^WARNING: You have (?P<turns>\d+) turns until your faction is automatically removed due to inactivity!",
    )
    .expect("valid regex")
});
static STATUS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<what>Tax Regions|Trade Regions|Quartermasters|Tacticians|Mages|[^:]+): (?P<num>\d+) \((?P<allowed>\d+)\)",
    )
    .expect("valid regex")
});
static DEFAULT_ATTITUDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^Declared Attitudes \(default (?P<attitude>Hostile|Unfriendly|Neutral|Friendly|Ally)\):",
    )
    .expect("valid regex")
});
static ATTITUDE_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<attitude>Hostile|Unfriendly|Neutral|Friendly|Ally) : (?P<factions>.+)\.")
        .expect("valid regex")
});
static UNCLAIMED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Unclaimed silver: (?P<silver>\d+)\.").expect("valid regex")
});
static UNIT_MESSAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>.+) \((?P<num>\d+)\): (?P<message>.+)\.").expect("valid regex")
});

/// Fixed warning sentences, matched as prefixes.
const WARNINGS: [(&str, FactionWarning); 6] = [
    (
        "Note: The Times is not being sent to you.",
        FactionWarning::NoTimes,
    ),
    (
        "REMINDER: You have not set a password for your faction!",
        FactionWarning::NoPassword,
    ),
    (
        "You restarted your faction this turn",
        FactionWarning::Quit(QuitState::Restart),
    ),
    (
        "I'm sorry, the game has ended",
        FactionWarning::Quit(QuitState::GameOver),
    ),
    (
        "Congratulations, you have won the game!",
        FactionWarning::Quit(QuitState::Won),
    ),
    (
        "I'm sorry, your faction has been eliminated",
        FactionWarning::Quit(QuitState::Eliminated),
    ),
];

/// Parses a faction-level line. Returns `false` if nothing matched.
pub fn parse_faction_line<C: ReportConsumer + ?Sized>(line: &str, consumer: &mut C) -> bool {
    if let Some(caps) = FACTION.captures(line) {
        let Some(num) = number(&caps, "num") else {
            return false;
        };
        let types = match &caps["types"] {
            "Unlimited" | "Normal" | "none" => BTreeMap::new(),
            types => types
                .split(", ")
                .filter_map(|pair| {
                    let (kind, points) = pair.split_once(' ')?;
                    Some((kind.to_lowercase(), points.parse().ok()?))
                })
                .collect(),
        };
        consumer.faction(FactionInfo {
            name: caps["name"].to_owned(),
            num,
            types,
        });
        return true;
    }
    if let Some(caps) = DATE.captures(line) {
        if let Some(year) = number(&caps, "year") {
            consumer.faction_date(caps["month"].to_owned(), year);
            return true;
        }
    }
    if let Some(caps) = VERSION.captures(line) {
        consumer.atlantis_version(caps["version"].to_owned());
        return true;
    }
    if let Some(caps) = RULES.captures(line) {
        consumer.atlantis_rules(caps["name"].to_owned(), caps["version"].to_owned());
        return true;
    }
    if let Some((_, warning)) = WARNINGS.iter().find(|(text, _)| line.starts_with(text)) {
        consumer.faction_warning(*warning);
        return true;
    }
    if let Some(turns) = INACTIVE.captures(line).and_then(|c| number(&c, "turns")) {
        consumer.faction_warning(FactionWarning::Inactive(turns));
        return true;
    }
    if let Some(caps) = STATUS.captures(line) {
        if let (Some(num), Some(allowed)) = (number(&caps, "num"), number(&caps, "allowed")) {
            consumer.faction_status(FactionStatus {
                what: caps["what"].to_owned(),
                num,
                allowed,
            });
            return true;
        }
    }
    if let Some(attitude) = DEFAULT_ATTITUDE
        .captures(line)
        .and_then(|c| Attitude::from_name(&c["attitude"]))
    {
        consumer.faction_attitudes(DeclaredAttitudes::Default(attitude));
        return true;
    }
    if let Some(caps) = ATTITUDE_LIST.captures(line) {
        if let Some(attitude) = Attitude::from_name(&caps["attitude"]) {
            let factions = caps["factions"]
                .split(", ")
                .filter_map(parse_numbered)
                .collect();
            consumer.faction_attitudes(DeclaredAttitudes::List { attitude, factions });
            return true;
        }
    }
    if let Some(silver) = UNCLAIMED.captures(line).and_then(|c| number(&c, "silver")) {
        consumer.faction_unclaimed(silver);
        return true;
    }
    false
}

/// Parses an error or event line. Every line yields a message.
#[must_use]
pub fn parse_message(kind: MessageKind, line: &str) -> FactionMessage {
    if let Some(caps) = UNIT_MESSAGE.captures(line) {
        if let Some(num) = number(&caps, "num") {
            return FactionMessage {
                kind,
                message: caps["message"].to_owned(),
                unit: Some(Numbered::new(&caps["name"], num)),
            };
        }
    }
    FactionMessage {
        kind,
        message: line.to_owned(),
        unit: None,
    }
}
