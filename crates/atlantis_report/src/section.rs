//! The report section state machine.
//!
//! A report is a sequence of sections, each with its own entity grammar.
//! Faction reports move forward only: once the parser has seen the events
//! section it never returns to errors. The game master report has its own
//! short chain of skills, items, objects and regions.

use std::sync::LazyLock;

use regex::Regex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::fragments::REGION_SHORT;

/// Where in the report the parser is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Section {
    /// Before any header.
    #[default]
    Start,
    /// Game master skill reports.
    GmSkills,
    /// Game master item reports.
    GmItems,
    /// Game master object reports.
    GmObjects,
    /// Game master region listing.
    GmRegions,
    /// Faction header.
    Faction,
    /// `Errors during turn:`
    Errors,
    /// `Battles during turn:`
    Battles,
    /// `Events during turn:`
    Events,
    /// `Skill reports:`
    Skills,
    /// `Item reports:`
    Items,
    /// `Object reports:`
    Objects,
    /// Declared attitudes, up to unclaimed silver.
    Attitudes,
    /// Region reports.
    Regions,
    /// The orders template. Nothing more is parsed.
    OrdersTemplate,
}

/// Which entity grammar a line belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handler {
    /// Skill description.
    Skill,
    /// Item description.
    Item,
    /// Object type description.
    Structure,
    /// Region report line.
    Region,
    /// Faction header, status or attitude line.
    Faction,
    /// Error message.
    Error,
    /// Event message.
    Event,
    /// Battle narrative line.
    Battle,
    /// Section header or ignored line.
    Nothing,
}

static SKILLS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Skill reports:$").expect("valid regex"));
static ITEMS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Item reports:$").expect("valid regex"));
static OBJECTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Object reports:$").expect("valid regex"));
static REPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Atlantis Report For:$").expect("valid regex"));
static ERRORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Errors during turn:$").expect("valid regex"));
static BATTLES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Battles during turn:").expect("valid regex"));
static EVENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Events during turn:$").expect("valid regex"));
static ORDERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Orders Template").expect("valid regex"));
static ATTITUDES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:Declared Attitudes \(default |(?:Hostile|Unfriendly|Neutral|Friendly|Ally) : )")
        .expect("valid regex")
});
static UNCLAIMED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Unclaimed silver: \d+\.").expect("valid regex"));
static REGION_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{REGION_SHORT}")).expect("valid regex"));

/// Faction section headers, in report order.
static HEADERS: LazyLock<[(&'static Regex, Section); 6]> = LazyLock::new(|| {
    [
        (&*ERRORS, Section::Errors),
        (&*BATTLES, Section::Battles),
        (&*EVENTS, Section::Events),
        (&*SKILLS, Section::Skills),
        (&*ITEMS, Section::Items),
        (&*OBJECTS, Section::Objects),
    ]
});

impl Section {
    /// Returns `true` for the faction report sections that share headers.
    const fn is_faction_level(self) -> bool {
        matches!(
            self,
            Self::Faction
                | Self::Errors
                | Self::Battles
                | Self::Events
                | Self::Skills
                | Self::Items
                | Self::Objects
        )
    }

    /// Reads one comment-stripped line, returning the next section and the
    /// grammar the line should be parsed with.
    #[must_use]
    pub fn advance(self, line: &str) -> (Self, Handler) {
        match self {
            Self::Start => {
                if SKILLS.is_match(line) {
                    (Self::GmSkills, Handler::Nothing)
                } else if REPORT.is_match(line) {
                    (Self::Faction, Handler::Nothing)
                } else {
                    (self, Handler::Nothing)
                }
            }
            Self::GmSkills if ITEMS.is_match(line) => (Self::GmItems, Handler::Nothing),
            Self::GmSkills => (self, Handler::Skill),
            Self::GmItems if OBJECTS.is_match(line) => (Self::GmObjects, Handler::Nothing),
            Self::GmItems => (self, Handler::Item),
            Self::GmObjects if REGION_START.is_match(line) => (Self::GmRegions, Handler::Region),
            Self::GmObjects => (self, Handler::Structure),
            Self::GmRegions => (self, Handler::Region),
            section if section.is_faction_level() => {
                for (header, target) in HEADERS.iter() {
                    if *target > section && header.is_match(line) {
                        return (*target, Handler::Nothing);
                    }
                }
                if ATTITUDES.is_match(line) {
                    return (Self::Attitudes, Handler::Faction);
                }
                let handler = match section {
                    Self::Errors => Handler::Error,
                    Self::Battles => Handler::Battle,
                    Self::Events => Handler::Event,
                    Self::Skills => Handler::Skill,
                    Self::Items => Handler::Item,
                    Self::Objects => Handler::Structure,
                    _ => Handler::Faction,
                };
                (section, handler)
            }
            Self::Attitudes if UNCLAIMED.is_match(line) => (Self::Regions, Handler::Faction),
            Self::Attitudes => (self, Handler::Faction),
            Self::Regions if ORDERS.is_match(line) => (Self::OrdersTemplate, Handler::Nothing),
            Self::Regions => (self, Handler::Region),
            _ => (self, Handler::Nothing),
        }
    }
}
