//! Object report lines.
//!
//! ```text
//! Tower: This is a building. Units may enter this structure. This
//! structure provides defense to the first 10 men inside it. This structure
//! gives a defensive bonus of 2 against melee attacks. ...
//! ```
//!
//! The header is fixed. The sentences after it appear in a fixed order and
//! are read left to right.

use std::sync::LazyLock;

use regex::Regex;

use crate::clause::take_prefix;
use crate::events::{Decay, StructureDef, StructureKind, StructureSpecial};
use crate::fragments::{number, parse_defenses, present, text};

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<name>[^:]+): This is a (?P<kind>building|ship|group of ships)\.(?P<monster> Monsters can potentially lair in this structure\.(?P<no_growth> Monsters in this structures will never regenerate\.)?)?(?P<can_enter> Units may enter this structure\.)?(?: This structure provides defense to the first (?P<protect>\d+) men inside it\.(?: This structure gives a defensive bonus of (?P<bonus>[^.]+)\.)?)?(?P<extra>.*)",
    )
    .expect("valid regex")
});
static SPECIAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Units in this structure are (?P<not>not )?affected by (?P<name>[^.]+)\.")
        .expect("valid regex")
});
static SAILORS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^This ship requires (?P<sailors>\d+) total levels of sailing skill to sail\.")
        .expect("valid regex")
});
static MAGES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^This structure will allow (?:up to (?P<max>\d+) mages|one mage) to study above level 2\.?",
    )
    .expect("valid regex")
});
static NOT_BUILDABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^This structure cannot be built by players\.").expect("valid regex")
});
static PRODUCTION_AIDED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^This trade structure increases the amount of (?P<names>.+?) available in the region\.")
        .expect("valid regex")
});
static NEVER_DECAYS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^This structure will never decay\.").expect("valid regex")
});
static DECAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^This structure can take (?P<max>\d+) units of damage before it begins to decay\. Decay can occur at a maximum rate of (?P<monthly>\d+) units per month\.(?: Repair of damage is accomplished at a rate of (?P<rate>\d+) damage units per unit of (?P<item>[^.]+)\.)?",
    )
    .expect("valid regex")
});

/// Parses an object description line.
///
/// Returns `None` if the line does not start with a structure header.
#[must_use]
pub fn parse_structure(line: &str) -> Option<StructureDef> {
    let caps = HEADER.captures(line)?;
    let kind = match &caps["kind"] {
        "ship" => StructureKind::Ship,
        "group of ships" => StructureKind::Fleet,
        _ => StructureKind::Building,
    };
    let mut structure = StructureDef {
        name: caps["name"].to_owned(),
        kind,
        monster_lair: present(&caps, "monster"),
        no_monster_growth: present(&caps, "no_growth"),
        can_enter: present(&caps, "can_enter"),
        protect: number(&caps, "protect"),
        defense: caps
            .name("bonus")
            .map(|m| parse_defenses(m.as_str()))
            .unwrap_or_default(),
        ..StructureDef::default()
    };

    let mut rest = caps.name("extra").map_or("", |m| m.as_str().trim());
    while let Some((special, tail)) = take_prefix(&SPECIAL, rest) {
        structure.specials.push(StructureSpecial {
            name: special["name"].to_owned(),
            affected: !present(&special, "not"),
        });
        rest = tail.trim_start();
    }
    if let Some((sailors, tail)) = take_prefix(&SAILORS, rest) {
        structure.sailors = number(&sailors, "sailors");
        rest = tail.trim_start();
    }
    if let Some((mages, tail)) = take_prefix(&MAGES, rest) {
        structure.max_mages = Some(number(&mages, "max").unwrap_or(1));
        rest = tail.trim_start();
    }
    if let Some((_, tail)) = take_prefix(&NOT_BUILDABLE, rest) {
        structure.not_buildable = true;
        rest = tail.trim_start();
    }
    if let Some((aided, tail)) = take_prefix(&PRODUCTION_AIDED, rest) {
        structure.production_aided = text(&aided, "names");
        rest = tail.trim_start();
    }
    if let Some((_, tail)) = take_prefix(&NEVER_DECAYS, rest) {
        structure.never_decays = true;
        rest = tail.trim_start();
    }
    if let Some(decay) = DECAY.captures(rest) {
        if let (Some(max_maintenance), Some(max_monthly_decay)) =
            (number(&decay, "max"), number(&decay, "monthly"))
        {
            structure.decay = Some(Decay {
                max_maintenance,
                max_monthly_decay,
                repair_rate: number(&decay, "rate"),
                repair_item: text(&decay, "item"),
            });
        }
    }
    Some(structure)
}
