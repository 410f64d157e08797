//! The special-effect grammar shared by skills, items and monsters.
//!
//! A special is described by a handful of stock sentences that follow the
//! effect name:
//!
//! ```text
//! cause fear in battle at a skill level of 3. This ability will not target
//! creatures which are currently affected by fear. This ability cannot
//! target monsters. This ability does between 2 and 60 spirit attacks.
//! ```
//!
//! [`parse_special`] cuts those sentences from the end of the text one kind
//! at a time, then reads the leading name and level from what remains.

use std::sync::LazyLock;

use regex::Regex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::clause::{cut, last};
use crate::events::ItemRef;
use crate::fragments::{number, parse_item_ref, present, split_alternatives, text};

/// Whether a filter admits or excludes its targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FilterMode {
    /// Only the listed targets are affected.
    Only,
    /// The listed targets are never affected.
    Except,
}

/// A targeting restriction. An absent filter means unrestricted.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Filter<T> {
    /// Sense of the filter.
    pub mode: FilterMode,
    /// Targets listed.
    pub targets: Vec<T>,
}

impl<T> Filter<T> {
    fn new(mode: FilterMode, targets: Vec<T>) -> Self {
        Self { mode, targets }
    }
}

/// A defence modifier inflicted by a damage effect.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DefenseMod {
    /// Attack type the defence applies to.
    pub kind: String,
    /// Modifier, usually negative.
    pub value: i32,
}

/// A status effect applied by damage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DamageEffect {
    /// Effect name.
    pub name: String,
    /// `Some(true)` lasts one attack, `Some(false)` the whole battle.
    pub one_shot: Option<bool>,
    /// Attack modifier.
    pub attack: Option<i32>,
    /// Defence modifiers.
    pub defense_mods: Vec<DefenseMod>,
    /// Effect this one cancels.
    pub cancels: Option<String>,
}

/// A damage clause: `between 2 and 10 times the skill level of the mage
/// energy attacks`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Damage {
    /// Minimum attacks.
    pub min: u32,
    /// Maximum attacks.
    pub max: u32,
    /// Both bounds are multiplied by the skill level.
    pub per_level: bool,
    /// Attack type.
    pub kind: String,
    /// Effect description as printed.
    pub effect_text: Option<String>,
    /// Parsed effect.
    pub effect: Option<DamageEffect>,
}

/// A defensive bonus granted to the caster.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DefenseBonus {
    /// Attack type.
    pub kind: String,
    /// Bonus.
    pub value: u32,
    /// Multiplied by the skill level.
    pub per_level: bool,
}

/// A parsed special effect.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Special {
    /// Effect name, e.g. `cause fear`.
    pub name: Option<String>,
    /// Skill level the effect works at.
    pub level: Option<u32>,
    /// Damage clauses, in report order.
    pub damage: Vec<Damage>,
    /// Defensive bonuses.
    pub defenses: Vec<DefenseBonus>,
    /// Attack types shielded against.
    pub shields: Vec<String>,
    /// Building defence bonuses do not apply.
    pub no_building: bool,
    /// Cannot target monsters.
    pub no_monster: bool,
    /// Only targets illusions.
    pub illusion: bool,
    /// Restriction by active effects.
    pub effects: Option<Filter<String>>,
    /// Restriction by soldier type.
    pub soldiers: Option<Filter<ItemRef>>,
    /// Restriction by mount.
    pub mounts: Option<Filter<ItemRef>>,
    /// Restriction by structure.
    pub buildings: Option<Filter<String>>,
}

static DAMAGE: LazyLock<Regex> = LazyLock::new(|| {
    last(
        r"This ability does between (?P<min>\d+) and (?P<max>\d+) (?P<per_level>times the skill level of the mage )?(?P<kind>.+) attacks\.(?: Each attack causes the target to be effected by (?P<effect>.+))?",
    )
});
static EFFECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<name>.+?)(?: \((?P<mods>.+)\) for (?P<duration>their next attack|the rest of the battle))?\.(?: This effect cancels out the effects of (?P<cancels>.+)\.)?",
    )
    .expect("valid regex")
});
static EFFECT_ATTACK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<val>.+) to attack").expect("valid regex"));
static EFFECT_DEFENSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<val>.+) versus (?P<kind>.+) attacks").expect("valid regex")
});
static DEFENSES: LazyLock<Regex> =
    LazyLock::new(|| last(r"This (?:ability|spell) provides (?P<defs>.*) to the user"));
static DEFENSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^a defensive bonus of (?P<val>\d+) (?P<per_level>per skill level )?versus (?P<kind>.+) attacks",
    )
    .expect("valid regex")
});
static DEFENSE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r", (?:and )?").expect("valid regex"));
static SHIELD: LazyLock<Regex> = LazyLock::new(|| {
    last(
        r"(?:This spell provides a shield|This ability provides the wielder with a defence bonus of (?P<level>\d+)) against all (?P<shields>.+) attacks",
    )
});
static NO_BUILDING: LazyLock<Regex> = LazyLock::new(|| {
    last(r"The bonus given to units inside buildings is not effective against this ability")
});
static NO_MONSTER: LazyLock<Regex> =
    LazyLock::new(|| last(r"This ability cannot target monsters"));
static ILLUSION: LazyLock<Regex> =
    LazyLock::new(|| last(r"This ability will only target illusions"));
static EFFECT_FILTER: LazyLock<Regex> = LazyLock::new(|| {
    last(
        r"This ability will (?P<mode>not|only) target creatures which are currently affected by (?P<effects>.+)\.",
    )
});
static SOLDIER_FILTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"This ability will (?P<mode>not|only) target (?P<mount>units mounted on )?(?P<items>[^.]+)\.",
    )
    .expect("valid regex")
});
static BUILDING_FILTER: LazyLock<Regex> = LazyLock::new(|| {
    last(
        r"This ability will only target units (?P<mode>which are inside|inside structures, with the exception of) the following structures: (?P<buildings>.+)\.",
    )
});
static NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>.+?) in battle(?: at a skill level of (?P<level>\d+))?")
        .expect("valid regex")
});

fn mode(word: &str) -> FilterMode {
    if word == "not" {
        FilterMode::Except
    } else {
        FilterMode::Only
    }
}

/// Parses a special-effect description.
#[must_use]
pub fn parse_special(description: &str) -> Special {
    let mut special = Special::default();
    let mut rest = description.trim();

    while let Some((caps, head)) = cut(&DAMAGE, rest) {
        let effect_text = text(&caps, "effect").map(|e| e.trim_end().to_owned());
        let effect = effect_text.as_deref().and_then(parse_effect);
        special.damage.insert(
            0,
            Damage {
                min: number(&caps, "min").unwrap_or_default(),
                max: number(&caps, "max").unwrap_or_default(),
                per_level: present(&caps, "per_level"),
                kind: caps["kind"].to_owned(),
                effect_text,
                effect,
            },
        );
        rest = head;
    }

    if let Some((caps, head)) = cut(&DEFENSES, rest) {
        special.defenses = DEFENSE_SEPARATOR
            .split(&caps["defs"])
            .filter_map(|d| DEFENSE.captures(d))
            .filter_map(|d| {
                Some(DefenseBonus {
                    kind: text(&d, "kind")?,
                    value: number(&d, "val")?,
                    per_level: present(&d, "per_level"),
                })
            })
            .collect();
        rest = head;
    }

    if let Some((caps, head)) = cut(&SHIELD, rest) {
        special.level = number(&caps, "level");
        special.shields = DEFENSE_SEPARATOR
            .split(&caps["shields"])
            .map(str::to_owned)
            .collect();
        rest = head;
    }

    if let Some((_, head)) = cut(&NO_BUILDING, rest) {
        special.no_building = true;
        rest = head;
    }
    if let Some((_, head)) = cut(&NO_MONSTER, rest) {
        special.no_monster = true;
        rest = head;
    }
    if let Some((_, head)) = cut(&ILLUSION, rest) {
        special.illusion = true;
        rest = head;
    }

    if let Some((caps, head)) = cut(&EFFECT_FILTER, rest) {
        let targets = split_alternatives(&caps["effects"])
            .into_iter()
            .map(str::to_owned)
            .collect();
        special.effects = Some(Filter::new(mode(&caps["mode"]), targets));
        rest = head;
    }

    // Structure and effect filters share the opening words of this one.
    let soldier_filter = SOLDIER_FILTER
        .captures_iter(rest)
        .filter(|c| {
            let items = &c["items"];
            !items.starts_with("units which")
                && !items.starts_with("units inside")
                && !items.starts_with("creatures which")
                && !items.starts_with("illusions")
        })
        .last();
    if let Some(caps) = soldier_filter {
        let targets = split_alternatives(&caps["items"])
            .into_iter()
            .filter_map(parse_item_ref)
            .collect();
        let filter = Filter::new(mode(&caps["mode"]), targets);
        if present(&caps, "mount") {
            special.mounts = Some(filter);
        } else {
            special.soldiers = Some(filter);
        }
        if let Some(whole) = caps.get(0) {
            rest = rest[..whole.start()].trim_end();
        }
    }

    if let Some((caps, head)) = cut(&BUILDING_FILTER, rest) {
        let filter_mode = if &caps["mode"] == "which are inside" {
            FilterMode::Only
        } else {
            FilterMode::Except
        };
        let targets = split_alternatives(&caps["buildings"])
            .into_iter()
            .map(str::to_owned)
            .collect();
        special.buildings = Some(Filter::new(filter_mode, targets));
        rest = head;
    }

    if let Some(caps) = NAME.captures(rest) {
        special.name = text(&caps, "name");
        if let Some(level) = number(&caps, "level") {
            special.level = Some(level);
        }
    }
    special
}

fn parse_effect(text: &str) -> Option<DamageEffect> {
    let caps = EFFECT.captures(text)?;
    let mut effect = DamageEffect {
        name: caps["name"].to_owned(),
        cancels: caps.name("cancels").map(|m| m.as_str().to_owned()),
        ..DamageEffect::default()
    };
    if let Some(duration) = caps.name("duration") {
        effect.one_shot = Some(duration.as_str() == "their next attack");
    }
    if let Some(mods) = caps.name("mods") {
        for part in mods.as_str().split(", ") {
            if let Some(m) = EFFECT_ATTACK.captures(part) {
                effect.attack = m["val"].parse().ok();
            } else if let Some(m) = EFFECT_DEFENSE.captures(part) {
                if let Ok(value) = m["val"].parse() {
                    effect.defense_mods.push(DefenseMod {
                        kind: m["kind"].to_owned(),
                        value,
                    });
                }
            }
        }
    }
    Some(effect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fireball() {
        let s = parse_special(
            "a fireball in battle. This ability does between 2 and 10 times the skill level \
             of the mage energy attacks.",
        );
        assert_eq!(s.name.as_deref(), Some("a fireball"));
        assert_eq!(
            s.damage,
            vec![Damage {
                min: 2,
                max: 10,
                per_level: true,
                kind: "energy".into(),
                effect_text: None,
                effect: None,
            }]
        );
    }

    #[test]
    fn force_shield() {
        let s = parse_special(
            "a force shield in battle at a skill level of 3. This spell provides a shield \
             against all ranged attacks against the entire army at a level equal to the skill \
             level of the ability. This spell provides a defensive bonus of 3 versus melee \
             attacks to the user.",
        );
        assert_eq!(s.name.as_deref(), Some("a force shield"));
        assert_eq!(s.level, Some(3));
        assert_eq!(s.shields, vec!["ranged"]);
        assert_eq!(
            s.defenses,
            vec![DefenseBonus {
                kind: "melee".into(),
                value: 3,
                per_level: false,
            }]
        );
    }

    #[test]
    fn cause_fear() {
        let s = parse_special(
            "cause fear in battle at a skill level of 6. This ability will not target \
             creatures which are currently affected by fear. This ability cannot target \
             monsters. This ability does between 2 and 120 spirit attacks. Each attack causes \
             the target to be effected by fear (-2 to attack, -2 versus melee attacks, -2 \
             versus riding attacks) for the rest of the battle.",
        );
        assert_eq!(s.name.as_deref(), Some("cause fear"));
        assert_eq!(s.level, Some(6));
        assert!(s.no_monster);
        assert_eq!(
            s.effects,
            Some(Filter::new(FilterMode::Except, vec!["fear".to_owned()]))
        );
        assert_eq!(s.soldiers, None);
        let effect = s.damage[0].effect.as_ref().unwrap();
        assert_eq!(effect.name, "fear");
        assert_eq!(effect.one_shot, Some(false));
        assert_eq!(effect.attack, Some(-2));
        assert_eq!(
            effect.defense_mods,
            vec![
                DefenseMod {
                    kind: "melee".into(),
                    value: -2
                },
                DefenseMod {
                    kind: "riding".into(),
                    value: -2
                },
            ]
        );
    }

    #[test]
    fn earthquake_building_filter() {
        let s = parse_special(
            "an earthquake in battle. This ability will only target units inside structures, \
             with the exception of the following structures: Magical Tower, Magical Fortress, \
             Magical Castle, or Magical Citadel. The bonus given to units inside buildings is \
             not effective against this ability. This ability does between 2 and 100 times the \
             skill level of the mage melee attacks.",
        );
        assert!(s.no_building);
        assert_eq!(s.soldiers, None);
        let buildings = s.buildings.unwrap();
        assert_eq!(buildings.mode, FilterMode::Except);
        assert_eq!(
            buildings.targets,
            vec!["Magical Tower", "Magical Fortress", "Magical Castle", "Magical Citadel"]
        );
    }

    #[test]
    fn banish_undead_soldier_filter() {
        let s = parse_special(
            "banish undead in battle. This ability will only target skeletons [SKEL], undead \
             [UNDE], or liches [LICH]. This ability does between 2 and 50 times the skill level \
             of the mage non-resistable attacks.",
        );
        let soldiers = s.soldiers.unwrap();
        assert_eq!(soldiers.mode, FilterMode::Only);
        assert_eq!(
            soldiers.targets,
            vec![
                ItemRef::new("skeletons", "SKEL"),
                ItemRef::new("undead", "UNDE"),
                ItemRef::new("liches", "LICH"),
            ]
        );
        assert_eq!(s.damage[0].kind, "non-resistable");
    }

    #[test]
    fn shield_item() {
        let s = parse_special(
            "invulnerability in battle at a skill level of 5. This ability provides the \
             wielder with a defence bonus of 5 against all all attacks.",
        );
        assert_eq!(s.name.as_deref(), Some("invulnerability"));
        assert_eq!(s.level, Some(5));
        assert_eq!(s.shields, vec!["all"]);
    }

    #[test]
    fn mount_filter() {
        let s = parse_special(
            "spook horses in battle. This ability will only target units mounted on horses \
             [HORS]. This ability does between 2 and 20 spirit attacks.",
        );
        assert_eq!(
            s.mounts,
            Some(Filter::new(FilterMode::Only, vec![ItemRef::new("horses", "HORS")]))
        );
    }

    #[test]
    fn unrecognized_text_is_empty() {
        assert_eq!(parse_special("something odd"), Special::default());
    }
}
