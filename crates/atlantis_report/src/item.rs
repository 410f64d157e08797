//! Item description lines.
//!
//! Items come in two shapes. Ordinary items carry a weight right after the
//! abbreviation, followed by movement capacities:
//!
//! ```text
//! horse [HORS], weight 50, walking capacity 20, riding capacity 20, moves
//! 4 hexes per month. This is a mount. ...
//! ```
//!
//! Ships describe their hull instead:
//!
//! ```text
//! longboat [LONG]. This is a ship with a capacity of 200 and a speed of 4
//! hexes per month. This ship requires a total of 4 levels of sailing skill
//! to sail.
//! ```
//!
//! Both shapes end with the same set of optional clauses.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::clause::{Clause, strip, take_prefix};
use crate::events::{
    Armor, ArmorSave, AttackRate, CombatItem, GrantSkill, Hitch, ItemDef, ItemRef, Monster,
    MonsterStats, Mount, MountSkill, Quantity, Race, Resistance, RidingBonus, ShipStats,
    SkillBonus, SkillRef, SpecialText, ToolBoost, TradeGood, Weapon, WindBonus,
};
use crate::fragments::{
    number, parse_defenses, parse_item_ref, parse_skill_ref, present, split_list, text,
};
use crate::special::parse_special;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex")
}

// =============================================================================
// Headers
// =============================================================================

static ORDINARY: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^(?P<illusion>illusory )?(?P<name>[^\[]+) \[(?P<abbr>\w+)\](?P<rest>, weight (?P<weight>\d+).*)",
    )
});
static SHIP: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^(?P<illusion>illusory )?(?P<name>[^\[]+) \[(?P<abbr>\w+)\](?P<rest>\. This is a (?P<fly>flying ')?ship'? with a capacity of (?P<capacity>\d+) and a speed of (?P<speed>\d+) hex(?:es)? per month\. This ship requires a total of (?P<sailors>\d+) levels of sailing skill to sail.*)",
    )
});
static WEIGHT: LazyLock<Regex> = LazyLock::new(|| compile(r"^, weight \d+"));
static SHIP_HULL: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^\. This is a (?:flying ')?ship'? with a capacity of \d+ and a speed of \d+ hex(?:es)? per month\. This ship requires a total of \d+ levels of sailing skill to sail",
    )
});
static HITCH: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^, walking capacity (?P<capacity>\d+) when hitched to an? (?P<name>[^\[]+) \[(?P<abbr>\w+)\]",
    )
});
static CAPACITY: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^, (?:(?P<kind>walking|riding|swimming|flying) capacity (?P<capacity>\d+)|can (?P<short>walk|ride|swim|fly))",
    )
});
static SPEED: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^, moves (?P<speed>\d+) hex(?:es)? per month"));
static SHIP_DEFENSE: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^\. This ship provides defense to the first (?P<protect>\d+) men inside it, giving a defensive bonus of (?P<bonus>[^.]+)",
    )
});
static SHIP_MAGES: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^\. This ship will allow (?:up to (?P<max>\d+) mages|one mage) to study above level 2")
});

// =============================================================================
// Weapon and Monster Details
// =============================================================================

static WEAPON_SKILL: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^(?:No skill is needed to wield this weapon|Knowledge of (?P<name>[^\[]+) \[(?P<abbr>\w+)\] is needed to wield this weapon)\.",
    )
});
static WEAPON_BONUS: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^(?:This weapon grants|and) a (?P<kind>bonus|penalty) of (?P<bonus>\d+) on (?P<when>attack|defense)(?P<both> and defense)?\.?",
    )
});
static WEAPON_MOUNT_BONUS: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^This weapon (?:also )?grants a (?P<kind>bonus|penalty) of (?P<bonus>\d+) against mounted opponents\.",
    )
});
static WEAPON_TROOPS: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^Only (?P<who>mounted|foot) troops may use this weapon\."));
static WEAPON_RIDING: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^Wielders of this weapon, if mounted, get their riding skill bonus on combat (?:(?P<attack>attack) and )?defense\.",
    )
});
static WEAPON_NO_DEFENSE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^Defenders are treated as if they have an effective combat skill of 0\.")
});
static WEAPON_NO_ATTACKER_SKILL: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^Attackers do not get skill bonus on defense\."));
static WEAPON_READY: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^(?:(?P<always>Wielders of this weapon never miss a round to ready their weapon)|There is a 50% chance that the wielder of this weapon gets a chance to attack in any given round)\.",
    )
});
static WEAPON_ATTACK_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^This weapon attacks versus the target's defense against (?P<kind>.+?) attacks\.")
});
static WEAPON_ATTACKS: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^This weapon allows (?:a number of attacks equal to (?P<half>half )?the skill level (?:\(rounded up\) )?of the attacker(?: plus (?P<plus>\d+))?|(?P<attacks>\d+) attacks?) (?:per|every (?P<every>\d+)) rounds?\.",
    )
});
static MONSTER_RESIST: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^This monster (?:has a resistance of (?P<value>\d+)|is (?P<text>.+?)) to (?P<kind>.+?) attacks\.",
    )
});
static MONSTER_SPECIAL: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^Monster can cast (?P<special>.+?\.) (?P<rest>This monster .*)$")
});
static MONSTER_STATS: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^This monster has (?P<attacks>\d+) melee attacks? per round and takes (?P<hits>\d+) hits? to kill\. (?:This monster regenerates (?P<regen>\d+) hits per round of battle\. )?This monster has a tactics score of (?P<tactics>\d+), a stealth score of (?P<stealth>\d+), and an observation score of (?P<observation>\d+)\.",
    )
});
static MONSTER_SPOILS: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^This monster might have (?P<kind>.+) items and silver as treasure\.")
});
static ARMOR_SAVE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^(?P<percent>\d+)% of the time versus (?P<class>.+) attacks")
});

// =============================================================================
// Common Clauses
// =============================================================================

static CLAUSES: LazyLock<Vec<Clause<ItemDef>>> = LazyLock::new(|| {
    vec![
        Clause::new(
            r"A unit may have at most (?P<amount>\d+|unlimited) (?P<name>[^\[]+) \[(?P<abbr>\w+)\]\.?",
            |caps, item| {
                item.max_inventory = match &caps["amount"] {
                    "unlimited" => Some(Quantity::Unlimited),
                    n => n.parse().ok().map(Quantity::Count),
                };
            },
        ),
        Clause::new(r"This item cannot be given to other units\.?", |_, item| {
            item.cant_give = true;
        }),
        Clause::new(
            r"This item can be eaten to provide (?P<food>\d+) silver towards a unit's maintenance cost\.?",
            |caps, item| item.food = number(caps, "food"),
        ),
        Clause::new(
            r"This item is a miscellaneous combat item\. (?P<mage_only>This item may only be used by a mage.*)?This item (?P<shield>provides|can cast) (?P<special>.*)",
            |caps, item| {
                let text = caps["special"].trim_end().to_owned();
                let special = parse_special(&text);
                item.combat = Some(CombatItem {
                    mage_only: present(caps, "mage_only"),
                    shield: &caps["shield"] == "provides",
                    ability: SpecialText { text, special },
                });
            },
        ),
        Clause::new(r"This item may only be used by a mage\.?", |_, item| {
            item.mage_only = true;
        }),
        Clause::new(
            r"This item allows its possessor to CAST the (?P<name>.+) spell as if their skill in .+ was (?:.+ of their (?P<from>.+) skills?, up to a maximum of )?level (?P<max>\d+)\.(?: A skill level of at least (?P<min>\d+) will always[^.]*\.)?",
            apply_grant,
        ),
        Clause::new(
            r"The possessor of this item will add (?P<boost>\d+) movement points to ships requiring up to (?P<sailing>\d+) sailing[^.]*\.?",
            |caps, item| {
                if let (Some(boost), Some(sailing)) = (number(caps, "boost"), number(caps, "sailing")) {
                    item.wind = Some(WindBonus { boost, sailing });
                }
            },
        ),
        Clause::new(
            r"This item grants a (?P<value>\d+) point bonus to a unit's stealth skill(?P<per_man> \(note that a unit[^)]*\))?\.?",
            |caps, item| item.stealth = skill_bonus(caps),
        ),
        Clause::new(
            r"This item grants a (?P<value>\d+) point bonus to a unit's observation skill(?P<per_man> \(note that a unit[^)]*\))?\.?",
            |caps, item| item.observation = skill_bonus(caps),
        ),
        Clause::new(r"This is the currency of[^.]*\.?", |_, item| item.money = true),
        Clause::new(r"This item is a trade resource\.?", |_, item| {
            item.resource = true;
        }),
        Clause::new(
            r"This is a mount\. (?:(?P<no_skill>No skill is required to use this mount)|(?P<unridable>This mount is unridable)|This mount requires (?P<skill>[^\[]+ \[\w+\]) of at least level \d+ to ride in combat)\. This mount gives a minimum bonus of \+(?P<min>\d+) when ridden into combat\. This mount gives a maximum bonus of \+(?P<max>\d+) when ridden into combat\.(?: This mount gives a maximum bonus of \+(?P<hampered>\d+) when ridden into combat in terrain which allows ridden mounts but not flying mounts\.)?(?: When ridden, this mount causes (?P<special>.+))?",
            apply_mount,
        ),
        Clause::new(
            r"This is a trade good\.(?: This item can be (?:bought and sold for (?P<base>\d+) silver|bought for between (?P<min_buy>\d+) and (?P<max_buy>\d+) silver\. This item can be sold for between (?P<min_sell>\d+) and (?P<max_sell>\d+) silver)\.)?",
            |caps, item| {
                item.trade = Some(TradeGood {
                    base_price: number(caps, "base"),
                    buy: number(caps, "min_buy").zip(number(caps, "max_buy")),
                    sell: number(caps, "min_sell").zip(number(caps, "max_sell")),
                });
            },
        ),
        Clause::new(
            r"This is a tool\. This item increases the production of (?P<items>[^.]+)\.",
            |caps, item| item.tool = parse_tool(&caps["items"]),
        ),
        Clause::new(
            r"This is a type of armor\. This armor will protect its wearer (?P<saves>[^.]+)\.(?P<assassination> This armor may be worn during assassination attempts\.)?",
            |caps, item| {
                let saves = split_list(&caps["saves"])
                    .into_iter()
                    .filter_map(|part| {
                        let save = ARMOR_SAVE.captures(part)?;
                        Some(ArmorSave {
                            class: save["class"].to_owned(),
                            percent: number(&save, "percent")?,
                        })
                    })
                    .collect();
                item.armor = Some(Armor {
                    saves,
                    assassination: present(caps, "assassination"),
                });
            },
        ),
        Clause::new(
            r"This is a (?:(?P<range>ranged|long|short) )?(?P<class>[^.]+?) weapon\.(?P<extra>.+)",
            |caps, item| item.weapon = Some(parse_weapon(caps)),
        ),
        Clause::new(
            r"This is a monster\. This monster attacks with a combat skill of (?P<level>\d+)\.(?P<extra>.*)",
            |caps, item| item.monster = parse_monster(caps),
        ),
        Clause::new(
            r"This race may study (?:(?P<skills>.*?) to level (?P<special>\d+) and all other skills|all skills) to level (?P<default>\d+)\.?",
            |caps, item| item.race = parse_race(caps),
        ),
        Clause::new(
            r", costs (?P<price>\d+) silver to withdraw",
            |caps, item| item.withdraw = number(caps, "price"),
        ),
    ]
});

/// Parses an item description line.
///
/// Returns `None` if the line is neither an ordinary item nor a ship.
#[must_use]
pub fn parse_item(line: &str) -> Option<ItemDef> {
    if let Some(caps) = ORDINARY.captures(line) {
        let mut item = header(&caps);
        item.weight = number(&caps, "weight");
        let (_, mut rest) = take_prefix(&WEIGHT, &caps["rest"])?;
        if let Some((hitch, tail)) = take_prefix(&HITCH, rest) {
            if let Some(walking) = number(&hitch, "capacity") {
                item.hitch = Some(Hitch {
                    item: ItemRef::new(&hitch["name"], &hitch["abbr"]),
                    walking,
                });
            }
            rest = tail;
        }
        while let Some((capacity, tail)) = take_prefix(&CAPACITY, rest) {
            read_capacity(&capacity, &mut item);
            rest = tail;
        }
        if let Some((speed, tail)) = take_prefix(&SPEED, rest) {
            item.speed = number(&speed, "speed");
            rest = tail;
        }
        return Some(finish(item, rest));
    }

    let caps = SHIP.captures(line)?;
    let mut item = header(&caps);
    item.speed = number(&caps, "speed");
    let capacity = number(&caps, "capacity");
    if present(&caps, "fly") {
        item.capacities.flying = capacity;
    } else {
        item.capacities.swimming = capacity;
    }
    let mut ship = ShipStats {
        sailors: number(&caps, "sailors")?,
        ..ShipStats::default()
    };
    let (_, mut rest) = take_prefix(&SHIP_HULL, &caps["rest"])?;
    if let Some((defense, tail)) = take_prefix(&SHIP_DEFENSE, rest) {
        ship.protect = number(&defense, "protect");
        ship.defense = parse_defenses(&defense["bonus"]);
        rest = tail;
    }
    if let Some((mages, tail)) = take_prefix(&SHIP_MAGES, rest) {
        ship.max_mages = Some(number(&mages, "max").unwrap_or(1));
        rest = tail;
    }
    item.ship = Some(ship);
    Some(finish(item, rest))
}

fn header(caps: &Captures<'_>) -> ItemDef {
    ItemDef {
        name: caps["name"].to_owned(),
        abbr: caps["abbr"].to_owned(),
        illusion: present(caps, "illusion"),
        full_text: caps["rest"].to_owned(),
        ..ItemDef::default()
    }
}

/// Strips the common clauses and keeps what is left as the description.
fn finish(mut item: ItemDef, rest: &str) -> ItemDef {
    let rest = strip(rest, &CLAUSES, &mut item);
    let rest = rest.trim_start_matches(|c: char| c == '.' || c == ',' || c.is_whitespace());
    if !rest.is_empty() {
        item.description = Some(rest.to_owned());
    }
    item
}

fn read_capacity(caps: &Captures<'_>, item: &mut ItemDef) {
    let (kind, value) = match caps.name("short") {
        Some(short) => (short.as_str(), Some(0)),
        None => (
            caps.name("kind").map_or("", |m| m.as_str()),
            number(caps, "capacity"),
        ),
    };
    let slot = match kind {
        "walk" | "walking" => &mut item.capacities.walking,
        "ride" | "riding" => &mut item.capacities.riding,
        "swim" | "swimming" => &mut item.capacities.swimming,
        "fly" | "flying" => &mut item.capacities.flying,
        _ => return,
    };
    *slot = value;
}

fn skill_bonus(caps: &Captures<'_>) -> Option<SkillBonus> {
    Some(SkillBonus {
        value: number(caps, "value")?,
        per_man: present(caps, "per_man"),
    })
}

fn apply_grant(caps: &Captures<'_>, item: &mut ItemDef) {
    let Some(max_level) = number(caps, "max") else {
        return;
    };
    let from_skills: Vec<String> = caps
        .name("from")
        .map(|m| split_list(m.as_str()).into_iter().map(str::to_owned).collect())
        .unwrap_or_default();
    // A grant not tied to other skills is always at its maximum.
    let min_level = if from_skills.is_empty() {
        max_level
    } else {
        number(caps, "min").unwrap_or(0)
    };
    item.grant = Some(GrantSkill {
        name: caps["name"].to_owned(),
        max_level,
        min_level,
        from_skills,
    });
}

fn apply_mount(caps: &Captures<'_>, item: &mut ItemDef) {
    let (Some(min_bonus), Some(max_bonus)) = (number(caps, "min"), number(caps, "max")) else {
        return;
    };
    let skill = if present(caps, "unridable") {
        MountSkill::Unridable
    } else {
        caps.name("skill")
            .and_then(|m| parse_skill_ref(m.as_str()))
            .map_or(MountSkill::None, MountSkill::Required)
    };
    let special = caps.name("special").map(|m| {
        let text = m.as_str().trim_end().to_owned();
        let special = parse_special(&text);
        SpecialText { text, special }
    });
    item.mount = Some(Mount {
        skill,
        min_bonus,
        max_bonus,
        max_hampered_bonus: number(caps, "hampered"),
        special,
    });
}

fn parse_tool(text: &str) -> Vec<ToolBoost> {
    split_list(text)
        .into_iter()
        .filter_map(|part| {
            let (what, value) = part.rsplit_once(" by ")?;
            let value = value.trim().parse().ok()?;
            if what == "entertainment" {
                return Some(ToolBoost {
                    name: what.to_owned(),
                    abbr: None,
                    value,
                });
            }
            let item = parse_item_ref(what)?;
            Some(ToolBoost {
                name: item.name,
                abbr: Some(item.abbr),
                value,
            })
        })
        .collect()
}

fn signed(caps: &Captures<'_>) -> Option<i32> {
    let bonus = i32::try_from(number(caps, "bonus")?).ok()?;
    Some(if &caps["kind"] == "penalty" { -bonus } else { bonus })
}

fn parse_weapon(caps: &Captures<'_>) -> Weapon {
    let mut weapon = Weapon {
        range: text(caps, "range"),
        class: caps["class"].to_owned(),
        ..Weapon::default()
    };
    let mut rest = caps.name("extra").map_or("", |m| m.as_str().trim());

    if let Some((skill, tail)) = take_prefix(&WEAPON_SKILL, rest) {
        if let (Some(name), Some(abbr)) = (skill.name("name"), skill.name("abbr")) {
            weapon.skill = Some(SkillRef::new(name.as_str(), abbr.as_str()));
        }
        rest = tail.trim_start();
    }
    while let Some((bonus, tail)) = take_prefix(&WEAPON_BONUS, rest) {
        if let Some(value) = signed(&bonus) {
            if present(&bonus, "both") {
                weapon.attack_bonus = value;
                weapon.defense_bonus = value;
            } else if &bonus["when"] == "attack" {
                weapon.attack_bonus = value;
            } else {
                weapon.defense_bonus = value;
            }
        }
        rest = tail.trim_start();
    }
    if let Some((bonus, tail)) = take_prefix(&WEAPON_MOUNT_BONUS, rest) {
        weapon.mount_bonus = signed(&bonus);
        rest = tail.trim_start();
    }
    if let Some((troops, tail)) = take_prefix(&WEAPON_TROOPS, rest) {
        if &troops["who"] == "mounted" {
            weapon.mounted_only = true;
        } else {
            weapon.foot_only = true;
        }
        rest = tail.trim_start();
    }
    if let Some((riding, tail)) = take_prefix(&WEAPON_RIDING, rest) {
        weapon.riding_bonus = Some(if present(&riding, "attack") {
            RidingBonus::AttackAndDefense
        } else {
            RidingBonus::Defense
        });
        rest = tail.trim_start();
    }
    if let Some((_, tail)) = take_prefix(&WEAPON_NO_DEFENSE, rest) {
        weapon.no_defense = true;
        rest = tail.trim_start();
    }
    if let Some((_, tail)) = take_prefix(&WEAPON_NO_ATTACKER_SKILL, rest) {
        weapon.no_attacker_skill = true;
        rest = tail.trim_start();
    }
    if let Some((ready, tail)) = take_prefix(&WEAPON_READY, rest) {
        weapon.always_ready = present(&ready, "always");
        rest = tail.trim_start();
    }
    if let Some((kind, tail)) = take_prefix(&WEAPON_ATTACK_TYPE, rest) {
        weapon.attack_type = text(&kind, "kind");
        rest = tail.trim_start();
    }
    if let Some((attacks, _)) = take_prefix(&WEAPON_ATTACKS, rest) {
        weapon.attacks = Some(match number(&attacks, "attacks") {
            Some(count) => AttackRate::Fixed {
                attacks: count,
                rounds: number(&attacks, "every").unwrap_or(1),
            },
            None => AttackRate::SkillLevel {
                half: present(&attacks, "half"),
                plus: number(&attacks, "plus").unwrap_or(0),
            },
        });
    }
    weapon
}

fn parse_monster(caps: &Captures<'_>) -> Option<Monster> {
    let mut monster = Monster {
        attack_level: number(caps, "level")?,
        ..Monster::default()
    };
    let mut rest = caps.name("extra").map_or("", |m| m.as_str().trim());

    while let Some((resist, tail)) = take_prefix(&MONSTER_RESIST, rest) {
        let value = match number(&resist, "value") {
            Some(value) => Resistance::Value(value),
            None => Resistance::Text(resist["text"].to_owned()),
        };
        monster.resistances.insert(resist["kind"].to_owned(), value);
        rest = tail.trim_start();
    }
    if let Some(special) = MONSTER_SPECIAL.captures(rest) {
        let text = special["special"].trim().to_owned();
        monster.special = Some(SpecialText {
            special: parse_special(&text),
            text,
        });
        rest = special.name("rest").map_or("", |m| m.as_str());
    }
    if let Some((stats, tail)) = take_prefix(&MONSTER_STATS, rest) {
        monster.stats = monster_stats(&stats);
        rest = tail.trim_start();
    }
    if let Some(spoils) = MONSTER_SPOILS.captures(rest) {
        monster.spoils = Some(spoils["kind"].to_owned());
    }
    Some(monster)
}

fn monster_stats(caps: &Captures<'_>) -> Option<MonsterStats> {
    Some(MonsterStats {
        attacks: number(caps, "attacks")?,
        hits: number(caps, "hits")?,
        regeneration: number(caps, "regen"),
        tactics: number(caps, "tactics")?,
        stealth: number(caps, "stealth")?,
        observation: number(caps, "observation")?,
    })
}

fn parse_race(caps: &Captures<'_>) -> Option<Race> {
    let skills = caps
        .name("skills")
        .map(|m| {
            split_list(m.as_str())
                .into_iter()
                .filter_map(|part| {
                    if part == "all magical skills" {
                        Some(SkillRef::new("manipulation", "MANI"))
                    } else {
                        parse_skill_ref(part)
                    }
                })
                .collect()
        })
        .unwrap_or_default();
    Some(Race {
        default_level: number(caps, "default")?,
        special_level: number(caps, "special"),
        skills,
    })
}
