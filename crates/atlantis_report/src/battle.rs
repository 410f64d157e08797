//! Battle narrative lines.
//!
//! A battle reads as
//!
//! ```text
//! start, (side marker, side unit*)*, (round marker, round line*)*, end,
//! casualties, (heal | loses | damaged units)*, spoils, undead raised?
//! ```
//!
//! Every line is tried against each shape in that order. Nothing here
//! enforces the sequence; consumers may rely on it for well-formed input.

use std::sync::LazyLock;

use regex::Regex;

use crate::consumer::ReportConsumer;
use crate::events::{
    BattleEnd, BattleRaise, BattleRegenerate, BattleResult, BattleRound, BattleShield, BattleSide,
    BattleSideUnit, BattleSpecial, BattleStart, CombatStats, CombatantItem, HitChange, ItemRef,
    ItemStack, NamedLevel, Quantity,
};
use crate::fragments::{REGION_SHORT, location, number, numbered, parse_item_stack, split_top_level};

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex")
}

static START: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"^(?P<att_name>[^(]+) \((?P<att>\d+)\) (?P<action>attempts to assassinate|attacks) (?P<tar_name>[^(]+) \((?P<tar>\d+)\) in {REGION_SHORT}!"
    ))
});
static ASSASSINATED: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"^(?P<tar_name>[^(]+) \((?P<tar>\d+)\) is assassinated in {REGION_SHORT}!"
    ))
});
static SIDE: LazyLock<Regex> = LazyLock::new(|| compile(r"^(?P<side>Attacker|Defender)s:"));
static UNIT: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^(?P<name>[^\[(]+) \((?P<num>\d+)\)(?: (?P<fac_name>[^(]+) \((?P<fac>\d+)\))?(?P<behind>, behind)?(?:, (?P<list>[^.]+))?\.",
    )
});
static UNIT_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^(?:(?P<amount>\d+) )?(?P<name>[^\[]+) \[(?P<abbr>[^\]]+)\](?: \(Combat (?P<attack>\d+)/(?P<defense>\d+), Attacks (?P<attacks>\d+), Hits (?P<hits>\d+), Tactics (?P<tactics>\d+)\))?",
    )
});
static UNIT_SKILL: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^(?P<name>.+) (?P<level>\d+)"));
static FREE_ROUND: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^(?P<name>[^(]+) \((?P<num>\d+)\) gets a free round of attacks\.")
});
static ROUND: LazyLock<Regex> = LazyLock::new(|| compile(r"^Round (?P<round>\d+):"));
static SHIELD: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^(?P<name>[^(]+) \((?P<num>\d+)\) casts (?P<desc>.+ Shield|Clear Skies|invulnerability)\.",
    )
});
static DEFLECTED: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^(?P<name>[^(]+) \((?P<num>\d+)\) (?P<desc>.+), but it is deflected\.")
});
static SPECIAL: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^(?P<name>[^(]+) \((?P<num>\d+)\) (?P<desc>.+), (?P<effect>\D*)(?P<count>\d+)(?P<target>[^.]+)\.",
    )
});
static REGENERATE: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^(?P<name>[^(]+) \((?P<num>\d+)\) (?P<change>take|regenerate)s (?P<amount>no|\d+) hits (?:bringing it to|leaving it at) (?P<hits>\d+)/(?P<max>\d+)\.",
    )
});
static LOSES: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^(?P<name>[^(]+) \((?P<num>\d+)\) loses (?P<losses>\d+)\."));
static END: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^(?P<name>[^(]+) \((?P<num>\d+)\) is (?P<result>routed|destroyed)!")
});
static TIE: LazyLock<Regex> = LazyLock::new(|| compile(r"^The battle ends indecisively\."));
static CASUALTIES: LazyLock<Regex> = LazyLock::new(|| compile(r"^Total Casualties:"));
static HEAL: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^(?P<name>[^(]+) \((?P<num>\d+)\) heals (?P<healed>\d+)\."));
static DAMAGED: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^Damaged units: (?P<units>.+)\."));
static SPOILS: LazyLock<Regex> = LazyLock::new(|| compile(r"^Spoils: (?P<spoils>.+)\."));
static RAISE: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^(?P<undead>.+) rises? from the grave to (?:join (?P<name>[^(]+) \((?P<num>\d+)\)|seek vengeance)\.",
    )
});

/// Parses one battle line. Returns `false` if no shape matched.
#[allow(clippy::too_many_lines)]
pub fn parse_battle_line<C: ReportConsumer + ?Sized>(line: &str, consumer: &mut C) -> bool {
    if let Some(caps) = START.captures(line) {
        if let (Some(target), Some(location)) = (numbered(&caps, "tar_name", "tar"), location(&caps))
        {
            consumer.battle(BattleStart {
                attacker: numbered(&caps, "att_name", "att"),
                target,
                location,
                assassination: caps["action"].starts_with("attempts"),
            });
            return true;
        }
    }
    if let Some(caps) = ASSASSINATED.captures(line) {
        if let (Some(target), Some(location)) = (numbered(&caps, "tar_name", "tar"), location(&caps))
        {
            consumer.battle(BattleStart {
                attacker: None,
                target,
                location,
                assassination: true,
            });
            return true;
        }
    }
    if let Some(caps) = SIDE.captures(line) {
        let side = if &caps["side"] == "Attacker" {
            BattleSide::Attacker
        } else {
            BattleSide::Defender
        };
        consumer.battle_side(side);
        return true;
    }
    if let Some(caps) = UNIT.captures(line) {
        if let Some(unit) = numbered(&caps, "name", "num") {
            let mut side_unit = BattleSideUnit {
                unit,
                faction: numbered(&caps, "fac_name", "fac"),
                behind: caps.name("behind").is_some(),
                items: Vec::new(),
                skills: Vec::new(),
            };
            if let Some(list) = caps.name("list") {
                read_unit_list(list.as_str().trim(), &mut side_unit);
            }
            consumer.battle_side_unit(side_unit);
            return true;
        }
    }
    if let Some(unit) = FREE_ROUND
        .captures(line)
        .and_then(|c| numbered(&c, "name", "num"))
    {
        consumer.battle_round(BattleRound::Free(unit));
        return true;
    }
    if let Some(round) = ROUND.captures(line).and_then(|c| number(&c, "round")) {
        consumer.battle_round(BattleRound::Numbered(round));
        return true;
    }
    if let Some(caps) = SHIELD.captures(line) {
        if let Some(unit) = numbered(&caps, "name", "num") {
            consumer.battle_round_shield(BattleShield {
                unit,
                description: caps["desc"].to_owned(),
            });
            return true;
        }
    }
    if let Some(caps) = DEFLECTED.captures(line) {
        if let Some(unit) = numbered(&caps, "name", "num") {
            consumer.battle_round_special(BattleSpecial {
                unit,
                description: caps["desc"].to_owned(),
                effect: None,
                count: None,
                target: None,
                deflected: true,
            });
            return true;
        }
    }
    if let Some(caps) = SPECIAL.captures(line) {
        if let Some(unit) = numbered(&caps, "name", "num") {
            consumer.battle_round_special(BattleSpecial {
                unit,
                description: caps["desc"].trim().to_owned(),
                effect: Some(caps["effect"].trim().to_owned()),
                count: number(&caps, "count"),
                target: Some(caps["target"].trim().to_owned()),
                deflected: false,
            });
            return true;
        }
    }
    if let Some(caps) = REGENERATE.captures(line) {
        if let (Some(unit), Some(hits), Some(max_hits)) = (
            numbered(&caps, "name", "num"),
            number(&caps, "hits"),
            number(&caps, "max"),
        ) {
            let change = if &caps["change"] == "regenerate" {
                HitChange::Regenerate
            } else {
                HitChange::Take
            };
            consumer.battle_round_regenerate(BattleRegenerate {
                unit,
                change,
                amount: number(&caps, "amount").unwrap_or(0),
                hits,
                max_hits,
            });
            return true;
        }
    }
    if let Some(caps) = LOSES.captures(line) {
        if let (Some(unit), Some(losses)) = (numbered(&caps, "name", "num"), number(&caps, "losses"))
        {
            consumer.battle_loses(unit, losses);
            return true;
        }
    }
    if let Some(caps) = END.captures(line) {
        if let Some(loser) = numbered(&caps, "name", "num") {
            let result = if &caps["result"] == "routed" {
                BattleResult::Routed
            } else {
                BattleResult::Destroyed
            };
            consumer.battle_end(BattleEnd {
                result,
                loser: Some(loser),
            });
            return true;
        }
    }
    if TIE.is_match(line) {
        consumer.battle_end(BattleEnd {
            result: BattleResult::Tie,
            loser: None,
        });
        return true;
    }
    if CASUALTIES.is_match(line) {
        consumer.battle_casualties();
        return true;
    }
    if let Some(caps) = HEAL.captures(line) {
        if let (Some(unit), Some(healed)) = (numbered(&caps, "name", "num"), number(&caps, "healed"))
        {
            consumer.battle_casualties_heal(unit, healed);
            return true;
        }
    }
    if let Some(caps) = DAMAGED.captures(line) {
        let units = caps["units"]
            .split(", ")
            .filter_map(|u| u.trim().parse().ok())
            .collect();
        consumer.battle_casualties_units(units);
        return true;
    }
    if let Some(caps) = SPOILS.captures(line) {
        // `Spoils: none.` is recognized but not reported.
        if &caps["spoils"] != "none" {
            let items = caps["spoils"]
                .split(", ")
                .filter_map(parse_item_stack)
                .collect();
            consumer.battle_spoils(items);
        }
        return true;
    }
    if let Some(caps) = RAISE.captures(line) {
        let undead = caps["undead"]
            .split(" and ")
            .filter_map(parse_item_stack)
            .collect();
        consumer.battle_raise(BattleRaise {
            undead,
            joins: numbered(&caps, "name", "num"),
        });
        return true;
    }
    false
}

fn read_unit_list(list: &str, unit: &mut BattleSideUnit) {
    for part in split_top_level(list) {
        if let Some(caps) = UNIT_ITEM.captures(part) {
            let amount = number(&caps, "amount").unwrap_or(1);
            let stats = match (
                number(&caps, "attack"),
                number(&caps, "defense"),
                number(&caps, "attacks"),
                number(&caps, "hits"),
                number(&caps, "tactics"),
            ) {
                (Some(attack), Some(defense), Some(attacks), Some(hits), Some(tactics)) => {
                    Some(CombatStats {
                        attack,
                        defense,
                        attacks,
                        hits,
                        tactics,
                    })
                }
                _ => None,
            };
            unit.items.push(CombatantItem {
                stack: ItemStack {
                    amount: Quantity::Count(amount),
                    item: ItemRef::new(&caps["name"], &caps["abbr"]),
                },
                stats,
            });
        } else if let Some(caps) = UNIT_SKILL.captures(part) {
            if let Some(level) = number(&caps, "level") {
                unit.skills.push(NamedLevel {
                    name: caps["name"].to_owned(),
                    level,
                });
            }
        }
    }
}
