//! Region report lines.
//!
//! A region report starts with its header and continues with indented
//! detail lines, exits, structures and units:
//!
//! ```text
//! forest (13,41) in Bidswaul, 1248 peasants (wood elves), $624.
//! ------------------------------------------------------------
//!   The weather was clear last month; it will be clear next month.
//!   Wages: $12.5 (Max: $312).
//!   Products: 21 wood [WOOD], 11 horses [HORS].
//!
//! Exits:
//!   North : plain (13,39) in Bidswaul.
//!
//! + Tower [101] : Tower, needs 10.
//!   * Lumb (679), Mathoyoh (3), 5 wood elves [WELF].
//! ```
//!
//! Line shapes are tried in a fixed order and the first match wins.

use std::sync::LazyLock;

use atlantis_foundation::{Attitude, Direction};
use regex::{Captures, Regex};

use crate::clause::{cut, last};
use crate::consumer::ReportConsumer;
use crate::events::{
    Capacity, FleetShips, GuardMode, ItemRef, MarketOffer, MarketSide, Population, RegionExit,
    RegionGate, RegionHeader, RegionMarket, RegionStructure, RegionUnit, RegionWages,
    RegionWeather, Scope, SkillDays, SkillRef, UnitAttitude, UnitItem, WeatherCause,
};
use crate::fragments::{
    REGION_PRINT, location, number, numbered, parse_item_ref, parse_item_stack, parse_skill_ref,
    present, split_list, text, town,
};
use crate::reader::INDENT;

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^{}(?:, (?P<peasants>\d+) peasants(?: \((?P<races>.+)\))?, \$(?P<wealth>\d+))?\.",
        *REGION_PRINT
    ))
    .expect("valid regex")
});
static WEATHER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^  .* was (?:(?P<cause>unnaturally|an unnatural) )?(?P<last>.+) last month; it will be (?P<next>.+) next month",
    )
    .expect("valid regex")
});
static WAGES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^  Wages: \$(?P<productivity>[0-9.]+)(?: \(Max: \$(?P<max>\d+))?")
        .expect("valid regex")
});
static MARKET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^  (?P<side>Wanted|For Sale): (?P<items>.+)\.").expect("valid regex")
});
static ENTERTAINMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^  Entertainment available: \$(?P<amount>\d+)\.").expect("valid regex")
});
static PRODUCTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^  Products: (?P<products>.+)\.").expect("valid regex"));
static EXIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^  (?P<direction>Northeast|Northwest|Southeast|Southwest|South|North) : {}",
        *REGION_PRINT
    ))
    .expect("valid regex")
});
static GATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*There is a (?:closed )?Gate here(?: \(Gate (?P<number>\d+))?")
        .expect("valid regex")
});

// =============================================================================
// Structures
// =============================================================================

static OBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\+ (?P<name>[^\[]+) \[(?P<num>\d+)\] : (?P<object>.+)").expect("valid regex")
});
static CLOSED: LazyLock<Regex> = LazyLock::new(|| last(r", closed to player units"));
static RUNES: LazyLock<Regex> = LazyLock::new(|| last(r", engraved with Runes"));
static INNER: LazyLock<Regex> = LazyLock::new(|| last(r", contains an inner"));
static MAINTENANCE: LazyLock<Regex> = LazyLock::new(|| last(r", needs maintenance"));
static DECAY: LazyLock<Regex> = LazyLock::new(|| last(r", about to decay"));
static INCOMPLETE: LazyLock<Regex> = LazyLock::new(|| last(r", needs (?P<needs>\d+)"));
static FLEET_SHIPS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<count>\d+) (?P<name>.+)").expect("valid regex"));

// =============================================================================
// Units
// =============================================================================

static UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?P<indent>\s*)(?P<attitude>[-*=:%!]) (?P<name>[^(]+) \((?P<num>\d+)\)",
        r"(?P<guard>, on guard)?",
        r"(?:, (?P<faction>[^(]+) \((?P<faction_num>\d+)\)(?P<avoiding>, avoiding)?(?P<behind>, behind)?)?",
        r"(?:, revealing (?P<reveal>unit|faction))?",
        r"(?P<holding>, holding)?(?P<taxing>, taxing)?",
        r"(?P<no_aid>, receiving no aid)?(?P<sharing>, sharing)?",
        r"(?:, consuming (?P<consuming>unit|faction)'s food)?",
        r"(?P<no_cross>, won't cross water)?",
        r"(?:, (?P<spoils>.+) battle spoils)?",
        r"(?P<rest>.+)",
    ))
    .expect("valid regex")
});
static VISITED: LazyLock<Regex> = LazyLock::new(|| last(r"\. Has visited (?P<visited>.+)"));
static CAN_STUDY: LazyLock<Regex> = LazyLock::new(|| last(r"\. Can Study: (?P<skills>.+)"));
static READY_ITEMS: LazyLock<Regex> = LazyLock::new(|| last(r"\. Ready items?: (?P<items>.+)"));
static READY_ARMOR: LazyLock<Regex> = LazyLock::new(|| last(r"\. Ready armors?: (?P<items>.+)"));
static READY_WEAPONS: LazyLock<Regex> =
    LazyLock::new(|| last(r"\. Ready weapons?: (?P<items>.+)"));
static COMBAT_SPELL: LazyLock<Regex> =
    LazyLock::new(|| last(r"\. Combat spell: (?P<skill>[^\[]+ \[\w+\])"));
static SKILLS: LazyLock<Regex> = LazyLock::new(|| last(r"\. Skills: (?P<skills>.+)"));
static SKILL_DAYS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>[^\[]+) \[(?P<abbr>\w+)\] (?P<level>\d+) \((?P<days>\d+)(?:\+(?P<rate>\d+))?\)")
        .expect("valid regex")
});
static CAPACITY: LazyLock<Regex> = LazyLock::new(|| {
    last(
        r"\. Weight: (?P<weight>\d+)\. Capacity: (?P<flying>\d+)/(?P<riding>\d+)/(?P<walking>\d+)/(?P<swimming>\d+)",
    )
});
static UNFINISHED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^unfinished (?P<item>.+) \(needs (?P<needs>\d+)\)").expect("valid regex")
});
static ILLUSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<item>.+) \(illusion\)").expect("valid regex"));

/// Parses one region report line. Returns `false` if nothing matched.
pub fn parse_region_line<C: ReportConsumer + ?Sized>(line: &str, consumer: &mut C) -> bool {
    if let Some(caps) = HEADER.captures(line) {
        if let Some(location) = location(&caps) {
            let population = match (number(&caps, "peasants"), number(&caps, "wealth")) {
                (Some(peasants), Some(wealth)) => Some(Population {
                    peasants,
                    races: text(&caps, "races"),
                    wealth,
                }),
                _ => None,
            };
            consumer.region(RegionHeader {
                location,
                town: town(&caps),
                population,
            });
            return true;
        }
    }
    if let Some(caps) = WEATHER.captures(line) {
        let cause = caps.name("cause").map(|m| {
            if m.as_str() == "unnaturally" {
                WeatherCause::ClearSkies
            } else {
                WeatherCause::Blizzard
            }
        });
        consumer.region_weather(RegionWeather {
            last: caps["last"].to_owned(),
            next: caps["next"].to_owned(),
            cause,
        });
        return true;
    }
    if let Some(caps) = WAGES.captures(line) {
        if let Ok(productivity) = caps["productivity"].trim_end_matches('.').parse() {
            consumer.region_wages(RegionWages {
                productivity,
                maximum: number(&caps, "max").unwrap_or(0),
            });
            return true;
        }
    }
    if let Some(caps) = MARKET.captures(line) {
        if &caps["items"] != "none" {
            let side = if &caps["side"] == "Wanted" {
                MarketSide::Sell
            } else {
                MarketSide::Buy
            };
            let offers = caps["items"]
                .split(", ")
                .filter_map(|entry| {
                    let (stack, price) = entry.split_once(" at $")?;
                    Some(MarketOffer {
                        stack: parse_item_stack(stack)?,
                        price: price.parse().ok()?,
                    })
                })
                .collect();
            consumer.region_market(RegionMarket { side, offers });
        }
        return true;
    }
    if let Some(amount) = ENTERTAINMENT
        .captures(line)
        .and_then(|c| number(&c, "amount"))
    {
        consumer.region_entertainment(amount);
        return true;
    }
    if let Some(caps) = PRODUCTS.captures(line) {
        if &caps["products"] != "none" {
            let products = caps["products"]
                .split(", ")
                .filter_map(parse_item_stack)
                .collect();
            consumer.region_products(products);
        }
        return true;
    }
    if let Some(caps) = EXIT.captures(line) {
        if let (Some(direction), Some(location)) =
            (Direction::from_name(&caps["direction"]), location(&caps))
        {
            consumer.region_exit(RegionExit {
                direction,
                location,
                town: town(&caps),
            });
            return true;
        }
    }
    if let Some(caps) = GATE.captures(line) {
        let number = number(&caps, "number");
        consumer.region_gate(RegionGate {
            number,
            open: number.is_some(),
        });
        return true;
    }
    if let Some(structure) = OBJECT.captures(line).and_then(|c| read_structure(&c)) {
        consumer.region_structure(structure);
        return true;
    }
    if let Some(unit) = UNIT.captures(line).and_then(|c| read_unit(&c)) {
        consumer.region_unit(unit);
        return true;
    }
    false
}

fn read_structure(caps: &Captures<'_>) -> Option<RegionStructure> {
    let mut structure = RegionStructure {
        name: caps["name"].to_owned(),
        num: number(caps, "num")?,
        ..RegionStructure::default()
    };
    let mut object = caps["object"].trim_end_matches('.');

    if let Some((_, head)) = cut(&CLOSED, object) {
        structure.closed = true;
        object = head;
    }
    if let Some((_, head)) = cut(&RUNES, object) {
        structure.runes = true;
        object = head;
    }
    if let Some((_, head)) = cut(&INNER, object) {
        structure.inner = true;
        object = head;
    }
    if let Some((_, head)) = cut(&MAINTENANCE, object) {
        structure.needs_maintenance = true;
        object = head;
    }
    if let Some((_, head)) = cut(&DECAY, object) {
        structure.about_to_decay = true;
        object = head;
    }
    if let Some((needs, head)) = cut(&INCOMPLETE, object) {
        structure.incomplete = number(&needs, "needs");
        object = head;
    }

    match object.split_once(", ") {
        Some((kind, ships)) => {
            structure.kind = kind.to_owned();
            structure.fleet = ships
                .split(", ")
                .filter_map(|entry| {
                    let ships = FLEET_SHIPS.captures(entry)?;
                    Some(FleetShips {
                        count: number(&ships, "count")?,
                        name: ships["name"].to_owned(),
                    })
                })
                .collect();
        }
        None => object.clone_into(&mut structure.kind),
    }
    Some(structure)
}

fn unit_attitude(marker: &str) -> Option<UnitAttitude> {
    let attitude = match marker {
        "*" => return Some(UnitAttitude::Own),
        "=" => Attitude::Ally,
        ":" => Attitude::Friendly,
        "-" => Attitude::Neutral,
        "%" => Attitude::Unfriendly,
        "!" => Attitude::Hostile,
        _ => return None,
    };
    Some(UnitAttitude::Other(attitude))
}

fn scope(caps: &Captures<'_>, group: &str) -> Option<Scope> {
    caps.name(group).map(|m| match m.as_str() {
        "faction" => Scope::Faction,
        _ => Scope::Unit,
    })
}

fn item_refs(text: &str) -> Vec<ItemRef> {
    text.trim_end_matches('.')
        .split(", ")
        .filter_map(parse_item_ref)
        .collect()
}

fn read_unit(caps: &Captures<'_>) -> Option<RegionUnit> {
    let guard = if present(caps, "avoiding") {
        Some(GuardMode::Avoid)
    } else if present(caps, "guard") {
        Some(GuardMode::Guard)
    } else {
        None
    };
    let mut unit = RegionUnit {
        name: caps["name"].to_owned(),
        num: number(caps, "num")?,
        in_structure: &caps["indent"] == INDENT,
        attitude: unit_attitude(&caps["attitude"])?,
        faction: numbered(caps, "faction", "faction_num"),
        guard,
        behind: present(caps, "behind"),
        reveal: scope(caps, "reveal"),
        holding: present(caps, "holding"),
        taxing: present(caps, "taxing"),
        no_aid: present(caps, "no_aid"),
        sharing: present(caps, "sharing"),
        consuming: scope(caps, "consuming"),
        no_cross: present(caps, "no_cross"),
        spoils: text(caps, "spoils"),
        visited: Vec::new(),
        can_study: Vec::new(),
        ready_weapons: Vec::new(),
        ready_armor: Vec::new(),
        ready_items: Vec::new(),
        combat_spell: None,
        skills: Vec::new(),
        weight: None,
        capacity: None,
        items: Vec::new(),
    };
    let mut rest = caps.name("rest").map_or("", |m| m.as_str());

    // Each detail runs to the end of the line, so they are cut from the
    // last one printed backwards.
    if let Some((visited, head)) = cut(&VISITED, rest) {
        unit.visited = split_list(visited["visited"].trim_end_matches('.'))
            .into_iter()
            .map(str::to_owned)
            .collect();
        rest = head;
    }
    if let Some((study, head)) = cut(&CAN_STUDY, rest) {
        unit.can_study = study["skills"]
            .trim_end_matches('.')
            .split(", ")
            .filter_map(parse_skill_ref)
            .collect();
        rest = head;
    }
    if let Some((ready, head)) = cut(&READY_ITEMS, rest) {
        unit.ready_items = item_refs(&ready["items"]);
        rest = head;
    }
    if let Some((ready, head)) = cut(&READY_ARMOR, rest) {
        unit.ready_armor = item_refs(&ready["items"]);
        rest = head;
    }
    if let Some((ready, head)) = cut(&READY_WEAPONS, rest) {
        unit.ready_weapons = item_refs(&ready["items"]);
        rest = head;
    }
    if let Some((spell, head)) = cut(&COMBAT_SPELL, rest) {
        unit.combat_spell = parse_skill_ref(&spell["skill"]);
        rest = head;
    }
    if let Some((skills, head)) = cut(&SKILLS, rest) {
        unit.skills = skills["skills"]
            .trim_end_matches('.')
            .split(", ")
            .filter_map(|entry| {
                let skill = SKILL_DAYS.captures(entry)?;
                Some(SkillDays {
                    skill: SkillRef::new(&skill["name"], &skill["abbr"]),
                    level: number(&skill, "level")?,
                    days: number(&skill, "days")?,
                    rate: number(&skill, "rate"),
                })
            })
            .collect();
        rest = head;
    }
    if let Some((load, head)) = cut(&CAPACITY, rest) {
        unit.weight = number(&load, "weight");
        unit.capacity = Some(Capacity {
            flying: number(&load, "flying")?,
            riding: number(&load, "riding")?,
            walking: number(&load, "walking")?,
            swimming: number(&load, "swimming")?,
        });
        rest = head;
    }

    unit.items = rest
        .trim_matches(|c: char| c == '.' || c == ' ' || c == ',')
        .split(", ")
        .filter_map(read_unit_item)
        .collect();
    Some(unit)
}

fn read_unit_item(entry: &str) -> Option<UnitItem> {
    let mut entry = entry;
    let mut unfinished = None;
    if let Some(caps) = UNFINISHED.captures(entry) {
        unfinished = number(&caps, "needs");
        entry = caps.name("item").map_or(entry, |m| m.as_str());
    }
    let mut illusion = false;
    if let Some(caps) = ILLUSION.captures(entry) {
        illusion = true;
        entry = caps.name("item").map_or(entry, |m| m.as_str());
    }
    Some(UnitItem {
        stack: parse_item_stack(entry)?,
        unfinished,
        illusion,
    })
}
