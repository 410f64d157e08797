//! Skill description lines.
//!
//! ```text
//! weaponsmith [WEAP] 1: A unit with this skill may PRODUCE swords [SWOR]
//! from 1 iron [IRON] at a rate of 1 per man-month. This skill costs 10
//! silver per month of study.
//! ```

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::clause::{Clause, strip};
use crate::events::{
    BuildOption, ItemRef, ItemStack, MagicProduct, Product, Production, ProductionCommand, SkillDef,
    SkillLevel, SkillRef, SpecialText,
};
use crate::fragments::{
    number, parse_item_ref, parse_item_stack, present, split_alternatives, split_at_group,
    split_list,
};
use crate::special::parse_special;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex")
}

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^(?P<name>[^\[]+) \[(?P<abbr>\w+)\] (?P<level>\d+): (?P<text>.*)")
});
static NO_REPORT: LazyLock<Regex> = LazyLock::new(|| compile(r"^No skill report"));
static SKILL_LEVEL: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^(?P<name>[^\[]+) \[(?P<abbr>\w+)\] (?P<level>\d+)"));
static BUILD_OPTION: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^an? (?P<name>.*) from (?P<cost>\d+) (?P<items>.*)")
});
static BUILD_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?P<sep>, | or )an? "));
static PRODUCT_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| compile(r"man-months?(?P<sep>,? and |, )"));
static SHIP_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?P<sep>,? and |, )[^\]]+\] from"));
static PRODUCE: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^(?P<scaled>a number of )?(?P<name>[^\[]+) \[(?P<abbr>\w+)\](?: equal to their skill level)?(?: from (?P<any>any of )?(?P<inputs>.+))? at a rate of (?P<output>\d+) per (?:(?P<months>\d+) )?man-months?",
    )
});
static BUILD: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^(?P<scaled>a number of )?(?P<name>[^\[]+) \[(?P<abbr>\w+)\](?: equal to their skill level)? from (?P<any>any of )?(?P<inputs>.+)",
    )
});
static CAST: LazyLock<Regex> = LazyLock::new(|| compile(r"\bCAST\b"));
static FOUNDATION: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^The \w+ skill is not directly useful to a mage, but is rather one of the Foundation skills",
    )
});
static APPRENTICE: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^A unit with this skill becomes an? (?P<rank>\w+)\. While (?P<plural>\w+) cannot cast spells directly",
    )
});

/// Skill clauses, latest sentence first. Greedy clauses that run to the
/// end of the text come after the fixed sentences they would swallow.
static CLAUSES: LazyLock<Vec<Clause<SkillDef>>> = LazyLock::new(|| {
    vec![
        Clause::new(
            r"This skill cannot be increased through experience\.?",
            |_, skill| skill.no_experience = true,
        ),
        Clause::new(r"This skill cannot be taught to other units\.?", |_, skill| {
            skill.no_teach = true;
        }),
        Clause::new(r"This skill cannot be studied via normal means\.?", |_, skill| {
            skill.no_study = true;
        }),
        Clause::new(
            r"This skill is studied at one half the normal speed\.?",
            |_, skill| skill.slow_study = true,
        ),
        Clause::new(
            r"This skill costs (?P<cost>\d+) silver per month of study\.?",
            |caps, skill| skill.cost = number(caps, "cost"),
        ),
        Clause::new(
            r"This skill requires (?P<depends>.*) to begin to study\.?",
            |caps, skill| skill.depends = parse_depends(&caps["depends"]),
        ),
        Clause::new(
            r"A unit with this skill may BUILD (?P<builds>an? .*)",
            |caps, skill| skill.builds = parse_builds(&caps["builds"]),
        ),
        Clause::new(
            r"A mage with this skill (?:has a (?P<percent>\d+) percent times their level chance to create an? |may create (?:(?P<times>\d+) times )?their level in )(?:illusory )?(?P<name>[^\[]+) \[(?P<abbr>\w+)\] via magic(?: at a cost of (?P<inputs>.+))?\. To use this spell, the mage should CAST.*",
            apply_magic_product,
        ),
        Clause::new(
            r"A unit with this skill is able to determine if a region contains (?P<items>.*)\.",
            |caps, skill| {
                skill.discovers = split_list(&caps["items"])
                    .into_iter()
                    .map(str::to_owned)
                    .collect();
            },
        ),
        Clause::new(
            r"A unit with this skill may (?P<command>BUILD|PRODUCE) (?P<production>.*)\.",
            |caps, skill| {
                skill.production = Some(parse_production(&caps["command"], &caps["production"]));
            },
        ),
        Clause::new(
            r"A mage with this skill can cast (?P<special>.+) In order to use this spell in combat, the mage should use the COMBAT order to set it as his combat spell\.",
            |caps, skill| {
                let text = caps["special"].trim().to_owned();
                let special = parse_special(&text);
                skill.combat = Some(SpecialText { text, special });
            },
        ),
    ]
});

/// Parses a skill description line.
///
/// Returns `None` if the line does not start with a skill header.
#[must_use]
pub fn parse_skill(line: &str) -> Option<SkillDef> {
    let caps = HEADER.captures(line)?;
    let mut skill = SkillDef {
        name: caps["name"].to_owned(),
        abbr: caps["abbr"].to_owned(),
        level: number(&caps, "level")?,
        full_text: caps["text"].to_owned(),
        ..SkillDef::default()
    };
    if NO_REPORT.is_match(&skill.full_text) {
        skill.no_report = true;
        return Some(skill);
    }

    let text = skill.full_text.clone();
    let rest = strip(&text, &CLAUSES, &mut skill);
    if CAST.is_match(&rest) {
        skill.cast = true;
    }
    skill.foundation = FOUNDATION.is_match(&rest);
    if let Some(caps) = APPRENTICE.captures(&rest) {
        if caps["plural"] == format!("{}s", &caps["rank"]) {
            skill.apprentice = Some(caps["rank"].to_owned());
        }
    }
    if !rest.is_empty() {
        skill.description = Some(rest);
    }
    Some(skill)
}

fn parse_depends(text: &str) -> Vec<SkillLevel> {
    split_list(text)
        .into_iter()
        .filter_map(|part| {
            let caps = SKILL_LEVEL.captures(part)?;
            Some(SkillLevel {
                skill: SkillRef::new(&caps["name"], &caps["abbr"]),
                level: number(&caps, "level")?,
            })
        })
        .collect()
}

fn parse_builds(text: &str) -> Vec<BuildOption> {
    split_at_group(text, &BUILD_SEPARATOR, "sep")
        .into_iter()
        .filter_map(|part| {
            let caps = BUILD_OPTION.captures(part)?;
            Some(BuildOption {
                name: caps["name"].to_owned(),
                cost: number(&caps, "cost")?,
                items: caps["items"].split(" or ").filter_map(parse_item_ref).collect(),
            })
        })
        .collect()
}

fn apply_magic_product(caps: &Captures<'_>, skill: &mut SkillDef) {
    let percent = match (number(caps, "percent"), number(caps, "times")) {
        (Some(percent), _) => percent,
        (None, Some(times)) => times * 100,
        (None, None) => 100,
    };
    let inputs = caps
        .name("inputs")
        .map(|m| split_list(m.as_str()).into_iter().filter_map(parse_item_stack).collect())
        .unwrap_or_default();
    // Clauses are cut from the end, so earlier products arrive later.
    skill.magic_production.insert(
        0,
        MagicProduct {
            item: ItemRef::new(caps["name"].trim(), &caps["abbr"]),
            percent,
            inputs,
        },
    );
    skill.cast = true;
}

fn parse_production(command: &str, text: &str) -> Production {
    if command == "PRODUCE" {
        let items = split_at_group(text, &PRODUCT_SEPARATOR, "sep")
            .into_iter()
            .filter_map(|part| {
                let caps = PRODUCE.captures(part)?;
                Some(Product {
                    item: ItemRef::new(&caps["name"], &caps["abbr"]),
                    skill_scaled: present(&caps, "scaled"),
                    any_input: present(&caps, "any"),
                    inputs: caps
                        .name("inputs")
                        .map(|m| parse_inputs(m.as_str(), present(&caps, "any")))
                        .unwrap_or_default(),
                    output: number(&caps, "output"),
                    months: number(&caps, "months").unwrap_or(1),
                })
            })
            .collect();
        return Production {
            command: ProductionCommand::Produce,
            items,
        };
    }

    let items = split_at_group(text, &SHIP_SEPARATOR, "sep")
        .into_iter()
        .filter_map(|part| {
            let caps = BUILD.captures(part)?;
            let inputs = parse_inputs(&caps["inputs"], present(&caps, "any"));
            // A ship takes one man-month per unit of material.
            let months = inputs
                .last()
                .and_then(|stack| stack.amount.count())
                .unwrap_or(1);
            Some(Product {
                item: ItemRef::new(&caps["name"], &caps["abbr"]),
                skill_scaled: present(&caps, "scaled"),
                any_input: present(&caps, "any"),
                inputs,
                output: None,
                months,
            })
        })
        .collect();
    Production {
        command: ProductionCommand::Build,
        items,
    }
}

/// Reads `1 iron [IRON] and 2 wood [WOOD]`, or `1 wood [WOOD] or 1 yew
/// [YEW]` when any one input will do.
fn parse_inputs(text: &str, any: bool) -> Vec<ItemStack> {
    let parts = if any {
        split_alternatives(text)
    } else {
        split_list(text)
    };
    parts.into_iter().filter_map(parse_item_stack).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::ItemStack;

    #[test]
    fn header_only() {
        let skill = parse_skill("combat [COMB] 1: This skill gives the unit a bonus in hand to hand combat.")
            .unwrap();
        assert_eq!(skill.name, "combat");
        assert_eq!(skill.abbr, "COMB");
        assert_eq!(skill.level, 1);
        assert_eq!(
            skill.description.as_deref(),
            Some("This skill gives the unit a bonus in hand to hand combat.")
        );
        assert!(parse_skill("not a skill").is_none());
    }

    #[test]
    fn no_report() {
        let skill = parse_skill("force [FORC] 5: No skill report.").unwrap();
        assert!(skill.no_report);
        assert_eq!(skill.description, None);
    }

    #[test]
    fn flags_in_any_order() {
        let a = parse_skill(
            "magic [MAGI] 1: Something. This skill cannot be increased through experience. \
             This skill cannot be taught to other units.",
        )
        .unwrap();
        let b = parse_skill(
            "magic [MAGI] 1: Something. This skill cannot be taught to other units. \
             This skill cannot be increased through experience.",
        )
        .unwrap();
        for skill in [a, b] {
            assert!(skill.no_experience);
            assert!(skill.no_teach);
            assert_eq!(skill.description.as_deref(), Some("Something."));
        }
    }

    #[test]
    fn cost_and_prerequisites() {
        let skill = parse_skill(
            "fire [FIRE] 1: Throws fire. This skill requires force [FORC] 1 and pattern [PATT] 1 \
             to begin to study. This skill costs 100 silver per month of study.",
        )
        .unwrap();
        assert_eq!(skill.cost, Some(100));
        assert_eq!(
            skill.depends,
            vec![
                SkillLevel {
                    skill: SkillRef::new("force", "FORC"),
                    level: 1
                },
                SkillLevel {
                    skill: SkillRef::new("pattern", "PATT"),
                    level: 1
                },
            ]
        );
        assert_eq!(skill.description.as_deref(), Some("Throws fire."));
    }

    #[test]
    fn produce() {
        let skill = parse_skill(
            "weaponsmith [WEAP] 1: A unit with this skill may PRODUCE swords [SWOR] from 1 iron \
             [IRON] at a rate of 1 per man-month, and crossbows [XBOW] from any of 1 wood [WOOD] \
             or 1 yew [YEW] at a rate of 1 per 2 man-months.",
        )
        .unwrap();
        let production = skill.production.unwrap();
        assert_eq!(production.command, ProductionCommand::Produce);
        assert_eq!(production.items.len(), 2);
        let swords = &production.items[0];
        assert_eq!(swords.item, ItemRef::new("swords", "SWOR"));
        assert_eq!(swords.inputs, vec![ItemStack::new(1, "iron", "IRON")]);
        assert_eq!((swords.output, swords.months), (Some(1), 1));
        let crossbows = &production.items[1];
        assert!(crossbows.any_input);
        assert_eq!(crossbows.months, 2);
        assert_eq!(skill.description, None);
    }

    #[test]
    fn produce_scaled_without_inputs() {
        let skill = parse_skill(
            "farming [FARM] 1: A unit with this skill may PRODUCE a number of grain [GRAI] equal \
             to their skill level at a rate of 1 per man-month.",
        )
        .unwrap();
        let product = &skill.production.unwrap().items[0];
        assert!(product.skill_scaled);
        assert!(product.inputs.is_empty());
    }

    #[test]
    fn builds_structures() {
        let skill = parse_skill(
            "building [BUIL] 1: A unit with this skill may BUILD a Tower from 10 stone [STON], \
             a Fort from 40 stone [STON] or wood [WOOD] or an Inn from 25 wood [WOOD]",
        )
        .unwrap();
        let names: Vec<&str> = skill.builds.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["Tower", "Fort", "Inn"]);
        assert_eq!(skill.builds[1].cost, 40);
        assert_eq!(
            skill.builds[1].items,
            vec![ItemRef::new("stone", "STON"), ItemRef::new("wood", "WOOD")]
        );
    }

    #[test]
    fn builds_ships() {
        let skill = parse_skill(
            "shipbuilding [SHIP] 1: A unit with this skill may BUILD longboats [LONG] from 25 \
             wood [WOOD] and clippers [CLIP] from 50 wood [WOOD].",
        )
        .unwrap();
        let production = skill.production.unwrap();
        assert_eq!(production.command, ProductionCommand::Build);
        assert_eq!(production.items.len(), 2);
        assert_eq!(production.items[0].months, 25);
        assert_eq!(production.items[1].item, ItemRef::new("clippers", "CLIP"));
        assert_eq!(production.items[1].output, None);
    }

    #[test]
    fn magic_production_repeats() {
        let skill = parse_skill(
            "artifact lore [ARTL] 1: A mage with this skill may create their level in amulets of \
             protection [AMPR] via magic at a cost of 20 silver [SILV]. To use this spell, the \
             mage should CAST Artifact_Lore AMPR. A mage with this skill has a 20 percent times \
             their level chance to create a rune sword [RUNE] via magic. To use this spell, the \
             mage should CAST Artifact_Lore RUNE.",
        )
        .unwrap();
        assert!(skill.cast);
        assert_eq!(skill.magic_production.len(), 2);
        assert_eq!(skill.magic_production[0].item.abbr, "AMPR");
        assert_eq!(skill.magic_production[0].percent, 100);
        assert_eq!(
            skill.magic_production[0].inputs,
            vec![ItemStack::new(20, "silver", "SILV")]
        );
        assert_eq!(skill.magic_production[1].item.abbr, "RUNE");
        assert_eq!(skill.magic_production[1].percent, 20);
    }

    #[test]
    fn combat_spell() {
        let skill = parse_skill(
            "fire [FIRE] 1: A mage with this skill can cast a fireball in battle at a skill \
             level of 1. This ability does between 2 and 50 times the skill level of the mage \
             energy attacks. In order to use this spell in combat, the mage should use the \
             COMBAT order to set it as his combat spell.",
        )
        .unwrap();
        let combat = skill.combat.unwrap();
        assert!(combat.text.starts_with("a fireball in battle"));
        assert_eq!(combat.special.name.as_deref(), Some("a fireball"));
        assert_eq!(combat.special.damage.len(), 1);
    }

    #[test]
    fn discovers_and_mage_ranks() {
        let skill = parse_skill(
            "mining [MINI] 3: A unit with this skill is able to determine if a region contains \
             mithril [MITH] and admantium [ADMA].",
        )
        .unwrap();
        assert_eq!(skill.discovers, ["mithril [MITH]", "admantium [ADMA]"]);

        let skill = parse_skill(
            "manipulation [MANI] 1: A unit with this skill becomes an apprentice. While \
             apprentices cannot cast spells directly, they can use magic items.",
        )
        .unwrap();
        assert_eq!(skill.apprentice.as_deref(), Some("apprentice"));

        let skill = parse_skill(
            "force [FORC] 1: The Force skill is not directly useful to a mage, but is rather one \
             of the Foundation skills on which other magical skills are based.",
        )
        .unwrap();
        assert!(skill.foundation);
        assert!(!skill.cast);
    }
}
