//! A whole faction report through the parser.

use atlantis_foundation::{Attitude, Direction};
use atlantis_report::{
    DeclaredAttitudes, GuardMode, MarketSide, ReportEvent, ReportLog, ReportParser, ReportReader,
    Section, UnitAttitude,
};

const REPORT: &str = "Atlantis Report For:
Mathoyoh (3) (War 2, Trade 1, Magic 2)
July, Year 2

Atlantis Engine Version: 5.1.0
Havilah, Version: 1.0.0

Errors during turn:
Lumb (679): MOVE: Can't move that way.

Battles during turn:
SQ Decec A - Ridi (512) attacks City Guard (65) in plain (18,38) in Decec!
Attackers:
Peasants (127).
Round 1:

Events during turn:
Lumb (679): Produces 3 wood [WOOD] in forest (13,41) in Bidswaul.

Skill reports:

lumberjack [LUMB] 1: A unit with this skill may PRODUCE wood [WOOD]
  from nothing at a rate of 1 per man-month.

Declared Attitudes (default Neutral):
Unfriendly : Creatures (2).
Unclaimed silver: 4000.

forest (13,41) in Bidswaul, contains Rhynn [village], 1248 peasants
  (wood elves), $624.
------------------------------------------------------------
  The weather was clear last month; it will be clear next month.
  Wages: $12.5 (Max: $312).
  Wanted: 116 grain [GRAI] at $18, 121 livestock [LIVE] at $20.
  For Sale: 49 wood elves [WELF] at $52, 9 leaders [LEAD] at $104.
  Entertainment available: $31.
  Products: 21 wood [WOOD], 11 horses [HORS].

Exits:
  North : plain (13,39) in Bidswaul.
  Southeast : plain (14,42) in Bidswaul, contains Tes [town].

* Lumb (679), Mathoyoh (3), avoiding, behind, revealing faction, 5
  wood elves [WELF], 2 swords [SWOR]. Weight: 60. Capacity: 0/0/75/0.
  Skills: lumberjack [LUMB] 1 (30).

+ Tower [101] : Tower, needs 10.
  - Guard (22), on guard, 10 wolves [WOLF].

Orders Template (Long Format):

#atlantis 3
unit 679
tax
";

fn parse() -> (bool, ReportParser<ReportLog>, Vec<String>) {
    let mut parser = ReportParser::new(ReportLog::new());
    let mut reader = ReportReader::new(REPORT.as_bytes());
    let template = parser.parse(&mut reader).unwrap();
    let rest = reader.map(Result::unwrap).collect();
    (template, parser, rest)
}

#[test]
fn event_sequence() {
    let (template, parser, _) = parse();
    assert!(template);
    assert_eq!(parser.section(), Section::OrdersTemplate);
    let names: Vec<&str> = parser
        .consumer()
        .events()
        .iter()
        .map(ReportEvent::name)
        .collect();
    assert_eq!(
        names,
        vec![
            "faction",
            "faction_date",
            "atlantis_version",
            "atlantis_rules",
            "faction_event",
            "battle",
            "battle_side",
            "battle_side_unit",
            "battle_round",
            "faction_event",
            "skill",
            "faction_attitudes",
            "faction_attitudes",
            "faction_unclaimed",
            "region",
            "region_weather",
            "region_wages",
            "region_market",
            "region_market",
            "region_entertainment",
            "region_products",
            "region_exit",
            "region_exit",
            "region_unit",
            "region_structure",
            "region_unit",
        ]
    );
}

#[test]
fn template_is_left_for_the_orders_parser() {
    let (_, _, rest) = parse();
    assert_eq!(rest, vec!["", "#atlantis 3", "unit 679", "tax"]);
}

#[test]
fn event_contents() {
    let (_, parser, _) = parse();
    let events = parser.consumer().events();

    let ReportEvent::Faction(faction) = &events[0] else {
        panic!("expected the faction header");
    };
    assert_eq!(faction.num, 3);
    assert_eq!(faction.types.get("war"), Some(&2));

    let ReportEvent::Skill(skill) = &events[10] else {
        panic!("expected a skill");
    };
    assert_eq!(skill.abbr, "LUMB");
    assert_eq!(skill.level, 1);

    assert_eq!(
        events[11],
        ReportEvent::FactionAttitudes(DeclaredAttitudes::Default(Attitude::Neutral))
    );
    assert_eq!(events[13], ReportEvent::FactionUnclaimed { silver: 4000 });

    let ReportEvent::RegionMarket(wanted) = &events[17] else {
        panic!("expected a market");
    };
    assert_eq!(wanted.side, MarketSide::Sell);
    let ReportEvent::RegionMarket(for_sale) = &events[18] else {
        panic!("expected a market");
    };
    assert_eq!(for_sale.side, MarketSide::Buy);

    let ReportEvent::RegionExit(north) = &events[21] else {
        panic!("expected an exit");
    };
    assert_eq!(north.direction, Direction::North);

    let ReportEvent::RegionUnit(lumb) = &events[23] else {
        panic!("expected a unit");
    };
    assert_eq!(lumb.attitude, UnitAttitude::Own);
    assert_eq!(lumb.guard, Some(GuardMode::Avoid));
    assert_eq!(lumb.skills.len(), 1);
    assert!(!lumb.in_structure);

    let ReportEvent::RegionUnit(guard) = &events[25] else {
        panic!("expected a unit");
    };
    assert!(guard.in_structure);
    assert_eq!(guard.guard, Some(GuardMode::Guard));
}

#[test]
fn raw_lines_come_first() {
    let mut parser = ReportParser::new(ReportLog::with_lines());
    let mut reader = ReportReader::new(REPORT.as_bytes());
    parser.parse(&mut reader).unwrap();
    let events = parser.consumer().events();
    assert_eq!(
        events[0],
        ReportEvent::Line {
            line: "Atlantis Report For:".into()
        }
    );
    assert_eq!(events[1].name(), "line");
    assert_eq!(events[2].name(), "faction");
}
