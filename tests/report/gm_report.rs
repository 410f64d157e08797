//! The game master report catalogue.

use atlantis_report::{ReportEvent, ReportLog, ReportParser, ReportReader, Section, StructureKind};

const GM_REPORT: &str = "Skill reports:

lumberjack [LUMB] 1: A unit with this skill may PRODUCE wood [WOOD]
  from nothing at a rate of 1 per man-month.

Item reports:

wood [WOOD], weight 5. This item is a trade resource.

Object reports:

Tower: This is a building. Units may enter this structure. This
  structure provides defense to the first 10 men inside it.

forest (13,41) in Bidswaul.
------------------------------------------------------------
  Products: 21 wood [WOOD].
";

#[test]
fn catalogue_sections() {
    let mut parser = ReportParser::new(ReportLog::new());
    let mut reader = ReportReader::new(GM_REPORT.as_bytes());
    assert!(!parser.parse(&mut reader).unwrap());
    assert_eq!(parser.section(), Section::GmRegions);

    let events = parser.consumer().events();
    let names: Vec<&str> = events.iter().map(ReportEvent::name).collect();
    assert_eq!(
        names,
        vec!["skill", "item", "structure", "region", "region_products"]
    );

    let ReportEvent::Item(wood) = &events[1] else {
        panic!("expected an item");
    };
    assert!(wood.resource);
    assert_eq!(wood.weight, Some(5));

    let ReportEvent::Structure(tower) = &events[2] else {
        panic!("expected a structure");
    };
    assert_eq!(tower.kind, StructureKind::Building);
    assert_eq!(tower.protect, Some(10));
}
