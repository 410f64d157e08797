//! A report's orders template handed to the orders parser.

use atlantis::orders::{Order, OrderLog, OrdersParser};
use atlantis::report::{ReportEvent, ReportLog, ReportParser, ReportReader};
use atlantis::runtime::{RuntimeConfig, Session};

const REPORT: &str = "Atlantis Report For:
Mathoyoh (3) (Normal)
July, Year 2

Declared Attitudes (default Neutral):
Unclaimed silver: 10.

forest (13,41) in Bidswaul.
------------------------------------------------------------
  Products: 21 wood [WOOD].

* Lumb (679), Mathoyoh (3), 5 wood elves [WELF].

Orders Template (Long Format):

#atlantis 3

unit 679
;Lumb (679), Mathoyoh (3), 5 wood elves [WELF].
@work
study
#end
";

#[test]
fn report_then_orders_by_hand() {
    let mut report = ReportParser::new(ReportLog::new());
    let mut reader = ReportReader::new(REPORT.as_bytes());
    assert!(report.parse(&mut reader).unwrap());
    assert!(matches!(
        report.consumer().last(),
        Some(ReportEvent::RegionUnit(_))
    ));

    let mut orders = OrdersParser::new(OrderLog::new());
    let mut failures = Vec::new();
    for line in reader {
        if let Err(e) = orders.parse_line(&line.unwrap()) {
            failures.push(e);
        }
    }
    let recorded: Vec<&Order> = orders.consumer().orders().collect();
    assert_eq!(recorded.len(), 5);
    assert_eq!(recorded[1], &Order::Unit { unit: 679 });
    assert!(matches!(recorded[2], Order::Comment { permanent: false, .. }));
    assert_eq!(recorded[3], &Order::Work);
    assert_eq!(failures.len(), 1);
    assert_eq!(format!("{}", failures[0]), "study: missing skill");
}

#[test]
fn session_runs_both_parsers() {
    let mut session = Session::new(RuntimeConfig::default());
    session
        .parse_report("report.txt", REPORT.as_bytes(), true)
        .unwrap();
    assert_eq!(session.report().len(), 7);
    assert_eq!(session.orders().len(), 5);
    assert!(session.orders()[3].meta.permanent);
    assert_eq!(session.errors().len(), 1);
    assert_eq!(session.errors()[0].context.as_ref().unwrap().line, Some(7));
}

#[test]
fn strict_session_aborts_in_the_template() {
    let mut session = Session::new(RuntimeConfig::default().with_strict(true));
    let err = session
        .parse_report("report.txt", REPORT.as_bytes(), true)
        .unwrap_err();
    assert!(err.is_fatal());
    assert_eq!(session.report().len(), 7);
    assert_eq!(session.orders().len(), 4);
}
