//! Rendering sessions as text and JSON.

use atlantis::runtime::render::{render_report, render_session};
use atlantis::runtime::{OutputFormat, Session};

const REPORT: &str = "Atlantis Report For:
Mathoyoh (3) (War 2, Trade 1, Magic 2)

Declared Attitudes (default Neutral):
Unclaimed silver: 10.

forest (13,41) in Bidswaul, contains Rhynn [village], 1248 peasants
  (wood elves), $624.
";

#[test]
fn report_json_uses_snake_case_tags() {
    let mut session = Session::default();
    session
        .parse_report("report.txt", REPORT.as_bytes(), false)
        .unwrap();
    let json = render_report(session.report(), OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let events = value.as_array().unwrap();
    assert_eq!(events.len(), 4);
    assert_eq!(events[0]["faction"]["name"], "Mathoyoh");
    assert_eq!(events[2]["faction_unclaimed"]["silver"], 10);
    assert_eq!(events[3]["region"]["location"]["x"], 13);
}

#[test]
fn text_output_is_one_event_per_line() {
    let mut session = Session::default();
    session
        .parse_report("report.txt", REPORT.as_bytes(), false)
        .unwrap();
    let text = render_session(&session, OutputFormat::Text).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("Faction("));
    assert!(lines[3].starts_with("Region("));
}
