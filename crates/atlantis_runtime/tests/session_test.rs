//! Sessions over files on disk.

use std::fs;
use std::path::PathBuf;

use atlantis_runtime::render::render_session;
use atlantis_runtime::{OutputFormat, RuntimeConfig, Session};

/// Writes `text` to a file unique to this test.
fn fixture(name: &str, text: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("atlantis-runtime-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn orders_file_round_trip_to_json() {
    let path = fixture(
        "orders.txt",
        "#atlantis 3\n\
         unit 679\n\
         @tax ;keep taxing\n\
         move n ne in\n\
         #end\n",
    );
    let mut session = Session::new(RuntimeConfig::default().with_output(OutputFormat::Json));
    session.load_orders(&path).unwrap();
    assert!(session.errors().is_empty());

    let json = render_session(&session, session.config().output).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let orders = value.as_array().unwrap();
    assert_eq!(orders.len(), 5);
    assert_eq!(orders[2]["meta"]["permanent"], serde_json::Value::Bool(true));
}

#[test]
fn report_file_with_template() {
    let path = fixture(
        "report.txt",
        "Atlantis Report For:\n\
         Mathoyoh (3) (War 2, Trade 1, Magic 2)\n\
         \n\
         Orders Template (Long Format):\n\
         \n\
         #atlantis 3\n\
         unit 679\n\
         claim 0\n\
         #end\n",
    );
    let mut session = Session::default();
    session.load_report(&path, true).unwrap();
    assert_eq!(session.report().len(), 1);
    assert_eq!(session.orders().len(), 3);
    assert_eq!(session.errors().len(), 1);
    let context = session.errors()[0].context.as_ref().unwrap();
    assert!(context.source.as_deref().unwrap().ends_with("report.txt"));
    assert_eq!(context.line, Some(4));
}
