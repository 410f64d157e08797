//! Line unwrapper tests.

use std::io;

use atlantis_report::ReportReader;
use proptest::prelude::*;

fn unwrap(text: &str) -> Vec<String> {
    ReportReader::new(text.as_bytes())
        .collect::<io::Result<Vec<_>>>()
        .unwrap()
}

#[test]
fn nested_continuations() {
    assert_eq!(
        unwrap(
            "forest (13,41) in Bidswaul, contains Rhynn [village], 1248 peasants\n  \
             (wood elves), $624.\n\
             ------------------------------------------------------------\n  \
             Wages: $12.5\n    (Max: $312).\n"
        ),
        vec![
            "forest (13,41) in Bidswaul, contains Rhynn [village], 1248 peasants (wood elves), $624.",
            "------------------------------------------------------------",
            "  Wages: $12.5 (Max: $312).",
        ]
    );
}

#[test]
fn units_inside_objects_stay_apart() {
    assert_eq!(
        unwrap("+ Tower [101] : Tower.\n  - Guard (22), on guard, 10\n    wolves [WOLF].\n"),
        vec!["+ Tower [101] : Tower.", "  - Guard (22), on guard, 10 wolves [WOLF]."]
    );
}

#[test]
fn template_is_verbatim() {
    let mut reader = ReportReader::new(
        "Orders Template (Short Format):\n\n#atlantis 3\n  unit 5\n    tax\n".as_bytes(),
    );
    let lines: Vec<String> = reader.by_ref().map(Result::unwrap).collect();
    assert!(reader.in_template());
    assert_eq!(
        lines,
        vec!["Orders Template (Short Format):", "", "#atlantis 3", "  unit 5", "    tax"]
    );
}

fn sentence() -> impl Strategy<Value = String> {
    "[a-z]{1,8}( [a-z]{1,8}){0,4}"
}

/// Appends `head` at `depth` spaces, wrapped onto `tails` one level deeper.
fn wrapped(text: &mut String, depth: usize, head: &str, tails: &[String]) {
    text.push_str(&format!("{:depth$}{head}\n", ""));
    for tail in tails {
        text.push_str(&format!("{:width$}{tail}\n", "", width = depth + 2));
    }
}

/// An object line followed by the units inside it, with the number of
/// logical lines it unwraps to.
fn object_block() -> impl Strategy<Value = (String, usize)> {
    let unit = (
        prop::sample::select(vec!['-', '*', '=', ':', '%', '!']),
        sentence(),
        prop::collection::vec(sentence(), 0..3),
    );
    (
        sentence(),
        prop::collection::vec(sentence(), 0..2),
        prop::collection::vec(unit, 1..4),
    )
        .prop_map(|(name, tails, units)| {
            let mut text = String::new();
            wrapped(&mut text, 0, &format!("+ {name}"), &tails);
            for (marker, body, unit_tails) in &units {
                wrapped(&mut text, 2, &format!("{marker} {body}"), unit_tails);
            }
            (text, 1 + units.len())
        })
}

/// A region header, a separator and the indented region lines.
fn region_block() -> impl Strategy<Value = (String, usize)> {
    (
        sentence(),
        prop::collection::vec(sentence(), 0..2),
        prop::collection::vec((sentence(), prop::collection::vec(sentence(), 0..2)), 0..4),
    )
        .prop_map(|(header, tails, lines)| {
            let mut text = String::new();
            wrapped(&mut text, 0, &header, &tails);
            text.push_str("------------\n");
            for (line, line_tails) in &lines {
                wrapped(&mut text, 2, line, line_tails);
            }
            (text, 2 + lines.len())
        })
}

proptest! {
    #[test]
    fn flat_lines_pass_through(lines in prop::collection::vec(sentence(), 0..10)) {
        let text = lines.iter().map(|l| format!("{l}\n")).collect::<String>();
        prop_assert_eq!(unwrap(&text), lines);
    }

    #[test]
    fn continuations_join_with_one_space(head in sentence(), tails in prop::collection::vec(sentence(), 1..4)) {
        let mut text = format!("{head}   \n");
        for tail in &tails {
            text.push_str(&format!("  {tail}\n"));
        }
        let expected = format!("{head} {}", tails.join(" "));
        prop_assert_eq!(unwrap(&text), vec![expected]);
    }

    #[test]
    fn unwrapping_twice_changes_nothing(
        blocks in prop::collection::vec(prop_oneof![object_block(), region_block()], 1..5)
    ) {
        let text: String = blocks.iter().map(|(block, _)| block.as_str()).collect();
        let once = unwrap(&text);
        prop_assert_eq!(once.len(), blocks.iter().map(|(_, lines)| lines).sum::<usize>());
        prop_assert_eq!(unwrap(&once.join("\n")), once);
    }
}
