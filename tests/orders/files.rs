//! Whole orders files through the dispatcher.

use atlantis_foundation::{Attitude, Direction, ErrorKind};
use atlantis_orders::{
    Amount, DeclareTarget, DirectionWord, Directions, GameOption, GiveWhat, MoveStep, NameTarget,
    Order, OrderLog, OrdersParser, TemplateFormat, Transfer, UnitRef,
};

const ORDERS: &str = "\
#atlantis 3 \"secret\"
; first turn
unit 679
@tax
study COMB 2
give new 1 all unfinished wood except 13 ;keep a few
move n NE in 12
declare 7 ally
name city \"Port {Bell}\"
option template long
form 1
  name unit Scouts
  @work
end
#end
";

fn parse(text: &str) -> OrderLog {
    let mut parser = OrdersParser::new(OrderLog::new());
    parser.parse(text.as_bytes()).unwrap();
    parser.into_consumer()
}

#[test]
fn a_full_orders_file() {
    let log = parse(ORDERS);
    let orders: Vec<&Order> = log.orders().collect();
    assert_eq!(orders.len(), 15);
    assert_eq!(
        orders[0],
        &Order::Atlantis {
            faction: 3,
            password: Some("secret".into())
        }
    );
    assert_eq!(
        orders[1],
        &Order::Comment {
            permanent: false,
            comment: " first turn".into()
        }
    );
    assert_eq!(
        orders[4],
        &Order::Study {
            skill: "comb".into(),
            level: Some(2)
        }
    );
    assert_eq!(
        orders[5],
        &Order::Give {
            target: UnitRef::New { alias: 1 },
            what: GiveWhat::Items(Transfer {
                amount: Amount::All,
                item: "wood".into(),
                unfinished: true,
                except: Some(13),
            }),
        }
    );
    assert_eq!(
        orders[6],
        &Order::Move {
            steps: vec![
                MoveStep::Direction(Direction::North),
                MoveStep::Direction(Direction::Northeast),
                MoveStep::In,
                MoveStep::Structure(12),
            ]
        }
    );
    assert_eq!(
        orders[7],
        &Order::Declare {
            faction: DeclareTarget::Faction(7),
            attitude: Some(Attitude::Ally)
        }
    );
    assert_eq!(
        orders[8],
        &Order::Name {
            target: NameTarget::City("Port {Bell}".into())
        }
    );
    assert_eq!(
        orders[9],
        &Order::Option {
            option: GameOption::Template(TemplateFormat::Long)
        }
    );
    assert_eq!(orders[14], &Order::AtlantisEnd);
}

#[test]
fn metadata_is_kept() {
    let log = parse(ORDERS);
    let entries = log.entries();
    assert!(entries[3].meta.permanent);
    assert_eq!(entries[5].meta.comment.as_deref(), Some("keep a few"));
    assert!(entries[12].meta.permanent);
    assert_eq!(entries[12].order, Order::Work);
}

#[test]
fn parse_stops_at_the_first_bad_line() {
    let mut parser = OrdersParser::new(OrderLog::new());
    let err = parser
        .parse("unit 1\nbuy 0 horse\ntax\n".as_bytes())
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Syntax { .. }));
    assert_eq!(format!("{err}"), "buy 0 horse: missing amount");
    assert_eq!(parser.consumer().len(), 1);
}

#[test]
fn themed_directions() {
    let directions = Directions::empty()
        .with_word(DirectionWord::new("u", "up", MoveStep::Direction(Direction::North)))
        .with_word(DirectionWord::new("d", "down", MoveStep::Direction(Direction::South)));
    let mut parser = OrdersParser::with_directions(OrderLog::new(), directions);
    parser.parse_line("move up d").unwrap();
    assert_eq!(
        parser.consumer().last().unwrap().order,
        Order::Move {
            steps: vec![
                MoveStep::Direction(Direction::North),
                MoveStep::Direction(Direction::South),
            ]
        }
    );
    let err = parser.parse_line("move n").unwrap_err();
    assert_eq!(format!("{err}"), "move n: invalid direction");
}

#[test]
fn every_recorded_keyword_is_known() {
    let log = parse(ORDERS);
    for order in log.orders() {
        let keyword = order.keyword();
        assert!(keyword.is_empty() || atlantis_orders::KEYWORDS.contains(&keyword));
    }
}
