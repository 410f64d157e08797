//! The orders dispatcher.
//!
//! [`OrdersParser`] tokenizes each line, recognizes the order keyword,
//! validates its arguments, and calls the matching [`OrderConsumer`] method.

use std::collections::BTreeMap;
use std::io::BufRead;

use atlantis_foundation::{Attitude, Error, Result};
use tracing::{debug, trace};

use crate::consumer::OrderConsumer;
use crate::order::{
    Amount, BuildTarget, Consuming, DeclareTarget, DescribeTarget, ExchangeSide, FindTarget,
    GameOption, GiveWhat, JoinMode, MoveStep, NameTarget, OrderMeta, RevealMode, ShowTarget,
    Spoils, TemplateFormat, Transfer, UnitRef,
};
use crate::tokenizer::{TokenStream, flag, legal_name, value};
use crate::vocabulary::Directions;

/// Why a line was rejected, before the line text is attached.
enum Failure {
    Syntax(&'static str),
    Deprecated(&'static str),
}

impl From<&'static str> for Failure {
    fn from(message: &'static str) -> Self {
        Self::Syntax(message)
    }
}

type Step<T> = std::result::Result<T, Failure>;

/// Parses orders files and orders templates.
pub struct OrdersParser<C: OrderConsumer> {
    consumer: C,
    directions: Directions,
}

impl<C: OrderConsumer> OrdersParser<C> {
    /// Creates a parser using the standard direction names.
    pub fn new(consumer: C) -> Self {
        Self::with_directions(consumer, Directions::default())
    }

    /// Creates a parser with a themed direction vocabulary.
    pub fn with_directions(consumer: C, directions: Directions) -> Self {
        Self {
            consumer,
            directions,
        }
    }

    /// Returns a reference to the consumer.
    pub const fn consumer(&self) -> &C {
        &self.consumer
    }

    /// Returns a mutable reference to the consumer.
    pub fn consumer_mut(&mut self) -> &mut C {
        &mut self.consumer
    }

    /// Consumes the parser, returning its consumer.
    pub fn into_consumer(self) -> C {
        self.consumer
    }

    /// Parses every line of `reader`.
    ///
    /// # Errors
    ///
    /// Stops at the first line that fails to parse or read. Use
    /// [`parse_line`](Self::parse_line) directly to skip bad lines.
    pub fn parse<R: BufRead>(&mut self, reader: R) -> Result<()> {
        for line in reader.lines() {
            self.parse_line(&line?)?;
        }
        Ok(())
    }

    /// Parses one orders line.
    ///
    /// Blank lines are ignored and lines holding only a comment are passed
    /// to [`OrderConsumer::comment`]. Unknown keywords are skipped.
    ///
    /// # Errors
    ///
    /// Returns a syntax error naming the line when an argument is missing
    /// or malformed. `ATTACK`, `EVICT` and `TEACH` deliver the targets read
    /// before the bad one first. `NOSPOILS` delivers its translated
    /// `SPOILS` order and then returns a deprecation error.
    pub fn parse_line(&mut self, line: &str) -> Result<()> {
        let mut tokens = TokenStream::tokenize(line)?;
        let meta = OrderMeta::new(tokens.permanent, tokens.comment.take());

        let Some(keyword) = tokens.next_lower() else {
            if let Some(comment) = meta.comment.filter(|c| !c.is_empty()) {
                self.consumer.comment(meta.permanent, comment);
            }
            return Ok(());
        };

        trace!(keyword = %keyword, "dispatching order");
        self.dispatch(&keyword, &mut tokens, meta)
            .map_err(|failure| match failure {
                Failure::Syntax(message) => Error::syntax(line, message),
                Failure::Deprecated(message) => Error::deprecated(line, message),
            })
    }

    #[allow(clippy::too_many_lines)]
    fn dispatch(&mut self, keyword: &str, tokens: &mut TokenStream, meta: OrderMeta) -> Step<()> {
        let c = &mut self.consumer;
        match keyword {
            "#atlantis" => {
                let faction = value(&tokens.next_token().ok_or("missing faction")?);
                c.atlantis(faction, tokens.next_token());
            }
            "#end" => c.atlantis_end(),
            "unit" => {
                let unit = value(&tokens.next_token().ok_or("missing unit")?);
                if unit == 0 {
                    return Err("invalid unit".into());
                }
                c.unit(unit);
            }
            "form" => {
                let alias = value(&tokens.next_token().ok_or("missing alias")?);
                if alias == 0 {
                    return Err("invalid alias".into());
                }
                c.order_form(alias, meta);
            }
            "end" => c.order_end(),
            "turn" => c.order_turn(meta),
            "endturn" => c.order_endturn(),
            "address" => {
                let address = tokens.next_token().ok_or("missing address")?;
                c.order_address(address, meta);
            }
            "advance" => {
                c.order_advance(route(&self.directions, tokens, true)?, meta);
            }
            "move" => {
                c.order_move(route(&self.directions, tokens, true)?, meta);
            }
            "sail" => {
                c.order_sail(route(&self.directions, tokens, false)?, meta);
            }
            "assassinate" => c.order_assassinate(unit_ref(tokens, false)?, meta),
            "promote" => c.order_promote(unit_ref(tokens, false)?, meta),
            "attack" => {
                let (targets, failure) = unit_list(tokens);
                c.order_attack(targets, meta);
                if let Some(message) = failure {
                    return Err(message.into());
                }
            }
            "evict" => {
                let (targets, failure) = unit_list(tokens);
                c.order_evict(targets, meta);
                if let Some(message) = failure {
                    return Err(message.into());
                }
            }
            "teach" => {
                if tokens.is_empty() {
                    return Err("missing target".into());
                }
                let (targets, failure) = unit_list(tokens);
                c.order_teach(targets, meta);
                if let Some(message) = failure {
                    return Err(message.into());
                }
            }
            "autotax" => c.order_autotax(flag_arg(tokens, "missing value")?, meta),
            "avoid" => c.order_avoid(flag_arg(tokens, "missing value")?, meta),
            "behind" => c.order_behind(flag_arg(tokens, "missing value")?, meta),
            "guard" => c.order_guard(flag_arg(tokens, "invalid value")?, meta),
            "hold" => c.order_hold(flag_arg(tokens, "invalid value")?, meta),
            "noaid" => c.order_noaid(flag_arg(tokens, "invalid value")?, meta),
            "nocross" => c.order_nocross(flag_arg(tokens, "invalid value")?, meta),
            "share" => c.order_share(flag_arg(tokens, "invalid value")?, meta),
            "idle" => c.order_idle(meta),
            "destroy" => c.order_destroy(meta),
            "entertain" => c.order_entertain(meta),
            "leave" => c.order_leave(meta),
            "pillage" => c.order_pillage(meta),
            "tax" => c.order_tax(meta),
            "work" => c.order_work(meta),
            "build" => {
                let target = match tokens.next_lower() {
                    None => BuildTarget::Resume,
                    Some(tok) if tok == "help" => BuildTarget::Help(unit_ref(tokens, false)?),
                    Some(structure) => BuildTarget::New(structure),
                };
                c.order_build(target, meta);
            }
            "buy" => {
                let (amount, item) = trade(tokens)?;
                c.order_buy(amount, item, meta);
            }
            "sell" => {
                let (amount, item) = trade(tokens)?;
                c.order_sell(amount, item, meta);
            }
            "cast" => {
                let skill = tokens.next_lower().ok_or("missing skill")?;
                c.order_cast(skill, tokens.drain_lower(), meta);
            }
            "claim" => {
                let amount = value(&tokens.next_token().ok_or("missing amount")?);
                if amount == 0 {
                    return Err("missing amount".into());
                }
                c.order_claim(amount, meta);
            }
            "combat" => c.order_combat(tokens.next_lower(), meta),
            "consume" => {
                let consuming = match tokens.next_lower().as_deref() {
                    None | Some("none") => None,
                    Some("unit") => Some(Consuming::Unit),
                    Some("faction") => Some(Consuming::Faction),
                    Some(_) => return Err("invalid value".into()),
                };
                c.order_consume(consuming, meta);
            }
            "declare" => {
                let (faction, attitude) = declare(tokens)?;
                c.order_declare(faction, attitude, meta);
            }
            "describe" => {
                let target = tokens.next_lower().ok_or("missing target")?;
                let description = tokens.next_token();
                let target = match target.as_str() {
                    "unit" => DescribeTarget::Unit(description),
                    "ship" | "building" | "object" | "structure" => {
                        DescribeTarget::Structure(description)
                    }
                    _ => return Err("invalid target".into()),
                };
                c.order_describe(target, meta);
            }
            "enter" => {
                let structure = value(&tokens.next_token().ok_or("missing structure")?);
                if structure == 0 {
                    return Err("invalid structure".into());
                }
                c.order_enter(structure, meta);
            }
            "exchange" => {
                let target = unit_ref(tokens, true)?;
                let give = exchange_side(tokens, "missing given amount", "missing given item")?;
                let expected =
                    exchange_side(tokens, "missing expected amount", "missing expected item")?;
                c.order_exchange(target, give, expected, meta);
            }
            "faction" => {
                if tokens.is_empty() {
                    return Err("missing faction type".into());
                }
                let mut points = BTreeMap::new();
                while let Some(kind) = tokens.next_lower() {
                    let amount = tokens.next_token().ok_or("invalid value")?;
                    points.insert(kind, value(&amount));
                }
                c.order_faction(points, meta);
            }
            "find" => {
                let tok = tokens.next_lower().ok_or("missing faction")?;
                let target = if tok == "all" {
                    FindTarget::All
                } else {
                    match value(&tok) {
                        0 => return Err("invalid faction".into()),
                        n => FindTarget::Faction(n),
                    }
                };
                c.order_find(target, meta);
            }
            "forget" => c.order_forget(tokens.next_lower().ok_or("missing skill")?, meta),
            "withdraw" => {
                let tok = tokens.next_lower().ok_or("missing amount")?;
                let (amount, item) = match value(&tok) {
                    0 => (1, tok),
                    n => (n, tokens.next_lower().ok_or("missing item")?),
                };
                c.order_withdraw(amount, item, meta);
            }
            "give" => {
                let target = unit_ref(tokens, false)?;
                let what = transfer(tokens, true)?;
                c.order_give(target, what, meta);
            }
            "transport" => {
                let target = unit_ref(tokens, false)?;
                let what = items_only(transfer(tokens, false)?)?;
                c.order_transport(target, what, meta);
            }
            "distribute" => {
                let target = unit_ref(tokens, false)?;
                let what = items_only(transfer(tokens, false)?)?;
                c.order_distribute(target, what, meta);
            }
            "take" => {
                if tokens.next_lower().as_deref() != Some("from") {
                    return Err("missing from".into());
                }
                let unit = value(&tokens.next_token().ok_or("missing unit")?);
                if unit == 0 {
                    return Err("invalid unit".into());
                }
                let what = items_only(transfer(tokens, false)?)?;
                c.order_takefrom(UnitRef::Number(unit), what, meta);
            }
            "join" => {
                let target = unit_ref(tokens, false)?;
                let mode = match tokens.next_lower().as_deref() {
                    Some("nooverload") => Some(JoinMode::NoOverload),
                    Some("merge") => Some(JoinMode::Merge),
                    _ => None,
                };
                c.order_join(target, mode, meta);
            }
            "name" => {
                if tokens.len() < 2 {
                    return Err("missing name".into());
                }
                let what = tokens.next_lower().ok_or("missing name")?;
                let name = tokens.next_token().ok_or("missing name")?;
                let target = match what.as_str() {
                    "faction" => NameTarget::Faction(name),
                    "unit" => NameTarget::Unit(name),
                    "building" | "ship" | "object" | "structure" => NameTarget::Structure(name),
                    "village" | "town" | "city" => match legal_name(&name) {
                        legal if legal.is_empty() => return Err("invalid argument".into()),
                        legal => NameTarget::City(legal),
                    },
                    _ => return Err("invalid argument".into()),
                };
                c.order_name(target, meta);
            }
            "nospoils" => {
                let spoils = if flag_arg(tokens, "invalid value")? {
                    Spoils::None
                } else {
                    Spoils::All
                };
                c.order_spoils(spoils, meta);
                return Err(Failure::Deprecated("deprecated. Use SPOILS instead"));
            }
            "option" => c.order_option(game_option(tokens)?, meta),
            "password" => {
                let password = tokens.next_token().unwrap_or_else(|| "none".to_string());
                c.order_password(password, meta);
            }
            "prepare" => c.order_prepare(tokens.next_lower(), meta),
            "weapon" => c.order_weapon(tokens.drain_lower(), meta),
            "armor" => c.order_armor(tokens.drain_lower(), meta),
            "produce" => {
                let first = tokens.next_lower().ok_or("missing item")?;
                match value(&first) {
                    0 => c.order_produce(None, first, meta),
                    target => {
                        let item = tokens.next_lower().ok_or("missing item")?;
                        c.order_produce(Some(target), item, meta);
                    }
                }
            }
            "quit" => c.order_quit(tokens.next_token(), meta),
            "restart" => c.order_restart(tokens.next_token(), meta),
            "reveal" => {
                let reveal = match tokens.next_lower().as_deref() {
                    None | Some("none") => None,
                    Some("unit") => Some(RevealMode::Unit),
                    Some("faction") => Some(RevealMode::Faction),
                    Some(_) => return Err("invalid value".into()),
                };
                c.order_reveal(reveal, meta);
            }
            "show" => {
                if tokens.len() < 2 {
                    return Err("missing target".into());
                }
                let what = tokens.next_lower().ok_or("missing target")?;
                let name = tokens.next_lower().ok_or("missing target")?;
                let target = match what.as_str() {
                    "skill" => ShowTarget::Skill(name),
                    "item" => ShowTarget::Item(name),
                    "object" => ShowTarget::Structure(name),
                    _ => return Err("invalid target".into()),
                };
                c.order_show(target, meta);
            }
            "spoils" => {
                let spoils = match tokens.next_lower().as_deref() {
                    None | Some("all") => Spoils::All,
                    Some("none") => Spoils::None,
                    Some("walk") => Spoils::Walk,
                    Some("fly") => Spoils::Fly,
                    Some("swim") => Spoils::Swim,
                    Some("sail") => Spoils::Sail,
                    Some(_) => return Err("invalid option".into()),
                };
                c.order_spoils(spoils, meta);
            }
            "steal" => {
                let target = unit_ref(tokens, false)?;
                let item = tokens.next_lower().ok_or("missing item")?;
                c.order_steal(target, item, meta);
            }
            "study" => {
                let skill = tokens.next_lower().ok_or("missing skill")?;
                let level = tokens.next_token().map(|t| value(&t));
                c.order_study(skill, level, meta);
            }
            other => debug!(keyword = other, "ignoring unknown order"),
        }
        Ok(())
    }
}

/// Reads a unit reference: `n`, `new a`, `faction f new a`, or `0` when
/// `allow_any` is set.
fn unit_ref(tokens: &mut TokenStream, allow_any: bool) -> std::result::Result<UnitRef, &'static str> {
    let tok = tokens.next_lower().ok_or("missing unit")?;
    match tok.as_str() {
        "0" if allow_any => Ok(UnitRef::Any),
        "0" => Err("malformed unit"),
        "faction" => {
            let (Some(faction), Some(new), Some(alias)) =
                (tokens.next_token(), tokens.next_lower(), tokens.next_token())
            else {
                return Err("malformed unit");
            };
            let (faction, alias) = (value(&faction), value(&alias));
            if faction == 0 || alias == 0 || new != "new" {
                return Err("malformed unit");
            }
            Ok(UnitRef::FactionNew { faction, alias })
        }
        "new" => match tokens.next_token().map(|t| value(&t)) {
            Some(alias) if alias > 0 => Ok(UnitRef::New { alias }),
            _ => Err("malformed unit"),
        },
        number => match value(number) {
            0 => Err("malformed unit"),
            n => Ok(UnitRef::Number(n)),
        },
    }
}

/// Reads unit references until the tokens run out, keeping the ones read
/// before a malformed reference.
fn unit_list(tokens: &mut TokenStream) -> (Vec<UnitRef>, Option<&'static str>) {
    let mut targets = Vec::new();
    while !tokens.is_empty() {
        match unit_ref(tokens, false) {
            Ok(target) => targets.push(target),
            Err(message) => return (targets, Some(message)),
        }
    }
    (targets, None)
}

fn route(
    directions: &Directions,
    tokens: &mut TokenStream,
    allow_enter: bool,
) -> std::result::Result<Vec<MoveStep>, &'static str> {
    let mut route = Vec::with_capacity(tokens.len());
    while let Some(word) = tokens.next_lower() {
        let step = match directions.lookup(&word, allow_enter) {
            Some(step) => step,
            None if allow_enter && value(&word) > 0 => MoveStep::Structure(value(&word)),
            None => return Err("invalid direction"),
        };
        route.push(step);
    }
    Ok(route)
}

fn flag_arg(tokens: &mut TokenStream, missing: &'static str) -> std::result::Result<bool, &'static str> {
    let tok = tokens.next_token().ok_or(missing)?;
    flag(&tok).ok_or("invalid value")
}

fn trade(tokens: &mut TokenStream) -> std::result::Result<(Amount, String), &'static str> {
    let tok = tokens.next_lower().ok_or("missing amount")?;
    let amount = if tok == "all" {
        Amount::All
    } else {
        match value(&tok) {
            0 => return Err("missing amount"),
            n => Amount::Count(n),
        }
    };
    let item = tokens.next_lower().ok_or("missing item")?;
    Ok((amount, item))
}

fn declare(
    tokens: &mut TokenStream,
) -> std::result::Result<(DeclareTarget, Option<Attitude>), &'static str> {
    let tok = tokens.next_lower().ok_or("missing faction")?;
    let faction = if tok == "default" {
        DeclareTarget::Default
    } else {
        match value(&tok) {
            0 => return Err("missing faction"),
            n => DeclareTarget::Faction(n),
        }
    };
    let attitude = match tokens.next_token() {
        None => None,
        Some(word) => Some(Attitude::from_name(&word).ok_or("invalid attitude")?),
    };
    Ok((faction, attitude))
}

fn exchange_side(
    tokens: &mut TokenStream,
    missing_amount: &'static str,
    missing_item: &'static str,
) -> std::result::Result<ExchangeSide, &'static str> {
    let amount = value(&tokens.next_token().ok_or(missing_amount)?);
    let item = tokens.next_lower().ok_or(missing_item)?;
    Ok(ExchangeSide { amount, item })
}

/// Reads `amount [unfinished] item [except n]`, or `unit` when
/// `allow_unit` is set.
fn transfer(tokens: &mut TokenStream, allow_unit: bool) -> std::result::Result<GiveWhat, &'static str> {
    let tok = tokens.next_lower().ok_or("missing amount")?;
    if allow_unit && tok == "unit" {
        return Ok(GiveWhat::Unit);
    }
    let amount = if tok == "all" {
        Amount::All
    } else {
        match value(&tok) {
            0 => return Err("invalid amount"),
            n => Amount::Count(n),
        }
    };

    let mut item = tokens.next_lower().ok_or("missing item")?;
    let unfinished = item == "unfinished";
    if unfinished {
        item = tokens.next_lower().ok_or("missing item")?;
    }

    let mut except = None;
    if tokens.peek().is_some_and(|t| t.eq_ignore_ascii_case("except")) {
        tokens.next_token();
        if amount != Amount::All {
            return Err("except only valid with all");
        }
        let tok = tokens.next_token().ok_or("missing except value")?;
        except = match value(&tok) {
            0 => return Err("invalid except value"),
            n => Some(n),
        };
    }

    Ok(GiveWhat::Items(Transfer {
        amount,
        item,
        unfinished,
        except,
    }))
}

fn items_only(what: GiveWhat) -> std::result::Result<Transfer, &'static str> {
    match what {
        GiveWhat::Items(transfer) => Ok(transfer),
        GiveWhat::Unit => Err("invalid amount"),
    }
}

fn game_option(tokens: &mut TokenStream) -> std::result::Result<GameOption, &'static str> {
    let option = tokens.next_lower().ok_or("missing option")?;
    Ok(match option.as_str() {
        "times" => GameOption::Times(true),
        "notimes" => GameOption::Times(false),
        "showattitudes" => GameOption::ShowAttitudes(true),
        "dontshowattitudes" => GameOption::ShowAttitudes(false),
        "template" => {
            let format = tokens.next_lower().ok_or("missing template type")?;
            GameOption::Template(match format.as_str() {
                "off" => TemplateFormat::Off,
                "short" => TemplateFormat::Short,
                "long" => TemplateFormat::Long,
                "map" => TemplateFormat::Map,
                _ => return Err("invalid template type"),
            })
        }
        _ => return Err("invalid option"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consumer::OrderLog;
    use crate::order::Order;
    use atlantis_foundation::{Direction, ErrorKind};

    fn parse(line: &str) -> (Result<()>, OrderLog) {
        let mut parser = OrdersParser::new(OrderLog::new());
        let result = parser.parse_line(line);
        (result, parser.into_consumer())
    }

    fn order(line: &str) -> (Order, OrderMeta) {
        let (result, log) = parse(line);
        assert!(result.is_ok(), "{line}: {result:?}");
        let entry = log.last().expect("an order").clone();
        (entry.order, entry.meta)
    }

    fn error(line: &str) -> String {
        let (result, _) = parse(line);
        format!("{}", result.expect_err(line))
    }

    #[test]
    fn atlantis_header() {
        assert_eq!(
            order("#atLAntis 127 \"pergamino\"").0,
            Order::Atlantis {
                faction: 127,
                password: Some("pergamino".into())
            }
        );
        assert_eq!(
            order("#aTlantis 13").0,
            Order::Atlantis {
                faction: 13,
                password: None
            }
        );
        assert_eq!(error("#atlaNTIs"), "#atlaNTIs: missing faction");
        assert_eq!(order("#eND").0, Order::AtlantisEnd);
    }

    #[test]
    fn unit_and_form() {
        assert_eq!(order("Unit 123").0, Order::Unit { unit: 123 });
        assert_eq!(error("uniT"), "uniT: missing unit");
        assert_eq!(error("unit 0"), "unit 0: invalid unit");

        let (form, meta) = order("@foRm 1 ;Form messenger");
        assert_eq!(form, Order::Form { alias: 1 });
        assert!(meta.permanent);
        assert_eq!(meta.comment.as_deref(), Some("Form messenger"));
        assert_eq!(error("form ;Form messenger"), "form ;Form messenger: missing alias");
    }

    #[test]
    fn comment_lines() {
        let (result, log) = parse("@;keep this");
        assert!(result.is_ok());
        assert_eq!(
            log.last().unwrap().order,
            Order::Comment {
                permanent: true,
                comment: "keep this".into()
            }
        );

        let (result, log) = parse("   ");
        assert!(result.is_ok());
        assert!(log.is_empty());
    }

    #[test]
    fn movement() {
        assert_eq!(
            order("@ADvance N norTheast IN out 2").0,
            Order::Advance {
                steps: vec![
                    MoveStep::Direction(Direction::North),
                    MoveStep::Direction(Direction::Northeast),
                    MoveStep::In,
                    MoveStep::Out,
                    MoveStep::Structure(2),
                ]
            }
        );
        assert_eq!(
            order("sail N norTheast pause").0,
            Order::Sail {
                steps: vec![
                    MoveStep::Direction(Direction::North),
                    MoveStep::Direction(Direction::Northeast),
                    MoveStep::Pause,
                ]
            }
        );
        assert_eq!(
            error("sail N 2 norTheast pause"),
            "sail N 2 norTheast pause: invalid direction"
        );
        assert_eq!(error("move n up"), "move n up: invalid direction");
    }

    #[test]
    fn partial_delivery_on_bad_target() {
        let (result, log) = parse("evict 21 453 12 FACTION 12 NEW 1 0 bad-number");
        let err = result.unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Syntax { .. }));
        assert_eq!(
            log.last().unwrap().order,
            Order::Evict {
                targets: vec![
                    UnitRef::Number(21),
                    UnitRef::Number(453),
                    UnitRef::Number(12),
                    UnitRef::FactionNew {
                        faction: 12,
                        alias: 1
                    },
                ]
            }
        );
    }

    #[test]
    fn teach_requires_target() {
        assert_eq!(error("teach"), "teach: missing target");
        assert_eq!(
            order("teach new 2").0,
            Order::Teach {
                targets: vec![UnitRef::New { alias: 2 }]
            }
        );
    }

    #[test]
    fn flags() {
        assert_eq!(order("AUTOTAX ON").0, Order::Autotax { flag: true });
        assert_eq!(order("AVOID F").0, Order::Avoid { flag: false });
        assert_eq!(error("behind"), "behind: missing value");
        assert_eq!(error("guard"), "guard: invalid value");
        assert_eq!(error("guard perhaps"), "guard perhaps: invalid value");
    }

    #[test]
    fn build_forms() {
        assert_eq!(
            order("BUILD").0,
            Order::Build {
                target: BuildTarget::Resume
            }
        );
        assert_eq!(
            order("BUILD HELP FACTION 12 NEW 15").0,
            Order::Build {
                target: BuildTarget::Help(UnitRef::FactionNew {
                    faction: 12,
                    alias: 15
                })
            }
        );
        assert_eq!(
            order("BUILD \"tIMBeR YaRd\"").0,
            Order::Build {
                target: BuildTarget::New("timber yard".into())
            }
        );
    }

    #[test]
    fn give_forms() {
        assert_eq!(
            order("give 23 13 iron").0,
            Order::Give {
                target: UnitRef::Number(23),
                what: GiveWhat::Items(Transfer {
                    amount: Amount::Count(13),
                    item: "iron".into(),
                    unfinished: false,
                    except: None,
                }),
            }
        );
        assert_eq!(
            order("give new 1 all unfinished wood except 13").0,
            Order::Give {
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
            order("give 101 unit").0,
            Order::Give {
                target: UnitRef::Number(101),
                what: GiveWhat::Unit
            }
        );
        assert_eq!(
            error("give 114 14 wood except 13"),
            "give 114 14 wood except 13: except only valid with all"
        );
        assert_eq!(error("give 0 1 silv"), "give 0 1 silv: malformed unit");
        assert_eq!(error("transport 101 unit"), "transport 101 unit: invalid amount");
    }

    #[test]
    fn take_from() {
        assert_eq!(
            order("take from 103 all unfinished wood except 13").0,
            Order::TakeFrom {
                target: UnitRef::Number(103),
                transfer: Transfer {
                    amount: Amount::All,
                    item: "wood".into(),
                    unfinished: true,
                    except: Some(13),
                },
            }
        );
        assert_eq!(error("take 23 13 iron"), "take 23 13 iron: missing from");
        assert_eq!(
            error("take from faction 13 new 2 all men"),
            "take from faction 13 new 2 all men: invalid unit"
        );
    }

    #[test]
    fn exchange_allows_any_unit() {
        let (exchange, meta) = order("@exchange 0 200 silv 50 swor ; Buying swords");
        assert_eq!(
            exchange,
            Order::Exchange {
                target: UnitRef::Any,
                give: ExchangeSide {
                    amount: 200,
                    item: "silv".into()
                },
                expected: ExchangeSide {
                    amount: 50,
                    item: "swor".into()
                },
            }
        );
        assert_eq!(meta.comment.as_deref(), Some(" Buying swords"));
        assert_eq!(
            error("exchange 12 200 silv 50"),
            "exchange 12 200 silv 50: missing expected item"
        );
    }

    #[test]
    fn declare_and_find() {
        assert_eq!(
            order("DECLARE DEFAULT friendly").0,
            Order::Declare {
                faction: DeclareTarget::Default,
                attitude: Some(Attitude::Friendly)
            }
        );
        assert_eq!(
            order("Declare 15").0,
            Order::Declare {
                faction: DeclareTarget::Faction(15),
                attitude: None
            }
        );
        assert_eq!(error("declare 3 grumpy"), "declare 3 grumpy: invalid attitude");
        assert_eq!(order("find all").0, Order::Find { target: FindTarget::All });
        assert_eq!(error("find none"), "find none: invalid faction");
    }

    #[test]
    fn enter_rejects_zero() {
        assert_eq!(order("ENTER 12").0, Order::Enter { structure: 12 });
        assert_eq!(error("enter castle"), "enter castle: invalid structure");
        assert_eq!(error("enter"), "enter: missing structure");
    }

    #[test]
    fn name_city_keeps_legal_chars() {
        assert_eq!(
            order("name village \"¡Año Mariano!\"").0,
            Order::Name {
                target: NameTarget::City("Ao Mariano!".into())
            }
        );
        assert_eq!(error("name city \"ñ\""), "name city \"ñ\": invalid argument");
        assert_eq!(error("name unit"), "name unit: missing name");
    }

    #[test]
    fn nospoils_delivers_then_warns() {
        let (result, log) = parse("nospoils 0");
        let err = result.unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Deprecated { .. }));
        assert!(!err.is_fatal());
        assert_eq!(
            log.last().unwrap().order,
            Order::Spoils {
                spoils: Spoils::All
            }
        );
    }

    #[test]
    fn options() {
        assert_eq!(
            order("option template map").0,
            Order::Option {
                option: GameOption::Template(TemplateFormat::Map)
            }
        );
        assert_eq!(error("option template"), "option template: missing template type");
        assert_eq!(error("option colour"), "option colour: invalid option");
    }

    #[test]
    fn misc_arguments() {
        assert_eq!(
            order("withdraw hors").0,
            Order::Withdraw {
                amount: 1,
                item: "hors".into()
            }
        );
        assert_eq!(
            order("produce 10 axe").0,
            Order::Produce {
                target: Some(10),
                item: "axe".into()
            }
        );
        assert_eq!(
            order("password").0,
            Order::Password {
                password: "none".into()
            }
        );
        assert_eq!(
            order("study ship 3").0,
            Order::Study {
                skill: "ship".into(),
                level: Some(3)
            }
        );
        assert_eq!(
            order("show object Castle").0,
            Order::Show {
                target: ShowTarget::Structure("castle".into())
            }
        );
        let mut points = BTreeMap::new();
        points.insert("war".to_string(), 2);
        points.insert("trade".to_string(), 1);
        assert_eq!(order("faction war 2 trade 1").0, Order::Faction { points });
        assert_eq!(error("faction war"), "faction war: invalid value");
    }

    #[test]
    fn unknown_orders_are_ignored() {
        let (result, log) = parse("dance wildly");
        assert!(result.is_ok());
        assert!(log.is_empty());
    }

    #[test]
    fn parse_reader_stops_at_first_error() {
        let input = "unit 1\nwork\nform\ntax\n";
        let mut parser = OrdersParser::new(OrderLog::new());
        assert!(parser.parse(input.as_bytes()).is_err());
        assert_eq!(parser.consumer().len(), 2);
    }
}
