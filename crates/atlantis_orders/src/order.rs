//! Typed order arguments and the recorded [`Order`] value.

use std::collections::BTreeMap;
use std::fmt;

use atlantis_foundation::{Attitude, Direction};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How an order refers to a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnitRef {
    /// An existing unit by number.
    Number(u32),
    /// `0`: any unit, where the order allows it.
    Any,
    /// `NEW alias`: a unit formed this turn by the issuing faction.
    New {
        /// The `FORM` alias.
        alias: u32,
    },
    /// `FACTION f NEW alias`: a unit formed this turn by another faction.
    FactionNew {
        /// The forming faction.
        faction: u32,
        /// The `FORM` alias.
        alias: u32,
    },
}

impl fmt::Display for UnitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Any => f.write_str("0"),
            Self::New { alias } => write!(f, "new {alias}"),
            Self::FactionNew { faction, alias } => write!(f, "faction {faction} new {alias}"),
        }
    }
}

/// A quantity that may be `ALL`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Amount {
    /// Everything available.
    All,
    /// A positive count.
    Count(u32),
}

/// Items moved by `GIVE`, `TAKE FROM`, `TRANSPORT` and `DISTRIBUTE`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transfer {
    /// How many.
    pub amount: Amount,
    /// Item abbreviation or name, lowercased.
    pub item: String,
    /// Refers to unfinished ships or structures.
    pub unfinished: bool,
    /// Quantity kept back with `ALL ... EXCEPT n`.
    pub except: Option<u32>,
}

/// What a `GIVE` order hands over.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GiveWhat {
    /// The whole unit changes faction.
    Unit,
    /// Some items.
    Items(Transfer),
}

/// One side of an `EXCHANGE`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExchangeSide {
    /// How many.
    pub amount: u32,
    /// Item, lowercased.
    pub item: String,
}

/// One step of a `MOVE`, `ADVANCE` or `SAIL` route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MoveStep {
    /// To the neighbouring hex.
    Direction(Direction),
    /// Into the structure's inner location.
    In,
    /// Out of the current structure.
    Out,
    /// Wait one movement phase.
    Pause,
    /// Into the numbered structure.
    Structure(u32),
}

impl fmt::Display for MoveStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direction(d) => write!(f, "{d}"),
            Self::In => f.write_str("in"),
            Self::Out => f.write_str("out"),
            Self::Pause => f.write_str("p"),
            Self::Structure(n) => write!(f, "{n}"),
        }
    }
}

/// Faction argument of `DECLARE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DeclareTarget {
    /// The default attitude.
    Default,
    /// A specific faction.
    Faction(u32),
}

/// Target of `DESCRIBE`; `None` clears the description.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DescribeTarget {
    /// The issuing unit.
    Unit(Option<String>),
    /// The structure the unit owns.
    Structure(Option<String>),
}

/// Argument of `FIND`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FindTarget {
    /// Every faction met this turn.
    All,
    /// One faction.
    Faction(u32),
}

/// What a `NAME` order renames.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NameTarget {
    /// The issuing faction.
    Faction(String),
    /// The issuing unit.
    Unit(String),
    /// The owned structure.
    Structure(String),
    /// The town the unit governs; only legal characters kept.
    City(String),
}

/// Orders template layout requested with `OPTION TEMPLATE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TemplateFormat {
    /// No template.
    Off,
    /// Orders only.
    Short,
    /// Orders with unit descriptions.
    Long,
    /// Long format with a map.
    Map,
}

/// A faction-wide `OPTION`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameOption {
    /// Receive the Times newsletter.
    Times(bool),
    /// Show unit attitudes in the report.
    ShowAttitudes(bool),
    /// Template format.
    Template(TemplateFormat),
}

/// Whose food a unit eats under `CONSUME`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Consuming {
    /// The unit's own stock.
    Unit,
    /// Any unit of the faction in the region.
    Faction,
}

/// What `REVEAL` shows to others.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RevealMode {
    /// The unit itself.
    Unit,
    /// The unit and its faction.
    Faction,
}

/// Battle spoils a unit is willing to pick up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Spoils {
    /// Nothing.
    None,
    /// Only what can be carried walking.
    Walk,
    /// Only what can be carried flying.
    Fly,
    /// Only what can be carried swimming.
    Swim,
    /// Only what can be carried sailing.
    Sail,
    /// Everything.
    All,
}

/// Argument of `SHOW`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ShowTarget {
    /// A skill report.
    Skill(String),
    /// An item report.
    Item(String),
    /// A structure type report.
    Structure(String),
}

/// Modifier of `JOIN`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum JoinMode {
    /// Do not join if it would overload the fleet.
    NoOverload,
    /// Merge the fleets.
    Merge,
}

/// What a `BUILD` order works on.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BuildTarget {
    /// Continue the structure the unit is in.
    Resume,
    /// Help another unit build.
    Help(UnitRef),
    /// Start a new structure of this type, lowercased.
    New(String),
}

/// Permanent marker and comment carried by an order line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderMeta {
    /// Line started with `@`.
    pub permanent: bool,
    /// Trailing comment, without the semicolon.
    pub comment: Option<String>,
}

impl OrderMeta {
    /// Creates order metadata.
    #[must_use]
    pub fn new(permanent: bool, comment: Option<String>) -> Self {
        Self { permanent, comment }
    }
}

/// A recognized orders line.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(missing_docs)]
pub enum Order {
    Comment { permanent: bool, comment: String },
    Atlantis { faction: u32, password: Option<String> },
    AtlantisEnd,
    Unit { unit: u32 },
    Form { alias: u32 },
    End,
    Turn,
    EndTurn,
    Address { address: String },
    Advance { steps: Vec<MoveStep> },
    Assassinate { unit: UnitRef },
    Attack { targets: Vec<UnitRef> },
    Autotax { flag: bool },
    Avoid { flag: bool },
    Idle,
    Behind { flag: bool },
    Build { target: BuildTarget },
    Buy { amount: Amount, item: String },
    Cast { skill: String, params: Vec<String> },
    Claim { amount: u32 },
    Combat { skill: Option<String> },
    Consume { consuming: Option<Consuming> },
    Declare { faction: DeclareTarget, attitude: Option<Attitude> },
    Describe { target: DescribeTarget },
    Destroy,
    Enter { structure: u32 },
    Entertain,
    Evict { targets: Vec<UnitRef> },
    Exchange { target: UnitRef, give: ExchangeSide, expected: ExchangeSide },
    Faction { points: BTreeMap<String, u32> },
    Find { target: FindTarget },
    Forget { skill: String },
    Withdraw { amount: u32, item: String },
    Give { target: UnitRef, what: GiveWhat },
    Guard { flag: bool },
    Hold { flag: bool },
    Join { target: UnitRef, mode: Option<JoinMode> },
    Leave,
    Move { steps: Vec<MoveStep> },
    Name { target: NameTarget },
    NoAid { flag: bool },
    NoCross { flag: bool },
    Option { option: GameOption },
    Password { password: String },
    Pillage,
    Prepare { item: Option<String> },
    Weapon { items: Vec<String> },
    Armor { items: Vec<String> },
    Produce { target: Option<u32>, item: String },
    Promote { unit: UnitRef },
    Quit { password: Option<String> },
    Restart { password: Option<String> },
    Reveal { reveal: Option<RevealMode> },
    Sail { steps: Vec<MoveStep> },
    Sell { amount: Amount, item: String },
    Share { flag: bool },
    Show { target: ShowTarget },
    Spoils { spoils: Spoils },
    Steal { target: UnitRef, item: String },
    Study { skill: String, level: Option<u32> },
    TakeFrom { target: UnitRef, transfer: Transfer },
    Tax,
    Teach { targets: Vec<UnitRef> },
    Work,
    Transport { target: UnitRef, transfer: Transfer },
    Distribute { target: UnitRef, transfer: Transfer },
}

impl Order {
    /// The orders-file keyword, lowercased; empty for comment lines.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Comment { .. } => "",
            Self::Atlantis { .. } => "#atlantis",
            Self::AtlantisEnd => "#end",
            Self::Unit { .. } => "unit",
            Self::Form { .. } => "form",
            Self::End => "end",
            Self::Turn => "turn",
            Self::EndTurn => "endturn",
            Self::Address { .. } => "address",
            Self::Advance { .. } => "advance",
            Self::Assassinate { .. } => "assassinate",
            Self::Attack { .. } => "attack",
            Self::Autotax { .. } => "autotax",
            Self::Avoid { .. } => "avoid",
            Self::Idle => "idle",
            Self::Behind { .. } => "behind",
            Self::Build { .. } => "build",
            Self::Buy { .. } => "buy",
            Self::Cast { .. } => "cast",
            Self::Claim { .. } => "claim",
            Self::Combat { .. } => "combat",
            Self::Consume { .. } => "consume",
            Self::Declare { .. } => "declare",
            Self::Describe { .. } => "describe",
            Self::Destroy => "destroy",
            Self::Enter { .. } => "enter",
            Self::Entertain => "entertain",
            Self::Evict { .. } => "evict",
            Self::Exchange { .. } => "exchange",
            Self::Faction { .. } => "faction",
            Self::Find { .. } => "find",
            Self::Forget { .. } => "forget",
            Self::Withdraw { .. } => "withdraw",
            Self::Give { .. } => "give",
            Self::Guard { .. } => "guard",
            Self::Hold { .. } => "hold",
            Self::Join { .. } => "join",
            Self::Leave => "leave",
            Self::Move { .. } => "move",
            Self::Name { .. } => "name",
            Self::NoAid { .. } => "noaid",
            Self::NoCross { .. } => "nocross",
            Self::Option { .. } => "option",
            Self::Password { .. } => "password",
            Self::Pillage => "pillage",
            Self::Prepare { .. } => "prepare",
            Self::Weapon { .. } => "weapon",
            Self::Armor { .. } => "armor",
            Self::Produce { .. } => "produce",
            Self::Promote { .. } => "promote",
            Self::Quit { .. } => "quit",
            Self::Restart { .. } => "restart",
            Self::Reveal { .. } => "reveal",
            Self::Sail { .. } => "sail",
            Self::Sell { .. } => "sell",
            Self::Share { .. } => "share",
            Self::Show { .. } => "show",
            Self::Spoils { .. } => "spoils",
            Self::Steal { .. } => "steal",
            Self::Study { .. } => "study",
            Self::TakeFrom { .. } => "take",
            Self::Tax => "tax",
            Self::Teach { .. } => "teach",
            Self::Work => "work",
            Self::Transport { .. } => "transport",
            Self::Distribute { .. } => "distribute",
        }
    }
}

/// Every keyword the orders parser recognizes.
pub const KEYWORDS: &[&str] = &[
    "#atlantis", "#end", "unit", "form", "end", "turn", "endturn", "address", "advance",
    "assassinate", "attack", "autotax", "avoid", "idle", "behind", "build", "buy", "cast",
    "claim", "combat", "consume", "declare", "describe", "destroy", "enter", "entertain",
    "evict", "exchange", "faction", "find", "forget", "withdraw", "give", "guard", "hold",
    "join", "leave", "move", "name", "noaid", "nocross", "nospoils", "option", "password",
    "pillage", "prepare", "weapon", "armor", "produce", "promote", "quit", "restart",
    "reveal", "sail", "sell", "share", "show", "spoils", "steal", "study", "take", "tax",
    "teach", "work", "transport", "distribute",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_ref_display_matches_order_syntax() {
        assert_eq!(UnitRef::Number(12).to_string(), "12");
        assert_eq!(UnitRef::New { alias: 3 }.to_string(), "new 3");
        assert_eq!(
            UnitRef::FactionNew { faction: 7, alias: 1 }.to_string(),
            "faction 7 new 1"
        );
    }

    #[test]
    fn move_step_display() {
        assert_eq!(MoveStep::Direction(Direction::Southeast).to_string(), "se");
        assert_eq!(MoveStep::Structure(4).to_string(), "4");
        assert_eq!(MoveStep::Pause.to_string(), "p");
    }

    #[test]
    fn keywords_cover_recorded_orders() {
        let orders = [
            Order::Tax,
            Order::TakeFrom {
                target: UnitRef::Number(1),
                transfer: Transfer {
                    amount: Amount::All,
                    item: "silv".into(),
                    unfinished: false,
                    except: None,
                },
            },
            Order::AtlantisEnd,
        ];
        for order in orders {
            assert!(KEYWORDS.contains(&order.keyword()));
        }
    }
}
