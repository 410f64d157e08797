//! Typed payloads delivered to a [`ReportConsumer`](crate::ReportConsumer).
//!
//! Every field holds only what the report line actually said. Optional
//! clauses that were absent stay `None`, empty, or `false`.

use std::collections::BTreeMap;

use atlantis_foundation::{Attitude, Direction};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::special::Special;

// =============================================================================
// Shared Fragments
// =============================================================================

/// A unit or faction as printed: `Name (123)`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Numbered {
    /// Display name.
    pub name: String,
    /// Unit or faction number.
    pub num: u32,
}

impl Numbered {
    /// Creates a numbered reference.
    pub fn new(name: impl Into<String>, num: u32) -> Self {
        Self {
            name: name.into(),
            num,
        }
    }
}

/// How many of an item a line mentions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Quantity {
    /// A fixed count.
    Count(u32),
    /// Markets can list `unlimited` supplies.
    Unlimited,
}

impl Quantity {
    /// Returns the count, or `None` if unlimited.
    #[must_use]
    pub const fn count(self) -> Option<u32> {
        match self {
            Self::Count(n) => Some(n),
            Self::Unlimited => None,
        }
    }
}

/// An item named by its printed name and abbreviation: `sword [SWOR]`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ItemRef {
    /// Name as printed, singular or plural.
    pub name: String,
    /// Abbreviation between brackets.
    pub abbr: String,
}

impl ItemRef {
    /// Creates an item reference.
    pub fn new(name: impl Into<String>, abbr: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            abbr: abbr.into(),
        }
    }
}

/// An amount of an item: `18 swords [SWOR]`, or `sword [SWOR]` for one.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ItemStack {
    /// How many.
    pub amount: Quantity,
    /// Which item.
    pub item: ItemRef,
}

impl ItemStack {
    /// Creates a counted stack.
    pub fn new(amount: u32, name: impl Into<String>, abbr: impl Into<String>) -> Self {
        Self {
            amount: Quantity::Count(amount),
            item: ItemRef::new(name, abbr),
        }
    }
}

/// A skill named by its printed name and abbreviation: `combat [COMB]`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SkillRef {
    /// Skill name.
    pub name: String,
    /// Abbreviation between brackets.
    pub abbr: String,
}

impl SkillRef {
    /// Creates a skill reference.
    pub fn new(name: impl Into<String>, abbr: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            abbr: abbr.into(),
        }
    }
}

/// A skill at a level: `force [FORC] 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SkillLevel {
    /// The skill.
    pub skill: SkillRef,
    /// Its level.
    pub level: u32,
}

/// A hex position: `plain (18,38) in Decec`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
    /// Terrain type.
    pub terrain: String,
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
    /// Level name, absent on the surface.
    pub z: Option<String>,
    /// Province name.
    pub name: String,
}

/// A settlement inside a region.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Town {
    /// Town name.
    pub name: String,
    /// `village`, `town` or `city`.
    pub kind: String,
}

// =============================================================================
// Faction
// =============================================================================

/// The faction header line: `Mathoyoh (3) (War 3, Trade 1, Magic 1)`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FactionInfo {
    /// Faction name.
    pub name: String,
    /// Faction number.
    pub num: u32,
    /// Points per faction type, lowercased. Empty for unlimited and
    /// normal factions.
    pub types: BTreeMap<String, u32>,
}

/// How a faction left the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum QuitState {
    /// The faction restarted.
    Restart,
    /// The game ended.
    GameOver,
    /// The faction won.
    Won,
    /// The faction was eliminated.
    Eliminated,
}

/// Warnings printed in the faction header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FactionWarning {
    /// The Times is not being sent.
    NoTimes,
    /// No password set.
    NoPassword,
    /// Turns left before removal for inactivity.
    Inactive(u32),
    /// The faction is out of the game.
    Quit(QuitState),
}

/// A faction limit line: `Tax Regions: 5 (40)`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FactionStatus {
    /// What is limited.
    pub what: String,
    /// Current count.
    pub num: u32,
    /// Allowed count.
    pub allowed: u32,
}

/// Declared attitude lines.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DeclaredAttitudes {
    /// `Declared Attitudes (default Neutral):`
    Default(Attitude),
    /// `Unfriendly : Creatures (2).`
    List {
        /// The attitude declared.
        attitude: Attitude,
        /// Factions holding it. Empty for `none`.
        factions: Vec<Numbered>,
    },
}

/// Which turn section a message came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MessageKind {
    /// Errors during turn.
    Error,
    /// Events during turn.
    Event,
}

/// One error or event line.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FactionMessage {
    /// Section the line came from.
    pub kind: MessageKind,
    /// The message text.
    pub message: String,
    /// The unit it is about, when the line names one.
    pub unit: Option<Numbered>,
}

// =============================================================================
// Skills
// =============================================================================

/// A structure a skill can build: `a Tower from 10 stone [STON]`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BuildOption {
    /// Structure name.
    pub name: String,
    /// Units of material needed.
    pub cost: u32,
    /// Accepted materials, any one of them.
    pub items: Vec<ItemRef>,
}

/// The order used to make a product.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ProductionCommand {
    /// `PRODUCE`
    #[default]
    Produce,
    /// `BUILD`, used for ships.
    Build,
}

/// One product of a normal production skill.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Product {
    /// The item made.
    pub item: ItemRef,
    /// Output grows with skill level.
    pub skill_scaled: bool,
    /// Any one of the inputs suffices.
    pub any_input: bool,
    /// Materials consumed.
    pub inputs: Vec<ItemStack>,
    /// Items made per batch. Absent for ships.
    pub output: Option<u32>,
    /// Man-months per batch.
    pub months: u32,
}

/// Normal production of a skill.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Production {
    /// Order used.
    pub command: ProductionCommand,
    /// Products, in report order.
    pub items: Vec<Product>,
}

/// One item a mage can create with `CAST`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MagicProduct {
    /// The item created.
    pub item: ItemRef,
    /// Output per skill level, in percent.
    pub percent: u32,
    /// Materials consumed.
    pub inputs: Vec<ItemStack>,
}

/// A combat spell or item ability, with its parsed effect.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpecialText {
    /// The description as printed.
    pub text: String,
    /// The parsed effect.
    pub special: Special,
}

/// A skill description line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(clippy::struct_excessive_bools)]
pub struct SkillDef {
    /// Skill name.
    pub name: String,
    /// Abbreviation.
    pub abbr: String,
    /// Level described.
    pub level: u32,
    /// Text after the header, unparsed.
    pub full_text: String,
    /// Text no clause claimed.
    pub description: Option<String>,
    /// The report had nothing to say about this level.
    pub no_report: bool,
    /// Cannot be raised through experience.
    pub no_experience: bool,
    /// Cannot be taught.
    pub no_teach: bool,
    /// Cannot be studied normally.
    pub no_study: bool,
    /// Studied at half speed.
    pub slow_study: bool,
    /// Silver per month of study.
    pub cost: Option<u32>,
    /// Prerequisites.
    pub depends: Vec<SkillLevel>,
    /// Buildings this skill can build.
    pub builds: Vec<BuildOption>,
    /// Normal production.
    pub production: Option<Production>,
    /// Items created by magic.
    pub magic_production: Vec<MagicProduct>,
    /// Advanced resources this skill can find.
    pub discovers: Vec<String>,
    /// Combat spell effect.
    pub combat: Option<SpecialText>,
    /// The skill is used with `CAST`.
    pub cast: bool,
    /// A foundation skill.
    pub foundation: bool,
    /// Name of the apprentice rank this skill grants.
    pub apprentice: Option<String>,
}

// =============================================================================
// Items
// =============================================================================

/// Movement capacities of an item. `can walk` reads as zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Capacities {
    /// Walking capacity.
    pub walking: Option<u32>,
    /// Riding capacity.
    pub riding: Option<u32>,
    /// Swimming capacity.
    pub swimming: Option<u32>,
    /// Flying capacity.
    pub flying: Option<u32>,
}

/// Extra walking capacity when hitched to another item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Hitch {
    /// Item to hitch to.
    pub item: ItemRef,
    /// Walking capacity when hitched.
    pub walking: u32,
}

/// Ship properties of a ship item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShipStats {
    /// Sailing levels needed.
    pub sailors: u32,
    /// Men protected.
    pub protect: Option<u32>,
    /// Defence bonus per attack type.
    pub defense: BTreeMap<String, u32>,
    /// Mages allowed to study above level 2.
    pub max_mages: Option<u32>,
}

/// A miscellaneous combat item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CombatItem {
    /// Only mages can use it.
    pub mage_only: bool,
    /// It provides a shield rather than casting.
    pub shield: bool,
    /// Its ability.
    pub ability: SpecialText,
}

/// An item that lets its holder cast a spell.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GrantSkill {
    /// Spell granted.
    pub name: String,
    /// Highest level granted.
    pub max_level: u32,
    /// Lowest level granted.
    pub min_level: u32,
    /// Skills the level is derived from.
    pub from_skills: Vec<String>,
}

/// Sailing bonus of an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WindBonus {
    /// Movement points added.
    pub boost: u32,
    /// Largest ship affected, in sailing points.
    pub sailing: u32,
}

/// A bonus to stealth or observation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SkillBonus {
    /// Points granted.
    pub value: u32,
    /// Each man needs one.
    pub per_man: bool,
}

/// Who can ride a mount.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MountSkill {
    /// Anyone.
    None,
    /// Riders need this skill.
    Required(SkillRef),
    /// It cannot be ridden.
    Unridable,
}

/// Mount properties of an item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mount {
    /// Riding requirement.
    pub skill: MountSkill,
    /// Minimum combat bonus.
    pub min_bonus: u32,
    /// Maximum combat bonus.
    pub max_bonus: u32,
    /// Maximum bonus where flying mounts cannot fly.
    pub max_hampered_bonus: Option<u32>,
    /// Effect caused when ridden.
    pub special: Option<SpecialText>,
}

/// Trade good prices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TradeGood {
    /// Single buy and sell price.
    pub base_price: Option<u32>,
    /// Buy price range.
    pub buy: Option<(u32, u32)>,
    /// Sell price range.
    pub sell: Option<(u32, u32)>,
}

/// What a tool improves.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ToolBoost {
    /// Name of the boosted item or activity.
    pub name: String,
    /// Abbreviation, when the target is an item.
    pub abbr: Option<String>,
    /// Production increase.
    pub value: u32,
}

/// Armor protection against one weapon class.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArmorSave {
    /// Weapon class.
    pub class: String,
    /// Chance to save, in percent.
    pub percent: u32,
}

/// Armor properties of an item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Armor {
    /// Saves per weapon class.
    pub saves: Vec<ArmorSave>,
    /// Can be worn while assassinating.
    pub assassination: bool,
}

/// Which riding bonus a weapon keeps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RidingBonus {
    /// Defence only.
    Defense,
    /// Attack and defence.
    AttackAndDefense,
}

/// How often a weapon attacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AttackRate {
    /// `attacks` attacks every `rounds` rounds.
    Fixed {
        /// Number of attacks.
        attacks: u32,
        /// Rounds between them.
        rounds: u32,
    },
    /// Attacks equal to (half) the wielder's skill level, plus a bonus.
    SkillLevel {
        /// Half the skill level, rounded up.
        half: bool,
        /// Extra attacks.
        plus: u32,
    },
}

/// Weapon properties of an item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(clippy::struct_excessive_bools)]
pub struct Weapon {
    /// `ranged`, `long` or `short`.
    pub range: Option<String>,
    /// Weapon class, e.g. `slashing`.
    pub class: String,
    /// Skill needed to wield it.
    pub skill: Option<SkillRef>,
    /// Attack bonus, negative for a penalty.
    pub attack_bonus: i32,
    /// Defence bonus, negative for a penalty.
    pub defense_bonus: i32,
    /// Bonus against mounted opponents.
    pub mount_bonus: Option<i32>,
    /// Only mounted troops may use it.
    pub mounted_only: bool,
    /// Only foot troops may use it.
    pub foot_only: bool,
    /// Riding bonus kept when mounted.
    pub riding_bonus: Option<RidingBonus>,
    /// Defenders fight at skill 0.
    pub no_defense: bool,
    /// Attackers get no skill bonus on defence.
    pub no_attacker_skill: bool,
    /// Never misses a round readying.
    pub always_ready: bool,
    /// Defence used against it.
    pub attack_type: Option<String>,
    /// Attack rate.
    pub attacks: Option<AttackRate>,
}

/// A monster's resistance to one attack type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Resistance {
    /// Numeric resistance.
    Value(u32),
    /// Textual resistance, e.g. `immune`.
    Text(String),
}

/// Combat statistics of a monster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MonsterStats {
    /// Melee attacks per round.
    pub attacks: u32,
    /// Hits to kill.
    pub hits: u32,
    /// Hits regenerated per round.
    pub regeneration: Option<u32>,
    /// Tactics score.
    pub tactics: u32,
    /// Stealth score.
    pub stealth: u32,
    /// Observation score.
    pub observation: u32,
}

/// Monster properties of an item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Monster {
    /// Combat skill.
    pub attack_level: u32,
    /// Resistances per attack type.
    pub resistances: BTreeMap<String, Resistance>,
    /// Spell the monster casts.
    pub special: Option<SpecialText>,
    /// Combat statistics.
    pub stats: Option<MonsterStats>,
    /// Treasure kind.
    pub spoils: Option<String>,
}

/// Study limits of a race.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Race {
    /// Level reachable in every other skill.
    pub default_level: u32,
    /// Level reachable in the special skills.
    pub special_level: Option<u32>,
    /// Skills the race is good at.
    pub skills: Vec<SkillRef>,
}

/// An item description line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(clippy::struct_excessive_bools)]
pub struct ItemDef {
    /// Item name.
    pub name: String,
    /// Abbreviation.
    pub abbr: String,
    /// Text after the header, unparsed.
    pub full_text: String,
    /// Text no clause claimed.
    pub description: Option<String>,
    /// An illusory item.
    pub illusion: bool,
    /// Weight, absent for ships.
    pub weight: Option<u32>,
    /// Hitching bonus.
    pub hitch: Option<Hitch>,
    /// Movement capacities.
    pub capacities: Capacities,
    /// Hexes per month.
    pub speed: Option<u32>,
    /// Ship properties.
    pub ship: Option<ShipStats>,
    /// Silver to withdraw one.
    pub withdraw: Option<u32>,
    /// Most a unit may hold.
    pub max_inventory: Option<Quantity>,
    /// Cannot be given away.
    pub cant_give: bool,
    /// Maintenance silver when eaten.
    pub food: Option<u32>,
    /// Combat item properties.
    pub combat: Option<CombatItem>,
    /// Only usable by mages.
    pub mage_only: bool,
    /// Spell granted.
    pub grant: Option<GrantSkill>,
    /// Sailing bonus.
    pub wind: Option<WindBonus>,
    /// Stealth bonus.
    pub stealth: Option<SkillBonus>,
    /// Observation bonus.
    pub observation: Option<SkillBonus>,
    /// The game's currency.
    pub money: bool,
    /// A trade resource.
    pub resource: bool,
    /// Mount properties.
    pub mount: Option<Mount>,
    /// Trade good prices.
    pub trade: Option<TradeGood>,
    /// Tool boosts.
    pub tool: Vec<ToolBoost>,
    /// Armor properties.
    pub armor: Option<Armor>,
    /// Weapon properties.
    pub weapon: Option<Weapon>,
    /// Monster properties.
    pub monster: Option<Monster>,
    /// Race properties.
    pub race: Option<Race>,
}

// =============================================================================
// Structures
// =============================================================================

/// Kind of structure type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StructureKind {
    /// A building.
    #[default]
    Building,
    /// A ship.
    Ship,
    /// A group of ships.
    Fleet,
}

/// Whether a structure shields its units from a special.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StructureSpecial {
    /// Special name, as printed.
    pub name: String,
    /// Units inside are affected.
    pub affected: bool,
}

/// Decay parameters of a structure.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Decay {
    /// Damage absorbed before decay starts.
    pub max_maintenance: u32,
    /// Decay per month.
    pub max_monthly_decay: u32,
    /// Damage repaired per unit of `repair_item`.
    pub repair_rate: Option<u32>,
    /// Item used for repairs.
    pub repair_item: Option<String>,
}

/// An object report line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(clippy::struct_excessive_bools)]
pub struct StructureDef {
    /// Structure type name.
    pub name: String,
    /// Kind.
    pub kind: StructureKind,
    /// Monsters may lair here.
    pub monster_lair: bool,
    /// Monsters inside never regenerate.
    pub no_monster_growth: bool,
    /// Units may enter.
    pub can_enter: bool,
    /// Men protected.
    pub protect: Option<u32>,
    /// Defence bonus per attack type.
    pub defense: BTreeMap<String, u32>,
    /// Specials the structure does or does not shield from.
    pub specials: Vec<StructureSpecial>,
    /// Sailing levels needed.
    pub sailors: Option<u32>,
    /// Mages allowed to study above level 2.
    pub max_mages: Option<u32>,
    /// Players cannot build it.
    pub not_buildable: bool,
    /// Resources whose production it raises.
    pub production_aided: Option<String>,
    /// Never decays.
    pub never_decays: bool,
    /// Decay parameters.
    pub decay: Option<Decay>,
}

// =============================================================================
// Regions
// =============================================================================

/// Peasants and wealth of a region.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Population {
    /// Number of peasants.
    pub peasants: u32,
    /// Peasant race names.
    pub races: Option<String>,
    /// Region wealth.
    pub wealth: u32,
}

/// The first line of a region report.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegionHeader {
    /// Where the region is.
    pub location: Location,
    /// Settlement, if any.
    pub town: Option<Town>,
    /// Population, if inhabited.
    pub population: Option<Population>,
}

/// A magical cause for the weather.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WeatherCause {
    /// `unnaturally` clear.
    ClearSkies,
    /// `an unnatural` blizzard.
    Blizzard,
}

/// Weather line.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegionWeather {
    /// Last month's weather.
    pub last: String,
    /// Next month's weather.
    pub next: String,
    /// Magic behind last month's weather.
    pub cause: Option<WeatherCause>,
}

/// Wages line.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegionWages {
    /// Silver per man-month.
    pub productivity: f64,
    /// Total wages available, zero when not printed.
    pub maximum: u32,
}

/// Which side of the market a line lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MarketSide {
    /// `Wanted:` items the region buys, which units sell.
    Sell,
    /// `For Sale:` items units can buy.
    Buy,
}

/// One market entry: `116 grain [GRAI] at $18`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MarketOffer {
    /// Item and amount.
    pub stack: ItemStack,
    /// Price per item.
    pub price: u32,
}

/// Market line.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegionMarket {
    /// Market side.
    pub side: MarketSide,
    /// Entries.
    pub offers: Vec<MarketOffer>,
}

/// Exit line: `  South : ocean (13,43) in Havilah Ocean.`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegionExit {
    /// Direction of the neighbour.
    pub direction: Direction,
    /// Neighbour position.
    pub location: Location,
    /// Neighbour settlement.
    pub town: Option<Town>,
}

/// Gate line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegionGate {
    /// Gate number, when known.
    pub number: Option<u32>,
    /// The gate is open.
    pub open: bool,
}

/// Ships in a fleet: `3 Longships`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FleetShips {
    /// Number of ships.
    pub count: u32,
    /// Ship type, as printed.
    pub name: String,
}

/// Structure line: `+ Fleet [104] : Fleet, 1 Galleon, 3 Longships`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(clippy::struct_excessive_bools)]
pub struct RegionStructure {
    /// Structure name.
    pub name: String,
    /// Structure number.
    pub num: u32,
    /// Structure type.
    pub kind: String,
    /// Closed to player units.
    pub closed: bool,
    /// Engraved with runes.
    pub runes: bool,
    /// Leads to an inner location.
    pub inner: bool,
    /// Needs maintenance.
    pub needs_maintenance: bool,
    /// About to decay.
    pub about_to_decay: bool,
    /// Work left to finish it.
    pub incomplete: Option<u32>,
    /// Fleet contents.
    pub fleet: Vec<FleetShips>,
}

/// How a unit relates to the reporting faction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnitAttitude {
    /// `*` one of our own units.
    Own,
    /// Another faction's unit, by declared attitude.
    Other(Attitude),
}

/// Guard stance of a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GuardMode {
    /// `on guard`
    Guard,
    /// `avoiding`
    Avoid,
}

/// Unit or faction scope of a flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Scope {
    /// The unit.
    Unit,
    /// The faction.
    Faction,
}

/// A skill with study days: `combat [COMB] 1 (30)`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SkillDays {
    /// The skill.
    pub skill: SkillRef,
    /// Current level.
    pub level: u32,
    /// Days studied.
    pub days: u32,
    /// Experience rate, when shown.
    pub rate: Option<u32>,
}

/// Total carrying capacity of a unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Capacity {
    /// Flying.
    pub flying: u32,
    /// Riding.
    pub riding: u32,
    /// Walking.
    pub walking: u32,
    /// Swimming.
    pub swimming: u32,
}

/// An item held by a unit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnitItem {
    /// Item and amount.
    pub stack: ItemStack,
    /// Work left, for unfinished items.
    pub unfinished: Option<u32>,
    /// An illusion.
    pub illusion: bool,
}

/// Unit line.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(clippy::struct_excessive_bools)]
pub struct RegionUnit {
    /// Unit name.
    pub name: String,
    /// Unit number.
    pub num: u32,
    /// Listed inside the previous structure.
    pub in_structure: bool,
    /// Relation to the reporting faction.
    pub attitude: UnitAttitude,
    /// Owning faction, when visible.
    pub faction: Option<Numbered>,
    /// Guard stance.
    pub guard: Option<GuardMode>,
    /// Fights from the back.
    pub behind: bool,
    /// Reveal setting.
    pub reveal: Option<Scope>,
    /// Holding.
    pub holding: bool,
    /// Taxing automatically.
    pub taxing: bool,
    /// Receiving no aid.
    pub no_aid: bool,
    /// Sharing items.
    pub sharing: bool,
    /// Whose food it eats.
    pub consuming: Option<Scope>,
    /// Won't cross water.
    pub no_cross: bool,
    /// Spoils setting, as printed.
    pub spoils: Option<String>,
    /// Places visited, for quests.
    pub visited: Vec<String>,
    /// Skills it can study.
    pub can_study: Vec<SkillRef>,
    /// Readied weapons.
    pub ready_weapons: Vec<ItemRef>,
    /// Readied armor.
    pub ready_armor: Vec<ItemRef>,
    /// Readied items.
    pub ready_items: Vec<ItemRef>,
    /// Combat spell.
    pub combat_spell: Option<SkillRef>,
    /// Skills known.
    pub skills: Vec<SkillDays>,
    /// Total weight.
    pub weight: Option<u32>,
    /// Carrying capacity.
    pub capacity: Option<Capacity>,
    /// Items held.
    pub items: Vec<UnitItem>,
}

// =============================================================================
// Battles
// =============================================================================

/// Battle opening line.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BattleStart {
    /// Leader of the attacking side. Absent for a successful assassination.
    pub attacker: Option<Numbered>,
    /// Leader of the defending side.
    pub target: Numbered,
    /// Where the battle happened.
    pub location: Location,
    /// An assassination rather than an attack.
    pub assassination: bool,
}

/// Side marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BattleSide {
    /// `Attackers:`
    Attacker,
    /// `Defenders:`
    Defender,
}

/// Combat statistics printed for monsters in a battle listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CombatStats {
    /// Attack level.
    pub attack: u32,
    /// Defence level.
    pub defense: u32,
    /// Attacks per round.
    pub attacks: u32,
    /// Hits to kill.
    pub hits: u32,
    /// Tactics score.
    pub tactics: u32,
}

/// An item carried into battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CombatantItem {
    /// Item and amount.
    pub stack: ItemStack,
    /// Statistics, for monsters.
    pub stats: Option<CombatStats>,
}

/// A skill shown in a battle listing: `tactics 3`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NamedLevel {
    /// Skill name.
    pub name: String,
    /// Level.
    pub level: u32,
}

/// One unit in a side listing.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BattleSideUnit {
    /// The unit.
    pub unit: Numbered,
    /// Its faction, when visible.
    pub faction: Option<Numbered>,
    /// Fights from the back.
    pub behind: bool,
    /// Items relevant to battle.
    pub items: Vec<CombatantItem>,
    /// Skills relevant to battle.
    pub skills: Vec<NamedLevel>,
}

/// Round marker.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BattleRound {
    /// A free round for the side led by this unit.
    Free(Numbered),
    /// `Round N:`
    Numbered(u32),
}

/// A shield cast during a round.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BattleShield {
    /// Caster.
    pub unit: Numbered,
    /// Shield description.
    pub description: String,
}

/// A special effect during a round.
///
/// `Other mage (314) strikes fear into enemy mounts, causing 8 mounts to
/// panic.` reads as description `strikes fear into enemy mounts`, effect
/// `causing`, count 8 and target `mounts to panic`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BattleSpecial {
    /// Soldier producing the effect.
    pub unit: Numbered,
    /// What was cast.
    pub description: String,
    /// What it did.
    pub effect: Option<String>,
    /// How many were affected.
    pub count: Option<u32>,
    /// Who was affected.
    pub target: Option<String>,
    /// A shield deflected it.
    pub deflected: bool,
}

/// Whether a soldier healed or took damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HitChange {
    /// `regenerates`
    Regenerate,
    /// `takes`
    Take,
}

/// Regeneration or damage of a many-hit soldier.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BattleRegenerate {
    /// The soldier.
    pub unit: Numbered,
    /// Healing or damage.
    pub change: HitChange,
    /// Hits changed, zero for `no`.
    pub amount: u32,
    /// Hits after the change.
    pub hits: u32,
    /// Maximum hits.
    pub max_hits: u32,
}

/// How a battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BattleResult {
    /// The loser broke and the winner gets a free round.
    Routed,
    /// The loser was wiped out.
    Destroyed,
    /// Both sides broke.
    Tie,
}

/// Battle end line.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BattleEnd {
    /// Outcome.
    pub result: BattleResult,
    /// Leader of the losing side, absent on a tie.
    pub loser: Option<Numbered>,
}

/// Undead raised after a battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BattleRaise {
    /// Undead raised.
    pub undead: Vec<ItemStack>,
    /// Wandering unit they joined, if any.
    pub joins: Option<Numbered>,
}
