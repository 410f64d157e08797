//! Turn report parsing for Atlantis.
//!
//! This crate reads the wrapped prose of a turn report (or a game master
//! report) and delivers every recognized line as a typed call on a
//! [`ReportConsumer`].
//!
//! # Architecture
//!
//! ```text
//! "forest (13,41) in Bidswaul, 1248 peasants
//!   (wood elves), $624."
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    UNWRAPPER    │  → one logical line per entity
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │     SECTION     │  → Regions, Handler::Region
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ ENTITY GRAMMARS │  → RegionHeader { location, town, population }
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    CONSUMER     │  → region(header)
//! └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`reader`] - Join wrapped continuation lines back together
//! - [`section`] - The report section state machine
//! - [`events`] - Typed payloads for every line shape
//! - [`special`] - Combat special effect descriptions
//! - [`faction`] - Faction header, attitudes and turn messages
//! - [`skill`] - Skill descriptions
//! - [`item`] - Item and ship descriptions
//! - [`structure`] - Object type descriptions
//! - [`region`] - Region reports, exits, structures and units
//! - [`battle`] - Battle narratives
//! - [`consumer`] - The [`ReportConsumer`] trait and the [`ReportLog`] recorder
//! - [`parser`] - The [`ReportParser`] driver

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod clause;
mod fragments;

pub mod battle;
pub mod consumer;
pub mod events;
pub mod faction;
pub mod item;
pub mod parser;
pub mod reader;
pub mod region;
pub mod section;
pub mod skill;
pub mod special;
pub mod structure;

// Re-export main types for convenience
pub use battle::parse_battle_line;
pub use consumer::{ReportConsumer, ReportEvent, ReportLog};
pub use events::{
    Armor, ArmorSave, AttackRate, BattleEnd, BattleRaise, BattleRegenerate, BattleResult,
    BattleRound, BattleShield, BattleSide, BattleSideUnit, BattleSpecial, BattleStart,
    BuildOption, Capacities, Capacity, CombatItem, CombatStats, CombatantItem, Decay,
    DeclaredAttitudes, FactionInfo, FactionMessage, FactionStatus, FactionWarning, FleetShips,
    GrantSkill, GuardMode, HitChange, Hitch, ItemDef, ItemRef, ItemStack, Location, MagicProduct,
    MarketOffer, MarketSide, MessageKind, Monster, MonsterStats, Mount, MountSkill, NamedLevel,
    Numbered, Population, Product, Production, ProductionCommand, Quantity, QuitState, Race,
    RegionExit, RegionGate, RegionHeader, RegionMarket, RegionStructure, RegionUnit, RegionWages,
    RegionWeather, Resistance, RidingBonus, Scope, ShipStats, SkillBonus, SkillDays, SkillDef,
    SkillLevel, SkillRef, SpecialText, StructureDef, StructureKind, StructureSpecial, ToolBoost,
    Town, TradeGood, UnitAttitude, UnitItem, Weapon, WeatherCause, WindBonus,
};
pub use faction::{parse_faction_line, parse_message};
pub use item::parse_item;
pub use parser::ReportParser;
pub use reader::{INDENT, ReportReader};
pub use region::parse_region_line;
pub use section::{Handler, Section};
pub use skill::parse_skill;
pub use special::{Special, parse_special};
pub use structure::parse_structure;
