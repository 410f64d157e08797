//! The callback surface driven by [`ReportParser`](crate::ReportParser).
//!
//! [`ReportConsumer`] has one method per recognized line shape and no
//! default bodies. [`ReportLog`] implements it by recording each call as a
//! [`ReportEvent`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::events::{
    BattleEnd, BattleRaise, BattleRegenerate, BattleRound, BattleShield, BattleSide,
    BattleSideUnit, BattleSpecial, BattleStart, DeclaredAttitudes, FactionInfo, FactionMessage,
    FactionStatus, FactionWarning, ItemDef, ItemStack, Numbered, RegionExit, RegionGate,
    RegionHeader, RegionMarket, RegionStructure, RegionUnit, RegionWages, RegionWeather, SkillDef,
    StructureDef,
};

/// Receives parsed report lines.
#[allow(missing_docs)]
pub trait ReportConsumer {
    /// Every non-blank line, before comments are stripped.
    fn line(&mut self, line: &str);

    fn faction(&mut self, info: FactionInfo);
    fn faction_date(&mut self, month: String, year: u32);
    fn atlantis_version(&mut self, version: String);
    fn atlantis_rules(&mut self, name: String, version: String);
    fn faction_warning(&mut self, warning: FactionWarning);
    fn faction_status(&mut self, status: FactionStatus);
    fn faction_attitudes(&mut self, attitudes: DeclaredAttitudes);
    fn faction_unclaimed(&mut self, silver: u32);
    /// An error or event message.
    fn faction_event(&mut self, message: FactionMessage);

    fn skill(&mut self, skill: SkillDef);
    fn item(&mut self, item: ItemDef);
    fn structure(&mut self, structure: StructureDef);

    /// Starts a region. Later region calls belong to it.
    fn region(&mut self, header: RegionHeader);
    fn region_weather(&mut self, weather: RegionWeather);
    fn region_wages(&mut self, wages: RegionWages);
    fn region_market(&mut self, market: RegionMarket);
    fn region_entertainment(&mut self, amount: u32);
    fn region_products(&mut self, products: Vec<ItemStack>);
    fn region_exit(&mut self, exit: RegionExit);
    fn region_gate(&mut self, gate: RegionGate);
    fn region_structure(&mut self, structure: RegionStructure);
    fn region_unit(&mut self, unit: RegionUnit);

    /// Starts a battle. Later battle calls belong to it.
    fn battle(&mut self, start: BattleStart);
    fn battle_side(&mut self, side: BattleSide);
    fn battle_side_unit(&mut self, unit: BattleSideUnit);
    fn battle_round(&mut self, round: BattleRound);
    fn battle_round_shield(&mut self, shield: BattleShield);
    fn battle_round_special(&mut self, special: BattleSpecial);
    fn battle_round_regenerate(&mut self, regenerate: BattleRegenerate);
    /// Losses of a side, during a round or in the casualty summary.
    fn battle_loses(&mut self, unit: Numbered, losses: u32);
    fn battle_end(&mut self, end: BattleEnd);
    fn battle_casualties(&mut self);
    fn battle_casualties_heal(&mut self, unit: Numbered, healed: u32);
    fn battle_casualties_units(&mut self, units: Vec<u32>);
    fn battle_spoils(&mut self, items: Vec<ItemStack>);
    fn battle_raise(&mut self, raise: BattleRaise);
}

/// One recorded consumer call.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[allow(missing_docs)]
pub enum ReportEvent {
    Line { line: String },
    Faction(FactionInfo),
    FactionDate { month: String, year: u32 },
    AtlantisVersion { version: String },
    AtlantisRules { name: String, version: String },
    FactionWarning(FactionWarning),
    FactionStatus(FactionStatus),
    FactionAttitudes(DeclaredAttitudes),
    FactionUnclaimed { silver: u32 },
    FactionEvent(FactionMessage),
    Skill(Box<SkillDef>),
    Item(Box<ItemDef>),
    Structure(StructureDef),
    Region(RegionHeader),
    RegionWeather(RegionWeather),
    RegionWages(RegionWages),
    RegionMarket(RegionMarket),
    RegionEntertainment { amount: u32 },
    RegionProducts { products: Vec<ItemStack> },
    RegionExit(RegionExit),
    RegionGate(RegionGate),
    RegionStructure(RegionStructure),
    RegionUnit(Box<RegionUnit>),
    Battle(BattleStart),
    BattleSide(BattleSide),
    BattleSideUnit(BattleSideUnit),
    BattleRound(BattleRound),
    BattleRoundShield(BattleShield),
    BattleRoundSpecial(BattleSpecial),
    BattleRoundRegenerate(BattleRegenerate),
    BattleLoses { unit: Numbered, losses: u32 },
    BattleEnd(BattleEnd),
    BattleCasualties,
    BattleCasualtiesHeal { unit: Numbered, healed: u32 },
    BattleCasualtiesUnits { units: Vec<u32> },
    BattleSpoils { items: Vec<ItemStack> },
    BattleRaise(BattleRaise),
}

impl ReportEvent {
    /// Short name of the event, matching the consumer method.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Line { .. } => "line",
            Self::Faction(_) => "faction",
            Self::FactionDate { .. } => "faction_date",
            Self::AtlantisVersion { .. } => "atlantis_version",
            Self::AtlantisRules { .. } => "atlantis_rules",
            Self::FactionWarning(_) => "faction_warning",
            Self::FactionStatus(_) => "faction_status",
            Self::FactionAttitudes(_) => "faction_attitudes",
            Self::FactionUnclaimed { .. } => "faction_unclaimed",
            Self::FactionEvent(_) => "faction_event",
            Self::Skill(_) => "skill",
            Self::Item(_) => "item",
            Self::Structure(_) => "structure",
            Self::Region(_) => "region",
            Self::RegionWeather(_) => "region_weather",
            Self::RegionWages(_) => "region_wages",
            Self::RegionMarket(_) => "region_market",
            Self::RegionEntertainment { .. } => "region_entertainment",
            Self::RegionProducts { .. } => "region_products",
            Self::RegionExit(_) => "region_exit",
            Self::RegionGate(_) => "region_gate",
            Self::RegionStructure(_) => "region_structure",
            Self::RegionUnit(_) => "region_unit",
            Self::Battle(_) => "battle",
            Self::BattleSide(_) => "battle_side",
            Self::BattleSideUnit(_) => "battle_side_unit",
            Self::BattleRound(_) => "battle_round",
            Self::BattleRoundShield(_) => "battle_round_shield",
            Self::BattleRoundSpecial(_) => "battle_round_special",
            Self::BattleRoundRegenerate(_) => "battle_round_regenerate",
            Self::BattleLoses { .. } => "battle_loses",
            Self::BattleEnd(_) => "battle_end",
            Self::BattleCasualties => "battle_casualties",
            Self::BattleCasualtiesHeal { .. } => "battle_casualties_heal",
            Self::BattleCasualtiesUnits { .. } => "battle_casualties_units",
            Self::BattleSpoils { .. } => "battle_spoils",
            Self::BattleRaise(_) => "battle_raise",
        }
    }
}

/// A consumer that records every call it receives.
///
/// Raw lines are dropped unless the log was built with
/// [`with_lines`](Self::with_lines).
#[derive(Clone, Debug, Default)]
pub struct ReportLog {
    events: Vec<ReportEvent>,
    keep_lines: bool,
}

impl ReportLog {
    /// Creates an empty log that ignores raw lines.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty log that also records raw lines.
    #[must_use]
    pub fn with_lines() -> Self {
        Self {
            events: Vec::new(),
            keep_lines: true,
        }
    }

    /// All recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[ReportEvent] {
        &self.events
    }

    /// The most recent event.
    #[must_use]
    pub fn last(&self) -> Option<&ReportEvent> {
        self.events.last()
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Forgets every event.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Takes the recorded events, leaving the log empty.
    pub fn take(&mut self) -> Vec<ReportEvent> {
        std::mem::take(&mut self.events)
    }

    fn push(&mut self, event: ReportEvent) {
        self.events.push(event);
    }
}

impl ReportConsumer for ReportLog {
    fn line(&mut self, line: &str) {
        if self.keep_lines {
            self.push(ReportEvent::Line {
                line: line.to_owned(),
            });
        }
    }

    fn faction(&mut self, info: FactionInfo) {
        self.push(ReportEvent::Faction(info));
    }

    fn faction_date(&mut self, month: String, year: u32) {
        self.push(ReportEvent::FactionDate { month, year });
    }

    fn atlantis_version(&mut self, version: String) {
        self.push(ReportEvent::AtlantisVersion { version });
    }

    fn atlantis_rules(&mut self, name: String, version: String) {
        self.push(ReportEvent::AtlantisRules { name, version });
    }

    fn faction_warning(&mut self, warning: FactionWarning) {
        self.push(ReportEvent::FactionWarning(warning));
    }

    fn faction_status(&mut self, status: FactionStatus) {
        self.push(ReportEvent::FactionStatus(status));
    }

    fn faction_attitudes(&mut self, attitudes: DeclaredAttitudes) {
        self.push(ReportEvent::FactionAttitudes(attitudes));
    }

    fn faction_unclaimed(&mut self, silver: u32) {
        self.push(ReportEvent::FactionUnclaimed { silver });
    }

    fn faction_event(&mut self, message: FactionMessage) {
        self.push(ReportEvent::FactionEvent(message));
    }

    fn skill(&mut self, skill: SkillDef) {
        self.push(ReportEvent::Skill(Box::new(skill)));
    }

    fn item(&mut self, item: ItemDef) {
        self.push(ReportEvent::Item(Box::new(item)));
    }

    fn structure(&mut self, structure: StructureDef) {
        self.push(ReportEvent::Structure(structure));
    }

    fn region(&mut self, header: RegionHeader) {
        self.push(ReportEvent::Region(header));
    }

    fn region_weather(&mut self, weather: RegionWeather) {
        self.push(ReportEvent::RegionWeather(weather));
    }

    fn region_wages(&mut self, wages: RegionWages) {
        self.push(ReportEvent::RegionWages(wages));
    }

    fn region_market(&mut self, market: RegionMarket) {
        self.push(ReportEvent::RegionMarket(market));
    }

    fn region_entertainment(&mut self, amount: u32) {
        self.push(ReportEvent::RegionEntertainment { amount });
    }

    fn region_products(&mut self, products: Vec<ItemStack>) {
        self.push(ReportEvent::RegionProducts { products });
    }

    fn region_exit(&mut self, exit: RegionExit) {
        self.push(ReportEvent::RegionExit(exit));
    }

    fn region_gate(&mut self, gate: RegionGate) {
        self.push(ReportEvent::RegionGate(gate));
    }

    fn region_structure(&mut self, structure: RegionStructure) {
        self.push(ReportEvent::RegionStructure(structure));
    }

    fn region_unit(&mut self, unit: RegionUnit) {
        self.push(ReportEvent::RegionUnit(Box::new(unit)));
    }

    fn battle(&mut self, start: BattleStart) {
        self.push(ReportEvent::Battle(start));
    }

    fn battle_side(&mut self, side: BattleSide) {
        self.push(ReportEvent::BattleSide(side));
    }

    fn battle_side_unit(&mut self, unit: BattleSideUnit) {
        self.push(ReportEvent::BattleSideUnit(unit));
    }

    fn battle_round(&mut self, round: BattleRound) {
        self.push(ReportEvent::BattleRound(round));
    }

    fn battle_round_shield(&mut self, shield: BattleShield) {
        self.push(ReportEvent::BattleRoundShield(shield));
    }

    fn battle_round_special(&mut self, special: BattleSpecial) {
        self.push(ReportEvent::BattleRoundSpecial(special));
    }

    fn battle_round_regenerate(&mut self, regenerate: BattleRegenerate) {
        self.push(ReportEvent::BattleRoundRegenerate(regenerate));
    }

    fn battle_loses(&mut self, unit: Numbered, losses: u32) {
        self.push(ReportEvent::BattleLoses { unit, losses });
    }

    fn battle_end(&mut self, end: BattleEnd) {
        self.push(ReportEvent::BattleEnd(end));
    }

    fn battle_casualties(&mut self) {
        self.push(ReportEvent::BattleCasualties);
    }

    fn battle_casualties_heal(&mut self, unit: Numbered, healed: u32) {
        self.push(ReportEvent::BattleCasualtiesHeal { unit, healed });
    }

    fn battle_casualties_units(&mut self, units: Vec<u32>) {
        self.push(ReportEvent::BattleCasualtiesUnits { units });
    }

    fn battle_spoils(&mut self, items: Vec<ItemStack>) {
        self.push(ReportEvent::BattleSpoils { items });
    }

    fn battle_raise(&mut self, raise: BattleRaise) {
        self.push(ReportEvent::BattleRaise(raise));
    }
}
