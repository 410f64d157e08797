//! The callback surface driven by [`OrdersParser`](crate::OrdersParser).
//!
//! [`OrderConsumer`] has one method per order keyword and no default
//! bodies, so an implementation that forgets an order does not compile.
//! [`OrderLog`] is a ready-made consumer that records every call as an
//! [`Order`].

use std::collections::BTreeMap;

use atlantis_foundation::Attitude;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::order::{
    Amount, BuildTarget, Consuming, DeclareTarget, DescribeTarget, ExchangeSide, FindTarget,
    GameOption, GiveWhat, JoinMode, MoveStep, NameTarget, Order, OrderMeta, RevealMode,
    ShowTarget, Spoils, Transfer, UnitRef,
};

/// Receives parsed orders, one call per recognized line.
#[allow(missing_docs)]
pub trait OrderConsumer {
    /// A line holding only a comment.
    fn comment(&mut self, permanent: bool, comment: String);
    /// `#atlantis faction [password]` opens a faction's orders.
    fn atlantis(&mut self, faction: u32, password: Option<String>);
    /// `#end` closes a faction's orders.
    fn atlantis_end(&mut self);
    /// `unit n` starts the orders of a unit.
    fn unit(&mut self, unit: u32);

    fn order_form(&mut self, alias: u32, meta: OrderMeta);
    fn order_end(&mut self);
    fn order_turn(&mut self, meta: OrderMeta);
    fn order_endturn(&mut self);
    fn order_address(&mut self, address: String, meta: OrderMeta);
    fn order_advance(&mut self, steps: Vec<MoveStep>, meta: OrderMeta);
    fn order_assassinate(&mut self, unit: UnitRef, meta: OrderMeta);
    /// Also called with the targets read so far when a later target is malformed.
    fn order_attack(&mut self, targets: Vec<UnitRef>, meta: OrderMeta);
    fn order_autotax(&mut self, flag: bool, meta: OrderMeta);
    fn order_avoid(&mut self, flag: bool, meta: OrderMeta);
    fn order_idle(&mut self, meta: OrderMeta);
    fn order_behind(&mut self, flag: bool, meta: OrderMeta);
    fn order_build(&mut self, target: BuildTarget, meta: OrderMeta);
    fn order_buy(&mut self, amount: Amount, item: String, meta: OrderMeta);
    fn order_cast(&mut self, skill: String, params: Vec<String>, meta: OrderMeta);
    fn order_claim(&mut self, amount: u32, meta: OrderMeta);
    fn order_combat(&mut self, skill: Option<String>, meta: OrderMeta);
    fn order_consume(&mut self, consuming: Option<Consuming>, meta: OrderMeta);
    fn order_declare(&mut self, faction: DeclareTarget, attitude: Option<Attitude>, meta: OrderMeta);
    fn order_describe(&mut self, target: DescribeTarget, meta: OrderMeta);
    fn order_destroy(&mut self, meta: OrderMeta);
    fn order_enter(&mut self, structure: u32, meta: OrderMeta);
    fn order_entertain(&mut self, meta: OrderMeta);
    /// Also called with the targets read so far when a later target is malformed.
    fn order_evict(&mut self, targets: Vec<UnitRef>, meta: OrderMeta);
    fn order_exchange(
        &mut self,
        target: UnitRef,
        give: ExchangeSide,
        expected: ExchangeSide,
        meta: OrderMeta,
    );
    fn order_faction(&mut self, points: BTreeMap<String, u32>, meta: OrderMeta);
    fn order_find(&mut self, target: FindTarget, meta: OrderMeta);
    fn order_forget(&mut self, skill: String, meta: OrderMeta);
    fn order_withdraw(&mut self, amount: u32, item: String, meta: OrderMeta);
    fn order_give(&mut self, target: UnitRef, what: GiveWhat, meta: OrderMeta);
    fn order_guard(&mut self, flag: bool, meta: OrderMeta);
    fn order_hold(&mut self, flag: bool, meta: OrderMeta);
    fn order_join(&mut self, target: UnitRef, mode: Option<JoinMode>, meta: OrderMeta);
    fn order_leave(&mut self, meta: OrderMeta);
    fn order_move(&mut self, steps: Vec<MoveStep>, meta: OrderMeta);
    fn order_name(&mut self, target: NameTarget, meta: OrderMeta);
    fn order_noaid(&mut self, flag: bool, meta: OrderMeta);
    fn order_nocross(&mut self, flag: bool, meta: OrderMeta);
    fn order_option(&mut self, option: GameOption, meta: OrderMeta);
    fn order_password(&mut self, password: String, meta: OrderMeta);
    fn order_pillage(&mut self, meta: OrderMeta);
    fn order_prepare(&mut self, item: Option<String>, meta: OrderMeta);
    fn order_weapon(&mut self, items: Vec<String>, meta: OrderMeta);
    fn order_armor(&mut self, items: Vec<String>, meta: OrderMeta);
    fn order_produce(&mut self, target: Option<u32>, item: String, meta: OrderMeta);
    fn order_promote(&mut self, unit: UnitRef, meta: OrderMeta);
    fn order_quit(&mut self, password: Option<String>, meta: OrderMeta);
    fn order_restart(&mut self, password: Option<String>, meta: OrderMeta);
    fn order_reveal(&mut self, reveal: Option<RevealMode>, meta: OrderMeta);
    fn order_sail(&mut self, steps: Vec<MoveStep>, meta: OrderMeta);
    fn order_sell(&mut self, amount: Amount, item: String, meta: OrderMeta);
    fn order_share(&mut self, flag: bool, meta: OrderMeta);
    fn order_show(&mut self, target: ShowTarget, meta: OrderMeta);
    fn order_spoils(&mut self, spoils: Spoils, meta: OrderMeta);
    fn order_steal(&mut self, target: UnitRef, item: String, meta: OrderMeta);
    fn order_study(&mut self, skill: String, level: Option<u32>, meta: OrderMeta);
    fn order_takefrom(&mut self, target: UnitRef, transfer: Transfer, meta: OrderMeta);
    fn order_tax(&mut self, meta: OrderMeta);
    /// Also called with the targets read so far when a later target is malformed.
    fn order_teach(&mut self, targets: Vec<UnitRef>, meta: OrderMeta);
    fn order_work(&mut self, meta: OrderMeta);
    fn order_transport(&mut self, target: UnitRef, transfer: Transfer, meta: OrderMeta);
    fn order_distribute(&mut self, target: UnitRef, transfer: Transfer, meta: OrderMeta);
}

/// An order together with its line metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RecordedOrder {
    /// The order.
    pub order: Order,
    /// Permanent marker and comment.
    pub meta: OrderMeta,
}

/// A consumer that records every order it receives.
#[derive(Clone, Debug, Default)]
pub struct OrderLog {
    entries: Vec<RecordedOrder>,
}

impl OrderLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[RecordedOrder] {
        &self.entries
    }

    /// The most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<&RecordedOrder> {
        self.entries.last()
    }

    /// The recorded orders without their metadata.
    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.entries.iter().map(|e| &e.order)
    }

    /// Number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forgets every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Takes the recorded entries, leaving the log empty.
    pub fn take(&mut self) -> Vec<RecordedOrder> {
        std::mem::take(&mut self.entries)
    }

    fn push(&mut self, order: Order, meta: OrderMeta) {
        self.entries.push(RecordedOrder { order, meta });
    }

    fn push_bare(&mut self, order: Order) {
        self.push(order, OrderMeta::default());
    }
}

impl OrderConsumer for OrderLog {
    fn comment(&mut self, permanent: bool, comment: String) {
        self.push(
            Order::Comment {
                permanent,
                comment: comment.clone(),
            },
            OrderMeta::new(permanent, Some(comment)),
        );
    }

    fn atlantis(&mut self, faction: u32, password: Option<String>) {
        self.push_bare(Order::Atlantis { faction, password });
    }

    fn atlantis_end(&mut self) {
        self.push_bare(Order::AtlantisEnd);
    }

    fn unit(&mut self, unit: u32) {
        self.push_bare(Order::Unit { unit });
    }

    fn order_form(&mut self, alias: u32, meta: OrderMeta) {
        self.push(Order::Form { alias }, meta);
    }

    fn order_end(&mut self) {
        self.push_bare(Order::End);
    }

    fn order_turn(&mut self, meta: OrderMeta) {
        self.push(Order::Turn, meta);
    }

    fn order_endturn(&mut self) {
        self.push_bare(Order::EndTurn);
    }

    fn order_address(&mut self, address: String, meta: OrderMeta) {
        self.push(Order::Address { address }, meta);
    }

    fn order_advance(&mut self, steps: Vec<MoveStep>, meta: OrderMeta) {
        self.push(Order::Advance { steps }, meta);
    }

    fn order_assassinate(&mut self, unit: UnitRef, meta: OrderMeta) {
        self.push(Order::Assassinate { unit }, meta);
    }

    fn order_attack(&mut self, targets: Vec<UnitRef>, meta: OrderMeta) {
        self.push(Order::Attack { targets }, meta);
    }

    fn order_autotax(&mut self, flag: bool, meta: OrderMeta) {
        self.push(Order::Autotax { flag }, meta);
    }

    fn order_avoid(&mut self, flag: bool, meta: OrderMeta) {
        self.push(Order::Avoid { flag }, meta);
    }

    fn order_idle(&mut self, meta: OrderMeta) {
        self.push(Order::Idle, meta);
    }

    fn order_behind(&mut self, flag: bool, meta: OrderMeta) {
        self.push(Order::Behind { flag }, meta);
    }

    fn order_build(&mut self, target: BuildTarget, meta: OrderMeta) {
        self.push(Order::Build { target }, meta);
    }

    fn order_buy(&mut self, amount: Amount, item: String, meta: OrderMeta) {
        self.push(Order::Buy { amount, item }, meta);
    }

    fn order_cast(&mut self, skill: String, params: Vec<String>, meta: OrderMeta) {
        self.push(Order::Cast { skill, params }, meta);
    }

    fn order_claim(&mut self, amount: u32, meta: OrderMeta) {
        self.push(Order::Claim { amount }, meta);
    }

    fn order_combat(&mut self, skill: Option<String>, meta: OrderMeta) {
        self.push(Order::Combat { skill }, meta);
    }

    fn order_consume(&mut self, consuming: Option<Consuming>, meta: OrderMeta) {
        self.push(Order::Consume { consuming }, meta);
    }

    fn order_declare(&mut self, faction: DeclareTarget, attitude: Option<Attitude>, meta: OrderMeta) {
        self.push(Order::Declare { faction, attitude }, meta);
    }

    fn order_describe(&mut self, target: DescribeTarget, meta: OrderMeta) {
        self.push(Order::Describe { target }, meta);
    }

    fn order_destroy(&mut self, meta: OrderMeta) {
        self.push(Order::Destroy, meta);
    }

    fn order_enter(&mut self, structure: u32, meta: OrderMeta) {
        self.push(Order::Enter { structure }, meta);
    }

    fn order_entertain(&mut self, meta: OrderMeta) {
        self.push(Order::Entertain, meta);
    }

    fn order_evict(&mut self, targets: Vec<UnitRef>, meta: OrderMeta) {
        self.push(Order::Evict { targets }, meta);
    }

    fn order_exchange(
        &mut self,
        target: UnitRef,
        give: ExchangeSide,
        expected: ExchangeSide,
        meta: OrderMeta,
    ) {
        self.push(
            Order::Exchange {
                target,
                give,
                expected,
            },
            meta,
        );
    }

    fn order_faction(&mut self, points: BTreeMap<String, u32>, meta: OrderMeta) {
        self.push(Order::Faction { points }, meta);
    }

    fn order_find(&mut self, target: FindTarget, meta: OrderMeta) {
        self.push(Order::Find { target }, meta);
    }

    fn order_forget(&mut self, skill: String, meta: OrderMeta) {
        self.push(Order::Forget { skill }, meta);
    }

    fn order_withdraw(&mut self, amount: u32, item: String, meta: OrderMeta) {
        self.push(Order::Withdraw { amount, item }, meta);
    }

    fn order_give(&mut self, target: UnitRef, what: GiveWhat, meta: OrderMeta) {
        self.push(Order::Give { target, what }, meta);
    }

    fn order_guard(&mut self, flag: bool, meta: OrderMeta) {
        self.push(Order::Guard { flag }, meta);
    }

    fn order_hold(&mut self, flag: bool, meta: OrderMeta) {
        self.push(Order::Hold { flag }, meta);
    }

    fn order_join(&mut self, target: UnitRef, mode: Option<JoinMode>, meta: OrderMeta) {
        self.push(Order::Join { target, mode }, meta);
    }

    fn order_leave(&mut self, meta: OrderMeta) {
        self.push(Order::Leave, meta);
    }

    fn order_move(&mut self, steps: Vec<MoveStep>, meta: OrderMeta) {
        self.push(Order::Move { steps }, meta);
    }

    fn order_name(&mut self, target: NameTarget, meta: OrderMeta) {
        self.push(Order::Name { target }, meta);
    }

    fn order_noaid(&mut self, flag: bool, meta: OrderMeta) {
        self.push(Order::NoAid { flag }, meta);
    }

    fn order_nocross(&mut self, flag: bool, meta: OrderMeta) {
        self.push(Order::NoCross { flag }, meta);
    }

    fn order_option(&mut self, option: GameOption, meta: OrderMeta) {
        self.push(Order::Option { option }, meta);
    }

    fn order_password(&mut self, password: String, meta: OrderMeta) {
        self.push(Order::Password { password }, meta);
    }

    fn order_pillage(&mut self, meta: OrderMeta) {
        self.push(Order::Pillage, meta);
    }

    fn order_prepare(&mut self, item: Option<String>, meta: OrderMeta) {
        self.push(Order::Prepare { item }, meta);
    }

    fn order_weapon(&mut self, items: Vec<String>, meta: OrderMeta) {
        self.push(Order::Weapon { items }, meta);
    }

    fn order_armor(&mut self, items: Vec<String>, meta: OrderMeta) {
        self.push(Order::Armor { items }, meta);
    }

    fn order_produce(&mut self, target: Option<u32>, item: String, meta: OrderMeta) {
        self.push(Order::Produce { target, item }, meta);
    }

    fn order_promote(&mut self, unit: UnitRef, meta: OrderMeta) {
        self.push(Order::Promote { unit }, meta);
    }

    fn order_quit(&mut self, password: Option<String>, meta: OrderMeta) {
        self.push(Order::Quit { password }, meta);
    }

    fn order_restart(&mut self, password: Option<String>, meta: OrderMeta) {
        self.push(Order::Restart { password }, meta);
    }

    fn order_reveal(&mut self, reveal: Option<RevealMode>, meta: OrderMeta) {
        self.push(Order::Reveal { reveal }, meta);
    }

    fn order_sail(&mut self, steps: Vec<MoveStep>, meta: OrderMeta) {
        self.push(Order::Sail { steps }, meta);
    }

    fn order_sell(&mut self, amount: Amount, item: String, meta: OrderMeta) {
        self.push(Order::Sell { amount, item }, meta);
    }

    fn order_share(&mut self, flag: bool, meta: OrderMeta) {
        self.push(Order::Share { flag }, meta);
    }

    fn order_show(&mut self, target: ShowTarget, meta: OrderMeta) {
        self.push(Order::Show { target }, meta);
    }

    fn order_spoils(&mut self, spoils: Spoils, meta: OrderMeta) {
        self.push(Order::Spoils { spoils }, meta);
    }

    fn order_steal(&mut self, target: UnitRef, item: String, meta: OrderMeta) {
        self.push(Order::Steal { target, item }, meta);
    }

    fn order_study(&mut self, skill: String, level: Option<u32>, meta: OrderMeta) {
        self.push(Order::Study { skill, level }, meta);
    }

    fn order_takefrom(&mut self, target: UnitRef, transfer: Transfer, meta: OrderMeta) {
        self.push(Order::TakeFrom { target, transfer }, meta);
    }

    fn order_tax(&mut self, meta: OrderMeta) {
        self.push(Order::Tax, meta);
    }

    fn order_teach(&mut self, targets: Vec<UnitRef>, meta: OrderMeta) {
        self.push(Order::Teach { targets }, meta);
    }

    fn order_work(&mut self, meta: OrderMeta) {
        self.push(Order::Work, meta);
    }

    fn order_transport(&mut self, target: UnitRef, transfer: Transfer, meta: OrderMeta) {
        self.push(Order::Transport { target, transfer }, meta);
    }

    fn order_distribute(&mut self, target: UnitRef, transfer: Transfer, meta: OrderMeta) {
        self.push(Order::Distribute { target, transfer }, meta);
    }
}
