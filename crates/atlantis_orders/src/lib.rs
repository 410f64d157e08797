//! Orders file parsing for Atlantis.
//!
//! This crate turns the terse command scripts players send to the game
//! engine into typed calls on an [`OrderConsumer`].
//!
//! # Architecture
//!
//! ```text
//! "@give new 1 all unfinished wood except 13 ;ship"
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   TOKENIZER     │  → ["give", "new", "1", "all", ...], permanent, " ship"
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   DISPATCHER    │  → keyword "give", UnitRef::New, GiveWhat::Items(..)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   CONSUMER      │  → order_give(target, what, meta)
//! └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`tokenizer`] - Split a line into tokens, permanent marker and comment
//! - [`vocabulary`] - Movement words for `MOVE`, `ADVANCE` and `SAIL`
//! - [`order`] - Typed order arguments and the recorded [`Order`]
//! - [`consumer`] - The [`OrderConsumer`] trait and the [`OrderLog`] recorder
//! - [`parser`] - The [`OrdersParser`] dispatcher

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod consumer;
pub mod order;
pub mod parser;
pub mod tokenizer;
pub mod vocabulary;

// Re-export main types for convenience
pub use consumer::{OrderConsumer, OrderLog, RecordedOrder};
pub use order::{
    Amount, BuildTarget, Consuming, DeclareTarget, DescribeTarget, ExchangeSide, FindTarget,
    GameOption, GiveWhat, JoinMode, KEYWORDS, MoveStep, NameTarget, Order, OrderMeta, RevealMode,
    ShowTarget, Spoils, TemplateFormat, Transfer, UnitRef,
};
pub use parser::OrdersParser;
pub use tokenizer::TokenStream;
pub use vocabulary::{DirectionWord, Directions};
