//! Atlantis - Turn report and orders parsers for the Atlantis PBEM game
//!
//! This crate re-exports all layers of the Atlantis parsers for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: atlantis_runtime    - Sessions, rendering, REPL, CLI
//! Layer 1: atlantis_report     - Report unwrapper, sections, entity grammars
//!          atlantis_orders     - Orders tokenizer and dispatcher
//! Layer 0: atlantis_foundation - Core types (Error, Attitude, Direction)
//! ```

pub use atlantis_foundation as foundation;
pub use atlantis_orders as orders;
pub use atlantis_report as report;
pub use atlantis_runtime as runtime;
