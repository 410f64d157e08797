//! Sessions, rendering, REPL and CLI for the Atlantis parsers.
//!
//! This crate provides:
//! - [`RuntimeConfig`] - Settings shared by every entry point
//! - [`Session`] - Report and orders files parsed into event logs
//! - [`render`] - Text and JSON output of parsed events
//! - [`Repl`] - Interactive orders checker
//! - The `atlantis` command line tool

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod editor;
pub mod highlight;
pub mod render;
pub mod repl;
pub mod session;

pub use config::{OutputFormat, RuntimeConfig};
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use highlight::OrdersHighlighter;
pub use repl::Repl;
pub use session::Session;
