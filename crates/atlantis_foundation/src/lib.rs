//! Core error and value types for the Atlantis parsers.
//!
//! This crate provides:
//! - [`Error`] - Rich error types with context
//! - [`Attitude`] - Faction stance toward other factions
//! - [`Direction`] - The six hex directions of the game map

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod types;

pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use types::{Attitude, Direction};
