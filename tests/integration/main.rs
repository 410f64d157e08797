//! Cross-layer integration tests for Atlantis
//!
//! Tests that verify correct interaction between multiple crates.

mod render;
mod template;
