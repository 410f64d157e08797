//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Error, Attitude and Direction.

mod errors;
mod types;
