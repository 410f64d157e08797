//! Integration tests for Layer 1: Orders
//!
//! Tests for the tokenizer and for whole orders files run through the
//! dispatcher.

mod files;
mod tokenizer;
