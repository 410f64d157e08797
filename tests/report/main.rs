//! Integration tests for Layer 1: Report
//!
//! Tests for the line unwrapper and for whole reports run through the
//! section state machine.

mod gm_report;
mod reader;
mod turn_report;
