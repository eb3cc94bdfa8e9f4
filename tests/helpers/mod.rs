//! Test helpers module
//!
//! In-memory ledger, a canned receipt analyzer and a ready-wired dialogue
//! for integration tests.

#![allow(dead_code)]

pub mod memory_ledger;
pub mod stub_analyzer;
pub mod test_context;

pub use memory_ledger::*;
pub use stub_analyzer::*;
pub use test_context::*;
