//! Services module
//!
//! Contracts for the collaborators the dialogue depends on

pub mod ledger;
pub mod receipt_analyzer;

pub use ledger::Ledger;
pub use receipt_analyzer::ReceiptAnalyzer;
