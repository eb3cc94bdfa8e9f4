//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod user;
pub mod category;
pub mod expense;
pub mod receipt;

// Re-export commonly used models
pub use user::{User, CreateUserRequest};
pub use category::{Category, CategoryKind, CreateCategoryRequest, DEFAULT_CATEGORIES, default_categories};
pub use expense::{Expense, ExpenseView, CreateExpenseRequest, Period};
pub use receipt::{ReceiptAnalysis, ConfidenceLevel};
