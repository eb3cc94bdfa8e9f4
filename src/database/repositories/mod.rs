//! Database repositories module
//! 
//! This module contains all repository implementations for data access

pub mod user;
pub mod category;
pub mod expense;

// Re-export repositories
pub use user::UserRepository;
pub use category::CategoryRepository;
pub use expense::ExpenseRepository;
