//! Persistence collaborator used by the dialogue
//!
//! The dialogue only consults the ledger to look up users and categories and,
//! at the terminal transition, to store the expense. `DatabaseService` is the
//! PostgreSQL implementation.

use async_trait::async_trait;
use chrono::NaiveDate;
use crate::models::{Category, CreateExpenseRequest, Expense, ExpenseView, User};
use crate::utils::errors::Result;

#[async_trait]
pub trait Ledger: Send + Sync {
    /// Find the user by Telegram ID, registering them with the default categories if new
    async fn get_or_create_user(&self, telegram_id: i64, name: &str) -> Result<User>;

    async fn find_user(&self, telegram_id: i64) -> Result<Option<User>>;

    /// Active categories of a user
    async fn list_categories(&self, user_id: i64) -> Result<Vec<Category>>;

    async fn find_category(&self, category_id: i64) -> Result<Option<Category>>;

    async fn create_expense(&self, request: CreateExpenseRequest) -> Result<Expense>;

    /// Expenses between two dates (inclusive), newest first
    async fn list_expenses(&self, user_id: i64, from: NaiveDate, to: NaiveDate) -> Result<Vec<ExpenseView>>;

    async fn set_access_code(&self, user_id: i64, access_code: &str) -> Result<User>;
}
