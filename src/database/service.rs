//! Database service layer
//!
//! This module provides a high-level interface to database operations and
//! implements the `Ledger` used by the dialogue.

use std::time::Instant;
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::info;
use crate::database::{DatabasePool, UserRepository, CategoryRepository, ExpenseRepository};
use crate::models::*;
use crate::services::Ledger;
use crate::utils::errors::Result;
use crate::utils::logging::log_database_operation;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub users: UserRepository,
    pub categories: CategoryRepository,
    pub expenses: ExpenseRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            categories: CategoryRepository::new(pool.clone()),
            expenses: ExpenseRepository::new(pool),
        }
    }
}

#[async_trait]
impl Ledger for DatabaseService {
    async fn get_or_create_user(&self, telegram_id: i64, name: &str) -> Result<User> {
        if let Some(existing_user) = self.users.find_by_telegram_id(telegram_id).await? {
            return Ok(existing_user);
        }

        let user = self.users.create(CreateUserRequest {
            telegram_id,
            name: name.to_string(),
        }).await?;

        let categories = self.categories.create_many(default_categories(user.id)).await?;
        info!(user_id = user.id, telegram_id = telegram_id, categories = categories.len(),
              "New user registered with default categories");

        Ok(user)
    }

    async fn find_user(&self, telegram_id: i64) -> Result<Option<User>> {
        self.users.find_by_telegram_id(telegram_id).await
    }

    async fn list_categories(&self, user_id: i64) -> Result<Vec<Category>> {
        self.categories.list_active_for_user(user_id).await
    }

    async fn find_category(&self, category_id: i64) -> Result<Option<Category>> {
        self.categories.find_by_id(category_id).await
    }

    async fn create_expense(&self, request: CreateExpenseRequest) -> Result<Expense> {
        let started = Instant::now();
        let result = self.expenses.create(request).await;
        log_database_operation(
            "insert",
            "expenses",
            started.elapsed().as_millis() as u64,
            result.is_ok(),
        );
        result
    }

    async fn list_expenses(&self, user_id: i64, from: NaiveDate, to: NaiveDate) -> Result<Vec<ExpenseView>> {
        self.expenses.list_for_user(user_id, from, to).await
    }

    async fn set_access_code(&self, user_id: i64, access_code: &str) -> Result<User> {
        self.users.set_access_code(user_id, access_code).await
    }
}
