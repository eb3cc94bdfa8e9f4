//! In-memory `Ledger` used instead of PostgreSQL in tests

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use gedie::models::{
    default_categories, Category, CreateExpenseRequest, Expense, ExpenseView, User,
};
use gedie::services::Ledger;
use gedie::utils::errors::{GedieError, Result};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    categories: Vec<Category>,
    expenses: Vec<Expense>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemoryLedger {
    tables: Mutex<Tables>,
    fail_writes: AtomicBool,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `create_expense` fail until switched back
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn expenses(&self) -> Vec<Expense> {
        self.tables.lock().unwrap().expenses.clone()
    }

    pub fn categories_of(&self, user_id: i64) -> Vec<Category> {
        self.tables
            .lock()
            .unwrap()
            .categories
            .iter()
            .filter(|category| category.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn deactivate_category(&self, category_id: i64) {
        let mut tables = self.tables.lock().unwrap();
        if let Some(category) = tables.categories.iter_mut().find(|c| c.id == category_id) {
            category.is_active = false;
        }
    }

    pub fn remove_category(&self, category_id: i64) {
        self.tables.lock().unwrap().categories.retain(|c| c.id != category_id);
    }

    /// Insert an expense dated `spent_on` directly, bypassing the dialogue
    pub fn insert_expense(&self, user_id: i64, category_id: i64, amount_cents: i64, spent_on: NaiveDate) {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        tables.expenses.push(Expense {
            id,
            user_id,
            category_id,
            amount_cents,
            description: None,
            spent_on,
            created_at: Utc::now(),
        });
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn get_or_create_user(&self, telegram_id: i64, name: &str) -> Result<User> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(user) = tables.users.iter().find(|u| u.telegram_id == telegram_id) {
            return Ok(user.clone());
        }

        let user = User {
            id: tables.next_id(),
            telegram_id,
            name: name.to_string(),
            access_code: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        tables.users.push(user.clone());

        for request in default_categories(user.id) {
            let id = tables.next_id();
            tables.categories.push(Category {
                id,
                user_id: request.user_id,
                name: request.name,
                icon: request.icon,
                color: request.color,
                kind: request.kind,
                is_active: true,
                created_at: Utc::now(),
            });
        }

        Ok(user)
    }

    async fn find_user(&self, telegram_id: i64) -> Result<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.telegram_id == telegram_id).cloned())
    }

    async fn list_categories(&self, user_id: i64) -> Result<Vec<Category>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .categories
            .iter()
            .filter(|c| c.user_id == user_id && c.is_active)
            .cloned()
            .collect())
    }

    async fn find_category(&self, category_id: i64) -> Result<Option<Category>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.categories.iter().find(|c| c.id == category_id).cloned())
    }

    async fn create_expense(&self, request: CreateExpenseRequest) -> Result<Expense> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(GedieError::Database(sqlx::Error::PoolTimedOut));
        }

        let mut tables = self.tables.lock().unwrap();
        let expense = Expense {
            id: tables.next_id(),
            user_id: request.user_id,
            category_id: request.category_id,
            amount_cents: request.amount_cents,
            description: request.description,
            spent_on: request.spent_on,
            created_at: Utc::now(),
        };
        tables.expenses.push(expense.clone());
        Ok(expense)
    }

    async fn list_expenses(&self, user_id: i64, from: NaiveDate, to: NaiveDate) -> Result<Vec<ExpenseView>> {
        let tables = self.tables.lock().unwrap();
        let mut views: Vec<ExpenseView> = tables
            .expenses
            .iter()
            .filter(|e| e.user_id == user_id && e.spent_on >= from && e.spent_on <= to)
            .filter_map(|e| {
                let category = tables.categories.iter().find(|c| c.id == e.category_id)?;
                Some(ExpenseView {
                    id: e.id,
                    amount_cents: e.amount_cents,
                    description: e.description.clone(),
                    spent_on: e.spent_on,
                    category_name: category.name.clone(),
                    category_icon: category.icon.clone(),
                })
            })
            .collect();
        views.sort_by(|a, b| b.spent_on.cmp(&a.spent_on));
        Ok(views)
    }

    async fn set_access_code(&self, user_id: i64, access_code: &str) -> Result<User> {
        let mut tables = self.tables.lock().unwrap();
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(GedieError::UserNotFound { user_id })?;
        user.access_code = Some(access_code.to_string());
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}
