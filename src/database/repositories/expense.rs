//! Expense repository implementation

use sqlx::PgPool;
use chrono::{NaiveDate, Utc};
use crate::models::expense::{Expense, ExpenseView, CreateExpenseRequest};
use crate::utils::errors::GedieError;

#[derive(Clone, Debug)]
pub struct ExpenseRepository {
    pool: PgPool,
}

impl ExpenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new expense
    pub async fn create(&self, request: CreateExpenseRequest) -> Result<Expense, GedieError> {
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses (user_id, category_id, amount_cents, description, spent_on, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, category_id, amount_cents, description, spent_on, created_at
            "#
        )
        .bind(request.user_id)
        .bind(request.category_id)
        .bind(request.amount_cents)
        .bind(request.description)
        .bind(request.spent_on)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(expense)
    }

    /// Expenses of a user between two dates (inclusive), newest first
    pub async fn list_for_user(&self, user_id: i64, from: NaiveDate, to: NaiveDate) -> Result<Vec<ExpenseView>, GedieError> {
        let expenses = sqlx::query_as::<_, ExpenseView>(
            r#"
            SELECT e.id, e.amount_cents, e.description, e.spent_on,
                   c.name AS category_name, c.icon AS category_icon
            FROM expenses e
            JOIN categories c ON c.id = e.category_id
            WHERE e.user_id = $1 AND e.spent_on BETWEEN $2 AND $3
            ORDER BY e.spent_on DESC, e.created_at DESC
            "#
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }
}
