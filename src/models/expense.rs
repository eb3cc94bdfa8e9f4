//! Expense model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Expense {
    pub id: i64,
    pub user_id: i64,
    pub category_id: i64,
    pub amount_cents: i64,
    pub description: Option<String>,
    pub spent_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Expense joined with its category for display
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExpenseView {
    pub id: i64,
    pub amount_cents: i64,
    pub description: Option<String>,
    pub spent_on: NaiveDate,
    pub category_name: String,
    pub category_icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    pub user_id: i64,
    pub category_id: i64,
    pub amount_cents: i64,
    pub description: Option<String>,
    pub spent_on: NaiveDate,
}

/// Reporting period for expense listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Today,
    Week,
    Month,
}

impl Period {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "today" => Some(Period::Today),
            "week" => Some(Period::Week),
            "month" => Some(Period::Month),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Today => "today",
            Period::Week => "week",
            Period::Month => "month",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Period::Today => "Gastos de Hoje",
            Period::Week => "Gastos desta Semana",
            Period::Month => "Gastos deste Mês",
        }
    }

    /// Inclusive date range ending on `today`; weeks start on Monday
    pub fn range(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = match self {
            Period::Today => today,
            Period::Week => today - Duration::days(today.weekday().num_days_from_monday() as i64),
            Period::Month => today.with_day(1).unwrap_or(today),
        };
        (start, today)
    }
}
