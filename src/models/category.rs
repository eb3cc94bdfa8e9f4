//! Category model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Whether a category books money going out or coming in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "category_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Expense,
    Income,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub kind: CategoryKind,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Icon and name, e.g. `🍔 Alimentação`
    pub fn label(&self) -> String {
        format!("{} {}", self.icon, self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub user_id: i64,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub kind: CategoryKind,
}

/// Categories every new user starts with: (name, icon, color)
pub const DEFAULT_CATEGORIES: [(&str, &str, &str); 8] = [
    ("Alimentação", "🍔", "#e74c3c"),
    ("Transporte", "🚗", "#3498db"),
    ("Casa", "🏠", "#2ecc71"),
    ("Saúde", "💊", "#e67e22"),
    ("Lazer", "🎬", "#9b59b6"),
    ("Roupas", "👕", "#f39c12"),
    ("Educação", "📚", "#34495e"),
    ("Outros", "💳", "#95a5a6"),
];

/// Requests that create the default categories for `user_id`
pub fn default_categories(user_id: i64) -> Vec<CreateCategoryRequest> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(name, icon, color)| CreateCategoryRequest {
            user_id,
            name: name.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
            kind: CategoryKind::Expense,
        })
        .collect()
}
