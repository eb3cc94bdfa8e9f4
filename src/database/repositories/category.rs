//! Category repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::category::{Category, CreateCategoryRequest};
use crate::utils::errors::GedieError;

const CATEGORY_COLUMNS: &str = "id, user_id, name, icon, color, kind, is_active, created_at";

#[derive(Clone, Debug)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create several categories in one transaction
    pub async fn create_many(&self, requests: Vec<CreateCategoryRequest>) -> Result<Vec<Category>, GedieError> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(requests.len());

        for request in requests {
            let category = sqlx::query_as::<_, Category>(&format!(
                r#"
                INSERT INTO categories (user_id, name, icon, color, kind, created_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING {CATEGORY_COLUMNS}
                "#
            ))
            .bind(request.user_id)
            .bind(request.name)
            .bind(request.icon)
            .bind(request.color)
            .bind(request.kind)
            .bind(Utc::now())
            .fetch_one(&mut *tx)
            .await?;
            created.push(category);
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Find category by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Category>, GedieError> {
        let category = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Active categories of a user, ordered by name
    pub async fn list_active_for_user(&self, user_id: i64) -> Result<Vec<Category>, GedieError> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE user_id = $1 AND is_active = true ORDER BY name"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }
}
