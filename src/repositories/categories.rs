use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};
use crate::models::category::CategoryRow;
use crate::models::{Category, NewCategory};

/// Persistence contract for categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, category: NewCategory) -> AppResult<Category>;

    async fn get_by_id(&self, id: i64) -> AppResult<Option<Category>>;

    /// Returns categories ordered by ascending id, filtered and paginated the
    /// same way as locations.
    async fn get_all(
        &self,
        limit: Option<i64>,
        offset: i64,
        name_filter: Option<&str>,
    ) -> AppResult<Vec<Category>>;

    async fn update(&self, category: &Category) -> AppResult<Option<Category>>;

    async fn delete(&self, id: i64) -> AppResult<bool>;

    async fn exists_by_name(&self, name: &str) -> AppResult<bool>;
}

/// SQLite implementation of [`CategoryRepository`].
#[derive(Clone)]
pub struct SqliteCategoryRepository {
    pool: SqlitePool,
}

impl SqliteCategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const CATEGORY_COLUMNS: &str = "id, name, description, created_at, updated_at";

#[async_trait]
impl CategoryRepository for SqliteCategoryRepository {
    async fn create(&self, category: NewCategory) -> AppResult<Category> {
        tracing::debug!(name = %category.name, "inserting category");

        let result = sqlx::query_as::<_, CategoryRow>(
            "INSERT INTO categories (name, description, created_at, updated_at)
             VALUES (?, ?, ?, ?)
             RETURNING id, name, description, created_at, updated_at",
        )
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.created_at)
        .bind(category.updated_at)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row.into_domain()),
            // The UNIQUE constraint on name backstops the pre-insert existence
            // check against concurrent writers.
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AppError::DuplicateCategory(category.name))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CategoryRow::into_domain))
    }

    async fn get_all(
        &self,
        limit: Option<i64>,
        offset: i64,
        name_filter: Option<&str>,
    ) -> AppResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories
             WHERE ?1 IS NULL OR instr(lower(name), lower(?1)) > 0
             ORDER BY id
             LIMIT ?2 OFFSET ?3"
        ))
        .bind(name_filter)
        .bind(limit.unwrap_or(-1))
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CategoryRow::into_domain).collect())
    }

    async fn update(&self, category: &Category) -> AppResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "UPDATE categories
             SET name = ?, description = ?, updated_at = ?
             WHERE id = ?
             RETURNING id, name, description, created_at, updated_at",
        )
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.updated_at)
        .bind(category.id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CategoryRow::into_domain))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists_by_name(&self, name: &str) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE name = ?)",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
