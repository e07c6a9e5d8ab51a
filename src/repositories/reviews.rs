use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::error::AppResult;
use crate::models::{LocationCategoryReview, Recommendation};

/// Persistence contract for the review log and the recommendation query.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Returns up to `limit` location-category pairs whose review is absent,
    /// null, or older than `reviewed_before`. Never-reviewed pairs come first,
    /// then ever-reviewed pairs by ascending `reviewed_at`.
    async fn get_recommendations(
        &self,
        limit: i64,
        reviewed_before: DateTime<Utc>,
    ) -> AppResult<Vec<Recommendation>>;

    /// Upserts the review row for a pair: an existing row gets its
    /// `reviewed_at` refreshed, a new row is created with `reviewed_at` equal
    /// to `created_at`.
    async fn mark_as_reviewed(
        &self,
        location_id: i64,
        category_id: i64,
        reviewed_at: DateTime<Utc>,
    ) -> AppResult<LocationCategoryReview>;

    async fn get_by_pair(
        &self,
        location_id: i64,
        category_id: i64,
    ) -> AppResult<Option<LocationCategoryReview>>;

    async fn location_exists(&self, location_id: i64) -> AppResult<bool>;

    async fn category_exists(&self, category_id: i64) -> AppResult<bool>;
}

/// SQLite implementation of [`ReviewRepository`].
#[derive(Clone)]
pub struct SqliteReviewRepository {
    pool: SqlitePool,
}

impl SqliteReviewRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for SqliteReviewRepository {
    async fn get_recommendations(
        &self,
        limit: i64,
        reviewed_before: DateTime<Utc>,
    ) -> AppResult<Vec<Recommendation>> {
        tracing::debug!(limit, "running recommendation query");

        let rows = sqlx::query_as::<_, Recommendation>(
            "SELECT
                 l.id AS location_id,
                 l.name AS location_name,
                 l.longitude,
                 l.latitude,
                 c.id AS category_id,
                 c.name AS category_name,
                 lcr.reviewed_at
             FROM locations l
             CROSS JOIN categories c
             LEFT JOIN location_category_reviewed lcr
                 ON l.id = lcr.location_id AND c.id = lcr.category_id
             WHERE lcr.reviewed_at IS NULL
                 OR lcr.reviewed_at < ?
             ORDER BY
                 lcr.reviewed_at IS NULL DESC,
                 lcr.reviewed_at ASC
             LIMIT ?",
        )
        .bind(reviewed_before)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn mark_as_reviewed(
        &self,
        location_id: i64,
        category_id: i64,
        reviewed_at: DateTime<Utc>,
    ) -> AppResult<LocationCategoryReview> {
        tracing::debug!(location_id, category_id, "marking pair as reviewed");

        // The UNIQUE (location_id, category_id) constraint makes the
        // insert-or-update branch selection atomic; created_at is only
        // written on the insert branch.
        let review = sqlx::query_as::<_, LocationCategoryReview>(
            "INSERT INTO location_category_reviewed
                 (location_id, category_id, reviewed_at, created_at)
             VALUES (?, ?, ?, ?)
             ON CONFLICT (location_id, category_id)
                 DO UPDATE SET reviewed_at = excluded.reviewed_at
             RETURNING id, location_id, category_id, reviewed_at, created_at",
        )
        .bind(location_id)
        .bind(category_id)
        .bind(reviewed_at)
        .bind(reviewed_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(review)
    }

    async fn get_by_pair(
        &self,
        location_id: i64,
        category_id: i64,
    ) -> AppResult<Option<LocationCategoryReview>> {
        let review = sqlx::query_as::<_, LocationCategoryReview>(
            "SELECT id, location_id, category_id, reviewed_at, created_at
             FROM location_category_reviewed
             WHERE location_id = ? AND category_id = ?",
        )
        .bind(location_id)
        .bind(category_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(review)
    }

    async fn location_exists(&self, location_id: i64) -> AppResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM locations WHERE id = ?)")
                .bind(location_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn category_exists(&self, category_id: i64) -> AppResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM categories WHERE id = ?)")
                .bind(category_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}
