use sqlx::SqlitePool;

use crate::repositories::{
    SqliteCategoryRepository, SqliteLocationRepository, SqliteReviewRepository,
};
use crate::services::{CategoryService, LocationService, RecommendationService};

/// Shared application state: one service per module, each bound to its
/// SQLite repository at construction.
#[derive(Clone)]
pub struct AppState {
    pub locations: LocationService<SqliteLocationRepository>,
    pub categories: CategoryService<SqliteCategoryRepository>,
    pub recommendations: RecommendationService<SqliteReviewRepository>,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            locations: LocationService::new(SqliteLocationRepository::new(pool.clone())),
            categories: CategoryService::new(SqliteCategoryRepository::new(pool.clone())),
            recommendations: RecommendationService::new(SqliteReviewRepository::new(pool)),
        }
    }
}
