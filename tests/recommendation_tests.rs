use chrono::{Duration, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use map_my_world::db;
use map_my_world::error::AppError;
use map_my_world::models::{Coordinates, NewCategory, NewLocation};
use map_my_world::repositories::{
    CategoryRepository, LocationRepository, ReviewRepository, SqliteCategoryRepository,
    SqliteLocationRepository, SqliteReviewRepository,
};
use map_my_world::services::RecommendationService;

async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    db::run_migrations(&pool).await.unwrap();
    pool
}

async fn seed_location(pool: &SqlitePool, name: &str) -> i64 {
    let repo = SqliteLocationRepository::new(pool.clone());
    let coordinates = Coordinates::new(-73.9, 40.7).unwrap();
    repo.create(NewLocation::new(name.to_string(), coordinates, None))
        .await
        .unwrap()
        .id
}

async fn seed_category(pool: &SqlitePool, name: &str) -> i64 {
    let repo = SqliteCategoryRepository::new(pool.clone());
    repo.create(NewCategory::new(name.to_string(), None))
        .await
        .unwrap()
        .id
}

fn days_ago(days: i64) -> chrono::DateTime<Utc> {
    Utc::now() - Duration::days(days)
}

#[tokio::test]
async fn ordering_puts_never_reviewed_first_then_oldest() {
    let pool = test_pool().await;
    let reviews = SqliteReviewRepository::new(pool.clone());

    let x = seed_location(&pool, "X").await;
    let y = seed_location(&pool, "Y").await;
    let a = seed_category(&pool, "A").await;
    let b = seed_category(&pool, "B").await;

    // (X, A) never reviewed; the rest reviewed at staggered ages.
    reviews.mark_as_reviewed(x, b, days_ago(45)).await.unwrap();
    reviews.mark_as_reviewed(y, a, days_ago(5)).await.unwrap();
    reviews.mark_as_reviewed(y, b, days_ago(40)).await.unwrap();

    let service = RecommendationService::new(reviews);
    let recommendations = service.get_recommendations().await.unwrap();

    // (Y, A) is fresh and excluded; never-reviewed (X, A) leads, then stale
    // pairs oldest first.
    let pairs: Vec<(i64, i64)> = recommendations
        .iter()
        .map(|r| (r.location_id, r.category_id))
        .collect();
    assert_eq!(pairs, vec![(x, a), (x, b), (y, b)]);
    assert!(recommendations[0].reviewed_at.is_none());
    assert!(recommendations[1].reviewed_at.unwrap() < recommendations[2].reviewed_at.unwrap());
}

#[tokio::test]
async fn pairs_inside_freshness_window_are_excluded() {
    let pool = test_pool().await;
    let reviews = SqliteReviewRepository::new(pool.clone());

    let x = seed_location(&pool, "X").await;
    let a = seed_category(&pool, "A").await;

    reviews.mark_as_reviewed(x, a, days_ago(29)).await.unwrap();
    let service = RecommendationService::new(reviews.clone());
    assert!(service.get_recommendations().await.unwrap().is_empty());

    reviews.mark_as_reviewed(x, a, days_ago(31)).await.unwrap();
    assert_eq!(service.get_recommendations().await.unwrap().len(), 1);
}

#[tokio::test]
async fn limit_truncates_the_candidate_set() {
    let pool = test_pool().await;
    let reviews = SqliteReviewRepository::new(pool.clone());

    // 4 locations x 3 categories = 12 unreviewed pairs.
    for name in ["L1", "L2", "L3", "L4"] {
        seed_location(&pool, name).await;
    }
    for name in ["C1", "C2", "C3"] {
        seed_category(&pool, name).await;
    }

    let cutoff = Utc::now() - Duration::days(30);
    assert_eq!(
        reviews.get_recommendations(10, cutoff).await.unwrap().len(),
        10
    );
    assert_eq!(reviews.get_recommendations(0, cutoff).await.unwrap().len(), 0);
}

#[tokio::test]
async fn empty_tables_yield_no_recommendations() {
    let pool = test_pool().await;
    let reviews = SqliteReviewRepository::new(pool.clone());
    let service = RecommendationService::new(reviews);

    // No locations and no categories at all.
    assert!(service.get_recommendations().await.unwrap().is_empty());

    // Locations without categories still produce nothing.
    seed_location(&pool, "Lonely").await;
    let service =
        RecommendationService::new(SqliteReviewRepository::new(pool.clone()));
    assert!(service.get_recommendations().await.unwrap().is_empty());
}

#[tokio::test]
async fn mark_as_reviewed_upserts_a_single_row() {
    let pool = test_pool().await;
    let reviews = SqliteReviewRepository::new(pool.clone());

    let location_id = seed_location(&pool, "X").await;
    let category_id = seed_category(&pool, "A").await;

    let first = reviews
        .mark_as_reviewed(location_id, category_id, days_ago(10))
        .await
        .unwrap();
    assert_eq!(first.reviewed_at, Some(first.created_at));

    let second = reviews
        .mark_as_reviewed(location_id, category_id, days_ago(0))
        .await
        .unwrap();

    // Same row, refreshed timestamp, created_at untouched.
    assert_eq!(second.id, first.id);
    assert_eq!(second.created_at, first.created_at);
    assert!(second.reviewed_at.unwrap() > first.reviewed_at.unwrap());

    let stored = reviews
        .get_by_pair(location_id, category_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored, second);
}

#[tokio::test]
async fn mark_as_reviewed_validates_both_foreign_keys() {
    let pool = test_pool().await;
    let reviews = SqliteReviewRepository::new(pool.clone());
    let location_id = seed_location(&pool, "X").await;
    let service = RecommendationService::new(reviews.clone());

    let err = service.mark_as_reviewed(999, 1).await.unwrap_err();
    assert!(matches!(err, AppError::LocationNotFound(999)));

    let err = service.mark_as_reviewed(location_id, 999).await.unwrap_err();
    assert!(matches!(err, AppError::CategoryNotFound(999)));

    // Neither failure created a review row.
    assert!(reviews.get_by_pair(999, 1).await.unwrap().is_none());
    assert!(reviews.get_by_pair(location_id, 999).await.unwrap().is_none());
}
