use chrono::Utc;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use map_my_world::db;
use map_my_world::models::{Coordinates, NewCategory, NewLocation};
use map_my_world::repositories::{
    CategoryRepository, LocationRepository, SqliteCategoryRepository, SqliteLocationRepository,
};

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

#[tokio::test]
async fn location_create_then_get_round_trips() {
    let pool = test_pool().await;
    let repo = SqliteLocationRepository::new(pool);

    let coordinates = Coordinates::new(-73.9654, 40.7829).unwrap();
    let created = repo
        .create(NewLocation::new(
            "Central Park".to_string(),
            coordinates,
            Some("Large public park".to_string()),
        ))
        .await
        .unwrap();

    let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
    // Field-for-field equal, timestamps included.
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn category_create_then_get_round_trips() {
    let pool = test_pool().await;
    let repo = SqliteCategoryRepository::new(pool);

    let created = repo
        .create(NewCategory::new(
            "Museums".to_string(),
            Some("Cultural institutions".to_string()),
        ))
        .await
        .unwrap();

    let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn location_exists_by_name_and_coordinates() {
    let pool = test_pool().await;
    let repo = SqliteLocationRepository::new(pool);

    let coordinates = Coordinates::new(-73.9855, 40.758).unwrap();
    repo.create(NewLocation::new(
        "Times Square".to_string(),
        coordinates,
        None,
    ))
    .await
    .unwrap();

    assert!(repo
        .exists_by_name_and_coordinates("Times Square", -73.9855, 40.758)
        .await
        .unwrap());
    // Any differing identifying field misses.
    assert!(!repo
        .exists_by_name_and_coordinates("Times Square", -73.9855, 41.0)
        .await
        .unwrap());
    assert!(!repo
        .exists_by_name_and_coordinates("times square", -73.9855, 40.758)
        .await
        .unwrap());
}

#[tokio::test]
async fn category_exists_by_name() {
    let pool = test_pool().await;
    let repo = SqliteCategoryRepository::new(pool);

    repo.create(NewCategory::new("Parks".to_string(), None))
        .await
        .unwrap();

    assert!(repo.exists_by_name("Parks").await.unwrap());
    assert!(!repo.exists_by_name("Hotels").await.unwrap());
}

#[tokio::test]
async fn get_all_filters_and_paginates() {
    let pool = test_pool().await;
    let repo = SqliteLocationRepository::new(pool);

    for (i, name) in ["Central PARK", "Harbor", "parkside", "The Park"]
        .iter()
        .enumerate()
    {
        let coordinates = Coordinates::new(i as f64, i as f64).unwrap();
        repo.create(NewLocation::new(name.to_string(), coordinates, None))
            .await
            .unwrap();
    }

    let matched = repo.get_all(None, 0, Some("park")).await.unwrap();
    let names: Vec<&str> = matched.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["Central PARK", "parkside", "The Park"]);

    // Offset then limit.
    let page = repo.get_all(Some(1), 1, Some("park")).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].name, "parkside");

    // Offset past the end yields nothing.
    let empty = repo.get_all(Some(5), 10, None).await.unwrap();
    assert!(empty.is_empty());
}

#[tokio::test]
async fn update_refreshes_fields_and_misses_unknown_ids() {
    let pool = test_pool().await;
    let repo = SqliteLocationRepository::new(pool);

    let coordinates = Coordinates::new(-73.9, 40.7).unwrap();
    let mut location = repo
        .create(NewLocation::new("Old Name".to_string(), coordinates, None))
        .await
        .unwrap();

    location.name = "New Name".to_string();
    location.description = Some("renamed".to_string());
    location.updated_at = Utc::now();

    let updated = repo.update(&location).await.unwrap().unwrap();
    assert_eq!(updated.name, "New Name");
    assert_eq!(updated.description.as_deref(), Some("renamed"));
    assert_eq!(updated.created_at, location.created_at);
    assert!(updated.updated_at >= updated.created_at);

    location.id = 999;
    assert!(repo.update(&location).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_removes_the_row_once() {
    let pool = test_pool().await;
    let repo = SqliteCategoryRepository::new(pool);

    let created = repo
        .create(NewCategory::new("Hotels".to_string(), None))
        .await
        .unwrap();

    assert!(repo.delete(created.id).await.unwrap());
    assert!(repo.get_by_id(created.id).await.unwrap().is_none());
    assert!(!repo.delete(created.id).await.unwrap());
}

#[tokio::test]
async fn category_update_and_delete_via_contract() {
    let pool = test_pool().await;
    let repo = SqliteCategoryRepository::new(pool);

    let mut category = repo
        .create(NewCategory::new("Shops".to_string(), None))
        .await
        .unwrap();

    category.description = Some("Retail destinations".to_string());
    category.updated_at = Utc::now();
    let updated = repo.update(&category).await.unwrap().unwrap();
    assert_eq!(updated.description.as_deref(), Some("Retail destinations"));

    category.id = 999;
    assert!(repo.update(&category).await.unwrap().is_none());
}
