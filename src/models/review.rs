use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A review-log row joining one location to one category.
///
/// At most one row exists per (location_id, category_id) pair. A null
/// `reviewed_at` means the pair has never been reviewed; `created_at` is set
/// once when the row first appears.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct LocationCategoryReview {
    pub id: i64,
    pub location_id: i64,
    pub category_id: i64,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// One location-category pair needing attention, as produced by the
/// recommendation query.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Recommendation {
    pub location_id: i64,
    pub location_name: String,
    pub longitude: f64,
    pub latitude: f64,
    pub category_id: i64,
    pub category_name: String,
    pub reviewed_at: Option<DateTime<Utc>>,
}
