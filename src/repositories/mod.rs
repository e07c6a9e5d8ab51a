pub mod categories;
pub mod locations;
pub mod reviews;

pub use categories::{CategoryRepository, SqliteCategoryRepository};
pub use locations::{LocationRepository, SqliteLocationRepository};
pub use reviews::{ReviewRepository, SqliteReviewRepository};
