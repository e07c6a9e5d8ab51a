pub mod categories;
pub mod locations;
pub mod recommendations;

pub use categories::CategoryService;
pub use locations::LocationService;
pub use recommendations::{RecommendationService, RECOMMENDATION_LIMIT, REVIEW_FRESHNESS_DAYS};
