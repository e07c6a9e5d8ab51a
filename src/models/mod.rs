pub mod category;
pub mod location;
pub mod review;

pub use category::{Category, NewCategory};
pub use location::{Coordinates, Location, NewLocation};
pub use review::{LocationCategoryReview, Recommendation};
