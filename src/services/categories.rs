use crate::error::{AppError, AppResult};
use crate::models::{Category, NewCategory};
use crate::repositories::CategoryRepository;

/// Use cases for categories.
#[derive(Clone)]
pub struct CategoryService<R> {
    repository: R,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Creates a category; the name must not already be taken.
    pub async fn create(&self, name: String, description: Option<String>) -> AppResult<Category> {
        tracing::info!(name = %name, "creating category");

        if self.repository.exists_by_name(&name).await? {
            tracing::warn!(name = %name, "duplicate category");
            return Err(AppError::DuplicateCategory(name));
        }

        let created = self
            .repository
            .create(NewCategory::new(name, description))
            .await?;

        tracing::info!(id = created.id, "category created");
        Ok(created)
    }

    pub async fn list(
        &self,
        limit: Option<i64>,
        offset: i64,
        name_filter: Option<&str>,
    ) -> AppResult<Vec<Category>> {
        tracing::info!(?limit, offset, ?name_filter, "listing categories");
        self.repository.get_all(limit, offset, name_filter).await
    }
}
