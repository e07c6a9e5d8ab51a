pub mod categories;
pub mod locations;
pub mod recommendations;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;

use serde::Deserialize;

use crate::error::{AppError, AppResult, FieldError};

/// Query parameters shared by the list endpoints.
#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub name: Option<String>,
}

impl ListParams {
    /// Validates the parameters and returns `(limit, offset, name_filter)`.
    ///
    /// Limit must fall in 1..=100, offset must be non-negative, and a name
    /// filter must not be empty. Violations are rejected here, before any
    /// service call.
    pub fn validate(&self) -> AppResult<(Option<i64>, i64, Option<&str>)> {
        let mut details = Vec::new();

        if let Some(limit) = self.limit {
            if !(1..=100).contains(&limit) {
                details.push(FieldError::new("limit", "Limit must be between 1 and 100"));
            }
        }

        let offset = self.offset.unwrap_or(0);
        if offset < 0 {
            details.push(FieldError::new("offset", "Offset must not be negative"));
        }

        if let Some(name) = &self.name {
            if name.is_empty() {
                details.push(FieldError::new("name", "Name filter must not be empty"));
            }
        }

        if !details.is_empty() {
            return Err(AppError::Validation(details));
        }

        Ok((self.limit, offset, self.name.as_deref()))
    }
}

/// Validates an entity name supplied on create: non-empty, at most 255 chars.
fn validate_name(name: &str) -> Vec<FieldError> {
    let mut details = Vec::new();
    if name.is_empty() {
        details.push(FieldError::new("name", "Name must not be empty"));
    } else if name.chars().count() > 255 {
        details.push(FieldError::new("name", "Name must be at most 255 characters"));
    }
    details
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_params_defaults_pass() {
        let params = ListParams::default();
        let (limit, offset, name) = params.validate().unwrap();
        assert_eq!(limit, None);
        assert_eq!(offset, 0);
        assert_eq!(name, None);
    }

    #[test]
    fn limit_out_of_range_is_rejected() {
        let params = ListParams {
            limit: Some(0),
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = ListParams {
            limit: Some(101),
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = ListParams {
            limit: Some(100),
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn negative_offset_is_rejected() {
        let params = ListParams {
            offset: Some(-1),
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn empty_name_filter_is_rejected() {
        let params = ListParams {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn name_length_bounds() {
        assert!(validate_name("Central Park").is_empty());
        assert!(!validate_name("").is_empty());
        assert!(!validate_name(&"x".repeat(256)).is_empty());
        assert!(validate_name(&"x".repeat(255)).is_empty());
    }
}
