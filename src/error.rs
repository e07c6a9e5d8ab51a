use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

/// A single field-level detail attached to an error response.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Location with ID {0} not found")]
    LocationNotFound(i64),

    #[error("Category with ID {0} not found")]
    CategoryNotFound(i64),

    #[error("Location with name '{name}' already exists at coordinates ({longitude}, {latitude})")]
    DuplicateLocation {
        name: String,
        longitude: f64,
        latitude: f64,
    },

    #[error("Category with name '{0}' already exists")]
    DuplicateCategory(String),

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Field-level details reported alongside the error string.
    fn details(&self) -> Vec<FieldError> {
        match self {
            AppError::LocationNotFound(id) => vec![FieldError::new(
                "location_id",
                format!("Location with ID {id} does not exist"),
            )],
            AppError::CategoryNotFound(id) => vec![FieldError::new(
                "category_id",
                format!("Category with ID {id} does not exist"),
            )],
            AppError::DuplicateLocation {
                name,
                longitude,
                latitude,
            } => vec![
                FieldError::new("name", format!("Location with name '{name}' already exists")),
                FieldError::new(
                    "coordinates",
                    format!("Coordinates ({longitude}, {latitude}) already in use"),
                ),
            ],
            AppError::DuplicateCategory(name) => vec![FieldError::new(
                "name",
                format!("Category with name '{name}' already exists"),
            )],
            AppError::Validation(details) => details.clone(),
            AppError::Database(_) | AppError::Internal(_) => vec![FieldError::new(
                "server",
                "An unexpected error occurred".to_string(),
            )],
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::LocationNotFound(_) | AppError::CategoryNotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateLocation { .. } | AppError::DuplicateCategory(_) => {
                StatusCode::CONFLICT
            }
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // 500s get a generic message so storage internals never reach clients.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed with internal error");
            "Internal Server Error".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "status_code": status.as_u16(),
            "error": message,
            "details": self.details(),
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
