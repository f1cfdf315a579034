use async_graphql::ErrorExtensions;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardqlError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} {id} is not owned by the acting author")]
    Forbidden { entity: &'static str, id: String },

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BoardqlError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        BoardqlError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn forbidden(entity: &'static str, id: impl Into<String>) -> Self {
        BoardqlError::Forbidden {
            entity,
            id: id.into(),
        }
    }

    /// Machine-readable code reported in `extensions.code`.
    pub fn code(&self) -> &'static str {
        match self {
            BoardqlError::NotFound { .. } => "NOT_FOUND",
            BoardqlError::Forbidden { .. } => "FORBIDDEN",
            BoardqlError::Constraint(_) => "CONSTRAINT_VIOLATION",
            BoardqlError::Validation(_) => "VALIDATION",
            _ => "INTERNAL",
        }
    }
}

impl ErrorExtensions for BoardqlError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}

pub type Result<T> = std::result::Result<T, BoardqlError>;
