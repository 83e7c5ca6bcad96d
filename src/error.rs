use crate::movie::MovieId;
use thiserror::Error;

/// The backend call a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Fetch,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn label(self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Every way a catalog operation can fail.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend rejected {} request: HTTP {status}", operation.label())]
    Status { operation: Operation, status: u16 },

    #[error("Response was not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Movie {0} is not in the current snapshot")]
    NotFound(MovieId),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// Whether the failure happened before anything was sent to the backend.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            CatalogError::Validation(_) | CatalogError::NotFound(_) | CatalogError::Config(_)
        )
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Transport(e) => {
                if e.is_connect() {
                    "Could not reach the catalog server".to_string()
                } else {
                    format!("Network error: {}", e)
                }
            }
            CatalogError::Status { operation, status } => {
                format!("Server refused to {} ({})", operation.label(), status)
            }
            CatalogError::Decode(e) => format!("Unexpected response from server: {}", e),
            CatalogError::Validation(msg) => msg.clone(),
            CatalogError::NotFound(_) => "Movie not found".to_string(),
            CatalogError::Config(msg) => format!("Configuration error: {}", msg),
            CatalogError::Io(e) => format!("File system error: {}", e),
        }
    }
}
