use thiserror::Error;

/// Message used when the backend answers an error without a `message` field.
pub const GENERIC_ERROR_MESSAGE: &str = "Une erreur est survenue";

/// Failure of a single backend call.
///
/// Every variant keeps the user-facing message so callers can show it as-is,
/// while the tag still lets them tell client and server failures apart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{message}")]
    Client { status: u16, message: String },

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Erreur réseau: {0}")]
    Network(String),

    #[error("Réponse invalide: {0}")]
    Decode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Builds the variant matching the HTTP status class.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        if (400..500).contains(&status) {
            ApiError::Client { status, message }
        } else {
            ApiError::Server { status, message }
        }
    }

    /// HTTP status when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Client { status, .. } | ApiError::Server { status, .. } => Some(*status),
            ApiError::Network(_) | ApiError::Decode(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
