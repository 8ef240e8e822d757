//! Page workflows, independent of the web framework.
//!
//! Each function validates its input, talks to the backend through the
//! gateway traits and returns plain data for the page to render.

use thiserror::Error;

use crate::api::ApiError;
use crate::domain::auth::Profile;
use crate::forms::FieldErrors;
use crate::session::{KeyValueStore, SessionContext, SessionRecord};

pub mod auth;
pub mod booking;
pub mod catalog;
pub mod profiles;
pub mod publications;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    /// Missing resource; carries the backend answer when it sent one.
    #[error("not found")]
    NotFound(Option<ApiError>),

    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    #[error("{0}")]
    Form(String),

    #[error(transparent)]
    Api(ApiError),

    #[error("type constraint violation: {0}")]
    TypeConstraint(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<ApiError> for ServiceError {
    fn from(err: ApiError) -> Self {
        if err.is_not_found() {
            ServiceError::NotFound(Some(err))
        } else {
            ServiceError::Api(err)
        }
    }
}

impl ServiceError {
    /// Text shown to the user in the error toast.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Unauthorized => "Veuillez vous connecter pour accéder à cette page".into(),
            ServiceError::NotFound(Some(err)) => err.to_string(),
            ServiceError::NotFound(None) => "Ressource introuvable".into(),
            ServiceError::Validation(_) => "Veuillez corriger les champs en erreur".into(),
            ServiceError::Form(message) => message.clone(),
            ServiceError::Api(err) => err.to_string(),
            ServiceError::TypeConstraint(_) => "Identifiant invalide".into(),
        }
    }
}

/// Logged-in session record, or [`ServiceError::Unauthorized`].
pub fn require_user<S: KeyValueStore>(session: &SessionContext<S>) -> ServiceResult<SessionRecord> {
    session.current_user().ok_or(ServiceError::Unauthorized)
}

/// Logged-in session record of the given profile.
pub fn require_profile<S: KeyValueStore>(
    session: &SessionContext<S>,
    profile: Profile,
) -> ServiceResult<SessionRecord> {
    require_user(session).and_then(|user| {
        if user.profile == profile {
            Ok(user)
        } else {
            Err(ServiceError::Unauthorized)
        }
    })
}
