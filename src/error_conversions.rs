//! Conversions from lower-layer errors into [`ServiceError`].
//!
//! Kept apart so the domain, form and session layers stay free of any
//! dependency on the service layer.

use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::services::ServiceError;
use crate::session::StoreError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(val: FormError) -> Self {
        match val {
            FormError::Validation(errors) => ServiceError::Validation(errors),
            FormError::Malformed(message) => {
                log::error!("Failed to decode form: {message}");
                ServiceError::Form("Formulaire invalide".to_string())
            }
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(val: StoreError) -> Self {
        log::error!("Session storage failed: {val}");
        ServiceError::Form("Impossible d'enregistrer la session".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FieldErrors;

    #[test]
    fn form_errors_keep_field_messages() {
        let mut fields = FieldErrors::new();
        fields.insert("email", "L'email est requis");
        let err = ServiceError::from(FormError::Validation(fields.clone()));
        assert!(matches!(err, ServiceError::Validation(f) if f == fields));
    }

    #[test]
    fn constraint_errors_are_wrapped() {
        let err = ServiceError::from(TypeConstraintError::NonPositiveId);
        assert!(matches!(err, ServiceError::TypeConstraint(_)));
    }
}
