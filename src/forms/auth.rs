use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::auth::LoginCredentials;
use crate::forms::{FieldErrors, email_format, trim_in_place};

/// Login form shown for either profile.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "L'email est requis"),
        custom(function = "email_format")
    )]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "password_present"))]
    #[serde(skip_serializing)]
    pub password: String,
    /// Profile card the user picked before logging in.
    #[serde(default)]
    pub profile: Option<String>,
}

fn password_present(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        Err(validator::ValidationError::new("required")
            .with_message("Le mot de passe est requis".into()))
    } else {
        Ok(())
    }
}

impl LoginForm {
    /// Trims the email and validates the fields.
    pub fn check(&mut self) -> Result<(), FieldErrors> {
        trim_in_place(&mut self.email);
        self.validate().map_err(|errors| FieldErrors::from(&errors))
    }

    pub fn credentials(&self) -> LoginCredentials {
        LoginCredentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_login_has_no_errors() {
        let mut form = LoginForm {
            email: " p@x.com ".into(),
            password: "secret".into(),
            profile: Some("patient".into()),
        };
        assert!(form.check().is_ok());
        assert_eq!(form.credentials().email, "p@x.com");
    }

    #[test]
    fn blank_fields_are_flagged_with_required_messages() {
        let mut form = LoginForm::default();
        let errors = form.check().unwrap_err();
        assert_eq!(errors.get("email"), Some("L'email est requis"));
        assert_eq!(errors.get("password"), Some("Le mot de passe est requis"));
    }

    #[test]
    fn malformed_email_is_flagged() {
        let mut form = LoginForm {
            email: "a@b".into(),
            password: "   ".into(),
            profile: None,
        };
        let errors = form.check().unwrap_err();
        assert_eq!(errors.get("email"), Some("Format d'email invalide"));
        assert!(errors.contains("password"));
    }
}
