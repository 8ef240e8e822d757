use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::patient::NewPatient;
use crate::forms::{
    FieldErrors, date_format, email_format, password_length, trim_in_place,
};

/// Patient self-registration form.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct PatientRegistrationForm {
    #[validate(length(min = 1, message = "Le nom est requis"))]
    pub last_name: String,
    #[validate(length(min = 1, message = "Le prénom est requis"))]
    pub first_name: String,
    #[validate(
        length(min = 1, message = "L'email est requis"),
        custom(function = "email_format")
    )]
    pub email: String,
    #[validate(
        length(min = 1, message = "La date de naissance est requise"),
        custom(function = "date_format")
    )]
    pub birth_date: String,
    #[validate(length(min = 1, message = "Le groupe sanguin est requis"))]
    pub blood_group: String,
    #[validate(length(min = 1, message = "Le sexe est requis"))]
    pub sex: String,
    #[validate(
        length(min = 1, message = "Le mot de passe est requis"),
        custom(function = "password_length")
    )]
    #[serde(skip_serializing)]
    pub password: String,
    #[validate(must_match(
        other = "password",
        message = "Les mots de passe ne correspondent pas"
    ))]
    #[serde(skip_serializing)]
    pub password_confirmation: String,
    #[validate(length(min = 1, message = "Le recouvrement social est requis"))]
    pub social_coverage: String,
}

impl PatientRegistrationForm {
    /// Trims every field but the passwords, then validates.
    pub fn check(&mut self) -> Result<(), FieldErrors> {
        for field in [
            &mut self.last_name,
            &mut self.first_name,
            &mut self.email,
            &mut self.birth_date,
            &mut self.blood_group,
            &mut self.sex,
            &mut self.social_coverage,
        ] {
            trim_in_place(field);
        }
        self.validate().map_err(|errors| FieldErrors::from(&errors))
    }

    /// Maps the form to the backend payload; the confirmation is dropped.
    pub fn to_new_patient(&self) -> NewPatient {
        NewPatient {
            last_name: self.last_name.clone(),
            first_name: self.first_name.clone(),
            email: self.email.to_lowercase(),
            password: self.password.clone(),
            birth_date: self.birth_date.clone(),
            blood_group: self.blood_group.clone(),
            sex: self.sex.clone(),
            social_coverage: self.social_coverage.clone(),
        }
    }
}
