use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::dentist::NewDentist;
use crate::forms::{
    FieldErrors, date_format, email_format, password_length, phone_format, trim_in_place,
};

/// Aide-soignant / dentist registration form.
///
/// The photo picker of the page is not part of the form: the backend has no
/// upload endpoint for it.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct DentistRegistrationForm {
    #[validate(length(min = 1, message = "Le nom est requis"))]
    pub last_name: String,
    #[validate(length(min = 1, message = "Le prénom est requis"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "L'adresse est requise"))]
    pub address: String,
    #[validate(
        length(min = 1, message = "Le téléphone est requis"),
        custom(function = "phone_format")
    )]
    pub phone: String,
    #[validate(
        length(min = 1, message = "L'email est requis"),
        custom(function = "email_format")
    )]
    pub email: String,
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
    #[validate(
        length(min = 1, message = "La date de naissance est requise"),
        custom(function = "date_format")
    )]
    pub birth_date: String,
    #[validate(length(min = 1, message = "Le diplôme est requis"))]
    pub diploma: String,
    #[validate(length(min = 1, message = "Le sexe est requis"))]
    pub sex: String,
}

impl DentistRegistrationForm {
    pub fn check(&mut self) -> Result<(), FieldErrors> {
        for field in [
            &mut self.last_name,
            &mut self.first_name,
            &mut self.address,
            &mut self.phone,
            &mut self.email,
            &mut self.birth_date,
            &mut self.diploma,
            &mut self.sex,
        ] {
            trim_in_place(field);
        }
        self.validate().map_err(|errors| FieldErrors::from(&errors))
    }

    pub fn to_new_dentist(&self) -> NewDentist {
        NewDentist {
            last_name: self.last_name.clone(),
            first_name: self.first_name.clone(),
            email: self.email.to_lowercase(),
            password: self.password.clone(),
            specialty: self.diploma.clone(),
            phone: self.phone.clone(),
            adresse: self.address.clone(),
            sex: self.sex.clone(),
            date_naissance: self.birth_date.clone(),
        }
    }
}
