use serde::{Deserialize, Serialize};

use crate::domain::types::DentistId;

/// Dentist or aide-soignant account as exposed by `/dentistes`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dentist {
    #[serde(rename = "idD")]
    pub id: DentistId,
    #[serde(rename = "nomD", default)]
    pub last_name: String,
    #[serde(rename = "prenomD", default)]
    pub first_name: String,
    #[serde(rename = "specialiteD", default)]
    pub specialty: String,
    #[serde(rename = "emailD", default)]
    pub email: Option<String>,
    #[serde(rename = "telD", default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub adresse: Option<String>,
    #[serde(rename = "sexeD", default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub date_naissance: Option<String>,
}

impl Dentist {
    pub fn display_name(&self) -> String {
        format!("Dr. {} {}", self.first_name, self.last_name)
    }
}

/// Payload posted to `/auth/register/dentiste`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct NewDentist {
    #[serde(rename = "nomD")]
    pub last_name: String,
    #[serde(rename = "prenomD")]
    pub first_name: String,
    #[serde(rename = "emailD")]
    pub email: String,
    #[serde(rename = "mdpD")]
    pub password: String,
    /// The registration form records the diploma in the specialty column.
    #[serde(rename = "specialiteD")]
    pub specialty: String,
    #[serde(rename = "telD")]
    pub phone: String,
    pub adresse: String,
    #[serde(rename = "sexeD")]
    pub sex: String,
    pub date_naissance: String,
}
