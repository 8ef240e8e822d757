use serde::{Deserialize, Serialize};

use crate::domain::types::PatientId;

/// Patient record as exposed by `/patients/{id}`.
///
/// The backend has used both suffixed (`nomP`) and plain (`nom`) names, so
/// both are accepted.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Patient {
    #[serde(rename = "idP", alias = "id")]
    pub id: PatientId,
    #[serde(rename = "nomP", alias = "nom", default)]
    pub last_name: String,
    #[serde(rename = "prenomP", alias = "prenom", default)]
    pub first_name: String,
    #[serde(rename = "emailP", alias = "email", default)]
    pub email: String,
    #[serde(rename = "telP", alias = "tel", default)]
    pub phone: Option<String>,
    #[serde(rename = "adresseP", alias = "adresse", default)]
    pub address: Option<String>,
    #[serde(rename = "dateNP", alias = "dateN", default)]
    pub birth_date: Option<String>,
    #[serde(rename = "groupeSanguinP", alias = "groupeSanguin", default)]
    pub blood_group: Option<String>,
    #[serde(rename = "sexeP", alias = "sexe", default)]
    pub sex: Option<String>,
    #[serde(rename = "recouvrementP", alias = "recouvrement", default)]
    pub social_coverage: Option<String>,
}

/// Payload posted to `/auth/register/patient`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct NewPatient {
    #[serde(rename = "nomP")]
    pub last_name: String,
    #[serde(rename = "prenomP")]
    pub first_name: String,
    #[serde(rename = "emailP")]
    pub email: String,
    #[serde(rename = "mdpP")]
    pub password: String,
    #[serde(rename = "dateNP")]
    pub birth_date: String,
    #[serde(rename = "groupeSanguinP")]
    pub blood_group: String,
    #[serde(rename = "sexeP")]
    pub sex: String,
    #[serde(rename = "recouvrementP")]
    pub social_coverage: String,
}
