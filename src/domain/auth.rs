use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Credentials posted to `/auth/login`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct LoginCredentials {
    pub email: String,
    #[serde(rename = "motDePasse")]
    pub password: String,
}

/// Account identifier as returned by the backend.
///
/// The backend sends numbers, but nothing stops it from sending strings, so
/// both shapes are accepted and coerced on demand.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum AccountId {
    Number(i64),
    Text(String),
}

impl AccountId {
    /// Numeric view of the identifier, `None` when it cannot be coerced.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AccountId::Number(value) => Some(*value),
            AccountId::Text(value) => value.trim().parse().ok(),
        }
    }

    /// `false` for `0` and blank strings, which the backend uses for "no account".
    pub fn is_present(&self) -> bool {
        match self {
            AccountId::Number(value) => *value != 0,
            AccountId::Text(value) => !value.trim().is_empty(),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "PATIENT")]
    Patient,
    #[serde(rename = "DENTISTE")]
    Dentiste,
}

impl Role {
    /// Any role other than `PATIENT` is treated as clinic staff.
    pub fn from_backend(role: &str) -> Self {
        if role == "PATIENT" {
            Role::Patient
        } else {
            Role::Dentiste
        }
    }

    pub fn profile(self) -> Profile {
        match self {
            Role::Patient => Profile::Patient,
            Role::Dentiste => Profile::Dentiste,
        }
    }
}

/// Area of the site a logged-in user lands on.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Patient,
    Dentiste,
}

impl Profile {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "patient" => Some(Profile::Patient),
            "dentiste" => Some(Profile::Dentiste),
            _ => None,
        }
    }

    /// Route of the profile page for this area.
    pub fn home_route(self) -> &'static str {
        match self {
            Profile::Patient => "/profile-patient",
            Profile::Dentiste => "/profile-aide-soignant",
        }
    }

    /// Route of the registration form for this area.
    pub fn registration_route(self) -> &'static str {
        match self {
            Profile::Patient => "/patient",
            Profile::Dentiste => "/aide-soignant",
        }
    }
}

/// Body answered by `/auth/login`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LoginResponse {
    #[serde(default)]
    pub id: Option<AccountId>,
    #[serde(default)]
    pub nom: String,
    #[serde(default)]
    pub prenom: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub token: Option<String>,
    /// Any other field the backend sends is kept in the session record.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
