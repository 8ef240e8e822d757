//! Strongly-typed value objects used by domain entities.
//!
//! Identifiers handed out by the backend are positive `Long` values; wrapping
//! them keeps a dentist id from being passed where a service id is expected.
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided value could not be read as an identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i64) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Parses an identifier posted by a form select.
            pub fn parse(value: &str) -> Result<Self, TypeConstraintError> {
                let value = value.trim();
                value
                    .parse::<i64>()
                    .map_err(|_| TypeConstraintError::InvalidId(value.to_string()))
                    .and_then(Self::new)
            }

            /// Returns the raw `i64` backing this identifier.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i64> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(ServiceId, "Identifier of a catalog service.");
id_newtype!(DentistId, "Identifier of a dentist or aide-soignant account.");
id_newtype!(PatientId, "Identifier of a patient account.");
id_newtype!(AppointmentId, "Identifier of an appointment.");
id_newtype!(PublicationId, "Identifier of a publication.");
