use serde::{Deserialize, Serialize};

use crate::domain::types::ServiceId;

/// Priced offering listed in the clinic catalog.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CatalogService {
    #[serde(rename = "numSM")]
    pub id: ServiceId,
    #[serde(rename = "nomSM")]
    pub name: String,
    #[serde(rename = "typeSM", default)]
    pub service_type: String,
    #[serde(rename = "descriptionSM", default)]
    pub description: String,
    #[serde(rename = "tarifSM", default)]
    pub price: f64,
}

/// Payload creating a catalog entry; the identifier is assigned by the backend.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewCatalogService {
    #[serde(rename = "nomSM")]
    pub name: String,
    #[serde(rename = "typeSM")]
    pub service_type: String,
    #[serde(rename = "tarifSM")]
    pub price: f64,
    #[serde(rename = "descriptionSM")]
    pub description: String,
}

impl NewCatalogService {
    #[must_use]
    pub fn new(name: &str, service_type: &str, price: f64, description: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            service_type: service_type.trim().to_string(),
            price,
            description: description.trim().to_string(),
        }
    }
}
