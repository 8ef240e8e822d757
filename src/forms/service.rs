use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::service::NewCatalogService;
use crate::forms::{FieldErrors, amount_format, count_format, parse_amount, trim_in_place};

/// Staff form adding a service to the catalog.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct ServiceForm {
    #[validate(length(min = 1, message = "Le nom du service est requis"))]
    pub name: String,
    #[validate(
        length(min = 1, message = "Le tarif est requis"),
        custom(function = "amount_format")
    )]
    pub price: String,
    /// Collected for the staff but not part of the backend entity.
    #[validate(
        length(min = 1, message = "Le nombre de séances est requis"),
        custom(function = "count_format")
    )]
    pub sessions: String,
    #[validate(length(min = 1, message = "Le type de service est requis"))]
    pub service_type: String,
    #[validate(length(min = 1, message = "La description est requise"))]
    pub description: String,
}

impl ServiceForm {
    pub fn check(&mut self) -> Result<(), FieldErrors> {
        for field in [
            &mut self.name,
            &mut self.price,
            &mut self.sessions,
            &mut self.service_type,
            &mut self.description,
        ] {
            trim_in_place(field);
        }
        self.validate().map_err(|errors| FieldErrors::from(&errors))
    }

    /// Backend payload; call after a successful [`ServiceForm::check`].
    pub fn to_new_service(&self) -> NewCatalogService {
        NewCatalogService::new(
            &self.name,
            &self.service_type,
            parse_amount(&self.price).unwrap_or_default(),
            &self.description,
        )
    }
}

/// Second step of a service deletion, posted from the confirmation page.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DeleteServiceForm {
    pub confirm: String,
}

impl DeleteServiceForm {
    pub fn is_confirmed(&self) -> bool {
        self.confirm.trim() == "oui"
    }
}
