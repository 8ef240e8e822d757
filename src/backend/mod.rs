//! Gateways to the clinic backend, one reader/writer pair per resource.
//!
//! Page workflows depend on these traits only, so they can run against the
//! HTTP client in production and against an in-memory double in tests.
#![allow(async_fn_in_trait)]

use serde_json::Value;

use crate::api::{ApiClient, ApiResult};
use crate::domain::appointment::{Appointment, NewAppointment};
use crate::domain::auth::{LoginCredentials, LoginResponse};
use crate::domain::dentist::{Dentist, NewDentist};
use crate::domain::patient::{NewPatient, Patient};
use crate::domain::publication::{NewPublication, Publication};
use crate::domain::service::{CatalogService, NewCatalogService};
use crate::domain::types::{DentistId, PatientId, ServiceId};

#[cfg(test)]
pub mod fake;

pub trait AuthBackend {
    async fn login(&self, credentials: &LoginCredentials) -> ApiResult<LoginResponse>;
    async fn register_patient(&self, patient: &NewPatient) -> ApiResult<Value>;
    async fn register_dentist(&self, dentist: &NewDentist) -> ApiResult<Value>;
}

pub trait ServiceReader {
    async fn list_services(&self) -> ApiResult<Vec<CatalogService>>;
    async fn get_service(&self, id: ServiceId) -> ApiResult<CatalogService>;
}

pub trait ServiceWriter {
    async fn create_service(&self, service: &NewCatalogService) -> ApiResult<Value>;
    async fn delete_service(&self, id: ServiceId) -> ApiResult<()>;
}

pub trait AppointmentReader {
    async fn list_appointments(&self) -> ApiResult<Vec<Appointment>>;
}

pub trait AppointmentWriter {
    async fn create_appointment(&self, appointment: &NewAppointment) -> ApiResult<Value>;
    /// Sends the full record back; the backend has no partial update.
    async fn update_appointment(&self, appointment: &Appointment) -> ApiResult<Value>;
}

pub trait DentistReader {
    async fn list_dentists(&self) -> ApiResult<Vec<Dentist>>;
    async fn get_dentist(&self, id: DentistId) -> ApiResult<Dentist>;
}

pub trait PatientReader {
    async fn get_patient(&self, id: PatientId) -> ApiResult<Patient>;
}

pub trait PublicationReader {
    async fn list_publications(&self) -> ApiResult<Vec<Publication>>;
}

pub trait PublicationWriter {
    async fn create_publication(&self, publication: &NewPublication) -> ApiResult<Value>;
}

impl AuthBackend for ApiClient {
    async fn login(&self, credentials: &LoginCredentials) -> ApiResult<LoginResponse> {
        self.post("/auth/login", credentials).await
    }

    async fn register_patient(&self, patient: &NewPatient) -> ApiResult<Value> {
        self.post("/auth/register/patient", patient).await
    }

    async fn register_dentist(&self, dentist: &NewDentist) -> ApiResult<Value> {
        self.post("/auth/register/dentiste", dentist).await
    }
}

impl ServiceReader for ApiClient {
    async fn list_services(&self) -> ApiResult<Vec<CatalogService>> {
        self.get("/services").await
    }

    async fn get_service(&self, id: ServiceId) -> ApiResult<CatalogService> {
        self.get(&format!("/services/{id}")).await
    }
}

impl ServiceWriter for ApiClient {
    async fn create_service(&self, service: &NewCatalogService) -> ApiResult<Value> {
        self.post("/services", service).await
    }

    async fn delete_service(&self, id: ServiceId) -> ApiResult<()> {
        self.delete(&format!("/services/{id}")).await.map(|_| ())
    }
}

impl AppointmentReader for ApiClient {
    async fn list_appointments(&self) -> ApiResult<Vec<Appointment>> {
        self.get("/rendezvous").await
    }
}

impl AppointmentWriter for ApiClient {
    async fn create_appointment(&self, appointment: &NewAppointment) -> ApiResult<Value> {
        self.post("/rendezvous", appointment).await
    }

    async fn update_appointment(&self, appointment: &Appointment) -> ApiResult<Value> {
        self.put("/rendezvous", appointment).await
    }
}

impl DentistReader for ApiClient {
    async fn list_dentists(&self) -> ApiResult<Vec<Dentist>> {
        self.get("/dentistes").await
    }

    async fn get_dentist(&self, id: DentistId) -> ApiResult<Dentist> {
        self.get(&format!("/dentistes/{id}")).await
    }
}

impl PatientReader for ApiClient {
    async fn get_patient(&self, id: PatientId) -> ApiResult<Patient> {
        self.get(&format!("/patients/{id}")).await
    }
}

impl PublicationReader for ApiClient {
    async fn list_publications(&self) -> ApiResult<Vec<Publication>> {
        self.get("/publications").await
    }
}

impl PublicationWriter for ApiClient {
    async fn create_publication(&self, publication: &NewPublication) -> ApiResult<Value> {
        self.post("/publications", publication).await
    }
}
