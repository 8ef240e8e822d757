//! In-memory backend double recording every call it receives.

use std::cell::RefCell;

use serde_json::{Value, json};

use crate::api::{ApiError, ApiResult};
use crate::backend::{
    AppointmentReader, AppointmentWriter, AuthBackend, DentistReader, PatientReader,
    PublicationReader, PublicationWriter, ServiceReader, ServiceWriter,
};
use crate::domain::appointment::{Appointment, NewAppointment};
use crate::domain::auth::{LoginCredentials, LoginResponse};
use crate::domain::dentist::{Dentist, NewDentist};
use crate::domain::patient::{NewPatient, Patient};
use crate::domain::publication::{NewPublication, Publication};
use crate::domain::service::{CatalogService, NewCatalogService};
use crate::domain::types::{DentistId, PatientId, ServiceId};

#[derive(Default)]
pub struct FakeBackend {
    pub login_response: Option<LoginResponse>,
    pub services: Vec<CatalogService>,
    pub dentists: Vec<Dentist>,
    pub patients: Vec<Patient>,
    pub appointments: Vec<Appointment>,
    pub publications: Vec<Publication>,
    /// Error answered by every call when set.
    pub failure: Option<ApiError>,
    pub(crate) calls: RefCell<Vec<String>>,
    pub(crate) sent: RefCell<Vec<Value>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls received so far, as `METHOD /path`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// JSON bodies received so far.
    pub fn sent(&self) -> Vec<Value> {
        self.sent.borrow().clone()
    }

    fn record(&self, call: impl Into<String>) -> ApiResult<()> {
        self.calls.borrow_mut().push(call.into());
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn record_body<B: serde::Serialize>(&self, call: impl Into<String>, body: &B) -> ApiResult<()> {
        self.sent
            .borrow_mut()
            .push(serde_json::to_value(body).unwrap_or(Value::Null));
        self.record(call)
    }

    fn not_found() -> ApiError {
        ApiError::from_status(404, "Ressource introuvable")
    }
}

impl AuthBackend for FakeBackend {
    async fn login(&self, credentials: &LoginCredentials) -> ApiResult<LoginResponse> {
        self.record_body("POST /auth/login", credentials)?;
        self.login_response
            .clone()
            .ok_or_else(|| ApiError::from_status(401, "Identifiants incorrects"))
    }

    async fn register_patient(&self, patient: &NewPatient) -> ApiResult<Value> {
        self.record_body("POST /auth/register/patient", patient)?;
        Ok(json!({}))
    }

    async fn register_dentist(&self, dentist: &NewDentist) -> ApiResult<Value> {
        self.record_body("POST /auth/register/dentiste", dentist)?;
        Ok(json!({}))
    }
}

impl ServiceReader for FakeBackend {
    async fn list_services(&self) -> ApiResult<Vec<CatalogService>> {
        self.record("GET /services")?;
        Ok(self.services.clone())
    }

    async fn get_service(&self, id: ServiceId) -> ApiResult<CatalogService> {
        self.record(format!("GET /services/{id}"))?;
        self.services
            .iter()
            .find(|service| service.id == id)
            .cloned()
            .ok_or_else(Self::not_found)
    }
}

impl ServiceWriter for FakeBackend {
    async fn create_service(&self, service: &NewCatalogService) -> ApiResult<Value> {
        self.record_body("POST /services", service)?;
        Ok(json!({}))
    }

    async fn delete_service(&self, id: ServiceId) -> ApiResult<()> {
        self.record(format!("DELETE /services/{id}"))
    }
}

impl AppointmentReader for FakeBackend {
    async fn list_appointments(&self) -> ApiResult<Vec<Appointment>> {
        self.record("GET /rendezvous")?;
        Ok(self.appointments.clone())
    }
}

impl AppointmentWriter for FakeBackend {
    async fn create_appointment(&self, appointment: &NewAppointment) -> ApiResult<Value> {
        self.record_body("POST /rendezvous", appointment)?;
        Ok(json!({}))
    }

    async fn update_appointment(&self, appointment: &Appointment) -> ApiResult<Value> {
        self.record_body("PUT /rendezvous", appointment)?;
        Ok(json!({}))
    }
}

impl DentistReader for FakeBackend {
    async fn list_dentists(&self) -> ApiResult<Vec<Dentist>> {
        self.record("GET /dentistes")?;
        Ok(self.dentists.clone())
    }

    async fn get_dentist(&self, id: DentistId) -> ApiResult<Dentist> {
        self.record(format!("GET /dentistes/{id}"))?;
        self.dentists
            .iter()
            .find(|dentist| dentist.id == id)
            .cloned()
            .ok_or_else(Self::not_found)
    }
}

impl PatientReader for FakeBackend {
    async fn get_patient(&self, id: PatientId) -> ApiResult<Patient> {
        self.record(format!("GET /patients/{id}"))?;
        self.patients
            .iter()
            .find(|patient| patient.id == id)
            .cloned()
            .ok_or_else(Self::not_found)
    }
}

impl PublicationReader for FakeBackend {
    async fn list_publications(&self) -> ApiResult<Vec<Publication>> {
        self.record("GET /publications")?;
        Ok(self.publications.clone())
    }
}

impl PublicationWriter for FakeBackend {
    async fn create_publication(&self, publication: &NewPublication) -> ApiResult<Value> {
        self.record_body("POST /publications", publication)?;
        Ok(json!({}))
    }
}
