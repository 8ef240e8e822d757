//! DTOs shaped for the patient profile and the staff dashboard.

use serde::Serialize;

use crate::domain::appointment::{Appointment, AppointmentStatus};
use crate::domain::dentist::Dentist;
use crate::domain::patient::Patient;
use crate::domain::service::CatalogService;
use crate::session::SessionRecord;

const NOT_PROVIDED: &str = "Non renseigné";

/// Identity card of the patient profile page.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PatientCard {
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub birth_date: String,
    pub blood_group: String,
    pub social_coverage: String,
    pub sex: String,
}

fn or_placeholder(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(NOT_PROVIDED)
        .to_string()
}

impl PatientCard {
    pub fn from_patient(patient: &Patient) -> Self {
        Self {
            last_name: patient.last_name.clone(),
            first_name: patient.first_name.clone(),
            email: patient.email.clone(),
            phone: or_placeholder(patient.phone.as_deref()),
            address: or_placeholder(patient.address.as_deref()),
            birth_date: or_placeholder(patient.birth_date.as_deref()),
            blood_group: or_placeholder(patient.blood_group.as_deref()),
            social_coverage: or_placeholder(patient.social_coverage.as_deref()),
            sex: or_placeholder(patient.sex.as_deref()),
        }
    }

    /// Card built from the fields the login response left in the session.
    ///
    /// Both plain and suffixed backend names are looked up.
    pub fn from_session(record: &SessionRecord) -> Self {
        let field = |plain: &str, suffixed: &str| {
            or_placeholder(
                record
                    .extra_str(plain)
                    .or_else(|| record.extra_str(suffixed)),
            )
        };
        Self {
            last_name: record.nom.clone(),
            first_name: record.prenom.clone(),
            email: record.email.clone(),
            phone: field("tel", "telP"),
            address: field("adresse", "adresseP"),
            birth_date: field("dateN", "dateNP"),
            blood_group: field("groupeSanguin", "groupeSanguinP"),
            social_coverage: field("recouvrement", "recouvrementP"),
            sex: field("sexe", "sexeP"),
        }
    }
}

/// Status button offered on an appointment row.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatusAction {
    pub status: &'static str,
    pub label: &'static str,
}

impl From<AppointmentStatus> for StatusAction {
    fn from(status: AppointmentStatus) -> Self {
        let label = match status {
            AppointmentStatus::Confirmed => "Confirmer",
            AppointmentStatus::Declined => "Refuser",
            AppointmentStatus::Completed => "Terminer",
            AppointmentStatus::Pending => "Remettre en attente",
        };
        Self {
            status: status.as_str(),
            label,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AppointmentRow {
    pub id: i64,
    pub date: String,
    pub time: String,
    pub status: &'static str,
    pub status_label: &'static str,
    pub details: String,
    pub patient_id: Option<i64>,
    pub dentist_name: Option<String>,
    pub acts: usize,
    pub total_billed: f64,
    pub actions: Vec<StatusAction>,
}

impl AppointmentRow {
    /// Row for `appointment`, naming its dentist when found in `dentists`.
    pub fn new(appointment: &Appointment, dentists: &[Dentist]) -> Self {
        let dentist_name = appointment.dentist.as_ref().and_then(|dentist| {
            dentists
                .iter()
                .find(|d| d.id == dentist.id)
                .map(Dentist::display_name)
        });
        Self {
            id: appointment.id.get(),
            date: appointment.date.clone(),
            time: appointment.time.clone(),
            status: appointment.status.as_str(),
            status_label: appointment.status.label(),
            details: appointment.details.clone(),
            patient_id: appointment.patient.as_ref().map(|p| p.id.get()),
            dentist_name,
            acts: appointment.acts.len(),
            total_billed: appointment.total_billed(),
            actions: appointment
                .status
                .next_statuses()
                .iter()
                .copied()
                .map(StatusAction::from)
                .collect(),
        }
    }
}

/// Data required to render the patient profile page.
#[derive(Debug)]
pub struct PatientProfileData {
    pub patient: PatientCard,
    pub appointments: Vec<AppointmentRow>,
}

/// Data required to render the staff dashboard.
#[derive(Debug)]
pub struct DentistDashboardData {
    /// Backend record of the logged-in account, when it could be loaded.
    pub dentist: Option<Dentist>,
    pub display_name: String,
    pub appointments: Vec<AppointmentRow>,
    pub services: Vec<CatalogService>,
}
