use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::types::{AppointmentId, DentistId, PatientId, ServiceId};

/// Lifecycle of an appointment.
///
/// Progression only moves forward: pending → confirmed | declined,
/// confirmed → completed.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[serde(alias = "PENDING")]
    Pending,
    #[serde(alias = "CONFIRMED")]
    Confirmed,
    #[serde(alias = "DECLINED")]
    Declined,
    #[serde(alias = "COMPLETED")]
    Completed,
}

impl AppointmentStatus {
    /// Status given to appointments created from the booking page.
    pub const INITIAL: AppointmentStatus = AppointmentStatus::Pending;

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "declined" => Some(Self::Declined),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Declined => "declined",
            Self::Completed => "completed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "En attente",
            Self::Confirmed => "Confirmé",
            Self::Declined => "Refusé",
            Self::Completed => "Terminé",
        }
    }

    /// Statuses reachable in one step from `self`.
    pub fn next_statuses(self) -> &'static [AppointmentStatus] {
        match self {
            Self::Pending => &[Self::Confirmed, Self::Declined],
            Self::Confirmed => &[Self::Completed],
            Self::Declined | Self::Completed => &[],
        }
    }

    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        self.next_statuses().contains(&next)
    }
}

/// Reference to a party of the appointment; unknown fields are preserved.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PartyRef<T> {
    pub id: T,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Billed service line attached to a stored appointment.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Act {
    pub service: PartyRef<ServiceId>,
    #[serde(default)]
    pub billed_price: f64,
    #[serde(default)]
    pub note: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Appointment as read from `/rendezvous`.
///
/// Fields this client does not know about are kept so the record can be sent
/// back whole when its status changes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: AppointmentId,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub patient: Option<PartyRef<PatientId>>,
    #[serde(default)]
    pub dentist: Option<PartyRef<DentistId>>,
    #[serde(default)]
    pub acts: Vec<Act>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Appointment {
    pub fn is_for_dentist(&self, dentist_id: DentistId) -> bool {
        self.dentist.as_ref().is_some_and(|d| d.id == dentist_id)
    }

    pub fn is_for_patient(&self, patient_id: PatientId) -> bool {
        self.patient.as_ref().is_some_and(|p| p.id == patient_id)
    }

    /// Copy of the full record with only the status replaced.
    #[must_use]
    pub fn with_status(&self, status: AppointmentStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    pub fn total_billed(&self) -> f64 {
        self.acts.iter().map(|act| act.billed_price).sum()
    }
}

/// Bare `{ "id": … }` reference used in creation payloads.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct IdRef<T> {
    pub id: T,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewAct {
    pub service: IdRef<ServiceId>,
    pub billed_price: f64,
    pub note: String,
}

/// Payload posted to `/rendezvous` by the booking page.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewAppointment {
    pub date: String,
    pub time: String,
    pub status: AppointmentStatus,
    pub details: String,
    pub patient: IdRef<PatientId>,
    pub dentist: IdRef<DentistId>,
    pub acts: Vec<NewAct>,
}
