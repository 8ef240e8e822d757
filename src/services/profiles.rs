use futures_util::future::try_join;

use crate::backend::{
    AppointmentReader, AppointmentWriter, DentistReader, PatientReader, ServiceReader,
};
use crate::domain::appointment::{Appointment, AppointmentStatus};
use crate::domain::auth::Profile;
use crate::domain::dentist::Dentist;
use crate::domain::types::AppointmentId;
use crate::dto::profiles::{AppointmentRow, DentistDashboardData, PatientCard, PatientProfileData};
use crate::services::{ServiceError, ServiceResult, require_profile};
use crate::session::{KeyValueStore, SessionContext};

fn sort_chronologically(appointments: &mut [&Appointment]) {
    appointments.sort_by(|a, b| (&a.date, &a.time).cmp(&(&b.date, &b.time)));
}

/// Patient profile: identity card and the patient's own appointments.
///
/// The page always renders from the session when the backend cannot be
/// reached.
pub async fn load_patient_profile<B, S>(
    backend: &B,
    session: &SessionContext<S>,
) -> ServiceResult<PatientProfileData>
where
    B: PatientReader + AppointmentReader + DentistReader,
    S: KeyValueStore,
{
    let user = require_profile(session, Profile::Patient)?;

    let Some(patient_id) = user.patient_id() else {
        log::warn!("Session id {:?} is not a patient identifier", user.id);
        return Ok(PatientProfileData {
            patient: PatientCard::from_session(&user),
            appointments: Vec::new(),
        });
    };

    let patient = match backend.get_patient(patient_id).await {
        Ok(patient) => PatientCard::from_patient(&patient),
        Err(err) => {
            log::warn!("Falling back to session data for patient {patient_id}: {err}");
            PatientCard::from_session(&user)
        }
    };

    let appointments =
        match try_join(backend.list_appointments(), backend.list_dentists()).await {
            Ok((appointments, dentists)) => {
                let mut own = appointments
                    .iter()
                    .filter(|appointment| appointment.is_for_patient(patient_id))
                    .collect::<Vec<_>>();
                sort_chronologically(&mut own);
                own.into_iter()
                    .map(|appointment| AppointmentRow::new(appointment, &dentists))
                    .collect()
            }
            Err(err) => {
                log::error!("Failed to load appointments of patient {patient_id}: {err}");
                Vec::new()
            }
        };

    Ok(PatientProfileData {
        patient,
        appointments,
    })
}

/// Staff dashboard: the logged-in dentist's appointments and the catalog.
///
/// The dentist's own record is optional: the session name is shown when the
/// backend cannot return it.
pub async fn load_dentist_dashboard<B, S>(
    backend: &B,
    session: &SessionContext<S>,
) -> ServiceResult<DentistDashboardData>
where
    B: AppointmentReader + DentistReader + ServiceReader,
    S: KeyValueStore,
{
    let user = require_profile(session, Profile::Dentiste)?;

    let (appointments, mut services) =
        try_join(backend.list_appointments(), backend.list_services())
            .await
            .map_err(|err| {
                log::error!("Failed to load dashboard: {err}");
                ServiceError::from(err)
            })?;

    let Some(dentist_id) = user.dentist_id() else {
        log::warn!("Session id {:?} is not a dentist identifier", user.id);
        services.sort_by_key(|service| service.id);
        return Ok(DentistDashboardData {
            dentist: None,
            display_name: user.display_name(),
            appointments: Vec::new(),
            services,
        });
    };

    let dentist = match backend.get_dentist(dentist_id).await {
        Ok(dentist) => Some(dentist),
        Err(err) => {
            log::warn!("Failed to load dentist {dentist_id}: {err}");
            None
        }
    };

    let mut own = appointments
        .iter()
        .filter(|appointment| appointment.is_for_dentist(dentist_id))
        .collect::<Vec<_>>();
    sort_chronologically(&mut own);
    services.sort_by_key(|service| service.id);

    let known = dentist.as_slice();
    Ok(DentistDashboardData {
        display_name: dentist
            .as_ref()
            .map(Dentist::display_name)
            .unwrap_or_else(|| user.display_name()),
        appointments: own
            .into_iter()
            .map(|appointment| AppointmentRow::new(appointment, known))
            .collect(),
        dentist,
        services,
    })
}

/// Moves one of the dentist's appointments to `raw_status`.
///
/// The full record is sent back with only the status changed. Transitions
/// outside the forward progression are refused without any write.
pub async fn change_appointment_status<B, S>(
    backend: &B,
    session: &SessionContext<S>,
    raw_id: &str,
    raw_status: &str,
) -> ServiceResult<AppointmentStatus>
where
    B: AppointmentReader + AppointmentWriter,
    S: KeyValueStore,
{
    let user = require_profile(session, Profile::Dentiste)?;
    let id = AppointmentId::parse(raw_id)?;
    let next = AppointmentStatus::parse(raw_status)
        .ok_or_else(|| ServiceError::Form("Statut inconnu".to_string()))?;

    let appointments = backend.list_appointments().await.map_err(|err| {
        log::error!("Failed to list appointments: {err}");
        ServiceError::from(err)
    })?;
    let appointment = appointments
        .into_iter()
        .find(|appointment| appointment.id == id)
        .ok_or(ServiceError::NotFound(None))?;

    match user.dentist_id() {
        Some(dentist_id) if appointment.is_for_dentist(dentist_id) => {}
        _ => return Err(ServiceError::Unauthorized),
    }

    if !appointment.status.can_transition_to(next) {
        return Err(ServiceError::Form(format!(
            "Impossible de passer de « {} » à « {} »",
            appointment.status.label(),
            next.label()
        )));
    }

    backend
        .update_appointment(&appointment.with_status(next))
        .await
        .map_err(|err| {
            log::error!("Failed to update appointment {id}: {err}");
            ServiceError::Api(err)
        })?;

    Ok(next)
}
