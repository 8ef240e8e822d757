use futures_util::future::try_join;

use crate::backend::{AppointmentWriter, DentistReader, ServiceReader};
use crate::domain::auth::Profile;
use crate::domain::dentist::Dentist;
use crate::domain::service::CatalogService;
use crate::domain::types::DentistId;
use crate::dto::booking::{BookingSummary, BookingView};
use crate::forms::FieldErrors;
use crate::forms::booking::{BookingAction, BookingForm};
use crate::services::{ServiceError, ServiceResult, require_profile};
use crate::session::{KeyValueStore, SessionContext};

/// What the booking page shows after a button press.
#[derive(Debug)]
pub enum BookingOutcome {
    Editing(BookingView),
    Submitted(BookingSummary),
}

/// Dentists and catalog, fetched concurrently.
async fn load_choices<B>(backend: &B) -> ServiceResult<(Vec<Dentist>, Vec<CatalogService>)>
where
    B: DentistReader + ServiceReader,
{
    let (dentists, mut catalog) = try_join(backend.list_dentists(), backend.list_services())
        .await
        .map_err(|err| {
            log::error!("Failed to load booking choices: {err}");
            ServiceError::from(err)
        })?;
    catalog.sort_by_key(|service| service.id);
    Ok((dentists, catalog))
}

/// Booking page state for `form`, with `errors` shown inline.
pub async fn booking_view<B>(
    backend: &B,
    form: &BookingForm,
    errors: FieldErrors,
) -> ServiceResult<BookingView>
where
    B: DentistReader + ServiceReader,
{
    let (dentists, catalog) = load_choices(backend).await?;
    let selection = form.posted_selection(&catalog);
    Ok(BookingView::new(dentists, &catalog, &selection, form, errors))
}

/// Empty booking page for the logged-in patient.
pub async fn load_booking_page<B, S>(
    backend: &B,
    session: &SessionContext<S>,
) -> ServiceResult<BookingView>
where
    B: DentistReader + ServiceReader,
    S: KeyValueStore,
{
    require_profile(session, Profile::Patient)?;
    booking_view(backend, &BookingForm::default(), FieldErrors::new()).await
}

/// Applies the pressed button: moves a service between the lists, or submits.
pub async fn handle_booking<B, S>(
    backend: &B,
    session: &SessionContext<S>,
    form: BookingForm,
) -> ServiceResult<BookingOutcome>
where
    B: DentistReader + ServiceReader + AppointmentWriter,
    S: KeyValueStore,
{
    require_profile(session, Profile::Patient)?;

    if form.action() == BookingAction::Submit {
        return submit_booking(backend, session, form)
            .await
            .map(BookingOutcome::Submitted);
    }

    let (dentists, catalog) = load_choices(backend).await?;
    let selection = form.apply_action(&catalog);
    Ok(BookingOutcome::Editing(BookingView::new(
        dentists,
        &catalog,
        &selection,
        &form,
        FieldErrors::new(),
    )))
}

/// Validates the booking and sends the appointment once.
///
/// Field errors are reported before any request is made. Selected acts are
/// restricted to services still present in the catalog.
pub async fn submit_booking<B, S>(
    backend: &B,
    session: &SessionContext<S>,
    mut form: BookingForm,
) -> ServiceResult<BookingSummary>
where
    B: DentistReader + ServiceReader + AppointmentWriter,
    S: KeyValueStore,
{
    let user = require_profile(session, Profile::Patient)?;
    form.check().map_err(ServiceError::Validation)?;

    let patient_id = user.patient_id().ok_or_else(|| {
        log::error!("Session id {:?} is not a patient identifier", user.id);
        ServiceError::Form("Identifiant patient invalide, veuillez vous reconnecter".to_string())
    })?;

    let (dentists, catalog) = load_choices(backend).await?;
    let selection = form.posted_selection(&catalog);

    let dentist_name = DentistId::parse(&form.dentist_id)
        .ok()
        .and_then(|id| dentists.iter().find(|dentist| dentist.id == id))
        .map(Dentist::display_name);
    let Some(dentist_name) = dentist_name else {
        let mut errors = FieldErrors::new();
        errors.insert("dentist_id", "Ce dentiste n'est plus disponible");
        return Err(ServiceError::Validation(errors));
    };

    let draft = form.into_draft(selection).map_err(ServiceError::Validation)?;
    let summary = BookingSummary::new(
        dentist_name,
        draft.date.format("%d/%m/%Y").to_string(),
        draft.time.clone(),
        draft.details.clone(),
        &draft.selection,
        &catalog,
    );

    backend
        .create_appointment(&draft.into_payload(patient_id))
        .await
        .map_err(|err| {
            log::error!("Failed to create appointment: {err}");
            ServiceError::Api(err)
        })?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::auth::Role;
    use crate::domain::types::ServiceId;
    use crate::backend::fake::FakeBackend;
    use crate::services::test_support::session_for;

    fn backend() -> FakeBackend {
        FakeBackend {
            services: [(2, "Détartrage", 60.0), (1, "Consultation", 35.0)]
                .into_iter()
                .map(|(id, name, price)| CatalogService {
                    id: ServiceId::new(id).unwrap(),
                    name: name.into(),
                    service_type: "Dentisterie générale".into(),
                    description: String::new(),
                    price,
                })
                .collect(),
            dentists: vec![
                serde_json::from_value(json!({"idD": 3, "nomD": "Bernard", "prenomD": "Laurent"}))
                    .unwrap(),
            ],
            ..FakeBackend::new()
        }
    }

    fn submit_form() -> BookingForm {
        BookingForm {
            action: "submit".into(),
            dentist_id: "3".into(),
            date: "2025-03-14".into(),
            time: "10:30".into(),
            details: "Douleur molaire".into(),
            act_service_id: vec!["1".into(), "99".into()],
            act_billed_price: vec!["30".into(), "10".into()],
            act_note: vec!["remise".into(), String::new()],
            ..BookingForm::default()
        }
    }

    #[tokio::test]
    async fn submit_without_dentist_issues_no_request() {
        let backend = backend();
        let form = BookingForm {
            dentist_id: String::new(),
            ..submit_form()
        };

        let err = handle_booking(&backend, &session_for(7, Role::Patient), form)
            .await
            .unwrap_err();

        match err {
            ServiceError::Validation(errors) => {
                assert_eq!(errors.get("dentist_id"), Some("Veuillez sélectionner un dentiste"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn submit_posts_nested_payload() {
        let backend = backend();

        let outcome = handle_booking(&backend, &session_for(7, Role::Patient), submit_form())
            .await
            .unwrap();

        let BookingOutcome::Submitted(summary) = outcome else {
            panic!("booking was not submitted");
        };
        assert_eq!(summary.dentist_name, "Dr. Laurent Bernard");
        assert_eq!(summary.date, "14/03/2025");
        assert_eq!(summary.total, 30.0);

        assert_eq!(backend.calls().last().map(String::as_str), Some("POST /rendezvous"));
        assert_eq!(
            backend.sent()[0],
            json!({
                "date": "2025-03-14",
                "time": "10:30",
                "status": "pending",
                "details": "Douleur molaire",
                "patient": {"id": 7},
                "dentist": {"id": 3},
                "acts": [{"service": {"id": 1}, "billed_price": 30.0, "note": "remise"}]
            })
        );
    }

    #[tokio::test]
    async fn unknown_dentist_is_reported_without_posting() {
        let backend = backend();
        let form = BookingForm {
            dentist_id: "8".into(),
            ..submit_form()
        };

        let err = handle_booking(&backend, &session_for(7, Role::Patient), form)
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Validation(ref e) if e.contains("dentist_id")));
        assert!(!backend.calls().iter().any(|call| call.starts_with("POST")));
    }

    #[tokio::test]
    async fn add_moves_service_out_of_available() {
        let backend = backend();
        let form = BookingForm {
            action: "add".into(),
            pick_available: "2".into(),
            ..BookingForm::default()
        };

        let outcome = handle_booking(&backend, &session_for(7, Role::Patient), form)
            .await
            .unwrap();

        let BookingOutcome::Editing(view) = outcome else {
            panic!("add must keep editing");
        };
        let available = view.available.iter().map(|s| s.id.get()).collect::<Vec<_>>();
        assert_eq!(available, vec![1]);
        assert_eq!(view.selected[0].service_id, 2);
        assert_eq!(view.selected[0].billed_price, "60");
        assert_eq!(view.total, 60.0);
    }

    #[tokio::test]
    async fn staff_cannot_book() {
        let backend = backend();

        let err = load_booking_page(&backend, &session_for(3, Role::Dentiste))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Unauthorized));
        assert!(backend.calls().is_empty());
    }
}
