use actix_session::Session;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::api::ApiClient;
use crate::domain::dentist::Dentist;
use crate::domain::service::CatalogService;
use crate::dto::profiles::AppointmentRow;
use crate::routes::{
    backend_for, base_context, error_context, error_response, redirect, render_template,
};
use crate::services::ServiceError;
use crate::services::profiles as profile_service;
use crate::session::SessionContext;

const DASHBOARD_PAGE: &str = "profile-aide-soignant";

#[get("/profile-patient")]
pub async fn show_patient_profile(
    session: Session,
    api: web::Data<ApiClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let session = SessionContext::new(session);
    let backend = backend_for(&api, &session);

    match profile_service::load_patient_profile(&backend, &session).await {
        Ok(data) => {
            let user = session.current_user();
            let mut context = base_context(&flash_messages, user.as_ref(), "profile-patient");
            context.insert("patient", &data.patient);
            context.insert("appointments", &data.appointments);
            render_template(&tera, "profiles/patient.html", &context)
        }
        Err(err) => error_response(&err, "/"),
    }
}

#[get("/profile-aide-soignant")]
pub async fn show_dentist_dashboard(
    session: Session,
    api: web::Data<ApiClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let session = SessionContext::new(session);
    let backend = backend_for(&api, &session);

    match profile_service::load_dentist_dashboard(&backend, &session).await {
        Ok(data) => {
            let user = session.current_user();
            let mut context = base_context(&flash_messages, user.as_ref(), DASHBOARD_PAGE);
            context.insert("dentist", &data.dentist);
            context.insert("display_name", &data.display_name);
            context.insert("appointments", &data.appointments);
            context.insert("services", &data.services);
            render_template(&tera, "profiles/dentist.html", &context)
        }
        Err(err @ ServiceError::Unauthorized) => error_response(&err, "/"),
        Err(err) => {
            // The login page sends staff back here, so failures render in place.
            let user = session.current_user();
            let mut context =
                error_context(&flash_messages, user.as_ref(), DASHBOARD_PAGE, &err.user_message());
            context.insert("dentist", &None::<Dentist>);
            context.insert(
                "display_name",
                &user.as_ref().map(|u| u.display_name()).unwrap_or_default(),
            );
            context.insert("appointments", &Vec::<AppointmentRow>::new());
            context.insert("services", &Vec::<CatalogService>::new());
            render_template(&tera, "profiles/dentist.html", &context)
        }
    }
}

#[derive(Deserialize)]
pub struct StatusForm {
    pub status: String,
}

#[post("/rendezvous/{appointment_id}/statut")]
pub async fn change_appointment_status(
    appointment_id: web::Path<String>,
    session: Session,
    api: web::Data<ApiClient>,
    web::Form(form): web::Form<StatusForm>,
) -> impl Responder {
    let session = SessionContext::new(session);
    let backend = backend_for(&api, &session);

    match profile_service::change_appointment_status(
        &backend,
        &session,
        &appointment_id.into_inner(),
        &form.status,
    )
    .await
    {
        Ok(status) => {
            FlashMessage::success(format!("Rendez-vous passé à « {} ».", status.label())).send();
            redirect("/profile-aide-soignant")
        }
        Err(err) => error_response(&err, "/profile-aide-soignant"),
    }
}
