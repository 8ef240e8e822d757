use actix_session::Session;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::{Context, Tera};

use crate::api::ApiClient;
use crate::dto::booking::BookingView;
use crate::forms::booking::BookingForm;
use crate::routes::{backend_for, base_context, error_context, error_response, render_template};
use crate::services::ServiceError;
use crate::services::booking::{self as booking_service, BookingOutcome};
use crate::session::SessionContext;

const BOOKING_PAGE: &str = "rendez-vous";

fn booking_context(mut context: Context, view: &BookingView) -> Context {
    context.insert("booking", view);
    context
}

#[get("/rendez-vous")]
pub async fn show_booking(
    session: Session,
    api: web::Data<ApiClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let session = SessionContext::new(session);
    let backend = backend_for(&api, &session);

    match booking_service::load_booking_page(&backend, &session).await {
        Ok(view) => {
            let user = session.current_user();
            let context = booking_context(
                base_context(&flash_messages, user.as_ref(), BOOKING_PAGE),
                &view,
            );
            render_template(&tera, "booking/index.html", &context)
        }
        Err(err) => error_response(&err, "/profile-patient"),
    }
}

/// Every button of the booking page posts here with an `action` field.
///
/// The body is decoded with `serde_html_form` because the selected acts are
/// posted as repeated keys.
#[post("/rendez-vous")]
pub async fn post_booking(
    body: web::Bytes,
    session: Session,
    api: web::Data<ApiClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let session = SessionContext::new(session);
    let backend = backend_for(&api, &session);
    let user = session.current_user();

    let form = match BookingForm::from_urlencoded(&body) {
        Ok(form) => form,
        Err(err) => return error_response(&ServiceError::from(err), "/rendez-vous"),
    };

    match booking_service::handle_booking(&backend, &session, form.clone()).await {
        Ok(BookingOutcome::Editing(view)) => {
            let context = booking_context(
                base_context(&flash_messages, user.as_ref(), BOOKING_PAGE),
                &view,
            );
            render_template(&tera, "booking/index.html", &context)
        }
        Ok(BookingOutcome::Submitted(summary)) => {
            let mut context = base_context(&flash_messages, user.as_ref(), BOOKING_PAGE);
            context.insert("summary", &summary);
            render_template(&tera, "booking/submitted.html", &context)
        }
        Err(ServiceError::Validation(errors)) => {
            match booking_service::booking_view(&backend, &form, errors).await {
                Ok(view) => {
                    let context = booking_context(
                        base_context(&flash_messages, user.as_ref(), BOOKING_PAGE),
                        &view,
                    );
                    render_template(&tera, "booking/index.html", &context)
                }
                Err(err) => error_response(&err, "/rendez-vous"),
            }
        }
        Err(err @ ServiceError::Unauthorized) => error_response(&err, "/"),
        Err(err) => {
            let message = format!(
                "Impossible d'enregistrer le rendez-vous : {}",
                err.user_message()
            );
            match booking_service::booking_view(&backend, &form, Default::default()).await {
                Ok(view) => {
                    let context = booking_context(
                        error_context(&flash_messages, user.as_ref(), BOOKING_PAGE, &message),
                        &view,
                    );
                    render_template(&tera, "booking/index.html", &context)
                }
                Err(_) => error_response(&err, "/rendez-vous"),
            }
        }
    }
}
