//! HTTP handlers rendering the clinic pages.

use actix_session::Session;
use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::api::ApiClient;
use crate::services::ServiceError;
use crate::session::{SessionContext, SessionRecord};

pub mod auth;
pub mod booking;
pub mod catalog;
pub mod profiles;
pub mod publications;

/// Maps a flash level to the CSS class of the alert.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn collect_alerts(flash_messages: &IncomingFlashMessages) -> Vec<(String, &'static str)> {
    flash_messages
        .iter()
        .map(|f| (f.content().to_string(), alert_level_to_str(&f.level())))
        .collect()
}

/// Context shared by every page: pending alerts, current user and active menu entry.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    current_user: Option<&SessionRecord>,
    current_page: &str,
) -> Context {
    let mut context = Context::new();
    context.insert("alerts", &collect_alerts(flash_messages));
    context.insert("current_user", &current_user);
    context.insert("current_page", current_page);
    context
}

/// [`base_context`] with an extra error alert, for forms re-rendered after a
/// failed request.
pub fn error_context(
    flash_messages: &IncomingFlashMessages,
    current_user: Option<&SessionRecord>,
    current_page: &str,
    message: &str,
) -> Context {
    let mut alerts = collect_alerts(flash_messages);
    alerts.push((message.to_string(), alert_level_to_str(&Level::Error)));
    let mut context = base_context(flash_messages, current_user, current_page);
    context.insert("alerts", &alerts);
    context
}

/// Backend client carrying the bearer token of the session, if any.
pub fn backend_for(api: &ApiClient, session: &SessionContext<Session>) -> ApiClient {
    let token = session.current_user().and_then(|user| user.token);
    api.with_bearer_token(token.as_deref())
}

/// Response for errors a page cannot render around.
///
/// `Unauthorized` answers 401 so the middleware sends the visitor to the login
/// page; everything else is flashed and redirected to `fallback`.
pub fn error_response(err: &ServiceError, fallback: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            FlashMessage::warning(err.user_message()).send();
            HttpResponse::Unauthorized().finish()
        }
        _ => {
            FlashMessage::error(err.user_message()).send();
            redirect(fallback)
        }
    }
}

/// Fallback page for paths no route matches.
pub async fn not_found(
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> HttpResponse {
    let session = SessionContext::new(session);
    let user = session.current_user();
    let context = base_context(&flash_messages, user.as_ref(), "not-found");
    let mut response = render_template(&tera, "not_found.html", &context);
    if response.status().is_success() {
        *response.status_mut() = StatusCode::NOT_FOUND;
    }
    response
}
