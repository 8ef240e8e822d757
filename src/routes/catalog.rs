use actix_session::Session;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::{Context, Tera};

use crate::api::ApiClient;
use crate::constants::SERVICE_TYPES;
use crate::domain::auth::Profile;
use crate::forms::FieldErrors;
use crate::forms::service::{DeleteServiceForm, ServiceForm};
use crate::routes::{
    backend_for, base_context, error_context, error_response, redirect, render_template,
};
use crate::services::catalog as catalog_service;
use crate::services::{ServiceError, require_profile};
use crate::session::SessionContext;

#[get("/services")]
pub async fn show_services(
    session: Session,
    api: web::Data<ApiClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let session = SessionContext::new(session);
    let backend = backend_for(&api, &session);
    let user = session.current_user();

    let (services, mut context) = match catalog_service::list_services(&backend).await {
        Ok(services) => (services, base_context(&flash_messages, user.as_ref(), "services")),
        Err(err) => (
            Vec::new(),
            error_context(&flash_messages, user.as_ref(), "services", &err.user_message()),
        ),
    };

    context.insert("services", &services);
    render_template(&tera, "services/index.html", &context)
}

fn management_context(mut context: Context, form: &ServiceForm, errors: &FieldErrors) -> Context {
    context.insert("form", form);
    context.insert("errors", errors);
    context.insert("service_types", SERVICE_TYPES);
    context
}

#[get("/services/gestion")]
pub async fn show_service_management(
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let session = SessionContext::new(session);
    let user = match require_profile(&session, Profile::Dentiste) {
        Ok(user) => user,
        Err(err) => return error_response(&err, "/"),
    };

    let context = management_context(
        base_context(&flash_messages, Some(&user), "services-gestion"),
        &ServiceForm::default(),
        &FieldErrors::new(),
    );
    render_template(&tera, "services/manage.html", &context)
}

#[post("/services/gestion")]
pub async fn create_service(
    session: Session,
    api: web::Data<ApiClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(mut form): web::Form<ServiceForm>,
) -> impl Responder {
    let session = SessionContext::new(session);
    let backend = backend_for(&api, &session);
    let user = session.current_user();

    match catalog_service::create_service(&backend, &session, &mut form).await {
        Ok(()) => {
            FlashMessage::success("Service ajouté ! Le nouveau service a été enregistré avec succès.")
                .send();
            redirect("/profile-aide-soignant")
        }
        Err(ServiceError::Validation(errors)) => {
            let context = management_context(
                base_context(&flash_messages, user.as_ref(), "services-gestion"),
                &form,
                &errors,
            );
            render_template(&tera, "services/manage.html", &context)
        }
        Err(err @ ServiceError::Unauthorized) => error_response(&err, "/"),
        Err(err) => {
            let message = format!("Impossible d'ajouter le service : {}", err.user_message());
            let context = management_context(
                error_context(&flash_messages, user.as_ref(), "services-gestion", &message),
                &form,
                &FieldErrors::new(),
            );
            render_template(&tera, "services/manage.html", &context)
        }
    }
}

#[get("/services/{service_id}")]
pub async fn show_service(
    service_id: web::Path<String>,
    session: Session,
    api: web::Data<ApiClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let session = SessionContext::new(session);
    let backend = backend_for(&api, &session);

    match catalog_service::load_service(&backend, &service_id.into_inner()).await {
        Ok(service) => {
            let user = session.current_user();
            let mut context = base_context(&flash_messages, user.as_ref(), "services");
            context.insert("service", &service);
            render_template(&tera, "services/detail.html", &context)
        }
        Err(err) => error_response(&err, "/services"),
    }
}

#[get("/services/{service_id}/supprimer")]
pub async fn confirm_delete_service(
    service_id: web::Path<String>,
    session: Session,
    api: web::Data<ApiClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let session = SessionContext::new(session);
    let backend = backend_for(&api, &session);

    match catalog_service::confirm_delete(&backend, &session, &service_id.into_inner()).await {
        Ok(service) => {
            let user = session.current_user();
            let mut context = base_context(&flash_messages, user.as_ref(), "profile-aide-soignant");
            context.insert("service", &service);
            render_template(&tera, "services/confirm_delete.html", &context)
        }
        Err(err) => error_response(&err, "/profile-aide-soignant"),
    }
}

#[post("/services/{service_id}/supprimer")]
pub async fn delete_service(
    service_id: web::Path<String>,
    session: Session,
    api: web::Data<ApiClient>,
    web::Form(form): web::Form<DeleteServiceForm>,
) -> impl Responder {
    let session = SessionContext::new(session);
    let backend = backend_for(&api, &session);

    match catalog_service::delete_service(&backend, &session, &service_id.into_inner(), &form).await
    {
        Ok(()) => {
            FlashMessage::success("Service supprimé.").send();
            redirect("/profile-aide-soignant")
        }
        Err(err) => error_response(&err, "/profile-aide-soignant"),
    }
}
