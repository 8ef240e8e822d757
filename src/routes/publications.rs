use actix_session::Session;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::{Context, Tera};

use crate::api::ApiClient;
use crate::constants::PUBLICATION_CATEGORIES;
use crate::domain::auth::Profile;
use crate::forms::FieldErrors;
use crate::forms::publication::PublicationForm;
use crate::routes::{
    backend_for, base_context, error_context, error_response, redirect, render_template,
};
use crate::services::publications as publication_service;
use crate::services::{ServiceError, require_profile};
use crate::session::SessionContext;

#[get("/publications")]
pub async fn show_publications(
    session: Session,
    api: web::Data<ApiClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let session = SessionContext::new(session);
    let backend = backend_for(&api, &session);
    let user = session.current_user();

    let (publications, context) = match publication_service::list_publications(&backend).await {
        Ok(publications) => (
            publications,
            base_context(&flash_messages, user.as_ref(), "publications"),
        ),
        Err(err) => (
            Vec::new(),
            error_context(
                &flash_messages,
                user.as_ref(),
                "publications",
                &err.user_message(),
            ),
        ),
    };

    let mut context = context;
    context.insert("publications", &publications);
    render_template(&tera, "publications/index.html", &context)
}

fn publication_context(mut context: Context, form: &PublicationForm, errors: &FieldErrors) -> Context {
    context.insert("form", form);
    context.insert("errors", errors);
    context.insert("categories", PUBLICATION_CATEGORIES);
    context
}

#[get("/publication")]
pub async fn show_publication_form(
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let session = SessionContext::new(session);
    let user = match require_profile(&session, Profile::Dentiste) {
        Ok(user) => user,
        Err(err) => return error_response(&err, "/"),
    };

    let context = publication_context(
        base_context(&flash_messages, Some(&user), "publication"),
        &PublicationForm::default(),
        &FieldErrors::new(),
    );
    render_template(&tera, "publications/new.html", &context)
}

#[post("/publication")]
pub async fn create_publication(
    session: Session,
    api: web::Data<ApiClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(mut form): web::Form<PublicationForm>,
) -> impl Responder {
    let session = SessionContext::new(session);
    let backend = backend_for(&api, &session);
    let user = session.current_user();

    match publication_service::create_publication(&backend, &session, &mut form).await {
        Ok(()) => {
            FlashMessage::success("Publication créée ! Votre article a été publié avec succès.")
                .send();
            redirect("/publications")
        }
        Err(ServiceError::Validation(errors)) => {
            let context = publication_context(
                error_context(
                    &flash_messages,
                    user.as_ref(),
                    "publication",
                    "Veuillez remplir tous les champs obligatoires.",
                ),
                &form,
                &errors,
            );
            render_template(&tera, "publications/new.html", &context)
        }
        Err(err @ ServiceError::Unauthorized) => error_response(&err, "/"),
        Err(err) => {
            let context = publication_context(
                error_context(&flash_messages, user.as_ref(), "publication", &err.user_message()),
                &form,
                &FieldErrors::new(),
            );
            render_template(&tera, "publications/new.html", &context)
        }
    }
}
