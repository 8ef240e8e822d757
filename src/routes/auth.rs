use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::{Context, Tera};

use crate::api::ApiClient;
use crate::constants::{BLOOD_GROUPS, DIPLOMAS, SEXES, SOCIAL_COVERAGES};
use crate::domain::auth::Profile;
use crate::forms::FieldErrors;
use crate::forms::auth::LoginForm;
use crate::forms::dentist::DentistRegistrationForm;
use crate::forms::patient::PatientRegistrationForm;
use crate::routes::{base_context, error_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::auth as auth_service;
use crate::session::SessionContext;

#[derive(Deserialize)]
pub struct LoginQuery {
    pub profile: Option<String>,
}

fn render_login(tera: &Tera, mut context: Context, form: &LoginForm, errors: &FieldErrors) -> HttpResponse {
    let profile = form.profile.as_deref().and_then(Profile::parse);
    context.insert("profile", &profile);
    context.insert("registration_url", &profile.map(Profile::registration_route));
    context.insert("form", form);
    context.insert("errors", errors);
    render_template(tera, "auth/login.html", &context)
}

/// Profile choice, then the login form of the chosen profile.
#[get("/")]
pub async fn show_login(
    query: web::Query<LoginQuery>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let session = SessionContext::new(session);
    if let Some(user) = session.current_user() {
        return redirect(user.profile.home_route());
    }

    let form = LoginForm {
        profile: query.into_inner().profile,
        ..LoginForm::default()
    };
    let context = base_context(&flash_messages, None, "login");
    render_login(&tera, context, &form, &FieldErrors::new())
}

#[post("/connexion")]
pub async fn login(
    session: Session,
    api: web::Data<ApiClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    let session = SessionContext::new(session);

    match auth_service::login(api.get_ref(), &session, form.clone()).await {
        Ok(outcome) => {
            FlashMessage::success(format!("Connexion réussie ! {}", outcome.welcome())).send();
            redirect(outcome.redirect_to)
        }
        Err(ServiceError::Validation(errors)) => {
            let context = base_context(&flash_messages, None, "login");
            render_login(&tera, context, &form, &errors)
        }
        Err(err) => {
            let message = format!("Erreur de connexion : {}", err.user_message());
            let context = error_context(&flash_messages, None, "login", &message);
            render_login(&tera, context, &form, &FieldErrors::new())
        }
    }
}

#[post("/deconnexion")]
pub async fn logout(session: Session) -> impl Responder {
    let session = SessionContext::new(session);
    auth_service::logout(&session);
    FlashMessage::info("Vous êtes déconnecté.").send();
    redirect("/")
}

fn patient_context(mut context: Context, form: &PatientRegistrationForm, errors: &FieldErrors) -> Context {
    context.insert("form", form);
    context.insert("errors", errors);
    context.insert("blood_groups", BLOOD_GROUPS);
    context.insert("social_coverages", SOCIAL_COVERAGES);
    context.insert("sexes", SEXES);
    context
}

#[get("/patient")]
pub async fn show_patient_registration(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = patient_context(
        base_context(&flash_messages, None, "patient"),
        &PatientRegistrationForm::default(),
        &FieldErrors::new(),
    );
    render_template(&tera, "auth/patient.html", &context)
}

#[post("/patient")]
pub async fn register_patient(
    api: web::Data<ApiClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(mut form): web::Form<PatientRegistrationForm>,
) -> impl Responder {
    match auth_service::register_patient(api.get_ref(), &mut form).await {
        Ok(()) => {
            let mut context = base_context(&flash_messages, None, "patient");
            context.insert("profile", &Profile::Patient);
            context.insert("name", &format!("{} {}", form.first_name, form.last_name));
            render_template(&tera, "auth/registered.html", &context)
        }
        Err(ServiceError::Validation(errors)) => {
            let context = patient_context(base_context(&flash_messages, None, "patient"), &form, &errors);
            render_template(&tera, "auth/patient.html", &context)
        }
        Err(err) => {
            let message = format!("Erreur lors de l'inscription : {}", err.user_message());
            let context = patient_context(
                error_context(&flash_messages, None, "patient", &message),
                &form,
                &FieldErrors::new(),
            );
            render_template(&tera, "auth/patient.html", &context)
        }
    }
}

fn dentist_context(mut context: Context, form: &DentistRegistrationForm, errors: &FieldErrors) -> Context {
    context.insert("form", form);
    context.insert("errors", errors);
    context.insert("diplomas", DIPLOMAS);
    context.insert("sexes", SEXES);
    context
}

#[get("/aide-soignant")]
pub async fn show_dentist_registration(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = dentist_context(
        base_context(&flash_messages, None, "aide-soignant"),
        &DentistRegistrationForm::default(),
        &FieldErrors::new(),
    );
    render_template(&tera, "auth/aide_soignant.html", &context)
}

#[post("/aide-soignant")]
pub async fn register_dentist(
    api: web::Data<ApiClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(mut form): web::Form<DentistRegistrationForm>,
) -> impl Responder {
    match auth_service::register_dentist(api.get_ref(), &mut form).await {
        Ok(()) => {
            let mut context = base_context(&flash_messages, None, "aide-soignant");
            context.insert("profile", &Profile::Dentiste);
            context.insert("name", &format!("{} {}", form.first_name, form.last_name));
            render_template(&tera, "auth/registered.html", &context)
        }
        Err(ServiceError::Validation(errors)) => {
            let context =
                dentist_context(base_context(&flash_messages, None, "aide-soignant"), &form, &errors);
            render_template(&tera, "auth/aide_soignant.html", &context)
        }
        Err(err) => {
            let message = format!("Erreur lors de l'inscription : {}", err.user_message());
            let context = dentist_context(
                error_context(&flash_messages, None, "aide-soignant", &message),
                &form,
                &FieldErrors::new(),
            );
            render_template(&tera, "auth/aide_soignant.html", &context)
        }
    }
}
