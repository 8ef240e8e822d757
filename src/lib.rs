#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::middleware::{Compress, Logger};
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::api::ApiClient;
#[cfg(feature = "server")]
use crate::middleware::RedirectUnauthorized;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::routes::auth::{
    login, logout, register_dentist, register_patient, show_dentist_registration, show_login,
    show_patient_registration,
};
#[cfg(feature = "server")]
use crate::routes::booking::{post_booking, show_booking};
#[cfg(feature = "server")]
use crate::routes::catalog::{
    confirm_delete_service, create_service, delete_service, show_service,
    show_service_management, show_services,
};
#[cfg(feature = "server")]
use crate::routes::profiles::{
    change_appointment_status, show_dentist_dashboard, show_patient_profile,
};
#[cfg(feature = "server")]
use crate::routes::not_found;
#[cfg(feature = "server")]
use crate::routes::publications::{create_publication, show_publication_form, show_publications};

pub mod api;
pub mod backend;
pub mod booking;
pub mod constants;
pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod forms;
pub mod services;
pub mod session;

#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod routes;

/// Registers every page under the scope that turns `401` answers into a
/// redirect to the login page.
#[cfg(feature = "server")]
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("")
            .wrap(RedirectUnauthorized)
            .service(show_login)
            .service(login)
            .service(logout)
            .service(show_patient_registration)
            .service(register_patient)
            .service(show_dentist_registration)
            .service(register_dentist)
            .service(show_patient_profile)
            .service(show_dentist_dashboard)
            .service(change_appointment_status)
            .service(show_services)
            .service(show_service_management)
            .service(create_service)
            .service(confirm_delete_service)
            .service(delete_service)
            .service(show_service)
            .service(show_publications)
            .service(show_publication_form)
            .service(create_publication)
            .service(show_booking)
            .service(post_booking),
    )
    .default_service(web::to(not_found));
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Keys and stores for sessions and flash messages.
    let secret_key = Key::try_from(server_config.secret.as_bytes()).map_err(|e| {
        std::io::Error::other(format!("Invalid secret (at least 64 bytes required): {e}"))
    })?;

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let api = ApiClient::new(server_config.api_base_url.clone());

    let bind_address = (server_config.address.clone(), server_config.port);
    let cookie_secure = server_config.cookie_secure;

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(cookie_secure)
                    .build(),
            )
            .wrap(Compress::default())
            .wrap(Logger::default())
            .service(Files::new("/assets", "./assets"))
            .configure(configure_routes)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(api.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
