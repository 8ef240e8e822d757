mod common;

use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::{Value, json};

use dentalcare_front::api::{ApiClient, ApiError, GENERIC_ERROR_MESSAGE};
use dentalcare_front::backend::ServiceReader;

use common::spawn_backend;

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/Backoffice/api")
            .route(
                "/services",
                web::get().to(|| async {
                    HttpResponse::Ok().json(json!([
                        {"numSM": 2, "nomSM": "Détartrage", "typeSM": "Parodontologie", "tarifSM": 60.0},
                        {"numSM": 1, "nomSM": "Consultation", "tarifSM": 35.0}
                    ]))
                }),
            )
            .route(
                "/services/{id}",
                web::delete().to(|| async { HttpResponse::NoContent().finish() }),
            )
            .route(
                "/patients/{id}",
                web::get().to(|| async {
                    HttpResponse::NotFound().json(json!({"message": "Patient introuvable"}))
                }),
            )
            .route(
                "/dentistes",
                web::get().to(|| async {
                    HttpResponse::InternalServerError()
                        .content_type("text/html")
                        .body("<html>boom</html>")
                }),
            )
            .route(
                "/publications",
                web::get().to(|| async { HttpResponse::BadRequest().json(json!({"error": "bad"})) }),
            )
            .route(
                "/echo-auth",
                web::get().to(|req: HttpRequest| async move {
                    let auth = req
                        .headers()
                        .get("authorization")
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    HttpResponse::Ok().json(json!({ "authorization": auth }))
                }),
            ),
    );
}

#[actix_web::test]
async fn no_content_decodes_as_empty_object() {
    let client = ApiClient::new(spawn_backend(routes));

    let body = client.delete("/services/4").await.unwrap();

    assert_eq!(body, json!({}));
}

#[actix_web::test]
async fn error_body_message_is_surfaced() {
    let client = ApiClient::new(spawn_backend(routes));

    let err = client.get::<Value>("/patients/7").await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Patient introuvable");
}

#[actix_web::test]
async fn non_json_error_reports_status() {
    let client = ApiClient::new(spawn_backend(routes));

    let err = client.get::<Value>("/dentistes").await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().contains("500"));
}

#[actix_web::test]
async fn json_error_without_message_is_generic() {
    let client = ApiClient::new(spawn_backend(routes));

    let err = client.get::<Value>("/publications").await.unwrap_err();

    assert_eq!(err.to_string(), GENERIC_ERROR_MESSAGE);
}

#[actix_web::test]
async fn bearer_token_is_forwarded() {
    let client = ApiClient::new(spawn_backend(routes)).with_bearer_token(Some("abc"));

    let body = client.get::<Value>("/echo-auth").await.unwrap();

    assert_eq!(body["authorization"], "Bearer abc");
}

#[actix_web::test]
async fn catalog_is_decoded_from_backend_names() {
    let client = ApiClient::new(spawn_backend(routes));

    let services = client.list_services().await.unwrap();

    assert_eq!(services.len(), 2);
    assert_eq!(services[0].name, "Détartrage");
    assert_eq!(services[1].service_type, "");
}

#[actix_web::test]
async fn unreachable_backend_is_a_network_error() {
    let client = ApiClient::new("http://127.0.0.1:9/Backoffice/api");

    let err = client.get::<Value>("/services").await.unwrap_err();

    assert!(matches!(err, ApiError::Network(_)));
}
