use crate::backend::{ServiceReader, ServiceWriter};
use crate::domain::auth::Profile;
use crate::domain::service::CatalogService;
use crate::domain::types::ServiceId;
use crate::forms::service::{DeleteServiceForm, ServiceForm};
use crate::services::{ServiceError, ServiceResult, require_profile};
use crate::session::{KeyValueStore, SessionContext};

/// Catalog shown to every visitor, sorted by id.
pub async fn list_services<B: ServiceReader>(backend: &B) -> ServiceResult<Vec<CatalogService>> {
    let mut services = backend.list_services().await.map_err(|err| {
        log::error!("Failed to list services: {err}");
        ServiceError::from(err)
    })?;
    services.sort_by_key(|service| service.id);
    Ok(services)
}

pub async fn load_service<B: ServiceReader>(backend: &B, raw_id: &str) -> ServiceResult<CatalogService> {
    let id = ServiceId::parse(raw_id).map_err(|_| ServiceError::NotFound(None))?;
    backend.get_service(id).await.map_err(|err| {
        log::error!("Failed to load service {id}: {err}");
        ServiceError::from(err)
    })
}

/// Validates the staff form and adds the service to the catalog.
pub async fn create_service<B, S>(
    backend: &B,
    session: &SessionContext<S>,
    form: &mut ServiceForm,
) -> ServiceResult<()>
where
    B: ServiceWriter,
    S: KeyValueStore,
{
    require_profile(session, Profile::Dentiste)?;
    form.check().map_err(ServiceError::Validation)?;

    backend
        .create_service(&form.to_new_service())
        .await
        .map_err(|err| {
            log::error!("Failed to create service: {err}");
            ServiceError::Api(err)
        })?;

    Ok(())
}

/// Service about to be deleted, for the confirmation page.
pub async fn confirm_delete<B, S>(
    backend: &B,
    session: &SessionContext<S>,
    raw_id: &str,
) -> ServiceResult<CatalogService>
where
    B: ServiceReader,
    S: KeyValueStore,
{
    require_profile(session, Profile::Dentiste)?;
    load_service(backend, raw_id).await
}

/// Deletes a service once the staff member confirmed it.
///
/// Without confirmation nothing is sent.
pub async fn delete_service<B, S>(
    backend: &B,
    session: &SessionContext<S>,
    raw_id: &str,
    form: &DeleteServiceForm,
) -> ServiceResult<()>
where
    B: ServiceWriter,
    S: KeyValueStore,
{
    require_profile(session, Profile::Dentiste)?;
    let id = ServiceId::parse(raw_id)?;

    if !form.is_confirmed() {
        return Err(ServiceError::Form("Suppression annulée".to_string()));
    }

    backend.delete_service(id).await.map_err(|err| {
        log::error!("Failed to delete service {id}: {err}");
        ServiceError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::fake::FakeBackend;
    use crate::domain::auth::Role;
    use crate::services::test_support::{anonymous, session_for};

    fn service(id: i64) -> CatalogService {
        CatalogService {
            id: ServiceId::new(id).unwrap(),
            name: format!("Service #{id}"),
            service_type: "Dentisterie générale".into(),
            description: String::new(),
            price: 50.0,
        }
    }

    #[tokio::test]
    async fn list_is_sorted_by_id() {
        let backend = FakeBackend {
            services: vec![service(3), service(1)],
            ..FakeBackend::new()
        };

        let ids = list_services(&backend)
            .await
            .unwrap()
            .iter()
            .map(|s| s.id.get())
            .collect::<Vec<_>>();

        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn unknown_or_malformed_id_is_not_found() {
        let backend = FakeBackend {
            services: vec![service(1)],
            ..FakeBackend::new()
        };

        assert!(matches!(
            load_service(&backend, "9").await,
            Err(ServiceError::NotFound(Some(_)))
        ));
        assert!(matches!(
            load_service(&backend, "abc").await,
            Err(ServiceError::NotFound(None))
        ));
        assert_eq!(backend.calls(), vec!["GET /services/9"]);
    }

    #[tokio::test]
    async fn delete_without_confirmation_sends_nothing() {
        let backend = FakeBackend::new();
        let session = session_for(3, Role::Dentiste);

        let err = delete_service(&backend, &session, "4", &DeleteServiceForm::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Form(_)));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn confirmed_delete_calls_backend() {
        let backend = FakeBackend::new();
        let session = session_for(3, Role::Dentiste);
        let form = DeleteServiceForm {
            confirm: "oui".into(),
        };

        delete_service(&backend, &session, "4", &form).await.unwrap();

        assert_eq!(backend.calls(), vec!["DELETE /services/4"]);
    }

    #[tokio::test]
    async fn patients_cannot_manage_catalog() {
        let backend = FakeBackend::new();
        let mut form = ServiceForm::default();

        let err = create_service(&backend, &session_for(7, Role::Patient), &mut form)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized));

        let err = create_service(&backend, &anonymous(), &mut form)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn valid_service_is_posted() {
        let backend = FakeBackend::new();
        let mut form = ServiceForm {
            name: "Détartrage".into(),
            price: "60".into(),
            sessions: "1".into(),
            service_type: "Parodontologie".into(),
            description: "Nettoyage".into(),
        };

        create_service(&backend, &session_for(3, Role::Dentiste), &mut form)
            .await
            .unwrap();

        assert_eq!(backend.calls(), vec!["POST /services"]);
        assert_eq!(backend.sent()[0]["tarifSM"], 60.0);
    }
}
