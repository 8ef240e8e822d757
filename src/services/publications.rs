use crate::backend::{PublicationReader, PublicationWriter};
use crate::domain::auth::Profile;
use crate::domain::publication::Publication;
use crate::forms::publication::PublicationForm;
use crate::services::{ServiceError, ServiceResult, require_profile};
use crate::session::{KeyValueStore, SessionContext};

/// Feed of publications, most recent first.
pub async fn list_publications<B: PublicationReader>(backend: &B) -> ServiceResult<Vec<Publication>> {
    let mut publications = backend.list_publications().await.map_err(|err| {
        log::error!("Failed to list publications: {err}");
        ServiceError::from(err)
    })?;
    publications.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(publications)
}

/// Publishes an article signed with the logged-in staff member's name.
pub async fn create_publication<B, S>(
    backend: &B,
    session: &SessionContext<S>,
    form: &mut PublicationForm,
) -> ServiceResult<()>
where
    B: PublicationWriter,
    S: KeyValueStore,
{
    let user = require_profile(session, Profile::Dentiste)?;
    form.check().map_err(ServiceError::Validation)?;

    let author = format!("Dr. {}", user.display_name());
    backend
        .create_publication(&form.to_new_publication(&author))
        .await
        .map_err(|err| {
            log::error!("Failed to create publication: {err}");
            ServiceError::Api(err)
        })?;

    Ok(())
}
