use crate::backend::AuthBackend;
use crate::forms::auth::LoginForm;
use crate::forms::dentist::DentistRegistrationForm;
use crate::forms::patient::PatientRegistrationForm;
use crate::services::{ServiceError, ServiceResult};
use crate::session::{KeyValueStore, SessionContext, SessionRecord};

const UNKNOWN_ACCOUNT: &str = "Identifiants incorrects ou utilisateur inexistant.";

/// Result of a successful login.
#[derive(Debug)]
pub struct LoginOutcome {
    pub record: SessionRecord,
    /// Home page of the user's profile.
    pub redirect_to: &'static str,
}

impl LoginOutcome {
    pub fn welcome(&self) -> String {
        format!("Bienvenue {} {}", self.record.prenom, self.record.nom)
    }
}

/// Validates the credentials, logs in against the backend and stores the session.
///
/// No request is issued when the form is invalid. The profile is derived from
/// the backend role, whatever card the user picked.
pub async fn login<B, S>(
    backend: &B,
    session: &SessionContext<S>,
    mut form: LoginForm,
) -> ServiceResult<LoginOutcome>
where
    B: AuthBackend,
    S: KeyValueStore,
{
    form.check().map_err(ServiceError::Validation)?;

    let response = backend.login(&form.credentials()).await.map_err(|err| {
        log::error!("Failed to log in: {err}");
        ServiceError::from(err)
    })?;

    let record = SessionRecord::from_login(response)
        .ok_or_else(|| ServiceError::Form(UNKNOWN_ACCOUNT.to_string()))?;
    let redirect_to = record.profile.home_route();

    session.set_session(record.clone())?;

    Ok(LoginOutcome {
        record,
        redirect_to,
    })
}

pub fn logout<S: KeyValueStore>(session: &SessionContext<S>) {
    session.clear_session();
}

pub async fn register_patient<B>(backend: &B, form: &mut PatientRegistrationForm) -> ServiceResult<()>
where
    B: AuthBackend,
{
    form.check().map_err(ServiceError::Validation)?;

    backend
        .register_patient(&form.to_new_patient())
        .await
        .map_err(|err| {
            log::error!("Failed to register patient: {err}");
            ServiceError::Api(err)
        })?;

    Ok(())
}

pub async fn register_dentist<B>(backend: &B, form: &mut DentistRegistrationForm) -> ServiceResult<()>
where
    B: AuthBackend,
{
    form.check().map_err(ServiceError::Validation)?;

    backend
        .register_dentist(&form.to_new_dentist())
        .await
        .map_err(|err| {
            log::error!("Failed to register dentist: {err}");
            ServiceError::Api(err)
        })?;

    Ok(())
}
