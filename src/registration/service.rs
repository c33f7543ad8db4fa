//! Sign-up orchestration: validate, build metadata, hand off to the provider.

use super::{
    metadata::UserMetadata,
    validation::{RegistrationInput, ValidationError, validate},
};
use crate::provider::{IdentityProvider, ProviderError, SignUpRequest};
use anyhow::{Context, Result, anyhow};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument, warn};
use url::Url;

pub const VERIFICATION_SENT_MESSAGE: &str = "A verification email has been sent to your university inbox. Please open it and confirm your email to activate your account.";

const SIGNUP_FAILED_MESSAGE: &str = "Signup failed";
const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    ProviderSignup(String),
    #[error("An account with this email already exists. Please login instead.")]
    AccountAlreadyExists,
    #[error("{0}")]
    Unknown(String),
}

impl From<ProviderError> for RegistrationError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::SignUp(message) if message.trim().is_empty() => {
                Self::ProviderSignup(SIGNUP_FAILED_MESSAGE.to_string())
            }
            ProviderError::SignUp(message) => Self::ProviderSignup(message),
            ProviderError::Transport(message) if message.trim().is_empty() => {
                Self::Unknown(UNKNOWN_ERROR_MESSAGE.to_string())
            }
            ProviderError::Transport(message) => Self::Unknown(message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registered {
    pub email: String,
    pub metadata: UserMetadata,
}

impl Registered {
    #[must_use]
    pub const fn message(&self) -> &'static str {
        VERIFICATION_SENT_MESSAGE
    }
}

#[derive(Clone, Debug)]
pub struct RegistrationConfig {
    app_base_url: String,
    verify_url: Url,
}

impl RegistrationConfig {
    /// # Errors
    /// Returns an error if `app_base_url` is not an absolute http(s) URL.
    pub fn new(app_base_url: &str) -> Result<Self> {
        let base = app_base_url.trim_end_matches('/');
        let verify_url = Url::parse(&format!("{base}/verify"))
            .with_context(|| format!("Invalid app base URL: {app_base_url}"))?;
        if !matches!(verify_url.scheme(), "http" | "https") {
            return Err(anyhow!("App base URL must use http or https: {app_base_url}"));
        }

        Ok(Self {
            app_base_url: base.to_string(),
            verify_url,
        })
    }

    #[must_use]
    pub fn app_base_url(&self) -> &str {
        &self.app_base_url
    }

    /// Link the verification email points back to.
    #[must_use]
    pub fn verify_url(&self) -> &Url {
        &self.verify_url
    }
}

pub struct RegistrationService {
    config: RegistrationConfig,
    provider: Arc<dyn IdentityProvider>,
}

impl std::fmt::Debug for RegistrationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RegistrationService {
    #[must_use]
    pub fn new(config: RegistrationConfig, provider: Arc<dyn IdentityProvider>) -> Self {
        Self { config, provider }
    }

    #[must_use]
    pub fn config(&self) -> &RegistrationConfig {
        &self.config
    }

    /// Validate the input and, if it passes, create the account.
    ///
    /// Validation failures return before any network call. Provider failures
    /// are not retried.
    ///
    /// # Errors
    /// Returns the first validation failure or the mapped provider outcome.
    #[instrument(skip(self, input), fields(role = %input.role))]
    pub async fn register(
        &self,
        input: &RegistrationInput,
    ) -> Result<Registered, RegistrationError> {
        let registration = validate(input).inspect_err(|err| {
            info!("registration rejected: {}", err);
        })?;

        let metadata = UserMetadata::for_registration(&registration);

        let request = SignUpRequest {
            email: registration.email.clone(),
            password: registration.password,
            metadata: metadata.clone(),
            redirect_to: self.config.verify_url().clone(),
        };

        let response = self.provider.sign_up(request).await.map_err(|err| {
            error!("sign-up failed: {}", err);
            RegistrationError::from(err)
        })?;

        if response.is_existing_account() {
            warn!("sign-up for an already registered email");
            return Err(RegistrationError::AccountAlreadyExists);
        }

        info!("verification email requested");

        Ok(Registered {
            email: registration.email,
            metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::SignUpResponse;
    use crate::registration::{Department, ExternalId, Role};
    use async_trait::async_trait;
    use secrecy::{ExposeSecret, SecretString};
    use std::sync::Mutex;

    /// Records every request and replies with a canned outcome.
    struct StubProvider {
        outcome: Result<SignUpResponse, ProviderError>,
        calls: Mutex<Vec<SignUpRequest>>,
    }

    impl StubProvider {
        fn new(outcome: Result<SignUpResponse, ProviderError>) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn created() -> Arc<Self> {
            Self::new(Ok(SignUpResponse {
                identities: Some(vec!["email".to_string()]),
            }))
        }

        fn calls(&self) -> Vec<SignUpRequest> {
            self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl IdentityProvider for StubProvider {
        async fn sign_up(&self, request: SignUpRequest) -> Result<SignUpResponse, ProviderError> {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(request);
            }
            self.outcome.clone()
        }
    }

    fn service(provider: Arc<StubProvider>) -> Result<RegistrationService> {
        let config = RegistrationConfig::new("https://portal.ku.edu.np/")?;
        Ok(RegistrationService::new(config, provider))
    }

    fn student_input() -> RegistrationInput {
        RegistrationInput {
            role: Role::Student,
            name: "Asha".to_string(),
            department: Some("Engineering".to_string()),
            email: "a@student.ku.edu.np".to_string(),
            password: SecretString::from("abcdef"),
            confirm_password: SecretString::from("abcdef"),
        }
    }

    fn teacher_input() -> RegistrationInput {
        RegistrationInput {
            role: Role::Teacher,
            name: "Bikash".to_string(),
            department: None,
            email: "a@ku.edu.np".to_string(),
            password: SecretString::from("abcdef"),
            confirm_password: SecretString::from("abcdef"),
        }
    }

    #[test]
    fn config_builds_verify_url() -> Result<()> {
        let config = RegistrationConfig::new("https://portal.ku.edu.np/")?;
        assert_eq!(config.app_base_url(), "https://portal.ku.edu.np");
        assert_eq!(config.verify_url().as_str(), "https://portal.ku.edu.np/verify");
        Ok(())
    }

    #[test]
    fn config_rejects_bad_urls() {
        assert!(RegistrationConfig::new("portal.ku.edu.np").is_err());
        assert!(RegistrationConfig::new("ftp://portal.ku.edu.np").is_err());
    }

    #[tokio::test]
    async fn student_registration_sends_department_and_student_id() -> Result<()> {
        let provider = StubProvider::created();
        let registered = service(provider.clone())?.register(&student_input()).await?;

        assert_eq!(registered.message(), VERIFICATION_SENT_MESSAGE);
        assert_eq!(registered.metadata.department, Some(Department::Engineering));
        assert!(matches!(
            registered.metadata.external_id,
            ExternalId::Student(_)
        ));

        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        let call = &calls[0];
        assert_eq!(call.email, "a@student.ku.edu.np");
        assert_eq!(call.password.expose_secret(), "abcdef");
        assert_eq!(call.redirect_to.as_str(), "https://portal.ku.edu.np/verify");
        assert_eq!(call.metadata, registered.metadata);
        Ok(())
    }

    #[tokio::test]
    async fn teacher_registration_has_teacher_id_and_no_department() -> Result<()> {
        let provider = StubProvider::created();
        let registered = service(provider)?.register(&teacher_input()).await?;
        assert_eq!(registered.metadata.role, Role::Teacher);
        assert_eq!(registered.metadata.department, None);
        assert!(matches!(
            registered.metadata.external_id,
            ExternalId::Teacher(_)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn validation_failure_skips_provider() -> Result<()> {
        let provider = StubProvider::created();
        let mut input = teacher_input();
        input.email = "a@student.ku.edu.np".to_string();

        let result = service(provider.clone())?.register(&input).await;
        assert_eq!(
            result,
            Err(RegistrationError::Validation(ValidationError::DomainMismatch(
                Role::Teacher
            )))
        );
        assert!(provider.calls().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn empty_identity_list_is_existing_account() -> Result<()> {
        let provider = StubProvider::new(Ok(SignUpResponse {
            identities: Some(Vec::new()),
        }));
        let result = service(provider)?.register(&student_input()).await;
        assert_eq!(result, Err(RegistrationError::AccountAlreadyExists));
        if let Err(err) = result {
            assert_eq!(
                err.to_string(),
                "An account with this email already exists. Please login instead."
            );
        }
        Ok(())
    }

    #[tokio::test]
    async fn provider_message_is_shown_verbatim() -> Result<()> {
        let provider = StubProvider::new(Err(ProviderError::SignUp(
            "Password should contain at least one character".to_string(),
        )));
        let result = service(provider)?.register(&student_input()).await;
        assert_eq!(
            result.map_err(|err| err.to_string()),
            Err("Password should contain at least one character".to_string())
        );
        Ok(())
    }

    #[tokio::test]
    async fn empty_provider_message_falls_back() -> Result<()> {
        let provider = StubProvider::new(Err(ProviderError::SignUp(String::new())));
        let result = service(provider)?.register(&student_input()).await;
        assert_eq!(
            result,
            Err(RegistrationError::ProviderSignup("Signup failed".to_string()))
        );
        Ok(())
    }

    #[tokio::test]
    async fn transport_failure_is_unknown_error() -> Result<()> {
        let provider = StubProvider::new(Err(ProviderError::Transport(
            "connection refused".to_string(),
        )));
        let result = service(provider.clone())?.register(&student_input()).await;
        assert_eq!(
            result,
            Err(RegistrationError::Unknown("connection refused".to_string()))
        );

        let provider = StubProvider::new(Err(ProviderError::Transport(String::new())));
        let result = service(provider)?.register(&student_input()).await;
        assert_eq!(
            result,
            Err(RegistrationError::Unknown("Unknown error".to_string()))
        );
        Ok(())
    }
}
