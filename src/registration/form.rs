//! Per-submission form state.
//!
//! A form owns its input plus the `loading` / `error` / `message` flags a UI
//! renders. Nothing here is shared between requests; `submit` takes
//! `&mut self`, so a form can only have one submission in flight.

use super::{
    service::{Registered, RegistrationError, RegistrationService},
    validation::RegistrationInput,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    loading: bool,
    error: Option<String>,
    message: Option<String>,
}

impl FormState {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Clears `loading` however the submission ends, including a dropped future.
struct LoadingGuard<'a>(&'a mut bool);

impl<'a> LoadingGuard<'a> {
    fn start(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

#[derive(Debug, Default)]
pub struct RegistrationForm {
    input: RegistrationInput,
    state: FormState,
}

impl RegistrationForm {
    #[must_use]
    pub fn new(input: RegistrationInput) -> Self {
        Self {
            input,
            state: FormState::default(),
        }
    }

    #[cfg(test)]
    fn input_mut(&mut self) -> &mut RegistrationInput {
        &mut self.input
    }

    #[must_use]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Run one submission, leaving exactly one of `error` / `message` set.
    ///
    /// # Errors
    /// Returns the same [`RegistrationError`] that is recorded in the state.
    pub async fn submit(
        &mut self,
        service: &RegistrationService,
    ) -> Result<Registered, RegistrationError> {
        self.state.error = None;
        self.state.message = None;

        let result = {
            let _loading = LoadingGuard::start(&mut self.state.loading);
            service.register(&self.input).await
        };

        match &result {
            Ok(registered) => self.state.message = Some(registered.message().to_string()),
            Err(err) => self.state.error = Some(err.to_string()),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{IdentityProvider, ProviderError, SignUpRequest, SignUpResponse};
    use crate::registration::{RegistrationConfig, Role, service::VERIFICATION_SENT_MESSAGE};
    use anyhow::Result;
    use async_trait::async_trait;
    use secrecy::SecretString;
    use std::{future::Future, pin::pin, sync::Arc, task::Poll};

    struct FixedProvider(Result<SignUpResponse, ProviderError>);

    #[async_trait]
    impl IdentityProvider for FixedProvider {
        async fn sign_up(&self, _request: SignUpRequest) -> Result<SignUpResponse, ProviderError> {
            self.0.clone()
        }
    }

    /// Never answers, so the submission stays in flight.
    struct PendingProvider;

    #[async_trait]
    impl IdentityProvider for PendingProvider {
        async fn sign_up(&self, _request: SignUpRequest) -> Result<SignUpResponse, ProviderError> {
            std::future::pending().await
        }
    }

    fn service(provider: Arc<dyn IdentityProvider>) -> Result<RegistrationService> {
        Ok(RegistrationService::new(
            RegistrationConfig::new("https://portal.ku.edu.np")?,
            provider,
        ))
    }

    fn teacher_form(email: &str) -> RegistrationForm {
        RegistrationForm::new(RegistrationInput {
            role: Role::Teacher,
            name: "Bikash".to_string(),
            department: None,
            email: email.to_string(),
            password: SecretString::from("abcdef"),
            confirm_password: SecretString::from("abcdef"),
        })
    }

    #[tokio::test]
    async fn success_sets_message_only() -> Result<()> {
        let service = service(Arc::new(FixedProvider(Ok(SignUpResponse {
            identities: Some(vec!["email".to_string()]),
        }))))?;
        let mut form = teacher_form("a@teacher.ku.edu.np");

        assert!(form.submit(&service).await.is_ok());
        assert_eq!(form.state().message(), Some(VERIFICATION_SENT_MESSAGE));
        assert_eq!(form.state().error(), None);
        assert!(!form.state().is_loading());
        Ok(())
    }

    #[tokio::test]
    async fn existing_account_sets_error_and_no_message() -> Result<()> {
        let service = service(Arc::new(FixedProvider(Ok(SignUpResponse {
            identities: Some(Vec::new()),
        }))))?;
        let mut form = teacher_form("a@ku.edu.np");

        assert!(form.submit(&service).await.is_err());
        assert_eq!(
            form.state().error(),
            Some("An account with this email already exists. Please login instead.")
        );
        assert_eq!(form.state().message(), None);
        assert!(!form.state().is_loading());
        Ok(())
    }

    #[tokio::test]
    async fn resubmission_clears_previous_error() -> Result<()> {
        let service = service(Arc::new(FixedProvider(Ok(SignUpResponse::default()))))?;
        let mut form = teacher_form("a@gmail.com");

        assert!(form.submit(&service).await.is_err());
        assert!(form.state().error().is_some());

        form.input_mut().email = "a@ku.edu.np".to_string();
        assert!(form.submit(&service).await.is_ok());
        assert_eq!(form.state().error(), None);
        assert_eq!(form.state().message(), Some(VERIFICATION_SENT_MESSAGE));
        Ok(())
    }

    #[tokio::test]
    async fn dropped_submission_clears_loading() -> Result<()> {
        let service = service(Arc::new(PendingProvider))?;
        let mut form = teacher_form("a@ku.edu.np");

        {
            let mut submission = pin!(form.submit(&service));
            let polled = std::future::poll_fn(|cx| {
                Poll::Ready(submission.as_mut().poll(cx).is_pending())
            })
            .await;
            assert!(polled);
        }

        assert!(!form.state().is_loading());
        assert_eq!(form.state().error(), None);
        assert_eq!(form.state().message(), None);
        Ok(())
    }
}
