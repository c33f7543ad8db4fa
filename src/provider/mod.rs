//! Identity provider seam.
//!
//! Account creation, credential storage and the verification email all live
//! in a managed identity service. The registration flow only depends on the
//! [`IdentityProvider`] contract; [`SupabaseProvider`] is the production
//! adapter.

mod supabase;

pub use supabase::SupabaseProvider;

use crate::registration::UserMetadata;
use async_trait::async_trait;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Everything the provider needs to create one account.
#[derive(Debug, Clone)]
pub struct SignUpRequest {
    pub email: String,
    pub password: SecretString,
    pub metadata: UserMetadata,
    /// Where the verification link sends the user back to.
    pub redirect_to: Url,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpResponse {
    /// Linked identities reported for the user; `None` when the provider
    /// omitted the field.
    pub identities: Option<Vec<String>>,
}

impl SignUpResponse {
    /// The provider hides existing accounts behind an empty identity list
    /// instead of returning an error.
    #[must_use]
    pub fn is_existing_account(&self) -> bool {
        self.identities.as_ref().is_some_and(Vec::is_empty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The provider rejected the sign-up; the message is shown to the user as is.
    #[error("{0}")]
    SignUp(String),
    /// The provider could not be reached or answered with something unreadable.
    #[error("{0}")]
    Transport(String),
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account and trigger the verification email.
    ///
    /// # Errors
    /// Returns [`ProviderError`] when the provider rejects the request or cannot be reached.
    async fn sign_up(&self, request: SignUpRequest) -> Result<SignUpResponse, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_identity_list_means_existing_account() {
        let response = SignUpResponse {
            identities: Some(Vec::new()),
        };
        assert!(response.is_existing_account());
    }

    #[test]
    fn missing_or_populated_identities_are_new_accounts() {
        assert!(!SignUpResponse::default().is_existing_account());
        let response = SignUpResponse {
            identities: Some(vec!["email".to_string()]),
        };
        assert!(!response.is_existing_account());
    }
}
