use super::{IdentityProvider, ProviderError, SignUpRequest, SignUpResponse};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use tracing::{debug, error, instrument};
use url::Url;

const SIGNUP_PATH: &str = "/auth/v1/signup";

/// Supabase Auth (`GoTrue`) sign-up client.
#[derive(Debug, Clone)]
pub struct SupabaseProvider {
    client: Client,
    base_url: String,
    anon_key: SecretString,
}

impl SupabaseProvider {
    /// Build a client for the project at `base_url`, authenticating with the
    /// public anon key.
    ///
    /// # Errors
    /// Returns an error if the URL is not http(s) or the HTTP client cannot be built.
    pub fn new(base_url: &str, anon_key: SecretString) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .with_context(|| format!("Invalid identity provider URL: {base_url}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(anyhow!(
                "Identity provider URL must use http or https: {base_url}"
            ));
        }

        let client = Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .build()
            .context("Failed to build identity provider HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
        })
    }

    fn signup_url(&self, redirect_to: &Url) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&format!("{}{SIGNUP_PATH}", self.base_url))
            .map_err(|err| ProviderError::Transport(err.to_string()))?;
        url.query_pairs_mut()
            .append_pair("redirect_to", redirect_to.as_str());
        Ok(url)
    }
}

#[async_trait]
impl IdentityProvider for SupabaseProvider {
    #[instrument(skip(self, request), fields(role = %request.metadata.role))]
    async fn sign_up(&self, request: SignUpRequest) -> Result<SignUpResponse, ProviderError> {
        let url = self.signup_url(&request.redirect_to)?;

        let payload = json!({
            "email": request.email,
            "password": request.password.expose_secret(),
            "data": request.metadata,
        });

        debug!("sign-up URL: {}", url.path());

        let response = self
            .client
            .post(url)
            .header("apikey", self.anon_key.expose_secret())
            .bearer_auth(self.anon_key.expose_secret())
            .json(&payload)
            .send()
            .await
            .map_err(|err| {
                error!("Error calling identity provider: {}", err);
                ProviderError::Transport(err.to_string())
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|json| error_message(&json))
                .unwrap_or_default();

            error!("Identity provider rejected sign-up: {} {}", status, message);

            return Err(ProviderError::SignUp(message));
        }

        let body: Value = response.json().await.map_err(|err| {
            error!("Error parsing identity provider response: {}", err);
            ProviderError::Transport(err.to_string())
        })?;

        Ok(SignUpResponse {
            identities: parse_identities(&body),
        })
    }
}

// GoTrue has used all of these keys for error text across versions.
fn error_message(body: &Value) -> Option<String> {
    ["msg", "message", "error_description", "error"]
        .iter()
        .find_map(|key| {
            body.get(key)
                .and_then(Value::as_str)
                .filter(|message| !message.trim().is_empty())
        })
        .map(str::to_string)
}

// With email confirmation on, the user object is the whole body; with
// auto-confirm it sits under `user` next to the session.
fn parse_identities(body: &Value) -> Option<Vec<String>> {
    let user = body.get("user").filter(|user| user.is_object()).unwrap_or(body);

    user.get("identities").and_then(Value::as_array).map(|list| {
        list.iter()
            .map(|identity| {
                identity
                    .get("provider")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string()
            })
            .collect()
    })
}
