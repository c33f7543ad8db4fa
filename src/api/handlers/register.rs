use super::{ErrorResponse, MessageResponse, error_response, message_response};
use crate::registration::{
    RegistrationError, RegistrationForm, RegistrationInput, RegistrationService, Role,
};
use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::Response,
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};
use tracing::{debug, instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub role: Role,
    #[serde(default)]
    pub name: String,
    /// Required for students; ignored for teachers.
    #[serde(default)]
    pub department: Option<String>,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("role", &self.role)
            .field("name", &self.name)
            .field("department", &self.department)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl From<RegistrationRequest> for RegistrationInput {
    fn from(request: RegistrationRequest) -> Self {
        Self {
            role: request.role,
            name: request.name,
            department: request.department,
            email: request.email,
            password: SecretString::from(request.password),
            confirm_password: SecretString::from(request.confirm_password),
        }
    }
}

const fn status_for(err: &RegistrationError) -> StatusCode {
    match err {
        RegistrationError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RegistrationError::AccountAlreadyExists => StatusCode::CONFLICT,
        RegistrationError::ProviderSignup(_) => StatusCode::BAD_REQUEST,
        RegistrationError::Unknown(_) => StatusCode::BAD_GATEWAY,
    }
}

#[utoipa::path(
    post,
    path = "/register",
    request_body = RegistrationRequest,
    responses(
        (status = 201, description = "Verification email sent", body = MessageResponse),
        (status = 400, description = "Missing payload or sign-up rejected by the identity provider", body = ErrorResponse),
        (status = 409, description = "An account with this email already exists", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 502, description = "Identity provider unavailable", body = ErrorResponse)
    ),
    tag = "auth"
)]
#[instrument(skip(service, payload))]
pub async fn register(
    service: Extension<Arc<RegistrationService>>,
    payload: Result<Json<RegistrationRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            debug!("rejected payload: {}", rejection.body_text());
            return error_response(StatusCode::BAD_REQUEST, "Missing payload");
        }
    };

    debug!("registration: {:?}", request);

    let mut form = RegistrationForm::new(request.into());

    match form.submit(&service).await {
        Ok(registered) => message_response(StatusCode::CREATED, registered.message()),
        Err(err) => error_response(
            status_for(&err),
            form.state().error().unwrap_or_default(),
        ),
    }
}
