use super::{ErrorResponse, error_response};
use crate::{login::LoginForm, registration::Role};
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::instrument;
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize)]
pub struct LoginRequest {
    pub role: Role,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("role", &self.role)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl From<LoginRequest> for LoginForm {
    fn from(request: LoginRequest) -> Self {
        Self {
            role: request.role,
            email: request.email,
            password: SecretString::from(request.password),
        }
    }
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 400, description = "Missing payload", body = ErrorResponse),
        (status = 501, description = "Login is not wired yet", body = ErrorResponse)
    ),
    tag = "auth"
)]
#[instrument(skip(payload))]
pub async fn login(payload: Result<Json<LoginRequest>, JsonRejection>) -> Response {
    let form: LoginForm = match payload {
        Ok(Json(payload)) => payload.into(),
        Err(_) => return error_response(StatusCode::BAD_REQUEST, "Missing payload"),
    };

    match form.submit() {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(StatusCode::NOT_IMPLEMENTED, err.to_string()),
    }
}
