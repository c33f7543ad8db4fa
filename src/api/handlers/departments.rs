use crate::registration::Department;
use axum::response::{IntoResponse, Json};

#[utoipa::path(
    get,
    path = "/departments",
    responses(
        (status = 200, description = "Departments a student can select, in display order", body = [Department])
    ),
    tag = "auth"
)]
// axum handler for the department options
pub async fn departments() -> impl IntoResponse {
    Json(Department::ALL)
}
