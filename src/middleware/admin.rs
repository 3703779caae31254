use super::auth::AuthUser;
use crate::{
    error::{AppError, Result},
    state::AppState,
};
use axum::{extract::{Request, State}, middleware::Next, response::Response};

/// Must be layered inside `auth_middleware` so the user id extension is
/// already present. The role comes from the database rather than the token
/// claims so a revoked admin loses access as soon as the row changes.
pub async fn admin_authorization(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    request: Request,
    next: Next,
) -> Result<Response> {
    let user = state
        .user_repository
        .find_by_id(user_id)
        .await?
        .ok_or(AppError::Unauthorized("Invalid credentials".to_string()))?;

    if user.role != "admin" {
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }

    Ok(next.run(request).await)
}
