//! Authentication middleware for bearer token validation

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use std::ops::Deref;
use tracing::warn;

use crate::{error::ApiError, models::User, state::AppState};

/// Authenticated user information
///
/// Inserted into the request extensions by [`auth_middleware`]; handlers take
/// it as `Extension<AuthUser>`.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self(user)
    }
}

impl Deref for AuthUser {
    type Target = User;

    fn deref(&self) -> &User {
        &self.0
    }
}

/// Authentication middleware
///
/// The `Authorization` header carries the token issued at login, optionally
/// prefixed with `Bearer `. Requests without a token matching a user are
/// rejected before reaching any handler.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .map(|value| value.strip_prefix("Bearer ").unwrap_or(value))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .ok_or(ApiError::Unauthorized)?;

    let user = state
        .user_repository
        .find_by_token(&token)
        .await?
        .ok_or_else(|| {
            warn!("Rejected request with unknown token");
            ApiError::Unauthorized
        })?;

    req.extensions_mut().insert(AuthUser::from(user));

    Ok(next.run(req).await)
}
