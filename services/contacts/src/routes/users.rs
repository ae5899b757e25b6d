//! User registration, login and profile routes

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::{info, warn};

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    extract::JsonBody,
    middleware::AuthUser,
    models::{
        DataResponse, LoginRequest, NewUser, RegisterRequest, UpdateUserRequest, User,
        UserResponse,
    },
    password::{generate_token, hash_password, verify_password, verify_without_user},
};

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    let registration = payload.validate()?;

    if state
        .user_repository
        .find_by_username(&registration.username)
        .await?
        .is_some()
    {
        return Err(ApiError::UsernameTaken);
    }

    let password_hash = hash_password(&registration.password)?;
    let user = state
        .user_repository
        .create(&NewUser {
            username: registration.username,
            password_hash,
            name: registration.name,
        })
        .await?
        .ok_or(ApiError::UsernameTaken)?;

    info!("Registered user: {}", user.id);
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(UserResponse::from(user))),
    ))
}

/// Log in with username and password, issuing a fresh token
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let credentials = payload.validate()?;
    info!("Login attempt for user: {}", credentials.username);

    let Some(user) = state
        .user_repository
        .find_by_username(&credentials.username)
        .await?
    else {
        verify_without_user(&credentials.password)?;
        warn!("Login failed for user: {}", credentials.username);
        return Err(ApiError::InvalidCredentials);
    };

    if !verify_password(&credentials.password, &user.password_hash)? {
        warn!("Login failed for user: {}", credentials.username);
        return Err(ApiError::InvalidCredentials);
    }

    let token = generate_token();
    state
        .user_repository
        .set_token(user.id, Some(&token))
        .await?;

    let user = User {
        token: Some(token),
        ..user
    };
    Ok(Json(DataResponse::new(UserResponse::from(user))))
}

/// Profile of the authenticated user
pub async fn current(Extension(user): Extension<AuthUser>) -> ApiResult<impl IntoResponse> {
    Ok(Json(DataResponse::new(UserResponse::from(user.0))))
}

/// Change the name and/or password of the authenticated user
pub async fn update_current(
    Extension(user): Extension<AuthUser>,
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<UpdateUserRequest>,
) -> ApiResult<impl IntoResponse> {
    let changes = payload.validate()?;

    let mut user = user.0;
    if let Some(name) = changes.name {
        user.name = name;
    }
    if let Some(password) = changes.password {
        user.password_hash = hash_password(&password)?;
    }

    let user = state
        .user_repository
        .update(&user)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    Ok(Json(DataResponse::new(UserResponse::from(user))))
}

/// Revoke the token of the authenticated user
pub async fn logout(
    Extension(user): Extension<AuthUser>,
    State(state): State<AppState>,
) -> ApiResult<impl IntoResponse> {
    state.user_repository.set_token(user.id, None).await?;

    info!("User logged out: {}", user.id);
    Ok(Json(DataResponse::new(true)))
}
