//! Contact routes, scoped to the authenticated user

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::info;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    extract::{JsonBody, QueryParams, ResourceId},
    middleware::AuthUser,
    models::{
        ContactResponse, ContactSearchQuery, CreateContactRequest, DataResponse, PagedResponse,
        UpdateContactRequest,
    },
    ownership::resolve_contact,
};

/// Create a contact owned by the caller
pub async fn create(
    Extension(user): Extension<AuthUser>,
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateContactRequest>,
) -> ApiResult<impl IntoResponse> {
    let new_contact = payload.validate()?;

    let contact = state
        .contact_repository
        .create(user.id, &new_contact)
        .await?;

    info!("Created contact {} for user {}", contact.id, user.id);
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(ContactResponse::from(contact))),
    ))
}

/// Get one of the caller's contacts
pub async fn get(
    Extension(user): Extension<AuthUser>,
    State(state): State<AppState>,
    ResourceId(id): ResourceId<i64>,
) -> ApiResult<impl IntoResponse> {
    let contact = resolve_contact(state.contact_repository.as_ref(), &user, id).await?;

    Ok(Json(DataResponse::new(ContactResponse::from(contact))))
}

/// Update one of the caller's contacts, keeping fields that were not sent
pub async fn update(
    Extension(user): Extension<AuthUser>,
    State(state): State<AppState>,
    ResourceId(id): ResourceId<i64>,
    JsonBody(payload): JsonBody<UpdateContactRequest>,
) -> ApiResult<impl IntoResponse> {
    let changes = payload.validate()?;

    let mut contact = resolve_contact(state.contact_repository.as_ref(), &user, id).await?;
    changes.apply(&mut contact);

    let contact = state
        .contact_repository
        .update(&contact)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(DataResponse::new(ContactResponse::from(contact))))
}

/// Delete one of the caller's contacts together with its addresses
pub async fn delete(
    Extension(user): Extension<AuthUser>,
    State(state): State<AppState>,
    ResourceId(id): ResourceId<i64>,
) -> ApiResult<impl IntoResponse> {
    let contact = resolve_contact(state.contact_repository.as_ref(), &user, id).await?;

    if !state.contact_repository.delete(&contact).await? {
        return Err(ApiError::NotFound);
    }

    info!("Deleted contact {} of user {}", contact.id, user.id);
    Ok(Json(DataResponse::new(true)))
}

/// Search the caller's contacts by name, email and phone
pub async fn search(
    Extension(user): Extension<AuthUser>,
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ContactSearchQuery>,
) -> ApiResult<impl IntoResponse> {
    let (filter, page) = query.into_parts();

    let (contacts, total) = state
        .contact_repository
        .search(user.id, &filter, page)
        .await?;

    Ok(Json(PagedResponse {
        data: contacts.into_iter().map(ContactResponse::from).collect(),
        meta: page.meta(total),
    }))
}
