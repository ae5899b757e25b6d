//! Address routes nested under a contact

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::info;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    extract::{JsonBody, ResourceId},
    middleware::AuthUser,
    models::{AddressResponse, CreateAddressRequest, DataResponse, UpdateAddressRequest},
    ownership::{resolve_address, resolve_contact},
};

/// Add an address to one of the caller's contacts
pub async fn create(
    Extension(user): Extension<AuthUser>,
    State(state): State<AppState>,
    ResourceId(contact_id): ResourceId<i64>,
    JsonBody(payload): JsonBody<CreateAddressRequest>,
) -> ApiResult<impl IntoResponse> {
    let new_address = payload.validate()?;
    let contact = resolve_contact(state.contact_repository.as_ref(), &user, contact_id).await?;

    let address = state
        .address_repository
        .create(contact.id, &new_address)
        .await?;

    info!("Created address {} for contact {}", address.id, contact.id);
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(AddressResponse::from(address))),
    ))
}

/// All addresses of one of the caller's contacts
pub async fn list(
    Extension(user): Extension<AuthUser>,
    State(state): State<AppState>,
    ResourceId(contact_id): ResourceId<i64>,
) -> ApiResult<impl IntoResponse> {
    let contact = resolve_contact(state.contact_repository.as_ref(), &user, contact_id).await?;

    let addresses = state
        .address_repository
        .list_for_contact(contact.id)
        .await?;

    Ok(Json(DataResponse::new(
        addresses
            .into_iter()
            .map(AddressResponse::from)
            .collect::<Vec<_>>(),
    )))
}

pub async fn get(
    Extension(user): Extension<AuthUser>,
    State(state): State<AppState>,
    ResourceId((contact_id, address_id)): ResourceId<(i64, i64)>,
) -> ApiResult<impl IntoResponse> {
    let contact = resolve_contact(state.contact_repository.as_ref(), &user, contact_id).await?;
    let address =
        resolve_address(state.address_repository.as_ref(), &contact, address_id).await?;

    Ok(Json(DataResponse::new(AddressResponse::from(address))))
}

/// Update an address; `country` must always be sent
pub async fn update(
    Extension(user): Extension<AuthUser>,
    State(state): State<AppState>,
    ResourceId((contact_id, address_id)): ResourceId<(i64, i64)>,
    JsonBody(payload): JsonBody<UpdateAddressRequest>,
) -> ApiResult<impl IntoResponse> {
    let changes = payload.validate()?;

    let contact = resolve_contact(state.contact_repository.as_ref(), &user, contact_id).await?;
    let mut address =
        resolve_address(state.address_repository.as_ref(), &contact, address_id).await?;
    changes.apply(&mut address);

    let address = state
        .address_repository
        .update(&address)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(DataResponse::new(AddressResponse::from(address))))
}

pub async fn delete(
    Extension(user): Extension<AuthUser>,
    State(state): State<AppState>,
    ResourceId((contact_id, address_id)): ResourceId<(i64, i64)>,
) -> ApiResult<impl IntoResponse> {
    let contact = resolve_contact(state.contact_repository.as_ref(), &user, contact_id).await?;
    let address =
        resolve_address(state.address_repository.as_ref(), &contact, address_id).await?;

    if !state.address_repository.delete(&address).await? {
        return Err(ApiError::NotFound);
    }

    info!("Deleted address {} of contact {}", address.id, contact.id);
    Ok(Json(DataResponse::new(true)))
}
