//! Ownership-scoped lookups along the user → contact → address chain
//!
//! A lookup that misses at any link yields [`ApiError::NotFound`], whether the
//! row is absent or owned by somebody else.

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::{Address, Contact},
    repositories::{AddressStore, ContactStore},
};

/// The contact `contact_id`, provided it belongs to `user`
pub async fn resolve_contact(
    contacts: &dyn ContactStore,
    user: &AuthUser,
    contact_id: i64,
) -> ApiResult<Contact> {
    contacts
        .find_for_user(user.id, contact_id)
        .await?
        .ok_or(ApiError::NotFound)
}

/// The address `address_id`, provided it belongs to an already resolved
/// `contact`
pub async fn resolve_address(
    addresses: &dyn AddressStore,
    contact: &Contact,
    address_id: i64,
) -> ApiResult<Address> {
    addresses
        .find_for_contact(contact.id, address_id)
        .await?
        .ok_or(ApiError::NotFound)
}
