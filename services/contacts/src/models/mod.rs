//! Contact book models for entities, request payloads and responses

pub mod address;
pub mod contact;
pub mod pagination;
pub mod patch;
pub mod user;

// Re-export for convenience
pub use address::{
    Address, AddressChanges, AddressResponse, CreateAddressRequest, NewAddress,
    UpdateAddressRequest,
};
pub use contact::{
    Contact, ContactChanges, ContactFilter, ContactResponse, ContactSearchQuery,
    CreateContactRequest, NewContact, UpdateContactRequest,
};
pub use pagination::{PageMeta, Pagination};
pub use patch::Patch;
pub use user::{
    Credentials, LoginRequest, NewUser, ProfileChanges, RegisterRequest, Registration,
    UpdateUserRequest, User, UserResponse,
};

use serde::Serialize;

/// Envelope wrapping every successful response body
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Envelope for paginated listings
#[derive(Debug, Serialize)]
pub struct PagedResponse<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}
