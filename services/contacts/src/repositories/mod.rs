//! Repositories for database operations
//!
//! Handlers talk to storage through the store traits defined here. The
//! PostgreSQL repositories are the production implementations; tests run
//! against [`memory::MemoryStore`].

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{
    Address, Contact, ContactFilter, NewAddress, NewContact, NewUser, Pagination, User,
};

pub mod address;
pub mod contact;
#[cfg(test)]
pub mod memory;
pub mod user;

pub use address::AddressRepository;
pub use contact::ContactRepository;
pub use user::UserRepository;

/// Persistence port for users and their login tokens
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user, or `None` when the username is already taken
    async fn create(&self, new_user: &NewUser) -> Result<Option<User>>;

    /// Find a user by username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Find the user currently holding `token`
    async fn find_by_token(&self, token: &str) -> Result<Option<User>>;

    /// Persist the profile fields (name and password hash) of `user`
    async fn update(&self, user: &User) -> Result<Option<User>>;

    /// Store or clear the login token of a user
    async fn set_token(&self, user_id: i64, token: Option<&str>) -> Result<()>;
}

/// Persistence port for contacts, always scoped to their owner
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Insert a contact owned by `user_id`
    async fn create(&self, user_id: i64, new_contact: &NewContact) -> Result<Contact>;

    /// Find a contact by id, only if it belongs to `user_id`
    async fn find_for_user(&self, user_id: i64, contact_id: i64) -> Result<Option<Contact>>;

    /// Persist the editable fields of `contact`
    async fn update(&self, contact: &Contact) -> Result<Option<Contact>>;

    /// Delete `contact` and, through the cascade, its addresses
    async fn delete(&self, contact: &Contact) -> Result<bool>;

    /// One page of the user's contacts matching `filter`, plus the total
    /// number of matches
    async fn search(
        &self,
        user_id: i64,
        filter: &ContactFilter,
        page: Pagination,
    ) -> Result<(Vec<Contact>, i64)>;
}

/// Persistence port for addresses, always scoped to their contact
#[async_trait]
pub trait AddressStore: Send + Sync {
    /// Insert an address belonging to `contact_id`
    async fn create(&self, contact_id: i64, new_address: &NewAddress) -> Result<Address>;

    /// Find an address by id, only if it belongs to `contact_id`
    async fn find_for_contact(&self, contact_id: i64, address_id: i64)
    -> Result<Option<Address>>;

    /// Every address of a contact, oldest first
    async fn list_for_contact(&self, contact_id: i64) -> Result<Vec<Address>>;

    /// Persist the editable fields of `address`
    async fn update(&self, address: &Address) -> Result<Option<Address>>;

    /// Delete `address`
    async fn delete(&self, address: &Address) -> Result<bool>;
}
