//! Application state shared across handlers

use sqlx::PgPool;
use std::sync::Arc;

use crate::repositories::{
    AddressRepository, AddressStore, ContactRepository, ContactStore, UserRepository, UserStore,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub user_repository: Arc<dyn UserStore>,
    pub contact_repository: Arc<dyn ContactStore>,
    pub address_repository: Arc<dyn AddressStore>,
}

impl AppState {
    /// State backed by the PostgreSQL repositories
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            user_repository: Arc::new(UserRepository::new(pool.clone())),
            contact_repository: Arc::new(ContactRepository::new(pool.clone())),
            address_repository: Arc::new(AddressRepository::new(pool)),
        }
    }
}
