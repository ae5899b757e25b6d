//! Contact book service
//!
//! A multi-tenant REST API: users register and log in with a password, then
//! manage their own contacts and the postal addresses of those contacts.
//! Every request past login carries the user's token in the `Authorization`
//! header, and every contact or address lookup is scoped to its owner.
//!
//! Storage sits behind the traits in [`repositories`]; [`AppState::postgres`]
//! wires up the PostgreSQL implementations.

use sqlx::migrate::Migrator;

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod ownership;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;

pub use routes::create_router;
pub use state::AppState;

/// Schema migrations for the users, contacts and addresses tables
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");
