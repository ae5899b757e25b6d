//! User model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::Patch;
use crate::validation::{ValidationErrors, Validator};

const USERNAME_MAX: usize = 100;
const PASSWORD_MAX: usize = 100;
const NAME_MAX: usize = 100;

/// User entity
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New user creation payload, with the password already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub name: String,
}

/// Request for user registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

/// Validated registration input
#[derive(Debug)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub name: String,
}

impl RegisterRequest {
    pub fn validate(self) -> Result<Registration, ValidationErrors> {
        let mut validator = Validator::new();
        let username = validator.required("username", self.username, USERNAME_MAX);
        let password = validator.required("password", self.password, PASSWORD_MAX);
        let name = validator.required("name", self.name, NAME_MAX);
        validator.finish()?;

        Ok(Registration {
            username,
            password,
            name,
        })
    }
}

/// Request for user login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Validated login credentials
#[derive(Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(self) -> Result<Credentials, ValidationErrors> {
        let mut validator = Validator::new();
        let username = validator.required("username", self.username, USERNAME_MAX);
        let password = validator.required("password", self.password, PASSWORD_MAX);
        validator.finish()?;

        Ok(Credentials { username, password })
    }
}

/// Request for updating the current user
///
/// Both fields are optional; a missing, null or blank field leaves the stored
/// value untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub password: Patch<String>,
}

/// Validated profile changes; the password is still in plain text
#[derive(Debug, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub password: Option<String>,
}

impl UpdateUserRequest {
    pub fn validate(self) -> Result<ProfileChanges, ValidationErrors> {
        let mut validator = Validator::new();
        let name = validator.optional("name", self.name.into_option(), NAME_MAX);
        let password = validator.optional("password", self.password.into_option(), PASSWORD_MAX);
        validator.finish()?;

        Ok(ProfileChanges { name, password })
    }
}

/// Response for user operations
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            token: user.token,
        }
    }
}
