//! Password hashing with argon2

use anyhow::Result;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use std::sync::OnceLock;

/// Hash a plain text password into a PHC string
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Verify a plain text password against a stored PHC string
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| anyhow::anyhow!("Failed to parse password hash: {}", e))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Spend the cost of one verification when the username is unknown
///
/// Login answers an unknown username and a wrong password in the same time.
/// Always yields `false`.
pub fn verify_without_user(password: &str) -> Result<bool> {
    static PLACEHOLDER_HASH: OnceLock<String> = OnceLock::new();

    let placeholder = match PLACEHOLDER_HASH.get() {
        Some(hash) => hash,
        None => {
            let hash = hash_password(&generate_token())?;
            PLACEHOLDER_HASH.get_or_init(|| hash)
        }
    };

    verify_password(password, placeholder)?;
    Ok(false)
}

/// Issue a fresh opaque login token
pub fn generate_token() -> String {
    uuid::Uuid::new_v4().to_string()
}
