//! # Credentials
//!
//! Password hashing for cashier accounts, and the login check built on it.
//!
//! Hashes are argon2 PHC strings (`$argon2id$v=19$...`), salted per
//! account. Plain-text passwords are never stored or compared.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use crate::repository::cashier::CashierRepository;
use bingo_core::Cashier;

/// Hash a password for storage.
pub fn hash_password(password: &str) -> DbResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| DbError::Hashing(e.to_string()))?;

    Ok(hash.to_string())
}

/// Check a password against a stored hash.
///
/// A malformed stored hash counts as a mismatch.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let parsed = match PasswordHash::new(stored_hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(error = %e, "Stored password hash is malformed");
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Result of a login attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    /// Username and password match an active account.
    Authenticated(Cashier),
    /// Unknown username or wrong password. The two are not told apart.
    InvalidCredentials,
    /// Correct password, but the account is disabled.
    Inactive,
}

/// Checks a username and password against the `cajeros` table.
pub async fn authenticate(
    cashiers: &CashierRepository,
    username: &str,
    password: &str,
) -> DbResult<LoginOutcome> {
    let Some(creds) = cashiers.find_credentials_by_username(username).await? else {
        debug!(username = %username, "Login for unknown username");
        return Ok(LoginOutcome::InvalidCredentials);
    };

    if !verify_password(password, &creds.password_hash) {
        debug!(username = %username, "Login with wrong password");
        return Ok(LoginOutcome::InvalidCredentials);
    }

    if !creds.cashier.active {
        return Ok(LoginOutcome::Inactive);
    }

    Ok(LoginOutcome::Authenticated(creds.cashier))
}
