use argon2::{
    password_hash::{self, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use regex::Regex;
use tracing::{debug, warn};

use crate::auth::{repo::UserRepo, repo_types::User};
use crate::error::AppError;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    // Verified against when the username is unknown so both failure paths
    // cost one argon2 run.
    static ref DUMMY_HASH: String =
        hash_password("lessonforge-placeholder-password").unwrap_or_default();
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Argon2id PHC string for `plain`, with a fresh random salt.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|phc| phc.to_string())
        .map_err(|e| anyhow::anyhow!("hash password: {e}"))
}

/// `Ok(false)` for a wrong password; `Err` only when the stored hash is unusable.
pub fn verify_password(plain: &str, stored: &str) -> anyhow::Result<bool> {
    let phc = PasswordHash::new(stored)
        .map_err(|e| anyhow::anyhow!("stored hash unreadable: {e}"))?;
    match Argon2::default().verify_password(plain.as_bytes(), &phc) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(anyhow::anyhow!("verify password: {e}")),
    }
}

/// Create an account. Username collisions are reported before email ones.
pub async fn register(
    users: &dyn UserRepo,
    username: &str,
    email: &str,
    raw_password: &str,
) -> Result<User, AppError> {
    if users.find_by_username(username).await?.is_some() {
        warn!(%username, "username already taken");
        return Err(AppError::DuplicateUsername);
    }
    if users.find_by_email(email).await?.is_some() {
        warn!(%email, "email already registered");
        return Err(AppError::DuplicateEmail);
    }

    let hash = hash_password(raw_password)?;
    users.create(username, email, &hash).await
}

/// Resolve a username/password pair to a user.
///
/// Unknown usernames and wrong passwords both yield `InvalidCredentials`.
pub async fn authenticate(
    users: &dyn UserRepo,
    username: &str,
    raw_password: &str,
) -> Result<User, AppError> {
    let Some(user) = users.find_by_username(username).await? else {
        let _ = verify_password(raw_password, &DUMMY_HASH);
        debug!(%username, "login for unknown username");
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(raw_password, &user.password_hash)? {
        debug!(user_id = %user.id, "login with wrong password");
        return Err(AppError::InvalidCredentials);
    }
    Ok(user)
}
