use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};
use log::warn;

pub fn hash_password(password: &str) -> Result<String, BcryptError> {
    hash(password, DEFAULT_COST)
}

/// A malformed hash never matches.
pub fn verify_password(password: &str, hashed_password: &str) -> bool {
    verify(password, hashed_password).unwrap_or_else(|e| {
        warn!("Password hash could not be verified: {}", e);
        false
    })
}
