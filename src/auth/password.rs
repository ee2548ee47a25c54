// Password hashing and verification service

use crate::auth::error::AuthError;

/// Cost factor applied to new password hashes
pub const HASH_COST: u32 = 10;

/// Password service for hashing and verification
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using bcrypt
    pub fn hash_password(password: &str) -> Result<String, AuthError> {
        bcrypt::hash(password, HASH_COST)
            .map_err(|e| AuthError::PasswordHash(format!("Failed to hash password: {}", e)))
    }

    /// Verify a password against a stored hash
    ///
    /// A wrong password is `Ok(false)`; an unparseable hash is an error.
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
        bcrypt::verify(password, hash)
            .map_err(|e| AuthError::PasswordHash(format!("Failed to verify password: {}", e)))
    }
}
