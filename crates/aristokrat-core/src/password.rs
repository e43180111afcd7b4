//! Password hashing with bcrypt.

use anyhow::anyhow;
use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

/// Minimum length accepted for a new password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal(anyhow!("Failed to hash password: {}", e)))
}

/// Hashes with an explicit cost. The seeder uses a low cost to create
/// hundreds of accounts in one run.
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost).map_err(|e| AppError::internal(anyhow!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal(anyhow!("Failed to verify password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("correct-horse").unwrap();
        assert_ne!(hash, "correct-horse");
        assert!(verify_password("correct-horse", &hash).unwrap());
        assert!(!verify_password("wrong-horse", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("samepassword").unwrap();
        let second = hash_password("samepassword").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_low_cost_hash_verifies() {
        let hash = hash_password_with_cost("125", 4).unwrap();
        assert!(verify_password("125", &hash).unwrap());
    }

    #[test]
    fn test_verify_invalid_hash_is_error() {
        assert!(verify_password("password", "not_a_bcrypt_hash").is_err());
    }
}
