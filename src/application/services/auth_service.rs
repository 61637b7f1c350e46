//! Authentication service for the admin bearer token.

use serde_json::json;
use sha2::{Digest, Sha256};

use crate::error::AppError;

/// Validates API bearer tokens against the configured admin token.
///
/// Only the SHA-256 digest of the admin token is kept in memory. Requests
/// are authenticated by comparing digests, so the comparison does not leak
/// how many leading characters of the raw token matched.
#[derive(Debug, Clone)]
pub struct AuthService {
    token_hash: String,
}

impl AuthService {
    /// Creates a service accepting exactly `admin_token`.
    pub fn new(admin_token: &str) -> Self {
        Self {
            token_hash: hash_token(admin_token),
        }
    }

    /// Authenticates a raw bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token does not match.
    pub fn authenticate(&self, token: &str) -> Result<(), AppError> {
        if hash_token(token) != self.token_hash {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Invalid token"}),
            ));
        }

        Ok(())
    }
}

/// Hashes a token with SHA-256.
///
/// Returns a 64-character lowercase hex string.
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticate_success() {
        let service = AuthService::new("valid-token");
        assert!(service.authenticate("valid-token").is_ok());
    }

    #[test]
    fn test_authenticate_invalid_token() {
        let service = AuthService::new("valid-token");

        let result = service.authenticate("invalid-token");

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[test]
    fn test_hash_token_consistency() {
        let hash1 = hash_token("test-token");
        let hash2 = hash_token("test-token");

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
        assert_ne!(hash1, hash_token("other-token"));
    }

    #[test]
    fn test_raw_token_is_not_kept() {
        let service = AuthService::new("valid-token");
        assert!(!format!("{service:?}").contains("valid-token"));
    }
}
