//! Credential policy and password hashing
//!
//! Registration consults [`CredentialPolicy::validate`] before an owner is
//! created. Passwords are stored as Argon2id PHC strings, so the salt and the
//! cost parameters travel with each hash and old hashes keep verifying after
//! the configured costs change.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use serde::{Deserialize, Serialize};

use crate::error::{WalletError, WalletResult};

/// Minimum login/password lengths, counted in characters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialPolicy {
    #[serde(default = "default_min_login_length")]
    pub min_login_length: usize,
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
}

fn default_min_login_length() -> usize {
    3
}

fn default_min_password_length() -> usize {
    4
}

impl Default for CredentialPolicy {
    fn default() -> Self {
        Self {
            min_login_length: default_min_login_length(),
            min_password_length: default_min_password_length(),
        }
    }
}

impl CredentialPolicy {
    /// True when both values are non-blank and long enough
    pub fn validate(&self, login: &str, password: &str) -> bool {
        if login.trim().is_empty() || password.trim().is_empty() {
            return false;
        }
        login.chars().count() >= self.min_login_length
            && password.chars().count() >= self.min_password_length
    }
}

/// Argon2 cost parameters for new password hashes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashParams {
    /// Memory cost in KiB (default: 19456 = 19 MiB)
    pub memory_cost: u32,
    /// Iterations
    pub time_cost: u32,
    pub parallelism: u32,
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            memory_cost: 19456,
            time_cost: 2,
            parallelism: 1,
        }
    }
}

/// Hashes and verifies owner passwords
#[derive(Debug, Clone, Default)]
pub struct Authenticator {
    params: HashParams,
}

impl Authenticator {
    pub fn new(params: HashParams) -> Self {
        Self { params }
    }

    fn argon2(&self) -> WalletResult<Argon2<'static>> {
        let params = Params::new(
            self.params.memory_cost,
            self.params.time_cost,
            self.params.parallelism,
            None,
        )
        .map_err(|e| WalletError::Config(format!("Invalid password hashing parameters: {}", e)))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    /// Hash a password into a PHC string with a fresh random salt
    pub fn hash_password(&self, password: &str) -> WalletResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| WalletError::Storage(format!("Password hashing failed: {}", e)))?;

        Ok(hash.to_string())
    }

    /// Check a password against a stored PHC string
    ///
    /// A malformed stored hash counts as a mismatch.
    pub fn verify_password(&self, password: &str, stored: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored) else {
            return false;
        };

        // Costs come from the hash itself, not from our params
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> Authenticator {
        Authenticator::new(HashParams {
            memory_cost: 64,
            time_cost: 1,
            parallelism: 1,
        })
    }

    #[test]
    fn test_policy_accepts_valid() {
        let policy = CredentialPolicy::default();
        assert!(policy.validate("alice", "1234"));
        assert!(policy.validate("bob", "secret"));
    }

    #[test]
    fn test_policy_rejects_short_or_blank() {
        let policy = CredentialPolicy::default();
        assert!(!policy.validate("al", "1234"));
        assert!(!policy.validate("alice", "123"));
        assert!(!policy.validate("   ", "1234"));
        assert!(!policy.validate("alice", "    "));
    }

    #[test]
    fn test_policy_counts_characters() {
        let policy = CredentialPolicy::default();
        // three characters, six bytes
        assert!(policy.validate("ёжи", "пароль"));
    }

    #[test]
    fn test_hash_and_verify() {
        let auth = cheap();
        let hash = auth.hash_password("1234").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(auth.verify_password("1234", &hash));
        assert!(!auth.verify_password("4321", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let auth = cheap();
        let first = auth.hash_password("1234").unwrap();
        let second = auth.hash_password("1234").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_malformed_hash_does_not_verify() {
        assert!(!cheap().verify_password("1234", "1234"));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let auth = Authenticator::new(HashParams {
            memory_cost: 1,
            time_cost: 0,
            parallelism: 0,
        });
        assert!(matches!(
            auth.hash_password("1234"),
            Err(WalletError::Config(_))
        ));
    }
}
