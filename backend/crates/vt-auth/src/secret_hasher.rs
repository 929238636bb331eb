use crate::{AuthError, HashingCost, Result as AuthErrorResult};

use std::panic::Location;
use std::sync::Arc;

use argon2::password_hash::{
    Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use error_location::ErrorLocation;
use log::debug;

/// One-way salted password hashing (argon2id, PHC string output).
#[derive(Clone)]
pub struct SecretHasher {
    params: Params,
    /// Hash of a throwaway secret under `params`, verified against when there
    /// is no stored hash to check
    placeholder: Arc<str>,
}

impl SecretHasher {
    #[track_caller]
    pub fn new(cost: HashingCost) -> AuthErrorResult<Self> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| AuthError::Hashing {
                message: format!("Invalid argon2 parameters: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let mut hasher = Self {
            params,
            placeholder: Arc::from(""),
        };
        hasher.placeholder = Arc::from(hasher.hash("placeholder-secret")?);
        Ok(hasher)
    }

    fn argon2(&self) -> Argon2<'_> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash with a fresh random salt. Same input, different output every call.
    #[track_caller]
    pub fn hash(&self, plaintext: &str) -> AuthErrorResult<String> {
        let mut salt_bytes = [0u8; 16];
        getrandom::getrandom(&mut salt_bytes).map_err(|e| AuthError::Hashing {
            message: format!("Salt generation failed: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;
        let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| AuthError::Hashing {
            message: format!("Salt encoding failed: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        self.argon2()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|phc| phc.to_string())
            .map_err(|e| AuthError::Hashing {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Check `plaintext` against a stored PHC string.
    ///
    /// A mismatch is `Ok(false)`. A stored hash that cannot be parsed or whose
    /// parameters argon2 rejects is an error: the record itself is damaged.
    #[track_caller]
    pub fn verify(&self, plaintext: &str, hashed: &str) -> AuthErrorResult<bool> {
        let parsed = PasswordHash::new(hashed).map_err(|e| AuthError::Hashing {
            message: format!("Stored hash is malformed: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        // Parameters embedded in the PHC string take precedence over ours, so
        // hashes made under an older cost still verify.
        match self.argon2().verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(e) => Err(AuthError::Hashing {
                message: format!("Stored hash cannot be verified: {}", e),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    /// [`hash`](Self::hash) on the blocking pool, off the async workers
    pub async fn hash_blocking(&self, plaintext: String) -> AuthErrorResult<String> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| AuthError::Hashing {
                message: format!("Hashing task failed: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?
    }

    /// [`verify`](Self::verify) on the blocking pool, off the async workers
    pub async fn verify_blocking(&self, plaintext: String, hashed: String) -> AuthErrorResult<bool> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &hashed))
            .await
            .map_err(|e| AuthError::Hashing {
                message: format!("Verification task failed: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?
    }

    /// Spend one verification against the placeholder hash and discard the
    /// outcome. Lets a lookup miss cost as much as a wrong password.
    pub async fn verify_placeholder_blocking(&self, plaintext: String) {
        let hasher = self.clone();
        let outcome =
            tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &hasher.placeholder))
                .await;
        match outcome {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => debug!("Placeholder verification failed: {}", e),
            Err(e) => debug!("Placeholder verification task failed: {}", e),
        }
    }
}
