use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_HASH_ITERATIONS, DEFAULT_HASH_MEMORY_KIB,
    DEFAULT_HASH_PARALLELISM, MAX_HASH_ITERATIONS, MAX_HASH_MEMORY_KIB, MAX_HASH_PARALLELISM,
};

use serde::Deserialize;

/// Argon2id cost. Fixed for the lifetime of the process.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HashingConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: DEFAULT_HASH_MEMORY_KIB,
            iterations: DEFAULT_HASH_ITERATIONS,
            parallelism: DEFAULT_HASH_PARALLELISM,
        }
    }
}

impl HashingConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !(1..=MAX_HASH_PARALLELISM).contains(&self.parallelism) {
            return Err(ConfigError::hashing(format!(
                "hashing.parallelism must be 1-{}, got {}",
                MAX_HASH_PARALLELISM, self.parallelism
            )));
        }

        if !(1..=MAX_HASH_ITERATIONS).contains(&self.iterations) {
            return Err(ConfigError::hashing(format!(
                "hashing.iterations must be 1-{}, got {}",
                MAX_HASH_ITERATIONS, self.iterations
            )));
        }

        // argon2 requires at least 8 KiB per lane
        let min_memory = 8 * self.parallelism;
        if !(min_memory..=MAX_HASH_MEMORY_KIB).contains(&self.memory_kib) {
            return Err(ConfigError::hashing(format!(
                "hashing.memory_kib must be {}-{}, got {}",
                min_memory, MAX_HASH_MEMORY_KIB, self.memory_kib
            )));
        }

        Ok(())
    }
}
