//! Factory configuration
//!
//! Configuration is an explicit value handed to each factory. Nothing here
//! is process-wide.

use std::env;

use crate::error::{FactoryError, FactoryResult};
use crate::fake_data::Faker;

/// Environment variable holding the fake data seed
pub const SEED_ENV_VAR: &str = "SEEDLING_SEED";

/// Configuration for factory behavior
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactoryConfig {
    /// Seed for deterministic fake data generation
    pub seed: Option<u64>,
}

impl FactoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> FactoryResult<Self> {
        let mut config = Self::new();

        if let Ok(seed_str) = env::var(SEED_ENV_VAR) {
            let seed = seed_str.trim().parse().map_err(|_| FactoryError::Configuration {
                field: "seed".to_string(),
                value: seed_str.clone(),
                expected: "an unsigned 64-bit integer".to_string(),
            })?;
            config.seed = Some(seed);
        }

        Ok(config)
    }

    pub fn is_deterministic(&self) -> bool {
        self.seed.is_some()
    }

    /// Fresh randomness source for one build
    pub fn faker(&self) -> Faker {
        match self.seed {
            Some(seed) => Faker::seeded(seed),
            None => Faker::from_entropy(),
        }
    }
}
