use anyhow::Context;

use crate::domain::ports::PasswordHasher;

/// bcrypt-backed implementation of the password hashing port.
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Lower costs are useful in tests where the default cost dominates
    /// the runtime.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, raw: &str) -> anyhow::Result<String> {
        bcrypt::hash(raw, self.cost).context("Failed to hash password")
    }

    fn verify(&self, raw: &str, hashed: &str) -> anyhow::Result<bool> {
        bcrypt::verify(raw, hashed).context("Failed to verify password")
    }
}
