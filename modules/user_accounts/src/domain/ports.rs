use uuid::Uuid;

/// Capability for deriving and checking password hashes. The domain never
/// sees the hashing algorithm, only this port.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, raw: &str) -> anyhow::Result<String>;
    fn verify(&self, raw: &str, hashed: &str) -> anyhow::Result<bool>;
}

/// Capability for minting opaque session tokens.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user_id: Uuid) -> String;
}
