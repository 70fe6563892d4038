use crate::contract::model::User;
use async_trait::async_trait;
use uuid::Uuid;

/// Port for the domain layer: persistence operations the domain needs.
///
/// Callers pass emails already normalized to lowercase; implementations
/// compare them verbatim.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Load a user by id. Absence is `Ok(None)`, never an error.
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    /// Load a user by (normalized) email.
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    /// Check uniqueness by email.
    async fn email_exists(&self, email: &str) -> anyhow::Result<bool>;
    /// Insert a fully-formed domain user.
    ///
    /// Service computes id/timestamps/validation/hash; repo persists.
    async fn insert(&self, user: User) -> anyhow::Result<()>;
    /// Update an existing user (by primary key in `user.id`).
    async fn update(&self, user: User) -> anyhow::Result<()>;
    /// Delete by id. Returns true if a row was deleted.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
    /// List all users, newest `created_at` first.
    async fn list(&self) -> anyhow::Result<Vec<User>>;
}
