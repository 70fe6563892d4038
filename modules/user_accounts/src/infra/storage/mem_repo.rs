//! In-process repository used for tests, demos and `--mock` mode.

use anyhow::bail;
use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::contract::model::User;
use crate::domain::repo::UserRepository;

#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self.rows.read().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(self.rows.read().iter().find(|u| u.email == email).cloned())
    }

    async fn email_exists(&self, email: &str) -> anyhow::Result<bool> {
        Ok(self.rows.read().iter().any(|u| u.email == email))
    }

    async fn insert(&self, user: User) -> anyhow::Result<()> {
        let mut rows = self.rows.write();
        if rows.iter().any(|u| u.id == user.id) {
            bail!("user {} already exists", user.id);
        }
        if rows.iter().any(|u| u.email == user.email) {
            bail!("email {} already taken", user.email);
        }
        rows.push(user);
        Ok(())
    }

    async fn update(&self, user: User) -> anyhow::Result<()> {
        let mut rows = self.rows.write();
        match rows.iter_mut().find(|u| u.id == user.id) {
            Some(slot) => {
                *slot = user;
                Ok(())
            }
            None => bail!("user {} not found", user.id),
        }
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut rows = self.rows.write();
        let before = rows.len();
        rows.retain(|u| u.id != id);
        Ok(rows.len() < before)
    }

    async fn list(&self) -> anyhow::Result<Vec<User>> {
        let mut out: Vec<User> = self.rows.read().clone();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }
}
