use std::sync::Arc;

use crate::contract::model::{Credentials, NewUser, Session, User, UserPatch};
use crate::domain::error::DomainError;
use crate::domain::ports::{PasswordHasher, TokenIssuer};
use crate::domain::repo::UserRepository;
use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Domain service with business rules for user management.
/// Depends only on the repository and auth ports, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub min_name_len: usize,
    pub max_name_len: usize,
    pub min_password_len: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            min_name_len: 2,
            max_name_len: 100,
            min_password_len: 8,
        }
    }
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(
        repo: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repo,
            hasher,
            tokens,
            config,
        }
    }

    #[instrument(name = "user_accounts.service.get_user", skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: Uuid) -> Result<User, DomainError> {
        debug!("Getting user by id");

        let user = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::not_found(id))?;
        Ok(user)
    }

    #[instrument(name = "user_accounts.service.list_users", skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        debug!("Listing users");

        self.repo
            .list()
            .await
            .map_err(|e| DomainError::database(e.to_string()))
    }

    #[instrument(name = "user_accounts.service.create_user", skip(self, new_user))]
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        info!("Creating new user");

        let name = self.validate_name(&new_user.name)?;
        let email = normalize_email(&new_user.email);
        validate_email(&email)?;
        self.validate_password(&new_user.password)?;

        // Uniqueness on the normalized email
        if self
            .repo
            .email_exists(&email)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
        {
            return Err(DomainError::validation(
                "User with this email already exists",
            ));
        }

        let password_hash = self
            .hasher
            .hash(&new_user.password)
            .map_err(|e| DomainError::database(e.to_string()))?;

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        };

        self.repo
            .insert(user.clone())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Successfully created user with id={}", user.id);
        Ok(user)
    }

    #[instrument(name = "user_accounts.service.sign_in", skip(self, credentials))]
    pub async fn sign_in(&self, credentials: Credentials) -> Result<Session, DomainError> {
        info!("Signing in user");

        let email = normalize_email(&credentials.email);
        validate_email(&email)?;
        if credentials.password.is_empty() {
            return Err(DomainError::validation("Password is required"));
        }

        let user = self
            .repo
            .find_by_email(&email)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or(DomainError::Unauthorized)?;

        let valid = self
            .hasher
            .verify(&credentials.password, &user.password_hash)
            .map_err(|e| DomainError::database(e.to_string()))?;
        if !valid {
            return Err(DomainError::Unauthorized);
        }

        let token = self.tokens.issue(user.id);
        info!("Successfully signed in user id={}", user.id);
        Ok(Session { user, token })
    }

    #[instrument(name = "user_accounts.service.update_user", skip(self, patch), fields(user_id = %id))]
    pub async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<User, DomainError> {
        info!("Updating user");

        // Validate only the fields present in the patch
        let name = match patch.name.as_deref() {
            Some(n) => Some(self.validate_name(n)?),
            None => None,
        };
        let email = match patch.email.as_deref() {
            Some(e) => {
                let normalized = normalize_email(e);
                validate_email(&normalized)?;
                Some(normalized)
            }
            None => None,
        };

        let mut current = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::not_found(id))?;

        // Uniqueness for email change
        if let Some(ref new_email) = email {
            if new_email != &current.email
                && self
                    .repo
                    .email_exists(new_email)
                    .await
                    .map_err(|e| DomainError::database(e.to_string()))?
            {
                return Err(DomainError::validation(
                    "User with this email already exists",
                ));
            }
        }

        if let Some(name) = name {
            current.name = name;
        }
        if let Some(email) = email {
            current.email = email;
        }
        current.updated_at = Utc::now();

        self.repo
            .update(current.clone())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Successfully updated user");
        Ok(current)
    }

    #[instrument(name = "user_accounts.service.delete_user", skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: Uuid) -> Result<(), DomainError> {
        info!("Deleting user");

        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        if !deleted {
            return Err(DomainError::not_found(id));
        }

        info!("Successfully deleted user");
        Ok(())
    }

    // --- validation helpers ---

    fn validate_name(&self, name: &str) -> Result<String, DomainError> {
        let trimmed = name.trim();
        if trimmed.chars().count() < self.config.min_name_len {
            return Err(DomainError::validation(
                "Name must be at least 2 characters",
            ));
        }
        if trimmed.chars().count() > self.config.max_name_len {
            return Err(DomainError::validation(
                "Name must be less than 100 characters",
            ));
        }
        Ok(trimmed.to_string())
    }

    fn validate_password(&self, password: &str) -> Result<(), DomainError> {
        if password.chars().count() < self.config.min_password_len {
            return Err(DomainError::validation(
                "Password must be at least 8 characters",
            ));
        }
        Ok(())
    }
}

/// Emails are compared and stored case-insensitively.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Simple `local@domain.tld` shape check.
fn validate_email(email: &str) -> Result<(), DomainError> {
    let invalid = || DomainError::validation("Invalid email address");

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (host, tld) = domain.rsplit_once('.').ok_or_else(invalid)?;
    if host.is_empty() || tld.is_empty() || host.starts_with('.') {
        return Err(invalid());
    }
    Ok(())
}
